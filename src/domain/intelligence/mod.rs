//! Intelligence module - what the honeypot learns about a scammer.
//!
//! Pure functions only: extraction turns text into an [`EntitySet`],
//! [`merge`] folds sets together, and [`detect_tactics`] names the pressure
//! tactics a message leans on. Nothing here holds state between calls.

mod branch_codes;
mod entity;
mod entity_set;
mod extractor;
mod phone;
mod tactics;

pub use branch_codes::bank_name_for;
pub use entity::{BankAccount, EntityKind};
pub use entity_set::{merge, EntitySet};
pub use extractor::{extract, EntityExtractor};
pub use phone::normalize_phone;
pub use tactics::{detect_tactics, tally_tactics, Tactic, TacticCount, TacticDetection, TacticDetector};
