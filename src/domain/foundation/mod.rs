//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, result wrappers and error types
//! that form the vocabulary of the honeypot domain.

mod errors;
mod ids;
mod outcome;
mod risk_score;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::ConversationId;
pub use outcome::Outcome;
pub use risk_score::RiskScore;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
