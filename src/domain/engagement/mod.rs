//! Engagement module - conversation state, phases and the store that
//! owns them.
//!
//! # Lifecycle
//!
//! `ConversationStore::create` opens a conversation at turn 0. Every
//! exchange is recorded by `ConversationStore::add_turn`, which advances
//! the turn counter, merges the turn's entities into the cumulative set and
//! recomputes the phase from the new count. The continuation policy then
//! decides whether to keep replying.

mod classification;
mod confidence;
mod continuation;
mod conversation;
mod persona;
mod phase;
mod record;
mod scam_type;
mod store;
mod turn;

pub use classification::Classification;
pub use confidence::ConfidenceLevel;
pub use continuation::{ContinuationDecision, ContinuationPolicy, DEFAULT_MAX_TURNS};
pub use conversation::{ConversationState, DEFAULT_CONTEXT_WINDOW};
pub use persona::Persona;
pub use phase::{phase_for, EngagementPhase};
pub use record::ConversationRecord;
pub use scam_type::ScamType;
pub use store::{ConversationStats, ConversationStore, ConversationSummary, StoreError};
pub use turn::ConversationTurn;
