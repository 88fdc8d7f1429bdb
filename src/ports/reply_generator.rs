//! Reply Generator Port - what the persona says next.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::engagement::{EngagementPhase, Persona, ScamType};
use crate::domain::foundation::Outcome;

/// Everything a generator needs to stay in character.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplyRequest {
    pub phase: EngagementPhase,
    pub persona: Persona,
    pub scam_type: ScamType,
    /// Number of the turn being answered (1-based).
    pub turn_number: u32,
    pub scammer_message: String,
    /// Rolling summary of the previous turns; empty on first contact.
    pub context_summary: String,
}

/// A persona reply plus the generator's diagnostic note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedReply {
    /// Never empty.
    pub text: String,
    pub reasoning: String,
}

impl GeneratedReply {
    pub fn new(text: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reasoning: reasoning.into(),
        }
    }
}

/// Produces the persona's reply to a scammer message.
///
/// Must always return non-empty text; implementations fall back to a static
/// phase-appropriate line and report `Outcome::Degraded`.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, request: &ReplyRequest) -> Outcome<GeneratedReply>;
}
