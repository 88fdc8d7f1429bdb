//! When to stop replying to a scammer.

use serde::{Deserialize, Serialize};

use super::conversation::ConversationState;
use super::phase::EngagementPhase;

/// Default hard cap on recorded turns.
pub const DEFAULT_MAX_TURNS: u32 = 15;

/// Outcome of checking whether an engagement should go on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuationDecision {
    Continue,
    /// The hard turn cap was reached.
    TurnCapReached,
    /// Safe-exit phase with a payment handle, account or link in hand.
    IntelligenceSecured,
}

impl ContinuationDecision {
    pub fn should_continue(&self) -> bool {
        matches!(self, ContinuationDecision::Continue)
    }
}

/// Stopping rules applied after every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuationPolicy {
    max_turns: u32,
}

impl ContinuationPolicy {
    pub fn new(max_turns: u32) -> Self {
        Self { max_turns }
    }

    pub fn max_turns(&self) -> u32 {
        self.max_turns
    }

    /// The turn cap wins regardless of phase; otherwise stop once in safe
    /// exit with actionable intelligence.
    pub fn decide(&self, state: &ConversationState) -> ContinuationDecision {
        if state.turn_count() >= self.max_turns {
            return ContinuationDecision::TurnCapReached;
        }
        if state.phase() == EngagementPhase::SafeExit && state.entities().has_actionable_intel() {
            return ContinuationDecision::IntelligenceSecured;
        }
        ContinuationDecision::Continue
    }
}

impl Default for ContinuationPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}
