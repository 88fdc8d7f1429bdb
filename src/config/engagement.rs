//! Engagement limits

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::engagement::{
    ContinuationPolicy, ConversationStore, DEFAULT_CONTEXT_WINDOW, DEFAULT_MAX_TURNS,
};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngagementConfig {
    /// Hard cap on turns per conversation
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    /// Trailing turns kept in the rolling context summary
    #[serde(default = "default_context_window")]
    pub context_window_turns: usize,
}

impl EngagementConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_turns == 0 {
            return Err(ValidationError::InvalidMaxTurns);
        }
        if self.context_window_turns == 0 {
            return Err(ValidationError::InvalidContextWindow);
        }
        Ok(())
    }

    /// Builds an empty store honoring these limits.
    pub fn build_store(&self) -> ConversationStore {
        ConversationStore::with_policy(ContinuationPolicy::new(self.max_turns))
            .with_context_window(self.context_window_turns)
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            context_window_turns: default_context_window(),
        }
    }
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

fn default_context_window() -> usize {
    DEFAULT_CONTEXT_WINDOW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_domain() {
        let config = EngagementConfig::default();
        assert_eq!(config.max_turns, 15);
        assert_eq!(config.context_window_turns, 3);
        assert_eq!(config.build_store().policy().max_turns(), 15);
    }

    #[test]
    fn zero_limits_are_rejected() {
        let no_turns = EngagementConfig {
            max_turns: 0,
            ..Default::default()
        };
        assert_eq!(no_turns.validate(), Err(ValidationError::InvalidMaxTurns));

        let no_window = EngagementConfig {
            context_window_turns: 0,
            ..Default::default()
        };
        assert_eq!(no_window.validate(), Err(ValidationError::InvalidContextWindow));
    }
}
