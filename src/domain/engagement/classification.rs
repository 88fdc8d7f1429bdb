//! Verdict handed back by a scam classifier.

use serde::{Deserialize, Serialize};

use super::persona::Persona;
use super::scam_type::ScamType;
use crate::domain::foundation::RiskScore;

/// Classification of an opening scam message.
///
/// Always populated from the closed sets, even when the classifier fell
/// back to a default verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub scam_type: ScamType,
    pub persona: Persona,
    pub risk_score: RiskScore,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

impl Classification {
    pub fn new(scam_type: ScamType, persona: Persona, risk_score: RiskScore) -> Self {
        Self {
            scam_type,
            persona,
            risk_score,
            red_flags: Vec::new(),
            reasoning: String::new(),
        }
    }

    pub fn with_red_flag(mut self, flag: impl Into<String>) -> Self {
        self.red_flags.push(flag.into());
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    /// Verdict used when nothing better is known.
    pub fn unknown() -> Self {
        Self::new(ScamType::Other, Persona::default(), RiskScore::new(0.5))
            .with_reasoning("No classifier verdict available")
    }
}
