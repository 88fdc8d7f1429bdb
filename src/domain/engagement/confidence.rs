//! How much an investigator can trust what a conversation produced.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::RiskScore;
use crate::domain::intelligence::{EntityKind, EntitySet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Grades traceable entities (handles, accounts, links, phones)
    /// together with the classifier's risk score.
    pub fn assess(entities: &EntitySet, risk: RiskScore) -> Self {
        let traceable: usize = [
            EntityKind::PaymentHandle,
            EntityKind::BankAccount,
            EntityKind::PhishingLink,
            EntityKind::PhoneNumber,
        ]
        .iter()
        .map(|k| entities.count(*k))
        .sum();

        if traceable >= 3 && risk.is_at_least(0.8) {
            ConfidenceLevel::High
        } else if traceable >= 1 || risk.is_at_least(0.6) {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        };
        write!(f, "{}", s)
    }
}
