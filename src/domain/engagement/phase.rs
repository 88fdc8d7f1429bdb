//! Engagement phases and the turn-count schedule that drives them.
//!
//! Phases only move forward and only because the turn counter grew.
//! Whether the engagement has ended is decided separately by the
//! continuation policy; there is no "completed" phase.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Last turn of each phase; turns past the final bound are `SafeExit`.
const TRUST_BUILDING_LAST_TURN: u32 = 3;
const INFORMATION_GATHERING_LAST_TURN: u32 = 7;
const INTELLIGENCE_EXTRACTION_LAST_TURN: u32 = 12;

/// Stage of an engagement, steering how the persona replies.
///
/// Ordered: `TrustBuilding < InformationGathering < IntelligenceExtraction < SafeExit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementPhase {
    /// Turns 1-3. Play along and appear believable.
    TrustBuilding,
    /// Turns 4-7. Ask how to pay and who to pay.
    InformationGathering,
    /// Turns 8-12. Claim failures to pull out alternate accounts and links.
    IntelligenceExtraction,
    /// Turn 13 onward. Stall and wind down without tipping off the scammer.
    SafeExit,
}

impl EngagementPhase {
    /// All phases in order.
    pub const ALL: [EngagementPhase; 4] = [
        EngagementPhase::TrustBuilding,
        EngagementPhase::InformationGathering,
        EngagementPhase::IntelligenceExtraction,
        EngagementPhase::SafeExit,
    ];

    /// Returns the reply generator's directive for this phase.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::TrustBuilding => {
                "Show interest but mild hesitation. Ask how it works. Never share real personal data."
            }
            Self::InformationGathering => {
                "Agree to proceed. Ask for the payment method, account or UPI details and any links."
            }
            Self::IntelligenceExtraction => {
                "Report that the payment failed. Ask for alternate accounts, IFSC codes, links and phone numbers."
            }
            Self::SafeExit => {
                "Stall politely with a believable excuse. Do not confront or reveal suspicion."
            }
        }
    }

    /// Returns a short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TrustBuilding => "Trust building",
            Self::InformationGathering => "Information gathering",
            Self::IntelligenceExtraction => "Intelligence extraction",
            Self::SafeExit => "Safe exit",
        }
    }

    /// The phase following this one, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::TrustBuilding => Some(Self::InformationGathering),
            Self::InformationGathering => Some(Self::IntelligenceExtraction),
            Self::IntelligenceExtraction => Some(Self::SafeExit),
            Self::SafeExit => None,
        }
    }
}

impl Default for EngagementPhase {
    fn default() -> Self {
        Self::TrustBuilding
    }
}

impl fmt::Display for EngagementPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A phase may stay put or advance one step; it never regresses.
///
/// `SafeExit` loops onto itself, so no phase is terminal.
impl StateMachine for EngagementPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self.next() {
            Some(next) => vec![*self, next],
            None => vec![*self],
        }
    }
}

/// Maps a turn counter to its phase.
///
/// Turn 0 (nothing recorded yet) is `TrustBuilding`.
pub fn phase_for(turn_number: u32) -> EngagementPhase {
    match turn_number {
        0..=TRUST_BUILDING_LAST_TURN => EngagementPhase::TrustBuilding,
        n if n <= INFORMATION_GATHERING_LAST_TURN => EngagementPhase::InformationGathering,
        n if n <= INTELLIGENCE_EXTRACTION_LAST_TURN => EngagementPhase::IntelligenceExtraction,
        _ => EngagementPhase::SafeExit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod schedule {
        use super::*;

        #[test]
        fn boundaries_match_schedule() {
            assert_eq!(phase_for(0), EngagementPhase::TrustBuilding);
            assert_eq!(phase_for(1), EngagementPhase::TrustBuilding);
            assert_eq!(phase_for(3), EngagementPhase::TrustBuilding);
            assert_eq!(phase_for(4), EngagementPhase::InformationGathering);
            assert_eq!(phase_for(7), EngagementPhase::InformationGathering);
            assert_eq!(phase_for(8), EngagementPhase::IntelligenceExtraction);
            assert_eq!(phase_for(12), EngagementPhase::IntelligenceExtraction);
            assert_eq!(phase_for(13), EngagementPhase::SafeExit);
            assert_eq!(phase_for(u32::MAX), EngagementPhase::SafeExit);
        }

        #[test]
        fn schedule_never_regresses() {
            for n in 1..100 {
                assert!(phase_for(n) <= phase_for(n + 1), "regressed at turn {}", n);
            }
        }

        #[test]
        fn consecutive_turns_are_valid_transitions() {
            for n in 0..30 {
                let current = phase_for(n);
                assert!(current.can_transition_to(&phase_for(n + 1)));
            }
        }
    }

    mod transitions {
        use super::*;

        #[test]
        fn cannot_skip_or_go_back() {
            use EngagementPhase::*;
            assert!(TrustBuilding.transition_to(IntelligenceExtraction).is_err());
            assert!(SafeExit.transition_to(TrustBuilding).is_err());
            assert!(InformationGathering.transition_to(TrustBuilding).is_err());
        }

        #[test]
        fn no_phase_is_terminal() {
            for phase in EngagementPhase::ALL {
                assert!(!phase.is_terminal());
            }
        }
    }

    mod presentation {
        use super::*;

        #[test]
        fn default_phase_is_trust_building() {
            assert_eq!(EngagementPhase::default(), EngagementPhase::TrustBuilding);
        }

        #[test]
        fn serializes_to_snake_case() {
            let json = serde_json::to_string(&EngagementPhase::IntelligenceExtraction).unwrap();
            assert_eq!(json, "\"intelligence_extraction\"");
        }

        #[test]
        fn all_phases_have_directives_and_labels() {
            for phase in EngagementPhase::ALL {
                assert!(!phase.directive().is_empty());
                assert!(!phase.label().is_empty());
            }
        }
    }
}
