//! Keyword classifier used when no language model is configured, and as the
//! fallback verdict of the model-backed classifier.

use async_trait::async_trait;

use crate::domain::engagement::{Classification, ScamType};
use crate::domain::foundation::{Outcome, RiskScore};
use crate::ports::ScamClassifier;

struct ScamRule {
    scam_type: ScamType,
    keywords: &'static [&'static str],
    base_risk: f64,
    red_flags: &'static [&'static str],
}

/// Checked in order; the first rule with a matching keyword wins.
const RULES: &[ScamRule] = &[
    ScamRule {
        scam_type: ScamType::Loan,
        keywords: &["loan", "credit", "processing fee", "instant approval"],
        base_risk: 0.85,
        red_flags: &["Loan offer", "Processing fee mention"],
    },
    ScamRule {
        scam_type: ScamType::PrizeLottery,
        keywords: &["won", "prize", "lottery", "congratulations", "winner"],
        base_risk: 0.9,
        red_flags: &["Prize claim", "Congratulations message"],
    },
    ScamRule {
        scam_type: ScamType::InvestmentFraud,
        keywords: &["investment", "returns", "profit", "trading", "stock"],
        base_risk: 0.8,
        red_flags: &["Investment opportunity", "High returns promise"],
    },
    ScamRule {
        scam_type: ScamType::JobOffer,
        keywords: &["job", "hiring", "work from home", "earn money"],
        base_risk: 0.75,
        red_flags: &["Job offer", "Work from home"],
    },
    ScamRule {
        scam_type: ScamType::TechSupport,
        keywords: &["technical support", "virus", "account blocked", "verify"],
        base_risk: 0.8,
        red_flags: &["Tech support claim", "Account issue"],
    },
    ScamRule {
        scam_type: ScamType::Cryptocurrency,
        keywords: &["crypto", "bitcoin", "ethereum", "blockchain"],
        base_risk: 0.85,
        red_flags: &["Cryptocurrency mention"],
    },
];

const UNMATCHED_RISK: f64 = 0.5;
const URGENCY_WORDS: &[&str] = &["urgent", "limited time", "act now", "hurry", "immediately"];
const PAYMENT_WORDS: &[&str] = &["send money", "transfer", "payment", "upi", "account"];
const SIGNAL_BONUS: f64 = 0.1;

/// Deterministic keyword-based scam classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedClassifier;

impl RuleBasedClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies without any I/O. Always yields a verdict.
    pub fn classify_message(&self, message: &str) -> Classification {
        let lowered = message.to_lowercase();
        let matched = RULES
            .iter()
            .find(|rule| contains_any(&lowered, rule.keywords));

        let (scam_type, base_risk, mut red_flags) = match matched {
            Some(rule) => (
                rule.scam_type,
                rule.base_risk,
                rule.red_flags.iter().map(|f| f.to_string()).collect::<Vec<_>>(),
            ),
            None => (ScamType::Other, UNMATCHED_RISK, Vec::new()),
        };

        let mut risk = RiskScore::new(base_risk);
        if contains_any(&lowered, URGENCY_WORDS) {
            red_flags.push("Urgency tactics".to_string());
            risk = risk.raised_by(SIGNAL_BONUS);
        }
        if contains_any(&lowered, PAYMENT_WORDS) {
            red_flags.push("Payment request".to_string());
            risk = risk.raised_by(SIGNAL_BONUS);
        }

        let reasoning = format!(
            "Rule-based analysis detected {} with {} red flags",
            scam_type.as_str(),
            red_flags.len()
        );
        Classification {
            scam_type,
            persona: scam_type.recommended_persona(),
            risk_score: risk,
            red_flags,
            reasoning,
        }
    }
}

#[async_trait]
impl ScamClassifier for RuleBasedClassifier {
    async fn classify(&self, message: &str) -> Outcome<Classification> {
        Outcome::ok(self.classify_message(message))
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engagement::Persona;

    fn classify(message: &str) -> Classification {
        RuleBasedClassifier::new().classify_message(message)
    }

    #[test]
    fn loan_messages_target_cautious_persona() {
        let verdict = classify("Instant approval on your personal loan!");
        assert_eq!(verdict.scam_type, ScamType::Loan);
        assert_eq!(verdict.persona, Persona::CautiousMiddleAged);
        assert_eq!(verdict.risk_score, RiskScore::new(0.85));
    }

    #[test]
    fn first_matching_rule_wins() {
        // "won" (prize) and "crypto" both present; prize is checked first
        let verdict = classify("You won free crypto");
        assert_eq!(verdict.scam_type, ScamType::PrizeLottery);
        assert_eq!(verdict.persona, Persona::EagerYoungAdult);
    }

    #[test]
    fn urgency_and_payment_raise_risk_up_to_cap() {
        let verdict = classify("Congratulations winner! Urgent: transfer the fee via UPI");
        assert_eq!(verdict.risk_score, RiskScore::MAX);
        assert!(verdict.red_flags.contains(&"Urgency tactics".to_string()));
        assert!(verdict.red_flags.contains(&"Payment request".to_string()));
    }

    #[test]
    fn unmatched_message_is_other_with_default_persona() {
        let verdict = classify("hi, who is this?");
        assert_eq!(verdict.scam_type, ScamType::Other);
        assert_eq!(verdict.persona, Persona::CautiousMiddleAged);
        assert_eq!(verdict.risk_score, RiskScore::new(0.5));
        assert!(verdict.red_flags.is_empty());
    }

    #[tokio::test]
    async fn port_implementation_is_never_degraded() {
        let outcome = RuleBasedClassifier::new().classify("bitcoin doubling scheme").await;
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.value().scam_type, ScamType::Cryptocurrency);
    }
}
