//! Pressure-tactic recognition.
//!
//! Scammers lean on a small repertoire of persuasion levers. Each message
//! is scored against a keyword list and a few phrase patterns per tactic.
//! Like extraction, detection is pure and never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use super::extractor::compile;

/// At most this many matched keywords are reported per detection.
const MAX_REPORTED_KEYWORDS: usize = 5;

static DEFAULT_DETECTOR: Lazy<TacticDetector> = Lazy::new(TacticDetector::new);

/// Detects tactics in `text` using the shared detector.
pub fn detect_tactics(text: &str) -> Vec<TacticDetection> {
    DEFAULT_DETECTOR.detect(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tactic {
    Fear,
    Urgency,
    Authority,
    Reward,
    Scarcity,
    SocialProof,
    Reciprocity,
    Confusion,
    Greed,
    TrustBuilding,
}

impl Tactic {
    pub const ALL: [Tactic; 10] = [
        Tactic::Fear,
        Tactic::Urgency,
        Tactic::Authority,
        Tactic::Reward,
        Tactic::Scarcity,
        Tactic::SocialProof,
        Tactic::Reciprocity,
        Tactic::Confusion,
        Tactic::Greed,
        Tactic::TrustBuilding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tactic::Fear => "fear",
            Tactic::Urgency => "urgency",
            Tactic::Authority => "authority",
            Tactic::Reward => "reward",
            Tactic::Scarcity => "scarcity",
            Tactic::SocialProof => "social_proof",
            Tactic::Reciprocity => "reciprocity",
            Tactic::Confusion => "confusion",
            Tactic::Greed => "greed",
            Tactic::TrustBuilding => "trust_building",
        }
    }

    /// One-line description for investigators.
    pub fn description(&self) -> &'static str {
        match self {
            Tactic::Fear => "Threats and intimidation to create panic",
            Tactic::Urgency => "Artificial time pressure to force quick decisions",
            Tactic::Authority => "Impersonating officials or institutions",
            Tactic::Reward => "Promising prizes, money or benefits",
            Tactic::Scarcity => "Claiming limited availability",
            Tactic::SocialProof => "Fake popularity or testimonials",
            Tactic::Reciprocity => "Offering help to create obligation",
            Tactic::Confusion => "Technical jargon to confuse the victim",
            Tactic::Greed => "Appealing to the desire for easy money",
            Tactic::TrustBuilding => "Asserting credibility and safety",
        }
    }

    fn weight(&self) -> f64 {
        match self {
            Tactic::Fear | Tactic::Authority => 1.0,
            Tactic::Urgency => 0.9,
            Tactic::Reward | Tactic::Greed => 0.8,
            Tactic::Scarcity => 0.7,
            Tactic::SocialProof | Tactic::Confusion => 0.6,
            Tactic::Reciprocity | Tactic::TrustBuilding => 0.5,
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Tactic::Fear => &[
                "arrest", "arrested", "police", "jail", "legal action", "court", "fine", "penalty",
                "freeze", "frozen", "block", "blocked", "suspend", "suspended", "criminal",
                "warrant", "investigation",
            ],
            Tactic::Urgency => &[
                "immediately", "now", "urgent", "urgently", "hurry", "quick", "today", "deadline",
                "expires", "last chance", "minutes", "hours", "asap", "right now", "emergency",
            ],
            Tactic::Authority => &[
                "government", "official", "officer", "department", "ministry", "rbi", "sebi",
                "income tax", "cbi", "police", "inspector", "commissioner", "authorized", "customs",
            ],
            Tactic::Reward => &[
                "win", "won", "prize", "reward", "bonus", "cashback", "refund", "lottery", "lucky",
                "selected", "congratulations", "winner", "jackpot", "gift", "free",
            ],
            Tactic::Scarcity => &[
                "limited", "exclusive", "only", "few", "rare", "special offer", "one time", "last",
                "slots",
            ],
            Tactic::SocialProof => &[
                "customers", "thousands", "lakhs", "everyone", "trusted", "verified", "testimonial",
                "satisfied",
            ],
            Tactic::Reciprocity => &["help", "assist", "support", "favor", "benefit", "opportunity"],
            Tactic::Confusion => &[
                "technical", "system", "error", "glitch", "update", "verification", "kyc",
                "validate", "procedure",
            ],
            Tactic::Greed => &[
                "money", "cash", "profit", "earn", "income", "returns", "investment", "double",
                "triple", "rich", "passive income",
            ],
            Tactic::TrustBuilding => &[
                "trust", "genuine", "real", "authentic", "legitimate", "safe", "secure",
                "guaranteed", "certified", "registered",
            ],
        }
    }

    fn patterns(&self) -> &'static [&'static str] {
        match self {
            Tactic::Fear => &[
                r"you will be arrested",
                r"legal action will be taken",
                r"account (will be|has been|is) (frozen|blocked|suspended)",
                r"criminal case",
            ],
            Tactic::Urgency => &[
                r"today only",
                r"within \d+ (hours|minutes)",
                r"expires in \d+",
                r"act now",
            ],
            Tactic::Authority => &[
                r"i am (an? )?(officer|inspector|calling from)",
                r"government (official|department)",
                r"authorized by",
                r"official (notice|communication)",
            ],
            Tactic::Reward => &[r"you have won", r"guaranteed returns", r"approved for"],
            Tactic::Scarcity => &[
                r"only \d+ (slots|spots|places)",
                r"limited (offer|time|slots)",
                r"one time (offer|opportunity)",
            ],
            Tactic::SocialProof => &[
                r"\d+\s*(lakh|thousand|crore)\s*(people|customers)",
                r"thousands of (people|users)",
                r"trusted by \d+",
            ],
            Tactic::Reciprocity => &[r"we (will|can) help you", r"let me (help|assist)"],
            Tactic::Confusion => &[
                r"technical (issue|error|problem)",
                r"verification (required|needed|pending)",
                r"confirm your (details|information)",
            ],
            Tactic::Greed => &[
                r"(double|triple) your (money|investment)",
                r"\d+\s*% returns",
                r"passive income",
            ],
            Tactic::TrustBuilding => &[r"you can trust", r"100% (safe|genuine|secure)"],
        }
    }
}

impl fmt::Display for Tactic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One tactic found in one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacticDetection {
    pub tactic: Tactic,
    /// Weighted share of the tactic's keywords and patterns that matched, in `[0, 1]`.
    pub confidence: f64,
    pub keywords: Vec<String>,
}

/// How often a tactic appeared across a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TacticCount {
    pub tactic: Tactic,
    pub occurrences: u32,
    pub description: &'static str,
}

#[derive(Debug)]
struct TacticRule {
    tactic: Tactic,
    patterns: Vec<Regex>,
}

/// Compiled phrase patterns for every tactic.
#[derive(Debug)]
pub struct TacticDetector {
    rules: Vec<TacticRule>,
}

impl Default for TacticDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TacticDetector {
    pub fn new() -> Self {
        let rules = Tactic::ALL
            .iter()
            .map(|tactic| TacticRule {
                tactic: *tactic,
                patterns: tactic
                    .patterns()
                    .iter()
                    .filter_map(|p| compile(tactic.as_str(), p))
                    .collect(),
            })
            .collect();
        Self { rules }
    }

    /// Tactics present in `text`, strongest first.
    pub fn detect(&self, text: &str) -> Vec<TacticDetection> {
        let lowered = text.to_lowercase();
        // Keywords match whole words only: " now " but not "know".
        let words = format!(
            " {} ",
            lowered
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let mut detections: Vec<TacticDetection> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let keywords = rule.tactic.keywords();
                let matched: Vec<&str> = keywords
                    .iter()
                    .copied()
                    .filter(|k| words.contains(&format!(" {} ", k)))
                    .collect();
                let pattern_hits = rule.patterns.iter().filter(|re| re.is_match(&lowered)).count();
                if matched.is_empty() && pattern_hits == 0 {
                    return None;
                }

                let keyword_score = matched.len() as f64 / keywords.len() as f64;
                let pattern_score = pattern_hits as f64 / rule.tactic.patterns().len().max(1) as f64;
                let confidence =
                    ((keyword_score * 0.6 + pattern_score * 0.4) * rule.tactic.weight()).min(1.0);

                Some(TacticDetection {
                    tactic: rule.tactic,
                    confidence,
                    keywords: matched
                        .into_iter()
                        .take(MAX_REPORTED_KEYWORDS)
                        .map(str::to_string)
                        .collect(),
                })
            })
            .collect();

        detections.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal));
        detections
    }
}

/// Counts tactics across several messages, most frequent first.
pub fn tally_tactics<'a>(messages: impl IntoIterator<Item = &'a str>) -> Vec<TacticCount> {
    let mut counts: BTreeMap<Tactic, u32> = BTreeMap::new();
    for message in messages {
        for detection in detect_tactics(message) {
            *counts.entry(detection.tactic).or_default() += 1;
        }
    }

    let mut tally: Vec<TacticCount> = counts
        .into_iter()
        .map(|(tactic, occurrences)| TacticCount {
            tactic,
            occurrences,
            description: tactic.description(),
        })
        .collect();
    tally.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tactics(text: &str) -> Vec<Tactic> {
        detect_tactics(text).into_iter().map(|d| d.tactic).collect()
    }

    mod detection {
        use super::*;

        #[test]
        fn threat_ranks_fear_first() {
            let found = tactics("You will be arrested by police immediately");

            assert_eq!(found[0], Tactic::Fear);
            assert!(found.contains(&Tactic::Authority));
            assert!(found.contains(&Tactic::Urgency));
        }

        #[test]
        fn fear_confidence_combines_keywords_and_patterns() {
            let fear = detect_tactics("You will be arrested by police")
                .into_iter()
                .find(|d| d.tactic == Tactic::Fear)
                .unwrap();

            // 2 of 17 keywords and 1 of 4 patterns
            let expected = 2.0 / 17.0 * 0.6 + 1.0 / 4.0 * 0.4;
            assert!((fear.confidence - expected).abs() < 1e-9);
            assert_eq!(fear.keywords, vec!["arrested", "police"]);
        }

        #[test]
        fn plain_small_talk_has_no_tactics() {
            assert!(detect_tactics("hello how are you").is_empty());
            assert!(detect_tactics("").is_empty());
        }

        #[test]
        fn keywords_match_whole_words() {
            assert!(!tactics("I know the way").contains(&Tactic::Urgency));
            assert!(tactics("send it now!").contains(&Tactic::Urgency));
        }

        #[test]
        fn multi_word_keywords_survive_punctuation() {
            let found = detect_tactics("Earn passive-income daily");
            let greed = found.iter().find(|d| d.tactic == Tactic::Greed).unwrap();
            assert!(greed.keywords.contains(&"passive income".to_string()));
        }

        #[test]
        fn reported_keywords_are_capped() {
            let fear = detect_tactics(
                "arrest police jail court fine penalty freeze warrant criminal investigation",
            )
            .into_iter()
            .find(|d| d.tactic == Tactic::Fear)
            .unwrap();

            assert_eq!(fear.keywords.len(), MAX_REPORTED_KEYWORDS);
            assert!(fear.confidence <= 1.0);
        }
    }

    mod tally {
        use super::*;

        #[test]
        fn counts_each_message_once_per_tactic() {
            let tally = tally_tactics([
                "Congratulations, you have won a prize",
                "Pay the fee now",
                "Hurry, urgent, last chance",
            ]);

            assert_eq!(tally[0].tactic, Tactic::Urgency);
            assert_eq!(tally[0].occurrences, 2);
            let reward = tally.iter().find(|t| t.tactic == Tactic::Reward).unwrap();
            assert_eq!(reward.occurrences, 1);
            assert_eq!(reward.description, Tactic::Reward.description());
        }

        #[test]
        fn no_messages_no_tally() {
            assert!(tally_tactics(Vec::<&str>::new()).is_empty());
        }
    }

    #[test]
    fn tactics_serialize_snake_case() {
        assert_eq!(serde_json::to_value(Tactic::SocialProof).unwrap(), "social_proof");
        assert_eq!(Tactic::TrustBuilding.to_string(), "trust_building");
    }
}
