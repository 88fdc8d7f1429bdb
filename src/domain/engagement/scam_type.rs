//! Closed set of scam classifications.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::persona::Persona;

/// The kind of fraud a conversation was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScamType {
    #[serde(rename = "loan_approval")]
    Loan,
    #[serde(rename = "prize_lottery")]
    PrizeLottery,
    #[serde(rename = "investment_opportunity")]
    InvestmentFraud,
    #[serde(rename = "fake_job_offer")]
    JobOffer,
    #[serde(rename = "technical_support")]
    TechSupport,
    #[serde(rename = "cryptocurrency_fraud")]
    Cryptocurrency,
    #[serde(rename = "other")]
    Other,
}

impl ScamType {
    pub const ALL: [ScamType; 7] = [
        ScamType::Loan,
        ScamType::PrizeLottery,
        ScamType::InvestmentFraud,
        ScamType::JobOffer,
        ScamType::TechSupport,
        ScamType::Cryptocurrency,
        ScamType::Other,
    ];

    /// Stable wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScamType::Loan => "loan_approval",
            ScamType::PrizeLottery => "prize_lottery",
            ScamType::InvestmentFraud => "investment_opportunity",
            ScamType::JobOffer => "fake_job_offer",
            ScamType::TechSupport => "technical_support",
            ScamType::Cryptocurrency => "cryptocurrency_fraud",
            ScamType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScamType::Loan => "Loan approval",
            ScamType::PrizeLottery => "Prize / lottery",
            ScamType::InvestmentFraud => "Investment fraud",
            ScamType::JobOffer => "Fake job offer",
            ScamType::TechSupport => "Tech support",
            ScamType::Cryptocurrency => "Cryptocurrency fraud",
            ScamType::Other => "Other",
        }
    }

    /// Persona most likely to keep this kind of scammer talking.
    pub fn recommended_persona(&self) -> Persona {
        match self {
            ScamType::Loan | ScamType::Other => Persona::CautiousMiddleAged,
            ScamType::PrizeLottery | ScamType::JobOffer => Persona::EagerYoungAdult,
            ScamType::InvestmentFraud => Persona::BusyProfessional,
            ScamType::TechSupport => Persona::SeniorCitizen,
            ScamType::Cryptocurrency => Persona::TechSavvyStudent,
        }
    }

    /// Parses a wire name leniently, falling back to `Other`.
    pub fn from_name(name: &str) -> ScamType {
        let normalized = name.trim().to_ascii_lowercase();
        ScamType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .unwrap_or(ScamType::Other)
    }
}

impl Default for ScamType {
    fn default() -> Self {
        ScamType::Other
    }
}

impl fmt::Display for ScamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
