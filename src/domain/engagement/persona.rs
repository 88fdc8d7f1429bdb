//! Closed set of synthetic victim personas.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A believable victim archetype the honeypot plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    CautiousMiddleAged,
    EagerYoungAdult,
    BusyProfessional,
    SeniorCitizen,
    TechSavvyStudent,
}

impl Persona {
    pub const ALL: [Persona; 5] = [
        Persona::CautiousMiddleAged,
        Persona::EagerYoungAdult,
        Persona::BusyProfessional,
        Persona::SeniorCitizen,
        Persona::TechSavvyStudent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::CautiousMiddleAged => "cautious_middle_aged",
            Persona::EagerYoungAdult => "eager_young_adult",
            Persona::BusyProfessional => "busy_professional",
            Persona::SeniorCitizen => "senior_citizen",
            Persona::TechSavvyStudent => "tech_savvy_student",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Persona::CautiousMiddleAged => "Cautious middle-aged",
            Persona::EagerYoungAdult => "Eager young adult",
            Persona::BusyProfessional => "Busy professional",
            Persona::SeniorCitizen => "Senior citizen",
            Persona::TechSavvyStudent => "Tech-savvy student",
        }
    }

    /// Character sketch handed to the reply generator.
    pub fn sketch(&self) -> &'static str {
        match self {
            Persona::CautiousMiddleAged => {
                "A careful 45-year-old parent who asks clarifying questions and mentions family."
            }
            Persona::EagerYoungAdult => {
                "An excitable 22-year-old who types casually and is keen on quick money."
            }
            Persona::BusyProfessional => {
                "A terse office worker who wants the details fast and has meetings to get to."
            }
            Persona::SeniorCitizen => {
                "A polite retiree who is confused by apps and relies on grandchildren for help."
            }
            Persona::TechSavvyStudent => {
                "A sceptical engineering student who asks for links and official proof."
            }
        }
    }

    /// Parses a wire name leniently, falling back to `CautiousMiddleAged`.
    pub fn from_name(name: &str) -> Persona {
        let normalized = name.trim().to_ascii_lowercase();
        Persona::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .unwrap_or_default()
    }
}

impl Default for Persona {
    fn default() -> Self {
        Persona::CautiousMiddleAged
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
