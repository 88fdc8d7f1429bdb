//! Risk score value object (0.0-1.0 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Likelihood that a conversation is fraudulent, in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiskScore(f64);

impl RiskScore {
    /// No risk observed.
    pub const ZERO: Self = Self(0.0);

    /// Certain fraud.
    pub const MAX: Self = Self(1.0);

    /// Creates a new RiskScore, clamping to the valid range.
    ///
    /// NaN maps to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a RiskScore, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("risk_score", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns a new score raised by `delta`, saturating at 1.0.
    pub fn raised_by(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }

    /// Returns true if the score is at least `threshold`.
    pub fn is_at_least(&self, threshold: f64) -> bool {
        self.0 >= threshold
    }
}

impl Default for RiskScore {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f64> for RiskScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<RiskScore> for f64 {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
