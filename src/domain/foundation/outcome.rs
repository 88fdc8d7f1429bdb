//! Result type for collaborators that degrade instead of failing.
//!
//! External classifiers and reply generators always hand back a usable
//! value. When their preferred backend is unavailable they fall back to a
//! rule-based value and say so through [`Outcome::Degraded`]; the caller
//! decides whether to log, surface or ignore the reason.

use serde::{Deserialize, Serialize};

/// A value produced either by the preferred path or by a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// Produced by the preferred backend.
    Ok { value: T },
    /// Produced by a fallback after the preferred backend failed.
    Degraded { value: T, reason: String },
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Outcome::Ok { value }
    }

    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Outcome::Degraded {
            value,
            reason: reason.into(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    /// Returns the degradation reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Ok { .. } => None,
            Outcome::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Ok { value } | Outcome::Degraded { value, .. } => value,
        }
    }

    /// Consumes the outcome, returning the value regardless of provenance.
    pub fn into_value(self) -> T {
        match self {
            Outcome::Ok { value } | Outcome::Degraded { value, .. } => value,
        }
    }

    /// Splits into the value and the optional degradation reason.
    pub fn into_parts(self) -> (T, Option<String>) {
        match self {
            Outcome::Ok { value } => (value, None),
            Outcome::Degraded { value, reason } => (value, Some(reason)),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Ok { value } => Outcome::Ok { value: f(value) },
            Outcome::Degraded { value, reason } => Outcome::Degraded {
                value: f(value),
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_has_no_reason() {
        let outcome = Outcome::ok(3);
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.reason(), None);
        assert_eq!(outcome.into_value(), 3);
    }

    #[test]
    fn degraded_keeps_value_and_reason() {
        let outcome = Outcome::degraded("fallback", "timeout after 30s");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.value(), &"fallback");
        assert_eq!(
            outcome.into_parts(),
            ("fallback", Some("timeout after 30s".to_string()))
        );
    }

    #[test]
    fn map_preserves_provenance() {
        let mapped = Outcome::degraded(2, "offline").map(|v| v * 10);
        assert_eq!(mapped, Outcome::degraded(20, "offline"));
    }
}
