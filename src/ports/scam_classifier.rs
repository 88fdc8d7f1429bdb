//! Scam Classifier Port - first-contact verdict on an inbound message.

use async_trait::async_trait;

use crate::domain::engagement::Classification;
use crate::domain::foundation::Outcome;

/// Classifies an opening scam message.
///
/// Implementations never fail: when their preferred backend is down they
/// return a rule-based or default verdict wrapped in `Outcome::Degraded`.
#[async_trait]
pub trait ScamClassifier: Send + Sync {
    async fn classify(&self, message: &str) -> Outcome<Classification>;
}
