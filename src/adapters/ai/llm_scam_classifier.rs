//! Model-backed scam classifier.
//!
//! Asks a chat model for a JSON verdict. Any transport error or malformed
//! answer degrades to the keyword classifier instead of failing.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use super::rule_based_classifier::RuleBasedClassifier;
use crate::domain::engagement::{Classification, Persona, ScamType};
use crate::domain::foundation::{Outcome, RiskScore};
use crate::ports::{AIError, ChatModel, ChatRequest, MessageRole, ScamClassifier};

const SYSTEM_PROMPT: &str = "You are a fraud analyst. Classify the message as one of: \
loan_approval, prize_lottery, investment_opportunity, fake_job_offer, technical_support, \
cryptocurrency_fraud, other. Recommend the victim persona most likely to keep the sender \
talking: cautious_middle_aged, eager_young_adult, busy_professional, senior_citizen, \
tech_savvy_student. Answer with a JSON object with keys scam_type, recommended_persona, \
risk_score (0 to 1), red_flags (list of strings) and reasoning.";

#[derive(Debug, Deserialize)]
struct Verdict {
    scam_type: String,
    #[serde(default)]
    recommended_persona: Option<String>,
    risk_score: f64,
    #[serde(default)]
    red_flags: Vec<String>,
    #[serde(default)]
    reasoning: String,
}

impl From<Verdict> for Classification {
    fn from(verdict: Verdict) -> Self {
        let scam_type = ScamType::from_name(&verdict.scam_type);
        let persona = verdict
            .recommended_persona
            .as_deref()
            .map(Persona::from_name)
            .unwrap_or_else(|| scam_type.recommended_persona());
        Classification {
            scam_type,
            persona,
            risk_score: RiskScore::new(verdict.risk_score),
            red_flags: verdict.red_flags,
            reasoning: verdict.reasoning,
        }
    }
}

/// Scam classifier backed by a chat model, with a keyword fallback.
pub struct LlmScamClassifier<M: ?Sized + ChatModel> {
    model: Arc<M>,
    fallback: RuleBasedClassifier,
}

impl<M: ?Sized + ChatModel> LlmScamClassifier<M> {
    pub fn new(model: Arc<M>) -> Self {
        Self {
            model,
            fallback: RuleBasedClassifier::new(),
        }
    }

    async fn ask_model(&self, message: &str) -> Result<Classification, AIError> {
        let request = ChatRequest::new()
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, message)
            .with_temperature(0.0)
            .with_max_tokens(300)
            .expecting_json();

        let response = self.model.complete(request).await?;
        let verdict: Verdict = serde_json::from_str(strip_code_fence(&response.content))
            .map_err(|e| AIError::parse(format!("Unusable classification: {}", e)))?;
        Ok(verdict.into())
    }
}

#[async_trait]
impl<M: ?Sized + ChatModel> ScamClassifier for LlmScamClassifier<M> {
    async fn classify(&self, message: &str) -> Outcome<Classification> {
        match self.ask_model(message).await {
            Ok(classification) => Outcome::ok(classification),
            Err(err) => {
                tracing::warn!(
                    model = self.model.model_name(),
                    "Classifier degraded to keyword rules: {}",
                    err
                );
                Outcome::degraded(self.fallback.classify_message(message), err.to_string())
            }
        }
    }
}

/// Models sometimes wrap JSON in a markdown code fence.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
