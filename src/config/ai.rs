//! Language model configuration
//!
//! Without an API key the honeypot runs entirely on the rule-based
//! classifier and scripted replies.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{
    LlmReplyGenerator, LlmScamClassifier, OpenAIChatModel, OpenAIConfig, RuleBasedClassifier,
    ScriptedReplyGenerator,
};
use crate::ports::{AIError, ReplyGenerator, ScamClassifier};

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI-compatible API key
    pub api_key: Option<Secret<String>>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

const MAX_RETRIES: u32 = 10;

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retries > MAX_RETRIES {
            return Err(ValidationError::InvalidMaxRetries);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if production && self.has_api_key() && !self.base_url.starts_with("https://") {
            return Err(ValidationError::BaseUrlMustBeHttps);
        }
        Ok(())
    }

    /// Model-backed collaborators when a key is configured, rule-based ones
    /// otherwise.
    pub fn build_collaborators(
        &self,
    ) -> Result<(Arc<dyn ScamClassifier>, Arc<dyn ReplyGenerator>), AIError> {
        let Some(api_key) = self.api_key.as_ref().filter(|_| self.has_api_key()) else {
            tracing::info!("No AI API key configured, using rule-based collaborators");
            let classifier: Arc<dyn ScamClassifier> = Arc::new(RuleBasedClassifier::new());
            let generator: Arc<dyn ReplyGenerator> = Arc::new(ScriptedReplyGenerator::new());
            return Ok((classifier, generator));
        };

        let model = Arc::new(OpenAIChatModel::new(
            OpenAIConfig::new(api_key.expose_secret().clone())
                .with_model(&self.model)
                .with_base_url(&self.base_url)
                .with_timeout(self.timeout())
                .with_max_retries(self.max_retries),
        )?);
        tracing::info!(model = %self.model, "Using model-backed collaborators");
        let classifier: Arc<dyn ScamClassifier> = Arc::new(LlmScamClassifier::new(Arc::clone(&model)));
        let generator: Arc<dyn ReplyGenerator> = Arc::new(LlmReplyGenerator::new(model));
        Ok((classifier, generator))
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    2
}
