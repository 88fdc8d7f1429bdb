//! AI Adapters - scam classification and persona replies.
//!
//! Rule-based adapters work offline and double as fallbacks. Model-backed
//! adapters use any `ChatModel` and report `Outcome::Degraded` whenever
//! they had to fall back.

mod llm_reply_generator;
mod llm_scam_classifier;
mod mock_chat_model;
mod openai_chat_model;
mod rule_based_classifier;
mod scripted_reply_generator;

pub use llm_reply_generator::LlmReplyGenerator;
pub use llm_scam_classifier::LlmScamClassifier;
pub use mock_chat_model::MockChatModel;
pub use openai_chat_model::{OpenAIChatModel, OpenAIConfig};
pub use rule_based_classifier::RuleBasedClassifier;
pub use scripted_reply_generator::ScriptedReplyGenerator;
