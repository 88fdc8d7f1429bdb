//! Model-backed persona replies, degrading to scripted lines.

use async_trait::async_trait;
use std::sync::Arc;

use super::scripted_reply_generator::ScriptedReplyGenerator;
use crate::domain::foundation::Outcome;
use crate::ports::{
    AIError, ChatModel, ChatRequest, GeneratedReply, MessageRole, ReplyGenerator, ReplyRequest,
};

/// Reply generator backed by a chat model.
pub struct LlmReplyGenerator<M: ?Sized + ChatModel> {
    model: Arc<M>,
    fallback: ScriptedReplyGenerator,
}

impl<M: ?Sized + ChatModel> LlmReplyGenerator<M> {
    pub fn new(model: Arc<M>) -> Self {
        Self {
            model,
            fallback: ScriptedReplyGenerator::new(),
        }
    }

    fn system_prompt(request: &ReplyRequest) -> String {
        format!(
            "You are playing the role of {}: {} You are chatting with someone running a {} scam. \
             Stay in character, keep replies under 40 words, never reveal you are an AI and never \
             share real personal or financial details. Current goal: {}",
            request.persona.label(),
            request.persona.sketch(),
            request.scam_type.label().to_lowercase(),
            request.phase.directive()
        )
    }

    fn user_prompt(request: &ReplyRequest) -> String {
        if request.context_summary.is_empty() {
            format!("Their message (turn {}): {}", request.turn_number, request.scammer_message)
        } else {
            format!(
                "Recent conversation:\n{}\n\nTheir new message (turn {}): {}",
                request.context_summary, request.turn_number, request.scammer_message
            )
        }
    }

    async fn ask_model(&self, request: &ReplyRequest) -> Result<GeneratedReply, AIError> {
        let chat = ChatRequest::new()
            .with_system_prompt(Self::system_prompt(request))
            .with_message(MessageRole::User, Self::user_prompt(request))
            .with_temperature(0.8)
            .with_max_tokens(150);

        let response = self.model.complete(chat).await?;
        let text = response.content.trim();
        if text.is_empty() {
            return Err(AIError::parse("Model returned an empty reply"));
        }
        Ok(GeneratedReply::new(
            text,
            format!(
                "{} reply from {} during {}",
                request.persona.as_str(),
                response.model,
                request.phase.label().to_lowercase()
            ),
        ))
    }
}

#[async_trait]
impl<M: ?Sized + ChatModel> ReplyGenerator for LlmReplyGenerator<M> {
    async fn generate(&self, request: &ReplyRequest) -> Outcome<GeneratedReply> {
        match self.ask_model(request).await {
            Ok(reply) => Outcome::ok(reply),
            Err(err) => {
                tracing::warn!(
                    model = self.model.model_name(),
                    "Reply generator degraded to scripted lines: {}",
                    err
                );
                Outcome::degraded(self.fallback.reply_for(request), err.to_string())
            }
        }
    }
}
