//! Mock Chat Model for testing.
//!
//! Returns pre-configured completions or errors in order and records every
//! request, so model-backed adapters can be tested without network access.
//!
//! # Example
//!
//! ```ignore
//! let model = MockChatModel::new()
//!     .with_response(r#"{"scam_type": "prize_lottery"}"#)
//!     .with_error(AIError::unavailable("down"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AIError, ChatModel, ChatRequest, ChatResponse};

/// Scripted chat model. Once the script runs out every call fails with
/// `AIError::Unavailable`.
#[derive(Debug, Clone, Default)]
pub struct MockChatModel {
    script: Arc<Mutex<VecDeque<Result<String, AIError>>>>,
    calls: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful completion.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(Ok(content.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: AIError) -> Self {
        self.push(Err(error));
        self
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Requests received so far, oldest first.
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn push(&self, entry: Result<String, AIError>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(entry);
        }
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, AIError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request);
        }
        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());

        match next {
            Some(Ok(content)) => Ok(ChatResponse {
                content,
                model: "mock".to_string(),
            }),
            Some(Err(err)) => Err(err),
            None => Err(AIError::unavailable("mock script exhausted")),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
