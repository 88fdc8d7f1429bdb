//! GetConversationHandler - read-only view of one conversation.

use serde::Serialize;

use super::SharedStore;
use crate::domain::engagement::{
    ContinuationDecision, ConversationStats, ConversationState, StoreError,
};
use crate::domain::foundation::ConversationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetConversationQuery {
    pub conversation_id: ConversationId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationView {
    pub stats: ConversationStats,
    pub transcript: String,
    pub decision: ContinuationDecision,
    #[serde(skip)]
    pub state: ConversationState,
}

pub struct GetConversationHandler {
    store: SharedStore,
}

impl GetConversationHandler {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetConversationQuery) -> Result<ConversationView, StoreError> {
        let id = query.conversation_id;
        let store = self.store.read().await;
        let not_found = || StoreError::NotFound(id);

        Ok(ConversationView {
            stats: store.stats(id).ok_or_else(not_found)?,
            transcript: store.transcript(id).ok_or_else(not_found)?,
            decision: store.continuation(id).ok_or_else(not_found)?,
            state: store.get(id).cloned().ok_or_else(not_found)?,
        })
    }
}
