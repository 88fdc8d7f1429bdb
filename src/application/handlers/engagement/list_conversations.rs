//! ListConversationsHandler - every live conversation, oldest first.

use super::SharedStore;
use crate::domain::engagement::ConversationSummary;

pub struct ListConversationsHandler {
    store: SharedStore,
}

impl ListConversationsHandler {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Vec<ConversationSummary> {
        self.store.read().await.list()
    }
}
