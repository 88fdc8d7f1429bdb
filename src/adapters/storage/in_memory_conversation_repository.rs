//! In-Memory Conversation Repository Adapter
//!
//! Keeps conversation records in memory. Useful for testing and for
//! running without a data directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::engagement::ConversationRecord;
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationRepository, RepositoryError};

/// In-memory storage for conversation records
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    records: Arc<RwLock<HashMap<ConversationId, ConversationRecord>>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored records (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Get the number of stored records
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn save(&self, record: &ConversationRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, id: ConversationId) -> Result<ConversationRecord, RepositoryError> {
        let records = self.records.read().await;
        records.get(&id).cloned().ok_or(RepositoryError::NotFound(id))
    }

    async fn exists(&self, id: ConversationId) -> Result<bool, RepositoryError> {
        Ok(self.records.read().await.contains_key(&id))
    }

    async fn delete(&self, id: ConversationId) -> Result<(), RepositoryError> {
        self.records.write().await.remove(&id);
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<ConversationId>, RepositoryError> {
        let mut ids: Vec<ConversationId> = self.records.read().await.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}
