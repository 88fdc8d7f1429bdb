//! Conversation Repository Port - durable copy of conversation records.
//!
//! The engagement store keeps live state in memory; a repository lets it
//! survive restarts. Any engine that can round-trip a `ConversationRecord`
//! is acceptable.

use async_trait::async_trait;

use crate::domain::engagement::ConversationRecord;
use crate::domain::foundation::ConversationId;

/// Errors that can occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Conversation not found: {0}")]
    NotFound(ConversationId),

    #[error("Failed to serialize conversation: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize conversation: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting and loading conversation records.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Saves a record, replacing any previous copy with the same id.
    async fn save(&self, record: &ConversationRecord) -> Result<(), RepositoryError>;

    /// Loads a record.
    ///
    /// # Errors
    /// Returns `RepositoryError::NotFound` if no record exists.
    async fn load(&self, id: ConversationId) -> Result<ConversationRecord, RepositoryError>;

    /// Checks whether a record exists.
    async fn exists(&self, id: ConversationId) -> Result<bool, RepositoryError>;

    /// Deletes a record. Deleting a missing record is not an error.
    async fn delete(&self, id: ConversationId) -> Result<(), RepositoryError>;

    /// Lists the ids of every stored record.
    async fn list_ids(&self) -> Result<Vec<ConversationId>, RepositoryError>;
}
