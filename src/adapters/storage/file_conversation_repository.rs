//! File-based Conversation Repository Adapter
//!
//! Stores each conversation record as `<conversation_id>.yaml` under a base
//! directory, which keeps captured intelligence easy to inspect by hand.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::engagement::ConversationRecord;
use crate::domain::foundation::ConversationId;
use crate::ports::{ConversationRepository, RepositoryError};

/// YAML-file storage for conversation records
#[derive(Debug, Clone)]
pub struct FileConversationRepository {
    base_path: PathBuf,
}

impl FileConversationRepository {
    /// Create a new file repository rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let repository = FileConversationRepository::new("./data/conversations");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn record_path(&self, id: ConversationId) -> PathBuf {
        self.base_path.join(format!("{}.yaml", id))
    }

    async fn ensure_dir(&self) -> Result<(), RepositoryError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| RepositoryError::IoError(e.to_string()))
    }
}

#[async_trait]
impl ConversationRepository for FileConversationRepository {
    async fn save(&self, record: &ConversationRecord) -> Result<(), RepositoryError> {
        self.ensure_dir().await?;

        let yaml = serde_yaml::to_string(record)
            .map_err(|e| RepositoryError::SerializationFailed(e.to_string()))?;

        // write then rename so a crash never leaves a half-written record
        let final_path = self.record_path(record.id);
        let temp_path = final_path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml)
            .await
            .map_err(|e| RepositoryError::IoError(e.to_string()))?;
        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| RepositoryError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn load(&self, id: ConversationId) -> Result<ConversationRecord, RepositoryError> {
        let file_path = self.record_path(id);

        if !file_path.exists() {
            return Err(RepositoryError::NotFound(id));
        }

        let yaml = fs::read_to_string(&file_path)
            .await
            .map_err(|e| RepositoryError::IoError(e.to_string()))?;

        serde_yaml::from_str(&yaml)
            .map_err(|e| RepositoryError::DeserializationFailed(e.to_string()))
    }

    async fn exists(&self, id: ConversationId) -> Result<bool, RepositoryError> {
        Ok(self.record_path(id).exists())
    }

    async fn delete(&self, id: ConversationId) -> Result<(), RepositoryError> {
        let file_path = self.record_path(id);

        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| RepositoryError::IoError(e.to_string()))?;
        }

        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<ConversationId>, RepositoryError> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| RepositoryError::IoError(e.to_string()))?;

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RepositoryError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("yaml") {
                continue;
            }
            match path.file_stem().and_then(|stem| stem.to_str()).map(str::parse::<ConversationId>) {
                Some(Ok(id)) => ids.push(id),
                _ => tracing::warn!("Skipping unrecognised file in conversation store: {:?}", path),
            }
        }
        ids.sort();
        Ok(ids)
    }
}
