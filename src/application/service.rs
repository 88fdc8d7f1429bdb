//! HoneypotService - wires the store, collaborators and repository together
//! and answers JSON-line requests.
//!
//! One service instance owns the process's `ConversationStore`. It is built
//! at start-up, rehydrated from the repository, shared by every request and
//! dropped at shutdown.

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::handlers::{
    ConversationLocks, EngageCommand, EngageHandler, GenerateReportHandler, GenerateReportQuery,
    GetConversationHandler, GetConversationQuery, ListConversationsHandler, SharedStore,
};
use crate::adapters::ai::{RuleBasedClassifier, ScriptedReplyGenerator};
use crate::config::{AppConfig, ConfigError};
use crate::domain::engagement::{ConversationState, ConversationStore};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};
use crate::ports::{ConversationRepository, ReplyGenerator, ScamClassifier};

/// One line of input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Request {
    Report {
        report: ConversationId,
    },
    Show {
        conversation: ConversationId,
    },
    List {
        list: bool,
    },
    Engage {
        message: String,
        #[serde(default)]
        conversation_id: Option<ConversationId>,
    },
}

pub struct HoneypotService {
    store: SharedStore,
    repository: Arc<dyn ConversationRepository>,
    engage: EngageHandler,
    report: GenerateReportHandler,
    show: GetConversationHandler,
    list: ListConversationsHandler,
}

impl HoneypotService {
    pub fn new(
        store: ConversationStore,
        classifier: Arc<dyn ScamClassifier>,
        generator: Arc<dyn ReplyGenerator>,
        repository: Arc<dyn ConversationRepository>,
    ) -> Self {
        let store: SharedStore = Arc::new(RwLock::new(store));
        Self {
            engage: EngageHandler::new(
                Arc::clone(&store),
                Arc::new(ConversationLocks::new()),
                Arc::clone(&classifier),
                generator,
                Arc::clone(&repository),
            ),
            report: GenerateReportHandler::new(Arc::clone(&store), classifier),
            show: GetConversationHandler::new(Arc::clone(&store)),
            list: ListConversationsHandler::new(Arc::clone(&store)),
            store,
            repository,
        }
    }

    /// Builds every collaborator the configuration asks for.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (classifier, generator) = match config.ai.build_collaborators() {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!("AI client unavailable, falling back to rules: {}", e);
                let classifier: Arc<dyn ScamClassifier> = Arc::new(RuleBasedClassifier::new());
                let generator: Arc<dyn ReplyGenerator> = Arc::new(ScriptedReplyGenerator::new());
                (classifier, generator)
            }
        };
        Ok(Self::new(
            config.engagement.build_store(),
            classifier,
            generator,
            config.storage.build_repository(),
        ))
    }

    pub fn store(&self) -> SharedStore {
        Arc::clone(&self.store)
    }

    /// Loads every stored record into the live store. Records that fail to
    /// load or violate history invariants are skipped with a warning.
    pub async fn restore(&self) -> Result<usize, DomainError> {
        let ids = self.repository.list_ids().await.map_err(|e| {
            DomainError::new(ErrorCode::StorageError, format!("Failed to list conversations: {}", e))
        })?;

        let mut restored = 0;
        for id in ids {
            let record = match self.repository.load(id).await {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(conversation_id = %id, "Skipping unreadable record: {}", err);
                    continue;
                }
            };
            match ConversationState::try_from(record) {
                Ok(state) => {
                    self.store.write().await.restore(state);
                    restored += 1;
                }
                Err(err) => {
                    tracing::warn!(conversation_id = %id, "Skipping inconsistent record: {}", err);
                }
            }
        }
        tracing::info!(restored, "Conversations restored from storage");
        Ok(restored)
    }

    /// Answers one request with a JSON document. Failures become
    /// `{"error": {"code": .., "message": ..}}`.
    pub async fn respond(&self, line: &str) -> Value {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                return error_json(&DomainError::new(
                    ErrorCode::InvalidFormat,
                    format!("Unrecognized request: {}", e),
                ))
            }
        };

        let result = match request {
            Request::Engage {
                message,
                conversation_id,
            } => {
                let cmd = EngageCommand {
                    message,
                    conversation_id,
                };
                self.engage
                    .handle(cmd)
                    .await
                    .map_err(DomainError::from)
                    .and_then(to_json)
            }
            Request::Report { report } => self
                .report
                .handle(GenerateReportQuery {
                    conversation_id: report,
                })
                .await
                .map_err(DomainError::from)
                .and_then(to_json),
            Request::Show { conversation } => self
                .show
                .handle(GetConversationQuery {
                    conversation_id: conversation,
                })
                .await
                .map_err(DomainError::from)
                .and_then(to_json),
            Request::List { .. } => to_json(self.list.handle().await),
        };

        result.unwrap_or_else(|err| error_json(&err))
    }
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Serialization failed: {}", e)))
}

fn error_json(err: &DomainError) -> Value {
    json!({
        "error": {
            "code": err.code.to_string(),
            "message": err.message,
            "details": err.details,
        }
    })
}
