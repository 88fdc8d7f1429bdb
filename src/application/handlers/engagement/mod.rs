//! Engagement handlers - the orchestrator and its read-side queries.

mod conversation_locks;
mod engage;
mod generate_report;
mod get_conversation;
mod list_conversations;

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::engagement::ConversationStore;

/// The store instance shared by every handler of one process.
pub type SharedStore = Arc<RwLock<ConversationStore>>;

pub use conversation_locks::{ConversationLease, ConversationLocks};
pub use engage::{EngageCommand, EngageError, EngageHandler, EngageResult};
pub use generate_report::{
    recommended_actions, GenerateReportHandler, GenerateReportQuery, IntelligenceReport,
};
pub use get_conversation::{ConversationView, GetConversationHandler, GetConversationQuery};
pub use list_conversations::ListConversationsHandler;
