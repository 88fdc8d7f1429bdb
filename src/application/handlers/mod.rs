//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod engagement;

pub use engagement::{
    recommended_actions, ConversationLocks, ConversationView, EngageCommand, EngageError,
    EngageHandler, EngageResult, GenerateReportHandler, GenerateReportQuery,
    GetConversationHandler, GetConversationQuery, IntelligenceReport, ListConversationsHandler,
    SharedStore,
};
