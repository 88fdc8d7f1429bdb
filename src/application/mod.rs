//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (engage) mutate the shared store; query handlers
//! (report, show, list) only read it.

pub mod handlers;
mod service;

pub use handlers::{
    ConversationLocks, ConversationView, EngageCommand, EngageError, EngageHandler, EngageResult,
    GenerateReportHandler, GenerateReportQuery, GetConversationHandler, GetConversationQuery,
    IntelligenceReport, ListConversationsHandler, SharedStore,
};
pub use service::{HoneypotService, Request};
