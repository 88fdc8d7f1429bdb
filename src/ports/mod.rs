//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ScamClassifier` - first-contact classification
//! - `ReplyGenerator` - persona replies
//! - `ChatModel` - hosted LLM used by the model-backed adapters
//! - `ConversationRepository` - durable conversation records

mod chat_model;
mod conversation_repository;
mod reply_generator;
mod scam_classifier;

pub use chat_model::{AIError, ChatModel, ChatRequest, ChatResponse, Message, MessageRole};
pub use conversation_repository::{ConversationRepository, RepositoryError};
pub use reply_generator::{GeneratedReply, ReplyGenerator, ReplyRequest};
pub use scam_classifier::ScamClassifier;
