//! Storage Adapters
//!
//! Implementations of the ConversationRepository port.
//!
//! ## Available Adapters
//!
//! - **FileConversationRepository** - One YAML file per conversation
//! - **InMemoryConversationRepository** - In-process map (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileConversationRepository, InMemoryConversationRepository};
//!
//! // Production: file-based storage
//! let repository = FileConversationRepository::new("./data/conversations");
//!
//! // Testing: in-memory storage
//! let repository = InMemoryConversationRepository::new();
//! ```

mod file_conversation_repository;
mod in_memory_conversation_repository;

pub use file_conversation_repository::FileConversationRepository;
pub use in_memory_conversation_repository::InMemoryConversationRepository;
