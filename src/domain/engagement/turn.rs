//! One exchange between the scammer and the persona.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::intelligence::EntitySet;

/// A recorded scammer message and the persona's reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// 1-based, contiguous within a conversation.
    pub turn_number: u32,
    pub scammer_message: String,
    pub reply_message: String,
    pub timestamp: Timestamp,
    /// Entities extracted from this turn alone.
    pub entities: EntitySet,
    /// Diagnostic note from the reply generator.
    #[serde(default)]
    pub reasoning: String,
}
