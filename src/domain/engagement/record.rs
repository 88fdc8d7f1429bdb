//! Durable shape of a conversation.
//!
//! This is the only format the engagement core persists. Entity sets are
//! re-normalized as they are read, and restoring a record checks turn
//! numbering and phase, so a hand-edited or truncated file cannot produce
//! a state that `add_turn` would never have built.

use serde::{Deserialize, Serialize};

use super::conversation::{summarize, ConversationState, DEFAULT_CONTEXT_WINDOW};
use super::persona::Persona;
use super::phase::{phase_for, EngagementPhase};
use super::scam_type::ScamType;
use super::turn::ConversationTurn;
use crate::domain::foundation::{ConversationId, RiskScore, Timestamp, ValidationError};
use crate::domain::intelligence::EntitySet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: ConversationId,
    pub scam_type: ScamType,
    pub persona: Persona,
    pub phase: EngagementPhase,
    pub turn_count: u32,
    pub risk_score: RiskScore,
    pub entities: EntitySet,
    pub turns: Vec<ConversationTurn>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&ConversationState> for ConversationRecord {
    fn from(state: &ConversationState) -> Self {
        Self {
            id: state.id,
            scam_type: state.scam_type,
            persona: state.persona,
            phase: state.phase,
            turn_count: state.turn_count,
            risk_score: state.risk_score,
            entities: state.entities.clone(),
            turns: state.turns.clone(),
            created_at: state.created_at,
            updated_at: state.updated_at,
        }
    }
}

impl TryFrom<ConversationRecord> for ConversationState {
    type Error = ValidationError;

    fn try_from(record: ConversationRecord) -> Result<Self, Self::Error> {
        if record.turns.len() != record.turn_count as usize {
            return Err(ValidationError::invalid_format(
                "turns",
                format!(
                    "turn_count is {} but {} turns are recorded",
                    record.turn_count,
                    record.turns.len()
                ),
            ));
        }
        for (index, turn) in record.turns.iter().enumerate() {
            let expected = index as u32 + 1;
            if turn.turn_number != expected {
                return Err(ValidationError::invalid_format(
                    "turns",
                    format!("expected turn {} but found turn {}", expected, turn.turn_number),
                ));
            }
        }
        if record.phase != phase_for(record.turn_count) {
            return Err(ValidationError::invalid_format(
                "phase",
                format!(
                    "{:?} does not match turn count {}",
                    record.phase, record.turn_count
                ),
            ));
        }

        let context_summary = summarize(&record.turns, DEFAULT_CONTEXT_WINDOW);
        Ok(ConversationState {
            id: record.id,
            scam_type: record.scam_type,
            persona: record.persona,
            phase: record.phase,
            turn_count: record.turn_count,
            turns: record.turns,
            entities: record.entities,
            risk_score: record.risk_score,
            context_summary,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
