//! ConversationState - the record of one honeypot engagement.

use serde::Serialize;

use super::persona::Persona;
use super::phase::{phase_for, EngagementPhase};
use super::scam_type::ScamType;
use super::turn::ConversationTurn;
use crate::domain::foundation::{ConversationId, RiskScore, StateMachine, Timestamp};
use crate::domain::intelligence::{merge, EntitySet};

/// Number of trailing turns folded into the context summary by default.
pub const DEFAULT_CONTEXT_WINDOW: usize = 3;

/// Identity, classification, turn history and accumulated intelligence
/// for one scammer.
///
/// Fields are read-only outside the engagement module. The turn history,
/// cumulative entities, phase and counter change only through
/// `ConversationStore::add_turn`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationState {
    pub(super) id: ConversationId,
    pub(super) scam_type: ScamType,
    pub(super) persona: Persona,
    pub(super) phase: EngagementPhase,
    pub(super) turn_count: u32,
    pub(super) turns: Vec<ConversationTurn>,
    pub(super) entities: EntitySet,
    pub(super) risk_score: RiskScore,
    pub(super) context_summary: String,
    pub(super) created_at: Timestamp,
    pub(super) updated_at: Timestamp,
}

impl ConversationState {
    pub(super) fn new(scam_type: ScamType, persona: Persona) -> Self {
        let now = Timestamp::now();
        Self {
            id: ConversationId::new(),
            scam_type,
            persona,
            phase: EngagementPhase::TrustBuilding,
            turn_count: 0,
            turns: Vec::new(),
            entities: EntitySet::new(),
            risk_score: RiskScore::ZERO,
            context_summary: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn scam_type(&self) -> ScamType {
        self.scam_type
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn phase(&self) -> EngagementPhase {
        self.phase
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn last_turn(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Union of every turn's entities, in chronological merge order.
    pub fn entities(&self) -> &EntitySet {
        &self.entities
    }

    pub fn risk_score(&self) -> RiskScore {
        self.risk_score
    }

    /// Rolling summary of the most recent turns. Derived, not authoritative.
    pub fn context_summary(&self) -> &str {
        &self.context_summary
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Appends a turn and recomputes everything derived from history.
    pub(super) fn apply_turn(
        &mut self,
        scammer_message: String,
        reply_message: String,
        turn_entities: EntitySet,
        reasoning: String,
        context_window: usize,
    ) {
        let now = Timestamp::now();
        self.turn_count += 1;
        self.entities = merge(&self.entities, &turn_entities);
        self.turns.push(ConversationTurn {
            turn_number: self.turn_count,
            scammer_message,
            reply_message,
            timestamp: now,
            entities: turn_entities,
            reasoning,
        });
        let phase = phase_for(self.turn_count);
        debug_assert!(
            self.phase.can_transition_to(&phase),
            "phase regressed from {:?} to {:?}",
            self.phase,
            phase
        );
        self.phase = phase;
        self.context_summary = summarize(&self.turns, context_window);
        self.updated_at = now;
    }

    pub(super) fn set_risk_score(&mut self, score: RiskScore) {
        self.risk_score = score;
        self.updated_at = Timestamp::now();
    }
}

/// Renders the last `window` turns, oldest first.
pub(super) fn summarize(turns: &[ConversationTurn], window: usize) -> String {
    let start = turns.len().saturating_sub(window);
    turns[start..]
        .iter()
        .map(|t| format!("Scammer: {}\nAgent: {}", t.scammer_message, t.reply_message))
        .collect::<Vec<_>>()
        .join("\n")
}
