//! EngageHandler - one inbound scammer message in, one persona reply out.
//!
//! Flow per request:
//! 1. Classify (first contact only) and open a conversation
//! 2. Ask the reply generator for the next line
//! 3. Extract entities from both texts, note the scammer's tactics and
//!    record the turn
//! 4. Persist the record and decide whether to keep engaging

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use super::{ConversationLocks, SharedStore};
use crate::domain::engagement::{
    phase_for, ConfidenceLevel, ContinuationDecision, ConversationRecord, EngagementPhase,
    Persona, ScamType, StoreError,
};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, RiskScore};
use crate::domain::intelligence::{detect_tactics, extract, EntitySet, TacticDetection};
use crate::ports::{ConversationRepository, ReplyGenerator, ReplyRequest, ScamClassifier};

/// Command to answer one scammer message.
#[derive(Debug, Clone, PartialEq)]
pub struct EngageCommand {
    pub message: String,
    /// Continue an existing conversation; `None` opens a new one.
    pub conversation_id: Option<ConversationId>,
}

impl EngageCommand {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            conversation_id: None,
        }
    }

    pub fn in_conversation(mut self, id: ConversationId) -> Self {
        self.conversation_id = Some(id);
        self
    }
}

/// Public state after the turn was recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngageResult {
    pub conversation_id: ConversationId,
    pub reply: String,
    pub scam_type: ScamType,
    pub persona: Persona,
    pub phase: EngagementPhase,
    pub turn_number: u32,
    /// Entities found in this turn only.
    pub turn_entities: EntitySet,
    /// Cumulative entities for the whole conversation.
    pub entities: EntitySet,
    pub risk_score: RiskScore,
    pub confidence: ConfidenceLevel,
    /// Pressure tactics in the scammer's message, strongest first.
    pub tactics: Vec<TacticDetection>,
    pub reasoning: String,
    pub decision: ContinuationDecision,
    pub should_continue: bool,
    /// Why collaborators fell back, if they did.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngageError {
    #[error("Validation error: message cannot be empty")]
    EmptyMessage,

    #[error("Conversation not found: {0}")]
    UnknownConversation(ConversationId),
}

impl From<StoreError> for EngageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => EngageError::UnknownConversation(id),
        }
    }
}

impl From<EngageError> for DomainError {
    fn from(err: EngageError) -> Self {
        match err {
            EngageError::EmptyMessage => {
                DomainError::new(ErrorCode::EmptyField, err.to_string()).with_detail("field", "message")
            }
            EngageError::UnknownConversation(id) => StoreError::NotFound(id).into(),
        }
    }
}

/// Orchestrates classifier, reply generator, extraction and the store.
pub struct EngageHandler {
    store: SharedStore,
    locks: Arc<ConversationLocks>,
    classifier: Arc<dyn ScamClassifier>,
    generator: Arc<dyn ReplyGenerator>,
    repository: Arc<dyn ConversationRepository>,
}

impl EngageHandler {
    pub fn new(
        store: SharedStore,
        locks: Arc<ConversationLocks>,
        classifier: Arc<dyn ScamClassifier>,
        generator: Arc<dyn ReplyGenerator>,
        repository: Arc<dyn ConversationRepository>,
    ) -> Self {
        Self {
            store,
            locks,
            classifier,
            generator,
            repository,
        }
    }

    pub async fn handle(&self, cmd: EngageCommand) -> Result<EngageResult, EngageError> {
        if cmd.message.trim().is_empty() {
            return Err(EngageError::EmptyMessage);
        }
        let mut degraded = Vec::new();

        // 1. Resolve the conversation and hold its lock until we are done
        let (id, _guard) = match cmd.conversation_id {
            Some(id) => {
                let guard = self.locks.acquire(id).await;
                if !self.store.read().await.contains(id) {
                    return Err(EngageError::UnknownConversation(id));
                }
                (id, guard)
            }
            None => {
                let (classification, reason) =
                    self.classifier.classify(&cmd.message).await.into_parts();
                if let Some(reason) = reason {
                    degraded.push(format!("classifier: {}", reason));
                }

                let mut store = self.store.write().await;
                let id = store.create(classification.scam_type, classification.persona).id();
                store.update_risk_score(id, classification.risk_score);
                drop(store);

                (id, self.locks.acquire(id).await)
            }
        };

        // 2. Reply for the turn about to be recorded
        let request = {
            let store = self.store.read().await;
            let state = store.get(id).ok_or(EngageError::UnknownConversation(id))?;
            let turn_number = state.turn_count() + 1;
            ReplyRequest {
                phase: phase_for(turn_number),
                persona: state.persona(),
                scam_type: state.scam_type(),
                turn_number,
                scammer_message: cmd.message.clone(),
                context_summary: state.context_summary().to_string(),
            }
        };
        let (reply, reason) = self.generator.generate(&request).await.into_parts();
        if let Some(reason) = reason {
            degraded.push(format!("reply generator: {}", reason));
        }

        // 3. Both sides of the exchange can leak intelligence
        let turn_entities = extract(&cmd.message).merge(&extract(&reply.text));
        let tactics = detect_tactics(&cmd.message);
        let reasoning = with_tactics(&reply.reasoning, &tactics);

        let (record, decision) = {
            let mut store = self.store.write().await;
            let policy = store.policy();
            let state = store.add_turn(
                id,
                cmd.message,
                reply.text.clone(),
                turn_entities.clone(),
                reasoning.clone(),
            )?;
            (ConversationRecord::from(state), policy.decide(state))
        };

        // 4. A failed save loses durability, not the reply
        if let Err(err) = self.repository.save(&record).await {
            tracing::warn!(conversation_id = %id, "Failed to persist conversation: {}", err);
        }

        if !decision.should_continue() {
            tracing::info!(
                conversation_id = %id,
                turns = record.turn_count,
                decision = ?decision,
                entities = record.entities.total(),
                "Engagement finished"
            );
        }

        Ok(EngageResult {
            conversation_id: id,
            reply: reply.text,
            scam_type: record.scam_type,
            persona: record.persona,
            phase: record.phase,
            turn_number: record.turn_count,
            turn_entities,
            confidence: ConfidenceLevel::assess(&record.entities, record.risk_score),
            entities: record.entities,
            risk_score: record.risk_score,
            tactics,
            reasoning,
            decision,
            should_continue: decision.should_continue(),
            degraded,
        })
    }
}

/// Appends the strongest tactics to the generator's reasoning.
fn with_tactics(reasoning: &str, tactics: &[TacticDetection]) -> String {
    if tactics.is_empty() {
        return reasoning.to_string();
    }
    let names: Vec<&str> = tactics.iter().take(3).map(|d| d.tactic.as_str()).collect();
    let note = format!("Detected tactics: {}.", names.join(", "));
    if reasoning.is_empty() {
        note
    } else {
        format!("{} {}", reasoning, note)
    }
}
