//! ConversationStore - the single owner of live conversation state.
//!
//! The store is an ordinary value: the host constructs it at start-up,
//! shares it with request handlers and drops it at shutdown. It performs no
//! locking of its own. Callers must ensure at most one `add_turn` is in
//! flight per conversation id.

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use super::continuation::{ContinuationDecision, ContinuationPolicy};
use super::conversation::{summarize, ConversationState, DEFAULT_CONTEXT_WINDOW};
use super::persona::Persona;
use super::phase::EngagementPhase;
use super::scam_type::ScamType;
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode, RiskScore, Timestamp};
use crate::domain::intelligence::{EntityKind, EntitySet};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Conversation not found: {0}")]
    NotFound(ConversationId),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => {
                DomainError::new(ErrorCode::ConversationNotFound, err.to_string())
                    .with_detail("conversation_id", id.to_string())
            }
        }
    }
}

/// Per-conversation numbers for dashboards and reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationStats {
    pub conversation_id: ConversationId,
    pub total_turns: u32,
    pub phase: EngagementPhase,
    pub scam_type: ScamType,
    pub persona: Persona,
    pub entity_counts: HashMap<EntityKind, usize>,
    pub risk_score: RiskScore,
    pub duration_secs: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One line of the conversation listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationSummary {
    pub conversation_id: ConversationId,
    pub scam_type: ScamType,
    pub total_turns: u32,
    pub phase: EngagementPhase,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct ConversationStore {
    conversations: HashMap<ConversationId, ConversationState>,
    policy: ContinuationPolicy,
    context_window: usize,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    /// Creates an empty store with the default turn cap and context window.
    pub fn new() -> Self {
        Self::with_policy(ContinuationPolicy::default())
    }

    pub fn with_policy(policy: ContinuationPolicy) -> Self {
        Self {
            conversations: HashMap::new(),
            policy,
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }

    /// Sets how many trailing turns feed the context summary (minimum 1).
    pub fn with_context_window(mut self, turns: usize) -> Self {
        self.context_window = turns.max(1);
        self
    }

    pub fn policy(&self) -> ContinuationPolicy {
        self.policy
    }

    /// Opens a new engagement at turn 0 in trust building.
    pub fn create(&mut self, scam_type: ScamType, persona: Persona) -> ConversationState {
        let state = ConversationState::new(scam_type, persona);
        tracing::info!(
            conversation_id = %state.id(),
            scam_type = scam_type.as_str(),
            persona = persona.as_str(),
            "Conversation created"
        );
        self.conversations.insert(state.id(), state.clone());
        state
    }

    pub fn get(&self, id: ConversationId) -> Option<&ConversationState> {
        self.conversations.get(&id)
    }

    pub fn contains(&self, id: ConversationId) -> bool {
        self.conversations.contains_key(&id)
    }

    /// Records one exchange. The only path that changes turns, cumulative
    /// entities, phase or the turn counter.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id; nothing is created.
    pub fn add_turn(
        &mut self,
        id: ConversationId,
        scammer_message: impl Into<String>,
        reply_message: impl Into<String>,
        turn_entities: EntitySet,
        reasoning: impl Into<String>,
    ) -> Result<&ConversationState, StoreError> {
        let context_window = self.context_window;
        let state = self
            .conversations
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;

        state.apply_turn(
            scammer_message.into(),
            reply_message.into(),
            turn_entities,
            reasoning.into(),
            context_window,
        );
        tracing::debug!(
            conversation_id = %id,
            turn = state.turn_count(),
            phase = ?state.phase(),
            entities = state.entities().total(),
            "Turn recorded"
        );
        Ok(state)
    }

    /// Overwrites the risk score. Unknown ids are ignored.
    pub fn update_risk_score(&mut self, id: ConversationId, score: RiskScore) {
        match self.conversations.get_mut(&id) {
            Some(state) => state.set_risk_score(score),
            None => tracing::debug!(conversation_id = %id, "Risk update for unknown conversation ignored"),
        }
    }

    /// Continuation verdict with its reason; `None` for unknown ids.
    pub fn continuation(&self, id: ConversationId) -> Option<ContinuationDecision> {
        self.get(id).map(|state| self.policy.decide(state))
    }

    /// False once the turn cap is hit, once safe exit has actionable
    /// intelligence, or when the id is unknown.
    pub fn should_continue(&self, id: ConversationId) -> bool {
        self.continuation(id)
            .map(|decision| decision.should_continue())
            .unwrap_or(false)
    }

    /// Full human-readable transcript, oldest turn first.
    pub fn transcript(&self, id: ConversationId) -> Option<String> {
        let state = self.get(id)?;
        let blocks: Vec<String> = state
            .turns()
            .iter()
            .map(|turn| {
                format!(
                    "[Turn {}]\nScammer: {}\nAgent ({}): {}\n",
                    turn.turn_number,
                    turn.scammer_message,
                    state.persona().label(),
                    turn.reply_message
                )
            })
            .collect();
        Some(blocks.join("\n"))
    }

    pub fn stats(&self, id: ConversationId) -> Option<ConversationStats> {
        let state = self.get(id)?;
        let entity_counts = EntityKind::ALL
            .iter()
            .map(|kind| (*kind, state.entities().count(*kind)))
            .collect();
        Some(ConversationStats {
            conversation_id: state.id(),
            total_turns: state.turn_count(),
            phase: state.phase(),
            scam_type: state.scam_type(),
            persona: state.persona(),
            entity_counts,
            risk_score: state.risk_score(),
            duration_secs: state
                .updated_at()
                .duration_since(&state.created_at())
                .num_seconds(),
            created_at: state.created_at(),
            updated_at: state.updated_at(),
        })
    }

    /// All conversations, oldest first.
    pub fn list(&self) -> Vec<ConversationSummary> {
        let mut summaries: Vec<ConversationSummary> = self
            .conversations
            .values()
            .map(|state| ConversationSummary {
                conversation_id: state.id(),
                scam_type: state.scam_type(),
                total_turns: state.turn_count(),
                phase: state.phase(),
                created_at: state.created_at(),
            })
            .collect();
        summaries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.conversation_id.cmp(&b.conversation_id))
        });
        summaries
    }

    /// Re-admits a state loaded from durable storage, replacing any live
    /// copy with the same id.
    pub fn restore(&mut self, mut state: ConversationState) {
        state.context_summary = summarize(&state.turns, self.context_window);
        self.conversations.insert(state.id(), state);
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intelligence::BankAccount;

    fn store_with_one() -> (ConversationStore, ConversationId) {
        let mut store = ConversationStore::new();
        let id = store.create(ScamType::Loan, Persona::CautiousMiddleAged).id();
        (store, id)
    }

    fn play(store: &mut ConversationStore, id: ConversationId, turns: u32) {
        for n in 1..=turns {
            store
                .add_turn(id, format!("msg {}", n), format!("reply {}", n), EntitySet::new(), "")
                .unwrap();
        }
    }

    mod create_and_get {
        use super::*;

        #[test]
        fn create_starts_at_turn_zero() {
            let (store, id) = store_with_one();
            let state = store.get(id).unwrap();
            assert_eq!(state.turn_count(), 0);
            assert_eq!(state.phase(), EngagementPhase::TrustBuilding);
            assert_eq!(state.risk_score(), RiskScore::ZERO);
        }

        #[test]
        fn get_unknown_is_none() {
            let (store, _) = store_with_one();
            assert!(store.get(ConversationId::new()).is_none());
        }

        #[test]
        fn create_allocates_distinct_ids() {
            let mut store = ConversationStore::new();
            let a = store.create(ScamType::Other, Persona::default()).id();
            let b = store.create(ScamType::Other, Persona::default()).id();
            assert_ne!(a, b);
            assert_eq!(store.len(), 2);
        }
    }

    mod add_turn {
        use super::*;

        #[test]
        fn k_turns_give_counter_k() {
            let (mut store, id) = store_with_one();
            play(&mut store, id, 9);
            let state = store.get(id).unwrap();
            assert_eq!(state.turn_count(), 9);
            let numbers: Vec<u32> = state.turns().iter().map(|t| t.turn_number).collect();
            assert_eq!(numbers, (1..=9).collect::<Vec<_>>());
            assert_eq!(state.phase(), EngagementPhase::IntelligenceExtraction);
        }

        #[test]
        fn unknown_id_fails_without_creating() {
            let (mut store, _) = store_with_one();
            let ghost = ConversationId::new();
            let result = store.add_turn(ghost, "hi", "hello", EntitySet::new(), "");
            assert_eq!(result.unwrap_err(), StoreError::NotFound(ghost));
            assert!(!store.contains(ghost));
            assert_eq!(store.len(), 1);
        }

        #[test]
        fn earlier_bank_details_win() {
            let (mut store, id) = store_with_one();
            let first = EntitySet::new()
                .with_bank_account(BankAccount::new("12345678901").with_routing_code("SBIN0001234"));
            let second = EntitySet::new()
                .with_bank_account(BankAccount::new("12345678901").with_routing_code("HDFC0009999"));
            store.add_turn(id, "a", "b", first, "").unwrap();
            store.add_turn(id, "c", "d", second, "").unwrap();

            let state = store.get(id).unwrap();
            let account = state.entities().bank_account("12345678901").unwrap();
            assert_eq!(account.routing_code.as_deref(), Some("SBIN0001234"));
        }

        #[test]
        fn not_found_maps_to_domain_error() {
            let id = ConversationId::new();
            let err: DomainError = StoreError::NotFound(id).into();
            assert_eq!(err.code, ErrorCode::ConversationNotFound);
            assert_eq!(err.details.get("conversation_id"), Some(&id.to_string()));
        }
    }

    mod risk {
        use super::*;

        #[test]
        fn update_sets_score() {
            let (mut store, id) = store_with_one();
            store.update_risk_score(id, RiskScore::new(0.85));
            assert_eq!(store.get(id).unwrap().risk_score(), RiskScore::new(0.85));
        }

        #[test]
        fn update_unknown_is_noop() {
            let (mut store, _) = store_with_one();
            store.update_risk_score(ConversationId::new(), RiskScore::MAX);
            assert_eq!(store.len(), 1);
        }
    }

    mod continuation {
        use super::*;

        #[test]
        fn fresh_conversation_continues() {
            let (store, id) = store_with_one();
            assert!(store.should_continue(id));
        }

        #[test]
        fn unknown_id_does_not_continue() {
            let (store, _) = store_with_one();
            assert!(!store.should_continue(ConversationId::new()));
        }

        #[test]
        fn cap_stops_regardless_of_entities() {
            let (mut store, id) = store_with_one();
            play(&mut store, id, 14);
            assert!(store.should_continue(id));
            play(&mut store, id, 1);
            assert_eq!(store.continuation(id), Some(ContinuationDecision::TurnCapReached));
            assert!(!store.should_continue(id));
        }

        #[test]
        fn safe_exit_with_payment_handle_stops_early() {
            let (mut store, id) = store_with_one();
            store
                .add_turn(id, "pay me", "ok", EntitySet::new().with_payment_handle("x@ybl"), "")
                .unwrap();
            play(&mut store, id, 11);
            assert_eq!(store.get(id).unwrap().phase(), EngagementPhase::IntelligenceExtraction);
            assert!(store.should_continue(id));

            play(&mut store, id, 1);
            assert_eq!(store.get(id).unwrap().turn_count(), 13);
            assert_eq!(
                store.continuation(id),
                Some(ContinuationDecision::IntelligenceSecured)
            );
        }

        #[test]
        fn safe_exit_with_only_phone_numbers_continues() {
            let (mut store, id) = store_with_one();
            store
                .add_turn(id, "call", "ok", EntitySet::new().with_phone_number("+919876543210"), "")
                .unwrap();
            play(&mut store, id, 12);
            assert_eq!(store.get(id).unwrap().phase(), EngagementPhase::SafeExit);
            assert!(store.should_continue(id));
        }

        #[test]
        fn custom_cap_is_honoured() {
            let mut store = ConversationStore::with_policy(ContinuationPolicy::new(2));
            let id = store.create(ScamType::Other, Persona::default()).id();
            play(&mut store, id, 2);
            assert!(!store.should_continue(id));
        }
    }

    mod reporting {
        use super::*;

        #[test]
        fn transcript_lists_turns_in_order() {
            let (mut store, id) = store_with_one();
            play(&mut store, id, 2);
            let transcript = store.transcript(id).unwrap();
            assert_eq!(
                transcript,
                "[Turn 1]\nScammer: msg 1\nAgent (Cautious middle-aged): reply 1\n\n\
                 [Turn 2]\nScammer: msg 2\nAgent (Cautious middle-aged): reply 2\n"
            );
            assert!(store.transcript(ConversationId::new()).is_none());
        }

        #[test]
        fn stats_count_each_kind() {
            let (mut store, id) = store_with_one();
            store
                .add_turn(
                    id,
                    "a",
                    "b",
                    EntitySet::new().with_alias("Rahul").with_payment_handle("r@ybl"),
                    "",
                )
                .unwrap();
            let stats = store.stats(id).unwrap();
            assert_eq!(stats.total_turns, 1);
            assert_eq!(stats.entity_counts[&EntityKind::Alias], 1);
            assert_eq!(stats.entity_counts[&EntityKind::PaymentHandle], 1);
            assert_eq!(stats.entity_counts[&EntityKind::BankAccount], 0);
            assert!(stats.duration_secs >= 0);
        }

        #[test]
        fn list_is_ordered_by_creation() {
            let mut store = ConversationStore::new();
            let first = store.create(ScamType::Loan, Persona::default()).id();
            let second = store.create(ScamType::JobOffer, Persona::default()).id();
            let listed: Vec<_> = store.list().iter().map(|s| s.conversation_id).collect();
            assert_eq!(listed.len(), 2);
            assert!(listed.contains(&first) && listed.contains(&second));
            let created: Vec<_> = store.list().iter().map(|s| s.created_at).collect();
            assert!(created[0] <= created[1]);
        }

        #[test]
        fn restore_replaces_live_copy() {
            let (mut store, id) = store_with_one();
            play(&mut store, id, 3);
            let snapshot = store.get(id).unwrap().clone();
            play(&mut store, id, 2);
            store.restore(snapshot);
            assert_eq!(store.get(id).unwrap().turn_count(), 3);
        }
    }
}
