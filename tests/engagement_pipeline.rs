//! Integration tests for the engagement pipeline.
//!
//! Drives the public API end to end with offline collaborators:
//! 1. Store lifecycle (create, add_turn, continuation)
//! 2. Orchestrated engagement through `EngageHandler`
//! 3. Durable records through the YAML repository

use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::RwLock;

use scam_honeypot::adapters::ai::{RuleBasedClassifier, ScriptedReplyGenerator};
use scam_honeypot::adapters::storage::{FileConversationRepository, InMemoryConversationRepository};
use scam_honeypot::application::{
    ConversationLocks, EngageCommand, EngageHandler, HoneypotService, SharedStore,
};
use scam_honeypot::domain::engagement::{
    phase_for, ContinuationDecision, ConversationRecord, ConversationState, ConversationStore,
    EngagementPhase, Persona, ScamType, StoreError,
};
use scam_honeypot::domain::foundation::ConversationId;
use scam_honeypot::domain::intelligence::{extract, merge, BankAccount, EntitySet};
use scam_honeypot::ports::ConversationRepository;

// =============================================================================
// Store lifecycle
// =============================================================================

#[test]
fn new_conversation_starts_in_trust_building() {
    let mut store = ConversationStore::new();
    let state = store.create(ScamType::Loan, Persona::CautiousMiddleAged);

    assert_eq!(state.turn_count(), 0);
    assert_eq!(state.phase(), EngagementPhase::TrustBuilding);
    assert!(state.entities().is_empty());
    assert_eq!(state.risk_score().value(), 0.0);
    assert_eq!(state.created_at(), state.updated_at());
}

#[test]
fn payment_handle_scenario() {
    let mut store = ConversationStore::new();
    let id = store.create(ScamType::PrizeLottery, Persona::EagerYoungAdult).id();

    let scammer = "Pay to scammer1@paytm now";
    let reply = "ok sending";
    let entities = merge(&extract(scammer), &extract(reply));
    let state = store.add_turn(id, scammer, reply, entities, "").unwrap();

    assert!(state.entities().payment_handles().contains("scammer1@paytm"));
    assert_eq!(state.turn_count(), 1);
    assert_eq!(state.phase(), EngagementPhase::TrustBuilding);
}

#[test]
fn first_seen_routing_code_wins_across_turns() {
    let mut store = ConversationStore::new();
    let id = store.create(ScamType::Loan, Persona::BusyProfessional).id();

    let first = "Send to account 12345678901 IFSC SBIN0001234";
    store.add_turn(id, first, "ok", extract(first), "").unwrap();
    let second = "Sorry, use account 12345678901 IFSC HDFC0009999";
    let state = store.add_turn(id, second, "ok", extract(second), "").unwrap();

    assert_eq!(state.entities().bank_accounts().len(), 1);
    let account = state.entities().bank_account("12345678901").unwrap();
    assert_eq!(account.routing_code.as_deref(), Some("SBIN0001234"));
}

#[test]
fn phone_formats_collapse_to_one_entry() {
    let mut store = ConversationStore::new();
    let id = store.create(ScamType::TechSupport, Persona::SeniorCitizen).id();

    store
        .add_turn(id, "Call +91 98765 43210", "ok", extract("Call +91 98765 43210"), "")
        .unwrap();
    let state = store
        .add_turn(id, "or 9876543210", "ok", extract("or 9876543210"), "")
        .unwrap();

    assert_eq!(state.entities().phone_numbers().len(), 1);
    assert!(state.entities().phone_numbers().contains("+919876543210"));
}

#[test]
fn turns_are_numbered_without_gaps() {
    let mut store = ConversationStore::new();
    let id = store.create(ScamType::JobOffer, Persona::TechSavvyStudent).id();

    for k in 1..=10u32 {
        let state = store
            .add_turn(id, format!("message {}", k), "reply", EntitySet::new(), "")
            .unwrap();
        assert_eq!(state.turn_count(), k);
        assert_eq!(state.phase(), phase_for(k));
    }

    let state = store.get(id).unwrap();
    let numbers: Vec<u32> = state.turns().iter().map(|t| t.turn_number).collect();
    assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
}

#[test]
fn unknown_id_is_not_found_and_creates_nothing() {
    let mut store = ConversationStore::new();
    let id = ConversationId::new();

    let result = store.add_turn(id, "hi", "hello", EntitySet::new(), "");

    assert_eq!(result.unwrap_err(), StoreError::NotFound(id));
    assert!(store.get(id).is_none());
    assert!(store.is_empty());
    assert!(!store.should_continue(id));
}

#[test]
fn turn_cap_ends_engagement_regardless_of_entities() {
    let mut store = ConversationStore::new();
    let id = store.create(ScamType::Other, Persona::CautiousMiddleAged).id();

    for _ in 0..14 {
        store.add_turn(id, "hmm", "yes?", EntitySet::new(), "").unwrap();
    }
    assert!(store.should_continue(id));

    store.add_turn(id, "hmm", "yes?", EntitySet::new(), "").unwrap();
    assert!(!store.should_continue(id));
    assert_eq!(store.continuation(id), Some(ContinuationDecision::TurnCapReached));
}

#[test]
fn safe_exit_with_payment_handle_ends_early() {
    let mut store = ConversationStore::new();
    let id = store.create(ScamType::Loan, Persona::CautiousMiddleAged).id();

    for _ in 0..12 {
        store.add_turn(id, "hmm", "yes?", EntitySet::new(), "").unwrap();
    }
    assert!(store.should_continue(id));

    let handle = EntitySet::new().with_payment_handle("fees@ybl");
    store.add_turn(id, "pay fees@ybl", "ok", handle, "").unwrap();

    assert_eq!(store.get(id).unwrap().phase(), EngagementPhase::SafeExit);
    assert!(!store.should_continue(id));
    assert_eq!(
        store.continuation(id),
        Some(ContinuationDecision::IntelligenceSecured)
    );
}

#[test]
fn safe_exit_without_actionable_intel_continues() {
    let mut store = ConversationStore::new();
    let id = store.create(ScamType::Loan, Persona::CautiousMiddleAged).id();
    let names_only = EntitySet::new().with_alias("Rahul").with_phone_number("+919876543210");

    for _ in 0..13 {
        store.add_turn(id, "hmm", "yes?", names_only.clone(), "").unwrap();
    }

    assert_eq!(store.get(id).unwrap().phase(), EngagementPhase::SafeExit);
    assert!(store.should_continue(id));
}

// =============================================================================
// Orchestrated engagement
// =============================================================================

fn engage_handler(store: SharedStore) -> EngageHandler {
    EngageHandler::new(
        store,
        Arc::new(ConversationLocks::new()),
        Arc::new(RuleBasedClassifier::new()),
        Arc::new(ScriptedReplyGenerator::new()),
        Arc::new(InMemoryConversationRepository::new()),
    )
}

#[tokio::test]
async fn full_engagement_gathers_intelligence_and_exits() {
    let store: SharedStore = Arc::new(RwLock::new(ConversationStore::new()));
    let handler = engage_handler(Arc::clone(&store));

    let opening = handler
        .handle(EngageCommand::new("Congratulations! You won Rs 25 lakh in the lottery"))
        .await
        .unwrap();
    let id = opening.conversation_id;
    assert_eq!(opening.scam_type, ScamType::PrizeLottery);

    let script = [
        "I am Rahul Sharma from Lucky Draw Services Ltd",
        "You must pay a processing fee first",
        "Transfer to winner.desk@okaxis",
        "Or use account 123456789012 IFSC SBIN0001234",
        "Verify at https://claim-prize.example/verify",
    ];
    let mut last = opening;
    for message in script {
        last = handler
            .handle(EngageCommand::new(message).in_conversation(id))
            .await
            .unwrap();
    }

    assert_eq!(last.turn_number, 6);
    assert_eq!(last.phase, EngagementPhase::InformationGathering);
    assert!(last.entities.payment_handles().contains("winner.desk@okaxis"));
    assert!(last
        .entities
        .phishing_links()
        .contains("https://claim-prize.example/verify"));
    let account = last.entities.bank_account("123456789012").unwrap();
    assert_eq!(account.bank_name.as_deref(), Some("State Bank of India"));
    assert!(last.should_continue);

    while last.should_continue {
        last = handler
            .handle(EngageCommand::new("Hello? Did you pay?").in_conversation(id))
            .await
            .unwrap();
    }
    assert_eq!(last.turn_number, 13);
    assert_eq!(last.decision, ContinuationDecision::IntelligenceSecured);
}

// =============================================================================
// Durable records
// =============================================================================

#[tokio::test]
async fn yaml_record_round_trips_through_restore() {
    let dir = TempDir::new().unwrap();
    let repository = FileConversationRepository::new(dir.path());

    let mut store = ConversationStore::new();
    let id = store.create(ScamType::InvestmentFraud, Persona::BusyProfessional).id();
    let message = "Invest via https://fast-returns.example or 9876543210@ybl, account 123456789012 IFSC HDFC0001234";
    let state = store
        .add_turn(id, message, "send details", extract(message), "asking for details")
        .unwrap();
    let record = ConversationRecord::from(state);

    repository.save(&record).await.unwrap();
    let loaded = repository.load(id).await.unwrap();
    assert_eq!(loaded, record);

    let restored = ConversationState::try_from(loaded).unwrap();
    assert_eq!(restored.entities(), store.get(id).unwrap().entities());
    assert_eq!(
        restored.entities().bank_accounts()[0],
        BankAccount::new("123456789012").with_routing_code("HDFC0001234")
    );
}

#[tokio::test]
async fn service_restores_what_a_previous_process_saved() {
    let dir = TempDir::new().unwrap();
    let repository: Arc<dyn ConversationRepository> =
        Arc::new(FileConversationRepository::new(dir.path()));
    let build = || {
        HoneypotService::new(
            ConversationStore::new(),
            Arc::new(RuleBasedClassifier::new()),
            Arc::new(ScriptedReplyGenerator::new()),
            Arc::clone(&repository),
        )
    };

    let before = build();
    let response = before.respond(r#"{"message":"Your bank account is blocked, verify now"}"#).await;
    let id = response["conversation_id"].as_str().unwrap().to_string();
    drop(before);

    let after = build();
    assert_eq!(after.restore().await.unwrap(), 1);
    let next = after
        .respond(&format!(r#"{{"message":"Share OTP","conversation_id":"{}"}}"#, id))
        .await;
    assert_eq!(next["turn_number"], 2);
}
