//! GenerateReportHandler - intelligence report for investigators.

use serde::Serialize;
use std::sync::Arc;

use super::SharedStore;
use crate::domain::engagement::{
    ConfidenceLevel, ConversationState, ConversationTurn, EngagementPhase, Persona, ScamType,
    StoreError,
};
use crate::domain::foundation::{ConversationId, RiskScore, Timestamp};
use crate::domain::intelligence::{tally_tactics, EntityKind, EntitySet, TacticCount};
use crate::ports::ScamClassifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateReportQuery {
    pub conversation_id: ConversationId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntelligenceReport {
    pub conversation_id: ConversationId,
    pub scam_type: ScamType,
    pub persona: Persona,
    pub phase: EngagementPhase,
    pub total_turns: u32,
    pub entities: EntitySet,
    pub summary: String,
    pub risk_score: RiskScore,
    pub confidence: ConfidenceLevel,
    pub red_flags: Vec<String>,
    /// Pressure tactics across every scammer message, most frequent first.
    pub tactics: Vec<TacticCount>,
    pub recommended_actions: Vec<String>,
    pub transcript: Vec<ConversationTurn>,
    pub created_at: Timestamp,
    pub generated_at: Timestamp,
}

/// Builds reports from live conversation state.
///
/// Red flags come from re-classifying everything the scammer wrote, so a
/// conversation that drifted from its opening pitch is still flagged
/// accurately.
pub struct GenerateReportHandler {
    store: SharedStore,
    classifier: Arc<dyn ScamClassifier>,
}

impl GenerateReportHandler {
    pub fn new(store: SharedStore, classifier: Arc<dyn ScamClassifier>) -> Self {
        Self { store, classifier }
    }

    pub async fn handle(&self, query: GenerateReportQuery) -> Result<IntelligenceReport, StoreError> {
        let id = query.conversation_id;
        let state = self
            .store
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;

        let scammer_text = state
            .turns()
            .iter()
            .map(|turn| turn.scammer_message.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let red_flags = if scammer_text.is_empty() {
            Vec::new()
        } else {
            let (classification, reason) = self.classifier.classify(&scammer_text).await.into_parts();
            if let Some(reason) = reason {
                tracing::warn!(conversation_id = %id, "Report red flags are rule-based: {}", reason);
            }
            classification.red_flags
        };

        Ok(IntelligenceReport {
            conversation_id: id,
            scam_type: state.scam_type(),
            persona: state.persona(),
            phase: state.phase(),
            total_turns: state.turn_count(),
            summary: summarize(&state),
            risk_score: state.risk_score(),
            confidence: ConfidenceLevel::assess(state.entities(), state.risk_score()),
            red_flags,
            tactics: tally_tactics(state.turns().iter().map(|turn| turn.scammer_message.as_str())),
            recommended_actions: recommended_actions(state.entities()),
            entities: state.entities().clone(),
            transcript: state.turns().to_vec(),
            created_at: state.created_at(),
            generated_at: Timestamp::now(),
        })
    }
}

fn summarize(state: &ConversationState) -> String {
    let entities = state.entities();
    let captured: Vec<String> = [
        EntityKind::PaymentHandle,
        EntityKind::BankAccount,
        EntityKind::PhishingLink,
        EntityKind::PhoneNumber,
        EntityKind::Alias,
        EntityKind::Organization,
    ]
    .iter()
    .filter(|kind| entities.count(**kind) > 0)
    .map(|kind| format!("{} {}", entities.count(*kind), kind.label().to_lowercase()))
    .collect();

    let haul = if captured.is_empty() {
        "no identifying details yet".to_string()
    } else {
        captured.join(", ")
    };
    format!(
        "{} scam engaged for {} turns as a {} persona, now in {}. Captured: {}.",
        state.scam_type().label(),
        state.turn_count(),
        state.persona().label().to_lowercase(),
        state.phase().label().to_lowercase(),
        haul
    )
}

/// One or two concrete follow-ups per captured entity.
pub fn recommended_actions(entities: &EntitySet) -> Vec<String> {
    let mut actions = Vec::new();
    for handle in entities.payment_handles() {
        actions.push(format!("Block payment handle {}", handle));
        actions.push(format!("Report payment handle {} to the payment network", handle));
    }
    for link in entities.phishing_links() {
        actions.push(format!("Report phishing link {}", link));
        actions.push(format!("Request takedown of {}", link));
    }
    for phone in entities.phone_numbers() {
        actions.push(format!("Alert telecom provider about {}", phone));
        actions.push(format!("Add {} to the spam registry", phone));
    }
    for account in entities.bank_accounts() {
        actions.push(format!("Investigate bank account {}", account.account_number));
        if account.routing_code.is_some() {
            actions.push(format!(
                "Alert {} about suspicious account",
                account.bank_name.as_deref().unwrap_or("the bank")
            ));
        }
    }
    for organization in entities.organizations() {
        actions.push(format!("Investigate organization {}", organization));
    }

    if actions.is_empty() {
        actions.push("Monitor for additional intelligence".to_string());
        actions.push("Continue conversation to extract more details".to_string());
    }
    actions
}
