//! Typed pieces of extracted fraud intelligence.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::branch_codes::bank_name_for;

/// The six kinds of intelligence the honeypot collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// `local@provider` virtual payment address.
    PaymentHandle,
    /// Account number with optional routing code and bank name.
    BankAccount,
    /// Any http(s) URL sent by the scammer.
    PhishingLink,
    /// Canonical `+91XXXXXXXXXX` mobile number.
    PhoneNumber,
    /// A name the scammer introduced themselves with.
    Alias,
    /// A company or bank name the scammer claims to represent.
    Organization,
}

impl EntityKind {
    /// All kinds, in reporting order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::PaymentHandle,
        EntityKind::BankAccount,
        EntityKind::PhishingLink,
        EntityKind::PhoneNumber,
        EntityKind::Alias,
        EntityKind::Organization,
    ];

    /// Returns true for kinds that let investigators trace or block money.
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            EntityKind::PaymentHandle | EntityKind::BankAccount | EntityKind::PhishingLink
        )
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::PaymentHandle => "Payment handle",
            EntityKind::BankAccount => "Bank account",
            EntityKind::PhishingLink => "Phishing link",
            EntityKind::PhoneNumber => "Phone number",
            EntityKind::Alias => "Alias",
            EntityKind::Organization => "Organization",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A bank account mentioned in the conversation.
///
/// Identity is the account number alone; see `EntitySet` for how
/// duplicates are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BankAccount {
    pub account_number: String,
    pub routing_code: Option<String>,
    pub bank_name: Option<String>,
}

impl BankAccount {
    /// Creates an account with no routing information.
    pub fn new(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            routing_code: None,
            bank_name: None,
        }
    }

    /// Attaches a routing code, resolving the bank name from its prefix.
    pub fn with_routing_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into().to_ascii_uppercase();
        self.bank_name = bank_name_for(&code).map(str::to_string);
        self.routing_code = Some(code);
        self
    }

    /// How much an investigator can rely on this record, in `[0, 1]`.
    pub fn confidence(&self) -> f64 {
        if self.routing_code.is_some() {
            0.9
        } else {
            0.6
        }
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.account_number)?;
        if let Some(code) = &self.routing_code {
            write!(f, " ({})", code)?;
        }
        if let Some(bank) = &self.bank_name {
            write!(f, " - {}", bank)?;
        }
        Ok(())
    }
}
