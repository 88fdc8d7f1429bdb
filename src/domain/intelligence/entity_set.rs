//! Aggregate of every entity kind extracted from a span of text.
//!
//! An `EntitySet` is never mutated after it is handed out. Extraction
//! builds one with the consuming `with_*` methods; accumulation across
//! turns always goes through [`merge`], which produces a new set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::entity::{BankAccount, EntityKind};
use super::phone::normalize_phone;
use crate::domain::foundation::ValidationError;

/// Deduplicated intelligence for one message, one turn or one conversation.
///
/// Every kind except bank accounts is a set keyed by its string value.
/// Bank accounts are unique by account number: the first record seen for a
/// number wins and later routing or bank-name data for it is dropped.
///
/// Accounts keep chronological order for reporting, but equality ignores
/// that order: two sets are equal when they hold the same records.
///
/// Deserialization goes through the same `with_*` builders as extraction,
/// so stored data is re-normalized and first-seen-wins is re-applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "StoredEntitySet")]
pub struct EntitySet {
    payment_handles: BTreeSet<String>,
    bank_accounts: Vec<BankAccount>,
    phishing_links: BTreeSet<String>,
    phone_numbers: BTreeSet<String>,
    aliases: BTreeSet<String>,
    organizations: BTreeSet<String>,
}

impl PartialEq for EntitySet {
    fn eq(&self, other: &Self) -> bool {
        self.payment_handles == other.payment_handles
            && self.phishing_links == other.phishing_links
            && self.phone_numbers == other.phone_numbers
            && self.aliases == other.aliases
            && self.organizations == other.organizations
            && self.bank_accounts.len() == other.bank_accounts.len()
            && self
                .bank_accounts
                .iter()
                .all(|account| other.bank_account(&account.account_number) == Some(account))
    }
}

impl Eq for EntitySet {}

/// Wire shape of an [`EntitySet`], validated on the way in.
#[derive(Deserialize)]
struct StoredEntitySet {
    #[serde(default)]
    payment_handles: Vec<String>,
    #[serde(default)]
    bank_accounts: Vec<BankAccount>,
    #[serde(default)]
    phishing_links: Vec<String>,
    #[serde(default)]
    phone_numbers: Vec<String>,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    organizations: Vec<String>,
}

impl TryFrom<StoredEntitySet> for EntitySet {
    type Error = ValidationError;

    fn try_from(stored: StoredEntitySet) -> Result<Self, Self::Error> {
        let mut set = EntitySet::new();
        for handle in stored.payment_handles {
            set = set.with_payment_handle(handle);
        }
        for account in stored.bank_accounts {
            let rebuilt = match account.routing_code {
                Some(code) => BankAccount::new(account.account_number).with_routing_code(code),
                None => BankAccount::new(account.account_number),
            };
            set = set.with_bank_account(rebuilt);
        }
        for url in stored.phishing_links {
            set = set.with_phishing_link(url);
        }
        for raw in stored.phone_numbers {
            let phone = normalize_phone(&raw).ok_or_else(|| {
                ValidationError::invalid_format("phone_numbers", format!("'{}' is not a mobile number", raw))
            })?;
            set = set.with_phone_number(phone);
        }
        for alias in stored.aliases {
            set = set.with_alias(alias);
        }
        for organization in stored.organizations {
            set = set.with_organization(organization);
        }
        Ok(set)
    }
}

impl EntitySet {
    /// Creates a set with all six kinds empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a payment handle, lowercased.
    pub fn with_payment_handle(mut self, handle: impl AsRef<str>) -> Self {
        self.payment_handles
            .insert(handle.as_ref().trim().to_lowercase());
        self
    }

    /// Adds a bank account unless its number is already present.
    pub fn with_bank_account(mut self, account: BankAccount) -> Self {
        self.push_account(account);
        self
    }

    pub fn with_phishing_link(mut self, url: impl Into<String>) -> Self {
        self.phishing_links.insert(url.into());
        self
    }

    /// Adds an already-canonical phone number.
    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_numbers.insert(phone.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.insert(alias.into());
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organizations.insert(organization.into());
        self
    }

    pub fn payment_handles(&self) -> &BTreeSet<String> {
        &self.payment_handles
    }

    pub fn bank_accounts(&self) -> &[BankAccount] {
        &self.bank_accounts
    }

    pub fn phishing_links(&self) -> &BTreeSet<String> {
        &self.phishing_links
    }

    pub fn phone_numbers(&self) -> &BTreeSet<String> {
        &self.phone_numbers
    }

    pub fn aliases(&self) -> &BTreeSet<String> {
        &self.aliases
    }

    pub fn organizations(&self) -> &BTreeSet<String> {
        &self.organizations
    }

    /// Looks up the stored record for an account number.
    pub fn bank_account(&self, account_number: &str) -> Option<&BankAccount> {
        self.bank_accounts
            .iter()
            .find(|a| a.account_number == account_number)
    }

    /// Number of distinct entities of one kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::PaymentHandle => self.payment_handles.len(),
            EntityKind::BankAccount => self.bank_accounts.len(),
            EntityKind::PhishingLink => self.phishing_links.len(),
            EntityKind::PhoneNumber => self.phone_numbers.len(),
            EntityKind::Alias => self.aliases.len(),
            EntityKind::Organization => self.organizations.len(),
        }
    }

    /// Total number of distinct entities across all kinds.
    pub fn total(&self) -> usize {
        EntityKind::ALL.iter().map(|k| self.count(*k)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// True once at least one payment handle, bank account or phishing
    /// link has been captured.
    pub fn has_actionable_intel(&self) -> bool {
        EntityKind::ALL
            .iter()
            .filter(|k| k.is_actionable())
            .any(|k| self.count(*k) > 0)
    }

    /// Combines `self` (earlier) with `later` into a new set.
    pub fn merge(&self, later: &EntitySet) -> EntitySet {
        let mut merged = self.clone();
        merged
            .payment_handles
            .extend(later.payment_handles.iter().cloned());
        merged
            .phishing_links
            .extend(later.phishing_links.iter().cloned());
        merged
            .phone_numbers
            .extend(later.phone_numbers.iter().cloned());
        merged.aliases.extend(later.aliases.iter().cloned());
        merged
            .organizations
            .extend(later.organizations.iter().cloned());
        for account in &later.bank_accounts {
            merged.push_account(account.clone());
        }
        merged
    }

    fn push_account(&mut self, account: BankAccount) {
        if self.bank_account(&account.account_number).is_none() {
            self.bank_accounts.push(account);
        }
    }
}

/// Merges two entity sets, `earlier` taking precedence on account conflicts.
///
/// Commutative for every kind except bank accounts sharing a number, so
/// callers pass the existing cumulative set first and the new turn second.
pub fn merge(earlier: &EntitySet, later: &EntitySet) -> EntitySet {
    earlier.merge(later)
}
