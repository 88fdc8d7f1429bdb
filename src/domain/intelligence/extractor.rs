//! Pattern-based entity extraction.
//!
//! Each entity kind has its own recognizer. Recognizers run independently
//! and a recognizer whose pattern failed to compile simply contributes
//! nothing, so `extract` never fails for any input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::entity::BankAccount;
use super::entity_set::EntitySet;
use super::phone::{is_mobile_shape, normalize_phone};

/// Payment provider domains accepted after the `@` of a handle.
const PAYMENT_PROVIDERS: &[&str] = &[
    "paytm", "ybl", "ibl", "axl", "upi", "apl", "oksbi", "okhdfcbank", "okicici", "okaxis",
    "okbizaxis", "axisbank", "icici", "sbi", "hdfcbank", "kotak", "freecharge", "airtel", "jio",
];

/// Words that introduce a sentence rather than name a person.
const NAME_STOP_WORDS: &[&str] = &[
    "Sir", "Madam", "Hello", "Please", "Thank", "Thanks", "Welcome", "Dear", "Calling", "Here",
    "Your", "Congratulations",
];

/// Greetings and pronouns that can precede an organization name.
const ORG_LEADING_NOISE: &[&str] = &[
    "Hello", "Hi", "Dear", "Sir", "Madam", "Please", "Welcome", "Congratulations", "From",
    "I", "We", "This", "Your", "Our", "Contact", "Call",
];

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

static DEFAULT_EXTRACTOR: Lazy<EntityExtractor> = Lazy::new(EntityExtractor::new);

/// Extracts every entity kind from `text` using the shared extractor.
pub fn extract(text: &str) -> EntitySet {
    DEFAULT_EXTRACTOR.extract(text)
}

/// Holds the compiled recognizers for each entity kind.
#[derive(Debug)]
pub struct EntityExtractor {
    payment_handle: Option<Regex>,
    phone: Option<Regex>,
    account_number: Option<Regex>,
    routing_code: Option<Regex>,
    url: Option<Regex>,
    alias_intro: Option<Regex>,
    alias_honorific: Option<Regex>,
    organization: Option<Regex>,
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self {
            // "name@provider" or "9876543210@bank"
            payment_handle: compile("payment_handle", r"[A-Za-z0-9._\-]+@[A-Za-z0-9.\-]+"),
            // "+91 98765 43210", "91-9876543210", "9876543210"
            phone: compile(
                "phone",
                r"(?:\+91[\s-]?|\b91[\s-]?|\b)[6-9]\d{4}[\s-]?\d{5}\b",
            ),
            account_number: compile("account_number", r"\b\d{9,18}\b"),
            // four letters, a literal zero, six alphanumerics
            routing_code: compile("routing_code", r"(?i)\b[A-Z]{4}0[A-Z0-9]{6}\b"),
            url: compile("url", r#"(?i)\bhttps?://[^\s"'<>\[\](){}]+"#),
            alias_intro: compile(
                "alias_intro",
                r"(?:\b(?i:i am|i'm|my name is|this is|contact|call)\s+)([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})",
            ),
            alias_honorific: compile(
                "alias_honorific",
                r"\b(?:Mr|Mrs|Ms|Dr)\.?\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+){0,2})",
            ),
            organization: compile(
                "organization",
                r"\b[A-Z][A-Za-z&]*(?:\s+[A-Z][A-Za-z&]*)*\s+(?:Pvt\.?\s+Ltd|Private\s+Limited|Ltd|Limited|Bank|Finance|Finserv|Loans?|Services?|Company|Corporation|Corp|Enterprises?|Capital|Investments?)\b\.?",
            ),
        }
    }

    /// Extracts every entity kind from `text`.
    ///
    /// Deterministic and total: empty or binary-looking input yields an
    /// empty set, never an error.
    pub fn extract(&self, text: &str) -> EntitySet {
        let mut set = EntitySet::new();

        for handle in self.payment_handles(text) {
            set = set.with_payment_handle(handle);
        }
        for phone in self.phone_numbers(text) {
            set = set.with_phone_number(phone);
        }
        for account in self.bank_accounts(text) {
            set = set.with_bank_account(account);
        }
        for url in self.urls(text) {
            set = set.with_phishing_link(url);
        }
        for alias in self.aliases(text) {
            set = set.with_alias(alias);
        }
        for organization in self.organizations(text) {
            set = set.with_organization(organization);
        }

        tracing::debug!(
            entities = set.total(),
            actionable = set.has_actionable_intel(),
            "Extracted entities from {} chars",
            text.len()
        );
        set
    }

    fn payment_handles(&self, text: &str) -> Vec<String> {
        let Some(re) = &self.payment_handle else {
            return Vec::new();
        };
        let candidates = re
            .find_iter(text)
            .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION).to_lowercase())
            .filter(|candidate| is_payment_handle(candidate));
        dedup_in_order(candidates)
    }

    fn phone_numbers(&self, text: &str) -> Vec<String> {
        let Some(re) = &self.phone else {
            return Vec::new();
        };
        dedup_in_order(re.find_iter(text).filter_map(|m| normalize_phone(m.as_str())))
    }

    /// Pairs account numbers with routing codes by position.
    ///
    /// Both lists are deduplicated in order of first appearance; the i-th
    /// account gets the i-th routing code when one exists.
    fn bank_accounts(&self, text: &str) -> Vec<BankAccount> {
        let Some(account_re) = &self.account_number else {
            return Vec::new();
        };
        let numbers = dedup_in_order(
            account_re
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .filter(|digits| !is_phone_shaped(digits)),
        );
        let codes = match &self.routing_code {
            Some(code_re) => dedup_in_order(
                code_re
                    .find_iter(text)
                    .map(|m| m.as_str().to_ascii_uppercase()),
            ),
            None => Vec::new(),
        };

        numbers
            .into_iter()
            .enumerate()
            .map(|(i, number)| match codes.get(i) {
                Some(code) => BankAccount::new(number).with_routing_code(code.clone()),
                None => BankAccount::new(number),
            })
            .collect()
    }

    fn urls(&self, text: &str) -> Vec<String> {
        let Some(re) = &self.url else {
            return Vec::new();
        };
        dedup_in_order(
            re.find_iter(text)
                .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION).to_string()),
        )
    }

    fn aliases(&self, text: &str) -> Vec<String> {
        let captures = [&self.alias_intro, &self.alias_honorific]
            .into_iter()
            .flatten()
            .flat_map(|re| re.captures_iter(text))
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| clean_alias(m.as_str()));
        dedup_in_order(captures)
    }

    fn organizations(&self, text: &str) -> Vec<String> {
        let Some(re) = &self.organization else {
            return Vec::new();
        };
        dedup_in_order(re.find_iter(text).filter_map(|m| clean_organization(m.as_str())))
    }
}

pub(super) fn compile(name: &str, pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!("Recognizer '{}' disabled, pattern failed to compile: {}", name, e);
            None
        }
    }
}

fn is_payment_handle(candidate: &str) -> bool {
    let Some((local, provider)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || provider.contains('@') {
        return false;
    }
    PAYMENT_PROVIDERS.contains(&provider) || is_mobile_shape(local)
}

/// A digit run that a caller would read as a mobile number, with or
/// without the country code.
fn is_phone_shaped(digits: &str) -> bool {
    is_mobile_shape(digits) || (digits.len() == 12 && normalize_phone(digits).is_some())
}

fn clean_alias(raw: &str) -> Option<String> {
    let words: Vec<&str> = raw
        .split_whitespace()
        .take_while(|w| !NAME_STOP_WORDS.contains(w))
        .collect();
    let name = words.join(" ");
    (name.len() > 2).then_some(name)
}

fn clean_organization(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('.');
    let words: Vec<&str> = trimmed
        .split_whitespace()
        .skip_while(|w| ORG_LEADING_NOISE.contains(w))
        .collect();
    // a bare suffix such as "Bank" is not an organization
    if words.len() < 2 {
        return None;
    }
    let name = words.join(" ");
    (name.len() > 5).then_some(name)
}

fn dedup_in_order<I: IntoIterator<Item = String>>(items: I) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intelligence::EntityKind;

    mod totality {
        use super::*;

        #[test]
        fn empty_text_yields_empty_set() {
            assert!(extract("").is_empty());
        }

        #[test]
        fn plain_text_yields_empty_set() {
            assert!(extract("hello, how are you doing today?").is_empty());
        }

        #[test]
        fn binary_looking_input_does_not_panic() {
            let noise = "\u{0}\u{1}@@@@ http:// +91 ₹₹₹ 𝔘𝔫𝔦𝔠𝔬𝔡𝔢 \u{FFFD}\u{7f}";
            let _ = extract(noise);
        }

        #[test]
        fn same_input_same_output() {
            let text = "Pay 9876543210@ybl or call +91 98765 43210 at https://kyc-help.in";
            assert_eq!(extract(text), extract(text));
        }
    }

    mod payment_handles {
        use super::*;

        #[test]
        fn known_provider_is_accepted_and_lowercased() {
            let set = extract("Pay to Scammer1@PayTM now.");
            assert!(set.payment_handles().contains("scammer1@paytm"));
        }

        #[test]
        fn phone_local_part_is_accepted_for_any_provider() {
            let set = extract("send to 9876543210@mybank");
            assert!(set.payment_handles().contains("9876543210@mybank"));
        }

        #[test]
        fn email_addresses_are_rejected() {
            let set = extract("mail support@gmail.com for help");
            assert_eq!(set.count(EntityKind::PaymentHandle), 0);
        }
    }

    mod phones {
        use super::*;

        #[test]
        fn formats_collapse_to_one_canonical_number() {
            let set = extract("Call +91 98765 43210 or 9876543210 or 91-98765-43210");
            assert_eq!(set.count(EntityKind::PhoneNumber), 1);
            assert!(set.phone_numbers().contains("+919876543210"));
        }

        #[test]
        fn landline_shapes_are_discarded() {
            let set = extract("office: 2245678901");
            assert_eq!(set.count(EntityKind::PhoneNumber), 0);
        }
    }

    mod bank_accounts {
        use super::*;

        #[test]
        fn account_pairs_with_routing_code() {
            let set = extract("Transfer to account 12345678901 IFSC SBIN0001234");
            let account = set.bank_account("12345678901").unwrap();
            assert_eq!(account.routing_code.as_deref(), Some("SBIN0001234"));
            assert_eq!(account.bank_name.as_deref(), Some("State Bank of India"));
        }

        #[test]
        fn pairing_is_positional() {
            let set = extract("A/c 111122223333 and 444455556666, IFSC HDFC0001111 then ICIC0002222");
            let accounts = set.bank_accounts();
            assert_eq!(accounts.len(), 2);
            assert_eq!(accounts[0].routing_code.as_deref(), Some("HDFC0001111"));
            assert_eq!(accounts[1].routing_code.as_deref(), Some("ICIC0002222"));
        }

        #[test]
        fn surplus_accounts_have_no_routing_code() {
            let set = extract("use 111122223333 or 444455556666 ifsc kkbk0000958");
            let accounts = set.bank_accounts();
            assert_eq!(accounts[0].routing_code.as_deref(), Some("KKBK0000958"));
            assert_eq!(accounts[1].routing_code, None);
            assert_eq!(accounts[1].bank_name, None);
        }

        #[test]
        fn unknown_routing_prefix_leaves_bank_name_absent() {
            let set = extract("acct 123456789012345 code ABCD0123456");
            let account = set.bank_account("123456789012345").unwrap();
            assert_eq!(account.routing_code.as_deref(), Some("ABCD0123456"));
            assert_eq!(account.bank_name, None);
        }

        #[test]
        fn phone_shaped_digits_are_not_accounts() {
            let set = extract("9876543210 and 919876543210");
            assert_eq!(set.count(EntityKind::BankAccount), 0);
            assert_eq!(set.count(EntityKind::PhoneNumber), 1);
        }

        #[test]
        fn repeated_account_appears_once() {
            let set = extract("12345678901, again 12345678901");
            assert_eq!(set.count(EntityKind::BankAccount), 1);
        }
    }

    mod links {
        use super::*;

        #[test]
        fn url_stops_at_quote_or_bracket() {
            let set = extract(r#"click "http://bit.ly/abc" or (https://kyc-verify.in/login)."#);
            assert!(set.phishing_links().contains("http://bit.ly/abc"));
            assert!(set.phishing_links().contains("https://kyc-verify.in/login"));
        }

        #[test]
        fn trailing_punctuation_is_trimmed() {
            let set = extract("Visit https://sbi-rewards.co/claim!");
            assert!(set.phishing_links().contains("https://sbi-rewards.co/claim"));
        }
    }

    mod names {
        use super::*;

        #[test]
        fn introductions_yield_aliases() {
            let set = extract("Hello sir, my name is Rahul Sharma and I am calling from the bank.");
            assert!(set.aliases().contains("Rahul Sharma"));
        }

        #[test]
        fn honorific_yields_alias() {
            let set = extract("Please speak to Mr. Verma for approval");
            assert!(set.aliases().contains("Verma"));
        }

        #[test]
        fn stop_words_are_not_names() {
            let set = extract("This is Sir speaking");
            assert_eq!(set.count(EntityKind::Alias), 0);
        }

        #[test]
        fn trailing_stop_word_is_cut() {
            let set = extract("this is Priya Please pay now");
            assert!(set.aliases().contains("Priya"));
        }
    }

    mod organizations {
        use super::*;

        #[test]
        fn corporate_suffix_marks_organization() {
            let set = extract("I am from Quick Cash Finance Pvt Ltd. Pay the fee.");
            assert!(set.organizations().contains("Quick Cash Finance Pvt Ltd"));
        }

        #[test]
        fn leading_greeting_is_stripped() {
            let set = extract("Welcome Lucky Star Enterprises customer");
            assert!(set.organizations().contains("Lucky Star Enterprises"));
        }

        #[test]
        fn bare_suffix_is_ignored() {
            let set = extract("Your Bank account is blocked");
            assert_eq!(set.count(EntityKind::Organization), 0);
        }
    }
}
