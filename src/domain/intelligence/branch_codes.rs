//! Bank lookup by branch routing code prefix.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static BANKS_BY_PREFIX: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("SBIN", "State Bank of India"),
        ("HDFC", "HDFC Bank"),
        ("ICIC", "ICICI Bank"),
        ("AXIS", "Axis Bank"),
        ("UTIB", "Axis Bank"),
        ("PUNB", "Punjab National Bank"),
        ("UBIN", "Union Bank of India"),
        ("CNRB", "Canara Bank"),
        ("BARB", "Bank of Baroda"),
        ("IDIB", "Indian Bank"),
        ("IOBA", "Indian Overseas Bank"),
        ("KKBK", "Kotak Mahindra Bank"),
        ("YESB", "Yes Bank"),
    ])
});

/// Resolves the bank behind a routing code from its first four characters.
///
/// Returns `None` for short codes and unknown prefixes.
pub fn bank_name_for(routing_code: &str) -> Option<&'static str> {
    let prefix = routing_code.get(..4)?.to_ascii_uppercase();
    BANKS_BY_PREFIX.get(prefix.as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_prefixes_case_insensitively() {
        assert_eq!(bank_name_for("SBIN0001234"), Some("State Bank of India"));
        assert_eq!(bank_name_for("kkbk0000958"), Some("Kotak Mahindra Bank"));
        assert_eq!(bank_name_for("UTIB0000001"), Some("Axis Bank"));
    }

    #[test]
    fn unknown_or_short_codes_resolve_to_none() {
        assert_eq!(bank_name_for("ABCD0123456"), None);
        assert_eq!(bank_name_for("SB"), None);
        assert_eq!(bank_name_for(""), None);
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        assert_eq!(bank_name_for("₹₹₹₹0001234"), None);
    }
}
