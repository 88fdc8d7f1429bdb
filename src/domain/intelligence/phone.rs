//! Phone number canonicalisation.

/// Country calling code prepended to canonical numbers.
pub const COUNTRY_CODE: &str = "+91";

/// Normalises a raw phone-like string to `+91XXXXXXXXXX`.
///
/// Separators are stripped first. A leading `91` country code on a
/// twelve-digit value is dropped. What remains must be exactly ten digits
/// starting with 6-9; anything else is rejected rather than kept raw.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let national = if digits.len() == 12 && digits.starts_with("91") {
        &digits[2..]
    } else {
        digits.as_str()
    };

    if !is_mobile_shape(national) {
        return None;
    }
    Some(format!("{}{}", COUNTRY_CODE, national))
}

/// Ten ASCII digits with a leading 6, 7, 8 or 9.
pub fn is_mobile_shape(digits: &str) -> bool {
    digits.len() == 10
        && digits.bytes().all(|b| b.is_ascii_digit())
        && matches!(digits.as_bytes()[0], b'6'..=b'9')
}
