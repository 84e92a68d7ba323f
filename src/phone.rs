//! Kenyan phone-number validation and canonical formatting.
//!
//! Validity is decided by `phonenumber` (the libphonenumber port) against the
//! KE numbering plan; formatting is a fixed rule producing a single `+254…`
//! representation, independent of how the number was stored.

use phonenumber::country;

/// Region used when parsing numbers without an international prefix.
const REGION: country::Id = country::Id::KE;

/// Whether `raw` is a valid number under the Kenyan numbering plan.
/// Unparsable input is invalid, never an error.
pub fn is_valid_kenyan_number(raw: &str) -> bool {
    match phonenumber::parse(Some(REGION), raw) {
        Ok(parsed) => phonenumber::is_valid(&parsed),
        Err(_) => false,
    }
}

/// Canonical international form: a leading `+` passes through unchanged,
/// anything else has its leading zeros stripped and `+254` prefixed.
pub fn format_phone_number(raw: &str) -> String {
    if raw.starts_with('+') {
        return raw.to_string();
    }
    format!("+254{}", raw.trim_start_matches('0'))
}

/// Validity gate plus formatting. `None` means the number is dropped from the
/// recipient list.
pub fn normalize(raw: &str) -> Option<String> {
    is_valid_kenyan_number(raw).then(|| format_phone_number(raw))
}
