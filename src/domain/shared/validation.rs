//! Input validation helpers

use once_cell::sync::Lazy;
use regex::Regex;

// E.164: leading +, then 7 to 15 digits, first digit nonzero
static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Check whether a destination number is E.164-shaped
pub fn is_valid_e164(phone_number: &str) -> bool {
    E164_REGEX.is_match(phone_number)
}

/// Check whether an email address is well-formed
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
