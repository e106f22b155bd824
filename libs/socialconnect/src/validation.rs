//! Surface-syntax validators for destinations.
//!
//! Format checks only: no MX lookup, no carrier lookup.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

static PHONE_SEPARATORS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-()]+").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{9,14}$").unwrap());

/// Check email address surface syntax.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && EMAIL_RE.is_match(email)
}

/// Check phone number surface syntax.
///
/// Common separators (spaces, dashes, parentheses) are stripped first; the
/// remainder must be 10-15 digits with an optional leading `+`.
pub fn is_valid_phone_number(phone: &str) -> bool {
    let phone = phone.trim();
    if phone.is_empty() {
        return false;
    }
    let cleaned = PHONE_SEPARATORS_RE.replace_all(phone, "");
    PHONE_RE.is_match(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in [
            "test@example.com",
            "user.name@domain.co.uk",
            "user+tag@example.org",
            "123@test.com",
            "  padded@example.com  ",
        ] {
            assert!(is_valid_email(email), "expected valid: {email}");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["invalid", "@example.com", "test@", "test@domain", "", "a b@c.com"] {
            assert!(!is_valid_email(email), "expected invalid: {email}");
        }
    }

    #[test]
    fn test_valid_phone_numbers() {
        for phone in [
            "+1234567890",
            "+44 20 7946 0958",
            "+1 (555) 123-4567",
            "+201234567890",
            "9876543210",
        ] {
            assert!(is_valid_phone_number(phone), "expected valid: {phone}");
        }
    }

    #[test]
    fn test_invalid_phone_numbers() {
        for phone in ["123", "+1234", "invalid", "", "+0123456789", "+123456789012345678"] {
            assert!(!is_valid_phone_number(phone), "expected invalid: {phone}");
        }
    }
}
