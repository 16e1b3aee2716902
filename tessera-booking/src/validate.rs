use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,6}$").expect("email pattern")
});

/// Black-box check that a requester identifier is acceptable.
///
/// The booking service only consumes the verdict; what counts as valid is
/// this collaborator's business.
pub trait RequesterValidator: Send + Sync {
    fn is_valid(&self, requester: &str) -> bool;
}

/// Default validator: email syntax.
#[derive(Debug, Default)]
pub struct EmailValidator;

impl RequesterValidator for EmailValidator {
    fn is_valid(&self, requester: &str) -> bool {
        EMAIL_REGEX.is_match(requester)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_addresses() {
        let validator = EmailValidator;
        assert!(validator.is_valid("guest@example.com"));
        assert!(validator.is_valid("first.last+tag@sub.domain.co"));
        assert!(validator.is_valid("UPPER@CASE.ORG"));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        let validator = EmailValidator;
        assert!(!validator.is_valid(""));
        assert!(!validator.is_valid("not-an-email"));
        assert!(!validator.is_valid("missing@tld"));
        assert!(!validator.is_valid("@example.com"));
        assert!(!validator.is_valid("two@@example.com"));
    }
}
