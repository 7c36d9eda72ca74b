//! Local checks run before a contact message leaves the client.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::domain::ContactFields;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.][^\s@]*\.[^\s@]+$").expect("email shape pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter your message")]
    MissingMessage,
}

pub fn is_email_shaped(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Returns the first failing rule, checked in name, email, message order.
pub fn validate(fields: &ContactFields) -> Result<(), ValidationError> {
    if fields.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if fields.email.trim().is_empty() || !is_email_shaped(&fields.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if fields.message.trim().is_empty() {
        return Err(ValidationError::MissingMessage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, message: &str) -> ContactFields {
        ContactFields::new(name, email, message)
    }

    #[test]
    fn empty_name_is_reported_first() {
        let err = validate(&fields("", "not-an-email", "")).expect_err("should fail");
        assert_eq!(err, ValidationError::MissingName);
        assert_eq!(err.to_string(), "Please enter your name");
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let err = validate(&fields("   ", "a@b.com", "hi")).expect_err("should fail");
        assert_eq!(err, ValidationError::MissingName);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let err = validate(&fields("A", "not-an-email", "hi")).expect_err("should fail");
        assert_eq!(err.to_string(), "Please enter a valid email address");
    }

    #[test]
    fn blank_message_is_rejected() {
        let err = validate(&fields("A", "a@b.com", " ")).expect_err("should fail");
        assert_eq!(err.to_string(), "Please enter your message");
    }

    #[test]
    fn complete_fields_pass() {
        validate(&fields("A", "a@b.com", "hi")).expect("valid");
    }

    #[test]
    fn email_shape_cases() {
        assert!(is_email_shaped("ada@example.org"));
        assert!(is_email_shaped("first.last@mail.example.co"));
        assert!(!is_email_shaped("ada@example"));
        assert!(!is_email_shaped("@example.org"));
        assert!(!is_email_shaped("ada@@example.org"));
        assert!(!is_email_shaped(" ada@example.org"));
        assert!(!is_email_shaped("ada @example.org"));
        assert!(!is_email_shaped("ada@example."));
        assert!(!is_email_shaped("a@.b.c"));
        assert!(!is_email_shaped("a@..com"));
    }
}
