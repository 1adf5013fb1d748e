//! Email rules and live field feedback.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static STRICT_EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// How strictly an email address is checked.
///
/// Submission only requires an `@` while the blur feedback uses the full
/// pattern, so `a@b` submits but shows as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailRule {
    /// Non-empty and contains `@`.
    Basic,
    /// `local@domain.tld` with no whitespace or extra `@`.
    Strict,
}

impl EmailRule {
    /// Check a trimmed email address against this rule.
    pub fn accepts(self, email: &str) -> bool {
        match self {
            EmailRule::Basic => !email.is_empty() && email.contains('@'),
            EmailRule::Strict => STRICT_EMAIL
                .as_ref()
                .is_some_and(|re| re.is_match(email)),
        }
    }
}

/// Border state of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldFeedback {
    Neutral,
    Valid,
    Invalid,
}

/// Feedback for the email field when it loses focus.
pub fn email_feedback(email: &str) -> FieldFeedback {
    let email = email.trim();
    if email.is_empty() {
        FieldFeedback::Neutral
    } else if EmailRule::Strict.accepts(email) {
        FieldFeedback::Valid
    } else {
        FieldFeedback::Invalid
    }
}

/// Feedback for the confirmation field as the user types.
pub fn confirmation_feedback(password: &str, confirmation: &str) -> FieldFeedback {
    if confirmation.is_empty() {
        FieldFeedback::Neutral
    } else if password == confirmation {
        FieldFeedback::Valid
    } else {
        FieldFeedback::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_rule() {
        assert!(EmailRule::Basic.accepts("a@b"));
        assert!(EmailRule::Basic.accepts("@"));
        assert!(!EmailRule::Basic.accepts(""));
        assert!(!EmailRule::Basic.accepts("ab.com"));
    }

    #[test]
    fn test_strict_rule() {
        assert!(EmailRule::Strict.accepts("jane@example.com"));
        assert!(!EmailRule::Strict.accepts("a@b"));
        assert!(!EmailRule::Strict.accepts("a b@example.com"));
        assert!(!EmailRule::Strict.accepts("a@@example.com"));
    }

    #[test]
    fn test_rules_diverge() {
        assert!(EmailRule::Basic.accepts("a@b"));
        assert!(!EmailRule::Strict.accepts("a@b"));
    }

    #[test]
    fn test_email_feedback() {
        assert_eq!(email_feedback(""), FieldFeedback::Neutral);
        assert_eq!(email_feedback("   "), FieldFeedback::Neutral);
        assert_eq!(email_feedback(" jane@example.com "), FieldFeedback::Valid);
        assert_eq!(email_feedback("jane@"), FieldFeedback::Invalid);
    }

    #[test]
    fn test_confirmation_feedback() {
        assert_eq!(confirmation_feedback("secret", ""), FieldFeedback::Neutral);
        assert_eq!(confirmation_feedback("secret", "secret"), FieldFeedback::Valid);
        assert_eq!(confirmation_feedback("secret", "secre"), FieldFeedback::Invalid);
    }
}
