//! Signup form validation and submission.
//!
//! Validation checks run in a fixed order and the first failure is the
//! message shown to the user:
//!
//! 1. Full name
//! 2. Email (loose check, see [`EmailRule`])
//! 3. Password length
//! 4. Password confirmation
//! 5. Terms accepted
//! 6. Password strength
//!
//! Submission goes through a [`SignupSubmitter`] so the transport can be
//! swapped out.

mod feedback;
mod strength;

pub use feedback::{confirmation_feedback, email_feedback, EmailRule, FieldFeedback};
pub use strength::{password_length, password_strength, StrengthLevel, MAX_SCORE, STRONG_LENGTH};

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SignupConfig;

/// Shown after a successful submission.
pub const SUCCESS_MESSAGE: &str = "Account created successfully! Welcome aboard!";

/// Reasons a signup is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("Please enter your full name")]
    MissingName,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please agree to the terms and conditions")]
    TermsNotAccepted,

    #[error("Please choose a stronger password")]
    WeakPassword { score: u8 },

    /// The submitter reported a failure.
    #[error("Registration failed. Please try again.")]
    SubmitFailed(String),
}

/// The signup form fields as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_terms: bool,
}

impl SignupForm {
    /// Copy of the form with names and email trimmed. Passwords are kept
    /// exactly as typed.
    pub fn normalized(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self.clone()
        }
    }

    /// Run the checks in order, returning the first failure.
    pub fn validate(&self, config: &SignupConfig) -> Result<(), SignupError> {
        let form = self.normalized();

        if form.first_name.is_empty() || form.last_name.is_empty() {
            return Err(SignupError::MissingName);
        }

        if !EmailRule::Basic.accepts(&form.email) {
            return Err(SignupError::InvalidEmail);
        }

        if password_length(&form.password) < config.min_password_length {
            return Err(SignupError::PasswordTooShort {
                min: config.min_password_length,
            });
        }

        if form.password != form.confirm_password {
            return Err(SignupError::PasswordMismatch);
        }

        if !form.agree_terms {
            return Err(SignupError::TermsNotAccepted);
        }

        let score = password_strength(&form.password);
        if score < config.min_password_strength {
            return Err(SignupError::WeakPassword { score });
        }

        Ok(())
    }
}

/// Where a validated signup is sent.
pub trait SignupSubmitter {
    /// Submit the form; an `Err` carries a diagnostic for the log.
    fn submit(&self, form: &SignupForm) -> impl Future<Output = Result<(), String>>;
}

/// Validate `form` and hand it to `submitter`.
///
/// Returns the message to show on success.
pub async fn submit_signup<S: SignupSubmitter>(
    form: &SignupForm,
    submitter: &S,
    config: &SignupConfig,
) -> Result<&'static str, SignupError> {
    form.validate(config)?;

    let form = form.normalized();
    log::info!("submitting signup for {}", form.email);

    match submitter.submit(&form).await {
        Ok(()) => Ok(SUCCESS_MESSAGE),
        Err(reason) => {
            log::warn!("signup submission failed: {reason}");
            Err(SignupError::SubmitFailed(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn valid_form() -> SignupForm {
        SignupForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "Abc12345!".to_string(),
            confirm_password: "Abc12345!".to_string(),
            agree_terms: true,
        }
    }

    fn validate(form: &SignupForm) -> Result<(), SignupError> {
        form.validate(&SignupConfig::default())
    }

    struct RecordingSubmitter {
        fail: bool,
        seen: RefCell<Vec<SignupForm>>,
    }

    impl RecordingSubmitter {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl SignupSubmitter for RecordingSubmitter {
        async fn submit(&self, form: &SignupForm) -> Result<(), String> {
            self.seen.borrow_mut().push(form.clone());
            if self.fail {
                Err("503".to_string())
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_valid_form() {
        assert_eq!(validate(&valid_form()), Ok(()));
    }

    #[test]
    fn test_missing_name() {
        let mut form = valid_form();
        form.last_name = "   ".to_string();
        let err = validate(&form).unwrap_err();
        assert_eq!(err.to_string(), "Please enter your full name");
    }

    #[test]
    fn test_invalid_email() {
        let mut form = valid_form();
        form.email = "ada.example.com".to_string();
        let err = validate(&form).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email address");
    }

    #[test]
    fn test_loose_email_passes_submit_check() {
        let mut form = valid_form();
        form.email = "a@b".to_string();
        assert_eq!(validate(&form), Ok(()));
        assert_eq!(email_feedback(&form.email), FieldFeedback::Invalid);
    }

    #[test]
    fn test_short_password() {
        let mut form = valid_form();
        form.password = "Ab1!".to_string();
        form.confirm_password = "Ab1!".to_string();
        let err = validate(&form).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Password must be at least 8 characters long"
        );
    }

    #[test]
    fn test_length_counts_utf16_units() {
        let mut form = valid_form();
        form.password = "Ab1😀😀😀".to_string();
        form.confirm_password = form.password.clone();
        assert!(validate(&form).is_ok());

        form.password = "Ab1😀".to_string();
        form.confirm_password = form.password.clone();
        assert!(matches!(
            validate(&form),
            Err(SignupError::PasswordTooShort { min: 8 })
        ));
    }

    #[test]
    fn test_password_mismatch() {
        let mut form = valid_form();
        form.confirm_password = "Abc12345?".to_string();
        let err = validate(&form).unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn test_passwords_are_not_trimmed() {
        let mut form = valid_form();
        form.confirm_password = "Abc12345! ".to_string();
        assert_eq!(validate(&form), Err(SignupError::PasswordMismatch));
    }

    #[test]
    fn test_terms_required() {
        let mut form = valid_form();
        form.agree_terms = false;
        let err = validate(&form).unwrap_err();
        assert_eq!(err.to_string(), "Please agree to the terms and conditions");
    }

    #[test]
    fn test_weak_password() {
        let mut form = valid_form();
        form.password = "abcdefgh".to_string();
        form.confirm_password = "abcdefgh".to_string();
        let err = validate(&form).unwrap_err();
        assert_eq!(err, SignupError::WeakPassword { score: 2 });
        assert_eq!(err.to_string(), "Please choose a stronger password");
    }

    #[test]
    fn test_first_failure_wins() {
        let form = SignupForm::default();
        assert_eq!(validate(&form), Err(SignupError::MissingName));

        let mut form = valid_form();
        form.email = String::new();
        form.agree_terms = false;
        assert_eq!(validate(&form), Err(SignupError::InvalidEmail));
    }

    #[test]
    fn test_config_min_length() {
        let config = SignupConfig {
            min_password_length: 12,
            ..SignupConfig::default()
        };
        let err = valid_form().validate(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Password must be at least 12 characters long"
        );
    }

    #[test]
    fn test_submit_success() {
        let submitter = RecordingSubmitter::new(false);
        let mut form = valid_form();
        form.email = "  ada@example.com ".to_string();

        let message =
            pollster::block_on(submit_signup(&form, &submitter, &SignupConfig::default()))
                .unwrap();

        assert_eq!(message, "Account created successfully! Welcome aboard!");
        assert_eq!(submitter.seen.borrow()[0].email, "ada@example.com");
    }

    #[test]
    fn test_submit_failure_message() {
        let submitter = RecordingSubmitter::new(true);
        let err = pollster::block_on(submit_signup(
            &valid_form(),
            &submitter,
            &SignupConfig::default(),
        ))
        .unwrap_err();

        assert_eq!(err.to_string(), "Registration failed. Please try again.");
    }

    #[test]
    fn test_invalid_form_never_submitted() {
        let submitter = RecordingSubmitter::new(false);
        let mut form = valid_form();
        form.agree_terms = false;

        let result =
            pollster::block_on(submit_signup(&form, &submitter, &SignupConfig::default()));

        assert_eq!(result, Err(SignupError::TermsNotAccepted));
        assert!(submitter.seen.borrow().is_empty());
    }

    #[test]
    fn test_form_deserializes_camel_case() {
        let form: SignupForm = serde_json::from_str(
            r#"{"firstName":"Ada","lastName":"L","email":"a@b.c","agreeTerms":true}"#,
        )
        .unwrap();
        assert_eq!(form.first_name, "Ada");
        assert!(form.agree_terms);
        assert!(form.password.is_empty());
    }
}
