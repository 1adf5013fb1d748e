//! Signup form WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! passwordInput.oninput = () => {
//!   strengthText.textContent = password_strength_label(passwordInput.value) ?? '';
//! };
//! emailInput.onblur = () => {
//!   emailInput.dataset.state = email_feedback(emailInput.value);
//! };
//! form.onsubmit = async (e) => {
//!   e.preventDefault();
//!   try {
//!     showMessage(await submit_signup(readForm()), 'success');
//!   } catch (message) {
//!     showMessage(message, 'error');
//!   }
//! };
//! ```

use gloo_timers::future::TimeoutFuture;
use luvima_core::signup::{self, FieldFeedback, SignupForm, SignupSubmitter, StrengthLevel};
use luvima_core::SignupConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::{options_or_default, to_js_error};

/// Stand-in for a registration backend: waits, then succeeds.
struct SimulatedSubmitter {
    delay_ms: u32,
}

impl SignupSubmitter for SimulatedSubmitter {
    async fn submit(&self, _form: &SignupForm) -> Result<(), String> {
        TimeoutFuture::new(self.delay_ms).await;
        Ok(())
    }
}

fn feedback_name(feedback: FieldFeedback) -> &'static str {
    match feedback {
        FieldFeedback::Neutral => "neutral",
        FieldFeedback::Valid => "valid",
        FieldFeedback::Invalid => "invalid",
    }
}

fn level_name(level: StrengthLevel) -> &'static str {
    match level {
        StrengthLevel::Weak => "weak",
        StrengthLevel::Fair => "fair",
        StrengthLevel::Good => "good",
        StrengthLevel::Strong => "strong",
    }
}

/// Password strength score from 0 to 5.
#[wasm_bindgen]
pub fn password_strength(password: &str) -> u8 {
    signup::password_strength(password)
}

/// Strength level ("weak", "fair", "good", "strong"), or `undefined` for
/// an empty password.
#[wasm_bindgen]
pub fn password_strength_level(password: &str) -> Option<String> {
    StrengthLevel::of(password).map(|level| level_name(level).to_string())
}

/// Strength text such as "Fair password", or `undefined` for an empty
/// password.
#[wasm_bindgen]
pub fn password_strength_label(password: &str) -> Option<String> {
    StrengthLevel::of(password).map(|level| level.label().to_string())
}

/// Email field state on blur: "neutral", "valid" or "invalid".
#[wasm_bindgen]
pub fn email_feedback(email: &str) -> String {
    feedback_name(signup::email_feedback(email)).to_string()
}

/// Confirmation field state on input: "neutral", "valid" or "invalid".
#[wasm_bindgen]
pub fn confirmation_feedback(password: &str, confirmation: &str) -> String {
    feedback_name(signup::confirmation_feedback(password, confirmation)).to_string()
}

/// Check the form without submitting.
///
/// # Arguments
/// * `form` - `{ firstName, lastName, email, password, confirmPassword, agreeTerms }`
/// * `config` - Optional signup options
///
/// # Errors
/// Throws the first validation message.
#[wasm_bindgen]
pub fn validate_signup(form: JsValue, config: JsValue) -> Result<(), JsValue> {
    let form: SignupForm = serde_wasm_bindgen::from_value(form).map_err(to_js_error)?;
    let config: SignupConfig = options_or_default(config)?;
    form.validate(&config).map_err(to_js_error)
}

/// Validate and submit the form.
///
/// The promise resolves with the success message and rejects with the
/// message to show.
#[wasm_bindgen]
pub fn submit_signup(form: JsValue, config: JsValue) -> js_sys::Promise {
    future_to_promise(async move {
        let form: SignupForm = serde_wasm_bindgen::from_value(form).map_err(to_js_error)?;
        let config: SignupConfig = options_or_default(config)?;
        let submitter = SimulatedSubmitter {
            delay_ms: config.submit_delay_ms,
        };

        let message = signup::submit_signup(&form, &submitter, &config)
            .await
            .map_err(to_js_error)?;
        Ok(JsValue::from_str(message))
    })
}
