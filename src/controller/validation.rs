//! Client-side validation of the bound form

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use super::traits::{CaptchaWidget, FormView};
use crate::state::CAPTCHA_REGION;

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Label used when a required field has no caption
const FALLBACK_LABEL: &str = "Field";

/// A single user-correctable problem with the form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} is required.")]
    MissingField { label: String },

    #[error("Please enter a valid email address.")]
    InvalidEmailFormat,

    #[error("Please complete the CAPTCHA verification.")]
    CaptchaIncomplete,
}

/// Outcome of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<(String, ValidationError)>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors keyed by field id, in the order they were found
    pub fn errors(&self) -> &[(String, ValidationError)] {
        &self.errors
    }

    /// Message shown for a given field, if it failed
    pub fn message_for(&self, id: &str) -> Option<String> {
        self.errors
            .iter()
            .find(|(field, _)| field == id)
            .map(|(_, err)| err.to_string())
    }

    fn push(&mut self, id: &str, error: ValidationError) {
        self.errors.push((id.to_string(), error));
    }
}

/// Check a candidate value against the basic `local@domain.tld` shape
pub fn is_plausible_email(value: &str) -> bool {
    RE_EMAIL.is_match(value)
}

/// Human-readable label for a field: its caption without the first colon
fn field_label(view: &dyn FormView, id: &str) -> String {
    match view.caption(id) {
        Some(caption) => caption.replacen(':', "", 1).trim().to_string(),
        None => FALLBACK_LABEL.to_string(),
    }
}

fn report(
    view: &mut dyn FormView,
    result: &mut ValidationResult,
    id: &str,
    error: ValidationError,
) {
    view.show_error(id, &error.to_string());
    // The widget region is a container, not an input
    if id != CAPTCHA_REGION {
        view.set_invalid(id, true);
    }
    result.push(id, error);
}

/// Validate every field and the widget, writing errors back into the view.
///
/// Prior errors are cleared first, so calling this repeatedly is safe.
/// A missing widget counts as an incomplete challenge.
pub fn validate(
    view: &mut dyn FormView,
    captcha: Option<&dyn CaptchaWidget>,
    email_field: &str,
) -> ValidationResult {
    view.clear_all_errors();
    let mut result = ValidationResult::default();

    for id in view.required_field_ids() {
        let value = view.field_value(&id).unwrap_or_default();
        if value.trim().is_empty() {
            let label = field_label(view, &id);
            report(view, &mut result, &id, ValidationError::MissingField { label });
        }
    }

    if let Some(email) = view.field_value(email_field) {
        let email = email.trim();
        if !email.is_empty() && !is_plausible_email(email) {
            report(view, &mut result, email_field, ValidationError::InvalidEmailFormat);
        }
    }

    let token = captcha.and_then(|widget| widget.token()).unwrap_or_default();
    if token.is_empty() {
        report(view, &mut result, CAPTCHA_REGION, ValidationError::CaptchaIncomplete);
    }

    result
}
