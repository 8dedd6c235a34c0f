//! Submission controller: validation, honeypot, POST and banner feedback

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::error::SubmitError;
use super::traits::{CaptchaWidget, FormView, SubmitTransport};
use super::validation::{self, ValidationResult};
use crate::config::PLACEHOLDER_ENDPOINT;
use crate::state::BannerKind;

const CONFIG_ERROR_ON_LOAD: &str =
    "Configuration error: The form cannot be submitted. Please contact the administrator.";
const CONFIG_ERROR_ON_SUBMIT: &str = "Configuration error: Form cannot be submitted.";
const INVALID_FORM: &str = "Please correct the errors highlighted above.";
const SUBMITTING_LABEL: &str = "Submitting...";
const SUCCESS_MESSAGE: &str =
    "Thank you! We have received your submission. We will contact you shortly.";
const UNKNOWN_SERVER_ERROR: &str = "An unknown error occurred.";

/// Field names and endpoint the controller works with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    pub endpoint: Option<String>,
    pub email_field: String,
    pub honeypot_field: String,
    /// Name under which the widget token is posted
    pub captcha_field: String,
}

/// Result of a completed network exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success {
        message: String,
        submitted_at: DateTime<Utc>,
    },
    Error {
        message: String,
    },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            SubmissionOutcome::Success { message, .. } | SubmissionOutcome::Error { message } => {
                message
            }
        }
    }
}

/// What a single submit attempt did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReport {
    NotConfigured,
    HoneypotTripped,
    Invalid(ValidationResult),
    Completed(SubmissionOutcome),
}

/// JSON body returned by the endpoint on a 2xx status.
///
/// Any JSON value is accepted; only `result == "success"` counts as accepted.
#[derive(Debug)]
struct SubmissionReply(Value);

impl SubmissionReply {
    fn parse(body: &str) -> Result<Self, SubmitError> {
        Ok(Self(serde_json::from_str(body)?))
    }

    fn is_success(&self) -> bool {
        self.0.get("result").and_then(Value::as_str) == Some("success")
    }

    /// Server-supplied detail, falling back when it is missing or falsy
    fn error_detail(&self) -> String {
        match self.0.get("error") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Bool(true)) => "true".to_string(),
            Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
            Some(other @ (Value::Array(_) | Value::Object(_))) => other.to_string(),
            _ => UNKNOWN_SERVER_ERROR.to_string(),
        }
    }
}

/// Binds to a form and drives one submission at a time.
///
/// The submit control moves `idle -> submitting -> idle`; `submitting` is only
/// entered after validation passes and is always left once the exchange settles.
pub struct FormSubmissionController<V: FormView> {
    view: V,
    captcha: Option<Box<dyn CaptchaWidget>>,
    transport: Box<dyn SubmitTransport>,
    settings: ControllerSettings,
    /// Submit label as it was when the controller attached
    idle_label: String,
    submitting: bool,
}

impl<V: FormView> FormSubmissionController<V> {
    /// Bind to a form. A missing endpoint disables the submit control right away.
    pub fn attach(
        mut view: V,
        captcha: Option<Box<dyn CaptchaWidget>>,
        transport: Box<dyn SubmitTransport>,
        settings: ControllerSettings,
    ) -> Self {
        let idle_label = view.submit_label();
        let configured = is_configured(settings.endpoint.as_deref());
        if !configured {
            error!("Form endpoint URL is not set; submissions are disabled");
            view.set_banner(CONFIG_ERROR_ON_LOAD, BannerKind::Error);
            view.set_banner_visible(true);
            view.set_submit_enabled(false);
        }

        Self {
            view,
            captcha,
            transport,
            settings,
            idle_label,
            submitting: false,
        }
    }

    pub fn is_configured(&self) -> bool {
        is_configured(self.settings.endpoint.as_deref())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn captcha_token(&self) -> Option<String> {
        self.captcha
            .as_ref()
            .and_then(|widget| widget.token())
            .filter(|token| !token.is_empty())
    }

    fn reset_captcha(&mut self) {
        if let Some(widget) = self.captcha.as_mut() {
            widget.reset();
        }
    }

    fn show_banner(&mut self, text: &str, kind: BannerKind) {
        self.view.set_banner(text, kind);
        self.view.set_banner_visible(true);
    }

    /// Whether the hidden honeypot field was filled in
    fn honeypot_tripped(&self) -> bool {
        self.view
            .field_value(&self.settings.honeypot_field)
            .is_some_and(|value| !value.is_empty())
    }

    /// Run a full validation pass, writing inline errors into the form
    pub fn validate(&mut self) -> ValidationResult {
        validation::validate(
            &mut self.view,
            self.captcha.as_deref(),
            &self.settings.email_field,
        )
    }

    /// Clear the inline error of a required field as soon as it is edited
    pub fn on_field_input(&mut self, id: &str) {
        let required = self.view.required_field_ids().iter().any(|f| f == id);
        if required && self.view.error_visible(id) {
            self.view.clear_error(id);
            self.view.set_invalid(id, false);
        }
    }

    /// Handle one press of the submit control
    pub async fn submit(&mut self) -> SubmitReport {
        if !self.is_configured() {
            error!("Submit attempted without a configured endpoint");
            self.show_banner(CONFIG_ERROR_ON_SUBMIT, BannerKind::Error);
            return SubmitReport::NotConfigured;
        }

        if self.honeypot_tripped() {
            info!("Honeypot field filled, likely bot submission");
            return SubmitReport::HoneypotTripped;
        }

        let result = self.validate();
        if !result.is_valid() {
            debug!(errors = result.errors().len(), "Form failed validation");
            self.show_banner(INVALID_FORM, BannerKind::Error);
            if self.captcha_token().is_some() {
                self.reset_captcha();
            }
            return SubmitReport::Invalid(result);
        }

        self.enter_submitting();
        let exchanged = self.exchange().await;
        let outcome = match exchanged {
            Ok(reply) => self.apply_reply(reply),
            Err(err) => self.apply_failure(err),
        };
        self.leave_submitting();

        SubmitReport::Completed(outcome)
    }

    fn enter_submitting(&mut self) {
        self.submitting = true;
        self.view.set_submit_enabled(false);
        self.view.set_submit_label(SUBMITTING_LABEL);
        self.view.set_progress_visible(true);
        self.view.set_banner("", BannerKind::Neutral);
        self.view.set_banner_visible(false);
    }

    fn leave_submitting(&mut self) {
        self.view.set_submit_enabled(true);
        let label = self.idle_label.clone();
        self.view.set_submit_label(&label);
        self.view.set_progress_visible(false);
        self.view.set_banner_visible(true);
        self.submitting = false;
    }

    /// Form entries with the widget token filled in under its field name
    fn payload(&self) -> Vec<(String, String)> {
        let token = self.captcha_token().unwrap_or_default();
        let mut fields = self.view.entries();
        match fields
            .iter_mut()
            .find(|(name, _)| *name == self.settings.captcha_field)
        {
            Some((_, value)) => *value = token,
            None => fields.push((self.settings.captcha_field.clone(), token)),
        }
        fields
    }

    async fn exchange(&self) -> Result<SubmissionReply, SubmitError> {
        let url = self
            .settings
            .endpoint
            .as_deref()
            .ok_or(SubmitError::Configuration)?;
        let fields = self.payload();
        info!(url, fields = fields.len(), "Submitting form");

        let response = self.transport.post_form(url, fields).await?;
        debug!(status = response.status, body = %response.body, "Response from endpoint");

        if !response.is_success() {
            return Err(SubmitError::ServerRejected {
                status: response.status,
                body: response.body,
            });
        }

        SubmissionReply::parse(&response.body)
    }

    fn apply_reply(&mut self, reply: SubmissionReply) -> SubmissionOutcome {
        self.reset_captcha();
        if reply.is_success() {
            info!("Submission accepted");
            self.view.reset();
            self.view.set_banner(SUCCESS_MESSAGE, BannerKind::Success);
            SubmissionOutcome::Success {
                message: SUCCESS_MESSAGE.to_string(),
                submitted_at: Utc::now(),
            }
        } else {
            let detail = reply.error_detail();
            warn!(error = %detail, "Endpoint reported an error");
            let message = format!("Submission Error: {detail}");
            self.view.set_banner(&message, BannerKind::Error);
            SubmissionOutcome::Error { message }
        }
    }

    fn apply_failure(&mut self, err: SubmitError) -> SubmissionOutcome {
        error!(error = %err, "Submission process error");
        self.reset_captcha();
        let message = err.user_message().to_string();
        self.view.set_banner(&message, BannerKind::Error);
        SubmissionOutcome::Error { message }
    }
}

/// An endpoint is usable when it is set, non-blank and not the placeholder
pub fn is_configured(endpoint: Option<&str>) -> bool {
    endpoint.is_some_and(|url| !url.trim().is_empty() && url != PLACEHOLDER_ENDPOINT)
}
