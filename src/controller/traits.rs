//! Collaborator traits for the submission controller, enabling fakes and mocks in tests

use crate::state::BannerKind;
use async_trait::async_trait;

use super::error::SubmitError;

/// Read/write access to the form the controller is bound to.
///
/// Error regions are addressed by field id; the region for field `email`
/// is conventionally rendered as `emailError`.
pub trait FormView: Send {
    /// Current value of a field, `None` if no such field exists
    fn field_value(&self, id: &str) -> Option<String>;

    /// Ids of every field marked required, in form order
    fn required_field_ids(&self) -> Vec<String>;

    /// Caption text associated with a field
    fn caption(&self, id: &str) -> Option<String>;

    /// Write an error message into the error region of `id` and show it
    fn show_error(&mut self, id: &str, message: &str);

    /// Empty and hide the error region of `id`
    fn clear_error(&mut self, id: &str);

    /// Whether the error region of `id` is currently displayed
    fn error_visible(&self, id: &str) -> bool;

    /// Set or remove the invalid mark on an input
    fn set_invalid(&mut self, id: &str, invalid: bool);

    /// Empty every error region and remove every invalid mark
    fn clear_all_errors(&mut self);

    /// All field name/value pairs, hidden fields included
    fn entries(&self) -> Vec<(String, String)>;

    /// Restore every field to its initial (empty) value
    fn reset(&mut self);

    fn submit_label(&self) -> String;
    fn set_submit_label(&mut self, label: &str);
    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_progress_visible(&mut self, visible: bool);

    fn set_banner(&mut self, text: &str, kind: BannerKind);
    fn set_banner_visible(&mut self, visible: bool);
}

/// Anti-bot challenge widget capability
#[cfg_attr(test, mockall::automock)]
pub trait CaptchaWidget: Send + Sync {
    /// Completion token, `None` until the challenge is solved
    fn token(&self) -> Option<String>;

    /// Discard the current token and present a fresh challenge
    fn reset(&mut self);
}

/// Raw HTTP response as seen by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for posting form data, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    /// POST the field pairs to `url` as a multipart body.
    ///
    /// Returns `Err(SubmitError::Network)` only when no response was received;
    /// HTTP error statuses come back as `Ok` with the status set.
    async fn post_form(
        &self,
        url: &str,
        fields: Vec<(String, String)>,
    ) -> Result<TransportResponse, SubmitError>;
}
