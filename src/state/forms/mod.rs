//! Form domain layer
//!
//! The form model stands in for the page the controller is bound to:
//! field values, error regions, the submit control and the result banner.

mod field;
mod form_state;

pub use field::{FieldKind, FormField};
pub use form_state::{BannerKind, SharedForm, SubmissionForm, CAPTCHA_REGION};
