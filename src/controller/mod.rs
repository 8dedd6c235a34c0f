//! Form submission controller and its collaborator seams

mod error;
mod submission;
mod traits;
mod validation;

pub use error::SubmitError;
pub use submission::{
    ControllerSettings, FormSubmissionController, SubmissionOutcome, SubmitReport,
};
pub use traits::{CaptchaWidget, FormView, SubmitTransport, TransportResponse};

#[cfg(test)]
pub use traits::{MockCaptchaWidget, MockSubmitTransport};
