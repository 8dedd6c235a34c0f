//! Error taxonomy for the submission workflow

use thiserror::Error;

/// Failures that can end a submission attempt after validation passed
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The endpoint URL is unset or still the placeholder
    #[error("form endpoint is not configured")]
    Configuration,

    /// The request never produced an HTTP response
    #[error("network failure: {0}")]
    Network(String),

    /// The endpoint answered with a non-2xx status
    #[error("server rejected the submission (status {status}): {body}")]
    ServerRejected { status: u16, body: String },

    /// The endpoint answered 2xx but the body was not the expected JSON
    #[error("invalid response payload: {0}")]
    PayloadParse(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SubmitError {
    /// Banner text shown to the user for this failure category
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::Network(_) => {
                "Submission Failed: Please check your network connection and try again."
            }
            SubmitError::ServerRejected { .. } => {
                "Submission Failed: The server could not process the request. Please try again later."
            }
            SubmitError::PayloadParse(_) => {
                "Submission Failed: Received an invalid response from the server."
            }
            SubmitError::Configuration | SubmitError::Other(_) => {
                "Submission Failed: An unexpected error occurred."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_message_mentions_connection() {
        let err = SubmitError::Network("connection refused".to_string());
        assert!(err.user_message().contains("check your network connection"));
    }

    #[test]
    fn test_server_rejected_message() {
        let err = SubmitError::ServerRejected {
            status: 500,
            body: "boom".to_string(),
        };
        assert!(err.user_message().contains("server could not process"));
        let display = err.to_string();
        assert!(display.contains("500"));
        assert!(display.contains("boom"));
    }

    #[test]
    fn test_payload_parse_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err: SubmitError = parse_err.into();
        assert!(matches!(err, SubmitError::PayloadParse(_)));
        assert!(err.user_message().contains("invalid response"));
    }

    #[test]
    fn test_other_falls_back_to_generic() {
        let err = SubmitError::Other("weird".to_string());
        assert_eq!(
            err.user_message(),
            "Submission Failed: An unexpected error occurred."
        );
    }
}
