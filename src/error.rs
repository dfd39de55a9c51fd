//! Error handling for the CV analyzer

use crate::form::ValidationErrors;
use thiserror::Error;

/// Message shown when the analysis service answers with a non-success status.
pub const HTTP_FAILURE_MESSAGE: &str = "Failed to analyze CV";

/// Fallback message for failures that carry no text of their own.
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "An unexpected error occurred";

#[derive(Error, Debug)]
pub enum CvAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Submission(#[from] SubmissionError),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

/// Failures of a single submission round trip.
///
/// The `Display` text of each variant is what ends up as the page-level
/// error message. The HTTP status variant does not include the code.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("{}", HTTP_FAILURE_MESSAGE)]
    HttpStatus(u16),

    #[error("{0}")]
    Transport(String),

    #[error(transparent)]
    ResponseShape(#[from] ResponseShapeError),
}

impl SubmissionError {
    /// Message to surface to the user, never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNEXPECTED_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        SubmissionError::Transport(err.to_string())
    }
}

/// The service answered 2xx but the body is not a usable analysis result.
#[derive(Error, Debug)]
pub enum ResponseShapeError {
    #[error("Malformed analysis response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Score out of range for {field}: {value} (expected 0-100)")]
    ScoreOutOfRange { field: String, value: f64 },
}

pub type Result<T> = std::result::Result<T, CvAnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_hides_code() {
        let err = SubmissionError::HttpStatus(500);
        assert_eq!(err.user_message(), "Failed to analyze CV");
    }

    #[test]
    fn test_empty_transport_message_falls_back() {
        let err = SubmissionError::Transport(String::new());
        assert_eq!(err.user_message(), UNEXPECTED_FAILURE_MESSAGE);

        let err = SubmissionError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), "connection refused");
    }
}
