//! Transport to the remote analysis service

pub mod http;

use crate::error::SubmissionError;
use crate::form::SubmissionInput;
use crate::model::AnalysisResult;

pub use http::HttpBackend;

/// Path of the analysis endpoint, relative to the backend base URL.
pub const ANALYZE_PATH: &str = "/api/analyze-cv/";

/// Something that can score a submission.
pub trait AnalysisBackend {
    fn analyze(
        &self,
        input: &SubmissionInput,
    ) -> impl std::future::Future<Output = Result<AnalysisResult, SubmissionError>> + Send;
}

/// Join a base URL and the analysis path without doubling slashes.
pub fn analyze_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), ANALYZE_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_url() {
        assert_eq!(analyze_url("http://localhost:8000"), "http://localhost:8000/api/analyze-cv/");
        assert_eq!(analyze_url("https://api.example.org/"), "https://api.example.org/api/analyze-cv/");
    }
}
