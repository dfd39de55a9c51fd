//! Multipart HTTP client for the analysis endpoint

use crate::client::{analyze_url, AnalysisBackend};
use crate::config::BackendConfig;
use crate::error::SubmissionError;
use crate::form::SubmissionInput;
use crate::model::AnalysisResult;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

#[derive(Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    url: String,
    timeout: Option<Duration>,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, SubmissionError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            url: analyze_url(&config.base_url),
            timeout: config.timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn build_form(input: &SubmissionInput) -> Result<Form, SubmissionError> {
        let cv = Part::bytes(input.cv.bytes.clone())
            .file_name(input.cv.file_name.clone())
            .mime_str(&input.cv.media_type)?;

        Ok(Form::new().text("tor", input.tor.clone()).part("cv", cv))
    }
}

impl AnalysisBackend for HttpBackend {
    async fn analyze(&self, input: &SubmissionInput) -> Result<AnalysisResult, SubmissionError> {
        let form = Self::build_form(input)?;

        info!("Uploading {} ({} bytes) to {}", input.cv.file_name, input.cv.len(), self.url);
        let mut request = self.http.post(&self.url).multipart(form);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Analysis service answered {}", status);
            return Err(SubmissionError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!("Received {} byte analysis response", body.len());

        Ok(AnalysisResult::from_json_slice(&body)?)
    }
}
