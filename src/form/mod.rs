//! Validated upload form
//!
//! Holds the Terms of Reference text and the files picked for the CV field,
//! checks them against a fixed schema and hands the validated pair to a
//! caller-supplied callback. Transport is the caller's business.

use crate::input::file_detector::{DOC, DOCX, PDF, TEXT};
use crate::input::SelectedFile;
use std::fmt;
use thiserror::Error;

pub const TOR_REQUIRED: &str = "Terms of Reference is required";
pub const CV_REQUIRED: &str = "Please select a CV file";
pub const CV_INVALID_TYPE: &str = "Invalid file type. Only PDF, DOC, DOCX, or TXT files are allowed";

/// Media types the CV field accepts.
pub const ALLOWED_MEDIA_TYPES: &[&str] = &[PDF, DOC, DOCX, TEXT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Tor,
    Cv,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Tor => write!(f, "tor"),
            Field::Cv => write!(f, "cv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Every field that failed validation, in form order.
#[derive(Error, Debug, Clone, PartialEq, Default)]
#[error("{}", join_errors(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Inline message for one field, if it failed.
    pub fn for_field(&self, field: Field) -> Option<&'static str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message)
    }

    fn push(&mut self, field: Field, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A validated submission, consumed by whoever performs the upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionInput {
    pub tor: String,
    pub cv: SelectedFile,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The callback ran with the validated values.
    Submitted,
    /// Validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// A submission is already in flight, so the control is inactive.
    Disabled,
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    tor: String,
    files: Vec<SelectedFile>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tor(mut self, tor: impl Into<String>) -> Self {
        self.tor = tor.into();
        self
    }

    pub fn with_files(mut self, files: Vec<SelectedFile>) -> Self {
        self.files = files;
        self
    }

    pub fn set_tor(&mut self, tor: impl Into<String>) {
        self.tor = tor.into();
    }

    pub fn select_files(&mut self, files: Vec<SelectedFile>) {
        self.files = files;
    }

    pub fn tor(&self) -> &str {
        &self.tor
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    /// Whether the submit control accepts activation.
    pub fn submit_enabled(loading: bool) -> bool {
        !loading
    }

    /// Check both fields without side effects.
    pub fn validate(&self) -> Result<SubmissionInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.tor.is_empty() {
            errors.push(Field::Tor, TOR_REQUIRED);
        }

        let cv = match self.files.first() {
            None => {
                errors.push(Field::Cv, CV_REQUIRED);
                None
            }
            Some(file) if !ALLOWED_MEDIA_TYPES.contains(&file.media_type.as_str()) => {
                errors.push(Field::Cv, CV_INVALID_TYPE);
                None
            }
            Some(file) => Some(file.clone()),
        };

        match cv {
            Some(cv) if errors.is_empty() => Ok(SubmissionInput {
                tor: self.tor.clone(),
                cv,
            }),
            _ => Err(errors),
        }
    }

    /// Validate and, if everything passes, hand the ToR and the first file to `on_submit`.
    pub fn submit<F>(&self, loading: bool, on_submit: F) -> SubmitOutcome
    where
        F: FnOnce(String, SelectedFile),
    {
        if !Self::submit_enabled(loading) {
            return SubmitOutcome::Disabled;
        }

        match self.validate() {
            Ok(input) => {
                on_submit(input.tor, input.cv);
                SubmitOutcome::Submitted
            }
            Err(errors) => SubmitOutcome::Invalid(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> SelectedFile {
        SelectedFile::new(name, PDF, b"%PDF-1.7".to_vec())
    }

    #[test]
    fn test_valid_form_submits_once() {
        let form = UploadForm::new()
            .with_tor("Senior M&E specialist, 10 years")
            .with_files(vec![pdf("cv.pdf")]);

        let mut calls = Vec::new();
        let outcome = form.submit(false, |tor, file| calls.push((tor, file)));

        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Senior M&E specialist, 10 years");
        assert_eq!(calls[0].1.file_name, "cv.pdf");
    }

    #[test]
    fn test_empty_tor_blocks_submission() {
        let form = UploadForm::new().with_files(vec![pdf("cv.pdf")]);

        let mut called = false;
        let outcome = form.submit(false, |_, _| called = true);

        assert!(!called);
        match outcome {
            SubmitOutcome::Invalid(errors) => {
                assert_eq!(errors.for_field(Field::Tor), Some(TOR_REQUIRED));
                assert_eq!(errors.for_field(Field::Cv), None);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_blocks_submission() {
        let form = UploadForm::new().with_tor("ToR");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.for_field(Field::Cv), Some(CV_REQUIRED));
    }

    #[test]
    fn test_disallowed_media_type_blocks_submission() {
        let png = SelectedFile::new("photo.png", "image/png", vec![0x89, 0x50]);
        let form = UploadForm::new().with_tor("ToR").with_files(vec![png]);

        let mut called = false;
        let outcome = form.submit(false, |_, _| called = true);

        assert!(!called);
        match outcome {
            SubmitOutcome::Invalid(errors) => {
                assert_eq!(errors.for_field(Field::Cv), Some(CV_INVALID_TYPE));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_both_fields_reported() {
        let errors = UploadForm::new().validate().unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert_eq!(errors.to_string(), "tor: Terms of Reference is required; cv: Please select a CV file");

        let err: crate::error::CvAnalyzerError = errors.into();
        assert!(err.to_string().starts_with("Validation failed: tor: "));
    }

    #[test]
    fn test_first_of_multiple_files_is_used() {
        let form = UploadForm::new()
            .with_tor("ToR")
            .with_files(vec![pdf("first.pdf"), pdf("second.pdf")]);

        let input = form.validate().unwrap();
        assert_eq!(input.cv.file_name, "first.pdf");
    }

    #[test]
    fn test_only_first_file_type_matters() {
        let png = SelectedFile::new("photo.png", "image/png", vec![]);
        let form = UploadForm::new()
            .with_tor("ToR")
            .with_files(vec![png, pdf("cv.pdf")]);

        assert!(form.validate().is_err());
    }

    #[test]
    fn test_submit_disabled_while_loading() {
        let form = UploadForm::new().with_tor("ToR").with_files(vec![pdf("cv.pdf")]);

        let mut calls = 0;
        for _ in 0..5 {
            let outcome = form.submit(true, |_, _| calls += 1);
            assert_eq!(outcome, SubmitOutcome::Disabled);
        }
        assert_eq!(calls, 0);
        assert!(!UploadForm::submit_enabled(true));
        assert!(UploadForm::submit_enabled(false));
    }

    #[test]
    fn test_every_allowed_type_passes() {
        for media_type in ALLOWED_MEDIA_TYPES {
            let file = SelectedFile::new("cv", *media_type, vec![]);
            let form = UploadForm::new().with_tor("ToR").with_files(vec![file]);
            assert!(form.validate().is_ok(), "{media_type} should be accepted");
        }
    }
}
