//! Input manager for loading the CV and the Terms of Reference

use crate::error::{CvAnalyzerError, Result};
use crate::input::file_detector::FileType;
use log::{debug, info};
use std::path::Path;
use tokio::fs;

/// A file picked for upload, with the media type it is declared as.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

pub struct InputManager {
    declared_type: Option<String>,
}

impl InputManager {
    pub fn new() -> Self {
        Self { declared_type: None }
    }

    /// Declare every loaded file as `media_type` instead of guessing from the extension.
    pub fn with_declared_type(mut self, media_type: Option<String>) -> Self {
        self.declared_type = media_type;
        self
    }

    pub async fn load_file(&self, path: &Path) -> Result<SelectedFile> {
        if !path.exists() {
            return Err(CvAnalyzerError::InvalidInput(
                format!("File does not exist: {}", path.display())
            ));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| CvAnalyzerError::InvalidInput(
                format!("Not a file: {}", path.display())
            ))?;

        let media_type = match &self.declared_type {
            Some(declared) => declared.clone(),
            None => self.detect_file_type(path).media_type().to_string(),
        };

        let bytes = fs::read(path).await?;
        info!("Loaded {} ({} bytes, {})", file_name, bytes.len(), media_type);

        Ok(SelectedFile::new(file_name, media_type, bytes))
    }

    /// Load the first selected path. Later paths are never read.
    pub async fn load_first(&self, paths: &[impl AsRef<Path>]) -> Result<Option<SelectedFile>> {
        let Some((first, rest)) = paths.split_first() else {
            return Ok(None);
        };
        for ignored in rest {
            info!("Ignoring extra CV selection {}", ignored.as_ref().display());
        }
        self.load_file(first.as_ref()).await.map(Some)
    }

    pub async fn read_text(&self, path: &Path) -> Result<String> {
        debug!("Reading Terms of Reference from {}", path.display());
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }

    fn detect_file_type(&self, path: &Path) -> FileType {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .unwrap_or(FileType::Unknown)
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
