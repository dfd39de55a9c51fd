//! Declared media type detection for selected files

pub const PDF: &str = "application/pdf";
pub const DOC: &str = "application/msword";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extensions offered by the CV picker.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Pdf,
    Doc,
    Docx,
    Text,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "doc" => FileType::Doc,
            "docx" => FileType::Docx,
            "txt" => FileType::Text,
            _ => FileType::Unknown,
        }
    }

    /// Media type a browser-style picker would declare for this file.
    pub fn media_type(&self) -> &'static str {
        match self {
            FileType::Pdf => PDF,
            FileType::Doc => DOC,
            FileType::Docx => DOCX,
            FileType::Text => TEXT,
            FileType::Unknown => OCTET_STREAM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(FileType::from_extension("PDF").media_type(), PDF);
        assert_eq!(FileType::from_extension("doc").media_type(), DOC);
        assert_eq!(FileType::from_extension("docx").media_type(), DOCX);
        assert_eq!(FileType::from_extension("txt").media_type(), TEXT);
        assert_eq!(FileType::from_extension("png"), FileType::Unknown);
    }
}
