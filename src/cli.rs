//! CLI interface for the CV analyzer

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cv-analyzer")]
#[command(about = "Score a CV against a Terms of Reference")]
#[command(long_about = "Upload a Terms of Reference and a CV to the analysis service and render the scoring breakdown as a chart, a table and a summary")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a ToR and a CV for analysis
    #[command(group(ArgGroup::new("tor_source").args(["tor", "tor_file"])))]
    Analyze {
        /// Terms of Reference text
        #[arg(short, long)]
        tor: Option<String>,

        /// Read the Terms of Reference from a file
        #[arg(long)]
        tor_file: Option<PathBuf>,

        /// CV file (PDF, DOC, DOCX, TXT); only the first one is uploaded
        #[arg(long = "cv", num_args = 1..)]
        cv: Vec<PathBuf>,

        /// Declare the CV media type instead of deriving it from the extension
        #[arg(long)]
        cv_type: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Backend base URL, overriding config and environment
        #[arg(long)]
        backend_url: Option<String>,

        /// Include the detailed evaluation
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "backend.base_url")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("html"), Ok(OutputFormat::Html));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_analyze_accepts_multiple_cvs() {
        let cli = Cli::try_parse_from([
            "cv-analyzer", "analyze", "--tor", "M&E lead", "--cv", "a.pdf", "b.docx",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { tor, cv, .. } => {
                assert_eq!(tor.as_deref(), Some("M&E lead"));
                assert_eq!(cv, vec![PathBuf::from("a.pdf"), PathBuf::from("b.docx")]);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_tor_sources_conflict() {
        let parsed = Cli::try_parse_from([
            "cv-analyzer", "analyze", "--tor", "x", "--tor-file", "tor.txt", "--cv", "a.pdf",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_analyze_without_inputs_parses() {
        // Missing fields are reported by form validation, not by clap.
        let cli = Cli::try_parse_from(["cv-analyzer", "analyze"]).unwrap();
        assert!(matches!(cli.command, Commands::Analyze { ref cv, .. } if cv.is_empty()));
    }
}
