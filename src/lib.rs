//! CV analyzer library

pub mod cli;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod input;
pub mod model;
pub mod output;

pub use error::{CvAnalyzerError, Result};
pub use config::Config;
