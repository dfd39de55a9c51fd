//! Result rendering
//! Builds the chart, breakdown table and summary, and formats them for output

pub mod formatter;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::RenderedResult;
