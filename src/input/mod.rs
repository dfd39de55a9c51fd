//! Input handling
//! Loads the ToR text and the selected CV files from disk

pub mod file_detector;
pub mod manager;

pub use manager::{InputManager, SelectedFile};
