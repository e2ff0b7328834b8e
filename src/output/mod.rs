//! Output writers for heatmap documents.
//!
//! This module handles turning a finalized matrix into its JSON artifact
//! and reading artifacts back for validation.

pub mod json;

// Re-export main functions
pub use json::{read_document, to_document, write_document};
