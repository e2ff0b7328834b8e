//! Aggregation of conversation segments into the speaker x interval matrix.
//!
//! This module transforms normalized segments into:
//! - The fixed interval sequence spanning the conversation
//! - A zeroed speaker-major cell grid
//! - A populated, max-normalized heatmap matrix
//! - Per-cell display summaries for interactive inspection

pub mod intervals;
pub mod matrix;
pub mod populate;
pub mod summary;
pub mod words;

// Re-export main types and functions
pub use intervals::{calculate_intervals, collect_speakers};
pub use matrix::{Cell, CellIntensity, HeatmapBuilder, HeatmapMatrix};
pub use populate::{build_heatmap, build_heatmap_with};
pub use summary::{calculate_top_word, format_clock_time, summarize_cell, CellSummary};
pub use words::{is_stopword, tokenize, STOPWORDS};
