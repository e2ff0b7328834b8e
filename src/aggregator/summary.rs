//! Cell summarizer: human-readable derived statistics for one cell.
//!
//! Pure and side-effect free. The matrix is immutable after aggregation,
//! so summaries can be produced repeatedly and concurrently (one per
//! inspection event) without locking.

use super::matrix::Cell;
use super::words::is_stopword;
use crate::parser::Segment;
use crate::utils::config::INTERVAL_WIDTH_MS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived display statistics for one cell
///
/// **Public** - the record handed to the rendering collaborator on
/// inspection; structured, not free-form markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSummary {
    pub speaker: String,

    /// Formatted `[start, end)` range, `HH:MM:SS - HH:MM:SS`
    pub time_range: String,

    /// Raw segment-overlap count
    pub count: u64,

    /// `count` as a percentage of all segments in the dataset,
    /// e.g. "12.50%" ("0.00%" when no dataset reference was supplied)
    pub percentage: String,

    /// Accumulated word count, rounded
    pub total_words: u64,

    /// Distinct non-stopword tokens in the cell's word map
    pub unique_words: u64,

    /// Most-used non-stopword token; empty string when the cell has none
    pub top_word: String,

    /// Normalized metrics formatted as percentages
    pub density: String,
    pub score: String,
    pub frequency: String,
    pub confidence: String,
}

/// Build the display record for one normalized cell
///
/// **Public** - main entry point for on-demand inspection
///
/// # Arguments
/// * `cell` - a cell from a finalized matrix
/// * `dataset` - optionally the full segment list, for whole-dataset
///   ratios (the count percentage)
pub fn summarize_cell(cell: &Cell, dataset: Option<&[Segment]>) -> CellSummary {
    let start_ms = cell.interval * 1_000;
    let end_ms = start_ms + INTERVAL_WIDTH_MS;

    let percentage = match dataset {
        Some(segments) if !segments.is_empty() => {
            format!("{:.2}%", (cell.count as f64 / segments.len() as f64) * 100.0)
        }
        _ => "0.00%".to_string(),
    };

    CellSummary {
        speaker: cell.speaker.clone(),
        time_range: format!("{} - {}", format_clock_time(start_ms), format_clock_time(end_ms)),
        count: cell.count,
        percentage,
        total_words: cell.word_count.round() as u64,
        unique_words: cell.words.len() as u64,
        top_word: calculate_top_word(cell),
        density: format_intensity(cell.intensity.density),
        score: format_intensity(cell.intensity.score),
        frequency: format_intensity(cell.intensity.frequency),
        confidence: format_intensity(cell.intensity.confidence),
    }
}

/// Resolve the cell's most-used non-stopword token
///
/// **Public** - also used by the analyze command's text summary
///
/// Merges the cell's own word map with tokens from its stored
/// utterances, summing counts per token. The maximum wins; ties keep the
/// first token in the merged map's fixed iteration order, which for a
/// `BTreeMap` is the lexicographically smallest.
pub fn calculate_top_word(cell: &Cell) -> String {
    let mut merged: BTreeMap<String, u64> = cell.words.clone();

    for sub in &cell.utterances {
        for raw in &sub.words {
            let word = raw.to_lowercase();
            if !word.is_empty() && !is_stopword(&word) {
                *merged.entry(word).or_insert(0) += 1;
            }
        }
    }

    let mut top_word = String::new();
    let mut max_count = 0;
    for (word, count) in &merged {
        if *count > max_count {
            max_count = *count;
            top_word = word.clone();
        }
    }

    top_word
}

/// Format a millisecond offset as `HH:MM:SS`
///
/// **Public** - shared time formatting
pub fn format_clock_time(milliseconds: u64) -> String {
    let total_seconds = milliseconds / 1_000;
    let hours = total_seconds / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format a normalized [0, 1] value as a percentage string
///
/// **Private** - internal formatting helper
fn format_intensity(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}
