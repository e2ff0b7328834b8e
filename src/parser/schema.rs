//! Input record and output document schema definitions.
//!
//! Input records mirror what transcription services export: one JSON object
//! per utterance with loosely typed, partially optional fields. The output
//! document is the versioned JSON artifact handed to the rendering layer.

use crate::aggregator::{CellIntensity, CellSummary};
use serde::{Deserialize, Serialize};

/// A single word token inside an utterance record
#[derive(Debug, Clone, Deserialize)]
pub struct RawWord {
    pub text: String,
}

/// A nested sub-utterance: one speaker-attributed sub-span of a
/// conversation turn
#[derive(Debug, Clone, Deserialize)]
pub struct RawSubUtterance {
    #[serde(default)]
    pub speaker: Option<String>,

    #[serde(default)]
    pub speaker_name: Option<String>,

    #[serde(default)]
    pub words: Option<Vec<RawWord>>,

    #[serde(default)]
    pub text: Option<String>,
}

/// Raw utterance record as exported by transcription services
///
/// The speaker may arrive under `speaker` or `speaker_name`. Content is
/// either a structured word list, free-form text, or nested sub-utterances.
/// Precomputed metric fields, when present, override derivation downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUtterance {
    #[serde(default)]
    pub speaker: Option<String>,

    #[serde(default)]
    pub speaker_name: Option<String>,

    /// Start timestamp in milliseconds
    pub start: u64,

    /// End timestamp in milliseconds
    pub end: u64,

    #[serde(default)]
    pub words: Option<Vec<RawWord>>,

    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub utterances: Option<Vec<RawSubUtterance>>,

    #[serde(default)]
    pub word_count: Option<f64>,

    #[serde(default)]
    pub density: Option<f64>,

    #[serde(default)]
    pub score: Option<f64>,

    #[serde(default)]
    pub frequency: Option<f64>,

    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Top-level heatmap document written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Name of the conversation source (file name or identifier)
    pub source: String,

    /// Speakers in first-seen order (row order of the matrix)
    pub speakers: Vec<String>,

    /// Interval start offsets in seconds (column order of the matrix)
    pub intervals: Vec<u64>,

    /// Number of segments that fed the aggregation
    pub segment_count: u64,

    /// One record per (speaker, interval) cell, speaker-major order
    pub cells: Vec<CellRecord>,

    /// Timestamp when the document was generated
    pub generated_at: String,
}

/// One matrix cell as it appears in the output document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellRecord {
    pub speaker: String,

    /// Interval start offset in seconds
    pub interval: u64,

    /// Raw segment-overlap count
    pub count: u64,

    /// Normalized metric values in [0, 1]
    pub intensity: CellIntensity,

    /// Human-readable derived statistics
    pub summary: CellSummary,
}
