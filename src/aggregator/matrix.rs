//! Matrix cell types, zeroed allocation, and the finalized view.
//!
//! The matrix is built in two phases: a [`HeatmapBuilder`] owns the cells
//! exclusively while the aggregation pass mutates them, then `finalize`
//! returns an immutable [`HeatmapMatrix`]. Nothing outside the aggregator
//! ever observes a partially populated or unnormalized matrix.

use crate::parser::SubUtterance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized metric values for one cell, each in [0, 1]
///
/// Every field is the cell's raw value divided by that metric's
/// matrix-wide maximum. A metric whose global maximum is zero stays zero
/// for every cell (never NaN).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellIntensity {
    pub count: f64,
    pub word_count: f64,
    pub density: f64,
    pub score: f64,
    pub frequency: f64,
    pub confidence: f64,
}

/// Aggregation unit for one (speaker, interval) pair
///
/// Raw accumulators stay available after normalization; the normalized
/// values live in `intensity`. The word map is a `BTreeMap` so iteration
/// order is fixed (lexicographic), which makes top-word tie-breaking
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub speaker: String,

    /// Interval start offset in seconds
    pub interval: u64,

    /// Number of segments whose time span overlaps this interval
    pub count: u64,

    /// Running word-count sum across overlapping segments
    pub word_count: f64,

    /// Running words-per-millisecond sum
    pub density: f64,

    pub score: f64,
    pub frequency: f64,
    pub confidence: f64,

    /// Lowercase token -> occurrence count; stopwords never appear here
    pub words: BTreeMap<String, u64>,

    /// Sub-utterances attributed to this speaker within this interval,
    /// kept for on-demand top-word recomputation
    pub utterances: Vec<SubUtterance>,

    /// Normalized metric values, populated during finalization
    pub intensity: CellIntensity,
}

impl Cell {
    /// Create a zero-valued cell for a (speaker, interval) pair
    fn zeroed(speaker: &str, interval: u64) -> Self {
        Self {
            speaker: speaker.to_string(),
            interval,
            ..Default::default()
        }
    }
}

/// Mutable speaker x interval grid, owned exclusively during aggregation
///
/// **Public** - constructed by `build_heatmap`; also usable directly when
/// the caller supplies its own speaker and interval lists.
#[derive(Debug, Clone)]
pub struct HeatmapBuilder {
    pub(crate) speakers: Vec<String>,
    pub(crate) intervals: Vec<u64>,
    pub(crate) rows: Vec<Vec<Cell>>,
}

impl HeatmapBuilder {
    /// Allocate the zeroed speaker-major cell grid
    ///
    /// Dimensions are fixed from here on: `speakers.len() x intervals.len()`
    /// cells, each with its own empty word map and utterance list.
    pub fn new(speakers: Vec<String>, intervals: Vec<u64>) -> Self {
        let rows = speakers
            .iter()
            .map(|speaker| {
                intervals
                    .iter()
                    .map(|&interval| Cell::zeroed(speaker, interval))
                    .collect()
            })
            .collect();

        Self {
            speakers,
            intervals,
            rows,
        }
    }

    /// Convert into the immutable post-aggregation view
    pub(crate) fn finalize(self) -> HeatmapMatrix {
        HeatmapMatrix {
            speakers: self.speakers,
            intervals: self.intervals,
            rows: self.rows,
        }
    }
}

/// Immutable, fully normalized speaker x interval matrix
///
/// **Public** - the engine's output contract. Read-only after
/// aggregation, so concurrent summarizer calls need no locking.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapMatrix {
    speakers: Vec<String>,
    intervals: Vec<u64>,
    rows: Vec<Vec<Cell>>,
}

impl HeatmapMatrix {
    /// Speakers in row order
    pub fn speakers(&self) -> &[String] {
        &self.speakers
    }

    /// Interval start offsets (seconds) in column order
    pub fn intervals(&self) -> &[u64] {
        &self.intervals
    }

    /// Speaker-major rows of cells
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Look up one cell by row and column index
    pub fn cell(&self, speaker_index: usize, interval_index: usize) -> Option<&Cell> {
        self.rows.get(speaker_index)?.get(interval_index)
    }

    /// Iterate over every cell in speaker-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// (rows, columns) dimensions
    pub fn dimensions(&self) -> (usize, usize) {
        (self.speakers.len(), self.intervals.len())
    }
}
