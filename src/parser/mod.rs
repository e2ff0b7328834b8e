//! Conversation ingestion and schema definitions.
//!
//! This module handles:
//! - Parsing raw conversation JSON into normalized segments
//! - Tolerating the duck-typed shapes transcription services export
//! - Defining the output document schema

pub mod conversation;
pub mod schema;

// Re-export main types
pub use conversation::{
    parse_conversation, PrecomputedMetrics, Segment, SegmentContent, SubUtterance,
};
pub use schema::{CellRecord, HeatmapDocument, RawSubUtterance, RawUtterance, RawWord};
