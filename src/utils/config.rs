//! Configuration and constants for the engine.

/// Width of one time bucket in milliseconds.
/// Every conversation is discretized into fixed 30-second intervals.
pub const INTERVAL_WIDTH_MS: u64 = 30_000;

/// Interval start offsets are reported in seconds (index * 30)
pub const INTERVAL_WIDTH_SECS: u64 = 30;

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Field names for conversation parsing (different transcription
// services wrap the utterance array under different keys)
pub const SEGMENT_FIELD_NAMES: &[&str] = &["utterances", "segments", "monologues", "turns"];
