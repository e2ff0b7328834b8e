//! Interval calculation and speaker collection.
//!
//! A conversation's duration is discretized into fixed 30-second buckets
//! identified by their start offset in seconds (0, 30, 60, ...).

use crate::parser::Segment;
use crate::utils::config::{INTERVAL_WIDTH_MS, INTERVAL_WIDTH_SECS};
use crate::utils::error::AggregateError;
use log::debug;

/// Derive the ordered interval sequence spanning a conversation
///
/// **Public** - first stage of the aggregation pipeline
///
/// The sequence has `ceil(max(end) / 30000)` buckets covering
/// `[0, max(end)]`, clamped to at least one bucket so a non-empty
/// segment list never produces an empty matrix.
///
/// # Errors
/// * `AggregateError::EmptyDataset` - no segments; callers must not
///   proceed to allocate a matrix
pub fn calculate_intervals(segments: &[Segment]) -> Result<Vec<u64>, AggregateError> {
    if segments.is_empty() {
        return Err(AggregateError::EmptyDataset);
    }

    let max_end = segments.iter().map(|s| s.end).max().unwrap_or(0);
    let num_intervals = max_end.div_ceil(INTERVAL_WIDTH_MS).max(1);

    debug!(
        "Conversation spans {} ms -> {} intervals",
        max_end, num_intervals
    );

    Ok((0..num_intervals).map(|i| i * INTERVAL_WIDTH_SECS).collect())
}

/// Collect distinct speakers in first-seen order
///
/// **Public** - determines the row order of the matrix
///
/// Order is stable and deterministic: a single left-to-right scan.
pub fn collect_speakers(segments: &[Segment]) -> Vec<String> {
    let mut speakers: Vec<String> = Vec::new();

    for segment in segments {
        if !speakers.iter().any(|s| s == &segment.speaker) {
            speakers.push(segment.speaker.clone());
        }
    }

    debug!("Collected {} distinct speakers", speakers.len());

    speakers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{PrecomputedMetrics, SegmentContent};

    fn segment(speaker: &str, start: u64, end: u64) -> Segment {
        Segment {
            speaker: speaker.to_string(),
            start,
            end,
            content: SegmentContent::Empty,
            precomputed: PrecomputedMetrics::default(),
        }
    }

    #[test]
    fn test_intervals_cover_duration() {
        let segments = vec![segment("A", 0, 40_000), segment("B", 10_000, 65_000)];
        let intervals = calculate_intervals(&segments).unwrap();
        // ceil(65000 / 30000) = 3
        assert_eq!(intervals, vec![0, 30, 60]);
    }

    #[test]
    fn test_intervals_exact_boundary() {
        let segments = vec![segment("A", 0, 60_000)];
        let intervals = calculate_intervals(&segments).unwrap();
        assert_eq!(intervals, vec![0, 30]);
    }

    #[test]
    fn test_empty_dataset_is_fatal() {
        let result = calculate_intervals(&[]);
        assert!(matches!(result, Err(AggregateError::EmptyDataset)));
    }

    #[test]
    fn test_zero_duration_still_yields_one_interval() {
        let segments = vec![segment("A", 0, 0)];
        let intervals = calculate_intervals(&segments).unwrap();
        assert_eq!(intervals, vec![0]);
    }

    #[test]
    fn test_speakers_first_seen_order() {
        let segments = vec![
            segment("Therapist", 0, 1000),
            segment("Client", 1000, 2000),
            segment("Therapist", 2000, 3000),
        ];
        assert_eq!(collect_speakers(&segments), vec!["Therapist", "Client"]);
    }
}
