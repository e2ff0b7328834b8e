//! The core aggregation pass.
//!
//! Consumes normalized segments, assigns each to every interval its time
//! span overlaps, accumulates per-cell metrics, then normalizes every
//! metric against its matrix-wide maximum. The matrix is exposed only
//! after normalization completes.

use super::intervals::{calculate_intervals, collect_speakers};
use super::matrix::{Cell, CellIntensity, HeatmapBuilder, HeatmapMatrix};
use super::words::{is_stopword, tokenize};
use crate::parser::{Segment, SegmentContent, SubUtterance};
use crate::utils::config::INTERVAL_WIDTH_MS;
use crate::utils::error::AggregateError;
use log::debug;

/// Run the full aggregation pipeline over a conversation
///
/// **Public** - main entry point for the engine
///
/// Derives intervals and speakers from the segments themselves, then
/// populates and normalizes the matrix. Atomic from the caller's
/// perspective: no partial state is ever observable.
///
/// # Errors
/// * `AggregateError::EmptyDataset` - empty segment list; no matrix is
///   allocated
pub fn build_heatmap(segments: &[Segment]) -> Result<HeatmapMatrix, AggregateError> {
    let intervals = calculate_intervals(segments)?;
    let speakers = collect_speakers(segments);
    Ok(build_heatmap_with(segments, speakers, intervals))
}

/// Run the aggregation pipeline with caller-supplied speaker and
/// interval lists
///
/// **Public** - used when the axes come from elsewhere (e.g. a shared
/// speaker roster). Segments attributed to a speaker absent from the
/// list are skipped silently.
pub fn build_heatmap_with(
    segments: &[Segment],
    speakers: Vec<String>,
    intervals: Vec<u64>,
) -> HeatmapMatrix {
    debug!(
        "Aggregating {} segments into a {} x {} matrix",
        segments.len(),
        speakers.len(),
        intervals.len()
    );

    let mut builder = HeatmapBuilder::new(speakers, intervals);
    let maxima = populate(&mut builder, segments);
    normalize(&mut builder, &maxima);
    builder.finalize()
}

/// Running per-metric global maxima, tracked as cells are written
#[derive(Debug, Default)]
struct FieldMaxima {
    count: u64,
    word_count: f64,
    density: f64,
    score: f64,
    frequency: f64,
    confidence: f64,
}

impl FieldMaxima {
    fn observe(&mut self, cell: &Cell) {
        self.count = self.count.max(cell.count);
        self.word_count = self.word_count.max(cell.word_count);
        self.density = self.density.max(cell.density);
        self.score = self.score.max(cell.score);
        self.frequency = self.frequency.max(cell.frequency);
        self.confidence = self.confidence.max(cell.confidence);
    }
}

/// Accumulate every segment into the matrix
///
/// **Private** - internal to the pipeline; the builder never escapes
/// mid-pass
fn populate(builder: &mut HeatmapBuilder, segments: &[Segment]) -> FieldMaxima {
    let mut maxima = FieldMaxima::default();

    if builder.intervals.is_empty() {
        return maxima;
    }
    let last_index = builder.intervals.len() - 1;

    for segment in segments {
        // Unknown speakers are skipped, not errors: protects against
        // inconsistent speaker naming across fields
        let Some(speaker_index) = builder.speakers.iter().position(|s| s == &segment.speaker)
        else {
            debug!("Skipping segment for unknown speaker '{}'", segment.speaker);
            continue;
        };

        let word_count = derive_word_count(segment);
        let density = derive_density(segment, word_count);
        let score = segment.precomputed.score.unwrap_or(0.0);
        let frequency = segment.precomputed.frequency.unwrap_or(0.0);
        let confidence = segment.precomputed.confidence.unwrap_or(0.0);

        let tokens = content_tokens(segment);
        let matching_subs: Vec<&SubUtterance> = match &segment.content {
            SegmentContent::Utterances(subs) => subs
                .iter()
                .filter(|sub| sub.speaker == segment.speaker)
                .collect(),
            _ => Vec::new(),
        };

        // A segment crossing interval boundaries increments EVERY
        // interval it overlaps (inclusive range), not just its start
        // interval: the speaker was active during each of those buckets.
        let start_index = (segment.start / INTERVAL_WIDTH_MS) as usize;
        let end_index = (segment.end.div_ceil(INTERVAL_WIDTH_MS) as usize).min(last_index);

        for interval_index in start_index..=end_index {
            let cell = &mut builder.rows[speaker_index][interval_index];

            cell.count += 1;
            cell.word_count += word_count;
            cell.density += density;
            cell.score += score;
            cell.frequency += frequency;
            cell.confidence += confidence;

            for token in &tokens {
                *cell.words.entry(token.clone()).or_insert(0) += 1;
            }

            for sub in &matching_subs {
                for raw in &sub.words {
                    let word = raw.to_lowercase();
                    if !word.is_empty() && !is_stopword(&word) {
                        *cell.words.entry(word).or_insert(0) += 1;
                    }
                }
                cell.utterances.push((*sub).clone());
            }

            maxima.observe(cell);
        }
    }

    maxima
}

/// Word-count contribution: explicit value wins, otherwise derived from
/// the segment's content shape
///
/// **Private** - internal helper for populate
fn derive_word_count(segment: &Segment) -> f64 {
    if let Some(explicit) = segment.precomputed.word_count {
        return explicit.max(0.0);
    }

    match &segment.content {
        SegmentContent::Words(words) => words.len() as f64,
        SegmentContent::Text(text) => tokenize(text).len() as f64,
        SegmentContent::Utterances(subs) => subs
            .iter()
            .filter(|sub| sub.speaker == segment.speaker)
            .map(|sub| sub.words.len())
            .sum::<usize>() as f64,
        SegmentContent::Empty => 0.0,
    }
}

/// Density contribution in words per millisecond
///
/// **Private** - zero-duration segments contribute 0 rather than
/// dividing by zero
fn derive_density(segment: &Segment, word_count: f64) -> f64 {
    if let Some(explicit) = segment.precomputed.density {
        return explicit.max(0.0);
    }

    let duration = segment.end.saturating_sub(segment.start);
    if duration == 0 {
        0.0
    } else {
        word_count / duration as f64
    }
}

/// Stopword-filtered lowercase tokens from the segment's own content
///
/// **Private** - explicit word lists are case-folded whole, never
/// re-split; free text falls back to word-boundary extraction.
/// Sub-utterance tokens are handled separately per attributed speaker.
fn content_tokens(segment: &Segment) -> Vec<String> {
    let tokens: Vec<String> = match &segment.content {
        SegmentContent::Words(words) => words.iter().map(|w| w.to_lowercase()).collect(),
        SegmentContent::Text(text) => tokenize(text),
        _ => Vec::new(),
    };

    tokens
        .into_iter()
        .filter(|t| !t.is_empty() && !is_stopword(t))
        .collect()
}

/// Divide every metric in every cell by that metric's global maximum
///
/// **Private** - a zero maximum skips the division and leaves the metric
/// at zero for all cells (never NaN)
fn normalize(builder: &mut HeatmapBuilder, maxima: &FieldMaxima) {
    if maxima.count == 0 {
        debug!("All metric maxima are zero, matrix normalizes to all zeros");
    }

    for row in &mut builder.rows {
        for cell in row {
            cell.intensity = CellIntensity {
                count: scale(cell.count as f64, maxima.count as f64),
                word_count: scale(cell.word_count, maxima.word_count),
                density: scale(cell.density, maxima.density),
                score: scale(cell.score, maxima.score),
                frequency: scale(cell.frequency, maxima.frequency),
                confidence: scale(cell.confidence, maxima.confidence),
            };
        }
    }
}

fn scale(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}
