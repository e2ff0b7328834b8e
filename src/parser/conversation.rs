//! Conversation parser: raw JSON into normalized segments.
//!
//! Transcription exports are duck-typed: the utterance array may sit at the
//! top level or under a wrapper key, the speaker may live in one of two
//! fields, and content arrives as structured words, free text, or nested
//! sub-utterances. Everything is normalized into [`Segment`] here so the
//! aggregator never inspects shape.

use super::schema::{RawSubUtterance, RawUtterance};
use crate::utils::config::SEGMENT_FIELD_NAMES;
use crate::utils::error::ParseError;
use log::{debug, warn};

/// Optional precomputed metric fields carried on a segment
///
/// When present these override the derived computation; when absent,
/// `score`/`frequency`/`confidence` default to zero rather than being
/// derived from other signals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecomputedMetrics {
    pub word_count: Option<f64>,
    pub density: Option<f64>,
    pub score: Option<f64>,
    pub frequency: Option<f64>,
    pub confidence: Option<f64>,
}

/// A speaker-attributed sub-span of a conversation turn
///
/// Words are kept as raw (uncased) tokens; case-folding and stopword
/// filtering happen at aggregation time.
#[derive(Debug, Clone, PartialEq)]
pub struct SubUtterance {
    pub speaker: String,
    pub words: Vec<String>,
}

/// Segment content, normalized at ingestion into a tagged union
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentContent {
    /// Explicit word token list (raw, not case-folded)
    Words(Vec<String>),

    /// Free-form text to be tokenized downstream
    Text(String),

    /// Nested speaker-attributed sub-spans
    Utterances(Vec<SubUtterance>),

    /// No usable content; contributes zero word count and density
    Empty,
}

/// One timestamped utterance attributed to a speaker (internal
/// representation, immutable once parsed)
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub speaker: String,

    /// Start timestamp in milliseconds
    pub start: u64,

    /// End timestamp in milliseconds (`start <= end`)
    pub end: u64,

    pub content: SegmentContent,

    pub precomputed: PrecomputedMetrics,
}

/// Parse a conversation JSON value into normalized segments
///
/// **Public** - main entry point for ingestion
///
/// Accepts either a bare array of utterance records or an object wrapping
/// the array under a known key (`utterances` and friends).
///
/// Malformed records are skipped with a warning; the whole input only
/// fails when a non-empty array produces no usable segment at all.
///
/// # Errors
/// * `ParseError::InvalidFormat` - input is neither an array nor a known
///   wrapper object, or every record failed to parse
pub fn parse_conversation(raw: &serde_json::Value) -> Result<Vec<Segment>, ParseError> {
    let records = extract_record_array(raw)?;

    let mut segments = Vec::with_capacity(records.len());

    for (index, value) in records.iter().enumerate() {
        match serde_json::from_value::<RawUtterance>(value.clone()) {
            Ok(record) => {
                if let Some(segment) = normalize_record(record, index) {
                    segments.push(segment);
                }
            }
            Err(e) => {
                // Log but don't fail - some records may be malformed
                warn!("Failed to parse utterance record {}: {}", index, e);
            }
        }
    }

    if segments.is_empty() && !records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No utterance record could be parsed".to_string(),
        ));
    }

    debug!("Parsed {} segments from {} records", segments.len(), records.len());

    Ok(segments)
}

/// Locate the utterance array in the raw JSON value
///
/// **Private** - internal helper for parse_conversation
fn extract_record_array(raw: &serde_json::Value) -> Result<&Vec<serde_json::Value>, ParseError> {
    match raw {
        serde_json::Value::Array(records) => Ok(records),

        serde_json::Value::Object(obj) => {
            for field in SEGMENT_FIELD_NAMES {
                if let Some(serde_json::Value::Array(records)) = obj.get(*field) {
                    debug!("Found utterance array under wrapper key '{}'", field);
                    return Ok(records);
                }
            }
            Err(ParseError::InvalidFormat(format!(
                "No utterance array found under any of: {}",
                SEGMENT_FIELD_NAMES.join(", ")
            )))
        }

        _ => Err(ParseError::InvalidFormat(
            "Conversation must be a JSON array or object".to_string(),
        )),
    }
}

/// Normalize one raw record into a segment, or drop it
///
/// **Private** - internal helper for parse_conversation
fn normalize_record(record: RawUtterance, index: usize) -> Option<Segment> {
    let Some(speaker) = record.speaker.or(record.speaker_name) else {
        warn!("Record {} has no speaker or speaker_name, skipping", index);
        return None;
    };

    if record.start > record.end {
        warn!(
            "Record {} has start {} > end {}, skipping",
            index, record.start, record.end
        );
        return None;
    }

    // Content precedence: structured words, then sub-utterances, then text
    let content = if let Some(words) = record.words {
        SegmentContent::Words(words.into_iter().map(|w| w.text).collect())
    } else if let Some(subs) = record.utterances {
        SegmentContent::Utterances(subs.into_iter().filter_map(normalize_sub_utterance).collect())
    } else if let Some(text) = record.text {
        SegmentContent::Text(text)
    } else {
        SegmentContent::Empty
    };

    Some(Segment {
        speaker,
        start: record.start,
        end: record.end,
        content,
        precomputed: PrecomputedMetrics {
            word_count: record.word_count,
            density: record.density,
            score: record.score,
            frequency: record.frequency,
            confidence: record.confidence,
        },
    })
}

/// Normalize a nested sub-utterance, or drop it when unusable
///
/// **Private** - internal helper for normalize_record
fn normalize_sub_utterance(sub: RawSubUtterance) -> Option<SubUtterance> {
    let speaker = sub.speaker.or(sub.speaker_name)?;

    let words = if let Some(words) = sub.words {
        words.into_iter().map(|w| w.text).collect()
    } else if let Some(text) = sub.text {
        crate::aggregator::words::tokenize(&text)
    } else {
        return None;
    };

    Some(SubUtterance { speaker, words })
}
