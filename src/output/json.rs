//! Heatmap document output writer.
//!
//! Serializes a finalized matrix into the versioned JSON artifact the
//! rendering layer consumes, and reads documents back for validation.

use crate::aggregator::{summarize_cell, HeatmapMatrix};
use crate::parser::{CellRecord, HeatmapDocument, Segment};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Convert a finalized matrix into the output document
///
/// **Public** - used by commands to create final output
///
/// Cells are emitted in speaker-major order, one record per
/// (speaker, interval) pair, summaries included.
pub fn to_document(matrix: &HeatmapMatrix, source: &str, segments: &[Segment]) -> HeatmapDocument {
    use chrono::Utc;

    let cells = matrix
        .cells()
        .map(|cell| CellRecord {
            speaker: cell.speaker.clone(),
            interval: cell.interval,
            count: cell.count,
            intensity: cell.intensity.clone(),
            summary: summarize_cell(cell, Some(segments)),
        })
        .collect();

    HeatmapDocument {
        version: SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        speakers: matrix.speakers().to_vec(),
        intervals: matrix.intervals().to_vec(),
        segment_count: segments.len() as u64,
        cells,
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Write a heatmap document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - path cannot be created or is invalid
pub fn write_document(
    document: &HeatmapDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing heatmap document to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, document).map_err(OutputError::SerializationFailed)?;

    info!(
        "Document written successfully ({} cells)",
        document.cells.len()
    );

    Ok(())
}

/// Read a heatmap document from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - file read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_document(input_path: impl AsRef<Path>) -> Result<HeatmapDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading heatmap document from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let document: HeatmapDocument =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Document loaded: version {}, source {}",
        document.version, document.source
    );

    Ok(document)
}

/// Validate that the output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
