//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads conversation JSON from disk
//! 2. Parses it into normalized segments
//! 3. Builds the normalized heatmap matrix
//! 4. Writes the heatmap document
//! 5. Optionally prints a text summary of the busiest cells

use crate::aggregator::{build_heatmap, summarize_cell, Cell};
use crate::output::{to_document, write_document};
use crate::parser::parse_conversation;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the conversation JSON file
    pub input: PathBuf,

    /// Output path for the heatmap document
    pub output_json: PathBuf,

    /// Print a text summary of the busiest cells to stdout
    pub print_summary: bool,

    /// Number of cells to include in the text summary
    pub top_cells: usize,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_json: PathBuf::from("heatmap.json"),
            print_summary: false,
            top_cells: 10,
        }
    }
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    if args.top_cells == 0 {
        anyhow::bail!("top_cells must be greater than 0");
    }

    if args.top_cells > 1000 {
        anyhow::bail!("top_cells is too large (max 1000)");
    }

    Ok(())
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * File read errors
/// * Conversation parsing errors
/// * Empty dataset (nothing to aggregate)
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.input.display());

    // Step 1: Read conversation file
    info!("Step 1/4: Reading conversation file...");
    let contents = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let raw: serde_json::Value =
        serde_json::from_str(&contents).context("Input is not valid JSON")?;

    // Step 2: Parse into segments
    info!("Step 2/4: Parsing conversation data...");
    let segments = parse_conversation(&raw).context("Failed to parse conversation data")?;

    debug!("Parsed {} segments", segments.len());

    // Step 3: Build the heatmap matrix
    info!("Step 3/4: Building heatmap matrix...");
    let matrix = build_heatmap(&segments).context("Failed to build heatmap")?;

    let (rows, cols) = matrix.dimensions();
    debug!("Built {} x {} matrix", rows, cols);

    // Step 4: Write output
    info!("Step 4/4: Writing heatmap document...");
    let source = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());

    let document = to_document(&matrix, &source, &segments);
    write_document(&document, &args.output_json).context("Failed to write heatmap document")?;

    info!("✓ Heatmap written to: {}", args.output_json.display());

    if args.print_summary {
        print_summary(&matrix, &segments, args.top_cells);
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Print the busiest cells as a text table
///
/// **Private** - internal helper for execute_analyze
fn print_summary(
    matrix: &crate::aggregator::HeatmapMatrix,
    segments: &[crate::parser::Segment],
    top_cells: usize,
) {
    let mut busiest: Vec<&Cell> = matrix.cells().filter(|c| c.count > 0).collect();
    busiest.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.speaker.cmp(&b.speaker))
            .then_with(|| a.interval.cmp(&b.interval))
    });

    println!("\n{}", "=".repeat(80));
    println!("HEATMAP SUMMARY");
    println!("{}", "=".repeat(80));
    println!("Speakers:  {}", matrix.speakers().join(", "));
    println!("Intervals: {}", matrix.intervals().len());
    println!("Segments:  {}", segments.len());
    println!();

    for cell in busiest.iter().take(top_cells) {
        let summary = summarize_cell(cell, Some(segments));
        println!(
            "{:<20} {}  count={:<4} words={:<5} top_word={}",
            summary.speaker, summary.time_range, summary.count, summary.total_words,
            summary.top_word
        );
    }

    println!("{}", "=".repeat(80));
}
