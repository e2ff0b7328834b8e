//! Session Heatmap CLI
//!
//! Aggregates transcribed conversation data into a normalized speaker x
//! time-interval heatmap document.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use session_heatmap::commands::{execute_analyze, validate_args, AnalyzeArgs};
use session_heatmap::utils::config::SCHEMA_VERSION;

/// Session Heatmap - speaker activity aggregation for conversations
#[derive(Parser, Debug)]
#[command(name = "session-heatmap")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate a conversation file into a heatmap document
    Analyze {
        /// Path to the conversation JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the heatmap document
        #[arg(short, long, default_value = "heatmap.json")]
        output: PathBuf,

        /// Print a text summary of the busiest cells
        #[arg(long)]
        summary: bool,

        /// Number of cells in the text summary
        #[arg(long, default_value = "10")]
        top_cells: usize,
    },

    /// Validate a heatmap document JSON file
    Validate {
        /// Path to heatmap document file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            summary,
            top_cells,
        } => {
            let args = AnalyzeArgs {
                input,
                output_json: output,
                print_summary: summary,
                top_cells,
            };

            validate_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_document_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a heatmap document JSON file
///
/// **Private** - internal command implementation
fn validate_document_file(file_path: PathBuf) -> Result<()> {
    use session_heatmap::output::read_document;

    println!("Validating heatmap document: {}", file_path.display());

    let document = read_document(&file_path)?;

    println!("✓ Valid heatmap document");
    println!("  Version: {}", document.version);
    println!("  Source: {}", document.source);
    println!("  Speakers: {}", document.speakers.len());
    println!("  Intervals: {}", document.intervals.len());
    println!("  Segments: {}", document.segment_count);
    println!("  Cells: {}", document.cells.len());

    Ok(())
}

/// Display schema information
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("Session Heatmap Document Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string        - Schema version (e.g., '1.0.0')");
        println!("  source: string         - Conversation source file name");
        println!("  speakers: array        - Speakers in first-seen order");
        println!("  intervals: array       - Interval start offsets in seconds");
        println!("  segment_count: number  - Segments that fed the aggregation");
        println!("  cells: array           - One record per (speaker, interval)");
        println!("    speaker: string      - Row key");
        println!("    interval: number     - Column key (seconds)");
        println!("    count: number        - Raw segment-overlap count");
        println!("    intensity: object    - Normalized metrics in [0, 1]");
        println!("    summary: object      - Derived display statistics");
        println!("  generated_at: string   - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Session Heatmap v{}", env!("CARGO_PKG_VERSION"));
    println!("Document Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Speaker activity aggregation for transcribed conversations.");
}
