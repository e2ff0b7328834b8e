//! Session Heatmap
//!
//! Speaker activity aggregation for transcribed conversation data.
//!
//! Buckets timestamped speech segments into fixed 30-second intervals per
//! speaker and produces a normalized speaker x interval matrix with
//! per-cell statistics (counts, word frequencies, density, score,
//! frequency, confidence) plus human-readable cell summaries.
//!
//! This crate provides the core implementation for the
//! `session-heatmap` CLI tool; rendering and data retrieval live in
//! separate collaborators.

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
