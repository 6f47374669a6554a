//! Daylight Metric Extraction Library
//!
//! Reads daylight simulation result files (one per zone, tag-bracketed text)
//! and turns each simulation block into a flat `MetricRecord` carrying the
//! zone identity and the min, max and average for either the full area or
//! the area of interest.
//!
//! This library provides tools for:
//! - Parsing result files with per-block status instead of hard failures
//! - Discovering metric types and result files in a results folder
//! - Batch extraction with bounded concurrency and stable output order
//! - Exporting records to CSV or Parquet tables

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod processor;
pub mod zone;

// Re-export commonly used types
pub use config::{ExtractConfig, OutputFormat};
pub use error::{DaylightError, Result};
pub use models::{AreaType, MetricRecord, ParseStatus, ProcessingStats, StatValue};
pub use parser::{parse_result_content, parse_result_file};
pub use processor::BatchProcessor;
