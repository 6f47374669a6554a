//! Configuration for batch extraction.
//!
//! Provides the settings that control which files are picked up, how many are
//! parsed concurrently, and how the resulting table is written.

use crate::constants::RESULT_FILE_EXTENSION;
use crate::error::{DaylightError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Table format for exported records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values, missing statistics written as N/A
    Csv,
    /// Apache Parquet with nullable statistic columns
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }

    /// Infer the format from an output path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(OutputFormat::Csv),
            "parquet" | "pq" => Some(OutputFormat::Parquet),
            _ => None,
        }
    }
}

/// Main configuration for daylight extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Extension of result files, without the leading dot
    pub file_extension: String,

    /// Maximum number of files parsed at once
    pub max_concurrent_files: usize,

    /// Format of the exported table
    pub output_format: OutputFormat,

    /// Show a progress bar while parsing
    pub show_progress: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            file_extension: RESULT_FILE_EXTENSION.to_string(),
            max_concurrent_files: num_cpus::get().max(1),
            output_format: OutputFormat::Csv,
            show_progress: true,
        }
    }
}

impl ExtractConfig {
    /// Set the result file extension
    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Set maximum concurrent files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files;
        self
    }

    /// Set the export format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Check settings before processing starts
    pub fn validate(&self) -> Result<()> {
        if self.file_extension.is_empty() {
            return Err(DaylightError::Configuration {
                message: "file extension must not be empty".to_string(),
            });
        }

        if self.max_concurrent_files == 0 {
            return Err(DaylightError::Configuration {
                message: "max_concurrent_files must be at least 1".to_string(),
            });
        }

        debug!(
            "Configuration valid: *.{} files, {} concurrent, {:?} output",
            self.file_extension, self.max_concurrent_files, self.output_format
        );
        Ok(())
    }
}
