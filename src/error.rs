//! Error handling for daylight result extraction.
//!
//! Only folder-level and export failures are errors. Problems inside a single
//! result file are recorded on the emitted records as a `ParseStatus`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaylightError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Results folder not found at path: {path}")]
    FolderNotFound { path: PathBuf },

    #[error("Directory traversal failed: {0}")]
    DirectoryTraversal(#[from] walkdir::Error),

    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("No result files found for metric '{metric}' in {folder}")]
    NoMatchingFiles { metric: String, folder: PathBuf },

    #[error("No records extracted for metric '{metric}' and area '{area}'")]
    NoRecords { metric: String, area: String },

    #[error("Export failed for file: {path} - {reason}")]
    ExportFailed { path: PathBuf, reason: String },

    #[error("Processing task failed: {reason}")]
    TaskFailed { reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl DaylightError {
    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DaylightError>;
