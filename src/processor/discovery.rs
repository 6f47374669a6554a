//! File discovery for daylight result folders
//!
//! Result files sit directly in one folder and are named
//! `<zone>_..._<metric>.<ext>`. Discovery lists the metric labels present and
//! the files belonging to one metric.

use crate::constants::FILENAME_DELIMITER;
use crate::error::{DaylightError, Result};
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File discovery component for a results folder
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    folder: PathBuf,
    extension: String,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(folder: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            folder,
            extension: extension.into(),
        }
    }

    fn ensure_folder(&self) -> Result<()> {
        if !self.folder.is_dir() {
            return Err(DaylightError::FolderNotFound {
                path: self.folder.clone(),
            });
        }
        Ok(())
    }

    /// Unique metric labels found in result filenames, sorted
    pub fn discover_metrics(&self) -> Result<Vec<String>> {
        self.ensure_folder()?;

        let mut metrics = BTreeSet::new();
        for entry in WalkDir::new(&self.folder).min_depth(1).max_depth(1) {
            let entry = entry?;
            if !entry.file_type().is_file() || !self.has_result_extension(entry.path()) {
                continue;
            }

            if let Some(metric) = metric_from_path(entry.path()) {
                metrics.insert(metric);
            }
        }

        debug!(
            "Found {} metric types in {}",
            metrics.len(),
            self.folder.display()
        );
        Ok(metrics.into_iter().collect())
    }

    /// Result files whose name ends with `_<metric>.<ext>`, sorted by name
    pub fn files_for_metric(&self, metric: &str) -> Result<Vec<PathBuf>> {
        self.ensure_folder()?;

        let pattern = format!(
            "{}/*{}{}.{}",
            Pattern::escape(&self.folder.to_string_lossy()),
            FILENAME_DELIMITER,
            Pattern::escape(metric),
            Pattern::escape(&self.extension)
        );
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        let paths = glob::glob_with(&pattern, options).map_err(|e| {
            DaylightError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut files = Vec::new();
        for path in paths {
            let path = path.map_err(|e| DaylightError::Io(e.into()))?;
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        debug!(
            "Found {} files for metric '{}' in {}",
            files.len(),
            metric,
            self.folder.display()
        );
        Ok(files)
    }

    fn has_result_extension(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy() == self.extension.as_str())
    }
}

/// Metric label encoded as the final filename token, if the stem has more
/// than one token
pub fn metric_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let mut parts = stem.rsplit(FILENAME_DELIMITER);
    let metric = parts.next()?;
    parts.next()?;
    Some(metric.to_string())
}
