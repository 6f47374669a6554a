//! Batch extraction over a results folder.
//!
//! Orchestrates discovery of result files for one metric, parsing them with
//! bounded concurrency, and exporting the merged records. Each file is parsed
//! independently; the merged output keeps file order and, within a file,
//! block order.

pub mod discovery;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{
    discovery::FileDiscovery,
    writer::{RecordWriter, default_output_name},
};

use crate::config::{ExtractConfig, OutputFormat};
use crate::error::{DaylightError, Result};
use crate::models::{AreaType, MetricRecord, ProcessingStats};
use crate::parser::parse_result_file;

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::debug;

/// Records and statistics from one batch extraction
#[derive(Debug, Default)]
pub struct BatchResult {
    pub records: Vec<MetricRecord>,
    pub stats: ProcessingStats,
}

/// Main processor for a folder of daylight result files
#[derive(Debug)]
pub struct BatchProcessor {
    folder: PathBuf,
    config: ExtractConfig,
    file_discovery: FileDiscovery,
}

impl BatchProcessor {
    /// Create a new batch processor
    pub fn new(folder: PathBuf) -> Result<Self> {
        if !folder.is_dir() {
            return Err(DaylightError::FolderNotFound { path: folder });
        }

        let config = ExtractConfig::default();
        Ok(Self {
            file_discovery: FileDiscovery::new(folder.clone(), config.file_extension.clone()),
            folder,
            config,
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: ExtractConfig) -> Self {
        self.file_discovery = FileDiscovery::new(self.folder.clone(), config.file_extension.clone());
        self.config = config;
        self
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Metric labels available in the folder
    pub fn discover_metrics(&self) -> Result<Vec<String>> {
        self.file_discovery.discover_metrics()
    }

    /// Default export path for a selection: inside the results folder
    pub fn default_output_path(&self, metric: &str, area: AreaType) -> PathBuf {
        self.folder
            .join(default_output_name(metric, area, self.config.output_format))
    }

    /// Parse every result file for `metric`
    pub async fn extract(&self, metric: &str, area: AreaType) -> Result<BatchResult> {
        self.config.validate()?;

        let files = self.file_discovery.files_for_metric(metric)?;
        if files.is_empty() {
            return Err(DaylightError::NoMatchingFiles {
                metric: metric.to_string(),
                folder: self.folder.clone(),
            });
        }

        self.extract_files(files, metric, area).await
    }

    /// Parse the given files concurrently, merging results in file order
    pub async fn extract_files(
        &self,
        files: Vec<PathBuf>,
        metric: &str,
        area: AreaType,
    ) -> Result<BatchResult> {
        let start_time = Instant::now();
        let concurrent_limit = self.config.max_concurrent_files.clamp(1, files.len().max(1));
        debug!(
            "Parsing {} files with concurrency {}",
            files.len(),
            concurrent_limit
        );

        let pb = self.progress_bar(files.len());
        let mut stats = ProcessingStats {
            files_discovered: files.len(),
            ..Default::default()
        };

        let mut per_file = stream::iter(files.into_iter().map(|path| {
            let metric = metric.to_string();
            task::spawn_blocking(move || parse_result_file(&path, &metric, area))
        }))
        .buffered(concurrent_limit);

        let mut records = Vec::new();
        while let Some(joined) = per_file.next().await {
            let file_records = joined.map_err(|e| DaylightError::TaskFailed {
                reason: e.to_string(),
            })?;
            stats.record_file(&file_records);
            records.extend(file_records);
            pb.inc(1);
        }

        pb.finish_and_clear();
        stats.processing_time_ms = start_time.elapsed().as_millis();

        debug!(
            "Extracted {} records from {} files ({} failed, {} without blocks)",
            stats.total_records, stats.files_discovered, stats.files_failed, stats.files_empty
        );
        Ok(BatchResult { records, stats })
    }

    /// Extract one metric and export it, reporting progress to stdout
    pub async fn run(
        &self,
        metric: &str,
        area: AreaType,
        output_path: Option<PathBuf>,
    ) -> Result<ProcessingStats> {
        let output_path = output_path.unwrap_or_else(|| self.default_output_path(metric, area));
        let format = OutputFormat::from_path(&output_path).unwrap_or(self.config.output_format);

        println!("{}", "Starting daylight metric extraction".bright_green().bold());
        println!("  {} {}", "Folder:".bright_cyan(), self.folder.display());
        println!("  {} {}", "Metric:".bright_cyan(), metric);
        println!("  {} {}", "Area:".bright_cyan(), area);

        println!("\n{}", "Parsing result files...".bright_yellow());
        let BatchResult { records, mut stats } = self.extract(metric, area).await?;

        if records.is_empty() {
            return Err(DaylightError::NoRecords {
                metric: metric.to_string(),
                area: area.to_string(),
            });
        }

        let writer = RecordWriter::new(output_path, format);
        writer.write(&records)?;
        stats.output_path = writer.output_path().to_path_buf();

        print_summary(&stats);
        Ok(stats)
    }

    /// Like [`run`](Self::run), but gives up once `shutdown` completes.
    ///
    /// Nothing is written when the extraction is interrupted.
    pub async fn run_until<F>(
        &self,
        metric: &str,
        area: AreaType,
        output_path: Option<PathBuf>,
        shutdown: F,
    ) -> Result<ProcessingStats>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;

            _ = shutdown => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(DaylightError::processing_interrupted("Processing interrupted by user"))
            }
            result = self.run(metric, area, output_path) => result,
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("Parsing files");
        pb
    }
}

fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Extraction Summary".bright_green().bold());
    println!(
        "  {} {} of {} files ({} without blocks, {} unreadable)",
        "Parsed:".bright_cyan(),
        stats.files_processed.to_string().bright_white().bold(),
        stats.files_discovered,
        stats.files_empty,
        stats.files_failed
    );
    println!(
        "  {} {}",
        "Records:".bright_cyan(),
        stats.total_records.to_string().bright_white().bold()
    );
    if stats.records_with_issues > 0 {
        println!(
            "  {} {} records have a non-OK parse status",
            "Warning:".bright_yellow(),
            stats.records_with_issues
        );
    }
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        stats.output_path.display()
    );
    println!(
        "  {} {}ms",
        "Time:".bright_cyan(),
        stats.processing_time_ms
    );
}
