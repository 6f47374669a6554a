//! Command-line interface components.

use crate::config::{ExtractConfig, OutputFormat};
use crate::models::AreaType;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daylight-extract")]
#[command(about = "Extract per-zone daylight metrics from simulation result files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Folder containing the simulation result files
    #[arg(value_name = "RESULTS_FOLDER")]
    pub folder: PathBuf,

    /// Metric to export, as it appears at the end of result filenames (prompted if omitted)
    #[arg(short, long)]
    pub metric: Option<String>,

    /// Statistics to extract: full area or area of interest
    #[arg(short, long, value_enum, default_value_t = AreaType::Full)]
    pub area: AreaType,

    /// Output file (defaults to Daylight_Stats_<metric>_<area>.<ext> in the results folder)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format when it cannot be inferred from the output extension
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Result file extension
    #[arg(long, default_value = "wpd")]
    pub extension: String,

    /// Maximum number of files parsed concurrently
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// List the metrics found in the folder and exit
    #[arg(long)]
    pub list_metrics: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the extraction configuration from arguments
    pub fn to_config(&self) -> ExtractConfig {
        let mut config = ExtractConfig::default().with_file_extension(self.extension.as_str());

        if let Some(jobs) = self.jobs {
            config = config.with_max_concurrent_files(jobs);
        }
        if let Some(format) = self.format {
            config = config.with_output_format(format);
        }
        if self.no_progress {
            config = config.without_progress();
        }
        config
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Metric listing and interactive selection
pub mod metric_selection {
    use anyhow::{Context, Result};
    use colored::*;
    use std::io::{BufRead, Write};

    /// Print the available metrics as a numbered list
    pub fn print_metrics<W: Write>(metrics: &[String], out: &mut W) -> Result<()> {
        writeln!(out, "{}", "Available daylight metrics:".bright_green().bold())?;
        writeln!(out)?;
        for (i, metric) in metrics.iter().enumerate() {
            writeln!(
                out,
                "  {}. {}",
                (i + 1).to_string().bright_yellow().bold(),
                metric.bright_cyan()
            )?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Present metrics to the user and read their numbered selection
    pub fn select_metric<R: BufRead, W: Write>(
        metrics: &[String],
        input: &mut R,
        out: &mut W,
    ) -> Result<String> {
        if metrics.is_empty() {
            anyhow::bail!("No result files or metric types found in the folder.");
        }

        print_metrics(metrics, out)?;
        write!(out, "{}", "Select the metric to export (number): ".bright_white())?;
        out.flush().context("Failed to flush output")?;

        let mut line = String::new();
        input
            .read_line(&mut line)
            .context("Failed to read user input")?;

        let selection: usize = line
            .trim()
            .parse()
            .context("Please enter a valid number")?;

        if selection == 0 || selection > metrics.len() {
            anyhow::bail!(
                "Invalid selection. Please choose a number between 1 and {}",
                metrics.len()
            );
        }

        Ok(metrics[selection - 1].clone())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::io::Cursor;

        fn metrics() -> Vec<String> {
            vec!["DF".to_string(), "UDI".to_string(), "sDA".to_string()]
        }

        #[test]
        fn test_select_metric() {
            let mut input = Cursor::new("2\n");
            let mut out = Vec::new();

            let selected = select_metric(&metrics(), &mut input, &mut out).unwrap();

            assert_eq!(selected, "UDI");
            let printed = String::from_utf8(out).unwrap();
            assert!(printed.contains("sDA"));
        }

        #[test]
        fn test_select_metric_out_of_range() {
            let mut out = Vec::new();
            assert!(select_metric(&metrics(), &mut Cursor::new("0\n"), &mut out).is_err());
            assert!(select_metric(&metrics(), &mut Cursor::new("4\n"), &mut out).is_err());
            assert!(select_metric(&metrics(), &mut Cursor::new("abc\n"), &mut out).is_err());
        }

        #[test]
        fn test_select_metric_empty_list() {
            let mut out = Vec::new();
            let err = select_metric(&[], &mut Cursor::new("1\n"), &mut out).unwrap_err();
            assert!(err.to_string().contains("No result files"));
        }
    }
}
