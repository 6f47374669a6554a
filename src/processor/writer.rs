//! Table export for extracted records
//!
//! Flattens `MetricRecord`s into a polars `DataFrame` with a fixed column
//! order and writes it as CSV or Parquet.

use crate::config::OutputFormat;
use crate::constants::{NOT_AVAILABLE, columns};
use crate::error::{DaylightError, Result};
use crate::models::{AreaType, MetricRecord, StatValue};

use polars::prelude::{
    Column, CsvWriter, DataFrame, NamedFrom, ParquetCompression, ParquetWriter,
    SerWriter, Series,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default export file name for a metric/area selection
pub fn default_output_name(metric: &str, area: AreaType, format: OutputFormat) -> String {
    format!("Daylight_Stats_{}_{}.{}", metric, area, format.extension())
}

/// Build the export table for `format`.
///
/// Parquet keeps the statistics as nullable floats. CSV writes them as text
/// so the `N/A` and `ERROR` sentinels stay distinguishable.
pub fn records_to_dataframe(records: &[MetricRecord], format: OutputFormat) -> Result<DataFrame> {
    let stat = |name: &str, f: fn(&MetricRecord) -> StatValue| match format {
        OutputFormat::Csv => text_column(name, records, |r| stat_text(f(r))),
        OutputFormat::Parquet => stat_column(name, records, |r| f(r).as_f64()),
    };

    let df = DataFrame::new(vec![
        text_column(columns::ZONE_ID, records, |r| r.zone_id.clone()),
        text_column(columns::ZONE_NAME, records, |r| r.zone_name.clone()),
        text_column(columns::METRIC, records, |r| r.requested_metric.clone()),
        text_column(columns::AREA, records, |r| r.effective_area_label.clone()),
        text_column(columns::DESCRIPTION, records, |r| r.description.clone()),
        stat(columns::MIN, |r| r.min),
        stat(columns::MAX, |r| r.max),
        stat(columns::AVERAGE, |r| r.average),
        text_column(columns::STATUS, records, |r| r.status.to_string()),
        text_column(columns::RAW_VALUES, records, |r| r.raw_values_display()),
    ])?;

    Ok(df)
}

// Debug formatting keeps a decimal point on whole numbers (`2.0`, not `2`)
fn stat_text(value: StatValue) -> String {
    match value {
        StatValue::Value(v) => format!("{:?}", v),
        other => other.to_string(),
    }
}

fn text_column(
    name: &str,
    records: &[MetricRecord],
    f: impl Fn(&MetricRecord) -> String,
) -> Column {
    let values: Vec<String> = records.iter().map(f).collect();
    Column::from(Series::new(name.into(), values))
}

fn stat_column(
    name: &str,
    records: &[MetricRecord],
    f: impl Fn(&MetricRecord) -> Option<f64>,
) -> Column {
    let values: Vec<Option<f64>> = records.iter().map(f).collect();
    Column::from(Series::new(name.into(), values))
}

/// Writer for exported record tables
#[derive(Debug)]
pub struct RecordWriter {
    output_path: PathBuf,
    format: OutputFormat,
}

impl RecordWriter {
    /// Create a new record writer
    pub fn new(output_path: PathBuf, format: OutputFormat) -> Self {
        Self {
            output_path,
            format,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write records, returning the number of rows written
    pub fn write(&self, records: &[MetricRecord]) -> Result<usize> {
        let mut df = records_to_dataframe(records, self.format)?;

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.output_path)?;
        match self.format {
            OutputFormat::Csv => CsvWriter::new(file)
                .include_header(true)
                .with_null_value(NOT_AVAILABLE.to_string())
                .finish(&mut df)
                .map_err(|e| self.export_failed(e))?,
            OutputFormat::Parquet => {
                ParquetWriter::new(file)
                    .with_compression(ParquetCompression::Snappy)
                    .finish(&mut df)
                    .map_err(|e| self.export_failed(e))?;
            }
        }

        debug!(
            "Wrote {} rows to {} ({:?})",
            df.height(),
            self.output_path.display(),
            self.format
        );
        Ok(df.height())
    }

    fn export_failed(&self, error: polars::error::PolarsError) -> DaylightError {
        DaylightError::ExportFailed {
            path: self.output_path.clone(),
            reason: error.to_string(),
        }
    }
}
