//! Core data structures for daylight metric extraction.
//!
//! Defines the requested area type, statistic values, per-block parse status,
//! the emitted `MetricRecord` and batch processing statistics.

use crate::constants::{
    AOI_NOT_FOUND_LABEL, ERROR_SENTINEL, FILE_ERROR_ZONE_NAME, NOT_AVAILABLE,
    RAW_VALUES_SEPARATOR,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which set of statistics to read from a values line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum AreaType {
    /// Statistics over the full simulated area
    Full,
    /// Statistics over the area of interest
    #[value(name = "aoi")]
    Aoi,
}

impl AreaType {
    pub fn label(&self) -> &'static str {
        match self {
            AreaType::Full => "Full",
            AreaType::Aoi => "AOI",
        }
    }
}

impl fmt::Display for AreaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AreaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(AreaType::Full),
            "aoi" => Ok(AreaType::Aoi),
            other => Err(format!("unknown area type '{}' (expected full or aoi)", other)),
        }
    }
}

/// A headline statistic: a parsed number or a sentinel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatValue {
    Value(f64),
    NotAvailable,
    Error,
}

impl StatValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Value(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Value(v) => write!(f, "{}", v),
            StatValue::NotAvailable => f.write_str(NOT_AVAILABLE),
            StatValue::Error => f.write_str(ERROR_SENTINEL),
        }
    }
}

/// Outcome of parsing one block (or one file, for read failures)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseStatus {
    Ok,
    ParseErrorFull,
    TooShortFull,
    ParseErrorAoi,
    AoiMissing,
    FileReadError,
}

impl ParseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ParseStatus::Ok => "OK",
            ParseStatus::ParseErrorFull => "MMA Parse Error (Full)",
            ParseStatus::TooShortFull => "MMA Too Short (Full)",
            ParseStatus::ParseErrorAoi => "MMA Parse Error (AOI)",
            ParseStatus::AoiMissing => "AOI Stats Missing",
            ParseStatus::FileReadError => "File Read Error",
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ParseStatus::Ok)
    }
}

impl fmt::Display for ParseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One simulation block extracted from one result file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub zone_id: String,
    pub zone_name: String,
    pub requested_metric: String,
    pub requested_area: AreaType,
    pub description: String,
    pub min: StatValue,
    pub max: StatValue,
    pub average: StatValue,
    pub raw_values: Vec<String>,
    pub status: ParseStatus,
    pub effective_area_label: String,
}

impl MetricRecord {
    /// Record standing in for a whole file that could not be read
    pub fn file_read_error(
        zone_id: impl Into<String>,
        requested_metric: impl Into<String>,
        requested_area: AreaType,
        error: impl fmt::Display,
    ) -> Self {
        Self {
            zone_id: zone_id.into(),
            zone_name: FILE_ERROR_ZONE_NAME.to_string(),
            requested_metric: requested_metric.into(),
            requested_area,
            description: format!("Error processing file: {}", error),
            min: StatValue::Error,
            max: StatValue::Error,
            average: StatValue::Error,
            raw_values: Vec::new(),
            status: ParseStatus::FileReadError,
            effective_area_label: requested_area.label().to_string(),
        }
    }

    /// Raw values joined for audit output
    pub fn raw_values_display(&self) -> String {
        if self.status == ParseStatus::FileReadError {
            return ERROR_SENTINEL.to_string();
        }
        self.raw_values.join(RAW_VALUES_SEPARATOR)
    }

    /// True when AOI data was requested but the values line lacked it
    pub fn aoi_not_found(&self) -> bool {
        self.effective_area_label == AOI_NOT_FOUND_LABEL
    }
}

/// Batch processing statistics
#[derive(Debug, Default, Clone)]
pub struct ProcessingStats {
    pub files_discovered: usize,
    pub files_processed: usize,
    pub files_empty: usize,
    pub files_failed: usize,
    pub total_records: usize,
    pub records_with_issues: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    /// Fold one file's records into the totals
    pub fn record_file(&mut self, records: &[MetricRecord]) {
        if records.is_empty() {
            self.files_empty += 1;
            return;
        }

        if records
            .iter()
            .any(|r| r.status == ParseStatus::FileReadError)
        {
            self.files_failed += 1;
        } else {
            self.files_processed += 1;
        }

        self.total_records += records.len();
        self.records_with_issues += records.iter().filter(|r| !r.status.is_ok()).count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_type_from_str() {
        assert_eq!("Full".parse::<AreaType>().unwrap(), AreaType::Full);
        assert_eq!(" aoi ".parse::<AreaType>().unwrap(), AreaType::Aoi);
        assert_eq!("AOI".parse::<AreaType>().unwrap(), AreaType::Aoi);
        assert!("partial".parse::<AreaType>().is_err());
    }

    #[test]
    fn test_stat_value_display() {
        assert_eq!(StatValue::Value(215.4).to_string(), "215.4");
        assert_eq!(StatValue::NotAvailable.to_string(), "N/A");
        assert_eq!(StatValue::Error.to_string(), "ERROR");
        assert_eq!(StatValue::Error.as_f64(), None);
    }

    #[test]
    fn test_file_read_error_record() {
        let record = MetricRecord::file_read_error("L01", "DF", AreaType::Aoi, "permission denied");

        assert_eq!(record.zone_id, "L01");
        assert_eq!(record.zone_name, "File Error");
        assert_eq!(record.status, ParseStatus::FileReadError);
        assert_eq!(record.description, "Error processing file: permission denied");
        assert_eq!(record.min, StatValue::Error);
        assert_eq!(record.max, StatValue::Error);
        assert_eq!(record.average, StatValue::Error);
        assert_eq!(record.raw_values_display(), "ERROR");
        assert_eq!(record.effective_area_label, "AOI");
    }

    #[test]
    fn test_processing_stats_record_file() {
        let mut stats = ProcessingStats::default();
        stats.record_file(&[]);
        stats.record_file(&[MetricRecord::file_read_error("x", "DF", AreaType::Full, "boom")]);

        assert_eq!(stats.files_empty, 1);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(stats.files_processed, 0);
        assert_eq!(stats.total_records, 1);
        assert_eq!(stats.records_with_issues, 1);
    }
}
