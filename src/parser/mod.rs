//! Result file parser.
//!
//! Turns one daylight simulation result file into zero or more
//! `MetricRecord`s. Parsing never fails as a whole: malformed values lines are
//! reported through each record's status, and a file that cannot be read
//! yields a single `FileReadError` record.
//!
//! ```text
//! [Zone] [<id>] <name>
//! [Sim]
//! [<OtherTag>] <description text>
//! [MMA] v0 v1 v2 v3 v4 v5 v6 v7 ...
//! ```

pub mod block;
pub mod tags;
pub mod values;

use self::block::{BlockContext, parse_blocks};
use self::tags::split_lines;
use crate::error::Result;
use crate::models::{AreaType, MetricRecord};
use crate::zone::{resolve_zone, zone_id_from_filename};
use std::path::Path;
use tracing::{debug, error};

/// Parse one result file from disk.
///
/// Undecodable bytes are replaced rather than rejected; only I/O failures
/// turn into a `FileReadError` record.
pub fn parse_result_file(path: &Path, metric: &str, area: AreaType) -> Vec<MetricRecord> {
    let file_name = file_name_of(path);

    match read_result_file(path) {
        Ok(content) => parse_result_content(&content, &file_name, metric, area),
        Err(e) => {
            error!("Error processing file {}: {}", path.display(), e);
            vec![MetricRecord::file_read_error(
                zone_id_from_filename(&file_name),
                metric,
                area,
                e,
            )]
        }
    }
}

/// Parse result file content already in memory
pub fn parse_result_content(
    content: &str,
    file_name: &str,
    metric: &str,
    area: AreaType,
) -> Vec<MetricRecord> {
    let zone = resolve_zone(split_lines(content), file_name);
    debug!(
        "Parsing {} for zone {} ({}), metric {}, area {}",
        file_name, zone.zone_id, zone.zone_name, metric, area
    );

    let ctx = BlockContext {
        file_name,
        metric,
        area,
        zone: &zone,
    };
    parse_blocks(split_lines(content), &ctx)
}

/// Read a result file, substituting invalid UTF-8 sequences
pub fn read_result_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
