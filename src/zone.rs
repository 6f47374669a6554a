//! Zone identity resolution.
//!
//! A result file names its zone in a `[Zone] [<id>] <name>` declaration. When
//! no declaration is present the leading filename token is used instead and
//! the zone name is reported as unknown.

use crate::constants::{FILENAME_DELIMITER, UNKNOWN_ZONE};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static ZONE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[Zone\]\s*\[(.*?)\]\s*(.*)").expect("zone declaration pattern is valid")
});

/// Identity of the zone a result file reports on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneIdentity {
    pub zone_id: String,
    pub zone_name: String,
}

/// Resolve zone identity from file content, falling back to the filename
pub fn resolve_zone<'a, I>(lines: I, file_name: &str) -> ZoneIdentity
where
    I: IntoIterator<Item = &'a str>,
{
    if let Some(identity) = zone_from_declaration(lines) {
        return identity;
    }

    let zone_id = zone_id_from_filename(file_name);
    debug!(
        "No [Zone] declaration in {}, using filename token '{}'",
        file_name, zone_id
    );

    ZoneIdentity {
        zone_id,
        zone_name: UNKNOWN_ZONE.to_string(),
    }
}

/// First `[Zone] [<id>] <name>` declaration in the content
pub fn zone_from_declaration<'a, I>(lines: I) -> Option<ZoneIdentity>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().find_map(|line| {
        ZONE_DECLARATION
            .captures(line.trim())
            .map(|caps| ZoneIdentity {
                zone_id: caps[1].to_string(),
                zone_name: caps[2].trim().to_string(),
            })
    })
}

/// Leading `_`-delimited token of the file stem, case preserved
pub fn zone_id_from_filename(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    match stem.split(FILENAME_DELIMITER).next() {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => UNKNOWN_ZONE.to_string(),
    }
}
