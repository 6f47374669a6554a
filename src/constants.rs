//! Tags, sentinels and column names shared across the extractor.

// =============================================================================
// Result File Format
// =============================================================================

/// Default extension of simulation result files
pub const RESULT_FILE_EXTENSION: &str = "wpd";

/// Delimiter between filename tokens (`<zone>_..._<metric>.wpd`)
pub const FILENAME_DELIMITER: char = '_';

/// Marker opening a simulation block
pub const BLOCK_START_TAG: &str = "[Sim]";

/// Marker of the min/max/average values line that closes a block
pub const VALUES_TAG: &str = "[MMA]";

/// Tags describing file or block structure. A tagged line whose tag is in
/// this set never becomes a record description.
pub const STRUCTURAL_TAGS: &[&str] = &[
    "RADIANCE", "Date", "Geometry", "Location", "Zone", "Stat", "Sim", "XYZ", "NxNy", "Period",
    "Data", "MMA",
];

/// Returns true if `tag` (without brackets) is a structural tag
pub fn is_structural_tag(tag: &str) -> bool {
    STRUCTURAL_TAGS.contains(&tag)
}

// =============================================================================
// Values Line Layout
// =============================================================================

/// Full area statistics occupy tokens 0..3 of the values line
pub const FULL_STATS_OFFSET: usize = 0;

/// AOI statistics occupy tokens 5..8 of the values line
pub const AOI_STATS_OFFSET: usize = 5;

/// Number of headline statistics (min, max, average)
pub const STATS_PER_AREA: usize = 3;

// =============================================================================
// Sentinels and Labels
// =============================================================================

/// Placeholder for a value that was not present or could not be parsed
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a value lost to a file-level failure
pub const ERROR_SENTINEL: &str = "ERROR";

/// Zone name used when no `[Zone]` declaration is present
pub const UNKNOWN_ZONE: &str = "Unknown";

/// Zone name carried by file-level failure records
pub const FILE_ERROR_ZONE_NAME: &str = "File Error";

/// Effective area label when AOI statistics were requested but absent
pub const AOI_NOT_FOUND_LABEL: &str = "AOI (Not Found)";

/// Separator used when rendering raw values for audit output
pub const RAW_VALUES_SEPARATOR: &str = " | ";

// =============================================================================
// Export Columns
// =============================================================================

pub mod columns {
    pub const ZONE_ID: &str = "Room ID";
    pub const ZONE_NAME: &str = "Room Name";
    pub const METRIC: &str = "File Metric Type";
    pub const AREA: &str = "Area Type";
    pub const DESCRIPTION: &str = "Metric Description";
    pub const MIN: &str = "Min";
    pub const MAX: &str = "Max";
    pub const AVERAGE: &str = "Average";
    pub const STATUS: &str = "Parse Status";
    pub const RAW_VALUES: &str = "MMA Values";

    /// Column order of exported tables
    pub const EXPORT_ORDER: &[&str] = &[
        ZONE_ID,
        ZONE_NAME,
        METRIC,
        AREA,
        DESCRIPTION,
        MIN,
        MAX,
        AVERAGE,
        STATUS,
        RAW_VALUES,
    ];
}
