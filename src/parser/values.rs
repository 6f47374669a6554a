//! Numeric field extraction from `[MMA]` values lines.
//!
//! The values line is a flat list of numbers. Full area statistics are the
//! first three tokens; AOI statistics are tokens 5, 6 and 7.

use crate::constants::{AOI_STATS_OFFSET, FULL_STATS_OFFSET, STATS_PER_AREA};
use crate::models::{AreaType, ParseStatus, StatValue};

/// Min, max and average read from one values line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlineStats {
    pub min: StatValue,
    pub max: StatValue,
    pub average: StatValue,
}

impl HeadlineStats {
    pub fn not_available() -> Self {
        Self {
            min: StatValue::NotAvailable,
            max: StatValue::NotAvailable,
            average: StatValue::NotAvailable,
        }
    }
}

/// Result of extracting one area type's statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extraction {
    pub stats: HeadlineStats,
    pub status: ParseStatus,
}

impl Extraction {
    fn failed(status: ParseStatus) -> Self {
        Self {
            stats: HeadlineStats::not_available(),
            status,
        }
    }
}

/// Extract the requested area's min/max/average from values tokens.
///
/// Either all three statistics parse or none are reported.
pub fn extract_stats(tokens: &[&str], area: AreaType) -> Extraction {
    let (offset, too_short, parse_error) = match area {
        AreaType::Full => (
            FULL_STATS_OFFSET,
            ParseStatus::TooShortFull,
            ParseStatus::ParseErrorFull,
        ),
        AreaType::Aoi => (
            AOI_STATS_OFFSET,
            ParseStatus::AoiMissing,
            ParseStatus::ParseErrorAoi,
        ),
    };

    let Some(window) = tokens.get(offset..offset + STATS_PER_AREA) else {
        return Extraction::failed(too_short);
    };

    match parse_window(window) {
        Some([min, max, average]) => Extraction {
            stats: HeadlineStats {
                min: StatValue::Value(min),
                max: StatValue::Value(max),
                average: StatValue::Value(average),
            },
            status: ParseStatus::Ok,
        },
        None => Extraction::failed(parse_error),
    }
}

fn parse_window(window: &[&str]) -> Option<[f64; STATS_PER_AREA]> {
    let mut values = [0.0; STATS_PER_AREA];
    for (slot, token) in values.iter_mut().zip(window) {
        *slot = token.parse::<f64>().ok()?;
    }
    Some(values)
}
