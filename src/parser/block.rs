//! Simulation block state machine.
//!
//! A block opens on `[Sim]` and closes on its `[MMA]` values line, which
//! emits exactly one record. Blocks still open at end of input are dropped.

use super::tags::{LineKind, classify_line};
use super::values::extract_stats;
use crate::constants::{AOI_NOT_FOUND_LABEL, NOT_AVAILABLE};
use crate::models::{AreaType, MetricRecord, ParseStatus};
use crate::zone::ZoneIdentity;
use tracing::{debug, warn};

/// Caller-supplied context shared by every block of one file
#[derive(Debug, Clone)]
pub struct BlockContext<'a> {
    pub file_name: &'a str,
    pub metric: &'a str,
    pub area: AreaType,
    pub zone: &'a ZoneIdentity,
}

/// Record under construction for the currently open block
#[derive(Debug)]
struct RecordBuilder {
    description: Option<String>,
}

impl RecordBuilder {
    fn new() -> Self {
        Self { description: None }
    }

    fn offer_description(&mut self, candidate: Option<String>) {
        if self.description.is_none() {
            self.description = candidate;
        }
    }

    fn finish(self, ctx: &BlockContext<'_>, tokens: &[&str], line: &str) -> MetricRecord {
        let extraction = extract_stats(tokens, ctx.area);

        let mut effective_area_label = ctx.area.label().to_string();
        match extraction.status {
            ParseStatus::Ok => {}
            ParseStatus::TooShortFull => warn!(
                "Not enough MMA values for Full Area in {}: {}",
                ctx.file_name, line
            ),
            ParseStatus::ParseErrorFull => warn!(
                "Could not parse Full Area MMA (first 3) in {}: {}",
                ctx.file_name, line
            ),
            ParseStatus::AoiMissing => {
                warn!(
                    "AOI stats requested but not found (MMA line too short) in {}: {}",
                    ctx.file_name, line
                );
                effective_area_label = AOI_NOT_FOUND_LABEL.to_string();
            }
            ParseStatus::ParseErrorAoi => warn!(
                "Could not parse AOI MMA (values 6-8) in {}: {}",
                ctx.file_name, line
            ),
            ParseStatus::FileReadError => {}
        }

        MetricRecord {
            zone_id: ctx.zone.zone_id.clone(),
            zone_name: ctx.zone.zone_name.clone(),
            requested_metric: ctx.metric.to_string(),
            requested_area: ctx.area,
            description: self
                .description
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            min: extraction.stats.min,
            max: extraction.stats.max,
            average: extraction.stats.average,
            raw_values: tokens.iter().map(|t| t.to_string()).collect(),
            status: extraction.status,
            effective_area_label,
        }
    }
}

enum BlockState {
    Outside,
    Inside(RecordBuilder),
}

/// Run the block state machine over all lines, returning one record per
/// completed block in source order.
pub fn parse_blocks<'a, I>(lines: I, ctx: &BlockContext<'_>) -> Vec<MetricRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut records = Vec::new();
    let mut state = BlockState::Outside;

    for (line_num, line) in lines.into_iter().enumerate() {
        let kind = classify_line(line);

        state = match (state, kind) {
            (BlockState::Inside(_), LineKind::BlockStart) => {
                debug!(
                    "{}:{}: block restarted before its values line, discarding partial block",
                    ctx.file_name,
                    line_num + 1
                );
                BlockState::Inside(RecordBuilder::new())
            }
            (BlockState::Outside, LineKind::BlockStart) => BlockState::Inside(RecordBuilder::new()),
            (BlockState::Inside(builder), LineKind::Values(tokens)) => {
                records.push(builder.finish(ctx, &tokens, line.trim()));
                BlockState::Outside
            }
            (BlockState::Inside(mut builder), kind) => {
                builder.offer_description(kind.description());
                BlockState::Inside(builder)
            }
            (BlockState::Outside, _) => BlockState::Outside,
        };
    }

    if let BlockState::Inside(_) = state {
        debug!(
            "{}: input ended inside a block without a values line, block dropped",
            ctx.file_name
        );
    }

    debug!("{}: extracted {} blocks", ctx.file_name, records.len());
    records
}
