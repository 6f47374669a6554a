//! Line classification for tag-bracketed result files.

use crate::constants::{BLOCK_START_TAG, VALUES_TAG, is_structural_tag};
use regex::Regex;
use std::sync::LazyLock;

static TAGGED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([A-Za-z0-9\s][^\]]*)\]\s*(.*)").expect("tagged line pattern is valid")
});

/// What a single (trimmed) line of a result file means to the block parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `[Sim]` opens a block
    BlockStart,
    /// `[MMA]` values line, already split on whitespace
    Values(Vec<&'a str>),
    /// Any other `[tag] text` line
    Tagged { tag: &'a str, text: &'a str },
    /// Untagged or blank line
    Other,
}

impl LineKind<'_> {
    /// Description candidate carried by this line, if any.
    ///
    /// Only non-structural tags with non-empty trailing text qualify.
    pub fn description(&self) -> Option<String> {
        match self {
            LineKind::Tagged { tag, text } if !is_structural_tag(tag) && !text.is_empty() => {
                Some(format!("[{}] {}", tag, text))
            }
            _ => None,
        }
    }
}

/// Split content into lines on `\n`, `\r\n` or a lone `\r`.
///
/// Files written on classic Mac systems use bare carriage returns, which
/// `str::lines` would leave as one long line.
pub fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split_terminator('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Classify one line. Leading and trailing whitespace is ignored.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();

    if line.starts_with(BLOCK_START_TAG) {
        return LineKind::BlockStart;
    }

    if let Some(rest) = line.strip_prefix(VALUES_TAG) {
        return LineKind::Values(rest.split_whitespace().collect());
    }

    match TAGGED_LINE.captures(line) {
        Some(caps) => {
            let (Some(tag), Some(text)) = (caps.get(1), caps.get(2)) else {
                return LineKind::Other;
            };
            LineKind::Tagged {
                tag: tag.as_str(),
                text: text.as_str().trim(),
            }
        }
        None => LineKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_handles_every_line_ending() {
        let unix: Vec<_> = split_lines("a\nb\n").collect();
        let windows: Vec<_> = split_lines("a\r\nb\r\n").collect();
        let mac: Vec<_> = split_lines("a\rb\r").collect();
        let mixed: Vec<_> = split_lines("a\rb\r\nc\nd").collect();

        assert_eq!(unix, vec!["a", "b"]);
        assert_eq!(windows, vec!["a", "b"]);
        assert_eq!(mac, vec!["a", "b"]);
        assert_eq!(mixed, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_split_lines_keeps_blank_lines() {
        let lines: Vec<_> = split_lines("a\n\nb\r\rc").collect();
        assert_eq!(lines, vec!["a", "", "b", "", "c"]);
    }

    #[test]
    fn test_block_start() {
        assert_eq!(classify_line("[Sim]"), LineKind::BlockStart);
        assert_eq!(classify_line("  [Sim] daylight factor  "), LineKind::BlockStart);
    }

    #[test]
    fn test_values_line() {
        assert_eq!(
            classify_line("[MMA] 10.2  500.0\t215.4"),
            LineKind::Values(vec!["10.2", "500.0", "215.4"])
        );
        assert_eq!(classify_line("[MMA]"), LineKind::Values(vec![]));
    }

    #[test]
    fn test_tagged_line() {
        assert_eq!(
            classify_line("[Metric] Daylight Factor (%)"),
            LineKind::Tagged {
                tag: "Metric",
                text: "Daylight Factor (%)"
            }
        );
    }

    #[test]
    fn test_untagged_lines() {
        assert_eq!(classify_line(""), LineKind::Other);
        assert_eq!(classify_line("1.0 2.0 3.0"), LineKind::Other);
        assert_eq!(classify_line("[-bad] tag start"), LineKind::Other);
    }

    #[test]
    fn test_description_skips_structural_tags() {
        assert_eq!(classify_line("[Date] 21 Mar 12:00").description(), None);
        assert_eq!(classify_line("[Period] annual").description(), None);
        assert_eq!(classify_line("[Metric]   ").description(), None);
        assert_eq!(
            classify_line("[Metric] sDA 300/50%").description(),
            Some("[Metric] sDA 300/50%".to_string())
        );
    }
}
