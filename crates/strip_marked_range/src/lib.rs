// crates/strip_marked_range/src/lib.rs

use std::fmt;

pub mod processor;

/// Splits `content` into lines, each keeping its own terminator (`\n`, `\r\n` or a lone `\r`).
/// A trailing line without a terminator is kept as-is; empty content has no lines.
pub fn split_lines(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let line_end = match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => i + 2,
            b'\r' | b'\n' => i + 1,
            _ => {
                i += 1;
                continue;
            }
        };
        // ASCII terminators always sit on char boundaries.
        lines.push(&content[line_start..line_end]);
        line_start = line_end;
        i = line_end;
    }

    if line_start < bytes.len() {
        lines.push(&content[line_start..]);
    }
    lines
}

/// Indices of the last line containing each marker, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerPositions {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

/// Lines `start..end` are removed; the line at `end` is kept.
/// Only built by `MarkerPositions::range`, so `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRange {
    start: usize,
    end: usize,
}

impl MarkerRange {
    /// Index of the first removed line.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index of the first line kept after the removed range.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of lines the splice drops.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl MarkerPositions {
    /// Returns `Ok(None)` unless both markers were found, and an error when the
    /// start marker sits at or after the end marker.
    pub fn range(&self) -> Result<Option<MarkerRange>, StripError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start >= end => {
                Err(StripError::InvertedRange { start, end })
            }
            (Some(start), Some(end)) => Ok(Some(MarkerRange { start, end })),
            _ => Ok(None),
        }
    }
}

/// Errors produced while computing the edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripError {
    /// The last start marker does not precede the last end marker.
    InvertedRange { start: usize, end: usize },
}

impl fmt::Display for StripError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedRange { start, end } => write!(
                f,
                "start marker on line {} does not precede end marker on line {}",
                start, end
            ),
        }
    }
}

impl std::error::Error for StripError {}

/// Scans every line and records the index of the last line containing each marker.
/// Both markers are checked on every line; one line may match both.
pub fn locate_markers(lines: &[&str], start_marker: &str, end_marker: &str) -> MarkerPositions {
    let mut positions = MarkerPositions::default();
    let mut start_hits = 0;
    let mut end_hits = 0;

    for (i, line) in lines.iter().enumerate() {
        if line.contains(start_marker) {
            positions.start = Some(i);
            start_hits += 1;
        }
        if line.contains(end_marker) {
            positions.end = Some(i);
            end_hits += 1;
        }
    }

    log::debug!(
        "start marker matched {} line(s), end marker matched {} line(s)",
        start_hits,
        end_hits
    );
    positions
}

/// Lines before `range.start()` followed by lines from `range.end()` onwards.
/// A range computed for a longer document is clamped to `lines`.
pub fn splice_lines<'a>(lines: &[&'a str], range: MarkerRange) -> Vec<&'a str> {
    let end = range.end.min(lines.len());
    let start = range.start.min(end);
    let mut kept = Vec::with_capacity(lines.len() - (end - start));
    kept.extend_from_slice(&lines[..start]);
    kept.extend_from_slice(&lines[end..]);
    kept
}

/// Result of stripping a document in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripOutcome {
    Stripped { range: MarkerRange, content: String },
    MarkersNotFound(MarkerPositions),
}

/// Removes the marked range from `content` without touching the filesystem.
pub fn strip_marked_range(
    content: &str,
    start_marker: &str,
    end_marker: &str,
) -> Result<StripOutcome, StripError> {
    let lines = split_lines(content);
    let positions = locate_markers(&lines, start_marker, end_marker);

    let range = match positions.range()? {
        Some(range) => range,
        None => return Ok(StripOutcome::MarkersNotFound(positions)),
    };

    let content = splice_lines(&lines, range).concat();
    Ok(StripOutcome::Stripped { range, content })
}
