//! Byte spans into the chart source text.

use serde::Serialize;

/// A half-open byte range `start..end` inside the chart source text.
///
/// Spans are attached to decoded events so that errors found later, while
/// building the timeline, can still point at the offending part of the source.
/// Events constructed by hand carry [`SourceSpan::EMPTY`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceSpan {
    /// Start index in the source string (0-based, inclusive)
    start: usize,
    /// End index in the source string (0-based, exclusive)
    end: usize,
}

impl SourceSpan {
    /// The span of nothing, used for values not backed by any source text.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Instances a new `SourceSpan`. `end` is raised to `start` if it is smaller.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        let end = if end < start { start } else { end };
        Self { start, end }
    }

    /// Finds the span of `part`, which must be a sub-slice borrowed from `source`.
    ///
    /// Returns [`SourceSpan::EMPTY`] if `part` does not point into `source`.
    #[must_use]
    pub fn of_slice(source: &str, part: &str) -> Self {
        let base = source.as_ptr() as usize;
        let ptr = part.as_ptr() as usize;
        if ptr < base || ptr + part.len() > base + source.len() {
            return Self::EMPTY;
        }
        let start = ptr - base;
        Self::new(start, start + part.len())
    }

    /// Returns the start index of the span.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the end index of the span.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Returns the length of the span.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span's length is 0.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts into a `Range` for slicing or reporting.
    #[must_use]
    pub const fn as_range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Converts a 1-based line and column pair, as reported by `serde_json`, into a byte offset of `text`.
///
/// Positions past the end are clamped to `text.len()`.
#[must_use]
pub fn offset_of_line_column(text: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start = text
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum::<usize>();
    (line_start + column.saturating_sub(1)).min(text.len())
}
