//! Fancy diagnostics support using `ariadne`.
//!
//! Every [`ChartError`] knows the byte span of the offending part of the chart text, so it can be
//! converted into an `ariadne::Report` and ariadne handles row/column calculations for display.
//!
//! # Usage Example
//!
//! ```rust
//! use chainbeet::{
//!     chart::{ParseOptions, parse_chart},
//!     diagnostics::emit_chart_error,
//! };
//!
//! let source = r#"{"info": {"bpm": 120, "dir": "x", "delay": 0}, "notes": [[0, 2, 1, 0, 0, 21, 5]]}"#;
//! if let Err(err) = parse_chart(source, ParseOptions::default()) {
//!     emit_chart_error("chart.json", source, &err);
//! }
//! ```

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::chart::ChartError;

/// Simple source container that holds the filename and source text.
pub struct SimpleSource<'a> {
    /// Name of the source file.
    name: &'a str,
    /// Source text content.
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Create a new source container instance.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Get source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Get source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Trait for converting positioned errors to `ariadne::Report`.
pub trait ToAriadne {
    /// Convert error to ariadne Report.
    ///
    /// # Parameters
    /// * `src` - Source file container (used for filename, ariadne handles row/column calculation)
    fn to_report<'a>(&self, src: &SimpleSource<'a>)
    -> Report<'a, (String, std::ops::Range<usize>)>;
}

/// Helper to build a styled ariadne `Report` consistently.
#[must_use]
pub fn build_report<'a>(
    src: &SimpleSource<'a>,
    kind: ReportKind<'a>,
    range: std::ops::Range<usize>,
    title: &str,
    label_message: impl ToString,
    color: Color,
) -> Report<'a, (String, std::ops::Range<usize>)> {
    let filename = src.name().to_string();
    Report::build(kind, (filename.clone(), range.clone()))
        .with_message(title)
        .with_label(
            Label::new((filename, range))
                .with_message(label_message.to_string())
                .with_color(color),
        )
        .finish()
}

impl ToAriadne for ChartError {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        let range = self.span().as_range();
        let range = range.start.min(src.text().len())..range.end.min(src.text().len());
        let (title, label) = match self {
            ChartError::Format(_) => ("malformed chart", "here"),
            ChartError::InvalidTempo { .. } => ("invalid tempo", "this tempo is not positive"),
            ChartError::UnmatchedGroup { .. } => ("unmatched group", "no open group for this note"),
            ChartError::DuplicateGroup { .. } => ("duplicate group", "this group is already open"),
            ChartError::UnclosedGroup { .. } => ("unclosed group", "the group ends here"),
        };
        build_report(
            src,
            ReportKind::Error,
            range,
            &format!("{title}: {self}"),
            label,
            Color::Red,
        )
    }
}

/// Convenience method: render a `ChartError` to stderr.
///
/// # Parameters
/// * `name` - Name of the source file, used for display in diagnostic information
/// * `source` - Complete chart source text
/// * `error` - The error to display
pub fn emit_chart_error(name: &str, source: &str, error: &ChartError) {
    let simple = SimpleSource::new(name, source);
    let report = error.to_report(&simple);
    let _ = report.eprint((name.to_string(), Source::from(source)));
}

/// Collect `ariadne::Report` instances for a list of errors without printing.
///
/// This is useful in tests to verify diagnostics can be generated while keeping test output clean.
#[must_use]
pub fn collect_chart_reports<'a>(
    name: &'a str,
    source: &'a str,
    errors: impl IntoIterator<Item = &'a ChartError>,
) -> Vec<Report<'a, (String, std::ops::Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    errors.into_iter().map(|e| e.to_report(&simple)).collect()
}
