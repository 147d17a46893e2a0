//! Errors on decoding a chart and building its timeline.

use thiserror::Error;

use super::{
    kind::{GroupFamily, GroupId, NoteCode},
    span::SourceSpan,
};

/// Malformed or missing input fields.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The text is not a JSON document of the expected shape.
    #[error("malformed chart document: {message}")]
    Document {
        /// Description from the JSON decoder.
        message: String,
        /// Where decoding stopped.
        span: SourceSpan,
    },
    /// A metadata field is missing or has a wrong type.
    #[error("malformed chart info at `{path}`: {message}")]
    Info {
        /// Path to the offending field, such as `info.bpm`.
        path: String,
        /// Description from the JSON decoder.
        message: String,
        /// Span of the `info` object.
        span: SourceSpan,
    },
    /// An event is not an array of the expected shape.
    #[error("malformed event #{index} at `{path}`: {message}")]
    Event {
        /// Index of the event in the `notes` array.
        index: usize,
        /// Path to the offending element, such as `notes[3][2]`.
        path: String,
        /// Description from the JSON decoder.
        message: String,
        /// Span of the event.
        span: SourceSpan,
    },
    /// The note type code is not known.
    #[error("unknown note type code {code} in event #{index}")]
    UnknownNoteKind {
        /// Index of the event in the `notes` array.
        index: usize,
        /// The unknown code.
        code: u32,
        /// Span of the event.
        span: SourceSpan,
    },
    /// A required kind-specific argument is absent or has a wrong type.
    #[error("event #{index} of {code:?} requires argument {position} as {expected}")]
    InvalidArgument {
        /// Index of the event in the `notes` array.
        index: usize,
        /// Kind of the event.
        code: NoteCode,
        /// Position of the argument in the event array.
        position: usize,
        /// What was expected there.
        expected: &'static str,
        /// Span of the event.
        span: SourceSpan,
    },
    /// A division count would make a division by zero.
    #[error(
        "event #{index} has {position_divisions} position divisions and {beat_divisions} beat divisions, but needs at least 2 and 1"
    )]
    ZeroDivisions {
        /// Index of the event in the `notes` array.
        index: usize,
        /// Number of lane positions.
        position_divisions: u32,
        /// Denominator of the fractional beat.
        beat_divisions: u32,
        /// Span of the event.
        span: SourceSpan,
    },
    /// The lane position index is not less than the number of lane positions.
    #[error("event #{index} has position index {position_index} out of {position_divisions} positions")]
    PositionOutOfRange {
        /// Index of the event in the `notes` array.
        index: usize,
        /// Lane position index.
        position_index: u32,
        /// Number of lane positions.
        position_divisions: u32,
        /// Span of the event.
        span: SourceSpan,
    },
}

impl FormatError {
    /// Where the error is in the source text.
    #[must_use]
    pub const fn span(&self) -> SourceSpan {
        match self {
            FormatError::Document { span, .. }
            | FormatError::Info { span, .. }
            | FormatError::Event { span, .. }
            | FormatError::UnknownNoteKind { span, .. }
            | FormatError::InvalidArgument { span, .. }
            | FormatError::ZeroDivisions { span, .. }
            | FormatError::PositionOutOfRange { span, .. } => *span,
        }
    }
}

/// Errors on building a timeline from a chart.
///
/// Any of them aborts the build, so no partially timed or linked timeline is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// The input is malformed.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// A tempo in effect is zero, negative or not finite.
    #[error("invalid tempo {tempo} at musical time {musical_time}")]
    InvalidTempo {
        /// The offending tempo.
        tempo: f64,
        /// Musical time where it takes effect, `0` for the base tempo.
        musical_time: f64,
        /// Span of the event, or empty for the base tempo.
        span: SourceSpan,
    },
    /// A continuation or terminal note references a group without open predecessor.
    #[error("{family} group {group} is not open at musical time {musical_time}")]
    UnmatchedGroup {
        /// Family of the group.
        family: GroupFamily,
        /// The referenced group.
        group: GroupId,
        /// Musical time of the offending note.
        musical_time: f64,
        /// Span of the event.
        span: SourceSpan,
    },
    /// A begin note reuses a group id which is still open.
    #[error("{family} group {group} is opened again at musical time {musical_time} while it is open")]
    DuplicateGroup {
        /// Family of the group.
        family: GroupFamily,
        /// The reused group.
        group: GroupId,
        /// Musical time of the offending note.
        musical_time: f64,
        /// Span of the event.
        span: SourceSpan,
    },
    /// A group is still open at the end of the chart.
    #[error("{family} group {group} is never closed after musical time {musical_time}")]
    UnclosedGroup {
        /// Family of the group.
        family: GroupFamily,
        /// The unclosed group.
        group: GroupId,
        /// Musical time of the last note of the group.
        musical_time: f64,
        /// Span of the last note of the group.
        span: SourceSpan,
    },
}

impl ChartError {
    /// Where the error is in the source text.
    #[must_use]
    pub const fn span(&self) -> SourceSpan {
        match self {
            ChartError::Format(format) => format.span(),
            ChartError::InvalidTempo { span, .. }
            | ChartError::UnmatchedGroup { span, .. }
            | ChartError::DuplicateGroup { span, .. }
            | ChartError::UnclosedGroup { span, .. } => *span,
        }
    }
}
