//! The Chainbeet chart format and its timing model.
//!
//! A chart is processed in two phases:
//!
//! - [`raw`] decodes the JSON text into [`raw::ChartInfo`] and unordered [`raw::RawEvent`]s.
//! - [`timeline`] sorts the events by musical time, resolves their absolute time across tempo changes
//!   and links charge and chain notes of the same group, producing a [`timeline::Timeline`].
//!
//! Musical time is `beat + beat_index / beat_divisions` in beat-split units, and one unit lasts
//! `60 / tempo * 4` seconds.
//!
//! ```
//! use chainbeet::chart::{ParseOptions, parse_chart};
//!
//! let source = r#"{
//!     "info": {"bpm": 120, "dir": "x", "delay": 0},
//!     "notes": [[0, 2, 1, 0, 0, 2, 240], [0, 2, 1, 0, 1, 10]]
//! }"#;
//! let timeline = parse_chart(source, ParseOptions::default()).unwrap();
//! assert_eq!(timeline.notes()[1].time(), 1.0);
//! ```
//!
//! Group ids of charge notes must not be reused while the group is open. Chains have no terminal
//! requirement: a chain group stays open until the same id begins a new chain.

pub mod bpm;
pub mod error;
pub mod kind;
mod linker;
pub mod note;
pub mod raw;
pub mod span;
pub mod timeline;

pub use self::{
    bpm::Bpm,
    error::{ChartError, FormatError},
    kind::{GroupFamily, GroupId, NoteCode, NoteKind},
    note::{Note, NoteId},
    raw::{ChartInfo, RawArg, RawChart, RawEvent},
    span::SourceSpan,
    timeline::{ParseOptions, Timeline, TimelineBuilder},
};

/// Decodes the chart text and builds its timeline.
///
/// # Errors
///
/// Returns [`ChartError::Format`] if the text is malformed, or another [`ChartError`] if the chart has
/// invalid tempos or group links.
pub fn parse_chart(source: &str, options: ParseOptions) -> Result<Timeline, ChartError> {
    RawChart::from_json(source)?.into_timeline(options)
}
