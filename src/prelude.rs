//! Prelude module for the crate.
//!
//! You can use `use chainbeet::prelude::*;` to import the commonly used types at once.

pub use crate::analysis::{
    CoincidentGroup, SUBDIVISION_TOLERANCE, Subdivision, beat_lines, coincident_groups,
    subdivisions,
};
pub use crate::chart::{
    Bpm, ChartError, ChartInfo, FormatError, GroupFamily, GroupId, Note, NoteCode, NoteId,
    NoteKind, ParseOptions, RawArg, RawChart, RawEvent, SourceSpan, Timeline, TimelineBuilder,
    parse_chart,
};
pub use crate::chart_process::{
    ScrollConfig, SpeedRegion, TAIL_PADDING_SECONDS, TimeLabel, YCalculator, YCoordinate,
    chart_end_time, combo_before, speed_regions,
};
#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{SimpleSource, ToAriadne, emit_chart_error};
