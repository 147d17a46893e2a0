//! Resolved notes.

use serde::Serialize;

use super::{
    bpm::Bpm,
    error::{ChartError, FormatError},
    kind::{GroupId, NoteCode, NoteKind},
    raw::RawEvent,
};

/// Handle of a note, which is its index in [`super::timeline::Timeline::notes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NoteId(pub usize);

/// A note with its absolute time resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    id: NoteId,
    kind: NoteKind,
    position: f64,
    musical_time: f64,
    time: f64,
    tempo: Bpm,
    prev: Option<NoteId>,
    next: Option<NoteId>,
    raw: RawEvent,
}

impl Note {
    pub(super) fn new(
        id: NoteId,
        kind: NoteKind,
        position: f64,
        time: f64,
        tempo: Bpm,
        raw: RawEvent,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            musical_time: raw.musical_time(),
            time,
            tempo,
            prev: None,
            next: None,
            raw,
        }
    }

    /// Handle of this note in its timeline.
    #[must_use]
    pub const fn id(&self) -> NoteId {
        self.id
    }

    /// Kind and kind-specific arguments.
    #[must_use]
    pub const fn kind(&self) -> &NoteKind {
        &self.kind
    }

    /// Lane coordinate in `[0, 1]`, already mirrored if requested.
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    /// Musical time in beat-split units.
    #[must_use]
    pub const fn musical_time(&self) -> f64 {
        self.musical_time
    }

    /// Absolute time in seconds from the chart start.
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Tempo in effect at this note. For a tempo change it is the tempo before the change.
    #[must_use]
    pub const fn tempo(&self) -> Bpm {
        self.tempo
    }

    /// The previous note in the same charge or chain group.
    #[must_use]
    pub const fn prev_linked(&self) -> Option<NoteId> {
        self.prev
    }

    /// The next note in the same charge or chain group.
    #[must_use]
    pub const fn next_linked(&self) -> Option<NoteId> {
        self.next
    }

    /// The event this note was resolved from.
    #[must_use]
    pub const fn raw(&self) -> &RawEvent {
        &self.raw
    }

    /// Shorthand for `self.kind().is_meta()`.
    #[must_use]
    pub const fn is_meta(&self) -> bool {
        self.kind.is_meta()
    }

    pub(super) const fn set_prev(&mut self, prev: NoteId) {
        self.prev = Some(prev);
    }

    pub(super) const fn set_next(&mut self, next: NoteId) {
        self.next = Some(next);
    }
}

/// Reads the kind and its arguments out of `raw`.
pub(super) fn resolve_kind(raw: &RawEvent) -> Result<NoteKind, ChartError> {
    let code =
        NoteCode::try_from(raw.code).map_err(|code| FormatError::UnknownNoteKind {
            index: raw.index,
            code,
            span: raw.span,
        })?;
    let args = ArgReader { raw, code };
    Ok(match code {
        NoteCode::Bgm => NoteKind::Bgm {
            file: args.string(0)?,
        },
        NoteCode::TempoChange => {
            let tempo = args.real(0)?;
            NoteKind::TempoChange {
                tempo: Bpm::new(tempo).ok_or(ChartError::InvalidTempo {
                    tempo,
                    musical_time: raw.musical_time(),
                    span: raw.span,
                })?,
            }
        }
        NoteCode::SpeedScale => NoteKind::SpeedScale {
            scale: args.real(0)?,
        },
        NoteCode::Tap => NoteKind::Tap,
        NoteCode::WideTap => NoteKind::WideTap {
            width: args.real(0)?,
        },
        NoteCode::ChargeBegin => NoteKind::ChargeBegin {
            group: args.group(0)?,
        },
        NoteCode::ChargeEnd => NoteKind::ChargeEnd {
            group: args.group(0)?,
        },
        NoteCode::ChargeMiddle => NoteKind::ChargeMiddle {
            group: args.group(0)?,
        },
        NoteCode::ChainBegin => NoteKind::ChainBegin {
            group: args.group(0)?,
        },
        NoteCode::ChainEnd => NoteKind::ChainEnd {
            group: args.group(0)?,
        },
        NoteCode::ChainMiddle => NoteKind::ChainMiddle {
            group: args.group(0)?,
        },
        NoteCode::WideChargeBegin => NoteKind::WideChargeBegin {
            group: args.group(0)?,
            width: args.real(1)?,
        },
        NoteCode::WideChargeEnd => NoteKind::WideChargeEnd {
            group: args.group(0)?,
            width: args.real(1)?,
        },
    })
}

/// Index of the first kind-specific argument in an event array.
const FIRST_ARG_POSITION: usize = 6;

struct ArgReader<'a> {
    raw: &'a RawEvent,
    code: NoteCode,
}

impl ArgReader<'_> {
    fn invalid(&self, nth: usize, expected: &'static str) -> FormatError {
        FormatError::InvalidArgument {
            index: self.raw.index,
            code: self.code,
            position: FIRST_ARG_POSITION + nth,
            expected,
            span: self.raw.span,
        }
    }

    fn real(&self, nth: usize) -> Result<f64, FormatError> {
        self.raw
            .args
            .get(nth)
            .and_then(|arg| arg.as_f64())
            .filter(|real| real.is_finite())
            .ok_or_else(|| self.invalid(nth, "a number"))
    }

    fn group(&self, nth: usize) -> Result<GroupId, FormatError> {
        self.raw
            .args
            .get(nth)
            .and_then(|arg| arg.as_int())
            .map(GroupId)
            .ok_or_else(|| self.invalid(nth, "an integer group id"))
    }

    fn string(&self, nth: usize) -> Result<String, FormatError> {
        self.raw
            .args
            .get(nth)
            .and_then(|arg| arg.as_str())
            .map(str::to_string)
            .ok_or_else(|| self.invalid(nth, "a string"))
    }
}
