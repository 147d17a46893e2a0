//! Timeline of resolved notes, and its builder.

use serde::Serialize;

use super::{
    bpm::Bpm,
    error::{ChartError, FormatError},
    kind::NoteKind,
    linker::NoteGraphLinker,
    note::{Note, NoteId, resolve_kind},
    raw::{ChartInfo, RawChart, RawEvent},
    span::SourceSpan,
};

/// Options for building a timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Whether to flip the lane positions horizontally.
    pub mirror: bool,
}

impl ParseOptions {
    /// Sets whether to flip the lane positions horizontally.
    #[must_use]
    pub const fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }
}

/// All notes of a chart in musical order, with absolute time and group links resolved.
///
/// Notes are never modified after the build, and can be addressed with [`NoteId`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    tempo: Bpm,
    directory: String,
    delay: i64,
    mirrored: bool,
    notes: Vec<Note>,
}

impl Timeline {
    /// Base tempo at the chart start.
    #[must_use]
    pub const fn base_tempo(&self) -> Bpm {
        self.tempo
    }

    /// Directory of the chart assets.
    #[must_use]
    pub fn asset_directory(&self) -> &str {
        &self.directory
    }

    /// Delay before the chart starts.
    #[must_use]
    pub const fn start_delay(&self) -> i64 {
        self.delay
    }

    /// Whether the lane positions are flipped.
    #[must_use]
    pub const fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// All notes in musical order, which is also non-decreasing in absolute time.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Gets the note of the handle.
    #[must_use]
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(id.0)
    }

    /// The previous note in the group of `note`.
    #[must_use]
    pub fn prev_of(&self, note: &Note) -> Option<&Note> {
        note.prev_linked().and_then(|id| self.note(id))
    }

    /// The next note in the group of `note`.
    #[must_use]
    pub fn next_of(&self, note: &Note) -> Option<&Note> {
        note.next_linked().and_then(|id| self.note(id))
    }

    /// Whole path of the group containing the note, from its head to its tail.
    ///
    /// A note without group links is a path of itself.
    #[must_use]
    pub fn group_path(&self, id: NoteId) -> Vec<&Note> {
        let Some(mut head) = self.note(id) else {
            return vec![];
        };
        while let Some(prev) = self.prev_of(head) {
            head = prev;
        }
        std::iter::successors(Some(head), |note| self.next_of(note)).collect()
    }

    /// Tempo change notes.
    pub fn tempo_changes(&self) -> impl Iterator<Item = (&Note, Bpm)> {
        self.notes.iter().filter_map(|note| match note.kind() {
            NoteKind::TempoChange { tempo } => Some((note, *tempo)),
            _ => None,
        })
    }

    /// Speed scale notes with their raw scale.
    pub fn speed_scales(&self) -> impl Iterator<Item = (&Note, f64)> {
        self.notes.iter().filter_map(|note| match note.kind() {
            NoteKind::SpeedScale { scale } => Some((note, *scale)),
            _ => None,
        })
    }

    /// Notes to be drawn, that is all but background music, tempo and speed changes.
    pub fn visual_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(|note| !note.is_meta())
    }

    /// Time of the latest note, or `None` if there is no note.
    #[must_use]
    pub fn last_time(&self) -> Option<f64> {
        self.notes.iter().map(Note::time).reduce(f64::max)
    }
}

/// Resolves raw events into a [`Timeline`].
///
/// It walks the events in musical order, keeping the time and musical time of the last tempo change as anchors.
/// The time of a note is `anchor_time + 60 / tempo * 4 * (musical_time - anchor_musical_time)`.
/// Only tempo changes move the anchors, so notes of the same musical time get exactly the same time.
#[derive(Debug)]
pub struct TimelineBuilder {
    info: ChartInfo,
    options: ParseOptions,
    base_tempo: Bpm,
    tempo: Bpm,
    anchor_time: f64,
    anchor_musical_time: f64,
    notes: Vec<Note>,
    linker: NoteGraphLinker,
}

impl TimelineBuilder {
    /// Creates a builder starting with the base tempo of `info`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidTempo`] if the base tempo is not positive.
    pub fn new(info: ChartInfo, options: ParseOptions) -> Result<Self, ChartError> {
        let tempo = Bpm::new(info.tempo).ok_or(ChartError::InvalidTempo {
            tempo: info.tempo,
            musical_time: 0.0,
            span: SourceSpan::EMPTY,
        })?;
        Ok(Self {
            info,
            options,
            base_tempo: tempo,
            tempo,
            anchor_time: 0.0,
            anchor_musical_time: 0.0,
            notes: vec![],
            linker: NoteGraphLinker::default(),
        })
    }

    /// Sorts the events by musical time and resolves all of them.
    ///
    /// Events of the same musical time keep their relative order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChartError`] found in the events.
    pub fn build(mut self, mut events: Vec<RawEvent>) -> Result<Timeline, ChartError> {
        events.sort_by(|a, b| a.musical_time().total_cmp(&b.musical_time()));
        for event in events {
            self.push(event)?;
        }
        self.finish()
    }

    fn push(&mut self, raw: RawEvent) -> Result<(), ChartError> {
        if raw.beat_divisions == 0 || raw.position_divisions < 2 {
            return Err(FormatError::ZeroDivisions {
                index: raw.index,
                position_divisions: raw.position_divisions,
                beat_divisions: raw.beat_divisions,
                span: raw.span,
            }
            .into());
        }
        if raw.position_index >= raw.position_divisions {
            return Err(FormatError::PositionOutOfRange {
                index: raw.index,
                position_index: raw.position_index,
                position_divisions: raw.position_divisions,
                span: raw.span,
            }
            .into());
        }
        let kind = resolve_kind(&raw)?;

        let musical_time = raw.musical_time();
        let time_delta =
            self.tempo.seconds_per_unit() * (musical_time - self.anchor_musical_time);
        let time = self.anchor_time + time_delta;

        let position_index = if self.options.mirror {
            raw.position_divisions - 1 - raw.position_index
        } else {
            raw.position_index
        };
        let position = position_index as f64 / (raw.position_divisions - 1) as f64;

        let tempo_before = self.tempo;
        if let NoteKind::TempoChange { tempo } = kind {
            log::trace!("tempo {tempo_before} -> {tempo} at {time}s (musical time {musical_time})");
            self.anchor_time += time_delta;
            self.anchor_musical_time = musical_time;
            self.tempo = tempo;
        }

        let id = NoteId(self.notes.len());
        self.notes
            .push(Note::new(id, kind, position, time, tempo_before, raw));
        self.linker.link_last(&mut self.notes)
    }

    fn finish(self) -> Result<Timeline, ChartError> {
        self.linker.finish(&self.notes)?;
        log::debug!(
            "built timeline: {} notes, {} tempo changes, ends at {:?}s",
            self.notes.len(),
            self.notes
                .iter()
                .filter(|note| matches!(note.kind(), NoteKind::TempoChange { .. }))
                .count(),
            self.notes.last().map(Note::time)
        );
        Ok(Timeline {
            tempo: self.base_tempo,
            directory: self.info.directory,
            delay: self.info.delay,
            mirrored: self.options.mirror,
            notes: self.notes,
        })
    }
}

impl RawChart {
    /// Builds the timeline of this chart.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError`] if the chart has invalid tempos, kinds or group links.
    pub fn into_timeline(self, options: ParseOptions) -> Result<Timeline, ChartError> {
        TimelineBuilder::new(self.info, options)?.build(self.events)
    }
}
