//! Note kinds and their numeric codes in the chart encoding.

use serde::Serialize;

use super::bpm::Bpm;

/// Identifier correlating the notes of one charge hold or one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Family of linked notes. Group ids of different families never interfere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupFamily {
    /// Charge (long) notes, including wide ones.
    Charge,
    /// Chain notes.
    Chain,
}

impl std::fmt::Display for GroupFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupFamily::Charge => write!(f, "charge"),
            GroupFamily::Chain => write!(f, "chain"),
        }
    }
}

/// Numeric note type code, as written at index 5 of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u32)]
pub enum NoteCode {
    /// `1`: plays a background music file.
    Bgm = 1,
    /// `2`: changes the tempo.
    TempoChange = 2,
    /// `3`: changes the scroll speed scale.
    SpeedScale = 3,
    /// `10`: normal tap note.
    Tap = 10,
    /// `20`: start of a charge note.
    ChargeBegin = 20,
    /// `21`: end of a charge note.
    ChargeEnd = 21,
    /// `22`: waypoint of a charge note.
    ChargeMiddle = 22,
    /// `30`: head of a chain.
    ChainBegin = 30,
    /// `31`: tail of a chain.
    ChainEnd = 31,
    /// `32`: link of a chain.
    ChainMiddle = 32,
    /// `40`: wide tap note.
    WideTap = 40,
    /// `50`: start of a wide charge note.
    WideChargeBegin = 50,
    /// `51`: end of a wide charge note.
    WideChargeEnd = 51,
}

impl TryFrom<u32> for NoteCode {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Bgm,
            2 => Self::TempoChange,
            3 => Self::SpeedScale,
            10 => Self::Tap,
            20 => Self::ChargeBegin,
            21 => Self::ChargeEnd,
            22 => Self::ChargeMiddle,
            30 => Self::ChainBegin,
            31 => Self::ChainEnd,
            32 => Self::ChainMiddle,
            40 => Self::WideTap,
            50 => Self::WideChargeBegin,
            51 => Self::WideChargeEnd,
            other => return Err(other),
        })
    }
}

impl From<NoteCode> for u32 {
    fn from(value: NoteCode) -> Self {
        value as u32
    }
}

/// Kind of a resolved note with its kind-specific arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoteKind {
    /// Starts playing the background music file.
    Bgm {
        /// File name relative to the asset directory.
        file: String,
    },
    /// Changes the tempo from this note on.
    TempoChange {
        /// The tempo to be.
        tempo: Bpm,
    },
    /// Changes the scroll speed scale from this note on.
    SpeedScale {
        /// Raw scale factor, not clamped yet.
        scale: f64,
    },
    /// Normal tap note.
    Tap,
    /// Tap note spanning several lanes.
    WideTap {
        /// Width in lane coordinates.
        width: f64,
    },
    /// Start of a charge note.
    ChargeBegin {
        /// Charge group.
        group: GroupId,
    },
    /// Waypoint of a charge note.
    ChargeMiddle {
        /// Charge group.
        group: GroupId,
    },
    /// End of a charge note.
    ChargeEnd {
        /// Charge group.
        group: GroupId,
    },
    /// Start of a wide charge note.
    WideChargeBegin {
        /// Charge group.
        group: GroupId,
        /// Width in lane coordinates.
        width: f64,
    },
    /// End of a wide charge note.
    WideChargeEnd {
        /// Charge group.
        group: GroupId,
        /// Width in lane coordinates.
        width: f64,
    },
    /// Head of a chain.
    ChainBegin {
        /// Chain group.
        group: GroupId,
    },
    /// Link of a chain.
    ChainMiddle {
        /// Chain group.
        group: GroupId,
    },
    /// Tail of a chain.
    ChainEnd {
        /// Chain group.
        group: GroupId,
    },
}

impl NoteKind {
    /// The numeric code of this kind.
    #[must_use]
    pub const fn code(&self) -> NoteCode {
        match self {
            NoteKind::Bgm { .. } => NoteCode::Bgm,
            NoteKind::TempoChange { .. } => NoteCode::TempoChange,
            NoteKind::SpeedScale { .. } => NoteCode::SpeedScale,
            NoteKind::Tap => NoteCode::Tap,
            NoteKind::WideTap { .. } => NoteCode::WideTap,
            NoteKind::ChargeBegin { .. } => NoteCode::ChargeBegin,
            NoteKind::ChargeMiddle { .. } => NoteCode::ChargeMiddle,
            NoteKind::ChargeEnd { .. } => NoteCode::ChargeEnd,
            NoteKind::WideChargeBegin { .. } => NoteCode::WideChargeBegin,
            NoteKind::WideChargeEnd { .. } => NoteCode::WideChargeEnd,
            NoteKind::ChainBegin { .. } => NoteCode::ChainBegin,
            NoteKind::ChainMiddle { .. } => NoteCode::ChainMiddle,
            NoteKind::ChainEnd { .. } => NoteCode::ChainEnd,
        }
    }

    /// Whether this is a non-visual directive (background music, tempo or speed change).
    #[must_use]
    pub const fn is_meta(&self) -> bool {
        match self {
            NoteKind::Bgm { .. } | NoteKind::TempoChange { .. } | NoteKind::SpeedScale { .. } => {
                true
            }
            NoteKind::Tap
            | NoteKind::WideTap { .. }
            | NoteKind::ChargeBegin { .. }
            | NoteKind::ChargeMiddle { .. }
            | NoteKind::ChargeEnd { .. }
            | NoteKind::WideChargeBegin { .. }
            | NoteKind::WideChargeEnd { .. }
            | NoteKind::ChainBegin { .. }
            | NoteKind::ChainMiddle { .. }
            | NoteKind::ChainEnd { .. } => false,
        }
    }

    /// Whether this is a (wide) tap note.
    #[must_use]
    pub const fn is_tap(&self) -> bool {
        matches!(self, NoteKind::Tap | NoteKind::WideTap { .. })
    }

    /// Width of the wide variants.
    #[must_use]
    pub const fn width(&self) -> Option<f64> {
        match self {
            NoteKind::WideTap { width }
            | NoteKind::WideChargeBegin { width, .. }
            | NoteKind::WideChargeEnd { width, .. } => Some(*width),
            _ => None,
        }
    }

    /// Family and id of the group this note belongs to, if any.
    #[must_use]
    pub const fn group(&self) -> Option<(GroupFamily, GroupId)> {
        match *self {
            NoteKind::ChargeBegin { group }
            | NoteKind::ChargeMiddle { group }
            | NoteKind::ChargeEnd { group }
            | NoteKind::WideChargeBegin { group, .. }
            | NoteKind::WideChargeEnd { group, .. } => Some((GroupFamily::Charge, group)),
            NoteKind::ChainBegin { group }
            | NoteKind::ChainMiddle { group }
            | NoteKind::ChainEnd { group } => Some((GroupFamily::Chain, group)),
            NoteKind::Bgm { .. }
            | NoteKind::TempoChange { .. }
            | NoteKind::SpeedScale { .. }
            | NoteKind::Tap
            | NoteKind::WideTap { .. } => None,
        }
    }
}
