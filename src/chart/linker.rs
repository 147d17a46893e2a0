//! Linking of charge and chain notes into per-group paths.

use std::collections::HashMap;

use super::{
    error::ChartError,
    kind::{GroupFamily, GroupId, NoteKind},
    note::{Note, NoteId},
};

/// Tracks the open tail of every charge and chain group while notes are pushed in time order.
///
/// Links are pairs of `prev`/`next` handles, so every group becomes a simple path.
#[derive(Debug, Default)]
pub(super) struct NoteGraphLinker {
    charge_tails: HashMap<GroupId, NoteId>,
    chain_tails: HashMap<GroupId, NoteId>,
}

impl NoteGraphLinker {
    /// Links the last note of `notes` into its group.
    pub(super) fn link_last(&mut self, notes: &mut [Note]) -> Result<(), ChartError> {
        let Some(note) = notes.last() else {
            return Ok(());
        };
        let id = note.id();
        match *note.kind() {
            NoteKind::ChargeBegin { group } | NoteKind::WideChargeBegin { group, .. } => {
                if self.charge_tails.contains_key(&group) {
                    return Err(ChartError::DuplicateGroup {
                        family: GroupFamily::Charge,
                        group,
                        musical_time: note.musical_time(),
                        span: note.raw().span,
                    });
                }
                self.charge_tails.insert(group, id);
            }
            NoteKind::ChargeMiddle { group } => {
                let tail = Self::open_tail(&self.charge_tails, GroupFamily::Charge, group, note)?;
                connect(notes, tail, id);
                self.charge_tails.insert(group, id);
            }
            NoteKind::ChargeEnd { group } | NoteKind::WideChargeEnd { group, .. } => {
                let tail = Self::open_tail(&self.charge_tails, GroupFamily::Charge, group, note)?;
                connect(notes, tail, id);
                self.charge_tails.remove(&group);
            }
            NoteKind::ChainBegin { group } => {
                if let Some(replaced) = self.chain_tails.insert(group, id) {
                    log::trace!("chain group {group} restarts, previous tail {replaced:?}");
                }
            }
            NoteKind::ChainMiddle { group } | NoteKind::ChainEnd { group } => {
                let tail = Self::open_tail(&self.chain_tails, GroupFamily::Chain, group, note)?;
                connect(notes, tail, id);
                self.chain_tails.insert(group, id);
            }
            NoteKind::Bgm { .. }
            | NoteKind::TempoChange { .. }
            | NoteKind::SpeedScale { .. }
            | NoteKind::Tap
            | NoteKind::WideTap { .. } => {}
        }
        Ok(())
    }

    /// Checks that no charge group is left open. Chains never need closing.
    pub(super) fn finish(self, notes: &[Note]) -> Result<(), ChartError> {
        let unclosed = self
            .charge_tails
            .into_iter()
            .filter_map(|(group, tail)| notes.get(tail.0).map(|note| (group, note)))
            .min_by(|(_, a), (_, b)| a.id().cmp(&b.id()));
        match unclosed {
            Some((group, tail)) => Err(ChartError::UnclosedGroup {
                family: GroupFamily::Charge,
                group,
                musical_time: tail.musical_time(),
                span: tail.raw().span,
            }),
            None => Ok(()),
        }
    }

    fn open_tail(
        tails: &HashMap<GroupId, NoteId>,
        family: GroupFamily,
        group: GroupId,
        note: &Note,
    ) -> Result<NoteId, ChartError> {
        tails
            .get(&group)
            .copied()
            .ok_or_else(|| ChartError::UnmatchedGroup {
                family,
                group,
                musical_time: note.musical_time(),
                span: note.raw().span,
            })
    }
}

fn connect(notes: &mut [Note], prev: NoteId, next: NoteId) {
    if let Some(note) = notes.get_mut(prev.0) {
        note.set_next(next);
    }
    if let Some(note) = notes.get_mut(next.0) {
        note.set_prev(prev);
    }
}
