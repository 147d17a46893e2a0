//! Detection of notes hit at the same time.

use std::collections::HashMap;

use serde::Serialize;

use super::time_key;
use crate::chart::{Note, Timeline};

/// Two or more visual notes sharing exactly the same time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoincidentGroup<'a> {
    /// The shared time.
    pub time: f64,
    /// The notes, ordered by lane position.
    pub notes: Vec<&'a Note>,
}

impl CoincidentGroup<'_> {
    /// Lane positions of the leftmost and rightmost notes.
    #[must_use]
    pub fn span(&self) -> (f64, f64) {
        let first = self.notes.first().map_or(0.0, |note| note.position());
        let last = self.notes.last().map_or(0.0, |note| note.position());
        (first, last)
    }
}

/// Groups the visual notes by time and keeps the groups of two or more notes.
///
/// Groups are ordered by their first note in the timeline. Notes of the same position keep timeline order.
#[must_use]
pub fn coincident_groups(timeline: &Timeline) -> Vec<CoincidentGroup<'_>> {
    let mut index_by_time = HashMap::new();
    let mut groups: Vec<CoincidentGroup> = vec![];
    for note in timeline.visual_notes() {
        let index = *index_by_time
            .entry(time_key(note.time()))
            .or_insert_with(|| {
                groups.push(CoincidentGroup {
                    time: note.time(),
                    notes: vec![],
                });
                groups.len() - 1
            });
        if let Some(group) = groups.get_mut(index) {
            group.notes.push(note);
        }
    }
    groups.retain(|group| group.notes.len() >= 2);
    for group in &mut groups {
        group
            .notes
            .sort_by(|a, b| a.position().total_cmp(&b.position()));
    }
    groups
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chart::{ParseOptions, parse_chart};

    #[test]
    fn groups_by_exact_time() {
        let timeline = parse_chart(
            r#"{"info": {"bpm": 120, "dir": "x", "delay": 0}, "notes": [
                [0, 5, 1, 3, 0, 10],
                [0, 5, 1, 1, 0, 10],
                [0, 5, 1, 2, 0, 1, "bgm.ogg"],
                [1, 5, 1, 0, 0, 10],
                [0, 5, 2, 4, 1, 10],
                [0, 5, 4, 0, 2, 40, 0.5]
            ]}"#,
            ParseOptions::default(),
        )
        .unwrap();
        let groups = coincident_groups(&timeline);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].time, 0.0);
        let positions: Vec<f64> = groups[0].notes.iter().map(|note| note.position()).collect();
        assert_eq!(positions, vec![0.25, 0.75]);
        assert_eq!(groups[1].time, 1.0);
        let indices: Vec<usize> = groups[1].notes.iter().map(|note| note.raw().index).collect();
        assert_eq!(indices, vec![5, 4]);
        assert_eq!(groups[1].span(), (0.0, 1.0));
    }
}
