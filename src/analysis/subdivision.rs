//! Detection of regular beat subdivisions.

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

use super::time_key;
use crate::chart::{Bpm, Timeline};

/// Maximum distance between a ratio and its nearest integer to count as a subdivision.
pub const SUBDIVISION_TOLERANCE: f64 = 0.05;

/// The beat at `time` is split into `split` parts until the next note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Subdivision {
    /// Time of the note starting the interval.
    pub time: f64,
    /// Number of parts a beat-split unit is divided into, always even and non-zero.
    pub split: u64,
}

/// Finds regular subdivisions between adjacent distinct times of the visual notes.
///
/// For each time but the last, the ratio of the beat-split unit length at that time's tempo to the
/// gap until the next time is taken. It is reported when it is within [`SUBDIVISION_TOLERANCE`] of
/// an even non-zero integer.
#[must_use]
pub fn subdivisions(timeline: &Timeline) -> Vec<Subdivision> {
    let mut tempo_at: HashMap<u64, Bpm> = HashMap::new();
    for note in timeline.visual_notes() {
        tempo_at.insert(time_key(note.time()), note.tempo());
    }
    timeline
        .visual_notes()
        .map(|note| note.time())
        .sorted_by(f64::total_cmp)
        .dedup()
        .tuple_windows()
        .filter_map(|(time, next)| {
            let tempo = tempo_at.get(&time_key(time))?;
            let ratio = tempo.seconds_per_unit() / (next - time);
            let rounded = ratio.round_ties_even();
            if (ratio - rounded).abs() >= SUBDIVISION_TOLERANCE {
                return None;
            }
            let split = rounded.max(0.0) as u64;
            (split != 0 && split % 2 == 0).then_some(Subdivision { time, split })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chart::{ParseOptions, parse_chart};

    #[test]
    fn detects_even_splits_only() {
        // 120 BPM, one unit is 2 seconds
        let timeline = parse_chart(
            r#"{"info": {"bpm": 120, "dir": "x", "delay": 0}, "notes": [
                [0, 2, 1, 0, 0, 10],
                [0, 2, 4, 1, 1, 10],
                [0, 2, 2, 0, 1, 10],
                [0, 2, 6, 0, 5, 10],
                [1, 2, 1, 0, 0, 10],
                [2, 2, 1, 0, 0, 10],
                [2, 2, 1, 1, 0, 10]
            ]}"#,
            ParseOptions::default(),
        )
        .unwrap();
        // 1.0 -> 5/3 is split into 3, 5/3 -> 2.0 into 6, 2.0 -> 4.0 into 1
        assert_eq!(
            subdivisions(&timeline),
            vec![
                Subdivision {
                    time: 0.0,
                    split: 4
                },
                Subdivision {
                    time: 0.5,
                    split: 4
                },
                Subdivision {
                    time: timeline.notes()[3].time(),
                    split: 6,
                },
            ]
        );
    }

    #[test]
    fn tolerance_boundary() {
        // gap of 0.39 seconds: ratio 5.128..., too far from 5
        // gap of 0.98 seconds: ratio 2.0408..., within tolerance of 2
        let timeline = parse_chart(
            r#"{"info": {"bpm": 120, "dir": "x", "delay": 0}, "notes": [
                [0, 2, 100, 0, 0, 10],
                [0, 2, 200, 0, 39, 10],
                [0, 2, 200, 0, 137, 10]
            ]}"#,
            ParseOptions::default(),
        )
        .unwrap();
        let found = subdivisions(&timeline);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].split, 2);
    }
}
