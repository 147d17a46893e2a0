//! Beat line placement.

use crate::chart::Timeline;

/// Times of the beat lines, ascending.
///
/// Lines are placed every `60 / tempo * 4` seconds from the start of each tempo region, and on every
/// tempo change itself, up to `max_time` (exclusive for stepped lines). When `max_time` is `None`, the
/// time of the last note is used.
///
/// A tempo region ends exactly on its tempo change note, so stepping errors never carry over to the
/// next region.
///
/// One line is allocated per step, so `max_time` should stay within the drawn range. A non-finite
/// `max_time` gives no lines, and a region stops once a step no longer advances the time.
#[must_use]
pub fn beat_lines(timeline: &Timeline, max_time: Option<f64>) -> Vec<f64> {
    let Some(max_time) = max_time
        .or_else(|| timeline.last_time())
        .filter(|max_time| max_time.is_finite())
    else {
        return vec![];
    };
    let mut tempo = timeline.base_tempo();
    let mut time = 0.0;
    let mut lines = vec![];
    let mut changes = timeline.tempo_changes();
    loop {
        let next_change = changes.next();
        let limit = next_change.map_or(max_time, |(note, _)| note.time());
        let delta = tempo.seconds_per_unit();
        loop {
            let next = time + delta;
            if next >= limit || next <= time {
                break;
            }
            time = next;
            lines.push(time);
        }
        let Some((note, new_tempo)) = next_change else {
            break;
        };
        tempo = new_tempo;
        time = note.time();
        lines.push(time);
    }
    lines
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chart::{ParseOptions, parse_chart};

    fn timeline(notes: &str) -> Timeline {
        parse_chart(
            &format!(r#"{{"info": {{"bpm": 120, "dir": "x", "delay": 0}}, "notes": {notes}}}"#),
            ParseOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn constant_tempo() {
        // 120 BPM: a line every 2 seconds, last note at 7 seconds
        let timeline = timeline("[[0, 2, 1, 0, 0, 10], [3, 2, 2, 0, 1, 10]]");
        assert_eq!(beat_lines(&timeline, None), vec![2.0, 4.0, 6.0]);
        assert_eq!(beat_lines(&timeline, Some(8.0)), vec![2.0, 4.0, 6.0]);
        assert_eq!(beat_lines(&timeline, Some(8.5)), vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn tempo_change_is_a_line() {
        // 1.5 units at 120 BPM (3s), then 240 BPM: a line every second
        let timeline = timeline("[[1, 2, 2, 0, 1, 2, 240], [4, 2, 1, 0, 0, 10]]");
        assert_eq!(timeline.notes()[0].time(), 3.0);
        assert_eq!(timeline.notes()[1].time(), 5.5);
        assert_eq!(beat_lines(&timeline, None), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn non_finite_limit() {
        let timeline = timeline("[[0, 2, 1, 0, 0, 10], [3, 2, 2, 0, 1, 10]]");
        assert_eq!(beat_lines(&timeline, Some(f64::INFINITY)), Vec::<f64>::new());
        assert_eq!(beat_lines(&timeline, Some(f64::NAN)), Vec::<f64>::new());
    }

    #[test]
    fn stops_when_steps_vanish() {
        // the change lands near 240000s, where a step of 2.4e-12s is below the float spacing
        let timeline = parse_chart(
            r#"{"info": {"bpm": 0.001, "dir": "x", "delay": 0},
                "notes": [[1, 2, 1, 0, 0, 2, 1e14], [1, 2, 1, 0, 0, 10]]}"#,
            ParseOptions::default(),
        )
        .unwrap();
        let change = timeline.notes()[0].time();
        assert_eq!(beat_lines(&timeline, Some(1e6)), vec![change]);
    }

    #[test]
    fn empty_chart() {
        assert_eq!(beat_lines(&timeline("[]"), None), Vec::<f64>::new());
        assert_eq!(beat_lines(&timeline("[]"), Some(4.5)), vec![2.0, 4.0]);
    }
}
