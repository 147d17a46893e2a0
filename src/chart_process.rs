//! Chart processing for renderers.
//!
//! This module maps a built [`Timeline`] onto the scroll axis and computes the hints drawn alongside
//! the notes: combo counts, highlighted speed regions and the chart extent.

pub mod types;
pub mod y_calculator;

use serde::Serialize;

use crate::chart::Timeline;

pub use self::{
    types::{ScrollConfig, TimeLabel, YCoordinate},
    y_calculator::YCalculator,
};

/// Seconds appended after the last note when deciding how long the chart is drawn.
pub const TAIL_PADDING_SECONDS: f64 = 2.0;

/// Time until which the chart is drawn: the last note time plus [`TAIL_PADDING_SECONDS`].
///
/// Returns `None` for a chart without notes.
#[must_use]
pub fn chart_end_time(timeline: &Timeline) -> Option<f64> {
    timeline
        .last_time()
        .map(|time| time + TAIL_PADDING_SECONDS)
}

/// Number of visual notes strictly before `time`.
#[must_use]
pub fn combo_before(timeline: &Timeline, time: f64) -> usize {
    timeline
        .visual_notes()
        .filter(|note| note.time() < time)
        .count()
}

/// A time interval scrolled at a speed scale other than `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedRegion {
    /// Time of the speed scale note.
    pub start: f64,
    /// Time of the next speed scale note, or the end passed to [`speed_regions`].
    pub end: f64,
    /// Scale as written in the chart.
    pub raw_scale: f64,
    /// Scale after clamping.
    pub scale: f64,
}

/// Intervals where the speed scale is not `1.0`, in time order.
///
/// The last region lasts until `until`.
#[must_use]
pub fn speed_regions(timeline: &Timeline, config: &ScrollConfig, until: f64) -> Vec<SpeedRegion> {
    let scales: Vec<_> = timeline
        .speed_scales()
        .map(|(note, scale)| (note.time(), scale))
        .collect();
    scales
        .iter()
        .enumerate()
        .filter(|&(_, &(_, raw_scale))| raw_scale != 1.0)
        .map(|(i, &(start, raw_scale))| SpeedRegion {
            start,
            end: scales.get(i + 1).map_or(until, |&(next, _)| next),
            raw_scale,
            scale: config.clamp_scale(raw_scale),
        })
        .collect()
}
