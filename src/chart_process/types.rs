//! Type definition module

use serde::{Deserialize, Serialize};

/// Scroll distance from the chart start, in the same unit as [`ScrollConfig::height_factor`].
///
/// It only grows as time passes, so a renderer usually draws a note at `total_height - y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct YCoordinate(pub f64);

impl YCoordinate {
    /// Get the internal value
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0
    }
}

/// Parameters of the time to scroll distance mapping.
///
/// Speed scales are clamped into `min_speed_scale..=max_speed_scale`. The mapping is monotonic only while
/// `min_speed_scale` is positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Scroll distance of one second at scale `1.0`.
    pub height_factor: f64,
    /// Lower bound of speed scales.
    pub min_speed_scale: f64,
    /// Upper bound of speed scales.
    pub max_speed_scale: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            height_factor: 300.0,
            min_speed_scale: 0.5,
            max_speed_scale: 2.0,
        }
    }
}

impl ScrollConfig {
    /// Clamps a raw speed scale into the configured bounds.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        self.min_speed_scale.max(scale).min(self.max_speed_scale)
    }
}

/// Seconds displayed as `minutes:seconds`, such as `1:5.25` for 65.25 seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeLabel(pub f64);

impl std::fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let minutes = (self.0 / 60.0).floor();
        let seconds = self.0.rem_euclid(60.0);
        write!(f, "{minutes}:{seconds:.2}")
    }
}
