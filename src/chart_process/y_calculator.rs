//! Y-coordinate calculation module
//!
//! Maps absolute time to scroll distance. The distance is the integral of the speed scale over time,
//! where the scale is piecewise constant and changes at every speed scale note.

use crate::chart::Timeline;

use super::{ScrollConfig, YCoordinate};

/// A speed scale boundary with the distance scrolled until it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SpeedBoundary {
    time: f64,
    /// Clamped scale in effect after `time`.
    scale: f64,
    /// Unscaled distance accumulated up to `time`.
    accumulated: f64,
}

/// Y-coordinate calculator for a timeline.
///
/// The integral is accumulated once per boundary on construction, so [`YCalculator::get_y`] only
/// searches the boundary and adds the remainder. Times before the first boundary scroll at scale `1.0`.
#[derive(Debug, Clone)]
pub struct YCalculator {
    boundaries: Vec<SpeedBoundary>,
    config: ScrollConfig,
}

impl YCalculator {
    /// Create a new `YCalculator` from the speed scale notes of a timeline.
    #[must_use]
    pub fn new(timeline: &Timeline, config: ScrollConfig) -> Self {
        Self::from_scales(
            timeline
                .speed_scales()
                .map(|(note, scale)| (note.time(), scale)),
            config,
        )
    }

    /// Create a new `YCalculator` from pairs of boundary time and raw scale, sorted by time.
    #[must_use]
    pub fn from_scales(scales: impl IntoIterator<Item = (f64, f64)>, config: ScrollConfig) -> Self {
        let mut boundaries = Vec::new();
        let mut accumulated = 0.0;
        let mut last_time = 0.0;
        let mut current_scale = 1.0;
        for (time, raw_scale) in scales {
            accumulated += current_scale * (time - last_time);
            last_time = time;
            current_scale = config.clamp_scale(raw_scale);
            if current_scale != raw_scale {
                log::debug!("speed scale {raw_scale} at {time}s is clamped to {current_scale}");
            }
            boundaries.push(SpeedBoundary {
                time,
                scale: current_scale,
                accumulated,
            });
        }
        Self { boundaries, config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Get the Y coordinate at a given time.
    ///
    /// Only the boundaries strictly before `time` take effect, so `y` at a boundary equals the distance
    /// accumulated until it. Non-positive times map to zero.
    #[must_use]
    pub fn get_y(&self, time: f64) -> YCoordinate {
        let passed = self.boundaries.partition_point(|boundary| boundary.time < time);
        let (mut sum, last_time, scale) = passed
            .checked_sub(1)
            .and_then(|last| self.boundaries.get(last))
            .map_or((0.0, 0.0, 1.0), |boundary| {
                (boundary.accumulated, boundary.time, boundary.scale)
            });
        if time > last_time {
            sum += scale * (time - last_time);
        }
        YCoordinate(sum * self.config.height_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator(scales: &[(f64, f64)]) -> YCalculator {
        YCalculator::from_scales(
            scales.iter().copied(),
            ScrollConfig {
                height_factor: 1.0,
                ..ScrollConfig::default()
            },
        )
    }

    #[test]
    fn constant_speed_is_identity() {
        let calc = calculator(&[]);
        assert_eq!(calc.get_y(0.0), YCoordinate(0.0));
        assert_eq!(calc.get_y(2.5), YCoordinate(2.5));
        assert_eq!(calc.get_y(-1.0), YCoordinate(0.0));
    }

    #[test]
    fn piecewise_integral() {
        let calc = calculator(&[(1.0, 2.0), (3.0, 0.5)]);
        assert_eq!(calc.get_y(1.0), YCoordinate(1.0));
        assert_eq!(calc.get_y(2.0), YCoordinate(3.0));
        assert_eq!(calc.get_y(3.0), YCoordinate(5.0));
        assert_eq!(calc.get_y(5.0), YCoordinate(6.0));
    }

    #[test]
    fn scales_are_clamped() {
        let calc = calculator(&[(1.0, 10.0), (2.0, 0.0)]);
        assert_eq!(calc.get_y(2.0), YCoordinate(3.0));
        assert_eq!(calc.get_y(4.0), YCoordinate(4.0));
    }

    #[test]
    fn height_factor_scales_result() {
        let calc = YCalculator::from_scales([(1.0, 2.0)], ScrollConfig::default());
        assert_eq!(calc.get_y(1.5), YCoordinate(600.0));
    }

    #[test]
    fn monotonic() {
        let calc = calculator(&[(0.5, 0.7), (0.5, 1.8), (1.25, 0.5), (4.0, 1.0)]);
        let mut last = calc.get_y(0.0);
        for step in 1..=600 {
            let y = calc.get_y(step as f64 / 100.0);
            assert!(y >= last, "{y:?} < {last:?} at step {step}");
            last = y;
        }
    }
}
