//! Tempo values.

use serde::Serialize;
use thiserror::Error;

/// Beats per minute, which is always finite and positive.
///
/// One beat-split unit of the chart lasts [`Bpm::seconds_per_unit`] seconds, that is four beats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Bpm(f64);

impl Eq for Bpm {}
impl PartialOrd for Bpm {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Bpm {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<Bpm> for f64 {
    fn from(value: Bpm) -> Self {
        value.as_f64()
    }
}

/// Error type for `Bpm::try_from`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("finite positive tempo expected: {0}")]
pub struct InvalidBpmError(pub f64);

impl TryFrom<f64> for Bpm {
    type Error = InvalidBpmError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        (value.is_finite() && value > 0.0)
            .then_some(Self(value))
            .ok_or(InvalidBpmError(value))
    }
}

impl AsRef<f64> for Bpm {
    fn as_ref(&self) -> &f64 {
        &self.0
    }
}

impl std::fmt::Display for Bpm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Bpm {
    /// Creates a new `Bpm` if `float` is finite and positive, otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn new(float: f64) -> Option<Self> {
        Self::try_from(float).ok()
    }

    /// Gets the internal value.
    #[inline]
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0
    }

    /// Seconds taken by one beat-split unit (four beats): `60 / bpm * 4`.
    #[inline]
    #[must_use]
    pub fn seconds_per_unit(self) -> f64 {
        60.0 / self.0 * 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_and_non_finite() {
        assert!(Bpm::new(0.0).is_none());
        assert!(Bpm::new(-120.0).is_none());
        assert!(Bpm::new(f64::NAN).is_none());
        assert!(Bpm::new(f64::INFINITY).is_none());
        assert_eq!(Bpm::try_from(-1.0), Err(InvalidBpmError(-1.0)));
    }

    #[test]
    fn unit_length() {
        let bpm = Bpm::new(120.0).unwrap();
        assert_eq!(bpm.seconds_per_unit(), 2.0);
        assert_eq!(Bpm::new(240.0).unwrap().seconds_per_unit(), 1.0);
    }
}
