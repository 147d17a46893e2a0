//! Read-only analyses over a built timeline.
//!
//! - [`beat_lines`] places a line every beat-split unit across tempo regions.
//! - [`coincidence`] finds notes to be hit at the same time.
//! - [`subdivision`] detects how finely the beat is split between adjacent notes.
//!
//! Times are compared with exact equality, not with a tolerance. Notes of the same musical time always
//! resolve to bit-identical times, but musical times that differ only by rounding error are kept apart.

pub mod beat_lines;
pub mod coincidence;
pub mod subdivision;

pub use self::{
    beat_lines::beat_lines,
    coincidence::{CoincidentGroup, coincident_groups},
    subdivision::{SUBDIVISION_TOLERANCE, Subdivision, subdivisions},
};

/// Hash key of a time, equal for times comparing equal with `==`.
fn time_key(time: f64) -> u64 {
    if time == 0.0 { 0 } else { time.to_bits() }
}
