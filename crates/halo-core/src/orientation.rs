//! Accelerometer-based face orientation.
//!
//! The badge hangs from a lanyard, so "upside down" is a real steady
//! state: the wearer lifts it toward themselves and the face rotates
//! 180°. Orientation is recomputed from a fresh accelerometer sample
//! every tick with a single threshold and no hysteresis, so the flip
//! flag can flicker while the badge is held near the boundary.

/// One accelerometer sample in raw sensor units (≈ m/s² per axis).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// X-axis reading below which the badge counts as inverted.
///
/// Hanging normally the x axis reads about +9.8, fully inverted about
/// -9.8; -5 is about right for "lifted up toward the wearer a bit".
pub const FLIP_THRESHOLD: f32 = -5.0;

/// Accelerometer collaborator contract.
pub trait OrientationSensor {
    fn acceleration(&mut self) -> AccelSample;
}

/// Whether a sample puts the badge in the inverted orientation.
///
/// Strict less-than: a reading exactly at [`FLIP_THRESHOLD`] is still
/// upright.
pub fn is_flipped(sample: &AccelSample) -> bool {
    sample.x < FLIP_THRESHOLD
}
