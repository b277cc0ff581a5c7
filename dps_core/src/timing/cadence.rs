use crate::config::TimingConstants;
use crate::frame::FinalAttributes;
use serde::{Deserialize, Serialize};

/// Theoretical attack cadence before animation realization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cadence {
    /// Clamped attack speed
    pub attack_speed: f64,
    /// Seconds between attacks
    pub attack_interval: f64,
    /// Interval in frames, unrounded
    pub raw_frames: f64,
    /// Interval in whole frames after rounding or correction
    pub frames: f64,
}

/// Clamp attack speed, derive the interval and snap it to frames
///
/// A frame correction only applies when the interval falls between frames:
/// the count then rounds up and adds the correction. Otherwise it rounds to
/// nearest. Never below one frame.
pub fn resolve_cadence(
    attrs: &FinalAttributes,
    frame_corr: Option<f64>,
    timing: &TimingConstants,
) -> Cadence {
    let attack_speed = attrs
        .attack_speed
        .clamp(timing.attack_speed_min, timing.attack_speed_max);
    let attack_interval = attrs.base_attack_time * 100.0 / attack_speed;
    let raw_frames = attack_interval * timing.fps;
    let integral = (raw_frames - raw_frames.round()).abs() < 1e-9;
    let frames = match frame_corr {
        Some(corr) if !integral => raw_frames.ceil() + corr,
        _ => raw_frames.round(),
    };

    Cadence {
        attack_speed,
        attack_interval,
        raw_frames,
        frames: frames.max(1.0),
    }
}
