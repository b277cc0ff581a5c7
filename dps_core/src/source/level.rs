//! LevelSource - attributes from the per-phase level curve

use crate::data::{BasicAttributes, KeyFrame};
use crate::source::AttributeSource;

/// Linear interpolation across key frames at `x`, clamped to the covered range
///
/// ATK, DEF and max HP round to whole points the way the game shows them;
/// magic resistance interpolates unrounded. Timing, block and cost values come
/// from the lower key frame.
pub fn interpolate(frames: &[KeyFrame], x: f64) -> BasicAttributes {
    let (lo, hi) = match (frames.first(), frames.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return BasicAttributes::default(),
    };
    if x <= lo.level || frames.len() == 1 {
        return lo.data.clone();
    }
    if x >= hi.level {
        return hi.data.clone();
    }

    let (a, b) = frames
        .windows(2)
        .map(|w| (&w[0], &w[1]))
        .find(|(_, b)| x <= b.level)
        .unwrap_or((lo, hi));
    let span = b.level - a.level;
    let t = if span > 0.0 { (x - a.level) / span } else { 1.0 };
    let lerp = |p: f64, q: f64| p + (q - p) * t;

    BasicAttributes {
        atk: lerp(a.data.atk, b.data.atk).round(),
        def: lerp(a.data.def, b.data.def).round(),
        max_hp: lerp(a.data.max_hp, b.data.max_hp).round(),
        magic_resistance: lerp(a.data.magic_resistance, b.data.magic_resistance),
        ..a.data.clone()
    }
}

/// Attributes at a level within the current promotion phase
pub struct LevelSource<'a> {
    frames: &'a [KeyFrame],
    level: u32,
}

impl<'a> LevelSource<'a> {
    pub fn new(frames: &'a [KeyFrame], level: u32) -> Self {
        LevelSource { frames, level }
    }
}

impl AttributeSource for LevelSource<'_> {
    fn id(&self) -> &str {
        "level"
    }

    fn priority(&self) -> i32 {
        -100 // Replaces the baseline, so it runs first
    }

    fn apply(&self, attrs: &mut BasicAttributes) {
        *attrs = interpolate(self.frames, self.level as f64);
    }
}
