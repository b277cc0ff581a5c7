//! FavorSource - trust bonus

use crate::data::{BasicAttributes, KeyFrame};
use crate::source::{interpolate, AttributeSource};

/// Trust bonus; key frames run 0..=50 and trust above 100 adds nothing
pub struct FavorSource<'a> {
    frames: &'a [KeyFrame],
    favor: f64,
}

impl<'a> FavorSource<'a> {
    pub fn new(frames: &'a [KeyFrame], favor: f64) -> Self {
        FavorSource { frames, favor }
    }
}

impl AttributeSource for FavorSource<'_> {
    fn id(&self) -> &str {
        "favor"
    }

    fn apply(&self, attrs: &mut BasicAttributes) {
        if self.frames.is_empty() {
            return;
        }
        let bonus = interpolate(self.frames, self.favor.clamp(0.0, 100.0) / 2.0);
        attrs.atk += bonus.atk;
        attrs.def += bonus.def;
        attrs.max_hp += bonus.max_hp;
    }
}
