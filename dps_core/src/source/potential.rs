//! PotentialSource - attribute bonuses from unlocked potentials

use crate::data::{BasicAttributes, PotentialRank};
use crate::source::AttributeSource;

pub struct PotentialSource<'a> {
    ranks: &'a [PotentialRank],
    unlocked: usize,
}

impl<'a> PotentialSource<'a> {
    pub fn new(ranks: &'a [PotentialRank], unlocked: usize) -> Self {
        PotentialSource { ranks, unlocked }
    }
}

impl AttributeSource for PotentialSource<'_> {
    fn id(&self) -> &str {
        "potential"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn apply(&self, attrs: &mut BasicAttributes) {
        for rank in self.ranks.iter().take(self.unlocked) {
            for m in &rank.modifiers {
                attrs.add(m.attribute, m.value);
            }
        }
    }
}
