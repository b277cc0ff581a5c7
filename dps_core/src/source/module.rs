//! ModuleSource - flat attribute bonuses from an equipped module

use crate::data::{BasicAttributes, ModulePhase};
use crate::source::AttributeSource;

pub struct ModuleSource<'a> {
    phase: &'a ModulePhase,
}

impl<'a> ModuleSource<'a> {
    pub fn new(phase: &'a ModulePhase) -> Self {
        ModuleSource { phase }
    }
}

impl AttributeSource for ModuleSource<'_> {
    fn id(&self) -> &str {
        "module"
    }

    fn priority(&self) -> i32 {
        200
    }

    fn apply(&self, attrs: &mut BasicAttributes) {
        for m in &self.phase.attributes {
            attrs.add(m.attribute, m.value);
        }
    }
}
