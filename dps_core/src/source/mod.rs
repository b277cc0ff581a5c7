//! AttributeSource - providers of basic (pre-buff) attributes
//!
//! Basic attributes are composed from prioritized sources: the level curve
//! first, then trust, potential and module bonuses on top.

mod favor;
mod level;
mod module;
mod potential;

pub use favor::FavorSource;
pub use level::{interpolate, LevelSource};
pub use module::ModuleSource;
pub use potential::PotentialSource;

use crate::data::{BasicAttributes, CharacterData, ModulePhase};
use crate::error::CalcError;
use serde::{Deserialize, Serialize};

/// Leveling choices for one unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leveling {
    pub phase: usize,
    pub level: u32,
    pub favor: f64,
    pub potential_rank: usize,
}

/// Anything that contributes to a unit's basic attributes
pub trait AttributeSource {
    fn id(&self) -> &str;

    /// Application order (higher = applied later)
    /// - Level curve: -100
    /// - Trust: 0
    /// - Potential: 100
    /// - Module: 200
    fn priority(&self) -> i32 {
        0
    }

    fn apply(&self, attrs: &mut BasicAttributes);
}

/// Derive basic attributes for a unit at the given leveling
pub fn get_attributes(
    character: &CharacterData,
    leveling: &Leveling,
    module: Option<&ModulePhase>,
) -> Result<BasicAttributes, CalcError> {
    let phase = character
        .phases
        .get(leveling.phase)
        .ok_or_else(|| CalcError::MissingPhase {
            char_id: character.id.clone(),
            phase: leveling.phase,
        })?;

    let mut sources: Vec<Box<dyn AttributeSource + '_>> = vec![
        Box::new(LevelSource::new(&phase.attributes_key_frames, leveling.level)),
        Box::new(FavorSource::new(&character.favor_key_frames, leveling.favor)),
        Box::new(PotentialSource::new(&character.potential_ranks, leveling.potential_rank)),
    ];
    if let Some(m) = module {
        sources.push(Box::new(ModuleSource::new(m)));
    }
    sources.sort_by_key(|s| s.priority());

    let mut attrs = BasicAttributes::default();
    for source in &sources {
        source.apply(&mut attrs);
    }
    Ok(attrs)
}
