//! Read-only lookup tables shared by every calculation

use crate::config::{AnimationTable, ConfigError, EngineConstants, SpecialTags};
use crate::data::GameData;

/// Game data plus the engine's side tables
///
/// Nothing here is mutated during a calculation, so one instance can serve
/// many calculations, including from several threads.
#[derive(Debug, Clone, Default)]
pub struct GameTables {
    pub game: GameData,
    pub special: SpecialTags,
    pub anim: AnimationTable,
    pub constants: EngineConstants,
}

impl GameTables {
    /// Tables with the embedded special-tag table and default constants
    pub fn new(game: GameData) -> Self {
        GameTables {
            game,
            special: SpecialTags::embedded().clone(),
            anim: AnimationTable::new(),
            constants: EngineConstants::default(),
        }
    }

    pub fn with_special(mut self, special: SpecialTags) -> Self {
        self.special = special;
        self
    }

    pub fn with_anim(mut self, anim: AnimationTable) -> Self {
        self.anim = anim;
        self
    }

    pub fn with_constants(mut self, constants: EngineConstants) -> Result<Self, ConfigError> {
        constants.validate()?;
        self.constants = constants;
        Ok(self)
    }
}
