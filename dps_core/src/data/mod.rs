//! Game-data shapes consumed by the engine
//!
//! These mirror the parsed character/skill/module tables. Loading the real
//! dumps is left to the caller; everything here deserializes from JSON.

mod unit;

pub use unit::{build_unit, BuffEntry, UnitContext, UnitSpec};

use crate::blackboard::Blackboard;
use crate::config::{load_json, parse_json, ConfigError};
use crate::error::CalcError;
use crate::types::{Profession, SkillType, SpType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Baseline stats before any buff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicAttributes {
    pub atk: f64,
    pub def: f64,
    pub max_hp: f64,
    pub magic_resistance: f64,
    /// Seconds between attacks at 100 attack speed
    pub base_attack_time: f64,
    pub attack_speed: f64,
    pub block_cnt: f64,
    pub cost: f64,
    pub respawn_time: f64,
}

impl Default for BasicAttributes {
    fn default() -> Self {
        BasicAttributes {
            atk: 0.0,
            def: 0.0,
            max_hp: 0.0,
            magic_resistance: 0.0,
            base_attack_time: 1.0,
            attack_speed: 100.0,
            block_cnt: 1.0,
            cost: 0.0,
            respawn_time: 70.0,
        }
    }
}

impl BasicAttributes {
    /// Add a flat modifier to one attribute
    pub fn add(&mut self, kind: AttributeKind, value: f64) {
        match kind {
            AttributeKind::Atk => self.atk += value,
            AttributeKind::Def => self.def += value,
            AttributeKind::MaxHp => self.max_hp += value,
            AttributeKind::MagicResistance => self.magic_resistance += value,
            AttributeKind::BaseAttackTime => self.base_attack_time += value,
            AttributeKind::AttackSpeed => self.attack_speed += value,
            AttributeKind::BlockCnt => self.block_cnt += value,
            AttributeKind::Cost => self.cost += value,
            AttributeKind::RespawnTime => self.respawn_time += value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeKind {
    Atk,
    Def,
    MaxHp,
    MagicResistance,
    BaseAttackTime,
    AttackSpeed,
    BlockCnt,
    Cost,
    RespawnTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeModifier {
    pub attribute: AttributeKind,
    pub value: f64,
}

/// Stats at one level (or trust) breakpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFrame {
    pub level: f64,
    pub data: BasicAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseData {
    pub max_level: u32,
    pub attributes_key_frames: Vec<KeyFrame>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PotentialRank {
    #[serde(default)]
    pub modifiers: Vec<AttributeModifier>,
}

/// One unlockable version of a talent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentCandidate {
    /// Buff tag (e.g. `tachr_340_shwaz_1`)
    pub tag: String,
    #[serde(default)]
    pub required_phase: usize,
    #[serde(default)]
    pub required_potential: usize,
    #[serde(default)]
    pub blackboard: Blackboard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentData {
    pub candidates: Vec<TalentCandidate>,
}

impl TalentData {
    /// Best candidate unlocked at `phase` / `potential_rank`
    pub fn unlocked(&self, phase: usize, potential_rank: usize) -> Option<&TalentCandidate> {
        self.candidates
            .iter()
            .rev()
            .find(|c| c.required_phase <= phase && c.required_potential <= potential_rank)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterData {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub profession: Profession,
    #[serde(default)]
    pub sub_profession_id: String,
    /// Trait text; scanned for damage-type keywords
    #[serde(default)]
    pub description: String,
    pub phases: Vec<PhaseData>,
    #[serde(default)]
    pub favor_key_frames: Vec<KeyFrame>,
    #[serde(default)]
    pub potential_ranks: Vec<PotentialRank>,
    /// Skill ids in slot order
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub talents: Vec<TalentData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpData {
    pub sp_type: SpType,
    pub sp_cost: f64,
    #[serde(default)]
    pub init_sp: f64,
    #[serde(default = "default_increment")]
    pub increment: f64,
}

fn default_increment() -> f64 {
    1.0
}

/// One level of a skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillLevelData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skill_type: SkillType,
    /// Active duration in seconds; zero or less means instant
    #[serde(default)]
    pub duration: f64,
    pub sp_data: SpData,
    #[serde(default)]
    pub blackboard: Blackboard,
}

impl SkillLevelData {
    /// Never actively cast
    pub fn is_passive(&self) -> bool {
        self.skill_type == SkillType::Passive || self.sp_data.sp_type == SpType::Passive
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillData {
    #[serde(default)]
    pub id: String,
    pub levels: Vec<SkillLevelData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModulePhase {
    #[serde(default)]
    pub attributes: Vec<AttributeModifier>,
    /// Root entries plus `trait` / `talent` views
    #[serde(default)]
    pub blackboard: Blackboard,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleData {
    #[serde(default)]
    pub id: String,
    pub char_id: String,
    pub phases: Vec<ModulePhase>,
}

/// Parsed character, skill and module tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameData {
    #[serde(default)]
    pub characters: HashMap<String, CharacterData>,
    #[serde(default)]
    pub skills: HashMap<String, SkillData>,
    #[serde(default)]
    pub modules: HashMap<String, ModuleData>,
}

impl GameData {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let data: GameData = parse_json(content)?;
        Ok(data.with_ids())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data: GameData = load_json(path)?;
        Ok(data.with_ids())
    }

    /// Fill each record's `id` from its map key
    fn with_ids(mut self) -> Self {
        for (id, c) in self.characters.iter_mut() {
            c.id = id.clone();
        }
        for (id, s) in self.skills.iter_mut() {
            s.id = id.clone();
        }
        for (id, m) in self.modules.iter_mut() {
            m.id = id.clone();
        }
        self
    }

    pub fn character(&self, id: &str) -> Result<&CharacterData, CalcError> {
        self.characters
            .get(id)
            .ok_or_else(|| CalcError::MissingCharacter(id.to_string()))
    }

    /// Skill data at a 1-based level
    pub fn skill_level(&self, id: &str, level: usize) -> Result<&SkillLevelData, CalcError> {
        let skill = self
            .skills
            .get(id)
            .ok_or_else(|| CalcError::MissingSkill(id.to_string()))?;
        skill
            .levels
            .get(level.saturating_sub(1))
            .ok_or_else(|| CalcError::MissingSkillLevel {
                skill_id: id.to_string(),
                level,
            })
    }

    /// Module phase at a 1-based level
    pub fn module_phase(&self, id: &str, level: usize) -> Result<&ModulePhase, CalcError> {
        self.modules
            .get(id)
            .and_then(|m| m.phases.get(level.saturating_sub(1)))
            .ok_or_else(|| CalcError::MissingModule(id.to_string()))
    }
}
