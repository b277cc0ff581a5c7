//! Unit assembly: game data + leveling choices -> unit context

use super::{BasicAttributes, GameData, SkillLevelData};
use crate::blackboard::Blackboard;
use crate::error::CalcError;
use crate::source::{get_attributes, Leveling};
use crate::types::Profession;
use serde::{Deserialize, Serialize};

/// Which unit, skill and upgrades to evaluate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSpec {
    pub char_id: String,
    pub skill_id: Option<String>,
    /// 1-based skill level (1..=10)
    pub skill_level: usize,
    /// Promotion phase (0..=2)
    pub phase: usize,
    pub level: u32,
    /// Trust, 0..=200 (bonus caps at 100)
    pub favor: f64,
    /// Extra potentials unlocked (0..=5)
    pub potential_rank: usize,
    pub equip_id: Option<String>,
    /// 1-based module level
    pub equip_level: usize,
}

impl Default for UnitSpec {
    fn default() -> Self {
        UnitSpec {
            char_id: String::new(),
            skill_id: None,
            skill_level: 1,
            phase: 0,
            level: 1,
            favor: 0.0,
            potential_rank: 0,
            equip_id: None,
            equip_level: 1,
        }
    }
}

impl UnitSpec {
    pub fn new(char_id: &str) -> Self {
        UnitSpec {
            char_id: char_id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_skill(mut self, skill_id: &str, level: usize) -> Self {
        self.skill_id = Some(skill_id.to_string());
        self.skill_level = level;
        self
    }

    pub fn with_level(mut self, phase: usize, level: u32) -> Self {
        self.phase = phase;
        self.level = level;
        self
    }

    pub fn with_module(mut self, equip_id: &str, level: usize) -> Self {
        self.equip_id = Some(equip_id.to_string());
        self.equip_level = level;
        self
    }

    pub fn leveling(&self) -> Leveling {
        Leveling {
            phase: self.phase,
            level: self.level,
            favor: self.favor,
            potential_rank: self.potential_rank,
        }
    }
}

/// One buff source: its routing tag and raw parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffEntry {
    pub tag: String,
    #[serde(default)]
    pub blackboard: Blackboard,
}

impl BuffEntry {
    pub fn new(tag: &str, blackboard: Blackboard) -> Self {
        BuffEntry {
            tag: tag.to_string(),
            blackboard,
        }
    }
}

/// Everything the engine knows about the unit under evaluation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitContext {
    pub char_id: String,
    pub profession: Profession,
    pub sub_profession_id: String,
    pub description: String,
    pub skill_id: Option<String>,
    /// Slot of the skill in the unit's skill list
    pub skill_index: usize,
    pub skill: Option<SkillLevelData>,
    pub basic: BasicAttributes,
    /// Talents, then the `skill` entry, then the module
    pub buff_list: Vec<BuffEntry>,
    pub equip_id: Option<String>,
    pub phase: usize,
    pub potential_rank: usize,
}

impl UnitContext {
    /// Minimal context for driving the engine without game data
    pub fn new(char_id: &str, profession: Profession, basic: BasicAttributes) -> Self {
        UnitContext {
            char_id: char_id.to_string(),
            profession,
            basic,
            ..Default::default()
        }
    }

    pub fn with_skill(mut self, skill_id: &str, skill: SkillLevelData) -> Self {
        self.buff_list
            .push(BuffEntry::new("skill", skill.blackboard.clone()));
        self.skill_id = Some(skill_id.to_string());
        self.skill = Some(skill);
        self
    }

    pub fn with_buff(mut self, tag: &str, blackboard: Blackboard) -> Self {
        self.buff_list.push(BuffEntry::new(tag, blackboard));
        self
    }

    pub fn skill_id(&self) -> Option<&str> {
        self.skill_id.as_deref()
    }
}

/// Resolve a [`UnitSpec`] against game data
pub fn build_unit(game: &GameData, spec: &UnitSpec) -> Result<UnitContext, CalcError> {
    let character = game.character(&spec.char_id)?;

    let module = match &spec.equip_id {
        Some(id) => Some(game.module_phase(id, spec.equip_level)?),
        None => None,
    };

    let basic = get_attributes(character, &spec.leveling(), module)?;

    let mut buff_list: Vec<BuffEntry> = character
        .talents
        .iter()
        .filter_map(|t| t.unlocked(spec.phase, spec.potential_rank))
        .map(|c| BuffEntry::new(&c.tag, c.blackboard.clone()))
        .collect();

    let (skill, skill_index) = match &spec.skill_id {
        Some(id) => {
            let level = game.skill_level(id, spec.skill_level)?;
            buff_list.push(BuffEntry::new("skill", level.blackboard.clone()));
            let index = character.skills.iter().position(|s| s == id).unwrap_or(0);
            (Some(level.clone()), index)
        }
        None => (None, 0),
    };

    if let (Some(id), Some(phase)) = (&spec.equip_id, module) {
        buff_list.push(BuffEntry::new(id, phase.blackboard.clone()));
    }

    tracing::debug!(
        char_id = %spec.char_id,
        buffs = buff_list.len(),
        "unit assembled"
    );

    Ok(UnitContext {
        char_id: character.id.clone(),
        profession: character.profession,
        sub_profession_id: character.sub_profession_id.clone(),
        description: character.description.clone(),
        skill_id: spec.skill_id.clone(),
        skill_index,
        skill,
        basic,
        buff_list,
        equip_id: spec.equip_id.clone(),
        phase: spec.phase,
        potential_rank: spec.potential_rank,
    })
}
