//! Core types shared across the engine

use crate::blackboard::Blackboard;
use serde::{Deserialize, Serialize};

/// Damage category of a hit; the discriminant doubles as the damage pool slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    #[default]
    Physical,
    Arts,
    Heal,
    True,
}

impl DamageType {
    /// Pool slot for this damage type
    pub fn index(self) -> usize {
        match self {
            DamageType::Physical => 0,
            DamageType::Arts => 1,
            DamageType::Heal => 2,
            DamageType::True => 3,
        }
    }

    /// Inverse of [`DamageType::index`]; out-of-range values yield `None`
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(DamageType::Physical),
            1 => Some(DamageType::Arts),
            2 => Some(DamageType::Heal),
            3 => Some(DamageType::True),
            _ => None,
        }
    }

    /// Whether hits of this type count toward damage (as opposed to healing)
    pub fn is_damage(self) -> bool {
        !matches!(self, DamageType::Heal)
    }

    pub fn label(self) -> &'static str {
        match self {
            DamageType::Physical => "physical",
            DamageType::Arts => "arts",
            DamageType::Heal => "heal",
            DamageType::True => "true",
        }
    }
}

/// Operator profession (class)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profession {
    #[serde(rename = "PIONEER")]
    Vanguard,
    #[default]
    #[serde(rename = "WARRIOR")]
    Guard,
    #[serde(rename = "TANK")]
    Defender,
    #[serde(rename = "SNIPER")]
    Sniper,
    #[serde(rename = "CASTER")]
    Caster,
    #[serde(rename = "MEDIC")]
    Medic,
    #[serde(rename = "SUPPORT")]
    Supporter,
    #[serde(rename = "SPECIAL")]
    Specialist,
    #[serde(rename = "TOKEN")]
    Token,
    #[serde(rename = "TRAP")]
    Trap,
}

impl Profession {
    /// Ranged professions attack from high-ground tiles
    pub fn is_ranged(self) -> bool {
        matches!(
            self,
            Profession::Sniper | Profession::Caster | Profession::Medic | Profession::Supporter
        )
    }
}

/// How a skill gains SP
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpType {
    #[default]
    IncreaseWithTime,
    IncreaseWhenAttack,
    IncreaseWhenTakenDamage,
    #[serde(alias = "8")]
    Passive,
}

impl SpType {
    /// Short label used in result tags
    pub fn label(self) -> &'static str {
        match self {
            SpType::IncreaseWithTime => "time",
            SpType::IncreaseWhenAttack => "attack",
            SpType::IncreaseWhenTakenDamage => "hit",
            SpType::Passive => "passive",
        }
    }
}

/// How a skill is activated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillType {
    Passive,
    #[default]
    Manual,
    Auto,
}

/// Target profile: defense, resistance (percent) and simultaneous target count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    #[serde(default)]
    pub def: f64,
    #[serde(default)]
    pub res: f64,
    #[serde(default = "default_enemy_count")]
    pub count: u32,
}

fn default_enemy_count() -> u32 {
    1
}

impl Default for EnemyProfile {
    fn default() -> Self {
        EnemyProfile {
            def: 0.0,
            res: 0.0,
            count: 1,
        }
    }
}

impl EnemyProfile {
    pub fn new(def: f64, res: f64, count: u32) -> Self {
        EnemyProfile { def, res, count }
    }
}

/// Situational toggles for one calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcOptions {
    /// Conditional talents/skills are satisfied
    pub cond: bool,
    /// Compute a critical-hit pass
    pub crit: bool,
    /// Stacking buffs are at max stacks
    pub stack: bool,
    /// The equipped module is active
    pub equip: bool,
    /// Ranged operator deployed on a melee tile
    pub ranged_penalty: bool,
    /// Warm-up style skills have finished ramping
    pub warmup: bool,
    /// Use the short horizon for infinite-duration skills
    pub short_mode: bool,
    /// Overdrive skills run into their second half
    pub od_trigger: bool,
    /// The operator is not blocking
    pub noblock: bool,
}

/// Team-wide buff folded in as the synthetic `raidBuff` tag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaidBuff {
    /// Flat ATK
    pub atk: f64,
    /// ATK percent
    pub atkpct: f64,
    /// Attack speed
    pub ats: f64,
    /// SP recovery percent (per second)
    pub cdr: f64,
    /// Base ATK percent
    pub base_atk: f64,
    /// Damage amplification percent
    pub damage_scale: f64,
}

impl RaidBuff {
    pub fn is_empty(&self) -> bool {
        *self == RaidBuff::default()
    }

    /// Convert to a blackboard consumable by the generic rules
    pub fn to_blackboard(&self) -> Blackboard {
        let mut bb = Blackboard::new();
        if self.atkpct != 0.0 || self.base_atk != 0.0 {
            bb.set("atk", (self.atkpct + self.base_atk) / 100.0);
        }
        if self.atk != 0.0 {
            bb.set("atk_flat", self.atk);
        }
        if self.ats != 0.0 {
            bb.set("attack_speed", self.ats);
        }
        if self.cdr != 0.0 {
            bb.set("sp_recovery_per_sec", self.cdr / 100.0);
        }
        if self.damage_scale != 0.0 {
            bb.set("damage_scale", 1.0 + self.damage_scale / 100.0);
        }
        bb
    }
}
