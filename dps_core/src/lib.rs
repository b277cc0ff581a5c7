//! dps_core - Operator DPS/HPS calculation engine
//!
//! This library provides:
//! - Buff Application Engine: folds talent/skill/module blackboards into a frame
//! - Animation Timing Resolver: realizes attack intervals against animations
//! - Duration Resolver: attack/hit counts from the SP economy (closed form or simulated)
//! - Damage Resolution: mitigation, crits, damage pools and per-buff extras
//! - Attack Orchestrator: `calculate_attack` / `calculate_dps`

pub mod attack;
pub mod blackboard;
pub mod buff;
pub mod config;
pub mod damage;
pub mod data;
pub mod duration;
pub mod error;
pub mod frame;
pub mod prelude;
pub mod source;
pub mod tables;
pub mod timing;
pub mod trace;
pub mod types;

// Re-export core types for convenience
pub use attack::{calculate_attack, calculate_dps, CalcRequest, DpsReport, DpsResult};
pub use blackboard::{Blackboard, BlackboardEntry};
pub use buff::apply_buff;
pub use config::{AnimationTable, ConfigError, EngineConstants, SpecialTags};
pub use damage::{DamagePool, PoolSlot};
pub use data::{build_unit, GameData, UnitContext, UnitSpec};
pub use duration::{calc_durations, Duration};
pub use error::CalcError;
pub use frame::{get_buffed_attributes, get_buffed_attributes_within, BuffFrame, FinalAttributes};
pub use source::{get_attributes, AttributeSource, Leveling};
pub use tables::GameTables;
pub use trace::{Trace, TraceEntry};
pub use types::{CalcOptions, DamageType, EnemyProfile, Profession, RaidBuff, SpType};
