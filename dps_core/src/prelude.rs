//! Prelude module for convenient imports
//!
//! ```rust
//! use dps_core::prelude::*;
//! ```

// Entry points
pub use crate::attack::{calculate_attack, calculate_dps, CalcRequest, DpsReport, DpsResult};
pub use crate::tables::GameTables;

// Inputs
pub use crate::data::{build_unit, GameData, UnitContext, UnitSpec};
pub use crate::types::{CalcOptions, DamageType, EnemyProfile, RaidBuff};

// Tables and config
pub use crate::config::{AnimationTable, EngineConstants, SpecialTags};

// Diagnostics
pub use crate::trace::Trace;
pub use crate::error::CalcError;
