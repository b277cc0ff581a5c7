//! Damage Resolution - mitigation, crits, pools and per-buff extras

mod classify;
pub mod crit;
pub mod defense;
pub mod extra;
mod pool;
pub mod sequence;

pub use classify::classify_damage_type;
pub use crit::{apply_crit, CritRule};
pub use defense::{arts_hit, effective_def, effective_res, hit_damage, physical_hit};
pub use extra::{extra_hook, ExtraCtx, ExtraHook};
pub use pool::{DamagePool, PoolSlot};
pub use sequence::{sequence_damage, SequenceInput};
