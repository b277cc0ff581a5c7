//! FinalAttributes - basic attributes with a frame folded in

use super::BuffFrame;
use crate::config::TimingConstants;
use crate::data::BasicAttributes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalAttributes {
    pub atk: f64,
    pub def: f64,
    pub max_hp: f64,
    pub magic_resistance: f64,
    /// Clamped to the configured attack speed bounds
    pub attack_speed: f64,
    pub base_attack_time: f64,
    pub sp_recovery_per_sec: f64,
    pub block_cnt: f64,
    pub cost: f64,
    pub respawn_time: f64,
}

/// Additive fields add; `atk_scale` and `def_scale` multiply into ATK/DEF.
/// Attack speed is clamped to the default bounds.
pub fn get_buffed_attributes(basic: &BasicAttributes, frame: &BuffFrame) -> FinalAttributes {
    get_buffed_attributes_within(basic, frame, &TimingConstants::default())
}

/// [`get_buffed_attributes`] with explicit attack speed bounds
pub fn get_buffed_attributes_within(
    basic: &BasicAttributes,
    frame: &BuffFrame,
    timing: &TimingConstants,
) -> FinalAttributes {
    let attack_speed = (basic.attack_speed + frame.attack_speed)
        .clamp(timing.attack_speed_min, timing.attack_speed_max);
    FinalAttributes {
        atk: (basic.atk + frame.atk) * frame.atk_scale,
        def: (basic.def + frame.def) * frame.def_scale,
        max_hp: basic.max_hp + frame.max_hp,
        magic_resistance: basic.magic_resistance,
        attack_speed,
        base_attack_time: basic.base_attack_time + frame.base_attack_time,
        sp_recovery_per_sec: frame.sp_recovery_per_sec,
        block_cnt: basic.block_cnt,
        cost: basic.cost,
        respawn_time: basic.respawn_time,
    }
}
