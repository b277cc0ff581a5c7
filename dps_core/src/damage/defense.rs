//! Enemy mitigation - effective defense/resistance and per-hit damage
//!
//! Physical hits subtract defense, arts hits are scaled by resistance; both
//! are floored at a fraction of attack so every hit deals chip damage.

use crate::frame::BuffFrame;
use crate::types::DamageType;

/// Enemy defense after flat/ratio reduction and penetration
///
/// `max(0, ((def + edef) * edef_scale - edef_pene) * (1 - edef_pene_scale))`
pub fn effective_def(enemy_def: f64, frame: &BuffFrame) -> f64 {
    let reduced = (enemy_def + frame.edef) * frame.edef_scale - frame.edef_pene;
    (reduced * (1.0 - frame.edef_pene_scale)).max(0.0)
}

/// Enemy resistance as a fraction in `[0, 1]`
pub fn effective_res(enemy_res: f64, frame: &BuffFrame) -> f64 {
    let capped = ((enemy_res + frame.emr) * frame.emr_scale).min(100.0);
    (capped - frame.emr_pene).max(0.0) / 100.0
}

pub fn physical_hit(atk: f64, def: f64, floor: f64) -> f64 {
    (atk - def).max(atk * floor)
}

pub fn arts_hit(atk: f64, res_fraction: f64, floor: f64) -> f64 {
    (atk * (1.0 - res_fraction)).max(atk * floor)
}

/// Damage of one hit of `damage_type`; true damage and heals ignore mitigation
pub fn hit_damage(damage_type: DamageType, atk: f64, def: f64, res_fraction: f64, floor: f64) -> f64 {
    match damage_type {
        DamageType::Physical => physical_hit(atk, def, floor),
        DamageType::Arts => arts_hit(atk, res_fraction, floor),
        DamageType::Heal | DamageType::True => atk,
    }
}
