//! Pre-tabulated per-hit attack multipliers
//!
//! Skills whose hits ramp or decay within one attack carry an `atk_seq`
//! list. The n-th hit of an attack uses the n-th multiplier; hits past the
//! end of the list reuse the last one.

use super::defense::hit_damage;
use crate::types::DamageType;

#[derive(Debug, Clone, Copy)]
pub struct SequenceInput {
    pub damage_type: DamageType,
    pub atk: f64,
    pub def: f64,
    pub res_fraction: f64,
    pub floor: f64,
    pub damage_scale: f64,
    pub attack_count: f64,
    pub hit_count: f64,
}

/// Damage of `attack_count` attacks hit by hit
pub fn sequence_damage(seq: &[f64], input: &SequenceInput) -> f64 {
    let Some(last) = seq.last().copied() else {
        return 0.0;
    };
    if input.attack_count <= 0.0 {
        return 0.0;
    }
    let hits = (input.hit_count / input.attack_count).round().max(1.0) as usize;
    let per_attack: f64 = (0..hits)
        .map(|i| {
            let scale = seq.get(i).copied().unwrap_or(last);
            hit_damage(input.damage_type, input.atk * scale, input.def, input.res_fraction, input.floor)
        })
        .sum();
    per_attack * input.damage_scale * input.attack_count
}
