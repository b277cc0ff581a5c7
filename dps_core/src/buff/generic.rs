//! Generic per-key rules applied to whatever the dispatch left in a blackboard

use super::BuffCtx;
use crate::blackboard::Blackboard;
use crate::frame::FrameField;

/// Fold every recognized key of `bb` into the context's frame
///
/// Nonlinear keys:
/// - `max_hp`: magnitude above 2 is flat HP, otherwise a fraction of basic HP
/// - `base_attack_time`: negative shortens the interval directly, otherwise it
///   lengthens it as a fraction of the basic interval
/// - `magic_resistance`: below -1 is a flat enemy resistance shift, within
///   [-1, 0) scales enemy resistance, non-negative values are ignored
/// - `prob` is skipped when `prob_override` is present
/// - `sp_interval` appends a recovery interval (`sp` per tick, default 1)
///
/// Unknown keys are ignored.
pub fn apply_generic(ctx: &mut BuffCtx<'_>, bb: &Blackboard) {
    use FrameField::*;

    let basic = &ctx.env.unit.basic;
    let frame = &mut *ctx.frame;
    let prob_locked = bb.contains("prob_override");

    for entry in bb.iter() {
        let v = entry.value;
        match entry.key.as_str() {
            "atk" => frame.combine(Atk, basic.atk * v),
            "atk_flat" => frame.combine(Atk, v),
            "def" => frame.combine(Def, basic.def * v),
            "def_flat" => frame.combine(Def, v),
            "max_hp" if v.abs() > 2.0 => frame.combine(MaxHp, v),
            "max_hp" => frame.combine(MaxHp, basic.max_hp * v),
            "attack_speed" => frame.combine(AttackSpeed, v),
            "base_attack_time" if v < 0.0 => frame.combine(BaseAttackTime, v),
            "base_attack_time" => frame.combine(BaseAttackTime, basic.base_attack_time * v),
            "sp_recovery_per_sec" => frame.combine(SpRecoveryPerSec, v),
            "atk_scale" | "attack@atk_scale" => frame.combine(AtkScale, v),
            "def_scale" => frame.combine(DefScale, v),
            "heal_scale" | "attack@heal_scale" => frame.combine(HealScale, v),
            "damage_scale" | "attack@damage_scale" => frame.combine(DamageScale, v),
            "edef" => frame.combine(Edef, v),
            "edef_scale" => frame.combine(EdefScale, 1.0 + v),
            "emr" => frame.combine(Emr, v),
            "emr_scale" => frame.combine(EmrScale, 1.0 + v),
            "def_penetrate_fixed" => frame.combine(EdefPene, v),
            "def_penetrate" => frame.combine(EdefPeneScale, v),
            "magic_resist_penetrate_fixed" => frame.combine(EmrPene, v),
            "magic_resistance" if v < -1.0 => frame.combine(Emr, v),
            "magic_resistance" if v < 0.0 => frame.combine(EmrScale, 1.0 + v),
            "max_target" | "attack@max_target" => frame.combine(MaxTarget, v),
            "times" | "attack@times" => frame.combine(Times, v),
            "prob" | "attack@prob" if !prob_locked => frame.combine(Prob, v),
            "prob_override" => frame.combine(Prob, v),
            "sp_interval" => frame.push_sp_interval(v, bb.value_or("sp", 1.0), ctx.tag),
            "sp_recover_ratio" => frame.combine(SpRecoverRatio, v),
            _ => {}
        }
    }
}
