//! Talents with idiosyncratic frame effects

use crate::blackboard::Blackboard;
use crate::buff::{BuffCtx, Handled};
use crate::frame::FrameField;

/// Mousse: a chance to strike twice averages into the hit count
pub fn frncat_double_strike(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    let prob = bb.value("prob");
    ctx.frame.combine(FrameField::Times, 1.0 + prob);
    ctx.note(format!("expected {:.2} hits per attack", 1.0 + prob));
    Handled::Done
}

/// Damage-over-time and lifesteal talents: no frame effect, the damage pass
/// reads their blackboard directly
pub fn damage_only(_ctx: &mut BuffCtx<'_>, _bb: &mut Blackboard) -> Handled {
    Handled::Done
}

/// Ptilopsis: SP aura counts for the unit itself only with the module trait
pub fn plosis_sp_aura(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if !ctx.options().equip {
        bb.remove("sp_recover_ratio");
    }
    Handled::Continue
}

/// Buffs that only reach allies
pub fn team_aura_only(ctx: &mut BuffCtx<'_>, _bb: &mut Blackboard) -> Handled {
    ctx.note("team aura, no effect on the unit itself");
    Handled::Done
}

/// Talents that only work while the unit's skill is up
pub fn skill_state_only(ctx: &mut BuffCtx<'_>, _bb: &mut Blackboard) -> Handled {
    if !ctx.is_skill {
        return ctx.skip("skill not active");
    }
    Handled::Continue
}

/// Bonus listed as an ATK multiplier that actually multiplies final damage
pub fn atk_scale_as_damage(_ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    bb.rename("atk_scale", "damage_scale");
    Handled::Continue
}

/// Chance-based ATK multiplier: fold the chance into its expected value so
/// `prob` does not reach the crit count
pub fn expected_proc(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    let prob = bb.remove("prob").unwrap_or(0.0);
    if let Some(scale) = bb.get("atk_scale") {
        let expected = 1.0 + (scale - 1.0) * prob;
        bb.set("atk_scale", expected);
        ctx.note(format!("proc p={:.2}: atk_scale x{:.3}", prob, expected));
    }
    Handled::Continue
}

/// ATK bonus per enemy in range, capped by `max_cnt`
pub fn per_enemy_in_range(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    let cap = bb.remove("max_cnt").unwrap_or(1.0);
    let enemies = f64::from(ctx.env.enemy.count).min(cap);
    bb.scale("atk", enemies);
    ctx.note(format!("{} enemies in range", enemies));
    Handled::Continue
}

/// Bonus against airborne enemies only
pub fn anti_air_only(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if !ctx.options().cond {
        bb.remove("atk_scale");
        ctx.note("no aerial target, bonus ignored");
    }
    Handled::Continue
}
