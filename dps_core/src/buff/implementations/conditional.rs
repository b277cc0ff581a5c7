//! Conditional talents (`cond` tag).
//!
//! `on_cond_true` handlers run when `options.cond` is set, `on_cond_false`
//! handlers when it is not. A branch without a handler falls through to the
//! generic rules, so a talent that must contribute nothing while its condition
//! is unmet registers [`unmet_skip`] explicitly.

use crate::blackboard::Blackboard;
use crate::buff::{BuffCtx, Handled};

/// Share of an enemy's life spent under an execute threshold
const EXECUTE_UPTIME: f64 = 0.2;

/// Condition unmet: the talent contributes nothing this pass
pub fn unmet_skip(ctx: &mut BuffCtx<'_>, _bb: &mut Blackboard) -> Handled {
    ctx.skip("condition not met, skipped")
}

/// Vigna: the stronger multiplier replaces the base one while the skill is up
pub fn vigna_first_strike(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if ctx.is_skill {
        bb.rename("atk_scale_2", "atk_scale");
        ctx.note("skill active: atk_scale_2 used");
    } else {
        bb.remove("atk_scale_2");
    }
    Handled::Continue
}

/// W: bonus against stunned enemies is a damage multiplier, not ATK
pub fn cqbw_stun_bonus(_ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    bb.rename("atk_scale", "damage_scale");
    Handled::Continue
}

/// Hellagur, below the HP threshold: full attack speed bonus
pub fn helage_low_hp(ctx: &mut BuffCtx<'_>, _bb: &mut Blackboard) -> Handled {
    ctx.note("HP at threshold, full attack speed");
    Handled::Continue
}

/// Hellagur, above the threshold: the bonus ramps with lost HP; average half
pub fn helage_high_hp(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    bb.scale("attack_speed", 0.5);
    ctx.note("HP above threshold, averaged to half attack speed");
    Handled::Continue
}

/// Scavenger: the bonus needs a blocked enemy
pub fn scave_blocking(ctx: &mut BuffCtx<'_>, _bb: &mut Blackboard) -> Handled {
    if ctx.options().noblock {
        return ctx.skip("not blocking, skipped");
    }
    Handled::Continue
}

/// Provence, target under the threshold: the bonus multiplies damage
pub fn prove_execute(_ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    bb.rename("atk_scale", "damage_scale");
    Handled::Continue
}

/// Provence, averaged over the target's life: only the last part of it
/// sits under the threshold
pub fn prove_execute_average(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    let uptime = bb.value_or("hp_ratio", EXECUTE_UPTIME);
    if let Some(scale) = bb.remove("atk_scale") {
        let averaged = 1.0 + (scale - 1.0) * uptime;
        bb.set("damage_scale", averaged);
        ctx.note(format!("execute bonus averaged to x{:.3}", averaged));
    }
    Handled::Continue
}

/// Saria: the bonus raises healing on wounded allies, not ATK
pub fn demkni_wounded_heal(_ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    bb.rename("atk_scale", "heal_scale");
    bb.remove("atk");
    Handled::Continue
}

/// Blaze: the ATK bonus scales with the number of blocked enemies
pub fn huang_blocked_enemies(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    let blocked = f64::from(ctx.env.enemy.count.max(1)).min(ctx.basic().block_cnt.max(1.0));
    bb.scale("atk", blocked);
    ctx.note(format!("{} blocked enemies", blocked));
    Handled::Continue
}

#[cfg(test)]
mod tests {
    use crate::blackboard::Blackboard;
    use crate::buff::test_support::{apply, unit};
    use crate::types::CalcOptions;

    fn cond() -> CalcOptions {
        CalcOptions {
            cond: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_vigna_skill_state() {
        let bb = Blackboard::from_pairs(&[("atk_scale", 1.2), ("atk_scale_2", 1.5)]);
        let unit = unit();

        let normal = apply(&unit, &cond(), "tachr_290_vigna_1", &bb, false);
        assert!((normal.atk_scale - 1.2).abs() < f64::EPSILON);

        // atk_scale is renamed over, so only the stronger value survives
        let skill = apply(&unit, &cond(), "tachr_290_vigna_1", &bb, true);
        assert!((skill.atk_scale - 1.5).abs() < f64::EPSILON);

        let unmet = apply(&unit, &CalcOptions::default(), "tachr_290_vigna_1", &bb, true);
        assert!((unmet.atk_scale - 1.0).abs() < f64::EPSILON);
        assert!(unmet.is_suppressed("tachr_290_vigna_1"));
    }

    #[test]
    fn test_cqbw_damage_scale() {
        let bb = Blackboard::from_pairs(&[("atk_scale", 1.3)]);
        let frame = apply(&unit(), &cond(), "tachr_113_cqbw_2", &bb, false);
        assert!((frame.atk_scale - 1.0).abs() < f64::EPSILON);
        assert!((frame.damage_scale - 1.3).abs() < f64::EPSILON);

        let frame = apply(&unit(), &CalcOptions::default(), "tachr_113_cqbw_2", &bb, false);
        assert!((frame.damage_scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_helage_both_branches() {
        let bb = Blackboard::from_pairs(&[("attack_speed", 100.0)]);
        let unit = unit();

        let low = apply(&unit, &cond(), "tachr_188_helage_1", &bb, false);
        assert!((low.attack_speed - 100.0).abs() < f64::EPSILON);

        let high = apply(&unit, &CalcOptions::default(), "tachr_188_helage_1", &bb, false);
        assert!((high.attack_speed - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scave_needs_block() {
        let bb = Blackboard::from_pairs(&[("atk", 0.1)]);
        let options = CalcOptions {
            cond: true,
            noblock: true,
            ..Default::default()
        };
        let frame = apply(&unit(), &options, "tachr_149_scave_1", &bb, false);
        assert!((frame.atk - 0.0).abs() < f64::EPSILON);
        assert!(frame.is_suppressed("tachr_149_scave_1"));

        let frame = apply(&unit(), &cond(), "tachr_149_scave_1", &bb, false);
        assert!((frame.atk - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_prove_both_branches() {
        let bb = Blackboard::from_pairs(&[("atk_scale", 1.6)]);

        let met = apply(&unit(), &cond(), "tachr_145_prove_1", &bb, false);
        assert!((met.damage_scale - 1.6).abs() < f64::EPSILON);
        assert!((met.atk_scale - 1.0).abs() < f64::EPSILON);

        // 1 + 0.6 * 0.2
        let averaged = apply(&unit(), &CalcOptions::default(), "tachr_145_prove_1", &bb, false);
        assert!((averaged.damage_scale - 1.12).abs() < 1e-12);
    }

    #[test]
    fn test_demkni_heal_scale() {
        let bb = Blackboard::from_pairs(&[("atk_scale", 1.2), ("atk", 0.1)]);
        let frame = apply(&unit(), &cond(), "tachr_202_demkni_1", &bb, false);
        assert!((frame.heal_scale - 1.2).abs() < f64::EPSILON);
        assert!((frame.atk - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_huang_blocked_count() {
        let mut unit = unit();
        unit.basic.block_cnt = 3.0;
        let bb = Blackboard::from_pairs(&[("atk", 0.1)]);

        // Default enemy profile is a single target
        let frame = apply(&unit, &cond(), "tachr_017_huang_1", &bb, false);
        assert!((frame.atk - 100.0).abs() < 1e-9);

        let frame = apply(&unit, &CalcOptions::default(), "tachr_017_huang_1", &bb, false);
        assert!((frame.atk - 0.0).abs() < f64::EPSILON);
    }
}
