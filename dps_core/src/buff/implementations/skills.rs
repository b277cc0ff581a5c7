//! Skills whose blackboards need rewriting before the generic rules

use crate::blackboard::Blackboard;
use crate::buff::{BuffCtx, Handled};

/// Exusiai S3: the interval reduction counts double
pub fn angel_interval(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    bb.scale("base_attack_time", 2.0);
    ctx.note("base_attack_time counted twice");
    Handled::Continue
}

/// Schwarz S3: the skill's crit chance replaces the talent's
pub fn shwaz_crit_override(_ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    bb.rename("attack@prob", "prob_override");
    Handled::Continue
}

/// Thorns S3: the attack speed bonus ramps in; only counted once warmed up
pub fn thorns_warmup(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if !ctx.options().warmup {
        bb.remove("attack_speed");
        ctx.note("not warmed up, attack speed bonus ignored");
    }
    Handled::Continue
}

/// Bursts that replace normal attacks (W's bombs, Specter's cast); the
/// multiplier is applied by the extra pass
pub fn burst_replaces_attack(ctx: &mut BuffCtx<'_>, _bb: &mut Blackboard) -> Handled {
    ctx.note("burst damage computed separately");
    Handled::Done
}

/// Horn S3: the second half of the overdrive doubles the ATK bonus
pub fn horn_overdrive(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if ctx.options().od_trigger {
        let od_atk = bb.value("od_atk");
        if od_atk != 0.0 {
            // Average of the two halves
            let atk = bb.value("atk");
            bb.set("atk", (atk + od_atk) / 2.0);
            ctx.note("overdrive: ATK averaged over both halves");
        }
    }
    Handled::Continue
}

/// Surrender and retreat skills: the cast itself is the effect
pub fn no_combat_effect(ctx: &mut BuffCtx<'_>, _bb: &mut Blackboard) -> Handled {
    ctx.note("non-damaging skill");
    Handled::Done
}

/// Magazine skills list the per-shot multiplier under the mid-range key
pub fn fartth_mid_range(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    bb.remove("atk_scale");
    bb.rename("atk_scale_2", "atk_scale");
    ctx.note("mid-range shot multiplier");
    Handled::Continue
}

/// Splash multiplier belongs to secondary targets; the extra pass reads it
pub fn amgoat_primary_only(_ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    bb.remove("atk_scale_2");
    Handled::Continue
}

/// Surtr S3: the positive `magic_resistance` entry is flat resistance
/// penetration, not a self buff
pub fn surtr_res_penetration(_ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if bb.value("magic_resistance") > 0.0 {
        bb.rename("magic_resistance", "magic_resist_penetrate_fixed");
    }
    Handled::Continue
}

/// SilverAsh S3: the defense penalty only matters when the unit is hit
pub fn svrash_ignore_def_penalty(_ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if bb.value("def") < 0.0 {
        bb.remove("def");
    }
    Handled::Continue
}

/// Ifrit S3: the resistance shred scales with the talent's bonus,
/// listed as a ratio of the skill value
pub fn ifrit_res_shred(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    let ratio = bb.remove("magic_resistance_ratio").unwrap_or(1.0);
    bb.scale("magic_resistance", ratio);
    ctx.note(format!("resistance shred x{:.2}", ratio));
    Handled::Continue
}

/// Skills whose speed bonus ramps across the duration; without warmup
/// it counts at half
pub fn ramping_attack_speed(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if !ctx.options().warmup {
        bb.scale("attack_speed", 0.5);
        ctx.note("ramping attack speed averaged to half");
    }
    Handled::Continue
}

#[cfg(test)]
mod tests {
    use crate::blackboard::Blackboard;
    use crate::buff::test_support::{apply, unit};
    use crate::data::{SkillLevelData, SpData};
    use crate::data::UnitContext;
    use crate::types::{CalcOptions, SkillType, SpType};

    fn with_skill(id: &str, bb: &Blackboard) -> UnitContext {
        unit().with_skill(
            id,
            SkillLevelData {
                name: id.to_string(),
                description: String::new(),
                skill_type: SkillType::Manual,
                duration: 30.0,
                sp_data: SpData {
                    sp_type: SpType::IncreaseWithTime,
                    sp_cost: 40.0,
                    init_sp: 0.0,
                    increment: 1.0,
                },
                blackboard: bb.clone(),
            },
        )
    }

    #[test]
    fn test_angel_double_interval() {
        let bb = Blackboard::from_pairs(&[("base_attack_time", -0.2)]);
        let unit = with_skill("skchr_angel_3", &bb);
        let frame = apply(&unit, &CalcOptions::default(), "skill", &bb, true);
        assert!((frame.base_attack_time + 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shwaz_prob_override() {
        let bb = Blackboard::from_pairs(&[("atk", 0.4), ("attack@prob", 0.5), ("prob", 0.2)]);
        let unit = with_skill("skchr_shwaz_3", &bb);
        let frame = apply(&unit, &CalcOptions::default(), "skill", &bb, true);
        assert_eq!(frame.prob, Some(0.5));
    }

    #[test]
    fn test_thorns_warmup_gate() {
        let bb = Blackboard::from_pairs(&[("atk", 0.6), ("attack_speed", 50.0)]);
        let unit = with_skill("skchr_thorns_3", &bb);

        let cold = apply(&unit, &CalcOptions::default(), "skill", &bb, true);
        assert!((cold.attack_speed - 0.0).abs() < f64::EPSILON);
        assert!((cold.atk - 600.0).abs() < 1e-9);

        let warm = CalcOptions {
            warmup: true,
            ..Default::default()
        };
        let frame = apply(&unit, &warm, "skill", &bb, true);
        assert!((frame.attack_speed - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_horn_overdrive_average() {
        let bb = Blackboard::from_pairs(&[("atk", 0.6), ("od_atk", 1.0)]);
        let unit = with_skill("skchr_horn_3", &bb);

        let first = apply(&unit, &CalcOptions::default(), "skill", &bb, true);
        assert!((first.atk - 600.0).abs() < 1e-9);

        let od = CalcOptions {
            od_trigger: true,
            ..Default::default()
        };
        let both = apply(&unit, &od, "skill", &bb, true);
        assert!((both.atk - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_combat_effect() {
        let bb = Blackboard::from_pairs(&[("atk", 1.0)]);
        let unit = with_skill("skchr_bena_1", &bb);
        let frame = apply(&unit, &CalcOptions::default(), "skill", &bb, true);
        assert!((frame.atk - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fartth_mid_range_rename() {
        let bb = Blackboard::from_pairs(&[("atk_scale", 2.0), ("atk_scale_2", 1.6)]);
        let unit = with_skill("skchr_fartth_3", &bb);
        let frame = apply(&unit, &CalcOptions::default(), "skill", &bb, true);
        assert!((frame.atk_scale - 1.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_amgoat_primary_only() {
        let bb = Blackboard::from_pairs(&[("atk_scale", 1.7), ("atk_scale_2", 0.85)]);
        let unit = with_skill("skchr_amgoat_2", &bb);
        let frame = apply(&unit, &CalcOptions::default(), "skill", &bb, true);
        assert!((frame.atk_scale - 1.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_surtr_res_penetration() {
        let bb = Blackboard::from_pairs(&[("atk", 1.0), ("magic_resistance", 20.0), ("hp_ratio", 0.2)]);
        let unit = with_skill("skchr_surtr_3", &bb);
        let frame = apply(&unit, &CalcOptions::default(), "skill", &bb, true);
        assert!((frame.emr_pene - 20.0).abs() < f64::EPSILON);
        assert!((frame.atk - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_svrash_def_penalty_dropped() {
        let bb = Blackboard::from_pairs(&[("atk", 1.2), ("def", -0.7)]);
        let unit = with_skill("skchr_svrash_3", &bb);
        let frame = apply(&unit, &CalcOptions::default(), "skill", &bb, true);
        assert!((frame.def - 0.0).abs() < f64::EPSILON);
        assert!((frame.atk - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_ifrit_shred_ratio() {
        let bb = Blackboard::from_pairs(&[("magic_resistance", -0.4), ("magic_resistance_ratio", 1.5)]);
        let unit = with_skill("skchr_ifrit_3", &bb);
        let frame = apply(&unit, &CalcOptions::default(), "skill", &bb, true);
        // -0.4 * 1.5 = -0.6 -> emr_scale 0.4
        assert!((frame.emr_scale - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_ramping_attack_speed() {
        let bb = Blackboard::from_pairs(&[("attack_speed", 80.0)]);
        let unit = with_skill("skchr_ctable_2", &bb);
        let cold = apply(&unit, &CalcOptions::default(), "skill", &bb, true);
        assert!((cold.attack_speed - 40.0).abs() < f64::EPSILON);

        let warm = CalcOptions {
            warmup: true,
            ..Default::default()
        };
        let frame = apply(&unit, &warm, "skill", &bb, true);
        assert!((frame.attack_speed - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bursts_skip_frame() {
        let bb = Blackboard::from_pairs(&[("atk_scale", 2.2)]);
        for id in ["skchr_cqbw_3", "skchr_ghost2_3"] {
            let unit = with_skill(id, &bb);
            let frame = apply(&unit, &CalcOptions::default(), "skill", &bb, true);
            assert!((frame.atk_scale - 1.0).abs() < f64::EPSILON, "{}", id);
        }
    }
}
