//! Closed-form attack counts for the common SP economies

use super::{Duration, DurationInput};
use crate::data::SkillLevelData;
use crate::trace::Trace;
use crate::types::SpType;

fn attacks_in(duration: f64, attack_time: f64) -> f64 {
    if attack_time <= 0.0 {
        return 0.0;
    }
    (duration / attack_time).ceil()
}

/// No castable skill: the unit attacks for the whole horizon
pub(super) fn no_skill(input: &DurationInput<'_>, skill_id: Option<&str>) -> Duration {
    let horizon = input.constants.duration.sim_horizon;
    let tag = if skill_id.is_some() { "passive" } else { "no_skill" };
    Duration {
        attack_count: attacks_in(horizon, input.attack_time),
        duration: horizon,
        tags: vec![tag.to_string()],
        ..Default::default()
    }
}

pub(super) fn skill_active(
    input: &DurationInput<'_>,
    skill: &SkillLevelData,
    skill_id: &str,
    trace: &mut Trace,
) -> Duration {
    let special = input.special;
    let constants = input.constants;
    let mut dur = Duration {
        start_sp: skill.sp_data.init_sp,
        skill_count: 1.0,
        ..Default::default()
    };

    if special.flag(skill_id, "toggle") {
        let horizon = if input.options.short_mode {
            constants.duration.toggle_short_horizon
        } else {
            constants.duration.toggle_horizon
        };
        dur.duration = horizon;
        dur.attack_count = attacks_in(horizon, input.attack_time);
        dur.tags.push("toggle".to_string());
        trace.write("duration", format!("toggle skill, evaluated over {}s", horizon));
    } else if let Some(rounds) = special.number(skill_id, "magazine") {
        dur.attack_count = rounds;
        dur.duration = rounds * input.attack_time;
        dur.tags.push("magazine".to_string());
    } else if let Some(ratio) = special.number(skill_id, "overdrive") {
        if input.options.od_trigger {
            dur.duration = skill.duration;
            dur.stun_duration = skill.blackboard.value("stun");
            dur.tags.push("overdrive_full".to_string());
        } else {
            dur.duration = skill.duration * ratio;
            dur.tags.push("overdrive_half".to_string());
        }
        dur.attack_count = attacks_in(dur.duration, input.attack_time);
    } else if skill.duration <= 0.0 {
        dur.attack_count = 1.0;
        dur.duration = match special.number(skill_id, "cast_frame") {
            Some(frames) => frames / constants.timing.fps,
            None => input.attack_time,
        };
        dur.tags.push("instant".to_string());
    } else {
        dur.duration = skill.duration;
        dur.attack_count = attacks_in(skill.duration, input.attack_time);
    }

    if let Some(prep) = special.number(skill_id, "prep_time") {
        dur.prep_duration = prep;
        dur.tags.push("prep".to_string());
    }
    dur
}

/// Basic attacks between two casts
pub(super) fn skill_inactive(
    input: &DurationInput<'_>,
    skill: &SkillLevelData,
    skill_id: &str,
    trace: &mut Trace,
) -> Duration {
    let sp = &skill.sp_data;
    let frame = input.frame;
    let horizon = input.constants.duration.toggle_horizon;
    let mut dur = Duration {
        start_sp: sp.init_sp,
        skill_count: 1.0,
        reset_attack: input.special.flag(skill_id, "reset_attack"),
        tags: vec![sp.sp_type.label().to_string()],
        ..Default::default()
    };

    match sp.sp_type {
        SpType::IncreaseWithTime => {
            let bonus: f64 = frame
                .sp_recover_intervals
                .iter()
                .filter(|iv| iv.interval > 0.0)
                .map(|iv| iv.sp / iv.interval)
                .sum();
            let per_attack = if input.attack_time > 0.0 {
                frame.sp_recover_ratio / input.attack_time
            } else {
                0.0
            };
            let rate = (1.0 + frame.sp_recovery_per_sec) + per_attack + bonus;
            if rate <= 0.0 {
                trace.write("duration", "SP never recovers; using the long horizon");
                dur.duration = horizon;
                dur.skill_count = 0.0;
            } else {
                dur.duration = sp.sp_cost / rate;
            }
            dur.attack_count = attacks_in(dur.duration, input.attack_time);
            if dur.reset_attack {
                dur.duration = dur.attack_count * input.attack_time;
            }
        }
        SpType::IncreaseWhenAttack => {
            let per_attack = 1.0 + frame.sp_recover_ratio;
            if per_attack <= 0.0 {
                dur.attack_count = attacks_in(horizon, input.attack_time);
                dur.skill_count = 0.0;
            } else {
                dur.attack_count = (sp.sp_cost / per_attack).ceil();
            }
            dur.duration = dur.attack_count * input.attack_time;
        }
        SpType::IncreaseWhenTakenDamage => {
            let rate = input.constants.duration.hit_recovery_rate;
            dur.duration = if rate > 0.0 { sp.sp_cost / rate } else { horizon };
            dur.attack_count = attacks_in(dur.duration, input.attack_time);
        }
        SpType::Passive => return no_skill(input, Some(skill_id)),
    }
    dur
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::blackboard::Blackboard;
    use crate::config::TagValue;
    use crate::types::SpType;

    fn time_skill(duration: f64, cost: f64) -> crate::data::SkillLevelData {
        skill(duration, SpType::IncreaseWithTime, cost, Blackboard::new())
    }

    #[test]
    fn test_plain_duration_skill() {
        let fx = Fixture::new(unit_with("skchr_test_1", time_skill(20.0, 40.0)));
        let dur = fx.run(true, 1.6, 1.0);
        // ceil(20 / 1.6) = 13
        assert!((dur.attack_count - 13.0).abs() < f64::EPSILON);
        assert!((dur.duration - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_time_recovery_between_casts() {
        let mut fx = Fixture::new(unit_with("skchr_test_1", time_skill(20.0, 40.0)));
        let dur = fx.run(false, 1.0, 1.0);
        assert!((dur.duration - 40.0).abs() < f64::EPSILON);
        assert!((dur.attack_count - 40.0).abs() < f64::EPSILON);

        // +1 SP/s aura halves the wait
        fx.frame.sp_recovery_per_sec = 1.0;
        let dur = fx.run(false, 1.0, 1.0);
        assert!((dur.duration - 20.0).abs() < f64::EPSILON);

        // Interval grants add to the rate: 2 SP every 2s
        fx.frame.sp_recovery_per_sec = 0.0;
        fx.frame.push_sp_interval(2.0, 2.0, "tachr_test_1");
        let dur = fx.run(false, 1.0, 1.0);
        assert!((dur.duration - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_recovery_rate_uses_horizon() {
        let mut fx = Fixture::new(unit_with("skchr_test_1", time_skill(20.0, 40.0)));
        fx.frame.sp_recovery_per_sec = -1.0;
        let dur = fx.run(false, 1.0, 1.0);
        assert!((dur.duration - fx.constants.duration.toggle_horizon).abs() < f64::EPSILON);
        assert!(dur.attack_count.is_finite());
    }

    #[test]
    fn test_attack_recovery() {
        let mut fx = Fixture::new(unit_with(
            "skchr_test_2",
            skill(0.0, SpType::IncreaseWhenAttack, 5.0, Blackboard::new()),
        ));
        let dur = fx.run(false, 1.2, 1.0);
        assert!((dur.attack_count - 5.0).abs() < f64::EPSILON);
        assert!((dur.duration - 6.0).abs() < 1e-9);

        fx.frame.sp_recover_ratio = 1.0;
        let dur = fx.run(false, 1.2, 1.0);
        // ceil(5 / 2)
        assert!((dur.attack_count - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_recovery() {
        let fx = Fixture::new(unit_with(
            "skchr_test_3",
            skill(10.0, SpType::IncreaseWhenTakenDamage, 12.0, Blackboard::new()),
        ));
        let dur = fx.run(false, 1.0, 1.0);
        assert!((dur.duration - 12.0).abs() < f64::EPSILON);
        assert_eq!(dur.tags, vec!["hit".to_string()]);
    }

    #[test]
    fn test_instant_and_cast_frame() {
        let fx = Fixture::new(unit_with("skchr_test_4", time_skill(0.0, 10.0)));
        let dur = fx.run(true, 1.5, 1.0);
        assert!((dur.attack_count - 1.0).abs() < f64::EPSILON);
        assert!((dur.duration - 1.5).abs() < f64::EPSILON);

        let fx = Fixture::new(unit_with("skchr_ghost2_3", time_skill(0.0, 10.0)));
        let dur = fx.run(true, 1.5, 1.0);
        // 36 frames at 30 fps
        assert!((dur.duration - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_horizons() {
        let mut fx = Fixture::new(unit_with("skchr_thorns_3", time_skill(-1.0, 30.0)));
        let dur = fx.run(true, 1.0, 1.0);
        assert!((dur.duration - 1000.0).abs() < f64::EPSILON);
        assert!((dur.attack_count - 1000.0).abs() < f64::EPSILON);

        fx.options.short_mode = true;
        let dur = fx.run(true, 1.0, 1.0);
        assert!((dur.duration - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_magazine() {
        let fx = Fixture::new(unit_with("skchr_fartth_3", time_skill(30.0, 40.0)));
        let dur = fx.run(true, 0.5, 1.0);
        assert!((dur.attack_count - 24.0).abs() < f64::EPSILON);
        assert!((dur.duration - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overdrive_split() {
        let level = skill(
            20.0,
            SpType::IncreaseWithTime,
            30.0,
            Blackboard::from_pairs(&[("stun", 10.0)]),
        );
        let mut fx = Fixture::new(unit_with("skchr_horn_3", level));
        let dur = fx.run(true, 1.0, 1.0);
        assert!((dur.duration - 10.0).abs() < f64::EPSILON);
        assert!((dur.stun_duration - 0.0).abs() < f64::EPSILON);

        fx.options.od_trigger = true;
        let dur = fx.run(true, 1.0, 1.0);
        assert!((dur.duration - 20.0).abs() < f64::EPSILON);
        assert!((dur.stun_duration - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_attack_rounds_cycle() {
        let fx = Fixture::new(unit_with("skchr_bpipe_2", time_skill(0.0, 5.0)));
        let dur = fx.run(false, 1.5, 1.0);
        assert!(dur.reset_attack);
        // ceil(5 / 1.5) = 4 attacks, cycle realigned to whole attacks
        assert!((dur.attack_count - 4.0).abs() < f64::EPSILON);
        assert!((dur.duration - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_passive_uses_horizon() {
        let mut fx = Fixture::new(unit_with(
            "skchr_plosis_1",
            skill(0.0, SpType::Passive, 0.0, Blackboard::new()),
        ));
        fx.special.insert("skchr_plosis_1", "passive", TagValue::Flag(true));
        let active = fx.run(true, 1.0, 1.0);
        let normal = fx.run(false, 1.0, 1.0);
        assert_eq!(active, normal);
        assert!((active.duration - 120.0).abs() < f64::EPSILON);
    }
}
