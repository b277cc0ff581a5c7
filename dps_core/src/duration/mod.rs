//! Duration/Attack-Count Resolver
//!
//! Turns a realized attack interval and the unit's SP economy into attack
//! and hit counts over an engagement window. Skills flagged `sim` run the
//! discrete-event simulation; everything else uses closed-form estimates.

mod closed_form;
mod rules;
pub mod simulation;

pub use rules::{duration_hook, DurationHook};

use crate::config::{EngineConstants, SpecialTags};
use crate::data::UnitContext;
use crate::frame::BuffFrame;
use crate::trace::Trace;
use crate::types::CalcOptions;
use serde::{Deserialize, Serialize};

/// Attack/hit accounting for one skill state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Duration {
    pub attack_count: f64,
    /// Normal (non-critical) hits
    pub hit_count: f64,
    pub crit_count: f64,
    pub crit_hit_count: f64,
    /// Seconds
    pub duration: f64,
    pub stun_duration: f64,
    pub prep_duration: f64,
    /// Hits per attack per target
    pub times: f64,
    pub tags: Vec<String>,
    pub start_sp: f64,
    pub skill_count: f64,
    /// Basic-attack cycle of a reset-attack skill
    pub reset_attack: bool,
}

impl Duration {
    /// Engagement time used as the DPS denominator
    pub fn total_time(&self) -> f64 {
        self.duration + self.stun_duration + self.prep_duration
    }
}

/// Everything the resolver reads
#[derive(Clone, Copy)]
pub struct DurationInput<'a> {
    pub unit: &'a UnitContext,
    pub is_skill: bool,
    /// Realized seconds per attack
    pub attack_time: f64,
    /// Clamped attack speed
    pub attack_speed: f64,
    pub frame: &'a BuffFrame,
    pub target_count: f64,
    pub options: &'a CalcOptions,
    pub special: &'a SpecialTags,
    pub constants: &'a EngineConstants,
}

pub fn calc_durations(input: &DurationInput<'_>, trace: &mut Trace) -> Duration {
    let skill = input.unit.skill.as_ref().zip(input.unit.skill_id());

    let mut dur = match skill {
        Some((level, id)) if input.special.flag(id, "sim") => {
            simulation::simulate_durations(input, level, trace)
        }
        Some((level, id)) if level.is_passive() => closed_form::no_skill(input, Some(id)),
        Some((level, id)) if input.is_skill => closed_form::skill_active(input, level, id, trace),
        Some((level, id)) => closed_form::skill_inactive(input, level, id, trace),
        None => closed_form::no_skill(input, None),
    };

    dur.times = input.frame.times;
    dur.hit_count = dur.attack_count * dur.times * input.target_count;

    if let (true, Some((level, id))) = (input.is_skill, skill) {
        if let Some(hook) = duration_hook(id) {
            hook(input, &level.blackboard, &mut dur);
        }
        if input.special.flag(id, "no_hit") {
            dur.hit_count = 0.0;
            dur.tags.push("no_hit".to_string());
        }
    }

    tracing::debug!(
        is_skill = input.is_skill,
        attack_count = dur.attack_count,
        hit_count = dur.hit_count,
        duration = dur.duration,
        tags = ?dur.tags,
        "durations resolved"
    );
    trace.write(
        "duration",
        format!(
            "{} attacks, {} hits over {:.2}s (stun {:.2}s, prep {:.2}s)",
            dur.attack_count, dur.hit_count, dur.duration, dur.stun_duration, dur.prep_duration
        ),
    );
    dur
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::blackboard::Blackboard;
    use crate::data::{BasicAttributes, SkillLevelData, SpData};
    use crate::types::{Profession, SkillType, SpType};

    pub fn skill(duration: f64, sp_type: SpType, sp_cost: f64, bb: Blackboard) -> SkillLevelData {
        SkillLevelData {
            name: "Test".to_string(),
            description: String::new(),
            skill_type: SkillType::Manual,
            duration,
            sp_data: SpData {
                sp_type,
                sp_cost,
                init_sp: 0.0,
                increment: 1.0,
            },
            blackboard: bb,
        }
    }

    pub fn unit_with(skill_id: &str, level: SkillLevelData) -> UnitContext {
        UnitContext::new("char_test", Profession::Guard, BasicAttributes::default())
            .with_skill(skill_id, level)
    }

    pub struct Fixture {
        pub unit: UnitContext,
        pub frame: BuffFrame,
        pub options: CalcOptions,
        pub special: SpecialTags,
        pub constants: EngineConstants,
    }

    impl Fixture {
        pub fn new(unit: UnitContext) -> Self {
            Fixture {
                unit,
                frame: BuffFrame::new(),
                options: CalcOptions::default(),
                special: SpecialTags::embedded().clone(),
                constants: EngineConstants::default(),
            }
        }

        pub fn input(&self, is_skill: bool, attack_time: f64, targets: f64) -> DurationInput<'_> {
            DurationInput {
                unit: &self.unit,
                is_skill,
                attack_time,
                attack_speed: 100.0,
                frame: &self.frame,
                target_count: targets,
                options: &self.options,
                special: &self.special,
                constants: &self.constants,
            }
        }

        pub fn run(&self, is_skill: bool, attack_time: f64, targets: f64) -> Duration {
            let mut trace = Trace::disabled();
            calc_durations(&self.input(is_skill, attack_time, targets), &mut trace)
        }
    }
}
