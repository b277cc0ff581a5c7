//! Discrete-event SP simulation
//!
//! Steps a fixed 30 Hz clock over the simulation horizon. Each tick accrues
//! SP, fires bonus SP sources and, when the unit is free, either casts the
//! skill or makes a basic attack. SP is held in tick units (SP × fps) so the
//! per-tick accrual of a plain time-recovery skill is exactly one unit.

use super::{Duration, DurationInput};
use crate::data::SkillLevelData;
use crate::trace::Trace;
use crate::types::SpType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    Attack,
    Skill,
    /// Periodic SP grant, by index into [`SimParams::bonus`]
    Bonus(usize),
}

/// Periodic SP grant in tick units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusSource {
    pub interval_ticks: u32,
    pub sp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    pub attack_ticks: u32,
    /// Ticks the unit is busy per cast
    pub cast_ticks: u32,
    pub sp_type: SpType,
    pub sp_cost: f64,
    /// Accrual per tick for time-recovery skills
    pub sp_per_tick: f64,
    /// Accrual per basic attack
    pub sp_per_attack: f64,
    pub bonus: Vec<BonusSource>,
    pub horizon_ticks: u32,
}

/// Clock, SP and per-action bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub tick: u32,
    pub sp: f64,
    pub last_trigger: BTreeMap<Action, u32>,
    pub count: BTreeMap<Action, u32>,
    pub casting_until: u32,
}

impl SimState {
    pub fn new(start_sp: f64) -> Self {
        SimState {
            sp: start_sp,
            ..Default::default()
        }
    }

    pub fn count(&self, action: Action) -> u32 {
        self.count.get(&action).copied().unwrap_or(0)
    }

    fn elapsed_since(&self, action: Action) -> Option<u32> {
        self.last_trigger
            .get(&action)
            .map(|last| self.tick.saturating_sub(*last))
    }

    fn fire(&mut self, action: Action) {
        self.last_trigger.insert(action, self.tick);
        *self.count.entry(action).or_insert(0) += 1;
    }

    fn gain(&mut self, amount: f64, cap: f64) {
        self.sp = (self.sp + amount).min(cap);
    }
}

/// Advance one tick
pub fn step(params: &SimParams, state: &SimState) -> SimState {
    let mut next = state.clone();
    let casting = next.tick < next.casting_until;

    if params.sp_type == SpType::IncreaseWithTime && !casting {
        next.gain(params.sp_per_tick, params.sp_cost);
    }

    for (i, bonus) in params.bonus.iter().enumerate() {
        if bonus.interval_ticks == 0 {
            continue;
        }
        let action = Action::Bonus(i);
        let due = match next.elapsed_since(action) {
            Some(elapsed) => elapsed >= bonus.interval_ticks,
            None => next.tick >= bonus.interval_ticks,
        };
        if due {
            next.fire(action);
            if !casting {
                next.gain(bonus.sp, params.sp_cost);
            }
        }
    }

    let attack_ready = next
        .elapsed_since(Action::Attack)
        .map_or(true, |elapsed| elapsed >= params.attack_ticks);
    if !casting && attack_ready {
        if next.sp >= params.sp_cost {
            next.sp -= params.sp_cost;
            next.fire(Action::Skill);
            // The cast occupies the attack slot
            next.last_trigger.insert(Action::Attack, next.tick);
            next.casting_until = next.tick + params.cast_ticks;
        } else {
            next.fire(Action::Attack);
            next.gain(params.sp_per_attack, params.sp_cost);
        }
    }

    next.tick += 1;
    next
}

/// Step from `start` until the horizon
pub fn run(params: &SimParams, start: SimState) -> SimState {
    let mut state = start;
    while state.tick < params.horizon_ticks {
        state = step(params, &state);
    }
    state
}

/// Build simulation parameters from the resolved unit state
pub fn sim_params(input: &DurationInput<'_>, skill: &SkillLevelData) -> SimParams {
    let fps = input.constants.timing.fps;
    let frame = input.frame;
    let attack_ticks = ((input.attack_time * fps).round() as u32).max(1);
    let cast_ticks = ((skill.duration.max(0.0) * fps).round() as u32).max(attack_ticks);
    let sp_per_attack = match skill.sp_data.sp_type {
        SpType::IncreaseWhenAttack => (1.0 + frame.sp_recover_ratio) * fps,
        _ => frame.sp_recover_ratio * fps,
    };

    SimParams {
        attack_ticks,
        cast_ticks,
        sp_type: skill.sp_data.sp_type,
        sp_cost: skill.sp_data.sp_cost * fps,
        sp_per_tick: 1.0 + frame.sp_recovery_per_sec,
        sp_per_attack,
        bonus: frame
            .sp_recover_intervals
            .iter()
            .filter(|iv| iv.interval > 0.0)
            .map(|iv| BonusSource {
                interval_ticks: (iv.interval * fps).round() as u32,
                sp: iv.sp * fps,
            })
            .collect(),
        horizon_ticks: (input.constants.duration.sim_horizon * fps).round() as u32,
    }
}

pub(super) fn simulate_durations(
    input: &DurationInput<'_>,
    skill: &SkillLevelData,
    trace: &mut Trace,
) -> Duration {
    let fps = input.constants.timing.fps;
    let params = sim_params(input, skill);
    let end = run(&params, SimState::new(skill.sp_data.init_sp * fps));

    let casts = f64::from(end.count(Action::Skill));
    let attacks = f64::from(end.count(Action::Attack));
    let horizon = f64::from(params.horizon_ticks) / fps;
    let skill_time = (casts * f64::from(params.cast_ticks) / fps).min(horizon);

    tracing::debug!(casts, attacks, "simulation finished");
    trace.write(
        "duration",
        format!("simulated {}s: {} casts, {} basic attacks", horizon, casts, attacks),
    );

    let mut dur = Duration {
        start_sp: skill.sp_data.init_sp,
        skill_count: casts,
        tags: vec!["sim".to_string()],
        ..Default::default()
    };
    if input.is_skill {
        let per_cast = (f64::from(params.cast_ticks) / f64::from(params.attack_ticks)).ceil();
        dur.attack_count = casts * per_cast;
        dur.duration = skill_time;
    } else {
        dur.attack_count = attacks;
        dur.duration = horizon - skill_time;
    }
    dur
}
