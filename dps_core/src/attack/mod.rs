//! Attack Orchestrator
//!
//! One [`calculate_attack`] call runs the whole pipeline for one skill state:
//! buff frames, damage type, final attributes, cadence and animation,
//! durations, mitigation, crits, pools and extras.

mod result;

pub use result::{DpsReport, DpsResult};

use crate::buff::{apply_buff, resolve_tag, BuffEnv};
use crate::damage::{
    apply_crit, classify_damage_type, effective_def, effective_res, extra_hook, hit_damage,
    sequence_damage, CritRule, DamagePool, ExtraCtx, SequenceInput,
};
use crate::data::{build_unit, UnitContext, UnitSpec};
use crate::duration::{calc_durations, DurationInput};
use crate::error::CalcError;
use crate::frame::{get_buffed_attributes_within, BuffFrame, FinalAttributes};
use crate::tables::GameTables;
use crate::timing::{resolve_animation, resolve_cadence, AnimRequest};
use crate::trace::Trace;
use crate::types::{CalcOptions, DamageType, EnemyProfile, RaidBuff};
use serde::{Deserialize, Serialize};

/// Tag under which the team-wide buff is folded in
pub const RAID_BUFF_TAG: &str = "raidBuff";

/// One unit against one enemy profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcRequest {
    pub unit: UnitContext,
    #[serde(default)]
    pub options: CalcOptions,
    #[serde(default)]
    pub enemy: EnemyProfile,
    #[serde(default)]
    pub raid: RaidBuff,
}

impl CalcRequest {
    pub fn new(unit: UnitContext) -> Self {
        CalcRequest {
            unit,
            options: CalcOptions::default(),
            enemy: EnemyProfile::default(),
            raid: RaidBuff::default(),
        }
    }

    /// Assemble the unit from game data
    pub fn from_spec(tables: &GameTables, spec: &UnitSpec) -> Result<Self, CalcError> {
        Ok(Self::new(build_unit(&tables.game, spec)?))
    }

    pub fn with_options(mut self, options: CalcOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_enemy(mut self, enemy: EnemyProfile) -> Self {
        self.enemy = enemy;
        self
    }

    pub fn with_raid(mut self, raid: RaidBuff) -> Self {
        self.raid = raid;
        self
    }
}

/// Fold every active buff (and the raid buff) into a fresh frame
///
/// The normal pass skips crit-only buffs; the crit pass includes them.
fn build_frame(
    env: &BuffEnv<'_>,
    raid: &RaidBuff,
    is_skill: bool,
    is_crit: bool,
    trace: &mut Trace,
) -> BuffFrame {
    let mut frame = BuffFrame::new();
    for entry in &env.unit.buff_list {
        let Some(tag) = resolve_tag(env, &entry.tag, is_skill) else {
            continue;
        };
        if !is_crit && env.special.flag(&tag, "crit") {
            trace.write(&tag, "crit only, skipped in normal pass");
            continue;
        }
        frame = apply_buff(env, frame, &entry.tag, &entry.blackboard, is_skill, is_crit, trace);
    }
    if !raid.is_empty() {
        frame = apply_buff(env, frame, RAID_BUFF_TAG, &raid.to_blackboard(), is_skill, is_crit, trace);
    }
    frame
}

/// Average multiplier of a chain that loses `decay` per bounce
pub fn chain_falloff(decay: f64, targets: f64) -> f64 {
    let n = targets.round().max(1.0) as i32;
    let sum: f64 = (0..n).map(|i| decay.powi(i)).sum();
    sum / f64::from(n)
}

/// Extra handlers only fire for buffs the frame pass did not gate off
fn extra_active(frame: &BuffFrame, tag: &str) -> bool {
    !frame.is_suppressed(tag)
}

/// Hit damage and the mitigation it was computed against
struct Hit {
    atk: f64,
    def: f64,
    res: f64,
    damage: f64,
}

fn resolve_hit(
    damage_type: DamageType,
    attrs: &FinalAttributes,
    frame: &BuffFrame,
    enemy: &EnemyProfile,
    floor: f64,
    damage_scale: f64,
) -> Hit {
    let atk = if damage_type == DamageType::Heal {
        attrs.atk * frame.heal_scale
    } else {
        attrs.atk
    };
    let def = effective_def(enemy.def, frame);
    let res = effective_res(enemy.res, frame);
    Hit {
        atk,
        def,
        res,
        damage: hit_damage(damage_type, atk, def, res, floor) * damage_scale,
    }
}

/// Run the full pipeline for one skill state
pub fn calculate_attack(
    tables: &GameTables,
    req: &CalcRequest,
    is_skill: bool,
    trace: &mut Trace,
) -> DpsResult {
    let special = &tables.special;
    let constants = &tables.constants;
    let unit = &req.unit;
    let env = BuffEnv {
        unit,
        options: &req.options,
        enemy: &req.enemy,
        special,
    };
    let active_skill = unit.skill_id().filter(|_| is_skill);

    tracing::debug!(char_id = %unit.char_id, is_skill, "attack calculation started");
    trace.write(
        "attack",
        format!("{} ({})", unit.char_id, if is_skill { "skill" } else { "normal" }),
    );

    let frame = build_frame(&env, &req.raid, is_skill, false, trace);
    let damage_type = classify_damage_type(unit, is_skill, special);
    let attrs = get_buffed_attributes_within(&unit.basic, &frame, &constants.timing);
    let crit_pass = req.options.crit.then(|| {
        let crit_frame = build_frame(&env, &req.raid, is_skill, true, trace);
        let crit_attrs = get_buffed_attributes_within(&unit.basic, &crit_frame, &constants.timing);
        (crit_frame, crit_attrs)
    });

    // Cadence
    let frame_corr = active_skill
        .and_then(|id| special.number(id, "frame_corr"))
        .or_else(|| special.number(&unit.char_id, "frame_corr"));
    let cadence = resolve_cadence(&attrs, frame_corr, &constants.timing);
    let anim = resolve_animation(
        &tables.anim,
        special,
        &constants.timing,
        &AnimRequest {
            unit_id: &unit.char_id,
            skill_id: unit.skill_id(),
            skill_index: unit.skill_index,
            is_skill,
            attack_frame: cadence.frames,
        },
        trace,
    );
    let attack_time = anim.real_attack_time;
    trace.write(
        "cadence",
        format!(
            "attack speed {}, interval {:.3}s, {} frames",
            cadence.attack_speed, cadence.attack_interval, anim.real_attack_frame
        ),
    );

    // Targets
    let enemy_count = f64::from(req.enemy.count.max(1));
    let target_count = if active_skill.map_or(false, |id| special.flag(id, "full_target")) {
        frame.max_target.max(1.0)
    } else {
        frame.max_target.min(enemy_count).max(1.0)
    };

    let mut chain_scale = 1.0;
    if unit.sub_profession_id == "chain" && target_count > 1.0 {
        let decay = special
            .number(&unit.char_id, "chain_decay")
            .unwrap_or(constants.damage.chain_decay);
        chain_scale = chain_falloff(decay, target_count);
        trace.write("damage", format!("chain falloff x{:.3}", chain_scale));
    }

    let mut dur = calc_durations(
        &DurationInput {
            unit,
            is_skill,
            attack_time,
            attack_speed: cadence.attack_speed,
            frame: &frame,
            target_count,
            options: &req.options,
            special,
            constants,
        },
        trace,
    );

    // Base hit
    let floor = special
        .number(&unit.char_id, "min_damage")
        .unwrap_or(constants.damage.min_damage_floor);
    let damage_scale = frame.damage_scale * chain_scale;
    let hit = resolve_hit(damage_type, &attrs, &frame, &req.enemy, floor, damage_scale);

    // Crits
    let mut crit_damage = 0.0;
    if let Some((crit_frame, crit_attrs)) = &crit_pass {
        let prob = crit_frame.prob.unwrap_or(0.0);
        let rule = CritRule::for_unit(&unit.char_id, special);
        let hits_per_attack = if dur.attack_count > 0.0 {
            dur.hit_count / dur.attack_count
        } else {
            dur.times * target_count
        };
        apply_crit(&mut dur, rule, prob, hits_per_attack);
        crit_damage = resolve_hit(
            damage_type,
            crit_attrs,
            crit_frame,
            &req.enemy,
            floor,
            crit_frame.damage_scale * chain_scale,
        )
        .damage;
        trace.write(
            "crit",
            format!(
                "{:?} p={:.2}: {} crit attacks, {} crit hits of {:.1}",
                rule, prob, dur.crit_count, dur.crit_hit_count, crit_damage
            ),
        );
    }

    // Pools
    let mut base = DamagePool::new();
    let seq_id = active_skill.unwrap_or(unit.char_id.as_str());
    match special.list(seq_id, "atk_seq") {
        Some(seq) => {
            let normal_hits = sequence_damage(
                seq,
                &SequenceInput {
                    damage_type,
                    atk: hit.atk,
                    def: hit.def,
                    res_fraction: hit.res,
                    floor,
                    damage_scale,
                    attack_count: dur.attack_count - dur.crit_count,
                    hit_count: dur.hit_count,
                },
            );
            base.add(damage_type, normal_hits);
        }
        None => base.add(damage_type, hit.damage * dur.hit_count),
    }
    base.add(damage_type, crit_damage * dur.crit_hit_count);

    let mut extra = DamagePool::new();
    for entry in &unit.buff_list {
        let Some(tag) = resolve_tag(&env, &entry.tag, is_skill) else {
            continue;
        };
        let Some(hook) = extra_hook(&tag) else {
            continue;
        };
        if !extra_active(&frame, &tag) {
            trace.write(&tag, "gated off, extra skipped");
            continue;
        }
        let mut ctx = ExtraCtx {
            unit,
            options: &req.options,
            special,
            is_skill,
            tag: &tag,
            blackboard: &entry.blackboard,
            attrs: &attrs,
            frame: &frame,
            dur: &mut dur,
            damage_type,
            def: hit.def,
            res_fraction: hit.res,
            floor,
            target_count,
            enemy_count,
            base: &mut base,
            extra: &mut extra,
            trace: &mut *trace,
        };
        hook(&mut ctx);
    }

    // Totals
    let total_damage = base.total_damage() + extra.total_damage();
    let total_heal = base.total_heal() + extra.total_heal();
    let time = if dur.reset_attack && !is_skill {
        dur.attack_count * attack_time
    } else {
        dur.total_time()
    };
    let (dps, hps) = if time > 0.0 {
        (total_damage / time, total_heal / time)
    } else {
        (0.0, 0.0)
    };

    tracing::debug!(
        char_id = %unit.char_id,
        is_skill,
        total_damage,
        total_heal,
        dps,
        "attack calculation finished"
    );
    trace.write(
        "attack",
        format!("{:.0} damage, {:.0} heal over {:.2}s", total_damage, total_heal, time),
    );

    let sp_type = unit
        .skill
        .as_ref()
        .map(|s| s.sp_data.sp_type.label().to_string())
        .unwrap_or_default();

    DpsResult {
        is_skill,
        atk: hit.atk,
        dps,
        hps,
        attack_count: dur.attack_count,
        dur,
        damage_type,
        hit_damage: hit.damage,
        crit_damage,
        extra_damage: extra.total_damage(),
        extra_heal: extra.total_heal(),
        total_damage,
        total_heal,
        damage_pool: base,
        extra_damage_pool: extra,
        max_target: target_count,
        attack_time,
        frame: anim.real_attack_frame,
        sp_type,
        time,
        final_attributes: attrs,
    }
}

/// Skill state, basic-attack state and their duration-weighted combination
pub fn calculate_dps(tables: &GameTables, req: &CalcRequest, trace: &mut Trace) -> DpsReport {
    let castable = req.unit.skill.as_ref().map_or(false, |s| !s.is_passive());
    let skill = castable.then(|| calculate_attack(tables, req, true, trace));
    let normal = calculate_attack(tables, req, false, trace);

    let (global_dps, global_hps) = match &skill {
        Some(s) => {
            let time = s.time + normal.time;
            if time > 0.0 {
                (
                    (s.total_damage + normal.total_damage) / time,
                    (s.total_heal + normal.total_heal) / time,
                )
            } else {
                (0.0, 0.0)
            }
        }
        None => (normal.dps, normal.hps),
    };

    tracing::debug!(char_id = %req.unit.char_id, global_dps, global_hps, "cycle totals");
    DpsReport {
        skill,
        normal,
        global_dps,
        global_hps,
    }
}
