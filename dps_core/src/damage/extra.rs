//! Extra damage/heal contributions
//!
//! Buffs whose effect is not a uniform per-hit multiplier add to the extra
//! pool here: damage over time, splash, siphons, bursts that replace the
//! basic attack, shields. Handlers are keyed by resolved buff tag and run
//! after the base pool is filled.

use super::defense::{arts_hit, physical_hit};
use super::pool::{DamagePool, PoolSlot};
use crate::blackboard::Blackboard;
use crate::config::SpecialTags;
use crate::data::UnitContext;
use crate::duration::Duration;
use crate::frame::{BuffFrame, FinalAttributes};
use crate::trace::Trace;
use crate::types::{CalcOptions, DamageType};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub struct ExtraCtx<'a> {
    pub unit: &'a UnitContext,
    pub options: &'a CalcOptions,
    pub special: &'a SpecialTags,
    pub is_skill: bool,
    pub tag: &'a str,
    pub blackboard: &'a Blackboard,
    pub attrs: &'a FinalAttributes,
    pub frame: &'a BuffFrame,
    pub dur: &'a mut Duration,
    pub damage_type: DamageType,
    pub def: f64,
    pub res_fraction: f64,
    pub floor: f64,
    pub target_count: f64,
    pub enemy_count: f64,
    /// Base hits and crits; handlers may zero it when they replace the attack
    pub base: &'a mut DamagePool,
    pub extra: &'a mut DamagePool,
    pub trace: &'a mut Trace,
}

impl ExtraCtx<'_> {
    fn note(&mut self, message: impl Into<String>) {
        self.trace.write(self.tag, message);
    }
}

pub type ExtraHook = fn(&mut ExtraCtx<'_>);

// ============================================================================
// Registry
// ============================================================================

static EXTRA_DAMAGE: Lazy<HashMap<&'static str, ExtraHook>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, ExtraHook> = HashMap::new();
    // Per-second ticks
    m.insert("tachr_293_thorns_1", poison_per_second);
    m.insert("tachr_4055_bgsnow_1", poison_per_second);
    m.insert("skchr_lava2_1", burn_per_second);
    m.insert("skchr_ifrit_2", burn_per_second);
    m.insert("skchr_lava2_2", aura_per_second);
    m.insert("skchr_mudrok_3", aura_per_second);
    m.insert("skchr_nearl_2", regen_per_second);
    m.insert("skchr_hpsts_2", regen_per_second);
    m.insert("skchr_surtr_3", surtr_hp_drain);
    // Heal from damage dealt
    m.insert("tachr_188_helage_2", lifesteal);
    m.insert("tachr_283_midn_1", lifesteal);
    m.insert("tachr_1013_chen2_2", lifesteal);
    // Attacks replaced by bursts
    m.insert("skchr_cqbw_3", burst_replaces_attack);
    m.insert("skchr_ghost2_3", burst_replaces_attack);
    // Overdrive second half
    m.insert("skchr_horn_3", overdrive_split);
    m.insert("skchr_amgoat_2", amgoat_splash);
    m.insert("skchr_hsguma_2", shield_by_max_hp);
    m.insert("skchr_nearl2_2", shield_by_max_hp);
    m
});

pub fn extra_hook(tag: &str) -> Option<ExtraHook> {
    EXTRA_DAMAGE.get(tag).copied()
}

// ============================================================================
// Handlers
// ============================================================================

// Attacks poison: arts damage per second on every target hit
fn poison_per_second(ctx: &mut ExtraCtx<'_>) {
    let per_sec = arts_hit(ctx.blackboard.value("damage"), ctx.res_fraction, ctx.floor);
    let amount = per_sec * ctx.dur.duration * ctx.target_count;
    ctx.extra.add(PoolSlot::Arts, amount);
    ctx.note(format!("poison {:.1}/s, {:.0} total", per_sec, amount));
}

// Burn scaled by ATK on every target hit
fn burn_per_second(ctx: &mut ExtraCtx<'_>) {
    let atk = ctx.attrs.atk * ctx.blackboard.value("damage_by_atk_scale");
    let per_sec = arts_hit(atk, ctx.res_fraction, ctx.floor) * ctx.frame.damage_scale;
    let amount = per_sec * ctx.dur.duration * ctx.target_count;
    ctx.extra.add(PoolSlot::Arts, amount);
    ctx.note(format!("burn {:.1}/s, {:.0} total", per_sec, amount));
}

// Field damage on every enemy in range, attacked or not
fn aura_per_second(ctx: &mut ExtraCtx<'_>) {
    let atk = ctx.attrs.atk * ctx.blackboard.value("damage_by_atk_scale");
    let per_sec = arts_hit(atk, ctx.res_fraction, ctx.floor) * ctx.frame.damage_scale;
    let amount = per_sec * ctx.dur.duration * ctx.enemy_count;
    ctx.extra.add(PoolSlot::Arts, amount);
    ctx.note(format!("aura {:.1}/s on {} enemies", per_sec, ctx.enemy_count));
}

fn regen_per_second(ctx: &mut ExtraCtx<'_>) {
    let per_sec = ctx.attrs.max_hp * ctx.blackboard.value("hp_recovery_per_sec_by_max_hp_ratio");
    let amount = per_sec * ctx.dur.duration;
    ctx.extra.add(PoolSlot::Heal, amount);
    ctx.note(format!("regen {:.1}/s", per_sec));
}

fn lifesteal(ctx: &mut ExtraCtx<'_>) {
    let ratio = ctx.blackboard.value("atk_to_hp_recovery_ratio");
    let amount = ctx.base.total_damage() * ratio;
    ctx.extra.add(PoolSlot::Heal, amount);
    ctx.note(format!("lifesteal {:.0}", amount));
}

// Secondary targets take a reduced hit
fn amgoat_splash(ctx: &mut ExtraCtx<'_>) {
    let splash_targets = (ctx.enemy_count - ctx.target_count).max(0.0);
    if splash_targets <= 0.0 || ctx.frame.atk_scale <= 0.0 {
        return;
    }
    let atk = ctx.attrs.atk / ctx.frame.atk_scale * ctx.blackboard.value("atk_scale_2");
    let hit = arts_hit(atk, ctx.res_fraction, ctx.floor) * ctx.frame.damage_scale;
    let amount = hit * ctx.dur.attack_count * splash_targets;
    ctx.extra.add(PoolSlot::Arts, amount);
    ctx.note(format!("splash {:.0} x {} targets", hit, splash_targets));
}

// Bursts replace the basic attack entirely
fn burst_replaces_attack(ctx: &mut ExtraCtx<'_>) {
    let atk = ctx.attrs.atk * ctx.blackboard.value_or("atk_scale", 1.0);
    let hit = physical_hit(atk, ctx.def, ctx.floor) * ctx.frame.damage_scale;
    let hits = ctx.dur.hit_count + ctx.dur.crit_hit_count;
    ctx.base.clear();
    ctx.extra.add(PoolSlot::Physical, hit * hits);
    ctx.note(format!("{} burst hits of {:.0}", hits, hit));
}

// Past the overdrive point the rest of the window deals `od_scale` damage
fn overdrive_split(ctx: &mut ExtraCtx<'_>) {
    if !ctx.options.od_trigger {
        ctx.note("overdrive not triggered");
        return;
    }
    let ratio = ctx.special.number(ctx.tag, "overdrive").unwrap_or(0.5);
    let bonus = ctx.blackboard.value_or("od_scale", 1.0) - 1.0;
    if bonus <= 0.0 {
        return;
    }
    for slot in [PoolSlot::Physical, PoolSlot::Arts, PoolSlot::True] {
        let second_half = ctx.base.get(slot) * (1.0 - ratio);
        ctx.extra.add(slot, second_half * bonus);
    }
    ctx.note(format!("overdrive x{:.2} after {:.0}% of the window", 1.0 + bonus, ratio * 100.0));
}

fn shield_by_max_hp(ctx: &mut ExtraCtx<'_>) {
    let shield = ctx.attrs.max_hp * ctx.blackboard.value("hp_ratio");
    ctx.extra.add(PoolSlot::Shield, shield);
}

// Loses HP every second while active
fn surtr_hp_drain(ctx: &mut ExtraCtx<'_>) {
    let per_sec = ctx.attrs.max_hp * ctx.blackboard.value("hp_ratio");
    let amount = per_sec * ctx.dur.duration;
    ctx.extra.add(PoolSlot::Heal, -amount);
    ctx.note(format!("self damage {:.0}", amount));
}
