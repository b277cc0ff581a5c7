//! Per-skill attack-count rules
//!
//! Run after the generic counts while the skill is active. Each rule may
//! rewrite any field of the [`Duration`].

use super::{Duration, DurationInput};
use crate::blackboard::Blackboard;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub type DurationHook = fn(&DurationInput<'_>, &Blackboard, &mut Duration);

static DURATION_RULES: Lazy<HashMap<&'static str, DurationHook>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, DurationHook> = HashMap::new();
    m.insert("skchr_archet_2", archet_ricochet);
    m.insert("skchr_cqbw_3", cqbw_bombs);
    m.insert("skchr_chen_3", chen_burst);
    m.insert("skchr_ghost2_3", single_burst);
    m.insert("skchr_yuki_2", secondary_projectiles);
    m.insert("skchr_bibeak_1", periodic_extra_strike);
    m
});

pub fn duration_hook(skill_id: &str) -> Option<DurationHook> {
    DURATION_RULES.get(skill_id).copied()
}

// Arrows bounce to extra enemies, each bounce one more hit
fn archet_ricochet(input: &DurationInput<'_>, bb: &Blackboard, dur: &mut Duration) {
    let bounces = bb.value("attack@plus_target").min((input.target_count - 1.0).max(0.0));
    dur.hit_count += dur.attack_count * dur.times * bounces;
}

// Bombs replace the attack: one hit per bomb per target
fn cqbw_bombs(input: &DurationInput<'_>, bb: &Blackboard, dur: &mut Duration) {
    dur.attack_count = bb.value_or("cnt", 1.0);
    dur.times = 1.0;
    dur.hit_count = dur.attack_count * input.target_count;
}

// Single slash sequence; the slash count is the hit multiplier, not extra attacks
fn chen_burst(input: &DurationInput<'_>, bb: &Blackboard, dur: &mut Duration) {
    let slashes = bb.value_or("attack@times", dur.times);
    dur.attack_count = 1.0;
    dur.times = slashes;
    dur.hit_count = slashes * input.target_count;
}

// One cast hitting `attack@hits` times
fn single_burst(input: &DurationInput<'_>, bb: &Blackboard, dur: &mut Duration) {
    dur.attack_count = 1.0;
    dur.times = bb.value_or("attack@hits", 1.0);
    dur.hit_count = dur.times * input.target_count;
}

// Each attack also throws `attack@attack_cnt` projectiles at other enemies
fn secondary_projectiles(input: &DurationInput<'_>, bb: &Blackboard, dur: &mut Duration) {
    let others = (input.target_count - 1.0).max(0.0);
    let projectiles = bb.value("attack@attack_cnt").min(others);
    dur.hit_count += dur.attack_count * projectiles;
}

// Every `cnt`-th attack strikes once more
fn periodic_extra_strike(input: &DurationInput<'_>, bb: &Blackboard, dur: &mut Duration) {
    let every = bb.value_or("cnt", 0.0);
    if every <= 0.0 {
        return;
    }
    dur.hit_count += (dur.attack_count / every).floor() * input.target_count;
}
