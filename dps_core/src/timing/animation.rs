//! Animation Timing Resolver
//!
//! Stretches or compresses the recorded attack animation to the theoretical
//! interval, splits it around the hit frame, and reconciles the result with
//! the theoretical frame count.

use crate::config::{AnimEntry, AnimationTable, SpecialTags, TimingConstants};
use crate::trace::Trace;
use serde::{Deserialize, Serialize};

const BASIC_ATTACK_KEYS: [&str; 3] = ["Attack", "Attack_Loop", "Combat"];

#[derive(Debug, Clone, Copy)]
pub struct AnimRequest<'a> {
    pub unit_id: &'a str,
    pub skill_id: Option<&'a str>,
    /// Slot of the skill in the unit's skill list
    pub skill_index: usize,
    pub is_skill: bool,
    /// Theoretical interval in frames
    pub attack_frame: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimTiming {
    pub real_attack_time: f64,
    pub real_attack_frame: f64,
    pub pre_delay: f64,
    pub post_delay: f64,
    pub scaled_anim_frame: f64,
    pub anim_key: Option<String>,
}

/// Pick the animation key for this attack
fn select_key(anim: &AnimationTable, special: &SpecialTags, req: &AnimRequest<'_>) -> Option<String> {
    let active_skill = req.skill_id.filter(|_| req.is_skill);
    let explicit = match active_skill {
        Some(skill_id) => special.text(skill_id, "anim_key"),
        None => special.text(req.unit_id, "anim_key"),
    };
    if let Some(key) = explicit {
        return Some(key.to_string());
    }

    let keys = anim.keys(req.unit_id);
    if active_skill.is_some() {
        let candidates: Vec<&str> = keys
            .iter()
            .copied()
            .filter(|k| k.starts_with("Skill") && !k.contains("Begin") && !k.contains("End"))
            .collect();
        let slot = req.skill_index + 1;
        let by_name = candidates
            .iter()
            .find(|k| **k == format!("Skill_{}", slot) || **k == format!("Skill{}", slot));
        let picked = by_name
            .or_else(|| candidates.get(req.skill_index))
            .or_else(|| if candidates.len() == 1 { candidates.first() } else { None });
        if let Some(key) = picked {
            return Some(key.to_string());
        }
    }

    BASIC_ATTACK_KEYS
        .iter()
        .find(|k| keys.contains(*k))
        .map(|k| k.to_string())
}

/// Realize the theoretical interval against the unit's animation
pub fn resolve_animation(
    anim: &AnimationTable,
    special: &SpecialTags,
    timing: &TimingConstants,
    req: &AnimRequest<'_>,
    trace: &mut Trace,
) -> AnimTiming {
    let theoretical = req.attack_frame;
    let anim_key = select_key(anim, special, req);
    let entry = anim_key.as_deref().and_then(|key| anim.get(req.unit_id, key));

    let max_scale = req
        .skill_id
        .filter(|_| req.is_skill)
        .and_then(|id| special.number(id, "anim_max_scale"))
        .or_else(|| special.number(req.unit_id, "anim_max_scale"))
        .unwrap_or(timing.anim_scale_max);

    let (frames, pre_delay, post_delay, scaled) = match entry {
        Some(AnimEntry::Timed { duration, on_attack }) if duration > 0.0 => {
            let upper = max_scale.max(timing.anim_scale_min);
            let scale = (theoretical / duration).clamp(timing.anim_scale_min, upper);
            let pre = (on_attack * scale).round().max(1.0);
            let post = (duration * scale - pre).round().max(1.0);
            let scaled = pre + post;
            let frames = if theoretical - scaled > timing.reconcile_gap {
                theoretical.ceil() + 1.0
            } else {
                scaled.max(theoretical.round())
            };
            trace.write(
                "animation",
                format!(
                    "{}: {} frames scaled x{:.2} -> {} + {} = {}, realized {}",
                    anim_key.as_deref().unwrap_or("-"),
                    duration,
                    scale,
                    pre,
                    post,
                    scaled,
                    frames
                ),
            );
            (frames, pre, post, scaled)
        }
        Some(_) => {
            let frames = theoretical.round();
            (frames, 0.0, 0.0, frames)
        }
        None => {
            trace.write(
                "animation",
                format!("no animation entry for {}, using theoretical frames", req.unit_id),
            );
            let frames = theoretical.round();
            (frames, 0.0, 0.0, frames)
        }
    };

    AnimTiming {
        real_attack_time: frames / timing.fps,
        real_attack_frame: frames,
        pre_delay,
        post_delay,
        scaled_anim_frame: scaled,
        anim_key,
    }
}
