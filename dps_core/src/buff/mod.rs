//! Buff Application Engine
//!
//! Folds one buff's blackboard into a [`BuffFrame`]. The flow per buff:
//! tag resolution, idempotence guard, category dispatch (conditional,
//! ranged-penalty, stacking, general override), module overlay, then the
//! generic per-key rules for whatever is left in the working blackboard.

mod generic;
mod hooks;
mod implementations;
mod registry;

pub use generic::apply_generic;
pub use hooks::BuffHooks;
pub use registry::hooks_for;

use crate::blackboard::Blackboard;
use crate::config::SpecialTags;
use crate::data::{BasicAttributes, UnitContext};
use crate::frame::BuffFrame;
use crate::trace::Trace;
use crate::types::{CalcOptions, EnemyProfile};

/// Whether a handler fully consumed the buff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Run the remaining steps on the (possibly rewritten) blackboard
    Continue,
    /// Stop; the generic rules do not run
    Done,
}

/// Read-only inputs shared by every buff application of one calculation
#[derive(Debug, Clone, Copy)]
pub struct BuffEnv<'a> {
    pub unit: &'a UnitContext,
    pub options: &'a CalcOptions,
    pub enemy: &'a EnemyProfile,
    pub special: &'a SpecialTags,
}

/// State handed to a handler
pub struct BuffCtx<'a> {
    pub env: &'a BuffEnv<'a>,
    pub frame: &'a mut BuffFrame,
    /// Resolved tag (`skill` already replaced by the skill id)
    pub tag: &'a str,
    pub is_skill: bool,
    pub is_crit: bool,
    pub trace: &'a mut Trace,
}

impl BuffCtx<'_> {
    pub fn basic(&self) -> &BasicAttributes {
        &self.env.unit.basic
    }

    pub fn options(&self) -> &CalcOptions {
        self.env.options
    }

    /// Write an explanation line under this buff's tag
    pub fn note(&mut self, message: impl Into<String>) {
        self.trace.write(self.tag, message);
    }

    /// Gate the buff off for this pass; its extra-damage handler is skipped too
    pub fn skip(&mut self, reason: &str) -> Handled {
        self.frame.suppress(self.tag);
        self.note(reason);
        Handled::Done
    }
}

/// Handler signature; the blackboard is the buff's private working copy
pub type BuffHook = fn(&mut BuffCtx<'_>, &mut Blackboard) -> Handled;

/// Concrete identifier for a buff entry, or `None` when it contributes nothing
/// this pass (a `skill` entry while the skill is down and not passive)
pub fn resolve_tag(env: &BuffEnv<'_>, tag: &str, is_skill: bool) -> Option<String> {
    if tag != "skill" {
        return Some(tag.to_string());
    }
    let skill_id = env.unit.skill_id()?;
    if is_skill || env.special.flag(skill_id, "passive") {
        Some(skill_id.to_string())
    } else {
        None
    }
}

/// Apply one buff to `frame` and return the updated frame
pub fn apply_buff(
    env: &BuffEnv<'_>,
    mut frame: BuffFrame,
    tag: &str,
    blackboard: &Blackboard,
    is_skill: bool,
    is_crit: bool,
    trace: &mut Trace,
) -> BuffFrame {
    let Some(resolved) = resolve_tag(env, tag, is_skill) else {
        return frame;
    };
    if !frame.mark_applied(&resolved) {
        tracing::trace!(tag = %resolved, "buff already applied");
        return frame;
    }

    let mut bb = blackboard.clone();
    let mut ctx = BuffCtx {
        env,
        frame: &mut frame,
        tag: &resolved,
        is_skill,
        is_crit,
        trace,
    };
    if let Some(note) = env.special.text(&resolved, "note") {
        ctx.note(note);
    }

    let mut handled = dispatch_category(&mut ctx, &mut bb);
    if handled == Handled::Continue {
        handled = module_overlay(&mut ctx, &mut bb);
    }
    if handled == Handled::Continue {
        apply_generic(&mut ctx, &bb);
    }

    tracing::trace!(tag = %resolved, ?handled, is_crit, "buff applied");
    frame
}

fn dispatch_category(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    let special = ctx.env.special;
    let options = ctx.env.options;
    let hooks = hooks_for(ctx.tag);

    if special.flag(ctx.tag, "cond") {
        let hook = if options.cond {
            hooks.and_then(|h| h.on_cond_true)
        } else {
            hooks.and_then(|h| h.on_cond_false)
        };
        return match hook {
            Some(h) => h(ctx, bb),
            None => Handled::Continue,
        };
    }

    if special.flag(ctx.tag, "ranged_penalty") {
        return if options.ranged_penalty {
            Handled::Continue
        } else {
            ctx.skip("ranged penalty off")
        };
    }

    if special.flag(ctx.tag, "stack") {
        if !options.stack {
            return ctx.skip("stacking off");
        }
        if let Some(h) = hooks.and_then(|h| h.on_stack) {
            if h(ctx, bb) == Handled::Done {
                return Handled::Done;
            }
        }
        if let Some(stacks) = bb.get("max_stack_cnt") {
            for key in ["atk", "def", "attack_speed", "max_hp"] {
                bb.scale(key, stacks);
            }
            ctx.note(format!("{} stacks", stacks));
        }
        return Handled::Continue;
    }

    match hooks.and_then(|h| h.on_apply) {
        Some(h) => h(ctx, bb),
        None => Handled::Continue,
    }
}

/// Module tags: without `equip` the module contributes nothing; otherwise the
/// `trait` view replaces the root entries unless a module hook takes over
fn module_overlay(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if let Some(h) = hooks_for(ctx.tag).and_then(|h| h.on_module) {
        return h(ctx, bb);
    }
    if ctx.env.unit.equip_id.as_deref() != Some(ctx.tag) {
        return Handled::Continue;
    }
    if !ctx.env.options.equip {
        return ctx.skip("module not equipped");
    }
    bb.substitute_view("trait");
    Handled::Continue
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::types::Profession;

    pub fn unit() -> UnitContext {
        UnitContext::new(
            "char_test",
            Profession::Guard,
            BasicAttributes {
                atk: 1000.0,
                def: 200.0,
                max_hp: 3000.0,
                base_attack_time: 1.0,
                ..Default::default()
            },
        )
    }

    /// Run one buff through [`apply_buff`] on a fresh frame
    pub fn apply(
        unit: &UnitContext,
        options: &CalcOptions,
        tag: &str,
        bb: &Blackboard,
        is_skill: bool,
    ) -> BuffFrame {
        let enemy = EnemyProfile::default();
        let env = BuffEnv {
            unit,
            options,
            enemy: &enemy,
            special: SpecialTags::embedded(),
        };
        let mut trace = Trace::disabled();
        apply_buff(&env, BuffFrame::new(), tag, bb, is_skill, false, &mut trace)
    }
}
