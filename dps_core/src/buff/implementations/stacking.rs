//! Stacking talents (`stack` tag), run before the default stack multiplier

use crate::blackboard::Blackboard;
use crate::buff::{BuffCtx, Handled};

/// Broca: each stack adds its ATK multiplier linearly instead of compounding
pub fn broca_linear_scale(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    let stacks = bb.value_or("max_stack_cnt", 1.0);
    if let Some(scale) = bb.get("atk_scale") {
        let total = 1.0 + (scale - 1.0) * stacks;
        bb.set("atk_scale", total);
        ctx.note(format!("atk_scale x{:.2} at {} stacks", total, stacks));
    }
    Handled::Continue
}

/// Defense shred per stack; the default multiplier does not cover penetration
pub fn shred_per_stack(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    let stacks = bb.value_or("max_stack_cnt", 1.0);
    bb.scale("def_penetrate_fixed", stacks);
    bb.scale("magic_resist_penetrate_fixed", stacks);
    ctx.note(format!("penetration x{}", stacks));
    Handled::Continue
}

/// Stacks are gained per skill cast and run out in between; the basic-attack
/// state averages half the stacks
pub fn skill_built_stacks(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if !ctx.is_skill {
        bb.scale("max_stack_cnt", 0.5);
        ctx.note("averaged to half stacks outside the skill");
    }
    Handled::Continue
}

/// Stacks only build while the skill is up
pub fn skill_only_stacks(ctx: &mut BuffCtx<'_>, _bb: &mut Blackboard) -> Handled {
    if !ctx.is_skill {
        return ctx.skip("stacks only build during the skill");
    }
    Handled::Continue
}
