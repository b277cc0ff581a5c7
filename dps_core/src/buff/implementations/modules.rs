//! Module overlays
//!
//! Module blackboards carry a `trait` view (the upgraded class trait) and a
//! `talent` view (the upgraded talent). The chosen view replaces the root
//! entries; a second view may be merged on top. Nothing applies without `equip`.

use crate::blackboard::Blackboard;
use crate::buff::{BuffCtx, Handled};

/// Merge view `name` over the current entries
fn merge_view(bb: &mut Blackboard, name: &str) -> bool {
    match bb.view(name).cloned() {
        Some(view) => {
            bb.merge(&view);
            true
        }
        None => false,
    }
}

/// Schwarz: trait always; the talent upgrade only sharpens critical hits
pub fn shwaz_module(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if !ctx.options().equip {
        return ctx.skip("module not equipped");
    }
    bb.substitute_view("trait");
    if ctx.is_crit && merge_view(bb, "talent") {
        ctx.note("talent upgrade applied to critical hits");
    }
    Handled::Continue
}

/// Ceobe: the talent upgrade grants SP on a fixed interval
pub fn cerber_module(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if !ctx.options().equip {
        return ctx.skip("module not equipped");
    }
    bb.substitute_view("trait");
    merge_view(bb, "talent");
    Handled::Continue
}

/// SilverAsh: the trait bonus only counts against blocked enemies
pub fn svrash_module(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if !ctx.options().equip {
        return ctx.skip("module not equipped");
    }
    bb.substitute_view("trait");
    if ctx.options().noblock {
        bb.remove("atk_scale");
        ctx.note("no blocked enemy, trait bonus ignored");
    }
    Handled::Continue
}

/// Exusiai: the talent view replaces the trait; its ATK bonus is capped
pub fn angel_module(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if !ctx.options().equip {
        return ctx.skip("module not equipped");
    }
    if !bb.substitute_view("talent") {
        bb.substitute_view("trait");
    }
    if bb.value("atk") > 0.1 {
        bb.set("atk", 0.1);
        ctx.note("module ATK bonus capped at 10%");
    }
    Handled::Continue
}

/// Eyjafjalla: the trait splash ratio feeds the extra pass; only the
/// resistance shred stays in the frame
pub fn amgoat_module(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if !ctx.options().equip {
        return ctx.skip("module not equipped");
    }
    bb.substitute_view("trait");
    bb.remove("atk_scale_2");
    Handled::Continue
}

/// Ch'en: the trait bonus is a damage multiplier against blocked enemies
pub fn chen_module(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if !ctx.options().equip {
        return ctx.skip("module not equipped");
    }
    bb.substitute_view("trait");
    bb.rename("atk_scale", "damage_scale");
    Handled::Continue
}

/// Modules whose talent view only matters with the talent's condition met
pub fn conditional_talent_module(ctx: &mut BuffCtx<'_>, bb: &mut Blackboard) -> Handled {
    if !ctx.options().equip {
        return ctx.skip("module not equipped");
    }
    bb.substitute_view("trait");
    if ctx.options().cond && merge_view(bb, "talent") {
        ctx.note("talent upgrade with condition met");
    }
    Handled::Continue
}
