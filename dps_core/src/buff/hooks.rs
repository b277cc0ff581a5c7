use super::BuffHook;

/// Override handlers registered for one buff identifier
///
/// Each slot corresponds to one dispatch step; an empty slot means the
/// default behavior of that step applies.
#[derive(Clone, Copy)]
pub struct BuffHooks {
    /// Conditional buff, condition met
    pub on_cond_true: Option<BuffHook>,
    /// Conditional buff, condition not met
    pub on_cond_false: Option<BuffHook>,
    /// Stacking buff at max stacks, before the stack multiplier
    pub on_stack: Option<BuffHook>,
    /// Any other buff
    pub on_apply: Option<BuffHook>,
    /// Module overlay
    pub on_module: Option<BuffHook>,
}

impl BuffHooks {
    pub const NONE: BuffHooks = BuffHooks {
        on_cond_true: None,
        on_cond_false: None,
        on_stack: None,
        on_apply: None,
        on_module: None,
    };
}
