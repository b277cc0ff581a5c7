//! Per-identifier buff handlers, grouped by the dispatch step they hook

pub mod conditional;
pub mod modules;
pub mod skills;
pub mod stacking;
pub mod talents;
