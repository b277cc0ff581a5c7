//! Attack timing: cadence from attributes, then frame-accurate realization
//! against the recorded animation

mod animation;
mod cadence;

pub use animation::{resolve_animation, AnimRequest, AnimTiming};
pub use cadence::{resolve_cadence, Cadence};
