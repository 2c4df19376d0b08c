//! Munitions
//!
//! Only warhead behavior lives here; flight and guidance are the
//! projectile subsystem's problem.

pub mod constants;
pub mod nuke;

pub use nuke::{blast_damage_at, Nuke, NukeHit, NukeState, NukeTick};
