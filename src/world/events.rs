//! Events generated during simulation ticks
//!
//! These events are returned by `World::tick` (and the damage entry
//! points) for display in logs, UI, and headless runner reports.

use glam::Vec2;

use crate::core::types::ObjectId;
use crate::objects::DestructionEffect;

/// Something observable happened in the simulation
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    /// A shield segment absorbed a hit
    ShieldHit {
        object: ObjectId,
        /// Segment that took the hit (0 = front facing)
        segment: usize,
        /// Shield level actually removed
        damage: f32,
    },
    /// Hull took damage
    HullDamaged {
        object: ObjectId,
        damage: f32,
        /// Hull level left after the hit
        remaining: f32,
    },
    /// Hull reached zero and the object left the simulation
    ObjectDestroyed {
        object: ObjectId,
        /// Display name for logs (objects are gone once this fires)
        type_name: String,
        effect: DestructionEffect,
        instigator: Option<ObjectId>,
    },
    /// A warhead went off
    NukeDetonated {
        weapon: ObjectId,
        position: Vec2,
        targets_hit: usize,
    },
    /// A navigation avoid zone became active
    AvoidZoneAdded { position: Vec2, radius: f32 },
    /// A navigation avoid zone was cleared
    AvoidZoneRemoved { position: Vec2 },
}
