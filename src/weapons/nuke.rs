//! Nuclear warhead: area damage with linear distance falloff
//!
//! A warhead burns its fuse, detonates once, damages everything the spatial
//! index reports inside the blast radius, and keeps a navigation avoid zone
//! registered while the explosion is active. Flight physics and guidance
//! belong to the projectile subsystem; this module owns only the fuse, the
//! blast, and the avoid-zone pairing.

use ahash::AHashMap;
use glam::Vec2;

use super::constants::{
    NUKE_BLAST_RANGE, NUKE_DAMAGE_AT_CENTER, NUKE_DAMAGE_AT_EDGE, NUKE_EXPLOSION_DURATION,
};
use crate::core::types::ObjectId;
use crate::defense::{DamageEvent, DamageOutcome, MitigationTable};
use crate::nav::{AvoidZoneId, AvoidZoneRegistry};
use crate::objects::SpaceObject;
use crate::spatial::SparseHashGrid;

/// Warhead lifecycle
///
/// `Armed -> Exploding -> Exhausted` on the normal path; an external
/// despawn can jump straight from `Armed` to `Exhausted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NukeState {
    Armed,
    Exploding,
    Exhausted,
}

/// What a tick did to the warhead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NukeTick {
    Idle,
    /// The fuse ran out this tick; the caller must detonate it
    Detonate,
    /// The explosion finished this tick; the caller must retire it
    ExplosionOver,
}

/// One target struck by a detonation
#[derive(Debug, Clone)]
pub struct NukeHit {
    pub target: ObjectId,
    pub distance: f32,
    pub damage: f32,
    pub outcome: DamageOutcome,
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Blast damage at `distance` from the detonation point
///
/// Linear falloff from the center value to the edge value; None beyond the
/// blast range (hard cutoff, no tail).
pub fn blast_damage_at(distance: f32) -> Option<f32> {
    if !(0.0..=NUKE_BLAST_RANGE).contains(&distance) {
        return None;
    }
    Some(lerp(
        NUKE_DAMAGE_AT_CENTER,
        NUKE_DAMAGE_AT_EDGE,
        distance / NUKE_BLAST_RANGE,
    ))
}

/// An armed nuclear warhead
pub struct Nuke {
    pub id: ObjectId,
    pub position: Vec2,
    instigator: Option<ObjectId>,
    fuse_remaining: f32,
    linger_remaining: f32,
    state: NukeState,
    avoid_area_added: bool,
    avoid_handle: Option<AvoidZoneId>,
}

impl Nuke {
    pub fn new(position: Vec2, instigator: Option<ObjectId>, fuse_seconds: f32) -> Self {
        debug_assert!(fuse_seconds > 0.0, "fuse must burn for some time");
        Self {
            id: ObjectId::new(),
            position,
            instigator,
            fuse_remaining: fuse_seconds,
            linger_remaining: NUKE_EXPLOSION_DURATION,
            state: NukeState::Armed,
            avoid_area_added: false,
            avoid_handle: None,
        }
    }

    pub fn state(&self) -> NukeState {
        self.state
    }

    pub fn instigator(&self) -> Option<ObjectId> {
        self.instigator
    }

    pub fn avoid_area_added(&self) -> bool {
        self.avoid_area_added
    }

    /// Advance fuse and explosion timers by `delta` seconds
    pub fn update(&mut self, delta: f32) -> NukeTick {
        match self.state {
            NukeState::Armed => {
                let was_burning = self.fuse_remaining > 0.0;
                self.fuse_remaining = (self.fuse_remaining - delta).max(0.0);
                if was_burning && self.fuse_remaining == 0.0 {
                    NukeTick::Detonate
                } else {
                    NukeTick::Idle
                }
            }
            NukeState::Exploding => {
                let was_active = self.linger_remaining > 0.0;
                self.linger_remaining = (self.linger_remaining - delta).max(0.0);
                if was_active && self.linger_remaining == 0.0 {
                    NukeTick::ExplosionOver
                } else {
                    NukeTick::Idle
                }
            }
            NukeState::Exhausted => NukeTick::Idle,
        }
    }

    /// One-shot area damage resolution
    ///
    /// Queries the grid for everything inside the blast range, applies
    /// falloff damage per target, and registers the avoid zone. The state
    /// machine guards re-entry internally: repeated calls are no-ops, no
    /// caller discipline required.
    pub fn explode(
        &mut self,
        objects: &mut AHashMap<ObjectId, SpaceObject>,
        grid: &SparseHashGrid,
        avoid: &mut AvoidZoneRegistry,
        table: &MitigationTable,
    ) -> Vec<NukeHit> {
        if self.state != NukeState::Armed {
            return Vec::new();
        }
        self.state = NukeState::Exploding;

        let targets = grid.query_radius(self.position, NUKE_BLAST_RANGE);
        tracing::debug!(
            "Nuke detonating at ({:.0}, {:.0}), {} targets in range",
            self.position.x,
            self.position.y,
            targets.len()
        );

        let mut hits = Vec::new();
        for (target_id, distance) in targets {
            let Some(target) = objects.get_mut(&target_id) else {
                continue;
            };
            if let Some(hit) = self.hit_object(target, distance, table) {
                hits.push(hit);
            }
        }

        debug_assert!(!self.avoid_area_added, "avoid zone double-added");
        self.avoid_handle = Some(avoid.add_avoid_area(self.position, NUKE_BLAST_RANGE));
        self.avoid_area_added = true;

        hits
    }

    /// Per-target dispatch, the seam for special-cased interactions
    ///
    /// The blast spares nothing, including the launcher. Damage travels
    /// outward from the detonation point, so a target's blast-facing shield
    /// segment absorbs the hit; a target sitting exactly on the detonation
    /// point has no meaningful direction and takes a front hit.
    fn hit_object(
        &self,
        target: &mut SpaceObject,
        distance: f32,
        table: &MitigationTable,
    ) -> Option<NukeHit> {
        let damage = blast_damage_at(distance)?;

        let mut event = DamageEvent::kinetic(damage);
        if let Some(travel) = (target.position - self.position).try_normalize() {
            event = event.with_direction(travel);
        }
        if let Some(instigator) = self.instigator {
            event = event.with_instigator(instigator);
        }

        let outcome = target.take_damage(&event, table);
        Some(NukeHit {
            target: target.id,
            distance,
            damage,
            outcome,
        })
    }

    /// Terminal cleanup hook
    ///
    /// Removes the avoid zone iff it was added, on both the exploded and
    /// the destroyed-before-exploding paths. Safe to call more than once;
    /// the flag guarantees a single removal per detonation.
    pub fn life_ended(&mut self, avoid: &mut AvoidZoneRegistry) {
        if self.avoid_area_added {
            if let Some(handle) = self.avoid_handle.take() {
                avoid.remove_avoid_area(handle);
            }
            self.avoid_area_added = false;
        }
        self.state = NukeState::Exhausted;
    }
}
