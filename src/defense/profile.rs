//! Layered defense state shared by ships and stations
//!
//! A profile tracks up to [`MAX_SHIELD_COUNT`] independent directional
//! shield segments plus a non-regenerating hull pool. Damage events deplete
//! one shield segment or the hull; simulation ticks drive shield recharge.
//!
//! Segment 0 always faces the object's heading; the remaining active
//! segments divide the full circle into equal arcs clockwise of it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::constants::{MAX_SHIELD_COUNT, SHIELD_RECHARGE_COOLDOWN};
use super::damage::DamageEvent;
use super::mitigation::MitigationTable;
use crate::core::types::{normalize_angle, vector_heading};

/// One directional shield emitter
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ShieldSegment {
    pub level: f32,
    pub max: f32,
    /// Units regenerated per second once the post-hit cooldown elapses
    pub recharge_rate: f32,
    /// Seconds left before recharge resumes after a hit
    pub hit_timer: f32,
}

/// Non-regenerating structural pool; reaching 0 destroys the object
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Hull {
    pub level: f32,
    pub max: f32,
}

/// What one damage event did to a profile
///
/// The caller reacts to `destroyed` exactly once: it is only reported on
/// the transition from a living hull to an empty one.
#[derive(Debug, Clone, Default)]
pub struct DamageOutcome {
    /// Segment that absorbed the hit, if any
    pub shield_hit: Option<usize>,
    /// Shield level actually removed (capped at what the segment had)
    pub shield_damage: f32,
    /// Hull level actually removed
    pub hull_damage: f32,
    pub destroyed: bool,
}

/// Shields plus hull for one template-based object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseProfile {
    shields: [ShieldSegment; MAX_SHIELD_COUNT],
    shield_count: usize,
    hull: Hull,
    shields_active: bool,
}

impl DefenseProfile {
    /// Empty profile; template application populates it
    pub fn new() -> Self {
        Self {
            shields: [ShieldSegment::default(); MAX_SHIELD_COUNT],
            shield_count: 0,
            hull: Hull::default(),
            shields_active: true,
        }
    }

    /// True when any active segment has capacity
    pub fn has_shield(&self) -> bool {
        self.shields[..self.shield_count].iter().any(|s| s.max > 0.0)
    }

    pub fn shield_count(&self) -> usize {
        self.shield_count
    }

    /// Set the number of active segments, capped at the compile-time bound
    pub fn set_shield_count(&mut self, count: usize) {
        self.shield_count = count.min(MAX_SHIELD_COUNT);
    }

    pub fn shield(&self, index: usize) -> Option<&ShieldSegment> {
        self.shields[..self.shield_count].get(index)
    }

    pub fn hull(&self) -> &Hull {
        &self.hull
    }

    pub fn shields_active(&self) -> bool {
        self.shields_active
    }

    /// Raising or dropping shields; damage routes straight to hull while
    /// they are down, recharge continues either way
    pub fn set_shields_active(&mut self, active: bool) {
        self.shields_active = active;
    }

    /// Multiplier applied to incoming damage before a segment absorbs it
    pub fn shield_damage_factor(
        &self,
        event: &DamageEvent,
        index: usize,
        table: &MitigationTable,
    ) -> f32 {
        table.factor(event.damage_type, index)
    }

    /// Units per second the segment regenerates once its cooldown elapses
    pub fn shield_recharge_rate(&self, index: usize) -> f32 {
        self.shield(index).map(|s| s.recharge_rate).unwrap_or(0.0)
    }

    /// Segment facing back along the damage travel direction
    ///
    /// `travel` points source toward target, so the absorbing facing is the
    /// one looking at `-travel`. Buckets are arcs of 360/count degrees
    /// centered on each facing.
    fn segment_for_direction(&self, travel: Vec2, rotation: f32) -> usize {
        if self.shield_count <= 1 {
            return 0;
        }
        let incoming = vector_heading(-travel);
        let relative = normalize_angle(incoming - rotation);
        let arc = 360.0 / self.shield_count as f32;
        (((relative + arc / 2.0) / arc) as usize) % self.shield_count
    }

    /// Route one damage event into shields or hull
    ///
    /// A charged segment absorbs the whole event: overkill against a shield
    /// is discarded, never carried into the hull or a neighboring segment.
    /// Only a hit that finds the selected segment empty (or no usable
    /// shielding at all) reaches the hull, at full strength.
    pub fn take_damage(
        &mut self,
        event: &DamageEvent,
        rotation: f32,
        table: &MitigationTable,
    ) -> DamageOutcome {
        let mut outcome = DamageOutcome::default();
        if event.amount < 0.0 {
            return outcome;
        }

        if self.shields_active && self.has_shield() {
            let index = event
                .origin_direction
                .map(|travel| self.segment_for_direction(travel, rotation))
                .unwrap_or(0);
            if self.shields[index].level > 0.0 {
                let factor = self.shield_damage_factor(event, index, table);
                let effective = event.amount * factor;
                let segment = &mut self.shields[index];
                outcome.shield_hit = Some(index);
                outcome.shield_damage = effective.min(segment.level);
                segment.level = (segment.level - effective).max(0.0);
                segment.hit_timer = SHIELD_RECHARGE_COOLDOWN;
                return outcome;
            }
        }

        outcome.hull_damage = event.amount.min(self.hull.level);
        outcome.destroyed = self.take_hull_damage(event.amount);
        outcome
    }

    /// Subtract from the hull, clamped at 0
    ///
    /// Returns true exactly once, when this call empties a living hull.
    pub fn take_hull_damage(&mut self, amount: f32) -> bool {
        if amount < 0.0 {
            return false;
        }
        let was_alive = self.hull.level > 0.0;
        self.hull.level = (self.hull.level - amount).max(0.0);
        was_alive && self.hull.level <= 0.0
    }

    /// Advance recharge dynamics by `delta` seconds
    ///
    /// Recharge on a segment is suppressed while its post-hit cooldown
    /// runs, and never pushes the level past max. A level already above max
    /// (possible after the max was lowered) is left alone.
    pub fn update(&mut self, delta: f32) {
        for segment in self.shields[..self.shield_count].iter_mut() {
            segment.hit_timer = (segment.hit_timer - delta).max(0.0);
            if segment.hit_timer == 0.0 && segment.level < segment.max {
                segment.level = (segment.level + segment.recharge_rate * delta).min(segment.max);
            }
        }
    }

    // Setter policy is deliberately permissive: negative input is silently
    // ignored, and raising a max fills the pool up to it while lowering a
    // max leaves the current level untouched even if it now exceeds max.

    pub fn set_hull(&mut self, amount: f32) {
        if amount < 0.0 {
            return;
        }
        self.hull.level = amount;
    }

    pub fn set_hull_max(&mut self, amount: f32) {
        if amount < 0.0 {
            return;
        }
        self.hull.max = amount;
        self.hull.level = self.hull.level.max(self.hull.max);
    }

    pub fn set_shield(&mut self, index: usize, amount: f32) {
        if amount < 0.0 || index >= MAX_SHIELD_COUNT {
            return;
        }
        self.shields[index].level = amount;
    }

    pub fn set_shield_max(&mut self, index: usize, amount: f32) {
        if amount < 0.0 || index >= MAX_SHIELD_COUNT {
            return;
        }
        let segment = &mut self.shields[index];
        segment.max = amount;
        segment.level = segment.level.max(segment.max);
    }

    pub fn set_shield_recharge_rate(&mut self, index: usize, rate: f32) {
        if rate < 0.0 || index >= MAX_SHIELD_COUNT {
            return;
        }
        self.shields[index].recharge_rate = rate;
    }
}

impl Default for DefenseProfile {
    fn default() -> Self {
        Self::new()
    }
}
