//! World - owns all simulated objects and drives the tick loop
//!
//! One logical tick advances every object's defense recharge and every
//! warhead's fuse, runs detonations, and applies destruction. The loop is
//! single-threaded and cooperative: nothing suspends mid-tick, and cleanup
//! always runs synchronously.

pub mod events;

pub use events::SimulationEvent;

use ahash::AHashMap;
use glam::Vec2;

use crate::core::config::config;
use crate::core::error::{Result, SimError};
use crate::core::types::{ObjectId, Tick};
use crate::defense::{DamageEvent, DamageOutcome, MitigationTable};
use crate::nav::AvoidZoneRegistry;
use crate::objects::SpaceObject;
use crate::spatial::SparseHashGrid;
use crate::templates::TemplateRegistry;
use crate::weapons::constants::NUKE_BLAST_RANGE;
use crate::weapons::{Nuke, NukeState, NukeTick};

/// The simulation world containing all objects and active weapons
pub struct World {
    pub current_tick: Tick,
    objects: AHashMap<ObjectId, SpaceObject>,
    grid: SparseHashGrid,
    avoid: AvoidZoneRegistry,
    mitigation: MitigationTable,
    nukes: Vec<Nuke>,
}

impl World {
    pub fn new() -> Self {
        Self {
            current_tick: 0,
            objects: AHashMap::new(),
            grid: SparseHashGrid::new(config().grid_cell_size),
            avoid: AvoidZoneRegistry::new(),
            mitigation: MitigationTable::default(),
            nukes: Vec::new(),
        }
    }

    /// Swap in a different mitigation ruleset
    pub fn set_mitigation(&mut self, table: MitigationTable) {
        self.mitigation = table;
    }

    /// Navigation view of active hazards
    pub fn avoid_zones(&self) -> &AvoidZoneRegistry {
        &self.avoid
    }

    // === OBJECTS ===

    /// Stamp an object from a template and place it in the world
    pub fn spawn_object(
        &mut self,
        registry: &TemplateRegistry,
        template_id: &str,
        position: Vec2,
        rotation: f32,
    ) -> Result<ObjectId> {
        let object = SpaceObject::from_template(registry, template_id, position, rotation)?;
        let id = object.id;
        self.grid.insert(id, position);
        self.objects.insert(id, object);
        Ok(id)
    }

    pub fn despawn_object(&mut self, id: ObjectId) -> Result<()> {
        self.objects
            .remove(&id)
            .ok_or(SimError::ObjectNotFound(id))?;
        self.grid.remove(id);
        Ok(())
    }

    /// Move an object, keeping the spatial index in sync
    pub fn move_object(&mut self, id: ObjectId, position: Vec2) -> Result<()> {
        let object = self
            .objects
            .get_mut(&id)
            .ok_or(SimError::ObjectNotFound(id))?;
        object.position = position;
        self.grid.update_position(id, position);
        Ok(())
    }

    pub fn object(&self, id: ObjectId) -> Option<&SpaceObject> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SpaceObject> {
        self.objects.get_mut(&id)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn objects(&self) -> impl Iterator<Item = &SpaceObject> {
        self.objects.values()
    }

    // === WEAPONS ===

    /// Arm a warhead at `position`; detonates when the fuse runs out
    pub fn launch_nuke(
        &mut self,
        position: Vec2,
        instigator: Option<ObjectId>,
        fuse_seconds: Option<f32>,
    ) -> ObjectId {
        let fuse = fuse_seconds.unwrap_or_else(|| config().default_fuse_seconds);
        let nuke = Nuke::new(position, instigator, fuse);
        let id = nuke.id;
        tracing::debug!(
            "Nuke armed at ({:.0}, {:.0}), fuse {:.1}s",
            position.x,
            position.y,
            fuse
        );
        self.nukes.push(nuke);
        id
    }

    /// Remove a warhead before its time, e.g. shot down or cleaned up
    ///
    /// Runs the terminal cleanup hook, so an avoid zone it registered is
    /// cleared; one that never detonated has nothing to clear.
    pub fn despawn_nuke(&mut self, id: ObjectId) -> Result<()> {
        let index = self
            .nukes
            .iter()
            .position(|nuke| nuke.id == id)
            .ok_or(SimError::ObjectNotFound(id))?;
        let mut nuke = self.nukes.remove(index);
        nuke.life_ended(&mut self.avoid);
        Ok(())
    }

    pub fn nuke(&self, id: ObjectId) -> Option<&Nuke> {
        self.nukes.iter().find(|nuke| nuke.id == id)
    }

    pub fn nuke_count(&self) -> usize {
        self.nukes.len()
    }

    // === DAMAGE ===

    /// Route a damage event into a target, applying destruction if the
    /// hull gives out
    pub fn apply_damage(
        &mut self,
        target: ObjectId,
        event: &DamageEvent,
    ) -> Result<Vec<SimulationEvent>> {
        let object = self
            .objects
            .get_mut(&target)
            .ok_or(SimError::ObjectNotFound(target))?;
        let outcome = object.take_damage(event, &self.mitigation);
        Ok(self.outcome_events(target, &outcome, event.instigator))
    }

    // === TICK ===

    /// Advance the simulation by `delta` seconds
    pub fn tick(&mut self, delta: f32) -> Vec<SimulationEvent> {
        self.current_tick += 1;
        let mut events = Vec::new();

        // Shield recharge
        for object in self.objects.values_mut() {
            object.update(delta);
        }

        // Fuses, detonations, explosion expiry. The weapon list is taken
        // out of self so a detonation can borrow the rest of the world.
        let mut nukes = std::mem::take(&mut self.nukes);
        for nuke in nukes.iter_mut() {
            match nuke.update(delta) {
                NukeTick::Detonate => events.extend(self.detonate(nuke)),
                NukeTick::ExplosionOver => {
                    let position = nuke.position;
                    nuke.life_ended(&mut self.avoid);
                    events.push(SimulationEvent::AvoidZoneRemoved { position });
                }
                NukeTick::Idle => {}
            }
        }
        nukes.retain(|nuke| nuke.state() != NukeState::Exhausted);
        self.nukes = nukes;

        events
    }

    fn detonate(&mut self, nuke: &mut Nuke) -> Vec<SimulationEvent> {
        let hits = nuke.explode(&mut self.objects, &self.grid, &mut self.avoid, &self.mitigation);

        let mut events = vec![
            SimulationEvent::NukeDetonated {
                weapon: nuke.id,
                position: nuke.position,
                targets_hit: hits.len(),
            },
            SimulationEvent::AvoidZoneAdded {
                position: nuke.position,
                radius: NUKE_BLAST_RANGE,
            },
        ];
        for hit in &hits {
            events.extend(self.outcome_events(hit.target, &hit.outcome, nuke.instigator()));
        }
        events
    }

    /// Translate a damage outcome into events and apply destruction
    fn outcome_events(
        &mut self,
        target: ObjectId,
        outcome: &DamageOutcome,
        instigator: Option<ObjectId>,
    ) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        let (hull_remaining, type_name, effect) = match self.objects.get(&target) {
            Some(object) => (
                object.defense.hull().level,
                object.type_name().to_string(),
                object.class().destruction_effect(),
            ),
            None => return events,
        };

        if let Some(segment) = outcome.shield_hit {
            events.push(SimulationEvent::ShieldHit {
                object: target,
                segment,
                damage: outcome.shield_damage,
            });
        }
        if outcome.hull_damage > 0.0 {
            events.push(SimulationEvent::HullDamaged {
                object: target,
                damage: outcome.hull_damage,
                remaining: hull_remaining,
            });
        }
        if outcome.destroyed {
            tracing::debug!("{} destroyed", type_name);
            events.push(SimulationEvent::ObjectDestroyed {
                object: target,
                type_name,
                effect,
                instigator,
            });
            self.objects.remove(&target);
            self.grid.remove(target);
        }
        events
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::ShipTemplate;

    fn test_registry() -> TemplateRegistry {
        let cruiser: ShipTemplate = toml::from_str(
            r#"
[meta]
id = "cruiser"
name = "Cruiser"
class = "ship"

[defense]
hull_max = 100.0
shield_max = [50.0, 50.0]
"#,
        )
        .unwrap();
        let mut registry = TemplateRegistry::new();
        registry.register(cruiser).unwrap();
        registry
    }

    #[test]
    fn test_spawn_and_despawn() {
        let registry = test_registry();
        let mut world = World::new();
        let id = world
            .spawn_object(&registry, "cruiser", Vec2::ZERO, 0.0)
            .unwrap();
        assert_eq!(world.object_count(), 1);
        assert!(world.object(id).is_some());

        world.despawn_object(id).unwrap();
        assert_eq!(world.object_count(), 0);
        assert!(matches!(
            world.despawn_object(id),
            Err(SimError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn test_apply_damage_and_destruction() {
        let registry = test_registry();
        let mut world = World::new();
        let id = world
            .spawn_object(&registry, "cruiser", Vec2::ZERO, 0.0)
            .unwrap();

        // Strip the front shield, then batter the hull down
        world.apply_damage(id, &DamageEvent::kinetic(500.0)).unwrap();
        let events = world.apply_damage(id, &DamageEvent::kinetic(100.0)).unwrap();

        assert!(events
            .iter()
            .any(|e| matches!(e, SimulationEvent::ObjectDestroyed { .. })));
        assert_eq!(world.object_count(), 0);
        assert!(world
            .apply_damage(id, &DamageEvent::kinetic(1.0))
            .is_err());
    }

    #[test]
    fn test_tick_recharges_shields() {
        let registry = test_registry();
        let mut world = World::new();
        let id = world
            .spawn_object(&registry, "cruiser", Vec2::ZERO, 0.0)
            .unwrap();
        world.object_mut(id).unwrap().defense.set_shield(0, 10.0);

        world.tick(10.0);
        let level = world.object(id).unwrap().defense.shield(0).unwrap().level;
        assert!(level > 10.0);
    }

    #[test]
    fn test_move_object_updates_grid() {
        let registry = test_registry();
        let mut world = World::new();
        let target = world
            .spawn_object(&registry, "cruiser", Vec2::ZERO, 0.0)
            .unwrap();
        world.move_object(target, Vec2::new(50_000.0, 0.0)).unwrap();

        // Out of blast range now: a nuke at the origin hits nothing
        world.launch_nuke(Vec2::ZERO, None, Some(1.0));
        let events = world.tick(1.0);
        let hit_count = events
            .iter()
            .find_map(|e| match e {
                SimulationEvent::NukeDetonated { targets_hit, .. } => Some(*targets_hit),
                _ => None,
            })
            .unwrap();
        assert_eq!(hit_count, 0);
    }
}
