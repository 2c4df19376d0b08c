//! Navigation hazard registry
//!
//! Weapons and environmental effects register temporary avoid zones here;
//! pathfinding consumers query them to steer clear. The registry hands out
//! opaque handles so whoever added a zone can remove exactly that zone.

use ahash::AHashMap;
use glam::Vec2;

/// Handle to a registered avoid zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvoidZoneId(u64);

/// A circular no-fly area
#[derive(Debug, Clone, Copy)]
pub struct AvoidZone {
    pub center: Vec2,
    pub radius: f32,
}

/// Registry of active avoid zones
pub struct AvoidZoneRegistry {
    zones: AHashMap<AvoidZoneId, AvoidZone>,
    next_id: u64,
}

impl AvoidZoneRegistry {
    pub fn new() -> Self {
        Self {
            zones: AHashMap::new(),
            next_id: 1,
        }
    }

    /// Register an avoid zone and return its handle
    pub fn add_avoid_area(&mut self, center: Vec2, radius: f32) -> AvoidZoneId {
        let id = AvoidZoneId(self.next_id);
        self.next_id += 1;
        self.zones.insert(id, AvoidZone { center, radius });
        id
    }

    /// Remove a zone; returns false when the handle was already gone
    pub fn remove_avoid_area(&mut self, id: AvoidZoneId) -> bool {
        self.zones.remove(&id).is_some()
    }

    /// True when `point` lies inside any active zone
    pub fn is_hazardous(&self, point: Vec2) -> bool {
        self.zones
            .values()
            .any(|zone| zone.center.distance(point) <= zone.radius)
    }

    pub fn zone(&self, id: AvoidZoneId) -> Option<&AvoidZone> {
        self.zones.get(&id)
    }

    pub fn zones(&self) -> impl Iterator<Item = (&AvoidZoneId, &AvoidZone)> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl Default for AvoidZoneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut registry = AvoidZoneRegistry::new();
        let id = registry.add_avoid_area(Vec2::ZERO, 1000.0);
        assert_eq!(registry.len(), 1);
        assert!(registry.zone(id).is_some());

        assert!(registry.remove_avoid_area(id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_double_remove_reports_false() {
        let mut registry = AvoidZoneRegistry::new();
        let id = registry.add_avoid_area(Vec2::ZERO, 500.0);
        assert!(registry.remove_avoid_area(id));
        assert!(!registry.remove_avoid_area(id));
    }

    #[test]
    fn test_is_hazardous() {
        let mut registry = AvoidZoneRegistry::new();
        registry.add_avoid_area(Vec2::new(1000.0, 0.0), 300.0);

        assert!(registry.is_hazardous(Vec2::new(1000.0, 0.0)));
        assert!(registry.is_hazardous(Vec2::new(1200.0, 0.0)));
        assert!(registry.is_hazardous(Vec2::new(1300.0, 0.0)));
        assert!(!registry.is_hazardous(Vec2::new(1301.0, 0.0)));
        assert!(!registry.is_hazardous(Vec2::ZERO));
    }

    #[test]
    fn test_handles_are_distinct() {
        let mut registry = AvoidZoneRegistry::new();
        let a = registry.add_avoid_area(Vec2::ZERO, 100.0);
        let b = registry.add_avoid_area(Vec2::ZERO, 100.0);
        assert_ne!(a, b);
        assert!(registry.remove_avoid_area(a));
        assert_eq!(registry.len(), 1);
        assert!(registry.zone(b).is_some());
    }
}
