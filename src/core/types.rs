//! Core type definitions used throughout the codebase

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for simulated space objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Normalize an angle in degrees to the [0, 360) range
pub fn normalize_angle(degrees: f32) -> f32 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Heading of a world-space vector in degrees, [0, 360)
///
/// Heading 0 points along +X, increasing counter-clockwise.
pub fn vector_heading(v: Vec2) -> f32 {
    normalize_angle(v.y.atan2(v.x).to_degrees())
}

/// Unit vector for a heading in degrees
pub fn heading_vector(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_unique() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_object_id_hash() {
        use std::collections::HashMap;
        let id = ObjectId::new();
        let mut map: HashMap<ObjectId, &str> = HashMap::new();
        map.insert(id, "cruiser");
        assert_eq!(map.get(&id), Some(&"cruiser"));
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(450.0), 90.0);
    }

    #[test]
    fn test_vector_heading() {
        assert!((vector_heading(Vec2::new(1.0, 0.0)) - 0.0).abs() < 0.001);
        assert!((vector_heading(Vec2::new(0.0, 1.0)) - 90.0).abs() < 0.001);
        assert!((vector_heading(Vec2::new(-1.0, 0.0)) - 180.0).abs() < 0.001);
        assert!((vector_heading(Vec2::new(0.0, -1.0)) - 270.0).abs() < 0.001);
    }

    #[test]
    fn test_heading_vector_round_trip() {
        for heading in [0.0_f32, 45.0, 135.0, 200.0, 315.0] {
            let v = heading_vector(heading);
            assert!((vector_heading(v) - heading).abs() < 0.001);
        }
    }
}
