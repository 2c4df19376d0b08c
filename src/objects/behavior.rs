//! Kind-specific reactions for template-based objects
//!
//! What an object does when its hull gives out depends on what it is; the
//! world layer resolves the effect through the object's class tag.

use serde::{Deserialize, Serialize};

use crate::templates::ObjectClass;

/// Terminal behavior when hull damage destroys an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestructionEffect {
    /// Goes up in a fireball
    Explosion,
    /// Breaks and drifts inert
    Derelict,
}

impl ObjectClass {
    /// How this kind of object dies
    pub fn destruction_effect(&self) -> DestructionEffect {
        match self {
            ObjectClass::Ship => DestructionEffect::Explosion,
            ObjectClass::Station => DestructionEffect::Derelict,
        }
    }

    /// Fallback type name when a template does not carry a display name
    pub fn default_type_name(&self) -> &'static str {
        match self {
            ObjectClass::Ship => "Ship",
            ObjectClass::Station => "Station",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ships_explode_stations_drift() {
        assert_eq!(
            ObjectClass::Ship.destruction_effect(),
            DestructionEffect::Explosion
        );
        assert_eq!(
            ObjectClass::Station.destruction_effect(),
            DestructionEffect::Derelict
        );
    }
}
