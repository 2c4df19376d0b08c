//! Damage events exchanged between attackers and defense profiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::ObjectId;

/// Category of incoming damage
///
/// The category selects a shield mitigation factor; it does not change how
/// hull damage is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    /// Impacts, blasts, projectiles
    Kinetic,
    /// Electromagnetic pulse - overloads shield emitters
    Emp,
    /// Beams and plasma
    Energy,
}

/// A single damage occurrence, produced by an attacker and consumed by a
/// target's defense profile
#[derive(Debug, Clone)]
pub struct DamageEvent {
    pub amount: f32,
    pub damage_type: DamageType,
    /// Direction the damage traveled, source toward target. The hit lands
    /// on the shield facing that points back at the source. None means the
    /// origin is unknown and the front segment absorbs the hit.
    pub origin_direction: Option<Vec2>,
    /// Object responsible for the damage, if any. Never owned.
    pub instigator: Option<ObjectId>,
}

impl DamageEvent {
    pub fn new(amount: f32, damage_type: DamageType) -> Self {
        Self {
            amount,
            damage_type,
            origin_direction: None,
            instigator: None,
        }
    }

    /// Kinetic event, the common case for projectiles and blasts
    pub fn kinetic(amount: f32) -> Self {
        Self::new(amount, DamageType::Kinetic)
    }

    pub fn with_direction(mut self, direction: Vec2) -> Self {
        self.origin_direction = Some(direction);
        self
    }

    pub fn with_instigator(mut self, instigator: ObjectId) -> Self {
        self.instigator = Some(instigator);
        self
    }
}
