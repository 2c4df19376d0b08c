//! Template-based space objects
//!
//! Ships and stations share one runtime representation; the template they
//! were stamped from decides their defensive loadout and class. There is no
//! way to construct one without a template, which keeps every object's
//! defense profile populated from the start.

use glam::Vec2;

use crate::core::error::{Result, SimError};
use crate::core::types::ObjectId;
use crate::defense::{DamageEvent, DamageOutcome, DefenseProfile, MitigationTable};
use crate::templates::{ObjectClass, ShipTemplate, TemplateRegistry};

/// One simulated ship or station
#[derive(Debug, Clone)]
pub struct SpaceObject {
    pub id: ObjectId,
    callsign: String,
    type_name: String,
    template_name: String,
    class: ObjectClass,
    pub position: Vec2,
    /// Heading in degrees; shield segment 0 faces this way
    pub rotation: f32,
    pub defense: DefenseProfile,
}

impl SpaceObject {
    /// Stamp a new object from a registered template
    ///
    /// The only construction path. Fails when the template id is unknown
    /// rather than producing an object with an empty defense profile.
    pub fn from_template(
        registry: &TemplateRegistry,
        template_id: &str,
        position: Vec2,
        rotation: f32,
    ) -> Result<Self> {
        let template = registry
            .get(template_id)
            .ok_or_else(|| SimError::TemplateNotFound(template_id.to_string()))?;

        let mut object = Self {
            id: ObjectId::new(),
            callsign: String::new(),
            type_name: String::new(),
            template_name: String::new(),
            class: template.meta.class,
            position,
            rotation,
            defense: DefenseProfile::new(),
        };
        object.apply_template(template);
        Ok(object)
    }

    fn apply_template(&mut self, template: &ShipTemplate) {
        self.template_name = template.meta.id.clone();
        self.type_name = if template.meta.name.is_empty() {
            template.meta.class.default_type_name().to_string()
        } else {
            template.meta.name.clone()
        };
        self.class = template.meta.class;
        template.apply_to(&mut self.defense);
    }

    /// Re-apply a (possibly different) template to a live object
    pub fn set_template(&mut self, registry: &TemplateRegistry, template_id: &str) -> Result<()> {
        let template = registry
            .get(template_id)
            .ok_or_else(|| SimError::TemplateNotFound(template_id.to_string()))?;
        self.apply_template(template);
        Ok(())
    }

    #[deprecated(note = "use set_template")]
    pub fn set_ship_template(
        &mut self,
        registry: &TemplateRegistry,
        template_id: &str,
    ) -> Result<()> {
        tracing::warn!("Deprecated \"set_ship_template\" function called.");
        self.set_template(registry, template_id)
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    pub fn set_callsign(&mut self, callsign: impl Into<String>) {
        self.callsign = callsign.into();
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn set_type_name(&mut self, type_name: impl Into<String>) {
        self.type_name = type_name.into();
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn class(&self) -> ObjectClass {
        self.class
    }

    pub fn is_alive(&self) -> bool {
        self.defense.hull().level > 0.0
    }

    /// Route a damage event into this object's defense
    ///
    /// The caller owns the reaction to `DamageOutcome::destroyed`.
    pub fn take_damage(&mut self, event: &DamageEvent, table: &MitigationTable) -> DamageOutcome {
        self.defense.take_damage(event, self.rotation, table)
    }

    /// Advance per-object simulation state by `delta` seconds
    pub fn update(&mut self, delta: f32) {
        self.defense.update(delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::ShipTemplate;

    fn registry_with_cruiser() -> TemplateRegistry {
        let template: ShipTemplate = toml::from_str(
            r#"
[meta]
id = "vanguard_cruiser"
name = "Vanguard Cruiser"
class = "ship"

[defense]
hull_max = 200.0
shield_max = [100.0, 80.0]
shield_recharge_rate = 0.5
"#,
        )
        .unwrap();
        let mut registry = TemplateRegistry::new();
        registry.register(template).unwrap();
        registry
    }

    #[test]
    fn test_from_template_populates_defense() {
        let registry = registry_with_cruiser();
        let object =
            SpaceObject::from_template(&registry, "vanguard_cruiser", Vec2::ZERO, 0.0).unwrap();

        assert_eq!(object.type_name(), "Vanguard Cruiser");
        assert_eq!(object.template_name(), "vanguard_cruiser");
        assert_eq!(object.class(), ObjectClass::Ship);
        assert_eq!(object.defense.shield_count(), 2);
        assert_eq!(object.defense.hull().level, 200.0);
        assert!(object.is_alive());
    }

    #[test]
    fn test_unknown_template_fails() {
        let registry = TemplateRegistry::new();
        let result = SpaceObject::from_template(&registry, "ghost", Vec2::ZERO, 0.0);
        assert!(matches!(result, Err(SimError::TemplateNotFound(_))));
    }

    #[test]
    fn test_set_template_reapplies() {
        let mut registry = registry_with_cruiser();
        let tug: ShipTemplate = toml::from_str(
            r#"
[meta]
id = "tug"
name = "Tug"
class = "ship"

[defense]
hull_max = 40.0
"#,
        )
        .unwrap();
        registry.register(tug).unwrap();

        let mut object =
            SpaceObject::from_template(&registry, "vanguard_cruiser", Vec2::ZERO, 0.0).unwrap();
        object.set_template(&registry, "tug").unwrap();
        assert_eq!(object.template_name(), "tug");
        assert_eq!(object.defense.shield_count(), 0);
        assert_eq!(object.defense.hull().max, 40.0);
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_alias_forwards() {
        let registry = registry_with_cruiser();
        let mut object =
            SpaceObject::from_template(&registry, "vanguard_cruiser", Vec2::ZERO, 0.0).unwrap();
        object
            .set_ship_template(&registry, "vanguard_cruiser")
            .unwrap();
        assert_eq!(object.template_name(), "vanguard_cruiser");
    }

    #[test]
    fn test_take_damage_uses_own_rotation() {
        let registry = registry_with_cruiser();
        let mut object =
            SpaceObject::from_template(&registry, "vanguard_cruiser", Vec2::ZERO, 180.0).unwrap();

        // Object faces -X; damage traveling -X comes from astern
        let event = DamageEvent::kinetic(10.0).with_direction(Vec2::new(-1.0, 0.0));
        let outcome = object.take_damage(&event, &MitigationTable::neutral());
        assert_eq!(outcome.shield_hit, Some(1));
    }
}
