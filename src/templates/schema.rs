//! Ship template schema
//!
//! Templates are authored as TOML files and define the defensive loadout
//! shared by every object stamped from them. Template authoring and richer
//! equipment sections belong to the content pipeline; the simulation only
//! reads the fields below.

use serde::{Deserialize, Serialize};

use crate::defense::constants::DEFAULT_SHIELD_RECHARGE_RATE;
use crate::defense::DefenseProfile;

/// What kind of object a template produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectClass {
    /// Mobile combatant; explodes when destroyed
    Ship,
    /// Fixed installation; goes derelict when destroyed
    Station,
}

/// Template identity block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateMeta {
    /// Registry key, unique per template
    pub id: String,
    /// Display name used in logs and events
    pub name: String,
    pub class: ObjectClass,
}

/// Defensive loadout block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenseSpec {
    pub hull_max: f32,
    /// Per-segment capacity, index 0 = front facing; empty means unshielded
    #[serde(default)]
    pub shield_max: Vec<f32>,
    #[serde(default = "default_recharge_rate")]
    pub shield_recharge_rate: f32,
}

fn default_recharge_rate() -> f32 {
    DEFAULT_SHIELD_RECHARGE_RATE
}

/// A complete ship or station template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipTemplate {
    pub meta: TemplateMeta,
    pub defense: DefenseSpec,
}

impl ShipTemplate {
    /// Populate a defense profile from this template
    ///
    /// Shield levels and hull start full; segment count tracks the
    /// configured capacity list.
    pub fn apply_to(&self, defense: &mut DefenseProfile) {
        defense.set_shield_count(self.defense.shield_max.len());
        for (index, &max) in self.defense.shield_max.iter().enumerate() {
            defense.set_shield_max(index, max);
            defense.set_shield_recharge_rate(index, self.defense.shield_recharge_rate);
        }
        defense.set_hull_max(self.defense.hull_max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template_toml() {
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
        assert_eq!(template.meta.id, "vanguard_cruiser");
        assert_eq!(template.meta.class, ObjectClass::Ship);
        assert_eq!(template.defense.shield_max, vec![100.0, 80.0]);
        assert_eq!(template.defense.shield_recharge_rate, 0.5);
    }

    #[test]
    fn test_recharge_rate_defaults() {
        let template: ShipTemplate = toml::from_str(
            r#"
[meta]
id = "scrap_hauler"
name = "Scrap Hauler"
class = "ship"

[defense]
hull_max = 60.0
"#,
        )
        .unwrap();
        assert_eq!(
            template.defense.shield_recharge_rate,
            DEFAULT_SHIELD_RECHARGE_RATE
        );
        assert!(template.defense.shield_max.is_empty());
    }

    #[test]
    fn test_apply_to_fills_profile() {
        let template: ShipTemplate = toml::from_str(
            r#"
[meta]
id = "bastion_outpost"
name = "Bastion Outpost"
class = "station"

[defense]
hull_max = 400.0
shield_max = [300.0, 300.0, 300.0, 300.0]
shield_recharge_rate = 1.0
"#,
        )
        .unwrap();

        let mut defense = DefenseProfile::new();
        template.apply_to(&mut defense);

        assert_eq!(defense.shield_count(), 4);
        assert!(defense.has_shield());
        for index in 0..4 {
            let segment = defense.shield(index).unwrap();
            assert_eq!(segment.level, 300.0);
            assert_eq!(segment.max, 300.0);
            assert_eq!(segment.recharge_rate, 1.0);
        }
        assert_eq!(defense.hull().level, 400.0);
        assert_eq!(defense.hull().max, 400.0);
    }
}
