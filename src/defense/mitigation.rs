//! Damage-type mitigation table for shields
//!
//! Maps a damage type (optionally narrowed to one shield segment) to the
//! multiplier applied to incoming damage before a segment absorbs it.
//! Owned by rules/config; defense profiles only query it.

use ahash::AHashMap;
use serde::Deserialize;
use std::path::Path;

use super::damage::DamageType;

/// One configured mitigation entry
///
/// Without `segment` the rule applies to every segment of that damage type.
#[derive(Debug, Clone, Deserialize)]
pub struct MitigationRule {
    pub damage_type: DamageType,
    pub segment: Option<usize>,
    pub factor: f32,
}

/// TOML file form: a list of `[[rule]]` tables
#[derive(Debug, Clone, Deserialize)]
pub struct MitigationConfig {
    #[serde(default)]
    pub rule: Vec<MitigationRule>,
}

/// Shield damage factors by damage type, with per-segment overrides
#[derive(Debug, Clone)]
pub struct MitigationTable {
    by_type: AHashMap<DamageType, f32>,
    by_segment: AHashMap<(DamageType, usize), f32>,
}

impl MitigationTable {
    /// Empty table: every lookup resolves to the neutral factor 1.0
    pub fn neutral() -> Self {
        Self {
            by_type: AHashMap::new(),
            by_segment: AHashMap::new(),
        }
    }

    /// Build a table from configured rules (later rules win on conflict)
    pub fn from_rules(rules: &[MitigationRule]) -> Self {
        let mut table = Self::neutral();
        for rule in rules {
            match rule.segment {
                Some(index) => {
                    table.by_segment.insert((rule.damage_type, index), rule.factor);
                }
                None => {
                    table.by_type.insert(rule.damage_type, rule.factor);
                }
            }
        }
        table
    }

    /// Load mitigation rules from a TOML file
    pub fn load_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
        let config: MitigationConfig =
            toml::from_str(&content).map_err(|e| format!("{}: {}", path.display(), e))?;
        Ok(Self::from_rules(&config.rule))
    }

    /// Multiplier for incoming damage of `damage_type` against `segment`
    ///
    /// Lookup order: segment-specific rule, then type-wide rule, then 1.0.
    pub fn factor(&self, damage_type: DamageType, segment: usize) -> f32 {
        if let Some(&factor) = self.by_segment.get(&(damage_type, segment)) {
            return factor;
        }
        self.by_type.get(&damage_type).copied().unwrap_or(1.0)
    }
}

impl Default for MitigationTable {
    /// Stock ruleset: EMP hits shields twice as hard, everything else neutral
    fn default() -> Self {
        Self::from_rules(&[MitigationRule {
            damage_type: DamageType::Emp,
            segment: None,
            factor: 2.0,
        }])
    }
}
