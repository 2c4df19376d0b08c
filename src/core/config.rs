//! Simulation configuration with documented constants
//!
//! All magic numbers that tune the spatial index and weapon timing are
//! collected here with explanations of their purpose.

/// Configuration for the simulation systems
///
/// These values have been tuned against the default weapon ranges.
/// Changing them will affect query performance and scenario pacing.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    // === SPATIAL SYSTEM ===
    /// Size of each cell in the spatial hash grid (world units)
    ///
    /// Should be a fraction of the largest blast radius so a radius query
    /// touches a bounded cell window.
    /// Smaller = more cells, higher memory, fewer objects per cell
    /// Larger = fewer cells, lower memory, more objects to filter per query
    pub grid_cell_size: f32,

    /// Upper bound accepted for radius queries (world units)
    ///
    /// Queries beyond this are a configuration mistake, not a gameplay
    /// request; `validate()` checks weapon ranges fit under it.
    pub max_query_radius: f32,

    // === WEAPON SYSTEM ===
    /// Default fuse time for area weapons launched without an explicit
    /// fuse (seconds)
    ///
    /// At 9.0, a warhead crosses most of its own blast radius before
    /// detonating, which keeps the launcher outside the avoid zone.
    pub default_fuse_seconds: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // Spatial (cell ~ blast_range / 4)
            grid_cell_size: 250.0,
            max_query_radius: 10_000.0,

            // Weapons
            default_fuse_seconds: 9.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_cell_size <= 0.0 {
            return Err(format!(
                "grid_cell_size ({}) must be positive",
                self.grid_cell_size
            ));
        }

        // A query should span at most a modest cell window
        if self.grid_cell_size > self.max_query_radius {
            return Err(format!(
                "grid_cell_size ({}) should be <= max_query_radius ({})",
                self.grid_cell_size, self.max_query_radius
            ));
        }

        if self.default_fuse_seconds <= 0.0 {
            return Err("default_fuse_seconds must be positive".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<SimulationConfig> = OnceLock::new();

/// Get the global simulation config (initializes with defaults if not set)
pub fn config() -> &'static SimulationConfig {
    CONFIG.get_or_init(SimulationConfig::default)
}

/// Set the global simulation config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: SimulationConfig) -> Result<(), SimulationConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_cell_size_rejected() {
        let mut cfg = SimulationConfig::default();
        cfg.grid_cell_size = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_cell_size_exceeding_query_radius_rejected() {
        let mut cfg = SimulationConfig::default();
        cfg.grid_cell_size = 20_000.0;
        assert!(cfg.validate().is_err());
    }
}
