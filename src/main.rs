//! Nova Bastion - Entry Point
//!
//! Runs a small demonstration scenario: a convoy parked at varying ranges
//! from a nuclear warhead, ticked through detonation and cleanup, with
//! every simulation event printed as it happens.

use glam::Vec2;

use nova_bastion::core::error::Result;
use nova_bastion::templates::TemplateRegistry;
use nova_bastion::world::{SimulationEvent, World};

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("nova_bastion=debug")
        .init();

    tracing::info!("Nova Bastion starting...");

    let mut registry = TemplateRegistry::new();
    let template_dir = std::path::Path::new("data/ship_templates");
    match registry.load_directory(template_dir) {
        Ok(count) => tracing::info!("Loaded {} ship templates", count),
        Err(e) => {
            tracing::warn!("Failed to load templates from {:?}: {}", template_dir, e);
            load_fallback_templates(&mut registry);
        }
    }

    let mut world = World::new();

    // A convoy at increasing range from the detonation point
    let placements = [
        ("vanguard_cruiser", Vec2::new(200.0, 0.0)),
        ("vanguard_cruiser", Vec2::new(600.0, 0.0)),
        ("scrap_hauler", Vec2::new(950.0, 0.0)),
        ("bastion_outpost", Vec2::new(0.0, 400.0)),
        ("vanguard_cruiser", Vec2::new(3000.0, 0.0)),
    ];
    for (template_id, position) in placements {
        let id = world.spawn_object(&registry, template_id, position, 0.0)?;
        tracing::info!(
            "Spawned {} at ({:.0}, {:.0})",
            world.object(id).map(|o| o.type_name().to_string()).unwrap_or_default(),
            position.x,
            position.y
        );
    }

    println!("\n=== NOVA BASTION ===");
    println!("Detonation demo: {} objects in the field", world.object_count());
    println!();

    world.launch_nuke(Vec2::ZERO, None, Some(3.0));

    // Tick until the explosion has come and gone
    for second in 1..=10 {
        let events = world.tick(1.0);
        for event in &events {
            print_event(second, event);
        }
    }

    println!();
    println!(
        "Survivors: {} | active avoid zones: {}",
        world.object_count(),
        world.avoid_zones().len()
    );

    Ok(())
}

fn print_event(second: u64, event: &SimulationEvent) {
    match event {
        SimulationEvent::NukeDetonated {
            position,
            targets_hit,
            ..
        } => println!(
            "[t+{:2}s] Detonation at ({:.0}, {:.0}), {} targets in range",
            second, position.x, position.y, targets_hit
        ),
        SimulationEvent::ShieldHit {
            segment, damage, ..
        } => println!(
            "[t+{:2}s]   shield segment {} absorbed {:.0}",
            second, segment, damage
        ),
        SimulationEvent::HullDamaged {
            damage, remaining, ..
        } => println!(
            "[t+{:2}s]   hull took {:.0}, {:.0} left",
            second, damage, remaining
        ),
        SimulationEvent::ObjectDestroyed {
            type_name, effect, ..
        } => println!("[t+{:2}s]   {} destroyed ({:?})", second, type_name, effect),
        SimulationEvent::AvoidZoneAdded { radius, .. } => {
            println!("[t+{:2}s] Avoid zone up, radius {:.0}", second, radius)
        }
        SimulationEvent::AvoidZoneRemoved { .. } => {
            println!("[t+{:2}s] Avoid zone cleared", second)
        }
    }
}

/// Built-in templates so the demo runs without the data directory
fn load_fallback_templates(registry: &mut TemplateRegistry) {
    let sources = [
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
        r#"
[meta]
id = "scrap_hauler"
name = "Scrap Hauler"
class = "ship"

[defense]
hull_max = 60.0
"#,
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
    ];
    for source in sources {
        let template = toml::from_str(source).expect("built-in template is valid");
        registry
            .register(template)
            .expect("built-in template passes validation");
    }
}
