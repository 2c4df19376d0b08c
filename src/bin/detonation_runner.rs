//! Headless Detonation Runner
//!
//! Scatters a convoy around a warhead, runs the detonation to completion,
//! and outputs JSON scores for balance tuning.

use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use nova_bastion::core::types::heading_vector;
use nova_bastion::templates::TemplateRegistry;
use nova_bastion::world::{SimulationEvent, World};

/// Headless Detonation Runner - seeded blast scenarios for balance tuning
#[derive(Parser, Debug)]
#[command(name = "detonation_runner")]
#[command(about = "Run a seeded nuke detonation and output scores as JSON")]
struct Args {
    /// Number of ships scattered around the detonation point
    #[arg(long, default_value_t = 6)]
    ships: usize,

    /// Maximum placement distance from the detonation point (world units)
    #[arg(long, default_value_t = 1500.0)]
    spread: f32,

    /// Warhead fuse in seconds
    #[arg(long, default_value_t = 3.0)]
    fuse: f32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Enable verbose event logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct DetonationResult {
    seed: u64,
    ships: usize,
    targets_hit: usize,
    destroyed: usize,
    survivors: usize,
    shield_damage_total: f32,
    hull_damage_total: f32,
    avoid_zone_cleared: bool,
    ticks: u64,
}

fn main() {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("nova_bastion=debug")
            .init();
    }

    // Determine seed
    let seed = args.seed.unwrap_or_else(|| rand::random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut registry = TemplateRegistry::new();
    let template = toml::from_str(
        r#"
[meta]
id = "convoy_freighter"
name = "Convoy Freighter"
class = "ship"

[defense]
hull_max = 120.0
shield_max = [60.0, 60.0]
shield_recharge_rate = 0.3
"#,
    )
    .expect("built-in template is valid");
    registry
        .register(template)
        .expect("built-in template passes validation");

    let mut world = World::new();
    for _ in 0..args.ships {
        let bearing: f32 = rng.gen_range(0.0..360.0);
        let distance: f32 = rng.gen_range(0.0..args.spread);
        let position = heading_vector(bearing) * distance;
        let rotation = rng.gen_range(0.0..360.0);
        world
            .spawn_object(&registry, "convoy_freighter", position, rotation)
            .expect("registered template spawns");
    }

    world.launch_nuke(Vec2::ZERO, None, Some(args.fuse));

    // Tick until the warhead is fully retired
    let mut targets_hit = 0;
    let mut destroyed = 0;
    let mut shield_damage_total = 0.0;
    let mut hull_damage_total = 0.0;
    let mut ticks = 0;
    while world.nuke_count() > 0 && ticks < 1000 {
        let events = world.tick(1.0);
        ticks += 1;
        for event in &events {
            if args.verbose {
                eprintln!("tick {}: {:?}", ticks, event);
            }
            match event {
                SimulationEvent::NukeDetonated { targets_hit: n, .. } => targets_hit = *n,
                SimulationEvent::ObjectDestroyed { .. } => destroyed += 1,
                SimulationEvent::ShieldHit { damage, .. } => shield_damage_total += damage,
                SimulationEvent::HullDamaged { damage, .. } => hull_damage_total += damage,
                _ => {}
            }
        }
    }

    let result = DetonationResult {
        seed,
        ships: args.ships,
        targets_hit,
        destroyed,
        survivors: world.object_count(),
        shield_damage_total,
        hull_damage_total,
        avoid_zone_cleared: world.avoid_zones().is_empty(),
        ticks,
    };

    match args.format.as_str() {
        "text" => {
            println!("seed: {}", result.seed);
            println!("targets hit: {} / {}", result.targets_hit, result.ships);
            println!("destroyed: {}", result.destroyed);
            println!("survivors: {}", result.survivors);
            println!("shield damage: {:.0}", result.shield_damage_total);
            println!("hull damage: {:.0}", result.hull_damage_total);
            println!("avoid zone cleared: {}", result.avoid_zone_cleared);
        }
        _ => {
            println!(
                "{}",
                serde_json::to_string_pretty(&result).expect("result serializes")
            );
        }
    }
}
