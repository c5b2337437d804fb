//! Example: Generate a geodesic planet
//!
//! Demonstrates the basic usage of the generation pipeline. Set
//! `RUST_LOG=debug` to see per-stage timings.

use geodesic_planet::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Geodesic Planet Generation Example");
    println!("==================================\n");

    let seed = std::env::args().nth(1).unwrap_or_else(|| "abc".to_string());

    let config = PlanetConfigBuilder::new()
        .seed(seed)
        .degree(12)
        .unwrap()
        .elevation(0.5)
        .unwrap()
        .terrain(TerrainConfig::default().with_size(256, 256))
        .build()
        .unwrap();

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Degree: {}", config.degree);
    println!("  Tile Count: {}", config.tile_count());
    println!("  Sphere Radius: {}", config.scale);
    println!();

    println!("Generating planet...");
    let terrain = Terrain::new(&config.seed, &config.terrain).expect("Failed to generate terrain");
    let planet = Planet::generate_with_sampler(config, &terrain).expect("Failed to generate planet");
    println!("Generated {} tiles\n", planet.tile_count());

    let mesh = planet.mesh();
    let land = (0..planet.tile_count())
        .filter_map(|id| planet.surface(id).ok())
        .filter(|s| s.height >= terrain.config().thresholds.sea_level)
        .count();

    println!("Statistics:");
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());
    println!(
        "  Land tiles: {} ({:.1}%)",
        land,
        100.0 * land as f64 / planet.tile_count() as f64
    );
    println!();

    println!("Sample tiles:");
    for tile in planet.tiles().iter().take(5) {
        let surface = planet.surface(tile.id).expect("tile exists");
        println!(
            "  Tile {}: corners={}, uv=({:.3}, {:.3}), height={:.3}, color={:?}",
            tile.id,
            tile.corner_count(),
            tile.uv.x,
            tile.uv.y,
            surface.height,
            surface.color.to_u8()
        );
    }

    #[cfg(feature = "debug-image")]
    {
        geodesic_planet::export::save_terrain_png(&terrain, 512, 256, "terrain.png")
            .expect("Failed to write terrain.png");
        geodesic_planet::export::save_field_png(terrain.heightmap().field(), "heightmap.png")
            .expect("Failed to write heightmap.png");
        println!("\nWrote terrain.png and heightmap.png");
    }

    println!("\nGeneration complete!");
}
