//! Example: Generate a hex island
//!
//! Demonstrates the full pipeline and prints what each stage produced.

use hex_island::*;

fn main() {
    println!("Hex Island Generation Example");
    println!("=============================\n");

    let config = MapConfigBuilder::new()
        .seed(42)
        .grid(64, 48)
        .unwrap()
        .sea_level(0.45)
        .build()
        .unwrap();

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Grid: {}x{}", config.elevation.cols, config.elevation.rows);
    println!("  Hex Radius: {}", config.elevation.radius);
    println!("  Octaves: {}", config.elevation.octaves);
    println!("  Sea Level: {}", config.elevation.sea_level);
    println!();

    println!("Generating map...");
    let map = HexMap::generate(config).expect("Failed to generate map");
    println!("Generated {} hexes\n", map.hex_count());

    let stats = map.stats();
    println!("Statistics:");
    println!("  Land: {}", stats.land);
    println!("  Water: {}", stats.water);
    println!("  Regions: {}", stats.regions);
    println!("  Specks removed: {}", stats.specks_removed);
    println!(
        "  Elevation: min={:.3}, mean={:.3}, max={:.3}",
        stats.min_elevation, stats.mean_elevation, stats.max_elevation
    );
    println!();

    println!("Coastlines:");
    println!("  Main loop: {}", map.coastline().len());
    for (i, ring) in map.coastline().iter().enumerate() {
        println!("    Loop {}: {} vertices, area {:.1}", i, ring.len(), ring.area());
    }
    println!("  Hex-edge loops: {}", map.all_coastlines().len());
    println!();

    let rivers = map.rivers();
    println!("Rivers:");
    for order in RiverOrder::ALL {
        println!("  {:?}: {}", order, rivers.count(order));
    }
    for river in rivers.polylines.iter().take(5) {
        println!(
            "  {:?} river: {} vertices, width {}",
            river.order,
            river.path.len(),
            river.width
        );
    }

    println!("\nGeneration complete!");
}
