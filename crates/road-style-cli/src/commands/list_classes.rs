//! List classes command implementation.

use road_style_roads::{Preset, RoadClass};

/// Runs the list-classes command.
pub fn run() {
    println!("Road classes (draw order, lowest first):\n");
    println!("{:<15} {:<7} {:<10} Description", "Name", "Zoom", "Brunnel");
    println!("{}", "-".repeat(80));

    for class in RoadClass::ALL {
        let brunnel = class.style().brunnel_mode().to_string();
        println!(
            "{:<15} {:<7} {:<10} {}",
            class.name(),
            class.min_zoom(),
            brunnel,
            class.description()
        );
    }

    println!("\nZoom is applied when `tiered-zoom = true`; otherwise every class starts at 4.");

    println!("\nPalettes:");
    for preset in Preset::ALL {
        println!("  {}", preset.name());
    }

    println!("\nUse --class to generate specific classes, e.g.:");
    println!("  road-style generate --class motorway --class tunnel");
}
