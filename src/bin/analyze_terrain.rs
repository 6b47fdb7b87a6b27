use std::path::PathBuf;
use std::process::ExitCode;

use terrain_flow::preview::export_heightfield_preview;
use terrain_flow::terrain::gradient::lerp_f32;
use terrain_flow::terrain::{TerrainConfig, TerrainFrame, TerrainGenerator};

const PROFILE_ROWS: usize = 20;
const TICK_SECONDS: f32 = 1.0 / 60.0;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => match TerrainConfig::load_from_file(&path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("Failed to load {}: {}", path, error);
                return ExitCode::FAILURE;
            }
        },
        None => TerrainConfig::default(),
    };

    let ticks = match args.next().map(|value| value.parse::<u32>()) {
        None => 1,
        Some(Ok(ticks)) if ticks > 0 => ticks,
        Some(_) => {
            eprintln!("Usage: analyze_terrain [config.json] [ticks >= 1]");
            return ExitCode::FAILURE;
        }
    };

    println!("Analyzing terrain after {} tick(s)\n", ticks);
    println!("{}", "=".repeat(60));

    let mut generator = TerrainGenerator::new(config);
    let mut last_frame = None;
    for _ in 0..ticks {
        match generator.regenerate(TICK_SECONDS) {
            Ok(frame) => last_frame = Some(frame),
            Err(error) => {
                eprintln!("Terrain configuration rejected: {}", error);
                return ExitCode::FAILURE;
            }
        }
    }
    let Some(frame) = last_frame else {
        return ExitCode::FAILURE;
    };

    print_statistics(&generator, &frame);
    print_cross_section(&generator, &frame);

    if let Ok(env_value) = std::env::var("TERRAIN_EXPORT_PREVIEW") {
        let path = if env_value.trim().is_empty() {
            PathBuf::from("target/terrain_preview.png")
        } else {
            PathBuf::from(env_value.trim())
        };
        match export_heightfield_preview(
            &frame.heightfield,
            &generator.config().gradient,
            frame.gradient_bounds,
            &path,
        ) {
            Ok(()) => println!("\nPreview written to {}", path.display()),
            Err(error) => eprintln!("\nFailed to write preview {}: {}", path.display(), error),
        }
    }

    ExitCode::SUCCESS
}

fn water_level(generator: &TerrainGenerator) -> Option<f32> {
    let relative = generator.config().relative_water_height;
    if relative == 0.0 {
        return None;
    }
    let (min, max) = generator.water_bounds();
    Some(lerp_f32(min, max, relative))
}

fn print_statistics(generator: &TerrainGenerator, frame: &TerrainFrame) {
    let mut heights: Vec<f32> = frame
        .heightfield
        .vertices()
        .iter()
        .map(|vertex| vertex[1])
        .collect();
    heights.sort_by(f32::total_cmp);

    let config = generator.config();
    println!("Grid: {} x {} (seed {})", config.terrain_length, config.terrain_width, config.seed);
    println!("  Vertices: {}", frame.terrain.vertex_count());
    println!("  Triangles: {}", frame.terrain.triangle_count());
    println!("  Min height: {:.3}", frame.stats.min);
    println!("  Max height: {:.3}", frame.stats.max);
    println!("  Median height: {:.3}", heights[heights.len() / 2]);
    println!(
        "  Gradient bounds: {:.3} .. {:.3}",
        frame.gradient_bounds.0, frame.gradient_bounds.1
    );

    match water_level(generator) {
        Some(level) => {
            let submerged = heights.iter().filter(|height| **height < level).count();
            println!("  Water level: {:.3}", level);
            println!(
                "  Submerged nodes: {:.1}%",
                submerged as f32 / heights.len() as f32 * 100.0
            );
        }
        None => println!("  Water: disabled"),
    }
}

/// Prints the center row west to east, `#` for ground and `~` for water.
fn print_cross_section(generator: &TerrainGenerator, frame: &TerrainFrame) {
    let heightfield = &frame.heightfield;
    let z = heightfield.mesh_width() / 2;
    let range = frame.stats.range();
    let scale = |height: f32| {
        if range <= f32::EPSILON {
            0
        } else {
            (((height - frame.stats.min) / range) * (PROFILE_ROWS - 1) as f32).round() as usize
        }
    };
    let water_row = water_level(generator).map(scale);

    let columns: Vec<usize> = (0..=heightfield.mesh_length())
        .map(|x| scale(heightfield.vertices()[heightfield.linear_index(x, z)][1]))
        .collect();

    println!("\nCross-section at z = {}:\n", z);
    for row in (0..PROFILE_ROWS).rev() {
        let line: String = columns
            .iter()
            .map(|column| {
                if row <= *column {
                    '#'
                } else if water_row.is_some_and(|water| row <= water) {
                    '~'
                } else {
                    ' '
                }
            })
            .collect();
        println!("  |{}", line);
    }
    println!("{}", "=".repeat(60));
}
