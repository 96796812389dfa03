//! Example: Load and inspect a JSON scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/simple.json

use std::env;

use glint_core::{load_scene, ShapeDesc};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene.json>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_scene -- scenes/simple.json");
        println!("  cargo run --example inspect_scene -- scenes/mixed.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            let camera = &scene.camera;
            println!("\n=== Camera ===");
            println!("  {}x{} @ {} deg fov", camera.width, camera.height, camera.fov);
            println!("  from {:?} looking at {:?}", camera.position, camera.look_at);
            println!("  aperture {} exposure {}", camera.aperture, camera.exposure);

            println!("\n--- Lights ({}) ---", scene.lights.len());
            for light in &scene.lights {
                println!("  at {:?} intensity {:?}", light.position, light.intensity);
            }

            println!("\n--- Shapes ({}) ---", scene.shapes.len());
            for (i, shape) in scene.shapes.iter().enumerate() {
                let material = shape.material();
                let behavior = if material.is_refractive {
                    "dielectric"
                } else if material.is_reflective {
                    "metal"
                } else {
                    "diffuse"
                };
                match shape {
                    ShapeDesc::Sphere { center, radius, .. } => {
                        println!("  [{i}] sphere at {center:?} r={radius} ({behavior})")
                    }
                    ShapeDesc::Triangle { v0, v1, v2, .. } => {
                        println!("  [{i}] triangle {v0:?} {v1:?} {v2:?} ({behavior})")
                    }
                    ShapeDesc::Cylinder {
                        center,
                        axis,
                        radius,
                        height,
                        ..
                    } => println!(
                        "  [{i}] cylinder at {center:?} axis {axis:?} r={radius} h={height} ({behavior})"
                    ),
                }
            }

            println!("\nBackground: {:?}", scene.background);
            println!("Render settings: {:?}", scene.render);
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}
