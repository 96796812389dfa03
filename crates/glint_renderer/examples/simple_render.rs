//! Simple ray tracer example.
//!
//! Builds a scene in code (no scene file), renders it in every trace mode
//! and saves the results as PPM.

use glint_renderer::{
    render, save_image, Camera, Color, Cylinder, Light, Material, Primitive, RenderConfig,
    Scene, Sphere, TraceMode, Triangle, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("glint - Simple Example");
    println!("======================");

    // Build the scene
    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    // Set up camera
    let mut camera = Camera::new()
        .with_resolution(400, 225)
        .with_position(
            Vec3::new(13.0, 2.0, 3.0), // look_from
            Vec3::new(0.0, 0.0, 0.0),  // look_at
            Vec3::new(0.0, 1.0, 0.0),  // vup
        )
        .with_lens(20.0, 0.1, 10.0);
    camera.initialize();

    for (mode, filename) in [
        (TraceMode::Binary, "simple_binary.ppm"),
        (TraceMode::Phong, "simple_phong.ppm"),
        (TraceMode::PathTraced, "simple_path.ppm"),
    ] {
        let config = RenderConfig {
            samples_per_pixel: 16,
            max_depth: 8,
            mode,
            ..Default::default()
        };

        println!(
            "Rendering {}x{} @ {} spp ({:?})...",
            camera.image_width, camera.image_height, config.samples_per_pixel, mode
        );

        let start = std::time::Instant::now();
        let image = render(&camera, &scene, &config);
        println!("Rendered in {:?}", start.elapsed());

        if let Err(err) = save_image(&image, filename) {
            eprintln!("Failed to save {filename}: {err}");
            std::process::exit(1);
        }
        println!("Saved to {}", filename);
    }
}

fn build_scene() -> Scene {
    let mut objects: Vec<Primitive> = Vec::new();

    // Ground
    objects.push(
        Sphere::new(
            Vec3::new(0.0, -1000.0, 0.0),
            1000.0,
            Arc::new(Material::diffuse(Color::new(0.5, 0.5, 0.5))),
        )
        .into(),
    );

    // Three main shapes
    objects.push(
        Sphere::new(
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            Arc::new(Material::dielectric(1.5)),
        )
        .into(),
    );
    objects.push(
        Cylinder::new(
            Vec3::new(-4.0, 1.0, 0.0),
            Vec3::Y,
            0.8,
            1.0,
            Arc::new(
                Material::diffuse(Color::new(0.4, 0.2, 0.1)).with_phong(0.3, 0.9, 16.0),
            ),
        )
        .into(),
    );
    objects.push(
        Sphere::new(
            Vec3::new(4.0, 1.0, 0.0),
            1.0,
            Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0).with_reflectivity(0.6)),
        )
        .into(),
    );

    // A backdrop triangle
    objects.push(
        Triangle::new(
            Vec3::new(-6.0, 0.0, -4.0),
            Vec3::new(6.0, 0.0, -4.0),
            Vec3::new(0.0, 5.0, -4.0),
            Arc::new(Material::diffuse(Color::new(0.2, 0.3, 0.6)).with_phong(0.1, 0.8, 8.0)),
        )
        .into(),
    );

    // Small seeded spheres sharing a handful of materials
    let mut rng = StdRng::seed_from_u64(2024);
    let matte = Arc::new(Material::diffuse(Color::new(0.6, 0.2, 0.2)).with_phong(0.2, 0.8, 32.0));
    let brushed = Arc::new(Material::metal(Color::new(0.8, 0.8, 0.9), 0.3).with_reflectivity(0.4));
    let glass = Arc::new(Material::dielectric(1.5));

    for a in -5..5 {
        for b in -5..5 {
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() > 0.9 {
                let choose_mat: f32 = rng.gen();
                let material = if choose_mat < 0.8 {
                    matte.clone()
                } else if choose_mat < 0.95 {
                    brushed.clone()
                } else {
                    glass.clone()
                };
                objects.push(Sphere::new(center, 0.2, material).into());
            }
        }
    }

    println!("Created {} objects", objects.len());
    let lights = vec![
        Light::new(Vec3::new(10.0, 10.0, 10.0), Color::splat(0.8)),
        Light::new(Vec3::new(-10.0, 8.0, 4.0), Color::splat(0.4)),
    ];
    Scene::new(objects, lights, Color::new(0.5, 0.7, 1.0))
}
