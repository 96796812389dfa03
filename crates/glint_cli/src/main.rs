use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{render, save_image, Camera, Scene};
use log::{info, warn};

mod cli;

use cli::{lighting_warning, mode_name, Args};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    info!("Starting glint {}", env!("CARGO_PKG_VERSION"));

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker thread pool")?;
    }
    info!("Using {} worker threads", rayon::current_num_threads());

    let start = Instant::now();
    let description = glint_core::load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;
    info!("Scene loaded in {:?}", start.elapsed());

    let config = args.render_config(&description.render);
    if let Some(warning) = lighting_warning(config.mode, description.lights.len()) {
        warn!("{warning}");
    }

    let start = Instant::now();
    let camera = Camera::from(&description.camera);
    let scene = Scene::from_description(&description);
    info!("BVH built in {:?}", start.elapsed());

    info!(
        "Rendering {}x{} @ {} spp, depth {}, {} mode",
        camera.image_width,
        camera.image_height,
        config.samples_per_pixel,
        config.max_depth,
        mode_name(config.mode)
    );
    let start = Instant::now();
    let mut image = render(&camera, &scene, &config);
    info!("Rendered in {:?}", start.elapsed());

    if args.tone_map {
        info!("Applying exposure {}", description.camera.exposure);
        image.apply_exposure(description.camera.exposure);
    }

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
