//! Command-line arguments and configuration layering.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_core::RenderSettings;
use glint_renderer::{RenderConfig, TraceMode};
use log::LevelFilter;

/// Log levels accepted by `--log-level`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Integrators selectable with `--mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Binary,
    Phong,
    PathTraced,
}

impl From<Mode> for TraceMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Binary => TraceMode::Binary,
            Mode::Phong => TraceMode::Phong,
            Mode::PathTraced => TraceMode::PathTraced,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Render a JSON scene with the glint ray tracer", version)]
pub struct Args {
    /// Scene description (JSON)
    pub scene: PathBuf,

    /// Output image; `.ppm` is written as plain text, other extensions by format
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Integrator; overrides the scene's `rendermode`
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Samples per pixel
    #[arg(short = 's', long)]
    pub samples: Option<u32>,

    /// Maximum recursion depth; overrides the scene's `nbounces`
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for the per-pixel random streams
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Bucket edge length in pixels
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Scale colors by the camera exposure before gamma encoding
    #[arg(long)]
    pub tone_map: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Built-in defaults, then the scene file's settings, then flags.
    pub fn render_config(&self, settings: &RenderSettings) -> RenderConfig {
        let defaults = RenderConfig::default();

        let scene_mode = settings.mode.map(TraceMode::from);
        let flag_mode = self.mode.map(TraceMode::from);

        RenderConfig {
            samples_per_pixel: self.samples.unwrap_or(defaults.samples_per_pixel),
            max_depth: self
                .max_depth
                .or(settings.max_depth)
                .unwrap_or(defaults.max_depth),
            mode: flag_mode.or(scene_mode).unwrap_or(defaults.mode),
            seed: self.seed.unwrap_or(defaults.seed),
            bucket_size: self.bucket_size.unwrap_or(defaults.bucket_size),
        }
    }
}

/// Names used in log output.
pub fn mode_name(mode: TraceMode) -> &'static str {
    match mode {
        TraceMode::Binary => "binary",
        TraceMode::Phong => "phong",
        TraceMode::PathTraced => "path-traced",
    }
}

/// Warning for a render that will ignore or lack the scene's lights.
///
/// Only the Phong mode reads point lights; binary mode never does and the
/// path-traced mode lights the scene through emissive materials.
pub fn lighting_warning(mode: TraceMode, light_count: usize) -> Option<&'static str> {
    (mode == TraceMode::Phong && light_count == 0)
        .then_some("Phong mode without lights renders ambient only")
}
