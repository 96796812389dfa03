//! Image-level rendering.
//!
//! Implements:
//! - Anti-aliasing via jittered multi-sampling
//! - Bucketed parallel rendering with rayon
//! - Per-pixel random streams, so output does not depend on thread count
//! - Gamma correction and 8-bit quantization

use crate::bucket::{render_bucket, Bucket, BucketGrid, Progress, DEFAULT_BUCKET_SIZE};
use crate::integrator::{trace, TraceMode};
use crate::{Camera, Color, Scene};
use glint_math::sampling::gen_f32;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum recursion depth
    pub max_depth: u32,
    /// Integrator to run
    pub mode: TraceMode,
    /// Base seed for the per-pixel random streams
    pub seed: u64,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 10,
            max_depth: 5,
            mode: TraceMode::Phong,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Random stream for one pixel.
///
/// Depends only on the seed and the pixel's row-major index, never on which
/// thread renders it.
pub fn pixel_rng(seed: u64, pixel_index: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ pixel_index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render a single pixel with multi-sampling.
///
/// Row 0 is the top of the image.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = config.samples_per_pixel.max(1);
    let width = camera.image_width as f32;
    let height = camera.image_height as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..samples {
        let s = (x as f32 + gen_f32(rng)) / width;
        let t = 1.0 - (y as f32 + gen_f32(rng)) / height;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += trace(&ray, scene, config.max_depth, config.mode, rng);
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Render the entire scene to an image buffer.
///
/// Buckets are rendered in parallel on the current rayon pool; progress is
/// logged at every tenth of the buckets.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let width = camera.image_width;
    let height = camera.image_height;
    let grid = BucketGrid::new(width, height, config.bucket_size);
    debug!(
        "Rendering {}x{} in {} buckets, {} spp, depth {}, {:?}",
        width,
        height,
        grid.len(),
        config.samples_per_pixel,
        config.max_depth,
        config.mode
    );

    let progress = Progress::new(grid.len());
    let buckets: Vec<Vec<Color>> = (0..grid.len())
        .into_par_iter()
        .map(|index| {
            let pixels = render_bucket(&grid.bucket(index), camera, scene, config);
            if let Some(percent) = progress.finish_one() {
                info!("{percent}% rendered ({}/{} buckets)", progress.done(), grid.len());
            }
            pixels
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for (bucket, pixels) in grid.iter().zip(&buckets) {
        image.write_bucket(&bucket, pixels);
    }
    image
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    // Apply gamma correction and convert to 0-255
    let r = (255.0 * clamp_01(linear_to_gamma(color.x))) as u8;
    let g = (255.0 * clamp_01(linear_to_gamma(color.y))) as u8;
    let b = (255.0 * clamp_01(linear_to_gamma(color.z))) as u8;
    [r, g, b, 255]
}

/// Linear-space render output, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy a rendered bucket into place. `pixels` follows
    /// [`Bucket::pixels`] order.
    pub fn write_bucket(&mut self, bucket: &Bucket, pixels: &[Color]) {
        for ((x, y), color) in bucket.pixels().zip(pixels) {
            self.set(x, y, *color);
        }
    }

    /// Linear tone mapping: scale by `exposure` and clip at 1.
    pub fn apply_exposure(&mut self, exposure: f32) {
        for color in &mut self.pixels {
            *color = (*color * exposure).min(Color::ONE);
        }
    }

    /// Convert to RGB bytes.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            let [r, g, b, _] = color_to_rgba(*color);
            bytes.extend_from_slice(&[r, g, b]);
        }
        bytes
    }
}
