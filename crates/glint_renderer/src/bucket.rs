//! Square tiles of the image, rendered as independent parallel tasks.
//!
//! The grid is row-major and computes each bucket on demand, so results
//! collected in index order can be written straight back into the image.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::renderer::{pixel_rng, render_pixel};
use crate::{Camera, Color, RenderConfig, Scene};
use glint_math::UVec2;

/// Default bucket edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Pixel rectangle `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub min: UVec2,
    pub max: UVec2,
}

impl Bucket {
    pub fn width(&self) -> u32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> u32 {
        self.max.y - self.min.y
    }

    pub fn len(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pixel coordinates in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> {
        let (min, max) = (self.min, self.max);
        (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| (x, y)))
    }
}

/// Row-major grid of buckets covering a `width × height` image.
///
/// Edge buckets are clipped to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketGrid {
    extent: UVec2,
    size: u32,
    columns: u32,
    rows: u32,
}

impl BucketGrid {
    /// A `size` of zero is treated as one.
    pub fn new(width: u32, height: u32, size: u32) -> Self {
        let size = size.max(1);
        Self {
            extent: UVec2::new(width, height),
            size,
            columns: width.div_ceil(size),
            rows: height.div_ceil(size),
        }
    }

    pub fn len(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bucket at `index`, counting left to right then top to bottom.
    pub fn bucket(&self, index: usize) -> Bucket {
        let index = index as u32;
        let cell = UVec2::new(index % self.columns, index / self.columns);
        let min = cell * self.size;
        Bucket {
            min,
            max: (min + UVec2::splat(self.size)).min(self.extent),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Bucket> + '_ {
        (0..self.len()).map(move |index| self.bucket(index))
    }
}

/// Render every pixel of `bucket`, in the order of [`Bucket::pixels`].
///
/// Each pixel draws from its own stream, seeded by `config.seed` and the
/// pixel's row-major index in the full image.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> Vec<Color> {
    let width = camera.image_width as u64;
    bucket
        .pixels()
        .map(|(x, y)| {
            let mut rng = pixel_rng(config.seed, y as u64 * width + x as u64);
            render_pixel(camera, scene, x, y, config, &mut rng)
        })
        .collect()
}

/// Completed-bucket counter shared by the render workers.
#[derive(Debug)]
pub struct Progress {
    done: AtomicUsize,
    total: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self {
            done: AtomicUsize::new(0),
            total,
        }
    }

    /// Record one finished bucket.
    ///
    /// Returns the percentage reached when this bucket crosses a new 10%
    /// step. Exactly one caller sees each step, whatever the thread
    /// interleaving.
    pub fn finish_one(&self) -> Option<usize> {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.total.max(1);
        let before = (done - 1) * 10 / total;
        let after = done * 10 / total;
        (after > before).then_some(after * 10)
    }

    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }
}
