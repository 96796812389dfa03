//! glint renderer - CPU ray tracing
//!
//! A Whitted-style ray tracer with an optional path-traced mode.
//! Spheres, triangles and capped cylinders are collected into a BVH,
//! shaded with Blinn-Phong direct lighting and rendered in parallel
//! buckets.

mod bucket;
mod bvh;
mod camera;
mod cylinder;
mod hittable;
pub mod integrator;
mod material;
mod output;
mod primitive;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bucket::{render_bucket, Bucket, BucketGrid, Progress, DEFAULT_BUCKET_SIZE};
pub use bvh::{Bvh, BvhNode};
pub use camera::Camera;
pub use cylinder::Cylinder;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use integrator::TraceMode;
pub use material::{Color, Material, MaterialKind, ScatterResult};
pub use output::{save_image, write_ppm, OutputError};
pub use primitive::Primitive;
pub use renderer::{
    color_to_rgba, linear_to_gamma, pixel_rng, render, render_pixel, ImageBuffer, RenderConfig,
};
pub use scene::{Light, Scene};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Interval, Ray, Vec3};
