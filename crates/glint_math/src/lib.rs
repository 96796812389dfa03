//! Glint math - vectors, rays, intervals and bounding boxes.
//!
//! Everything here is a plain value type. Randomness is always supplied by
//! the caller through an explicit generator so that renders stay
//! reproducible under parallel execution.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
pub mod optics;
mod ray;
pub mod sampling;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
