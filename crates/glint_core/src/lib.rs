//! Glint Core - renderer-agnostic scene descriptions.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `CameraDesc`,
//!   `LightDesc`, `ShapeDesc`, `MaterialDesc`, `RenderSettings`
//! - **JSON loading**: `load_scene` / `parse_scene`
//!
//! Descriptions are plain data. Turning them into intersectable
//! primitives and shared materials is the renderer's job.
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scenes/simple.json")?;
//! println!("Loaded {} shapes, {} lights",
//!     scene.shapes.len(),
//!     scene.lights.len());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, parse_scene, LoadError, LoadResult};
pub use scene::{
    CameraDesc, LightDesc, MaterialDesc, RenderMode, RenderSettings, SceneDescription, ShapeDesc,
    Triple, DEFAULT_BACKGROUND,
};
