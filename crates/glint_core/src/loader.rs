//! JSON scene loading.
//!
//! The document is parsed once into a JSON tree. The camera, the light
//! list and the shape list are then deserialized as three independent
//! tasks, since they read disjoint parts of the document. All three are
//! joined before the description is returned, so callers always see a
//! complete scene.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::scene::{
    CameraDesc, LightDesc, RenderSettings, SceneDescription, ShapeDesc, Triple,
    DEFAULT_BACKGROUND,
};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required section: {0}")]
    MissingSection(&'static str),

    #[error("Invalid scene: {0}")]
    Invalid(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a JSON scene file from disk.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    info!("Loading scene {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_scene(&text)
}

/// Parse a JSON scene document.
pub fn parse_scene(text: &str) -> LoadResult<SceneDescription> {
    let root: Value = serde_json::from_str(text)?;
    let camera_json = root.get("camera").ok_or(LoadError::MissingSection("camera"))?;
    let scene_json = root.get("scene").ok_or(LoadError::MissingSection("scene"))?;

    let (camera, (lights, shapes)) = rayon::join(
        || CameraDesc::deserialize(camera_json),
        || {
            rayon::join(
                || parse_lights(scene_json),
                || parse_shapes(scene_json),
            )
        },
    );

    let background = match scene_json.get("backgroundcolor") {
        Some(value) => <Triple as Deserialize>::deserialize(value)?,
        None => DEFAULT_BACKGROUND,
    };

    let description = SceneDescription {
        camera: camera?,
        lights: lights?,
        shapes: shapes?,
        background,
        render: RenderSettings::deserialize(&root)?,
    };
    validate(&description)?;

    info!(
        "Parsed scene: {} shapes, {} lights, {}x{} image",
        description.shapes.len(),
        description.lights.len(),
        description.camera.width,
        description.camera.height
    );
    Ok(description)
}

fn parse_lights(scene: &Value) -> Result<Vec<LightDesc>, serde_json::Error> {
    match scene.get("lightsources") {
        Some(value) => Vec::<LightDesc>::deserialize(value),
        None => Ok(Vec::new()),
    }
}

fn parse_shapes(scene: &Value) -> Result<Vec<ShapeDesc>, serde_json::Error> {
    match scene.get("shapes") {
        Some(value) => {
            let shapes = Vec::<ShapeDesc>::deserialize(value)?;
            for (i, shape) in shapes.iter().enumerate() {
                debug!("shape {i}: {}", shape.kind());
            }
            Ok(shapes)
        }
        None => {
            warn!("Scene has no shapes");
            Ok(Vec::new())
        }
    }
}

/// Reject descriptions the renderer cannot form a valid camera or
/// primitive from.
fn validate(description: &SceneDescription) -> LoadResult<()> {
    let camera = &description.camera;
    if camera.width == 0 || camera.height == 0 {
        return Err(LoadError::Invalid(format!(
            "image size must be non-zero, got {}x{}",
            camera.width, camera.height
        )));
    }
    if !(camera.fov > 0.0 && camera.fov < 180.0) {
        return Err(LoadError::Invalid(format!(
            "field of view must be in (0, 180) degrees, got {}",
            camera.fov
        )));
    }
    let view_length_squared: f32 = camera
        .position
        .iter()
        .zip(&camera.look_at)
        .map(|(eye, target)| (eye - target) * (eye - target))
        .sum();
    if view_length_squared < 1e-12 {
        return Err(LoadError::Invalid(format!(
            "camera position {:?} and lookAt must differ",
            camera.position
        )));
    }

    for (i, shape) in description.shapes.iter().enumerate() {
        match shape {
            ShapeDesc::Sphere { radius, .. } if *radius <= 0.0 => {
                return Err(LoadError::Invalid(format!(
                    "shape {i}: sphere radius must be positive"
                )));
            }
            ShapeDesc::Cylinder {
                axis,
                radius,
                height,
                ..
            } => {
                if *radius <= 0.0 || *height <= 0.0 {
                    return Err(LoadError::Invalid(format!(
                        "shape {i}: cylinder radius and height must be positive"
                    )));
                }
                if axis.iter().all(|c| *c == 0.0) {
                    return Err(LoadError::Invalid(format!(
                        "shape {i}: cylinder axis must be non-zero"
                    )));
                }
            }
            _ => {}
        }
    }

    Ok(())
}
