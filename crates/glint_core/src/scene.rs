//! Scene description types for glint.
//!
//! These mirror the JSON scene format field for field and stay
//! renderer-agnostic: vectors are plain `[f32; 3]` triples and materials
//! are flat coefficient records.

use serde::{Deserialize, Serialize};

/// An `[x, y, z]` position/direction or an `[r, g, b]` color.
pub type Triple = [f32; 3];

/// Background color used when a scene does not specify one (mid gray).
pub const DEFAULT_BACKGROUND: Triple = [0.25, 0.25, 0.25];

/// A complete, parsed scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraDesc,
    pub lights: Vec<LightDesc>,
    pub shapes: Vec<ShapeDesc>,
    pub background: Triple,
    pub render: RenderSettings,
}

/// Camera configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraDesc {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Eye position (look-from)
    pub position: Triple,

    /// Point the camera looks at
    #[serde(rename = "lookAt")]
    pub look_at: Triple,

    /// World up hint for building the camera basis
    #[serde(rename = "upVector", default = "default_up")]
    pub up: Triple,

    /// Vertical field of view in degrees
    pub fov: f32,

    /// Linear exposure scale, applied only when tone mapping is requested
    #[serde(default = "default_one")]
    pub exposure: f32,

    /// Lens diameter; 0 gives a pinhole camera
    #[serde(default)]
    pub aperture: f32,

    /// Distance from the eye to the plane of perfect focus
    #[serde(rename = "focusdistance", default = "default_one")]
    pub focus_dist: f32,
}

impl CameraDesc {
    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// A point light.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightDesc {
    pub position: Triple,
    pub intensity: Triple,
}

/// One geometric primitive plus its material, tagged by `"type"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeDesc {
    Sphere {
        center: Triple,
        radius: f32,
        #[serde(default = "MaterialDesc::fallback")]
        material: MaterialDesc,
    },
    Triangle {
        v0: Triple,
        v1: Triple,
        v2: Triple,
        #[serde(default = "MaterialDesc::fallback")]
        material: MaterialDesc,
    },
    /// Capped cylinder. `height` is the half-height: the caps sit at
    /// `center ± height * axis`.
    Cylinder {
        center: Triple,
        axis: Triple,
        radius: f32,
        height: f32,
        #[serde(default = "MaterialDesc::fallback")]
        material: MaterialDesc,
    },
}

impl ShapeDesc {
    /// The material attached to this shape.
    pub fn material(&self) -> &MaterialDesc {
        match self {
            ShapeDesc::Sphere { material, .. }
            | ShapeDesc::Triangle { material, .. }
            | ShapeDesc::Cylinder { material, .. } => material,
        }
    }

    /// Short kind name, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeDesc::Sphere { .. } => "sphere",
            ShapeDesc::Triangle { .. } => "triangle",
            ShapeDesc::Cylinder { .. } => "cylinder",
        }
    }
}

/// Surface material coefficients.
///
/// Every field is optional in the file. `isrefractive` selects a dielectric,
/// otherwise `isreflective` selects a metal, otherwise the surface is
/// diffuse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDesc {
    pub ks: f32,
    pub kd: f32,
    #[serde(rename = "specularexponent")]
    pub specular_exponent: f32,
    #[serde(rename = "diffusecolor")]
    pub diffuse_color: Triple,
    #[serde(rename = "specularcolor")]
    pub specular_color: Triple,
    #[serde(rename = "emissioncolor")]
    pub emission_color: Triple,
    #[serde(rename = "isreflective")]
    pub is_reflective: bool,
    pub reflectivity: f32,
    #[serde(rename = "isrefractive")]
    pub is_refractive: bool,
    #[serde(rename = "refractiveindex")]
    pub refractive_index: f32,
    pub fuzz: f32,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            ks: 0.0,
            kd: 0.0,
            specular_exponent: 0.0,
            diffuse_color: [0.0; 3],
            specular_color: [0.0; 3],
            emission_color: [0.0; 3],
            is_reflective: false,
            reflectivity: 0.0,
            is_refractive: false,
            refractive_index: 1.0,
            fuzz: 0.0,
        }
    }
}

impl MaterialDesc {
    /// Material given to shapes that do not declare one: plain red diffuse.
    pub fn fallback() -> Self {
        Self {
            kd: 1.0,
            diffuse_color: [1.0, 0.0, 0.0],
            ..Default::default()
        }
    }
}

/// Which light-transport integrator to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Hit / miss visibility only
    Binary,
    /// Blinn-Phong direct lighting with shadow rays and mirror reflection
    #[default]
    Phong,
    /// Recursive material scattering
    PathTraced,
}

/// Render settings carried by the scene file. Unset fields fall back to
/// the renderer's defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(rename = "rendermode", default)]
    pub mode: Option<RenderMode>,
    #[serde(rename = "nbounces", default)]
    pub max_depth: Option<u32>,
}

fn default_up() -> Triple {
    [0.0, 1.0, 0.0]
}

fn default_one() -> f32 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_tagging() {
        let json = r#"{ "type": "sphere", "center": [0, 1, 2], "radius": 0.5 }"#;
        let shape: ShapeDesc = serde_json::from_str(json).unwrap();

        assert_eq!(shape.kind(), "sphere");
        assert_eq!(shape.material(), &MaterialDesc::fallback());
        match shape {
            ShapeDesc::Sphere { center, radius, .. } => {
                assert_eq!(center, [0.0, 1.0, 2.0]);
                assert_eq!(radius, 0.5);
            }
            other => panic!("expected a sphere, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_material_defaults() {
        let json = r#"{ "kd": 0.9, "diffusecolor": [0.2, 0.4, 0.6], "isrefractive": true }"#;
        let material: MaterialDesc = serde_json::from_str(json).unwrap();

        assert_eq!(material.kd, 0.9);
        assert_eq!(material.ks, 0.0);
        assert_eq!(material.diffuse_color, [0.2, 0.4, 0.6]);
        assert!(material.is_refractive);
        assert!(!material.is_reflective);
        assert_eq!(material.refractive_index, 1.0);
    }

    #[test]
    fn test_camera_defaults() {
        let json = r#"{
            "width": 40, "height": 20,
            "position": [0, 0, 5], "lookAt": [0, 0, 0], "fov": 45
        }"#;
        let camera: CameraDesc = serde_json::from_str(json).unwrap();

        assert_eq!(camera.up, [0.0, 1.0, 0.0]);
        assert_eq!(camera.exposure, 1.0);
        assert_eq!(camera.aperture, 0.0);
        assert_eq!(camera.focus_dist, 1.0);
        assert_eq!(camera.aspect_ratio(), 2.0);
    }

    #[test]
    fn test_render_mode_names() {
        let mode: RenderMode = serde_json::from_str(r#""pathtraced""#).unwrap();
        assert_eq!(mode, RenderMode::PathTraced);
        assert_eq!(RenderMode::default(), RenderMode::Phong);
    }
}
