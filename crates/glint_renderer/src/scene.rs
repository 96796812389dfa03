//! Render-ready scene: primitives in a BVH, point lights and a background.

use std::sync::Arc;

use glint_core::{LightDesc, MaterialDesc, SceneDescription, ShapeDesc};
use glint_math::Vec3;
use log::{debug, info};

use crate::{Bvh, Color, Cylinder, Material, Primitive, Sphere, Triangle};

/// A point light. Intensity does not fall off with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: Color,
}

impl Light {
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

impl From<&LightDesc> for Light {
    fn from(desc: &LightDesc) -> Self {
        Self::new(
            Vec3::from_array(desc.position),
            Vec3::from_array(desc.intensity),
        )
    }
}

/// Everything the integrator reads while rendering. Immutable once built.
#[derive(Debug, Clone)]
pub struct Scene {
    pub world: Bvh,
    pub lights: Vec<Light>,
    pub background: Color,
}

impl Scene {
    /// Build the BVH over `primitives` and wrap it with the lights.
    pub fn new(primitives: Vec<Primitive>, lights: Vec<Light>, background: Color) -> Self {
        Self {
            world: Bvh::new(primitives),
            lights,
            background,
        }
    }

    /// Turn a parsed description into primitives and build the BVH.
    ///
    /// Shapes whose material records are identical share one
    /// `Arc<Material>`.
    pub fn from_description(desc: &SceneDescription) -> Self {
        // Scenes carry few distinct materials, so a linear scan is enough
        let mut materials: Vec<(&MaterialDesc, Arc<Material>)> = Vec::new();

        let primitives: Vec<Primitive> = desc
            .shapes
            .iter()
            .map(|shape| {
                let record = shape.material();
                let material = match materials.iter().find(|(known, _)| *known == record) {
                    Some((_, material)) => material.clone(),
                    None => {
                        let material = Arc::new(Material::from(record));
                        materials.push((record, material.clone()));
                        material
                    }
                };
                build_primitive(shape, material)
            })
            .collect();

        debug!(
            "{} primitives share {} materials",
            primitives.len(),
            materials.len()
        );

        let lights: Vec<Light> = desc.lights.iter().map(Light::from).collect();
        let scene = Self::new(primitives, lights, Vec3::from_array(desc.background));
        info!(
            "Scene ready: {} primitives, {} lights",
            scene.world.len(),
            scene.lights.len()
        );
        scene
    }
}

fn build_primitive(shape: &ShapeDesc, material: Arc<Material>) -> Primitive {
    match shape {
        ShapeDesc::Sphere { center, radius, .. } => {
            Sphere::new(Vec3::from_array(*center), *radius, material).into()
        }
        ShapeDesc::Triangle { v0, v1, v2, .. } => Triangle::new(
            Vec3::from_array(*v0),
            Vec3::from_array(*v1),
            Vec3::from_array(*v2),
            material,
        )
        .into(),
        ShapeDesc::Cylinder {
            center,
            axis,
            radius,
            height,
            ..
        } => Cylinder::new(
            Vec3::from_array(*center),
            Vec3::from_array(*axis),
            *radius,
            *height,
            material,
        )
        .into(),
    }
}
