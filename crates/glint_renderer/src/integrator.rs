//! Light transport: what color a camera ray brings back.
//!
//! Three interchangeable modes:
//! - [`TraceMode::Binary`]: flat hit color against the background
//! - [`TraceMode::Phong`]: Blinn-Phong direct lighting with shadow rays and a
//!   Fresnel-weighted mirror bounce for reflective materials
//! - [`TraceMode::PathTraced`]: recursive material scattering
//!
//! Phong mode only branches on reflection. Refractive materials are shaded
//! like any other surface there; refraction is handled by
//! [`Material::scatter`](crate::Material::scatter), which only the
//! path-traced mode calls.

use crate::{Color, Hittable, Ray, Scene};
use glint_core::RenderMode;
use glint_math::optics::{fresnel_schlick, lerp, reflect};
use glint_math::Interval;
use rand::RngCore;

/// Minimum hit distance for every traced ray, to avoid self-intersection.
pub const T_MIN: f32 = 1e-3;

/// Color returned by binary mode when a ray hits anything.
pub const BINARY_HIT_COLOR: Color = Color::new(1.0, 0.0, 0.0);

/// Base ambient term of the Phong mode.
pub const AMBIENT: Color = Color::splat(0.1);

/// Per-light ambient factor applied to the diffuse color.
const LIGHT_AMBIENT: f32 = 0.1;

/// Which integrator to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraceMode {
    Binary,
    #[default]
    Phong,
    PathTraced,
}

impl From<RenderMode> for TraceMode {
    fn from(mode: RenderMode) -> Self {
        match mode {
            RenderMode::Binary => TraceMode::Binary,
            RenderMode::Phong => TraceMode::Phong,
            RenderMode::PathTraced => TraceMode::PathTraced,
        }
    }
}

/// Trace `ray` through `scene` with the given mode.
pub fn trace(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    mode: TraceMode,
    rng: &mut dyn RngCore,
) -> Color {
    match mode {
        TraceMode::Binary => binary(ray, scene),
        TraceMode::Phong => shade(ray, scene, depth),
        TraceMode::PathTraced => path_trace(ray, scene, depth, rng),
    }
}

/// Visibility only.
pub fn binary(ray: &Ray, scene: &Scene) -> Color {
    match scene.world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) {
        Some(_) => BINARY_HIT_COLOR,
        None => scene.background,
    }
}

/// Blinn-Phong direct lighting plus recursive mirror reflection.
///
/// Returns black once `depth` reaches zero. Deterministic: no random
/// numbers are drawn.
pub fn shade(ray: &Ray, scene: &Scene, depth: u32) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return scene.background;
    };

    let material = rec.material;
    let unit_direction = ray.direction().normalize();
    let view_dir = -unit_direction;

    let mut lighting = AMBIENT;
    for light in &scene.lights {
        let to_light = light.position - rec.p;
        let distance = to_light.length();
        let light_dir = to_light / distance;

        let shadow_ray = Ray::new(rec.p, light_dir);
        if scene
            .world
            .hit(&shadow_ray, Interval::new(T_MIN, distance))
            .is_some()
        {
            continue;
        }

        let ambient = LIGHT_AMBIENT * material.diffuse_color;

        let halfway = (view_dir + light_dir).normalize_or_zero();
        let spec = rec
            .normal
            .dot(halfway)
            .max(0.0)
            .powf(material.specular_exponent);
        let specular = spec * material.ks * material.specular_color * light.intensity;

        let diff = rec.normal.dot(light_dir).max(0.0);
        let diffuse = diff * material.kd * material.diffuse_color * light.intensity;

        lighting += ambient + specular + diffuse;
    }

    if material.is_reflective() {
        let reflected = Ray::new(rec.p, reflect(unit_direction, rec.normal));
        let cos_theta = (-unit_direction).dot(rec.normal).max(0.0);
        let fresnel = fresnel_schlick(cos_theta, material.reflectivity);

        let reflected_color = shade(&reflected, scene, depth - 1);
        lighting = lerp(lighting, reflected_color, fresnel);
    }

    lighting
}

/// Recursive path tracing through [`Material::scatter`](crate::Material::scatter).
pub fn path_trace(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return scene.background;
    };

    let emission = rec.material.emitted();

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = path_trace(&result.scattered, scene, depth - 1, rng);
            emission + result.attenuation * scattered_color
        }
        // Absorbed
        None => emission,
    }
}
