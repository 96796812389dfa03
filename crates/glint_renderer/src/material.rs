//! Surface materials: Blinn-Phong coefficients plus a scatter rule.
//!
//! A material is a closed set of behaviors (diffuse, metal, dielectric)
//! chosen once at construction. Primitives share materials through
//! `Arc<Material>`; many primitives may point at the same instance.

use crate::{hittable::HitRecord, Ray};
use glint_core::MaterialDesc;
use glint_math::optics::{reflect, refract, schlick};
use glint_math::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use glint_math::Vec3;
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// How a material scatters light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialKind {
    /// Lambertian scatter around the normal
    Diffuse,
    /// Mirror reflection perturbed by `fuzz` (0 = perfect mirror, 1 = very rough)
    Metal { fuzz: f32 },
    /// Glass-like: Fresnel-weighted choice between reflection and refraction
    Dielectric,
}

/// Result of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Color filter applied to whatever the scattered ray brings back
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// Material description shared by primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Specular coefficient
    pub ks: f32,
    /// Diffuse coefficient
    pub kd: f32,
    /// Blinn-Phong shininess
    pub specular_exponent: f32,
    pub diffuse_color: Color,
    pub specular_color: Color,
    pub emission_color: Color,
    /// Normal-incidence reflectance used to weight mirror bounces
    pub reflectivity: f32,
    /// Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub refractive_index: f32,
    reflective: bool,
    refractive: bool,
    kind: MaterialKind,
}

impl Material {
    /// Material with zeroed coefficients whose behavior follows the two
    /// flags: refractive wins over reflective, neither means diffuse.
    pub fn from_flags(reflective: bool, refractive: bool, fuzz: f32) -> Self {
        let kind = if refractive {
            MaterialKind::Dielectric
        } else if reflective {
            MaterialKind::Metal {
                fuzz: fuzz.clamp(0.0, 1.0),
            }
        } else {
            MaterialKind::Diffuse
        };

        Self {
            ks: 0.0,
            kd: 0.0,
            specular_exponent: 0.0,
            diffuse_color: Color::ZERO,
            specular_color: Color::ZERO,
            emission_color: Color::ZERO,
            reflectivity: 0.0,
            refractive_index: 1.0,
            reflective,
            refractive,
            kind,
        }
    }

    /// Fully diffuse surface of the given color.
    pub fn diffuse(albedo: Color) -> Self {
        Self {
            kd: 1.0,
            diffuse_color: albedo,
            ..Self::from_flags(false, false, 0.0)
        }
    }

    /// Reflective metal.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, clamped to [0, 1]
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Self {
            ks: 1.0,
            diffuse_color: albedo,
            specular_color: albedo,
            reflectivity: 1.0,
            ..Self::from_flags(true, false, fuzz)
        }
    }

    /// Clear dielectric with index of refraction `ior`.
    pub fn dielectric(ior: f32) -> Self {
        Self {
            diffuse_color: Color::ONE,
            specular_color: Color::ONE,
            refractive_index: ior,
            ..Self::from_flags(false, true, 0.0)
        }
    }

    /// Set the Blinn-Phong coefficients.
    pub fn with_phong(mut self, ks: f32, kd: f32, specular_exponent: f32) -> Self {
        self.ks = ks;
        self.kd = kd;
        self.specular_exponent = specular_exponent;
        self
    }

    /// Set the specular highlight color.
    pub fn with_specular_color(mut self, color: Color) -> Self {
        self.specular_color = color;
        self
    }

    /// Set the emitted color.
    pub fn with_emission(mut self, color: Color) -> Self {
        self.emission_color = color;
        self
    }

    /// Set the normal-incidence reflectance.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    /// Whether the direct-lighting integrator should add a mirror bounce.
    pub fn is_reflective(&self) -> bool {
        self.reflective
    }

    pub fn is_refractive(&self) -> bool {
        self.refractive
    }

    /// Light emitted by the surface itself.
    pub fn emitted(&self) -> Color {
        self.emission_color
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self.kind {
            MaterialKind::Diffuse => {
                let mut scatter_direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if scatter_direction.length_squared() < 1e-8 {
                    scatter_direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: self.diffuse_color,
                    scattered: Ray::new(rec.p, scatter_direction),
                })
            }

            MaterialKind::Metal { fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let scattered_dir = reflected + fuzz * random_in_unit_sphere(rng);

                // Fuzz can push the ray below the surface; it is absorbed then
                if scattered_dir.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: self.diffuse_color,
                        scattered: Ray::new(rec.p, scattered_dir),
                    })
                } else {
                    None
                }
            }

            MaterialKind::Dielectric => {
                let refraction_ratio = if rec.front_face {
                    1.0 / self.refractive_index
                } else {
                    self.refractive_index
                };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                // Total internal reflection
                let cannot_refract = refraction_ratio * sin_theta > 1.0;

                let direction = if cannot_refract
                    || schlick(cos_theta, refraction_ratio) > gen_f32(rng)
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, refraction_ratio)
                };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction),
                })
            }
        }
    }
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        Self {
            ks: desc.ks,
            kd: desc.kd,
            specular_exponent: desc.specular_exponent,
            diffuse_color: Vec3::from_array(desc.diffuse_color),
            specular_color: Vec3::from_array(desc.specular_color),
            emission_color: Vec3::from_array(desc.emission_color),
            reflectivity: desc.reflectivity,
            refractive_index: desc.refractive_index,
            ..Self::from_flags(desc.is_reflective, desc.is_refractive, desc.fuzz)
        }
    }
}
