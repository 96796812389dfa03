//! Reflection, refraction and Fresnel helpers.

use crate::Vec3;

/// Mirror `v` about the surface normal `n`.
///
/// `n` must be unit length. For a unit `v` the angle of incidence equals
/// the angle of reflection: `reflect(v, n).dot(n) == -v.dot(n)`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit direction `uv` through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of the refractive indices on the incoming
/// and transmitted sides. The caller must rule out total internal
/// reflection first.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation of Fresnel reflectance, with the normal
/// incidence reflectance derived from a refractive index ratio.
#[inline]
pub fn schlick(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    fresnel_schlick(cosine, r0)
}

/// Schlick's polynomial with an explicit normal incidence reflectance `r0`.
#[inline]
pub fn fresnel_schlick(cosine: f32, r0: f32) -> f32 {
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Linear blend, `a` at `t = 0` and `b` at `t = 1`.
#[inline]
pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}
