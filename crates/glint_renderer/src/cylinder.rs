//! Capped cylinder primitive.
//!
//! The cylinder is centred on `center`, runs along the unit `axis`, and
//! extends `height` in both directions, so the two caps sit at
//! `center ± height * axis`. A hit is the nearest of up to four
//! candidates: two roots of the lateral quadratic (each accepted only when
//! its axial projection falls between the caps) and one point on each cap
//! disk.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use glint_math::{Aabb, Interval, Vec3};
use std::sync::Arc;

/// Guard for divisions by the axial / perpendicular ray components.
const EPSILON: f32 = 1e-6;

#[derive(Debug, Clone)]
pub struct Cylinder {
    center: Vec3,
    axis: Vec3,
    radius: f32,
    half_height: f32,
    material: Arc<Material>,
    bbox: Aabb,
}

impl Cylinder {
    /// Create a new cylinder. `axis` need not be normalized; `height` is the
    /// half-height.
    pub fn new(
        center: Vec3,
        axis: Vec3,
        radius: f32,
        height: f32,
        material: Arc<Material>,
    ) -> Self {
        let axis = axis.normalize_or_zero();
        let radius = radius.max(0.0);
        let half_height = height.max(0.0);

        let base = center - half_height * axis;
        let top = center + half_height * axis;

        // A cap disk perpendicular to `axis` extends r * sqrt(1 - axis_i^2)
        // along world axis i
        let spread = |a: f32| (1.0 - a * a).max(0.0).sqrt();
        let extent = radius * Vec3::new(spread(axis.x), spread(axis.y), spread(axis.z));
        let bbox = Aabb::from_points(base.min(top) - extent, base.max(top) + extent);

        Self {
            center,
            axis,
            radius,
            half_height,
            material,
            bbox,
        }
    }

    fn base(&self) -> Vec3 {
        self.center - self.half_height * self.axis
    }

    /// Nearest lateral-surface hit inside `ray_t`, as `(t, outward normal)`.
    fn hit_side(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, Vec3)> {
        let base = self.base();
        let oc = ray.origin() - base;

        // Components perpendicular to the axis
        let d = ray.direction() - self.axis * self.axis.dot(ray.direction());
        let v = oc - self.axis * self.axis.dot(oc);

        let a = d.length_squared();
        // Ray runs parallel to the axis: only the caps can be hit
        if a < EPSILON {
            return None;
        }

        let half_b = v.dot(d);
        let c = v.length_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let length = 2.0 * self.half_height;

        // Roots in increasing order, so the first accepted one is nearest
        for t in [(-half_b - sqrtd) / a, (-half_b + sqrtd) / a] {
            if !ray_t.contains(t) {
                continue;
            }
            let rel = ray.at(t) - base;
            let projection = rel.dot(self.axis);
            if (0.0..=length).contains(&projection) {
                let normal = (rel - self.axis * projection).normalize_or_zero();
                return Some((t, normal));
            }
        }
        None
    }

    /// Hit on one end-cap disk inside `ray_t`, as `(t, outward normal)`.
    fn hit_cap(
        &self,
        ray: &Ray,
        ray_t: Interval,
        cap_center: Vec3,
        outward: Vec3,
    ) -> Option<(f32, Vec3)> {
        let denom = ray.direction().dot(self.axis);
        if denom.abs() < EPSILON {
            return None;
        }

        let t = (cap_center - ray.origin()).dot(self.axis) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        let dist_sq = (ray.at(t) - cap_center).length_squared();
        if dist_sq <= self.radius * self.radius {
            Some((t, outward))
        } else {
            None
        }
    }
}

impl Hittable for Cylinder {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let base = self.base();
        let top = self.center + self.half_height * self.axis;

        let mut closest: Option<(f32, Vec3)> = None;
        let mut window = ray_t;

        let candidates = [
            self.hit_side(ray, window),
            self.hit_cap(ray, window, base, -self.axis),
            self.hit_cap(ray, window, top, self.axis),
        ];
        for (t, normal) in candidates.into_iter().flatten() {
            if window.contains(t) {
                window = window.with_max(t);
                closest = Some((t, normal));
            }
        }

        closest.map(|(t, normal)| HitRecord::new(ray, t, normal, &self.material))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upright() -> Cylinder {
        // Radius 1, spans y in [-2, 2]
        Cylinder::new(
            Vec3::ZERO,
            Vec3::new(0.0, 3.0, 0.0),
            1.0,
            2.0,
            Arc::new(Material::diffuse(Vec3::splat(0.5))),
        )
    }

    fn hit(cyl: &Cylinder, origin: Vec3, direction: Vec3) -> Option<HitRecord<'_>> {
        cyl.hit(&Ray::new(origin, direction), Interval::new(0.001, f32::INFINITY))
    }

    #[test]
    fn test_side_hit() {
        let cyl = upright();
        let rec = hit(&cyl, Vec3::new(-5.0, 0.5, 0.0), Vec3::X).unwrap();

        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-5);
        assert!(rec.front_face);
    }

    #[test]
    fn test_cap_hit() {
        let cyl = upright();
        let rec = hit(&cyl, Vec3::new(0.3, 10.0, 0.2), Vec3::NEG_Y).unwrap();

        assert!((rec.t - 8.0).abs() < 1e-5);
        assert_eq!(rec.normal, Vec3::Y);

        let rec = hit(&cyl, Vec3::new(0.3, -10.0, 0.2), Vec3::Y).unwrap();
        assert!((rec.t - 8.0).abs() < 1e-5);
        assert_eq!(rec.normal, Vec3::NEG_Y);
    }

    #[test]
    fn test_side_beyond_caps_misses() {
        let cyl = upright();
        assert!(hit(&cyl, Vec3::new(-5.0, 2.5, 0.0), Vec3::X).is_none());
        // Parallel to the axis but outside the radius
        assert!(hit(&cyl, Vec3::new(3.0, 10.0, 0.0), Vec3::NEG_Y).is_none());
    }

    #[test]
    fn test_nearest_of_cap_and_side() {
        let cyl = upright();

        // Diagonal ray entering through the top cap and leaving through the
        // side: the cap is nearer and must win
        let origin = Vec3::new(0.0, 3.0, 0.0);
        let direction = Vec3::new(0.5, -1.0, 0.0);
        let rec = hit(&cyl, origin, direction).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert_eq!(rec.normal, Vec3::Y);

        // Starting inside, the exit through the side is reported
        let rec = hit(&cyl, Vec3::ZERO, Vec3::X).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_tilted_bbox_encloses_surface() {
        let axis = Vec3::new(1.0, 1.0, 0.0).normalize();
        let cyl = Cylinder::new(
            Vec3::new(1.0, 2.0, 3.0),
            axis,
            0.5,
            1.5,
            Arc::new(Material::diffuse(Vec3::ONE)),
        );
        let bbox = cyl.bounding_box();

        // Points on both cap rims and the middle of the side
        let ortho_a = Vec3::new(1.0, -1.0, 0.0).normalize();
        let ortho_b = Vec3::Z;
        for h in [-1.5, 0.0, 1.5] {
            for k in 0..16 {
                let angle = k as f32 * std::f32::consts::TAU / 16.0;
                let p = Vec3::new(1.0, 2.0, 3.0)
                    + h * axis
                    + 0.5 * (angle.cos() * ortho_a + angle.sin() * ortho_b);
                for i in 0..3 {
                    let slab = bbox.axis_interval(i);
                    assert!(p[i] >= slab.min - 1e-5 && p[i] <= slab.max + 1e-5);
                }
            }
        }
    }
}
