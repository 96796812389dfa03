//! Camera for ray generation.

use crate::Ray;
use glint_core::CameraDesc;
use glint_math::sampling::random_in_unit_disk;
use glint_math::Vec3;
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// Configure with the builder methods, then call [`Camera::initialize`]
/// before generating rays.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,       // Vertical field of view in degrees
    aperture: f32,   // Lens diameter, 0 for a pinhole
    focus_dist: f32, // Distance from camera to plane of perfect focus

    // Cached computed values (set by initialize())
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 800,
            image_height: 450,
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
            // Cached values (initialized to defaults)
            origin: Vec3::ZERO,
            lower_left_corner: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            lens_radius: 0.0,
        }
    }

    /// Set image resolution. The viewport takes its aspect ratio from it.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.origin = self.look_from;
        self.lens_radius = self.aperture.max(0.0) / 2.0;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * self.aspect_ratio();

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize_or_zero();
        self.u = self
            .vup
            .cross(self.w)
            .try_normalize()
            .unwrap_or_else(|| self.w.any_orthonormal_vector());
        self.v = self.w.cross(self.u);

        // Viewport spans the focal plane
        self.horizontal = self.focus_dist * viewport_width * self.u;
        self.vertical = self.focus_dist * viewport_height * self.v;
        self.lower_left_corner =
            self.origin - self.horizontal / 2.0 - self.vertical / 2.0 - self.focus_dist * self.w;
    }

    /// Generate the ray through normalized image-plane coordinates.
    ///
    /// `s` runs left to right and `t` bottom to top, both over `[0, 1]`.
    /// With a non-zero aperture the origin is jittered across the lens and
    /// the direction corrected so the ray still meets the same point on
    /// the focal plane.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let ray_origin = self.origin + offset;
        let focal_point = self.lower_left_corner + s * self.horizontal + t * self.vertical;

        Ray::new(ray_origin, focal_point - ray_origin)
    }

    /// Width over height of the image.
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height.max(1) as f32
    }

    pub fn look_from(&self) -> Vec3 {
        self.look_from
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&CameraDesc> for Camera {
    /// Builds an initialized camera from a scene file's camera section.
    fn from(desc: &CameraDesc) -> Self {
        let mut camera = Camera::new()
            .with_resolution(desc.width, desc.height)
            .with_position(
                Vec3::from_array(desc.position),
                Vec3::from_array(desc.look_at),
                Vec3::from_array(desc.up),
            )
            .with_lens(desc.fov, desc.aperture, desc.focus_dist);
        camera.initialize();
        camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pinhole(width: u32, height: u32) -> Camera {
        let mut camera = Camera::new()
            .with_resolution(width, height)
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        camera.initialize();
        camera
    }

    #[test]
    fn test_camera_initialize() {
        let camera = pinhole(800, 600);

        assert_eq!(camera.origin, Vec3::new(0.0, 0.0, 5.0));
        assert!((camera.w - Vec3::Z).length() < 0.001);
        assert!((camera.u - Vec3::X).length() < 0.001);
        assert!((camera.v - Vec3::Y).length() < 0.001);
        // 90 degree fov: the viewport one unit away is two units tall
        assert!((camera.vertical.length() - 2.0).abs() < 1e-5);
        assert!((camera.horizontal.length() - 2.0 * 800.0 / 600.0).abs() < 1e-5);
    }

    #[test]
    fn test_center_ray_hits_look_at() {
        let camera = pinhole(100, 100);
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::new(0.0, 0.0, 5.0));
        assert!((ray.direction().normalize() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_image_orientation() {
        let camera = pinhole(100, 100);
        let mut rng = StdRng::seed_from_u64(1);

        // s grows to the right, t grows upwards
        let top_right = camera.get_ray(1.0, 1.0, &mut rng).direction();
        assert!(top_right.x > 0.0 && top_right.y > 0.0);
        let bottom_left = camera.get_ray(0.0, 0.0, &mut rng).direction();
        assert!(bottom_left.x < 0.0 && bottom_left.y < 0.0);
    }

    #[test]
    fn test_aperture_keeps_focal_point() {
        let mut camera = Camera::new()
            .with_resolution(64, 64)
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .with_lens(40.0, 0.5, 5.0);
        camera.initialize();
        assert_eq!(camera.lens_radius(), 0.25);

        let mut rng = StdRng::seed_from_u64(9);
        let mut origins = Vec::new();
        for _ in 0..32 {
            let ray = camera.get_ray(0.3, 0.7, &mut rng);
            let offset = ray.origin() - camera.look_from();
            assert!(offset.length() <= 0.25 + 1e-6);
            assert!(offset.z.abs() < 1e-6);
            origins.push(ray.origin());

            // Every ray reaches the focal plane z = 0 at the same spot
            let focal = ray.at(1.0);
            let reference = camera.lower_left_corner
                + 0.3 * camera.horizontal
                + 0.7 * camera.vertical;
            assert!((focal - reference).length() < 1e-4);
        }
        assert!(origins.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_up_parallel_to_view() {
        let mut camera = Camera::new()
            .with_resolution(10, 10)
            .with_position(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::Y)
            .with_lens(60.0, 0.0, 1.0);
        camera.initialize();

        let mut rng = StdRng::seed_from_u64(0);
        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert!(ray.direction().is_finite());
        assert!((ray.direction().normalize() - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn test_from_description() {
        let desc = CameraDesc {
            width: 32,
            height: 16,
            position: [0.0, 0.0, 5.0],
            look_at: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov: 45.0,
            exposure: 1.0,
            aperture: 0.0,
            focus_dist: 1.0,
        };
        let camera = Camera::from(&desc);
        assert_eq!(camera.aspect_ratio(), 2.0);

        let mut rng = StdRng::seed_from_u64(0);
        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert!((ray.direction().normalize() - Vec3::NEG_Z).length() < 1e-5);
    }
}
