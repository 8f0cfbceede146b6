//! Pinhole camera for primary ray generation.

use crate::{RenderError, RenderResult, Ray};
use lumen_math::{is_zero, DVec3};
use rand::{Rng, RngCore};

/// The viewport the camera shoots through: a `width` x `height` rectangle
/// centered `distance` units in front of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPlane {
    pub distance: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewPlane {
    pub fn new(distance: f64, width: f64, height: f64) -> Self {
        Self { distance, width, height }
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    position: DVec3,
    to: DVec3,
    up: DVec3,
    right: DVec3,
}

impl Camera {
    /// Create a camera at `position` looking along `to`, with `up` as the
    /// image's vertical axis. Both vectors are normalized and must be
    /// orthogonal.
    pub fn new(position: DVec3, to: DVec3, up: DVec3) -> RenderResult<Self> {
        let to = to.try_normalize().ok_or(RenderError::ZeroVector)?;
        let up = up.try_normalize().ok_or(RenderError::ZeroVector)?;
        if !is_zero(to.dot(up)) {
            return Err(RenderError::CameraAxesNotOrthogonal);
        }

        Ok(Self {
            position,
            to,
            up,
            right: to.cross(up),
        })
    }

    /// Get the camera position.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Center of pixel (col, row) on the view plane.
    fn pixel_center(&self, plane: &ViewPlane, nx: u32, ny: u32, col: u32, row: u32) -> DVec3 {
        let center = self.position + self.to * plane.distance;
        let rx = plane.width / nx as f64;
        let ry = plane.height / ny as f64;

        let xj = (col as f64 - (nx as f64 - 1.0) / 2.0) * rx;
        let yi = (row as f64 - (ny as f64 - 1.0) / 2.0) * ry;

        let mut p = center;
        if !is_zero(xj) {
            p += self.right * xj;
        }
        if !is_zero(yi) {
            p -= self.up * yi;
        }
        p
    }

    /// Generate the ray through the center of pixel (col, row) of an
    /// `nx` x `ny` image.
    pub fn construct_ray(&self, plane: &ViewPlane, nx: u32, ny: u32, col: u32, row: u32) -> Ray {
        let p = self.pixel_center(plane, nx, ny, col, row);
        Ray::new(self.position, p - self.position)
    }

    /// Generate a beam of `count` rays through pixel (col, row).
    ///
    /// The first ray goes through the pixel center; the rest go through
    /// random points of the pixel area shrunk by `density` (1.0 covers the
    /// whole pixel).
    #[allow(clippy::too_many_arguments)]
    pub fn construct_ray_beam(
        &self,
        plane: &ViewPlane,
        nx: u32,
        ny: u32,
        col: u32,
        row: u32,
        density: f64,
        count: u32,
        rng: &mut dyn RngCore,
    ) -> Vec<Ray> {
        let center = self.pixel_center(plane, nx, ny, col, row);
        let mut rays = Vec::with_capacity(count.max(1) as usize);
        rays.push(Ray::new(self.position, center - self.position));

        let half_w = plane.width / nx as f64 * density / 2.0;
        let half_h = plane.height / ny as f64 * density / 2.0;
        if is_zero(half_w) || is_zero(half_h) {
            return rays;
        }

        for _ in 1..count {
            let dx = rng.gen_range(-half_w..half_w);
            let dy = rng.gen_range(-half_h..half_h);
            let p = center + self.right * dx - self.up * dy;
            rays.push(Ray::new(self.position, p - self.position));
        }

        rays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn camera() -> Camera {
        Camera::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0), DVec3::Y).unwrap()
    }

    #[test]
    fn test_camera_rejects_non_orthogonal_axes() {
        let result = Camera::new(DVec3::ZERO, DVec3::new(0.0, 1.0, -1.0), DVec3::Y);
        assert!(matches!(result, Err(RenderError::CameraAxesNotOrthogonal)));

        let result = Camera::new(DVec3::ZERO, DVec3::ZERO, DVec3::Y);
        assert!(matches!(result, Err(RenderError::ZeroVector)));
    }

    #[test]
    fn test_center_ray_of_odd_grid() {
        let plane = ViewPlane::new(1.0, 3.0, 3.0);
        let ray = camera().construct_ray(&plane, 3, 3, 1, 1);

        assert_eq!(ray.origin(), DVec3::ZERO);
        assert!((ray.direction() - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_corner_ray_of_grid() {
        let plane = ViewPlane::new(10.0, 6.0, 6.0);
        // Top-left pixel of a 3x3 grid: center at (-2, 2, -10)
        let ray = camera().construct_ray(&plane, 3, 3, 0, 0);
        let expected = DVec3::new(-2.0, 2.0, -10.0).normalize();

        assert!((ray.direction() - expected).length() < 1e-12);
    }

    #[test]
    fn test_ray_beam_stays_inside_pixel() {
        let plane = ViewPlane::new(1.0, 2.0, 2.0);
        let cam = camera();
        let mut rng = StdRng::seed_from_u64(42);

        let beam = cam.construct_ray_beam(&plane, 2, 2, 1, 0, 1.0, 17, &mut rng);
        assert_eq!(beam.len(), 17);
        assert_eq!(beam[0], cam.construct_ray(&plane, 2, 2, 1, 0));

        // Pixel (1, 0) spans x in [0, 1], y in [0, 1] on the plane z = -1
        for ray in &beam {
            let hit = ray.at(1.0 / -ray.direction().z);
            assert!(hit.x >= 0.0 && hit.x <= 1.0, "x = {}", hit.x);
            assert!(hit.y >= 0.0 && hit.y <= 1.0, "y = {}", hit.y);
        }
    }

    #[test]
    fn test_zero_density_beam_is_single_ray() {
        let plane = ViewPlane::new(1.0, 2.0, 2.0);
        let mut rng = StdRng::seed_from_u64(7);

        let beam = camera().construct_ray_beam(&plane, 4, 4, 2, 2, 0.0, 10, &mut rng);
        assert_eq!(beam.len(), 1);
    }
}
