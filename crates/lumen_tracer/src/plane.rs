//! Infinite plane primitive.

use crate::{
    geometry::{GeoPoint, Geometry, Intersectable},
    Color, Material, Ray,
};
use lumen_math::{align_zero, is_zero, DVec3};

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    point: DVec3,
    normal: DVec3,
    emission: Color,
    material: Material,
}

impl Plane {
    /// Create a new black, matte plane. The normal is normalized.
    pub fn new(point: DVec3, normal: DVec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            emission: Color::ZERO,
            material: Material::default(),
        }
    }

    /// Set the emission color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    /// Set the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}

impl Intersectable for Plane {
    fn find_intersections(&self, ray: &Ray) -> Vec<GeoPoint<'_>> {
        let denom = self.normal.dot(ray.direction());
        // Parallel to the plane
        if is_zero(denom) {
            return Vec::new();
        }

        let t = align_zero(self.normal.dot(self.point - ray.origin()) / denom);
        if t <= 0.0 {
            return Vec::new();
        }

        vec![GeoPoint::new(ray.at(t), self)]
    }
}

impl Geometry for Plane {
    fn emission(&self) -> Color {
        self.emission
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn normal(&self, _point: DVec3) -> DVec3 {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_hit() {
        let plane = Plane::new(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 0.0, -2.0));
        let ray = Ray::new(DVec3::new(1.0, 1.0, 0.0), DVec3::Z);

        let hits = plane.find_intersections(&ray);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].point - DVec3::new(1.0, 1.0, 5.0)).length() < 1e-12);
        assert_eq!(plane.normal(hits[0].point), DVec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_plane_parallel_and_behind() {
        let plane = Plane::new(DVec3::ZERO, DVec3::Y);

        let parallel = Ray::new(DVec3::new(0.0, 1.0, 0.0), DVec3::X);
        assert!(plane.find_intersections(&parallel).is_empty());

        let away = Ray::new(DVec3::new(0.0, 1.0, 0.0), DVec3::Y);
        assert!(plane.find_intersections(&away).is_empty());
    }
}
