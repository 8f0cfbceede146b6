//! Sphere primitive for ray tracing.

use crate::{
    geometry::{GeoPoint, Geometry, Intersectable},
    Color, Material, Ray,
};
use lumen_math::{align_zero, DVec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    emission: Color,
    material: Material,
}

impl Sphere {
    /// Create a new black, matte sphere.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
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

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersectable for Sphere {
    fn find_intersections(&self, ray: &Ray) -> Vec<GeoPoint<'_>> {
        // Direction is unit length, so a == 1
        let oc = self.center - ray.origin();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = align_zero(h * h - c);
        // A tangent ray grazes the sphere; treat it as a miss
        if discriminant <= 0.0 {
            return Vec::new();
        }

        let sqrtd = discriminant.sqrt();
        [h - sqrtd, h + sqrtd]
            .into_iter()
            .filter(|&t| align_zero(t) > 0.0)
            .map(|t| GeoPoint::new(ray.at(t), self))
            .collect()
    }
}

impl Geometry for Sphere {
    fn emission(&self) -> Color {
        self.emission
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn normal(&self, point: DVec3) -> DVec3 {
        (point - self.center).normalize()
    }
}
