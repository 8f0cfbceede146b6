//! Intersectable trait, GeoPoint and the scene's geometry collection.

use crate::{Color, Material, Ray};
use lumen_math::DVec3;

/// A point on a surface together with the geometry it lies on.
///
/// The geometry is borrowed from the scene, which is immutable for the
/// whole render, so the reference stays valid as long as the scene does.
#[derive(Clone, Copy)]
pub struct GeoPoint<'a> {
    /// Point of intersection
    pub point: DVec3,
    /// Geometry the point lies on
    pub geometry: &'a dyn Geometry,
}

impl<'a> GeoPoint<'a> {
    pub fn new(point: DVec3, geometry: &'a dyn Geometry) -> Self {
        Self { point, geometry }
    }
}

impl std::fmt::Debug for GeoPoint<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoPoint")
            .field("point", &self.point)
            .finish_non_exhaustive()
    }
}

/// Trait for anything a ray can be intersected with.
pub trait Intersectable: Send + Sync {
    /// Find every point where `ray` crosses this object in front of the
    /// ray's origin. An empty list means the ray misses.
    fn find_intersections(&self, ray: &Ray) -> Vec<GeoPoint<'_>>;
}

/// A renderable surface: intersectable, with emission and material.
pub trait Geometry: Intersectable {
    /// Light emitted by the surface itself.
    fn emission(&self) -> Color;

    /// Shading coefficients of the surface.
    fn material(&self) -> &Material;

    /// Outward unit normal at a point on the surface.
    fn normal(&self, point: DVec3) -> DVec3;
}

/// The scene's collection of geometries.
#[derive(Default)]
pub struct Geometries {
    objects: Vec<Box<dyn Geometry>>,
}

impl Geometries {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Add a geometry to the collection.
    pub fn add(&mut self, geometry: Box<dyn Geometry>) {
        self.objects.push(geometry);
    }

    /// Get the number of geometries.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Intersectable for Geometries {
    fn find_intersections(&self, ray: &Ray) -> Vec<GeoPoint<'_>> {
        self.objects
            .iter()
            .flat_map(|object| object.find_intersections(ray))
            .collect()
    }
}
