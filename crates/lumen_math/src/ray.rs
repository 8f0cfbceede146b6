use crate::DVec3;

/// Distance a secondary ray's origin is pushed off the surface it starts on.
pub const DELTA: f64 = 0.1;

/// A ray in 3D space with an origin and a unit-length direction.
///
/// Rays are immutable once built; every constructor normalizes the
/// direction so shading code can rely on `|direction| == 1`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: DVec3,
    direction: DVec3,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    ///
    /// The direction must be non-zero.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray leaving a surface point, with the origin moved by
    /// [`DELTA`] along `normal` towards the side `direction` points to.
    ///
    /// This keeps a reflected, refracted or shadow ray from hitting the
    /// surface it was spawned from.
    pub fn with_normal(point: DVec3, direction: DVec3, normal: DVec3) -> Self {
        let direction = direction.normalize();
        let nv = direction.dot(normal);
        let offset = if nv > 0.0 { normal * DELTA } else { -normal * DELTA };
        Self {
            origin: point + offset,
            direction,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the unit direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}
