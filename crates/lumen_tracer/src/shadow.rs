//! Shadow and transparency sampling towards a light.
//!
//! A point is shadowed by every surface between it and the light; each
//! such surface lets through its `kt` share of the light. With soft
//! shadows enabled the factor is averaged over extra rays aimed through
//! a small disk around the light direction, which blurs shadow edges.

use crate::{Geometries, Intersectable, LightSource, Ray, RenderSettings, SoftShadows};
use lumen_math::{align_zero, is_zero, DVec3};
use rand::{Rng, RngCore};

/// Rejection sampling gives up after this many tries per requested ray.
const MAX_ATTEMPTS_PER_RAY: usize = 16;

/// Computes how much of a light reaches a surface point.
pub struct ShadowSampler<'a> {
    geometries: &'a Geometries,
    min_contribution: f64,
    soft: SoftShadows,
}

impl<'a> ShadowSampler<'a> {
    pub fn new(geometries: &'a Geometries, settings: &RenderSettings) -> Self {
        Self {
            geometries,
            min_contribution: settings.min_contribution,
            soft: settings.soft_shadows,
        }
    }

    /// Fraction in [0, 1] of `light` that reaches `point`.
    ///
    /// `l` is the unit direction from the light to the point and `n` the
    /// surface normal there.
    pub fn shadow_factor(&self, light: &dyn LightSource, l: DVec3, n: DVec3, point: DVec3) -> f64 {
        let hard = Ray::with_normal(point, -l, n);
        let mut rays = vec![hard];
        if self.soft.is_active() {
            rays.extend(self.soft_rays(&hard, n, &mut rand::thread_rng()));
        }

        let total: f64 = rays
            .iter()
            .map(|ray| self.transparency(ray, light, point))
            .sum();
        total / rays.len() as f64
    }

    /// Extra shadow rays from the hard-shadow ray's origin through random
    /// points of a disk centered one unit along its direction.
    ///
    /// Samples that would cross to the other side of the surface are
    /// rejected, so every ray leaves from the lit side.
    fn soft_rays(&self, hard: &Ray, n: DVec3, rng: &mut dyn RngCore) -> Vec<Ray> {
        let v = hard.direction();
        let p0 = hard.origin();
        let (vx, vy) = v.any_orthonormal_pair();
        let center = p0 + v;
        let side = v.dot(n);
        let radius = self.soft.radius.abs();

        let wanted = self.soft.rays as usize;
        let mut rays = Vec::with_capacity(wanted);
        let mut attempts = 0;

        while rays.len() < wanted && attempts < wanted * MAX_ATTEMPTS_PER_RAY {
            attempts += 1;

            let x: f64 = rng.gen_range(-1.0..1.0);
            let y = (1.0 - x * x).sqrt();
            let scale = loop {
                let s = rng.gen_range(-radius..radius);
                if !is_zero(s) {
                    break s;
                }
            };

            let p = center + vx * (x * scale) + vy * (y * scale);
            let direction = (p - p0).normalize();
            if side * direction.dot(n) > 0.0 {
                rays.push(Ray::new(p0, direction));
            }
        }

        if rays.len() < wanted {
            log::debug!("soft shadow sampling produced {} of {} rays", rays.len(), wanted);
        }
        rays
    }

    /// Transparency along a single shadow ray: the product of `kt` of
    /// every surface between `point` and the light.
    fn transparency(&self, ray: &Ray, light: &dyn LightSource, point: DVec3) -> f64 {
        let intersections = self.geometries.find_intersections(ray);
        if intersections.is_empty() {
            return 1.0;
        }

        let light_distance = light.distance_to(point);
        let mut ktr = 1.0;
        for gp in intersections {
            if align_zero(gp.point.distance(point) - light_distance) <= 0.0 {
                ktr *= gp.geometry.material().kt;
                if ktr < self.min_contribution {
                    return 0.0;
                }
            }
        }
        ktr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, DirectionalLight, Material, Plane, PointLight, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn blocker(z: f64, radius: f64, kt: f64) -> Box<Sphere> {
        Box::new(
            Sphere::new(DVec3::new(0.0, 0.0, z), radius)
                .with_material(Material::new().with_kt(kt)),
        )
    }

    /// Shadow factor at the origin of the floor z = 0, lit from (0, 0, 10).
    fn factor(geometries: &Geometries, settings: &RenderSettings) -> f64 {
        let light = PointLight::new(Color::ONE, DVec3::new(0.0, 0.0, 10.0));
        let point = DVec3::ZERO;
        let sampler = ShadowSampler::new(geometries, settings);
        sampler.shadow_factor(&light, light.direction_to(point), DVec3::Z, point)
    }

    #[test]
    fn test_unoccluded_point_is_fully_lit() {
        let geometries = Geometries::new();
        assert_eq!(factor(&geometries, &RenderSettings::default()), 1.0);
    }

    #[test]
    fn test_transparent_occluders_multiply() {
        let mut geometries = Geometries::new();
        geometries.add(blocker(5.0, 1.0, 0.5));
        // Ray crosses the sphere twice: 0.5 * 0.5
        assert!((factor(&geometries, &RenderSettings::default()) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_occluder_beyond_light_ignored() {
        let mut geometries = Geometries::new();
        geometries.add(blocker(20.0, 1.0, 0.0));
        assert_eq!(factor(&geometries, &RenderSettings::default()), 1.0);
    }

    #[test]
    fn test_shadow_monotonic_in_occlusion() {
        let settings = RenderSettings::default();
        let mut geometries = Geometries::new();
        let mut previous = factor(&geometries, &settings);

        for (z, kt) in [(3.0, 0.8), (5.0, 0.5), (7.0, 0.0)] {
            geometries.add(blocker(z, 0.5, kt));
            let current = factor(&geometries, &settings);
            assert!(current < previous, "{current} should be < {previous}");
            assert!((0.0..=1.0).contains(&current));
            previous = current;
        }
        assert_eq!(previous, 0.0);
    }

    #[test]
    fn test_opaque_cutoff_below_min_contribution() {
        let mut geometries = Geometries::new();
        // 0.03^2 = 0.0009 < 0.001
        geometries.add(blocker(5.0, 1.0, 0.03));
        assert_eq!(factor(&geometries, &RenderSettings::default()), 0.0);
    }

    #[test]
    fn test_soft_shadows_without_occluders_is_exactly_one() {
        let geometries = Geometries::new();
        let settings = RenderSettings::default().with_soft_shadows(50, 0.05);
        assert_eq!(factor(&geometries, &settings), 1.0);
    }

    #[test]
    fn test_soft_shadows_fully_blocked() {
        // An opaque ceiling catches every sample ray
        let mut geometries = Geometries::new();
        geometries.add(Box::new(Plane::new(DVec3::new(0.0, 0.0, 5.0), DVec3::Z)));
        let settings = RenderSettings::default().with_soft_shadows(50, 0.05);
        let light = DirectionalLight::new(Color::ONE, DVec3::new(0.0, 0.0, -1.0));
        let sampler = ShadowSampler::new(&geometries, &settings);

        let f = sampler.shadow_factor(&light, DVec3::new(0.0, 0.0, -1.0), DVec3::Z, DVec3::ZERO);
        assert_eq!(f, 0.0);
    }

    #[test]
    fn test_soft_rays_stay_on_lit_side() {
        let geometries = Geometries::new();
        let settings = RenderSettings::default().with_soft_shadows(40, 0.5);
        let sampler = ShadowSampler::new(&geometries, &settings);
        let mut rng = StdRng::seed_from_u64(42);

        let n = DVec3::Z;
        let hard = Ray::with_normal(DVec3::ZERO, DVec3::new(1.0, 0.0, 0.2), n);
        let rays = sampler.soft_rays(&hard, n, &mut rng);

        assert_eq!(rays.len(), 40);
        for ray in &rays {
            assert_eq!(ray.origin(), hard.origin());
            assert!(ray.direction().dot(n) > 0.0);
            // Within the cone subtended by the disk
            assert!(ray.direction().dot(hard.direction()) >= 0.5_f64.atan().cos() - 1e-12);
        }
    }
}
