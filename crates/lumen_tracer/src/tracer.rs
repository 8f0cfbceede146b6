//! Whitted-style recursive shading.
//!
//! Implements:
//! - Closest-hit resolution against the scene geometry
//! - Phong direct lighting attenuated by shadow/transparency sampling
//! - Recursive reflection and refraction bounded by depth and energy

use crate::{Color, GeoPoint, Intersectable, Material, Ray, RenderSettings, Scene, ShadowSampler};
use lumen_math::{align_zero, is_zero, DVec3};

/// Shades rays against a read-only scene.
///
/// Holds only shared references, so one tracer can be used from every
/// render thread at once.
pub struct RayTracer<'a> {
    scene: &'a Scene,
    max_depth: u32,
    min_contribution: f64,
    shadows: ShadowSampler<'a>,
}

impl<'a> RayTracer<'a> {
    pub fn new(scene: &'a Scene, settings: &RenderSettings) -> Self {
        Self {
            scene,
            max_depth: settings.max_depth,
            min_contribution: settings.min_contribution,
            shadows: ShadowSampler::new(&scene.geometries, settings),
        }
    }

    /// Find the intersection closest to the ray's origin, if any.
    pub fn closest_hit(&self, ray: &Ray) -> Option<GeoPoint<'a>> {
        let origin = ray.origin();
        self.scene
            .geometries
            .find_intersections(ray)
            .into_iter()
            .min_by(|a, b| {
                origin
                    .distance_squared(a.point)
                    .total_cmp(&origin.distance_squared(b.point))
            })
    }

    /// Color seen along `ray`: the shaded closest hit, or the background
    /// if the ray hits nothing. Ambient light is not included.
    pub fn trace(&self, ray: &Ray) -> Color {
        match self.closest_hit(ray) {
            Some(hit) => self.shade(&hit, ray),
            None => self.scene.background,
        }
    }

    /// Shade a hit with the full recursion budget and energy.
    pub fn shade(&self, hit: &GeoPoint, ray: &Ray) -> Color {
        self.shade_recursive(hit, ray, self.max_depth, 1.0)
    }

    fn shade_recursive(&self, hit: &GeoPoint, ray: &Ray, depth: u32, energy: f64) -> Color {
        if depth <= 1 {
            return Color::ZERO;
        }

        let point = hit.point;
        let geometry = hit.geometry;
        let material = geometry.material();
        let v = (point - self.scene.camera.position()).normalize();
        let n = geometry.normal(point);

        let mut color = geometry.emission() + self.direct_light(point, material, v, n, energy);

        let kkr = energy * material.kr;
        if kkr > self.min_contribution {
            let reflected = reflected_ray(point, ray, n);
            color += self.secondary_color(reflected, depth, material.kr, kkr);
        }

        let kkt = energy * material.kt;
        if kkt > self.min_contribution {
            let refracted = refracted_ray(point, ray, n);
            color += self.secondary_color(refracted, depth, material.kt, kkt);
        }

        color
    }

    /// Diffuse and specular light from every source visible from `point`.
    fn direct_light(&self, point: DVec3, material: &Material, v: DVec3, n: DVec3, energy: f64) -> Color {
        let nv = align_zero(n.dot(v));
        let mut color = Color::ZERO;

        for light in &self.scene.lights {
            let l = light.direction_to(point);
            let nl = align_zero(n.dot(l));
            // Light and viewer on opposite sides of the surface
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.shadows.shadow_factor(light.as_ref(), l, n, point);
            if ktr * energy <= self.min_contribution {
                continue;
            }

            let intensity = light.intensity_at(point) * ktr;
            color += diffuse(material.kd, nl, intensity)
                + specular(material.ks, l, n, nl, v, material.shininess, intensity);
        }

        color
    }

    /// Contribution of a reflected or refracted ray, scaled by `k`.
    fn secondary_color(&self, ray: Option<Ray>, depth: u32, k: f64, energy: f64) -> Color {
        ray.and_then(|ray| {
            self.closest_hit(&ray)
                .map(|hit| self.shade_recursive(&hit, &ray, depth - 1, energy) * k)
        })
        .unwrap_or(Color::ZERO)
    }
}

/// Diffuse term: `kd * |n.l| * intensity`.
fn diffuse(kd: f64, nl: f64, intensity: Color) -> Color {
    intensity * (nl.abs() * kd)
}

/// Phong specular term: `ks * max(0, -v.r)^shininess * intensity`, where
/// `r` is `l` mirrored about `n`.
///
/// Panics if `nl` is zero; callers filter out lights tangent to the surface.
fn specular(ks: f64, l: DVec3, n: DVec3, nl: f64, v: DVec3, shininess: i32, intensity: Color) -> Color {
    assert!(!is_zero(nl), "specular term requires a non-zero n.l");

    let r = l - n * (2.0 * nl);
    let vr = align_zero(v.dot(r));
    // Viewer is not on the reflected side
    if vr >= 0.0 {
        return Color::ZERO;
    }
    intensity * (ks * (-vr).powi(shininess))
}

/// Mirror `ray` about `n` at `point`: `r = v - 2(v.n)n`.
///
/// Returns `None` when the ray grazes the surface.
fn reflected_ray(point: DVec3, ray: &Ray, n: DVec3) -> Option<Ray> {
    let v = ray.direction();
    let vn = v.dot(n);
    if is_zero(vn) {
        return None;
    }
    Some(Ray::with_normal(point, v - n * (2.0 * vn), n))
}

/// Continue `ray` straight through the surface at `point`.
///
/// Transmission does not bend the ray. Returns `None` when the ray grazes
/// the surface.
fn refracted_ray(point: DVec3, ray: &Ray, n: DVec3) -> Option<Ray> {
    let v = ray.direction();
    if is_zero(v.dot(n)) {
        return None;
    }
    Some(Ray::with_normal(point, v, n))
}
