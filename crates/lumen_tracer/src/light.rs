//! Light sources.
//!
//! Shading is written once against [`LightSource`]; each light type
//! supplies its own intensity falloff, direction and distance.

use crate::Color;
use lumen_math::DVec3;

/// Common capabilities of every light that can illuminate a point.
pub trait LightSource: Send + Sync {
    /// Intensity of the light as it reaches `point`.
    fn intensity_at(&self, point: DVec3) -> Color;

    /// Unit vector pointing from the light towards `point`.
    fn direction_to(&self, point: DVec3) -> DVec3;

    /// Distance from `point` to the light. Infinite for lights with no
    /// position.
    fn distance_to(&self, point: DVec3) -> f64;
}

/// Uniform light added to every pixel once, after shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// Create an ambient light of `color` scaled by the ambient factor `ka`.
    pub fn new(color: Color, ka: f64) -> Self {
        Self { intensity: color * ka }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self { intensity: Color::ZERO }
    }
}

/// A light infinitely far away, shining along a fixed direction.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    intensity: Color,
    direction: DVec3,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: DVec3) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: DVec3) -> Color {
        self.intensity
    }

    fn direction_to(&self, _point: DVec3) -> DVec3 {
        self.direction
    }

    fn distance_to(&self, _point: DVec3) -> f64 {
        f64::INFINITY
    }
}

/// A point light with constant, linear and quadratic attenuation.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    intensity: Color,
    position: DVec3,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// Create a point light with no distance attenuation.
    pub fn new(intensity: Color, position: DVec3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    /// Set the attenuation factors: intensity is divided by
    /// `kc + kl * d + kq * d^2`.
    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> Self {
        self.kc = kc;
        self.kl = kl;
        self.kq = kq;
        self
    }

    fn attenuation(&self, point: DVec3) -> f64 {
        let d = self.position.distance(point);
        self.kc + self.kl * d + self.kq * d * d
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: DVec3) -> Color {
        self.intensity / self.attenuation(point)
    }

    fn direction_to(&self, point: DVec3) -> DVec3 {
        (point - self.position).normalize()
    }

    fn distance_to(&self, point: DVec3) -> f64 {
        self.position.distance(point)
    }
}

/// A point light whose intensity falls off away from its axis.
#[derive(Debug, Clone, Copy)]
pub struct SpotLight {
    point: PointLight,
    axis: DVec3,
}

impl SpotLight {
    pub fn new(intensity: Color, position: DVec3, axis: DVec3) -> Self {
        Self {
            point: PointLight::new(intensity, position),
            axis: axis.normalize(),
        }
    }

    /// Set the attenuation factors, as for [`PointLight::with_attenuation`].
    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> Self {
        self.point = self.point.with_attenuation(kc, kl, kq);
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: DVec3) -> Color {
        let cos = self.axis.dot(self.point.direction_to(point)).max(0.0);
        self.point.intensity_at(point) * cos
    }

    fn direction_to(&self, point: DVec3) -> DVec3 {
        self.point.direction_to(point)
    }

    fn distance_to(&self, point: DVec3) -> f64 {
        self.point.distance_to(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_scales_color() {
        let ambient = AmbientLight::new(Color::new(1.0, 0.5, 0.0), 0.2);
        assert!((ambient.intensity() - Color::new(0.2, 0.1, 0.0)).length() < 1e-12);
        assert_eq!(AmbientLight::default().intensity(), Color::ZERO);
    }

    #[test]
    fn test_directional_light() {
        let light = DirectionalLight::new(Color::ONE, DVec3::new(0.0, -2.0, 0.0));
        let p = DVec3::new(3.0, 4.0, 5.0);

        assert_eq!(light.direction_to(p), DVec3::new(0.0, -1.0, 0.0));
        assert_eq!(light.intensity_at(p), Color::ONE);
        assert!(light.distance_to(p).is_infinite());
    }

    #[test]
    fn test_point_light_attenuation() {
        let light = PointLight::new(Color::splat(10.0), DVec3::new(0.0, 0.0, 2.0))
            .with_attenuation(1.0, 0.5, 0.25);
        let p = DVec3::ZERO;

        // 1 + 0.5 * 2 + 0.25 * 4 = 3
        assert!((light.intensity_at(p) - Color::splat(10.0 / 3.0)).length() < 1e-12);
        assert_eq!(light.direction_to(p), DVec3::new(0.0, 0.0, -1.0));
        assert_eq!(light.distance_to(p), 2.0);
    }

    #[test]
    fn test_spot_light_falls_off_off_axis() {
        let spot = SpotLight::new(Color::ONE, DVec3::new(0.0, 0.0, 1.0), DVec3::new(0.0, 0.0, -1.0));

        let on_axis = spot.intensity_at(DVec3::ZERO);
        assert!((on_axis - Color::ONE).length() < 1e-12);

        // Behind the spot: no light at all
        let behind = spot.intensity_at(DVec3::new(0.0, 0.0, 5.0));
        assert_eq!(behind, Color::ZERO);

        let off_axis = spot.intensity_at(DVec3::new(1.0, 0.0, 0.0));
        assert!(off_axis.x < on_axis.x && off_axis.x > 0.0);
    }
}
