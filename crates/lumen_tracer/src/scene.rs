//! Scene description consumed by the renderer.
//!
//! A scene is assembled up front and then only read while rendering;
//! worker threads share it by reference.

use crate::{AmbientLight, Camera, Color, Geometries, Geometry, LightSource, ViewPlane};

/// Everything the tracer needs to shade an image.
pub struct Scene {
    /// Scene name, used in log output
    pub name: String,
    pub camera: Camera,
    pub view_plane: ViewPlane,
    /// Color of rays that hit nothing
    pub background: Color,
    pub ambient: AmbientLight,
    pub geometries: Geometries,
    pub lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>, camera: Camera, view_plane: ViewPlane) -> Self {
        Self {
            name: name.into(),
            camera,
            view_plane,
            background: Color::ZERO,
            ambient: AmbientLight::default(),
            geometries: Geometries::new(),
            lights: Vec::new(),
        }
    }

    /// Set background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set ambient light.
    pub fn with_ambient(mut self, ambient: AmbientLight) -> Self {
        self.ambient = ambient;
        self
    }

    /// Add a geometry.
    pub fn with_geometry(mut self, geometry: impl Geometry + 'static) -> Self {
        self.geometries.add(Box::new(geometry));
        self
    }

    /// Add a light source.
    pub fn with_light(mut self, light: impl LightSource + 'static) -> Self {
        self.lights.push(Box::new(light));
        self
    }

    /// Get the number of light sources.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PointLight, Sphere};
    use lumen_math::DVec3;

    #[test]
    fn test_scene_builder() {
        let camera = Camera::new(DVec3::ZERO, DVec3::Z, DVec3::Y).unwrap();
        let scene = Scene::new("test", camera, ViewPlane::new(1.0, 1.0, 1.0))
            .with_background(Color::new(0.1, 0.2, 0.3))
            .with_ambient(AmbientLight::new(Color::ONE, 0.1))
            .with_geometry(Sphere::new(DVec3::new(0.0, 0.0, 5.0), 1.0))
            .with_light(PointLight::new(Color::ONE, DVec3::new(0.0, 5.0, 0.0)));

        assert_eq!(scene.name, "test");
        assert_eq!(scene.background, Color::new(0.1, 0.2, 0.3));
        assert_eq!(scene.geometries.len(), 1);
        assert_eq!(scene.light_count(), 1);
    }
}
