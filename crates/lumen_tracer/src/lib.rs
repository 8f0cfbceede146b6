//! Lumen - multi-threaded Whitted ray tracer
//!
//! Renders a read-only scene of spheres and planes lit by ambient,
//! directional, point and spot lights. Shading follows the Phong model
//! with recursive reflection and refraction, transparency-aware shadows
//! and optional soft shadows and super-sampling.

mod camera;
mod error;
mod geometry;
mod light;
mod material;
mod pixel;
mod plane;
mod renderer;
mod scene;
mod settings;
mod shadow;
mod sphere;
mod tracer;

pub use camera::{Camera, ViewPlane};
pub use error::{RenderError, RenderResult};
pub use geometry::{GeoPoint, Geometries, Geometry, Intersectable};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::{Color, Material};
pub use pixel::{Pixel, PixelDistributor};
pub use plane::Plane;
pub use renderer::{clamp_01, color_to_rgba, ImageBuffer, Renderer};
pub use scene::Scene;
pub use settings::{
    RenderSettings, SoftShadows, DEFAULT_MAX_DEPTH, DEFAULT_MIN_CONTRIBUTION,
    DEFAULT_SOFT_SHADOW_RADIUS, DEFAULT_SOFT_SHADOW_RAYS, SPARE_THREADS,
};
pub use shadow::ShadowSampler;
pub use sphere::Sphere;
pub use tracer::RayTracer;

/// Re-export the ray and vector types from lumen_math
pub use lumen_math::{DVec3, Ray};
