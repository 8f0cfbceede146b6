//! Surface material coefficients.

use lumen_math::DVec3;

/// Linear RGB color. Values are not clamped here; the image buffer
/// clamps when converting to displayable bytes.
pub type Color = DVec3;

/// Phong and recursive-ray coefficients of a surface.
///
/// All coefficients are expected in [0, 1]. `kr + kt` should not exceed 1,
/// though nothing enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Material {
    /// Diffuse coefficient
    pub kd: f64,
    /// Specular coefficient
    pub ks: f64,
    /// Specular exponent
    pub shininess: i32,
    /// Reflection coefficient
    pub kr: f64,
    /// Transparency coefficient
    pub kt: f64,
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kd(mut self, kd: f64) -> Self {
        self.kd = kd;
        self
    }

    pub fn with_ks(mut self, ks: f64) -> Self {
        self.ks = ks;
        self
    }

    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_kr(mut self, kr: f64) -> Self {
        self.kr = kr;
        self
    }

    pub fn with_kt(mut self, kt: f64) -> Self {
        self.kt = kt;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_default_is_black_body() {
        let m = Material::default();
        assert_eq!(m.kd, 0.0);
        assert_eq!(m.ks, 0.0);
        assert_eq!(m.shininess, 0);
        assert_eq!(m.kr + m.kt, 0.0);
    }

    #[test]
    fn test_material_builder() {
        let m = Material::new()
            .with_kd(0.5)
            .with_ks(0.25)
            .with_shininess(30)
            .with_kr(0.2)
            .with_kt(0.3);

        assert_eq!(m, Material { kd: 0.5, ks: 0.25, shininess: 30, kr: 0.2, kt: 0.3 });
    }
}
