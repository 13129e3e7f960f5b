//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The direction the light travels (not where it comes from). Not required
    /// to be normalized; its length scales the diffuse term.
    pub direction: Vec3,
    /// Multiplier for the diffuse lighting contribution.
    pub intensity: f32,
    /// Light every face receives regardless of orientation.
    pub ambient: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, -1.0, -1.0), 1.0, 0.15)
    }
}

impl DirectionalLight {
    pub fn new(direction: Vec3, intensity: f32, ambient: f32) -> Self {
        DirectionalLight {
            direction,
            intensity,
            ambient,
        }
    }

    /// Diffuse term for a surface normal: `max(0, n · -direction)`.
    pub fn diffuse(&self, normal: Vec3) -> f32 {
        // Negate direction: light pointing at surface = positive dot product
        normal.dot(-self.direction).max(0.0)
    }

    /// Flat-shading factor in `[0, 1]`: `clamp(ambient + diffuse * intensity)`.
    pub fn shade(&self, normal: Vec3) -> f32 {
        (self.ambient + self.diffuse(normal) * self.intensity).clamp(0.0, 1.0)
    }
}
