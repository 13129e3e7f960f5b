//! Transform component for scene models.
//!
//! Provides a [`Transform`] struct with a fluent API for managing position,
//! rotation (Euler angles in degrees) and the rotation velocity used by the
//! autorotate animation.

use crate::math::{mat4::Mat4, vec3::Vec3};

/// A model pose: position plus Euler rotation in degrees, applied X then Y then Z.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(5.0, 2.0, 0.0)
///     .rotate_y(15.0)
///     .set_rotation_velocity(Vec3::new(0.0, 30.0, 0.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,          // Euler angles in degrees
    rotation_velocity: Vec3, // Degrees per second
}

impl Transform {
    /// Create a new transform at the origin with no rotation.
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    /// Get the position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the position.
    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    /// Set the position from x, y, z components.
    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    // ============ Rotation ============

    /// Get the rotation (Euler angles in degrees).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Set the rotation (Euler angles in degrees).
    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Set the rotation from x, y, z components (degrees).
    pub fn set_rotation_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    /// Rotate around the Y axis (degrees).
    pub fn rotate_y(&mut self, degrees: f32) -> &mut Self {
        self.rotation.y += degrees;
        self
    }

    /// Get the rotation velocity (degrees per second).
    pub fn rotation_velocity(&self) -> Vec3 {
        self.rotation_velocity
    }

    /// Set the rotation velocity (degrees per second).
    pub fn set_rotation_velocity(&mut self, velocity: Vec3) -> &mut Self {
        self.rotation_velocity = velocity;
        self
    }

    /// Advances the rotation by `rotation_velocity * delta_time`, wrapping each
    /// angle into `[0, 360)`.
    pub fn animate(&mut self, delta_time: f32) -> &mut Self {
        let r = self.rotation + self.rotation_velocity * delta_time;
        self.rotation = Vec3::new(
            r.x.rem_euclid(360.0),
            r.y.rem_euclid(360.0),
            r.z.rem_euclid(360.0),
        );
        self
    }

    // ============ Matrix Generation ============

    /// Generate the model matrix.
    ///
    /// Order: Translation * RotationX * RotationY * RotationZ
    /// (rotation about the local origin first, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_xyz(
                self.rotation.x.to_radians(),
                self.rotation.y.to_radians(),
                self.rotation.z.to_radians(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.rotation_velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_position_xyz(1.0, 2.0, 3.0)
            .rotate_y(30.0)
            .set_rotation_velocity(Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y, 30.0);
        assert_eq!(t.rotation_velocity().y, 10.0);
    }

    #[test]
    fn test_animate_wraps() {
        let mut t = Transform::new();
        t.set_rotation_xyz(350.0, 0.0, 5.0)
            .set_rotation_velocity(Vec3::new(20.0, 0.0, -10.0))
            .animate(1.0);
        assert_relative_eq!(t.rotation().x, 10.0, epsilon = 1e-4);
        assert_relative_eq!(t.rotation().z, 355.0, epsilon = 1e-4);
    }

    #[test]
    fn test_to_matrix_identity() {
        let t = Transform::default();
        assert_eq!(t.to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_rotation_about_local_origin() {
        let mut t = Transform::new();
        t.set_position_xyz(0.0, 0.0, 4.0)
            .set_rotation_xyz(0.0, 90.0, 0.0);
        let p = t.to_matrix() * Vec3::new(0.5, 0.0, 0.0);
        // The point stays half a unit from the model's position.
        assert_relative_eq!((p - t.position()).magnitude(), 0.5, epsilon = 1e-5);
        assert_relative_eq!(p.z, 3.5, epsilon = 1e-5);
    }
}
