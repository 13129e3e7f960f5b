//! Fly camera and the controller that steers it.
//!
//! View space has +X to the right, +Y up and +Z straight ahead, so anything the
//! camera can see has a positive view-space `z`.
//!
//! Orientation is only yaw (about world Y, positive turns right) and pitch
//! (positive looks up). Direction vectors are rebuilt from the angles on every
//! call; there is no roll and nothing is cached.

use crate::math::mat4::Mat4;
use crate::math::vec3::{Vec3, NORMALIZE_EPSILON};
use crate::projection::Projection;

/// Pitch bound used by the controller: just short of straight up/down.
pub const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 * 0.99;

/// Squared length below which the right vector falls back to +X.
const RIGHT_FALLBACK_EPSILON: f32 = 1e-7;

/// First-person camera with position, yaw/pitch orientation and projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Projection::default())
    }
}

impl Camera {
    /// Creates a new camera at the given position, looking along +Z axis.
    pub fn new(position: Vec3, projection: Projection) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            projection,
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Moves the camera by a world-space offset.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Radians.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    /// Sets pitch without clamping. Call [`Camera::clamp_pitch`] afterwards.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    /// Turns the camera to face `target`. Pitch is clamped to [`MAX_PITCH`].
    /// Does nothing when `target` is the camera position.
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        if to_target.magnitude() <= NORMALIZE_EPSILON {
            return;
        }
        let horizontal = (to_target.x * to_target.x + to_target.z * to_target.z).sqrt();
        self.yaw = to_target.x.atan2(to_target.z);
        self.pitch = to_target.y.atan2(horizontal);
        self.clamp_pitch(MAX_PITCH);
    }

    /// Clamps pitch in place to `[-max_abs_pitch, max_abs_pitch]`.
    pub fn clamp_pitch(&mut self, max_abs_pitch: f32) {
        self.pitch = self.pitch.clamp(-max_abs_pitch, max_abs_pitch);
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }

    /// Returns the near clipping plane distance.
    pub fn near_plane(&self) -> f32 {
        self.projection.z_near()
    }

    // =========================================================================
    // Queries - Direction Vectors
    // =========================================================================

    /// Unit view direction: +Z turned by yaw, then tilted by pitch.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch).normalize()
    }

    /// Unit vector to the camera's right, level with the ground.
    ///
    /// Looking straight up or down makes `up x forward` degenerate; the canonical
    /// +X axis is returned instead so look controls keep working.
    pub fn right(&self) -> Vec3 {
        let right = Vec3::UP.cross(self.forward());
        if right.magnitude_squared() < RIGHT_FALLBACK_EPSILON {
            return Vec3::RIGHT;
        }
        right.normalize()
    }

    /// World → view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.forward(), Vec3::UP)
    }

    /// Computes the projection matrix from the current projection parameters.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }
}

// =============================================================================
// Camera Controller
// =============================================================================

/// Already-resolved per-frame camera intent.
///
/// Axis values are in `[-1, 1]`; mouse deltas are in pixels; zoom is in wheel
/// notches (positive = zoom in).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraIntent {
    pub forward: f32,
    pub right: f32,
    pub up: f32,
    pub look_yaw: f32,
    pub look_pitch: f32,
    pub mouse_delta: (f32, f32),
    pub zoom: f32,
    pub boost: bool,
}

/// Configuration for applying [`CameraIntent`]s to a [`Camera`].
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Movement speed in units per second.
    pub move_speed: f32,
    /// Multiplier applied while boosting.
    pub boost_multiplier: f32,
    /// Keyboard look speed in radians per second.
    pub look_speed: f32,
    /// Mouse sensitivity in radians per pixel.
    pub look_sensitivity: f32,
    /// Field of view change per zoom notch, radians.
    pub zoom_step: f32,
    pub min_fov: f32,
    pub max_fov: f32,
    /// Pose restored by [`CameraController::reset`].
    pub home_position: Vec3,
    pub home_yaw: f32,
    pub home_pitch: f32,
    pub home_fov: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            boost_multiplier: 3.0,
            look_speed: 1.6,
            look_sensitivity: 0.004,
            zoom_step: 2f32.to_radians(),
            min_fov: 30f32.to_radians(),
            max_fov: 100f32.to_radians(),
            home_position: Vec3::new(0.0, 1.5, -1.5),
            home_yaw: 0.0,
            home_pitch: -0.15,
            home_fov: 70f32.to_radians(),
        }
    }
}

impl CameraController {
    /// Applies one frame of intent to the camera.
    ///
    /// Pitch is clamped to [`MAX_PITCH`] after it changes.
    pub fn update(&self, camera: &mut Camera, intent: &CameraIntent, delta_time: f32) {
        let mut speed = self.move_speed * delta_time;
        if intent.boost {
            speed *= self.boost_multiplier;
        }

        let movement = camera.forward() * intent.forward
            + camera.right() * intent.right
            + Vec3::UP * intent.up;
        if movement != Vec3::ZERO {
            camera.translate(movement * speed);
        }

        let (dx, dy) = intent.mouse_delta;
        let yaw_delta = intent.look_yaw * self.look_speed * delta_time + dx * self.look_sensitivity;
        let pitch_delta =
            intent.look_pitch * self.look_speed * delta_time - dy * self.look_sensitivity;
        if yaw_delta != 0.0 {
            camera.set_yaw(camera.yaw() + yaw_delta);
        }
        if pitch_delta != 0.0 {
            camera.set_pitch(camera.pitch() + pitch_delta);
            camera.clamp_pitch(MAX_PITCH);
        }

        if intent.zoom != 0.0 {
            let projection = camera.projection_mut();
            let fov = (projection.fov_y() - intent.zoom * self.zoom_step)
                .clamp(self.min_fov, self.max_fov);
            projection.set_fov_y(fov);
        }
    }

    /// Restores the home pose and field of view.
    pub fn reset(&self, camera: &mut Camera) {
        camera.set_position(self.home_position);
        camera.set_yaw(self.home_yaw);
        camera.set_pitch(self.home_pitch);
        camera.clamp_pitch(MAX_PITCH);
        camera.projection_mut().set_fov_y(self.home_fov);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn camera_starts_looking_forward() {
        let camera = Camera::default();
        assert_eq!(camera.forward(), Vec3::FORWARD);

        let right = camera.right();
        assert_relative_eq!(right.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(right.dot(camera.forward()), 0.0, epsilon = 1e-6);
        assert_relative_eq!(right.dot(Vec3::UP), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn yaw_rotates_horizontally() {
        let mut camera = Camera::default();
        camera.set_yaw(FRAC_PI_2); // 90 degrees right

        assert_relative_eq!(camera.forward().x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.forward().z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.right().z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn pitch_is_clamped_exactly() {
        let mut camera = Camera::default();
        camera.set_pitch(10.0);
        camera.clamp_pitch(FRAC_PI_2 * 0.99);
        assert_eq!(camera.pitch(), FRAC_PI_2 * 0.99);

        camera.set_pitch(-10.0);
        camera.clamp_pitch(FRAC_PI_2 * 0.99);
        assert_eq!(camera.pitch(), -FRAC_PI_2 * 0.99);
    }

    #[test]
    fn right_falls_back_when_looking_straight_up() {
        let mut camera = Camera::default();
        camera.set_pitch(FRAC_PI_2);
        assert_eq!(camera.right(), Vec3::RIGHT);
    }

    #[test]
    fn view_matrix_puts_target_in_front() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(0.0, 0.0, -5.0));
        let view = camera.view_matrix();

        let origin = view * Vec3::ZERO;
        assert_relative_eq!(origin.z, 5.0, epsilon = 1e-4);
        let eye = view * camera.position();
        assert_relative_eq!(eye.magnitude(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn look_at_faces_the_target() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(3.0, 2.0, -4.0));
        let target = Vec3::new(-1.0, 0.5, 2.0);
        camera.look_at(target);

        let expected = (target - camera.position()).normalize();
        assert_relative_eq!(camera.forward().dot(expected), 1.0, epsilon = 1e-5);

        let in_view = camera.view_matrix() * target;
        assert_relative_eq!(in_view.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(in_view.y, 0.0, epsilon = 1e-4);
        assert!(in_view.z > 0.0);
    }

    #[test]
    fn look_at_own_position_keeps_orientation() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(1.0, 2.0, 3.0));
        camera.set_yaw(0.4);
        camera.set_pitch(-0.2);

        camera.look_at(Vec3::new(1.0, 2.0, 3.0));
        camera.look_at(Vec3::new(1.0, 2.0, 3.0 + 1e-8));
        assert_eq!(camera.yaw(), 0.4);
        assert_eq!(camera.pitch(), -0.2);

        // Small but real offsets still turn the camera.
        camera.look_at(Vec3::new(1.0, 2.0, 3.001));
        assert_relative_eq!(camera.yaw(), 0.0, epsilon = 1e-4);
        assert_relative_eq!(camera.pitch(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn controller_moves_along_forward() {
        let controller = CameraController::default();
        let mut camera = Camera::default();
        let intent = CameraIntent {
            forward: 1.0,
            ..Default::default()
        };
        controller.update(&mut camera, &intent, 0.5);
        assert_relative_eq!(camera.position().z, 1.5, epsilon = 1e-5);

        let boosted = CameraIntent {
            forward: 1.0,
            boost: true,
            ..Default::default()
        };
        controller.update(&mut camera, &boosted, 0.5);
        assert_relative_eq!(camera.position().z, 6.0, epsilon = 1e-4);
    }

    #[test]
    fn controller_keeps_pitch_bounded() {
        let controller = CameraController::default();
        let mut camera = Camera::default();
        let intent = CameraIntent {
            mouse_delta: (0.0, -10_000.0),
            ..Default::default()
        };
        controller.update(&mut camera, &intent, 0.016);
        assert_eq!(camera.pitch(), MAX_PITCH);

        let intent = CameraIntent {
            look_pitch: -1.0,
            ..Default::default()
        };
        for _ in 0..100 {
            controller.update(&mut camera, &intent, 0.1);
        }
        assert_eq!(camera.pitch(), -MAX_PITCH);
        assert!(camera.pitch().abs() < PI / 2.0);
    }

    #[test]
    fn zoom_is_clamped_and_reset_restores_home() {
        let controller = CameraController::default();
        let mut camera = Camera::default();
        let intent = CameraIntent {
            zoom: 1000.0,
            ..Default::default()
        };
        controller.update(&mut camera, &intent, 0.016);
        assert_relative_eq!(camera.projection().fov_y(), controller.min_fov);

        controller.reset(&mut camera);
        assert_eq!(camera.position(), controller.home_position);
        assert_relative_eq!(camera.projection().fov_y(), controller.home_fov);
        assert_relative_eq!(camera.pitch(), controller.home_pitch);
    }
}
