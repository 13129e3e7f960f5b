//! Camera lens: field of view, aspect ratio and the near/far range.
//!
//! The near distance doubles as the plane the pipeline rejects faces against,
//! so a [`Projection`] is the only place it lives.

use crate::math::mat4::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    fov_y: f32, // radians
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(std::f32::consts::FRAC_PI_3, 16.0 / 9.0, 0.1, 100.0)
    }
}

impl Projection {
    /// `fov_y` in radians. Expects `0 < z_near < z_far`.
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    /// Vertical field of view, radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Horizontal field of view implied by `fov_y` and the aspect ratio.
    pub fn fov_x(&self) -> f32 {
        let half_width = (self.fov_y * 0.5).tan() * self.aspect_ratio;
        2.0 * half_width.atan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    pub fn set_fov_y(&mut self, fov_y: f32) {
        self.fov_y = fov_y;
    }

    /// Called whenever the output surface changes shape.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_fov(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}
