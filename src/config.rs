//! Demo configuration, loaded from JSON.
//!
//! Every field is optional in the file; missing ones take the defaults below.

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::camera::CameraController;
use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;
use crate::projection::Projection;

/// Largest accepted window or image side, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Directional light settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Direction the light travels, `[x, y, z]`. Need not be normalized.
    pub direction: [f32; 3],
    pub intensity: f32,
    pub ambient: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        let light = DirectionalLight::default();
        Self {
            direction: [light.direction.x, light.direction.y, light.direction.z],
            intensity: light.intensity,
            ambient: light.ambient,
        }
    }
}

impl LightConfig {
    pub fn to_light(&self) -> DirectionalLight {
        let [x, y, z] = self.direction;
        DirectionalLight::new(Vec3::new(x, y, z), self.intensity, self.ambient)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Units per second.
    pub move_speed: f32,
    pub boost_multiplier: f32,
    /// Keyboard look speed, radians per second.
    pub look_speed: f32,
    /// Radians per pixel of mouse drag.
    pub mouse_sensitivity: f32,
    pub zoom_step_degrees: f32,
    pub min_fov_degrees: f32,
    pub max_fov_degrees: f32,
    /// Seed for spawned cubes. Random when absent.
    pub seed: Option<u64>,
    pub light: LightConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            target_fps: 60,
            fov_degrees: 70.0,
            near: 0.1,
            far: 300.0,
            move_speed: 3.0,
            boost_multiplier: 3.0,
            look_speed: 1.6,
            mouse_sensitivity: 0.004,
            zoom_step_degrees: 2.0,
            min_fov_degrees: 30.0,
            max_fov_degrees: 100.0,
            seed: None,
            light: LightConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Rejects window sizes the frame buffer cannot hold.
    pub fn validate(&self) -> anyhow::Result<()> {
        let (width, height) = (self.window_width, self.window_height);
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            bail!("window size must be within 1..={MAX_DIMENSION} per side, got {width}x{height}");
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }

    pub fn projection(&self) -> Projection {
        Projection::from_degrees(self.fov_degrees, self.aspect_ratio(), self.near, self.far)
    }

    /// Controller tuned from this config. The home pose keeps its default
    /// position and angles, with the configured field of view.
    pub fn camera_controller(&self) -> CameraController {
        CameraController {
            move_speed: self.move_speed,
            boost_multiplier: self.boost_multiplier,
            look_speed: self.look_speed,
            look_sensitivity: self.mouse_sensitivity,
            zoom_step: self.zoom_step_degrees.to_radians(),
            min_fov: self.min_fov_degrees.to_radians(),
            max_fov: self.max_fov_degrees.to_radians(),
            home_fov: self.fov_degrees.to_radians(),
            ..CameraController::default()
        }
    }
}
