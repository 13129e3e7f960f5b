//! A CPU-based software 3D renderer built on the painter's algorithm.
//!
//! Scenes of polygonal models are transformed, culled, flat-shaded, projected
//! and depth-sorted into a back-to-front list of 2D polygons, which is drawn
//! onto any [`render::Surface`]. SDL2 is used only for the optional demo
//! window.
//!
//! # Quick Start
//!
//! ```no_run
//! use painter3d::prelude::*;
//!
//! let scene = Scene::with_default_models();
//! let camera = Camera::new(Vec3::new(0.0, 1.5, -1.5), Projection::default());
//! let mut frame = FrameBuffer::new(800, 600);
//! let stats = Pipeline::new().render(
//!     &mut frame,
//!     Viewport::full(800, 600),
//!     &scene,
//!     &camera,
//!     &DirectionalLight::default(),
//!     &RenderSettings::default(),
//! );
//! println!("{} faces", stats.face_count);
//! ```

// Public API - exposed to library consumers
pub mod app;
pub mod camera;
pub mod colors;
pub mod config;
pub mod hud;
pub mod input;
pub mod light;
pub mod math;
pub mod model;
pub mod projection;
pub mod render;
pub mod scene;
pub mod timing;
pub mod transform;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use app::App;
pub use model::{Face, Model};
pub use projection::Projection;
pub use render::{Pipeline, RenderMode, RenderSettings, RenderStats};
pub use scene::{ModelId, Scene};
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use painter3d::prelude::*;
/// ```
pub mod prelude {
    // App
    pub use crate::app::App;
    pub use crate::config::{AppConfig, LightConfig};
    pub use crate::hud::HudState;
    pub use crate::input::{Action, InputState};

    // Camera
    pub use crate::camera::{Camera, CameraController, CameraIntent};

    // Scene
    pub use crate::colors::Color;
    pub use crate::light::DirectionalLight;
    pub use crate::model::{Face, Model};
    pub use crate::scene::{ModelId, Scene};
    pub use crate::transform::Transform;

    // Projection
    pub use crate::projection::Projection;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Rendering
    pub use crate::render::{
        DrawCommand, DrawList, FrameBuffer, Pipeline, RenderMode, RenderSettings, RenderStats,
        Surface, Viewport,
    };

    // Timing
    pub use crate::timing::{Clock, FrameLimiter, FrameTimer, ManualClock, SystemClock};
}
