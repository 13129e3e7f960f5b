//! Frame-loop state for the interactive demo.
//!
//! [`App`] owns everything that changes between frames. The binary drives it:
//! feed input, call [`App::update`] with the frame delta, then [`App::render`]
//! onto a surface.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::camera::{Camera, CameraController};
use crate::config::AppConfig;
use crate::hud::HudState;
use crate::input::{Action, InputState};
use crate::light::DirectionalLight;
use crate::render::{Pipeline, RenderSettings, RenderStats, Surface, Viewport};
use crate::scene::{random_cube, ModelId, Scene};

/// How far in front of the camera new cubes appear.
const SPAWN_DISTANCE: f32 = 4.0;

pub struct App {
    scene: Scene,
    camera: Camera,
    controller: CameraController,
    light: DirectionalLight,
    settings: RenderSettings,
    pipeline: Pipeline,
    rng: StdRng,
    spawned: Vec<ModelId>,
    auto_rotate: bool,
    show_hud: bool,
    last_stats: RenderStats,
}

impl App {
    /// Default scene, camera at its home pose.
    pub fn new(config: &AppConfig) -> Self {
        let controller = config.camera_controller();
        let mut camera = Camera::new(controller.home_position, config.projection());
        controller.reset(&mut camera);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let scene = Scene::with_default_models();
        info!(models = scene.len(), seed = ?config.seed, "scene ready");

        Self {
            scene,
            camera,
            controller,
            light: config.light.to_light(),
            settings: RenderSettings::default(),
            pipeline: Pipeline::new(),
            rng,
            spawned: Vec::new(),
            auto_rotate: true,
            show_hud: true,
            last_stats: RenderStats::default(),
        }
    }

    /// Applies one frame of input and animation.
    ///
    /// Consumes the press edges it reacts to. [`Action::Screenshot`] is left
    /// for the caller.
    pub fn update(&mut self, input: &mut InputState, delta_time: f32) {
        self.controller
            .update(&mut self.camera, &input.camera_intent(), delta_time);

        if input.take_pressed(Action::ResetCamera) {
            self.controller.reset(&mut self.camera);
            debug!("camera reset");
        }
        if input.take_pressed(Action::ToggleRenderMode) {
            self.settings.render_mode = self.settings.render_mode.next();
            debug!(mode = %self.settings.render_mode, "render mode");
        }
        if input.take_pressed(Action::ToggleCulling) {
            self.settings.backface_culling = !self.settings.backface_culling;
            debug!(enabled = self.settings.backface_culling, "backface culling");
        }
        if input.take_pressed(Action::ToggleAutoRotate) {
            self.auto_rotate = !self.auto_rotate;
            debug!(enabled = self.auto_rotate, "auto rotate");
        }
        if input.take_pressed(Action::ToggleHud) {
            self.show_hud = !self.show_hud;
        }
        if input.take_pressed(Action::Spawn) {
            self.spawn_cube();
        }
        if input.take_pressed(Action::Delete) {
            self.delete_spawned();
        }

        if self.auto_rotate {
            for model in self.scene.models_mut() {
                model.transform_mut().animate(delta_time);
            }
        }
    }

    /// Adds a random cube in front of the camera.
    pub fn spawn_cube(&mut self) -> ModelId {
        let center = self.camera.position() + self.camera.forward() * SPAWN_DISTANCE;
        let id = self.scene.add(random_cube(&mut self.rng, center));
        self.spawned.push(id);
        debug!(?id, spawned = self.spawned.len(), "cube spawned");
        id
    }

    /// Removes the most recently spawned cube. Returns `false` if none is left.
    pub fn delete_spawned(&mut self) -> bool {
        while let Some(id) = self.spawned.pop() {
            if self.scene.remove(id) {
                debug!(?id, spawned = self.spawned.len(), "cube deleted");
                return true;
            }
        }
        false
    }

    /// Renders the scene onto `surface`, matching the camera aspect to the
    /// viewport first.
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        viewport: Viewport,
    ) -> RenderStats {
        if !viewport.is_empty() {
            self.camera
                .projection_mut()
                .set_aspect_ratio(viewport.aspect_ratio());
        }
        self.last_stats = self.pipeline.render(
            surface,
            viewport,
            &self.scene,
            &self.camera,
            &self.light,
            &self.settings,
        );
        self.last_stats
    }

    pub fn hud(&self, fps: f32) -> HudState {
        HudState {
            fps,
            render_mode: self.settings.render_mode,
            backface_culling: self.settings.backface_culling,
            auto_rotate: self.auto_rotate,
            camera_position: self.camera.position(),
            camera_yaw: self.camera.yaw(),
            camera_pitch: self.camera.pitch(),
            object_count: self.scene.len(),
            visible_face_count: self.last_stats.face_count,
            spawned_object_count: self.spawned.len(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    pub fn show_hud(&self) -> bool {
        self.show_hud
    }

    pub fn spawned_count(&self) -> usize {
        self.spawned.len()
    }

    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }
}
