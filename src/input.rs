//! Input handling.
//!
//! The window layer translates raw device events into named [`Action`]s and
//! feeds them here. [`InputState`] keeps what is held, which presses are new
//! this frame, and the mouse drag/scroll accumulated since the last frame.

use std::collections::HashSet;

use crate::camera::CameraIntent;

/// Every input the demo reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    LookLeft,
    LookRight,
    LookUp,
    LookDown,
    Boost,
    ResetCamera,
    Spawn,
    Delete,
    ToggleRenderMode,
    ToggleCulling,
    ToggleAutoRotate,
    ToggleHud,
    Screenshot,
}

/// Held actions plus per-frame accumulators.
#[derive(Debug, Default)]
pub struct InputState {
    down: HashSet<Action>,
    pressed: HashSet<Action>,
    dragging: bool,
    mouse_delta: (f32, f32),
    scroll: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an action held. Returns `true` only on a fresh press, so key
    /// repeat does not retrigger toggles.
    pub fn set_down(&mut self, action: Action) -> bool {
        let fresh = self.down.insert(action);
        if fresh {
            self.pressed.insert(action);
        }
        fresh
    }

    pub fn set_up(&mut self, action: Action) {
        self.down.remove(&action);
    }

    pub fn is_down(&self, action: Action) -> bool {
        self.down.contains(&action)
    }

    /// Consumes a press edge recorded since the last frame.
    pub fn take_pressed(&mut self, action: Action) -> bool {
        self.pressed.remove(&action)
    }

    /// Starts or stops look-drag (right mouse button).
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Accumulates relative mouse motion. Ignored unless dragging.
    pub fn add_mouse_motion(&mut self, dx: f32, dy: f32) {
        if self.dragging {
            self.mouse_delta.0 += dx;
            self.mouse_delta.1 += dy;
        }
    }

    /// Accumulates wheel notches; positive scrolls away from the user.
    pub fn add_scroll(&mut self, notches: f32) {
        self.scroll += notches;
    }

    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// `+1` when only `positive` is held, `-1` when only `negative` is.
    pub fn axis(&self, positive: Action, negative: Action) -> f32 {
        match (self.is_down(positive), self.is_down(negative)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// Resolves the held keys and accumulators into a camera intent.
    pub fn camera_intent(&self) -> CameraIntent {
        CameraIntent {
            forward: self.axis(Action::MoveForward, Action::MoveBack),
            right: self.axis(Action::MoveRight, Action::MoveLeft),
            up: self.axis(Action::MoveUp, Action::MoveDown),
            look_yaw: self.axis(Action::LookRight, Action::LookLeft),
            look_pitch: self.axis(Action::LookUp, Action::LookDown),
            mouse_delta: self.mouse_delta,
            zoom: self.scroll,
            boost: self.is_down(Action::Boost),
        }
    }

    /// Clears per-frame state: unconsumed presses, mouse motion and scroll.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.mouse_delta = (0.0, 0.0);
        self.scroll = 0.0;
    }

    /// Releases everything, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.down.clear();
        self.dragging = false;
        self.end_frame();
    }
}
