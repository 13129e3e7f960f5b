//! SDL2 window: event polling into [`InputState`] and frame presentation.

use anyhow::{anyhow, Context};
use sdl2::event::{Event, WindowEvent as SdlWindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;
use tracing::info;

use crate::input::{Action, InputState};
use crate::render::FrameBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

/// Key bindings.
pub fn action_for_key(keycode: Keycode) -> Option<Action> {
    let action = match keycode {
        Keycode::W => Action::MoveForward,
        Keycode::S => Action::MoveBack,
        Keycode::A => Action::MoveLeft,
        Keycode::D => Action::MoveRight,
        Keycode::Q => Action::MoveUp,
        Keycode::E => Action::MoveDown,
        Keycode::Left => Action::LookLeft,
        Keycode::Right => Action::LookRight,
        Keycode::Up => Action::LookUp,
        Keycode::Down => Action::LookDown,
        Keycode::LShift | Keycode::RShift => Action::Boost,
        Keycode::R => Action::ResetCamera,
        Keycode::N => Action::Spawn,
        Keycode::Delete => Action::Delete,
        Keycode::F1 => Action::ToggleRenderMode,
        Keycode::F2 => Action::ToggleCulling,
        Keycode::F3 => Action::ToggleAutoRotate,
        Keycode::F4 => Action::ToggleHud,
        Keycode::F12 => Action::Screenshot,
        _ => return None,
    };
    Some(action)
}

pub struct Window {
    // Declared before `texture_creator` so it is dropped first.
    texture: Texture<'static>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    canvas: Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> anyhow::Result<Self> {
        let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .context("failed to create window")?;

        let canvas = window
            .into_canvas()
            .build()
            .context("failed to create canvas")?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;
        let texture = Self::create_texture(&texture_creator, width, height)?;

        info!(width, height, "window opened");
        Ok(Self {
            texture,
            texture_creator,
            canvas,
            event_pump,
            width,
            height,
        })
    }

    fn create_texture(
        texture_creator: &TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Texture<'static>> {
        // SAFETY: the creator is boxed and owned by `Window`, which drops the
        // texture first, so the texture never outlives it.
        let texture_creator: &'static TextureCreator<WindowContext> =
            unsafe { &*(texture_creator as *const _) };
        texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width.max(1), height.max(1))
            .context("failed to create streaming texture")
    }

    /// Drains pending events into `input`. Quit wins over resize.
    pub fn poll_events(&mut self, input: &mut InputState) -> WindowEvent {
        let mut result = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(action) = action_for_key(key) {
                        input.set_down(action);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(action) = action_for_key(key) {
                        input.set_up(action);
                    }
                }
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Right,
                    ..
                } => input.set_dragging(true),
                Event::MouseButtonUp {
                    mouse_btn: MouseButton::Right,
                    ..
                } => input.set_dragging(false),
                Event::MouseMotion { xrel, yrel, .. } => {
                    input.add_mouse_motion(xrel as f32, yrel as f32);
                }
                Event::MouseWheel { y, .. } => input.add_scroll(y as f32),
                Event::Window {
                    win_event: SdlWindowEvent::Resized(w, h),
                    ..
                } => result = WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32),
                Event::Window {
                    win_event: SdlWindowEvent::FocusLost,
                    ..
                } => input.release_all(),
                _ => {}
            }
        }
        result
    }

    /// Uploads the frame and shows it.
    pub fn present(&mut self, frame: &FrameBuffer) -> anyhow::Result<()> {
        self.texture
            .update(None, frame.as_bytes(), frame.pitch())
            .context("failed to upload frame")?;

        self.canvas.clear();
        self.canvas
            .copy(
                &self.texture,
                None,
                Some(Rect::new(0, 0, self.width, self.height)),
            )
            .map_err(|e| anyhow!(e))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        self.width = width;
        self.height = height;
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        info!(width, height, "window resized");
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> anyhow::Result<()> {
        self.canvas
            .window_mut()
            .set_title(title)
            .context("invalid window title")
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
