//! Rendering: the polygon pipeline and the surfaces it draws onto.
//!
//! The [`Pipeline`] turns a scene into a back-to-front list of screen polygons
//! and hands them to a [`Surface`]. Two surfaces ship with the crate:
//! - [`FrameBuffer`]: rasterizes into an ARGB8888 pixel buffer
//! - [`DrawList`]: records the calls, for tests and tooling

mod framebuffer;
mod pipeline;

pub use framebuffer::FrameBuffer;
pub use pipeline::{sort_back_to_front, FaceToDraw, Pipeline};

use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Stroke width used for face outlines, in pixels.
pub const OUTLINE_WIDTH: f32 = 1.2;
/// Stroke width used for the world axis gizmo, in pixels.
pub const AXIS_WIDTH: f32 = 2.0;

/// A 2D drawing target for the pipeline's output.
///
/// Calls arrive in paint order: background, then faces far to near, then
/// overlays. Implementors draw each call on top of what came before.
pub trait Surface {
    /// Fills the viewport with a vertical gradient from `top` to `bottom`.
    fn fill_background(&mut self, viewport: Viewport, top: Color, bottom: Color);

    /// Fills a polygon given by its outline points.
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    /// Strokes the closed outline of a polygon.
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, width: f32);

    /// Draws a straight line segment.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
}

/// Pixel rectangle that normalized device coordinates are mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A viewport covering a whole `width` x `height` surface.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width over height. A zero height is treated as one pixel.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Maps NDC x, y in `[-1, 1]` to pixels. Y is flipped because screen Y grows
    /// downward.
    pub fn to_screen(&self, ndc: Vec3) -> Vec2 {
        let x = self.x as f32 + (ndc.x + 1.0) * 0.5 * self.width as f32;
        let y = self.y as f32 + (1.0 - (ndc.y + 1.0) * 0.5) * self.height as f32;
        Vec2::new(x, y)
    }
}

/// How visible faces are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Lit fill only
    #[default]
    Solid,
    /// Outlines only
    Wireframe,
    /// Lit fill with a dark outline
    SolidWithOutline,
}

impl RenderMode {
    pub fn fills(self) -> bool {
        self != RenderMode::Wireframe
    }

    pub fn outlines(self) -> bool {
        self != RenderMode::Solid
    }

    /// The next mode in the toggle cycle.
    pub fn next(self) -> Self {
        match self {
            RenderMode::Solid => RenderMode::SolidWithOutline,
            RenderMode::SolidWithOutline => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Solid,
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Solid => write!(f, "Solid"),
            RenderMode::Wireframe => write!(f, "Wireframe"),
            RenderMode::SolidWithOutline => write!(f, "Solid + Outline"),
        }
    }
}

/// Per-frame switches read by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub render_mode: RenderMode,
    pub backface_culling: bool,
    pub draw_world_axes: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::default(),
            backface_culling: true,
            draw_world_axes: true,
        }
    }
}

/// Summary of one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Models in the scene.
    pub object_count: usize,
    /// Faces that made it into the draw list.
    pub face_count: usize,
}

/// One recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background {
        viewport: Viewport,
        top: Color,
        bottom: Color,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Color,
    },
    StrokePolygon {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
}

/// A [`Surface`] that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Fill colors of the filled polygons, in paint order.
    pub fn fill_colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillPolygon { color, .. } => Some(*color),
            _ => None,
        })
    }

    pub fn fill_count(&self) -> usize {
        self.fill_colors().count()
    }

    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokePolygon { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn fill_background(&mut self, viewport: Viewport, top: Color, bottom: Color) {
        self.commands.push(DrawCommand::Background {
            viewport,
            top,
            bottom,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokePolygon {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_mode_flags() {
        assert!(RenderMode::Solid.fills() && !RenderMode::Solid.outlines());
        assert!(!RenderMode::Wireframe.fills() && RenderMode::Wireframe.outlines());
        assert!(RenderMode::SolidWithOutline.fills() && RenderMode::SolidWithOutline.outlines());
    }

    #[test]
    fn render_mode_cycles_through_all() {
        let start = RenderMode::Solid;
        let cycle = [start, start.next(), start.next().next()];
        assert!(cycle.contains(&RenderMode::Wireframe));
        assert!(cycle.contains(&RenderMode::SolidWithOutline));
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn viewport_maps_ndc_corners() {
        let vp = Viewport::new(10, 20, 200, 100);
        let top_left = vp.to_screen(Vec3::new(-1.0, 1.0, 0.0));
        let bottom_right = vp.to_screen(Vec3::new(1.0, -1.0, 0.0));
        assert_eq!(top_left, Vec2::new(10.0, 20.0));
        assert_eq!(bottom_right, Vec2::new(210.0, 120.0));
        assert_eq!(vp.to_screen(Vec3::ZERO), Vec2::new(110.0, 70.0));
        assert_eq!(vp.aspect_ratio(), 2.0);
    }
}
