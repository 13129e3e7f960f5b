//! CPU pixel buffer that the pipeline can paint into.
//!
//! Pixels are stored as packed ARGB8888 `u32` values, row-major, top-left
//! origin. There is no depth buffer: the pipeline hands polygons over in
//! back-to-front order and each one simply overwrites what is below it.

use std::path::Path;

use anyhow::Context;
use image::{ImageFormat, Rgba, RgbaImage};

use super::{Surface, Viewport};
use crate::colors::Color;
use crate::math::vec2::Vec2;

/// An owned color buffer with width/height metadata.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Create a buffer of `width * height` pixels, cleared to black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color_buffer: vec![Color::BLACK.to_argb(); pixel_count(width, height)],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resizes the buffer. Contents are cleared to black.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.color_buffer.clear();
        self.color_buffer
            .resize(pixel_count(width, height), Color::BLACK.to_argb());
    }

    pub fn clear(&mut self, color: Color) {
        self.color_buffer.fill(color.to_argb());
    }

    /// Set a pixel. Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = self.index(x as u32, y as u32);
            self.color_buffer[index] = color;
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = self.index(x as u32, y as u32);
            Some(Color::from_argb(self.color_buffer[index]))
        } else {
            None
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Raw bytes for uploading into an ARGB8888 streaming texture.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and any byte pattern is a valid u8. The
        // slice borrows `self`, so the buffer outlives it.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Bytes per row, for texture uploads.
    pub fn pitch(&self) -> usize {
        self.width as usize * 4
    }

    /// Copies the buffer into an opaque RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let c = Color::from_argb(self.color_buffer[self.index(x, y)]);
            Rgba([c.r, c.g, c.b, 255])
        })
    }

    /// Writes the buffer to `path` as a PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.to_image()
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    /// Fills one triangle with the edge function test, sampling at pixel centers.
    fn fill_triangle(&mut self, v0: Vec2, v1: Vec2, v2: Vec2, color: u32) {
        let area = edge_function(v0, v1, v2);
        if area.abs() < f32::EPSILON || area.is_nan() {
            return;
        }

        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge_function(v1, v2, p);
                let w1 = edge_function(v2, v0, p);
                let w2 = edge_function(v0, v1, p);

                // Either winding is accepted.
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Bresenham line between integer endpoints, each pixel stamped as a
    /// `(2 * radius + 1)` square.
    fn draw_line_bresenham(&mut self, from: (i32, i32), to: (i32, i32), radius: i32, color: u32) {
        let (x0, y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let x_step = if x0 < x1 { 1 } else { -1 };
        let y_step = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        let mut x = x0;
        let mut y = y0;
        loop {
            for oy in -radius..=radius {
                for ox in -radius..=radius {
                    self.set_pixel(x + ox, y + oy, color);
                }
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }

    /// Clips to a one-pixel margin around the buffer, then rasterizes.
    fn draw_segment(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        let bounds = (
            Vec2::new(-1.0, -1.0),
            Vec2::new(self.width as f32, self.height as f32),
        );
        let Some((a, b)) = clip_segment(from, to, bounds) else {
            return;
        };
        let radius = ((width - 1.0) * 0.5).round().max(0.0) as i32;
        self.draw_line_bresenham(
            (a.x.round() as i32, a.y.round() as i32),
            (b.x.round() as i32, b.y.round() as i32),
            radius,
            color.to_argb(),
        );
    }
}

impl Surface for FrameBuffer {
    fn fill_background(&mut self, viewport: Viewport, top: Color, bottom: Color) {
        let height = viewport.height.max(1) as f32;
        let x_start = viewport.x.max(0);
        let x_end = (viewport.x + viewport.width as i32).min(self.width as i32);
        let y_start = viewport.y.max(0);
        let y_end = (viewport.y + viewport.height as i32).min(self.height as i32);

        for y in y_start..y_end {
            let t = ((y - viewport.y) as f32 + 0.5) / height;
            let color = top.lerp(bottom, t).to_argb();
            for x in x_start..x_end {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Convex polygons are fanned from their first point.
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let color = color.to_argb();
        for i in 1..points.len() - 1 {
            self.fill_triangle(points[0], points[i], points[i + 1], color);
        }
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, width: f32) {
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.draw_segment(from, to, color, width);
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.draw_segment(from, to, color, width);
    }
}

/// 2D cross product `(b - a) x (p - a)`: which side of edge AB the point lies on.
#[inline]
fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p - a).cross(b - a)
}

/// Number of pixels in a `width` x `height` buffer, computed without `u32` overflow.
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Liang-Barsky clip of segment `a`-`b` to the box `(min, max)`.
///
/// Runs in `f64`: with far-off endpoints the `f32` parameters lose the
/// precision needed to land the clipped ends back inside the box.
fn clip_segment(a: Vec2, b: Vec2, (min, max): (Vec2, Vec2)) -> Option<(Vec2, Vec2)> {
    if !(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite()) {
        return None;
    }
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (dx, dy) = (b.x as f64 - ax, b.y as f64 - ay);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    let checks = [
        (-dx, ax - min.x as f64),
        (dx, max.x as f64 - ax),
        (-dy, ay - min.y as f64),
        (dy, max.y as f64 - ay),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    let at = |t: f64| Vec2::new((ax + dx * t) as f32, (ay + dy * t) as f32);
    Some((at(t0), at(t1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.set_pixel(-1, 0, RED.to_argb());
        fb.set_pixel(4, 4, RED.to_argb());
        assert!(fb.pixels().iter().all(|&p| p == Color::BLACK.to_argb()));
        assert_eq!(fb.get_pixel(4, 0), None);
    }

    #[test]
    fn fills_quad_in_either_winding() {
        let square = [
            Vec2::new(2.0, 2.0),
            Vec2::new(8.0, 2.0),
            Vec2::new(8.0, 8.0),
            Vec2::new(2.0, 8.0),
        ];
        for points in [square.to_vec(), square.iter().rev().copied().collect()] {
            let mut fb = FrameBuffer::new(10, 10);
            fb.fill_polygon(&points, RED);
            assert_eq!(fb.get_pixel(5, 5), Some(RED));
            assert_eq!(fb.get_pixel(2, 2), Some(RED));
            assert_eq!(fb.get_pixel(1, 1), Some(Color::BLACK));
            assert_eq!(fb.get_pixel(8, 8), Some(Color::BLACK));
        }
    }

    #[test]
    fn later_polygons_paint_over_earlier_ones() {
        let mut fb = FrameBuffer::new(10, 10);
        let quad = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        fb.fill_polygon(&quad, RED);
        fb.fill_polygon(&quad, Color::WHITE);
        assert!(fb.pixels().iter().all(|&p| p == Color::WHITE.to_argb()));
    }

    #[test]
    fn background_runs_top_to_bottom() {
        let mut fb = FrameBuffer::new(2, 100);
        fb.fill_background(Viewport::full(2, 100), Color::BLACK, Color::WHITE);
        let top = fb.get_pixel(0, 0).unwrap();
        let bottom = fb.get_pixel(0, 99).unwrap();
        assert!(top.r < 5 && bottom.r > 250);
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut fb = FrameBuffer::new(20, 20);
        fb.draw_line(Vec2::new(1.0, 1.0), Vec2::new(15.0, 9.0), RED, 1.0);
        assert_eq!(fb.get_pixel(1, 1), Some(RED));
        assert_eq!(fb.get_pixel(15, 9), Some(RED));
    }

    #[test]
    fn wide_line_is_thicker() {
        let mut fb = FrameBuffer::new(20, 20);
        fb.draw_line(Vec2::new(2.0, 10.0), Vec2::new(18.0, 10.0), RED, 3.0);
        assert_eq!(fb.get_pixel(10, 9), Some(RED));
        assert_eq!(fb.get_pixel(10, 11), Some(RED));
        assert_eq!(fb.get_pixel(10, 13), Some(Color::BLACK));
    }

    #[test]
    fn far_offscreen_lines_are_clipped() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.draw_line(Vec2::new(-1.0e9, 5.0), Vec2::new(1.0e9, 5.0), RED, 1.0);
        for x in 0..10 {
            assert_eq!(fb.get_pixel(x, 5), Some(RED), "x = {x}");
        }
        assert_eq!(fb.get_pixel(5, 4), Some(Color::BLACK));

        let white = Color::WHITE;
        fb.draw_line(Vec2::new(f32::NAN, 0.0), Vec2::new(5.0, 5.0), white, 1.0);
        fb.draw_line(Vec2::new(-50.0, -5.0), Vec2::new(-20.0, -9.0), white, 1.0);
        assert!(!fb.pixels().contains(&white.to_argb()));
    }

    #[test]
    fn clipped_ends_land_on_the_margin() {
        let bounds = (Vec2::new(-1.0, -1.0), Vec2::new(10.0, 10.0));
        let (from, to) = (Vec2::new(-1.0e9, 5.0), Vec2::new(1.0e9, 5.0));
        let (a, b) = clip_segment(from, to, bounds).unwrap();
        assert_eq!((a.x, a.y), (-1.0, 5.0));
        assert_eq!((b.x, b.y), (10.0, 5.0));
    }

    #[test]
    fn pixel_count_does_not_wrap() {
        assert_eq!(pixel_count(70_000, 70_000), 4_900_000_000);
        assert_eq!(pixel_count(0, 70_000), 0);
    }

    #[test]
    fn image_export_is_opaque_rgba() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.clear(Color::rgb(10, 20, 30));
        let image = fb.to_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn resize_reallocates() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.resize(8, 2);
        assert_eq!(fb.pixels().len(), 16);
        assert_eq!(fb.as_bytes().len(), 64);
        assert_eq!(fb.pitch(), 32);
    }
}
