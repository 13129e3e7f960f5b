//! 8-bit RGB colors and the fixed renderer palette.

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scales each channel by `factor`, clamped to `[0, 255]` (truncating).
    pub fn scaled(self, factor: f32) -> Self {
        let channel = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Self::rgb(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Linear blend toward `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::rgb(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    /// Packs into ARGB8888 with full alpha.
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpacks an ARGB8888 pixel, ignoring alpha.
    pub const fn from_argb(argb: u32) -> Self {
        Self::rgb((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
    }
}

// Background gradient, top to bottom.
pub const SKY_TOP: Color = Color::rgb(32, 46, 68);
pub const SKY_BOTTOM: Color = Color::rgb(108, 148, 196);

pub const OUTLINE: Color = Color::rgb(18, 18, 22);

pub const AXIS_X: Color = Color::rgb(215, 72, 68);
pub const AXIS_Y: Color = Color::rgb(80, 190, 95);
pub const AXIS_Z: Color = Color::rgb(72, 132, 224);
