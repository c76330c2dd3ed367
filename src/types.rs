//! Core types for the terminal host.
//!
//! The screen hands out plain numbers (angles, offsets, opacities). These
//! types are what those numbers turn into on a character grid.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels.
///
/// Integers for exact comparison in the diff renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    /// Orb accent
    pub const ORANGE: Self = Self::rgb(255, 94, 26);

    /// Linear interpolation, `t` clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
        Self {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
            a: mix(a.a, b.a),
        }
    }

    /// A glyph color at `opacity` over `background`.
    #[inline]
    pub fn faded(self, background: Self, opacity: f32) -> Self {
        Self::lerp(background, self, opacity)
    }
}

impl From<Rgba> for crossterm::style::Color {
    fn from(color: Rgba) -> Self {
        crossterm::style::Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes. Combine with `Attr::BOLD | Attr::DIM`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
    }
}

// =============================================================================
// Cell
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Cell {
    /// A blank cell on `bg`.
    pub const fn blank(bg: Rgba) -> Self {
        Self {
            char: ' ',
            fg: bg,
            bg,
            attrs: Attr::NONE,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(Rgba::WHITE)
    }
}

// =============================================================================
// Tests
// =============================================================================
