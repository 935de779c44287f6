//! Drawing-surface capability consumed by the simulation.

pub mod terminal;

pub use terminal::TerminalCanvas;

pub type Rgb = (u8, u8, u8);

/// A 2D surface measured in world units, with the origin in the top-left
/// corner and y growing downwards.
pub trait Canvas {
    fn size(&self) -> (f32, f32);

    /// Blends the whole surface toward the background by `alpha`, leaving a
    /// fading copy of previous frames behind.
    fn fade_frame(&mut self, alpha: f32);

    /// Composites a filled disc over the surface. `glow` is the width of a
    /// soft halo around the disc in world units (0 for none).
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32, glow: f32);
}

/// Hue in degrees (any value, wrapped), saturation and lightness in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self { hue, saturation, lightness }
    }

    pub fn to_rgb(self) -> Rgb {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        (
            ((r + m) * 255.0).round() as u8,
            ((g + m) * 255.0).round() as u8,
            ((b + m) * 255.0).round() as u8,
        )
    }
}
