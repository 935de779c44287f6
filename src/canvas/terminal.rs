use super::{Canvas, Rgb};
use std::io::Write;

// Halo brightness relative to the disc it surrounds
const GLOW_STRENGTH: f32 = 0.35;

/// Canvas backed by a grid of half-block pixels: every terminal cell holds
/// two pixels stacked vertically, and each pixel spans `scale` world units.
pub struct TerminalCanvas {
    width: usize,
    height: usize,
    scale: f32,
    background: Rgb,
    pixels: Vec<[f32; 3]>,
    output_buf: Vec<u8>,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16, scale: f32, background: Rgb) -> Self {
        let mut canvas = Self {
            width: 0,
            height: 0,
            scale,
            background,
            pixels: Vec::new(),
            output_buf: Vec::new(),
        };
        canvas.resize(cols, rows);
        canvas
    }

    /// Re-allocates the pixel grid for a new terminal size, cleared to the
    /// background colour.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.width = cols as usize;
        self.height = rows as usize * 2;
        let bg = self.background;
        self.pixels = vec![[bg.0 as f32, bg.1 as f32, bg.2 as f32]; self.width * self.height];
        self.output_buf = Vec::with_capacity(self.width * self.height * 25);
    }

    pub fn pixel_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// World coordinates of the centre of the upper pixel of a terminal cell.
    pub fn to_world(&self, column: u16, row: u16) -> (f32, f32) {
        (
            (column as f32 + 0.5) * self.scale,
            (row as f32 * 2.0 + 0.5) * self.scale,
        )
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let [r, g, b] = self.pixels[y * self.width + x];
        (r.round() as u8, g.round() as u8, b.round() as u8)
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgb, amount: f32) {
        let px = &mut self.pixels[y * self.width + x];
        px[0] += (color.0 as f32 - px[0]) * amount;
        px[1] += (color.1 as f32 - px[1]) * amount;
        px[2] += (color.2 as f32 - px[2]) * amount;
    }

    /// Writes the frame as true-colour half blocks, only emitting colour
    /// escapes when a colour changes.
    pub fn present<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let mut prev_top: Option<Rgb> = None;
        let mut prev_bot: Option<Rgb> = None;

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top = self.pixel(x, y);
                let bot = if y + 1 < self.height { self.pixel(x, y + 1) } else { top };

                if prev_top != Some(top) {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = Some(top);
                }
                if prev_bot != Some(bot) {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = Some(bot);
                }
                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top = None;
            prev_bot = None;
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()
    }
}

impl Canvas for TerminalCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width as f32 * self.scale, self.height as f32 * self.scale)
    }

    fn fade_frame(&mut self, alpha: f32) {
        let bg = [self.background.0 as f32, self.background.1 as f32, self.background.2 as f32];
        for px in &mut self.pixels {
            for (channel, target) in px.iter_mut().zip(bg) {
                *channel += (target - *channel) * alpha;
            }
        }
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32, glow: f32) {
        if self.width == 0 || self.height == 0 || alpha <= 0.0 {
            return;
        }

        let cx = x / self.scale;
        let cy = y / self.scale;
        let r = radius / self.scale;
        let g = glow / self.scale;
        let reach = r + g;

        let x0 = (cx - reach).floor().max(0.0) as usize;
        let y0 = (cy - reach).floor().max(0.0) as usize;
        let x1 = (cx + reach).ceil().min(self.width as f32 - 1.0);
        let y1 = (cy + reach).ceil().min(self.height as f32 - 1.0);
        if x1 < 0.0 || y1 < 0.0 {
            return;
        }
        let (x1, y1) = (x1 as usize, y1 as usize);

        // Sub-pixel discs still light the pixel they sit in
        let home = (cx.floor(), cy.floor());

        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();

                let coverage = if dist <= r || (px as f32, py as f32) == home {
                    1.0
                } else if g > 0.0 && dist <= reach {
                    (1.0 - (dist - r) / g) * GLOW_STRENGTH
                } else {
                    0.0
                };

                if coverage > 0.0 {
                    self.blend(px, py, color, (alpha * coverage).min(1.0));
                }
            }
        }
    }
}
