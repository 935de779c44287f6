use crate::canvas::{Canvas, Hsl, Rgb};

pub const GRAVITY: f32 = 0.05;
const RESISTANCE: f32 = 0.98;
const SHRINK: f32 = 0.96;
const GLOW: f32 = 4.0;

const SATURATION: f32 = 0.7;
const LIGHTNESS: f32 = 0.6;

// Alpha left over after the last decay step is f32 rounding, not light
const FADED: f32 = 1e-5;

/// One spark of a burst. Velocities are in world units per tick.
#[derive(Debug, Clone)]
pub struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    hue: f32,
    color: Rgb,
    alpha: f32,
    decay: f32,
    size: f32,
}

impl Particle {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, hue: f32, decay: f32, size: f32) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            hue,
            color: Hsl::new(hue, SATURATION, LIGHTNESS).to_rgb(),
            alpha: 1.0,
            decay,
            size,
        }
    }

    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += GRAVITY;
        self.vx *= RESISTANCE;
        self.vy *= RESISTANCE;
        self.alpha -= self.decay;
        self.size *= SHRINK;
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.fill_circle(self.x, self.y, self.size, self.color, self.alpha, GLOW);
    }

    pub fn is_alive(&self) -> bool {
        self.alpha > FADED
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> (f32, f32) {
        (self.vx, self.vy)
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}
