//! Burst geometry. Every generator emits exactly `count` particles at the
//! explosion point, with velocities, hues and decay rates laid out by the
//! pattern.

use super::{Entropy, Particle};
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Circle,
    Heart,
    Spiral,
    DoubleRing,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::Circle,
        Pattern::Heart,
        Pattern::Spiral,
        Pattern::DoubleRing,
    ];

    pub fn random<R: Entropy + ?Sized>(rng: &mut R) -> Self {
        match (rng.unit() * 4.0) as usize {
            0 => Pattern::Circle,
            1 => Pattern::Heart,
            2 => Pattern::Spiral,
            _ => Pattern::DoubleRing,
        }
    }

    pub fn burst<R: Entropy + ?Sized>(
        self,
        x: f32,
        y: f32,
        count: usize,
        base_hue: f32,
        rng: &mut R,
    ) -> Vec<Particle> {
        match self {
            Pattern::Circle => circle(x, y, count, base_hue, rng),
            Pattern::Heart => heart(x, y, count, base_hue, rng),
            Pattern::Spiral => spiral(x, y, count, base_hue, rng),
            Pattern::DoubleRing => double_ring(x, y, count, base_hue, rng),
        }
    }
}

/// Point on the parametric heart curve, y pointing down the screen.
pub fn heart_shape(theta: f32) -> (f32, f32) {
    let x = 16.0 * theta.sin().powi(3);
    let y = -(13.0 * theta.cos()
        - 5.0 * (2.0 * theta).cos()
        - 2.0 * (3.0 * theta).cos()
        - (4.0 * theta).cos());
    (x, y)
}

fn circle<R: Entropy + ?Sized>(x: f32, y: f32, count: usize, base_hue: f32, rng: &mut R) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let angle = TAU / count as f32 * i as f32;
            let speed = 2.0 + rng.unit();
            let hue = base_hue + rng.unit() * 30.0 - 15.0;
            let decay = 0.015 + rng.unit() * 0.01;
            Particle::new(x, y, angle.cos() * speed, angle.sin() * speed, hue, decay, 1.0 + rng.unit())
        })
        .collect()
}

fn heart<R: Entropy + ?Sized>(x: f32, y: f32, count: usize, base_hue: f32, rng: &mut R) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let angle = TAU / count as f32 * i as f32;
            let (hx, hy) = heart_shape(angle);
            let speed = 2.0 + rng.unit();
            let hue = base_hue + rng.unit() * 30.0 - 15.0;
            let decay = 0.02 + rng.unit() * 0.01;
            Particle::new(x, y, hx * speed, hy * speed, hue, decay, 1.0 + rng.unit())
        })
        .collect()
}

// Four full turns, speed and hue ramp along the arm
fn spiral<R: Entropy + ?Sized>(x: f32, y: f32, count: usize, base_hue: f32, rng: &mut R) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            let angle = 4.0 * TAU * t;
            let speed = 1.0 + t * 2.0;
            let hue = base_hue + t * 60.0;
            let decay = 0.01 + t * 0.01;
            Particle::new(x, y, angle.cos() * speed, angle.sin() * speed, hue, decay, 1.0 + rng.unit())
        })
        .collect()
}

fn double_ring<R: Entropy + ?Sized>(x: f32, y: f32, count: usize, base_hue: f32, rng: &mut R) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let angle = TAU / count as f32 * i as f32;
            let (speed, hue_offset) = if i % 2 == 0 { (1.5, 0.0) } else { (2.5, 30.0) };
            Particle::new(
                x,
                y,
                angle.cos() * speed,
                angle.sin() * speed,
                base_hue + hue_offset,
                0.015,
                1.0 + rng.unit(),
            )
        })
        .collect()
}
