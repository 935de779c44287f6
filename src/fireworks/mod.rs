pub mod firework;
pub mod particle;
pub mod pattern;
pub mod show;

pub use firework::{Firework, Stage};
pub use particle::Particle;
pub use pattern::Pattern;
pub use show::Show;

/// Source of uniform randomness for launches and bursts.
pub trait Entropy {
    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f32;
}

impl Entropy for fastrand::Rng {
    fn unit(&mut self) -> f32 {
        self.f32()
    }
}
