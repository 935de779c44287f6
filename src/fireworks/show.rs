use super::{Entropy, Firework};
use crate::canvas::Canvas;
use tracing::{debug, trace};

/// Chance per tick that a rocket launches on its own.
pub const LAUNCH_CHANCE: f32 = 0.05;
/// Per-tick blend toward the background, leaves motion trails.
pub const FADE_ALPHA: f32 = 0.1;

/// Owns every firework in flight and the random source that drives them.
pub struct Show<R: Entropy = fastrand::Rng> {
    fireworks: Vec<Firework>,
    rng: R,
    max_active: Option<usize>,
}

impl<R: Entropy> Show<R> {
    /// `max_active` caps how many fireworks can be in flight at once.
    pub fn new(rng: R, max_active: Option<usize>) -> Self {
        Self {
            fireworks: Vec::new(),
            rng,
            max_active,
        }
    }

    /// Advances the whole show by one frame and draws it.
    pub fn tick<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        canvas.fade_frame(FADE_ALPHA);

        if self.rng.unit() < LAUNCH_CHANCE {
            let (width, height) = canvas.size();
            let target_x = self.rng.unit() * width;
            let target_y = self.rng.unit() * height * 0.5;
            self.launch(&*canvas, target_x, target_y);
        }

        let rng = &mut self.rng;
        self.fireworks.retain_mut(|firework| {
            if firework.is_finished() {
                return false;
            }
            firework.update(rng);
            firework.draw(canvas);
            true
        });

        trace!(
            fireworks = self.fireworks.len(),
            particles = self.particle_count(),
            "tick"
        );
    }

    /// Sends a rocket from the bottom centre of the canvas toward
    /// `(target_x, target_y)`. Returns false if the cap is reached.
    pub fn launch<C: Canvas + ?Sized>(&mut self, canvas: &C, target_x: f32, target_y: f32) -> bool {
        if self.max_active.is_some_and(|max| self.fireworks.len() >= max) {
            debug!(active = self.fireworks.len(), "launch dropped, show is full");
            return false;
        }

        let (width, height) = canvas.size();
        let firework = Firework::new(width / 2.0, height, target_x, target_y, &mut self.rng);
        debug!(
            pattern = ?firework.pattern(),
            target_x,
            target_y,
            "firework launched"
        );
        self.fireworks.push(firework);
        true
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn len(&self) -> usize {
        self.fireworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fireworks.is_empty()
    }

    pub fn particle_count(&self) -> usize {
        self.fireworks.iter().map(|f| f.particles().len()).sum()
    }
}
