use super::{Entropy, Particle, Pattern};
use crate::canvas::{Canvas, Hsl, Rgb};
use std::collections::VecDeque;
use tracing::debug;

pub const BURST_COUNT: usize = 150;
pub const TRAIL_LEN: usize = 20;

const SPEED: f32 = 3.0;
const TOLERANCE: f32 = 5.0;
const TRAIL_FADE: f32 = 0.96;
const TRAIL_COLOR: Rgb = (255, 220, 180);
const TRAIL_RADIUS: f32 = 1.0;
const ROCKET_RADIUS: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Rocket still climbing toward its target.
    Ascending,
    /// Burst released, particles still fading.
    Exploded,
    /// Nothing left to draw; the show may drop it.
    Finished,
}

#[derive(Debug, Clone, Copy)]
struct TrailPoint {
    x: f32,
    y: f32,
    alpha: f32,
}

#[derive(Debug, Clone)]
pub struct Firework {
    x: f32,
    y: f32,
    target_x: f32,
    target_y: f32,
    vx: f32,
    vy: f32,
    alive: bool,
    particles: Vec<Particle>,
    trail: VecDeque<TrailPoint>,
    pattern: Pattern,
    base_hue: f32,
}

impl Firework {
    pub fn new<R: Entropy + ?Sized>(x: f32, y: f32, target_x: f32, target_y: f32, rng: &mut R) -> Self {
        let pattern = Pattern::random(rng);
        let base_hue = rng.unit() * 360.0;
        Self::with_pattern(x, y, target_x, target_y, pattern, base_hue)
    }

    pub fn with_pattern(
        x: f32,
        y: f32,
        target_x: f32,
        target_y: f32,
        pattern: Pattern,
        base_hue: f32,
    ) -> Self {
        // atan2(0, 0) is 0, so a rocket launched at its own target still moves
        let angle = (target_y - y).atan2(target_x - x);

        Self {
            x,
            y,
            target_x,
            target_y,
            vx: angle.cos() * SPEED,
            vy: angle.sin() * SPEED,
            alive: true,
            particles: Vec::new(),
            trail: VecDeque::with_capacity(TRAIL_LEN + 1),
            pattern,
            base_hue,
        }
    }

    pub fn update<R: Entropy + ?Sized>(&mut self, rng: &mut R) {
        if self.alive {
            self.x += self.vx;
            self.y += self.vy;

            self.trail.push_back(TrailPoint { x: self.x, y: self.y, alpha: 1.0 });
            if self.trail.len() > TRAIL_LEN {
                self.trail.pop_front();
            }
        }

        for point in &mut self.trail {
            point.alpha *= TRAIL_FADE;
        }

        if self.alive && self.in_range() {
            self.explode(rng);
        }
    }

    fn in_range(&self) -> bool {
        (self.x - self.target_x).abs() < TOLERANCE && (self.y - self.target_y).abs() < TOLERANCE
    }

    fn explode<R: Entropy + ?Sized>(&mut self, rng: &mut R) {
        self.particles = self.pattern.burst(self.x, self.y, BURST_COUNT, self.base_hue, rng);
        self.alive = false;
        debug!(
            pattern = ?self.pattern,
            x = self.x,
            y = self.y,
            particles = self.particles.len(),
            "firework exploded"
        );
    }

    /// Renders the trail, the rocket while it climbs, then ages every
    /// particle by one tick, dropping the ones that have faded out.
    pub fn draw<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        for point in &self.trail {
            canvas.fill_circle(point.x, point.y, TRAIL_RADIUS, TRAIL_COLOR, point.alpha, 0.0);
        }

        if self.alive {
            let color = Hsl::new(self.base_hue, 0.5, 0.5).to_rgb();
            canvas.fill_circle(self.x, self.y, ROCKET_RADIUS, color, 1.0, 0.0);
        }

        self.particles.retain_mut(|particle| {
            if !particle.is_alive() {
                return false;
            }
            particle.update();
            if !particle.is_alive() {
                return false;
            }
            particle.draw(canvas);
            true
        });
    }

    pub fn stage(&self) -> Stage {
        if self.alive {
            Stage::Ascending
        } else if self.particles.is_empty() {
            Stage::Finished
        } else {
            Stage::Exploded
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_finished(&self) -> bool {
        !self.alive && self.particles.is_empty()
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn target(&self) -> (f32, f32) {
        (self.target_x, self.target_y)
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub fn base_hue(&self) -> f32 {
        self.base_hue
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::tests::{Call, RecordingCanvas};
    use crate::fireworks::tests::Sequence;

    fn tick(fw: &mut Firework, rng: &mut fastrand::Rng, canvas: &mut RecordingCanvas) {
        fw.update(rng);
        fw.draw(canvas);
    }

    #[test]
    fn test_new_picks_pattern_and_hue_from_entropy() {
        let mut rng = Sequence::new(&[0.6, 0.5]);
        let fw = Firework::new(0.0, 0.0, 10.0, 10.0, &mut rng);
        assert_eq!(fw.pattern(), Pattern::Spiral);
        assert_eq!(fw.base_hue(), 180.0);
        assert_eq!(fw.stage(), Stage::Ascending);
    }

    #[test]
    fn test_velocity_points_at_target() {
        let mut fw = Firework::with_pattern(0.0, 100.0, 0.0, 0.0, Pattern::Circle, 0.0);
        let mut rng = fastrand::Rng::with_seed(1);
        fw.update(&mut rng);
        let (x, y) = fw.position();
        assert!(x.abs() < 1e-5);
        assert!((y - 97.0).abs() < 1e-5);
    }

    #[test]
    fn test_start_at_target_explodes_immediately() {
        let mut fw = Firework::with_pattern(500.0, 800.0, 500.0, 800.0, Pattern::Heart, 0.0);
        let mut rng = fastrand::Rng::with_seed(2);
        fw.update(&mut rng);

        assert!(!fw.is_alive());
        assert_eq!(fw.stage(), Stage::Exploded);
        assert_eq!(fw.particles().len(), BURST_COUNT);
    }

    #[test]
    fn test_explodes_once_inside_tolerance() {
        let mut fw = Firework::with_pattern(300.0, 600.0, 420.0, 200.0, Pattern::Circle, 90.0);
        let mut rng = fastrand::Rng::with_seed(3);
        let mut canvas = RecordingCanvas::new(1000.0, 1000.0);
        let mut transitions = 0;
        let mut was_alive = fw.is_alive();

        for _ in 0..2000 {
            tick(&mut fw, &mut rng, &mut canvas);
            if was_alive && !fw.is_alive() {
                transitions += 1;
                let (x, y) = fw.position();
                assert!((x - 420.0).abs() < 5.0 && (y - 200.0).abs() < 5.0);
            }
            assert!(fw.is_alive() || transitions == 1);
            was_alive = fw.is_alive();
        }

        assert_eq!(transitions, 1);
        assert!(fw.is_finished());
    }

    #[test]
    fn test_rocket_stops_after_explosion() {
        let mut fw = Firework::with_pattern(0.0, 0.0, 0.0, 0.0, Pattern::DoubleRing, 0.0);
        let mut rng = fastrand::Rng::with_seed(4);
        fw.update(&mut rng);
        let at_burst = fw.position();
        let burst = fw.particles().len();

        fw.update(&mut rng);
        fw.update(&mut rng);
        assert_eq!(fw.position(), at_burst);
        assert_eq!(fw.particles().len(), burst);
    }

    #[test]
    fn test_particles_only_after_explosion() {
        let mut fw = Firework::with_pattern(0.0, 1000.0, 0.0, 0.0, Pattern::Spiral, 0.0);
        let mut rng = fastrand::Rng::with_seed(5);
        let mut canvas = RecordingCanvas::new(1000.0, 1000.0);
        for _ in 0..1000 {
            tick(&mut fw, &mut rng, &mut canvas);
            if fw.is_alive() {
                assert!(fw.particles().is_empty());
            }
        }
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut fw = Firework::with_pattern(0.0, 10_000.0, 0.0, 0.0, Pattern::Circle, 0.0);
        let mut rng = fastrand::Rng::with_seed(6);
        for i in 0..100 {
            fw.update(&mut rng);
            assert_eq!(fw.trail_len(), (i + 1).min(TRAIL_LEN));
        }
    }

    #[test]
    fn test_trail_fades_every_tick() {
        let mut fw = Firework::with_pattern(0.0, 0.0, 0.0, 0.0, Pattern::Circle, 0.0);
        let mut rng = fastrand::Rng::with_seed(7);
        fw.update(&mut rng);
        fw.update(&mut rng);

        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        fw.draw(&mut canvas);
        match canvas.calls.first() {
            Some(Call::Circle { alpha, color, radius, .. }) => {
                assert!((alpha - 0.96 * 0.96).abs() < 1e-6);
                assert_eq!(*color, TRAIL_COLOR);
                assert_eq!(*radius, TRAIL_RADIUS);
            }
            other => panic!("expected trail point, got {other:?}"),
        }
    }

    #[test]
    fn test_rocket_drawn_only_while_alive() {
        let mut fw = Firework::with_pattern(0.0, 1000.0, 0.0, 0.0, Pattern::Circle, 0.0);
        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        fw.draw(&mut canvas);
        let rocket = Call::Circle {
            x: 0.0,
            y: 1000.0,
            radius: ROCKET_RADIUS,
            color: Hsl::new(0.0, 0.5, 0.5).to_rgb(),
            alpha: 1.0,
            glow: 0.0,
        };
        assert_eq!(canvas.calls, vec![rocket]);

        let mut fw = Firework::with_pattern(0.0, 0.0, 0.0, 0.0, Pattern::Circle, 0.0);
        let mut rng = fastrand::Rng::with_seed(8);
        fw.update(&mut rng);
        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        fw.draw(&mut canvas);
        assert!(canvas.circles().all(|c| !matches!(c, Call::Circle { radius, .. } if *radius == ROCKET_RADIUS)));
    }

    #[test]
    fn test_never_draws_faded_particles() {
        let mut fw = Firework::with_pattern(50.0, 50.0, 50.0, 50.0, Pattern::Heart, 300.0);
        let mut rng = fastrand::Rng::with_seed(9);
        let mut canvas = RecordingCanvas::new(100.0, 100.0);

        while !fw.is_finished() {
            tick(&mut fw, &mut rng, &mut canvas);
            assert!(fw.particles().iter().all(Particle::is_alive));
        }

        for call in canvas.circles() {
            if let Call::Circle { alpha, .. } = call {
                assert!(*alpha > 0.0);
            }
        }
    }

    #[test]
    fn test_each_particle_aged_once_per_draw() {
        let mut fw = Firework::with_pattern(0.0, 0.0, 0.0, 0.0, Pattern::DoubleRing, 0.0);
        let mut rng = fastrand::Rng::with_seed(10);
        fw.update(&mut rng);

        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        fw.draw(&mut canvas);
        for p in fw.particles() {
            assert!((p.alpha() - (1.0 - 0.015)).abs() < 1e-6);
        }
        assert_eq!(canvas.circles().count(), 1 + BURST_COUNT);
    }

    #[test]
    fn test_finished_only_when_empty() {
        let mut fw = Firework::with_pattern(0.0, 0.0, 0.0, 0.0, Pattern::Spiral, 0.0);
        let mut rng = fastrand::Rng::with_seed(11);
        fw.update(&mut rng);
        assert!(!fw.is_finished());

        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        let mut ticks = 0;
        while !fw.particles().is_empty() {
            assert!(!fw.is_finished());
            tick(&mut fw, &mut rng, &mut canvas);
            ticks += 1;
        }
        assert!(fw.is_finished());
        assert_eq!(fw.stage(), Stage::Finished);
        // Slowest spiral particle decays at 0.01 per tick
        assert_eq!(ticks, 100);
    }

    #[test]
    fn test_decay_002_spark_gone_after_fifty_draws() {
        let mut fw = Firework::with_pattern(0.0, 0.0, 100.0, 100.0, Pattern::Circle, 0.0);
        fw.alive = false;
        fw.particles = vec![Particle::new(10.0, 10.0, 0.0, 0.0, 0.0, 0.02, 1.0)];

        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        for pass in 1..=50 {
            fw.draw(&mut canvas);
            assert_eq!(fw.particles().len(), usize::from(pass < 50), "pass {pass}");
        }

        assert!(fw.particles().is_empty());
        assert!(fw.is_finished());
        assert_eq!(canvas.circles().count(), 49);
        for call in canvas.circles() {
            if let Call::Circle { alpha, .. } = call {
                assert!(*alpha > 0.0);
            }
        }
    }
}
