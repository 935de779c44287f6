//! Terminal fireworks: rockets climb toward a target, burst into one of
//! four patterns, and the sparks fall and fade under gravity and drag.

pub mod canvas;
pub mod config;
pub mod error;
pub mod fireworks;

pub use canvas::{Canvas, TerminalCanvas};
pub use error::{Result, ShowError};
pub use fireworks::{Entropy, Firework, Particle, Pattern, Show, Stage};
