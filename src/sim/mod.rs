//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One step per rendered frame
//! - Randomness only through the injected RNG
//! - Stable iteration order (creation order, newest first where it matters)

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use state::{
    BarricadeBlock, Bullet, Direction, GamePhase, HealthTier, Invader, Player, World,
    build_barricades, build_invaders,
};
pub use tick::{TickInput, TickOutcome, tick};
