//! Barricade Invaders - a descending-grid arcade shooter
//!
//! Core modules:
//! - `sim`: Per-frame simulation (world state, step, collisions)
//! - `session`: Frame-loop controller (input, score, restart, RNG)
//! - `platform`: Browser input mapping
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::{RenderError, TuningError};
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Player ship defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 7.0;
    /// Gap between the player's bottom edge and the viewport floor
    pub const PLAYER_FLOOR_GAP: f32 = 20.0;

    /// Player bullet defaults
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    /// Live player bullets are capped at this count
    pub const MAX_PLAYER_BULLETS: usize = 5;

    /// Invader grid
    pub const INVADER_ROWS: u32 = 10;
    pub const INVADER_COLS: u32 = 25;
    pub const INVADER_WIDTH: f32 = 20.0;
    pub const INVADER_HEIGHT: f32 = 15.0;
    pub const INVADER_PADDING: f32 = 10.0;
    /// Top-left offset of the grid (both axes)
    pub const INVADER_ORIGIN: f32 = 30.0;
    /// Starting horizontal speed (pixels per frame)
    pub const INVADER_SPEED: f32 = 0.9;
    /// Drop applied to the whole grid on each edge bounce
    pub const INVADER_DESCENT: f32 = 20.0;

    /// Invader bullets
    pub const INVADER_BULLET_SPEED: f32 = 5.0;
    pub const INVADER_BULLET_WIDTH: f32 = 4.0;
    pub const INVADER_BULLET_HEIGHT: f32 = 10.0;
    /// Probability per frame that some invader fires
    pub const INVADER_FIRE_CHANCE: f64 = 0.052;

    /// Difficulty
    pub const KILL_SPEED_BONUS: f32 = 0.001;
    /// Fraction of viewport height the lowest invader must pass to trigger the boost
    pub const PACE_THRESHOLD: f32 = 0.4;
    pub const PACE_FACTOR: f32 = 1.5;

    /// Barricades
    pub const BARRICADE_BLOCK_SIZE: f32 = 8.0;
    pub const BARRICADE_BLOCKS_WIDE: u32 = 7;
    pub const BARRICADE_BLOCKS_HIGH: u32 = 4;
    pub const BARRICADE_COUNT: u32 = 4;
    /// Distance from the viewport bottom to the top of each cluster
    pub const BARRICADE_OFFSET: f32 = 120.0;
    pub const BARRICADE_HEALTH: u8 = 3;

    /// Upper bounds accepted for tuned layouts
    pub const MAX_INVADERS: u64 = 10_000;
    pub const MAX_BARRICADE_BLOCKS: u64 = 10_000;

    /// Score awarded per invader destroyed
    pub const SCORE_PER_KILL: u32 = 10;

    pub const MESSAGE_LOST: &str = "GAME OVER";
    pub const MESSAGE_WON: &str = "YOU WIN!";
}
