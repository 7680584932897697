//! World state and world construction
//!
//! Everything the simulation mutates lives in [`World`]. A world is built once
//! per session for a viewport size and is thrown away on restart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Every invader destroyed
    Won,
    /// Invaders reached the player's row, or the player was shot
    Lost,
}

impl GamePhase {
    pub fn is_over(self) -> bool {
        self != GamePhase::Playing
    }

    /// Text shown on the end-of-game overlay
    pub fn message(self) -> Option<&'static str> {
        match self {
            GamePhase::Playing => None,
            GamePhase::Won => Some(MESSAGE_WON),
            GamePhase::Lost => Some(MESSAGE_LOST),
        }
    }
}

/// Shared horizontal direction of the invader grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Player {
    /// Collision rectangle of the ship
    pub fn hitbox(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A projectile; direction and speed depend on which list it lives in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Invader {
    pub rect: Rect,
}

/// Color band of a barricade block, by remaining health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    Full,
    Damaged,
    Critical,
}

/// One destructible unit of cover
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarricadeBlock {
    pub rect: Rect,
    pub health: u8,
}

impl BarricadeBlock {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            health: BARRICADE_HEALTH,
        }
    }

    /// Take one bullet hit
    pub fn hit(&mut self) {
        self.health = self.health.saturating_sub(1);
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    pub fn tier(&self) -> HealthTier {
        match self.health {
            h if h >= BARRICADE_HEALTH => HealthTier::Full,
            2 => HealthTier::Damaged,
            _ => HealthTier::Critical,
        }
    }
}

/// Arch notch carved out of every barricade cluster: the middle third of the
/// columns across the lower half of the rows. With the default 7x4 shape that
/// is columns 2 through 4 of rows 2 and 3. Clusters narrower than three
/// blocks or only one block high keep no notch.
fn in_arch(row: u32, col: u32, wide: u32, high: u32) -> bool {
    let side = wide / 3;
    side > 0 && high > 1 && row >= high / 2 && col >= side && col < wide - side
}

/// Build the barricade clusters for a viewport
pub fn build_barricades(width: f32, height: f32, tuning: &Tuning) -> Vec<BarricadeBlock> {
    let block = tuning.barricade_block_size;
    let cluster_width = block * tuning.barricade_blocks_wide as f32;
    let count = tuning.barricade_count as f32;
    let spacing = (width - count * cluster_width) / (count + 1.0);
    let start_y = height - tuning.barricade_offset;

    let (wide, high) = (tuning.barricade_blocks_wide, tuning.barricade_blocks_high);
    let capacity = (wide as usize)
        .saturating_mul(high as usize)
        .saturating_mul(tuning.barricade_count as usize)
        .min(MAX_BARRICADE_BLOCKS as usize);
    let mut blocks = Vec::with_capacity(capacity);

    for i in 0..tuning.barricade_count {
        let start_x = spacing * (i + 1) as f32 + cluster_width * i as f32;
        for row in 0..high {
            for col in 0..wide {
                if in_arch(row, col, wide, high) {
                    continue;
                }
                blocks.push(BarricadeBlock::new(Rect::new(
                    start_x + col as f32 * block,
                    start_y + row as f32 * block,
                    block,
                    block,
                )));
            }
        }
    }

    blocks
}

/// Build the invader grid (independent of viewport size)
pub fn build_invaders(tuning: &Tuning) -> Vec<Invader> {
    let pitch_x = tuning.invader_width + tuning.invader_padding;
    let pitch_y = tuning.invader_height + tuning.invader_padding;

    let capacity = (tuning.invader_rows as usize)
        .saturating_mul(tuning.invader_cols as usize)
        .min(MAX_INVADERS as usize);
    let mut invaders = Vec::with_capacity(capacity);
    for row in 0..tuning.invader_rows {
        for col in 0..tuning.invader_cols {
            invaders.push(Invader {
                rect: Rect::new(
                    col as f32 * pitch_x + tuning.invader_origin,
                    row as f32 * pitch_y + tuning.invader_origin,
                    tuning.invader_width,
                    tuning.invader_height,
                ),
            });
        }
    }
    invaders
}

/// Complete mutable state of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Viewport size the world was built for
    pub viewport: Vec2,
    pub player: Player,
    /// Player bullets, oldest first
    pub bullets: Vec<Bullet>,
    /// Invaders in creation order
    pub invaders: Vec<Invader>,
    pub invader_bullets: Vec<Bullet>,
    /// Barricade blocks in creation order
    pub barricades: Vec<BarricadeBlock>,
    pub direction: Direction,
    /// Horizontal invader speed (pixels per frame); only ever grows
    pub invader_speed: f32,
    /// One-shot pace escalation already applied
    pub speed_boosted: bool,
    pub phase: GamePhase,
}

impl World {
    /// Build the starting world for a viewport
    pub fn new(width: f32, height: f32, tuning: &Tuning) -> Self {
        let player = Player {
            pos: Vec2::new(
                (width - tuning.player_width) / 2.0,
                height - tuning.player_height - tuning.player_floor_gap,
            ),
            size: Vec2::new(tuning.player_width, tuning.player_height),
        };

        Self {
            viewport: Vec2::new(width, height),
            player,
            bullets: Vec::new(),
            invaders: build_invaders(tuning),
            invader_bullets: Vec::new(),
            barricades: build_barricades(width, height, tuning),
            direction: Direction::Right,
            invader_speed: tuning.invader_speed,
            speed_boosted: false,
            phase: GamePhase::Playing,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    pub fn message(&self) -> Option<&'static str> {
        self.phase.message()
    }

    /// Enter a terminal phase; the first terminal phase of a session sticks
    pub fn finish(&mut self, phase: GamePhase) {
        if self.phase == GamePhase::Playing && phase.is_over() {
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_800x600() -> World {
        World::new(800.0, 600.0, &Tuning::default())
    }

    #[test]
    fn test_new_world_collections() {
        let world = world_800x600();
        assert_eq!(world.invaders.len(), (INVADER_ROWS * INVADER_COLS) as usize);
        assert!(world.bullets.is_empty());
        assert!(world.invader_bullets.is_empty());
        assert_eq!(world.direction, Direction::Right);
        assert!((world.invader_speed - INVADER_SPEED).abs() < 0.001);
        assert!(!world.speed_boosted);
        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.message(), None);
    }

    #[test]
    fn test_player_centered_near_floor() {
        let world = world_800x600();
        assert!((world.player.pos.x - 380.0).abs() < 0.001);
        assert!((world.player.pos.y - 560.0).abs() < 0.001);
        let hitbox = world.player.hitbox();
        assert!((hitbox.size.x - PLAYER_WIDTH).abs() < 0.001);
        assert!((hitbox.size.y - PLAYER_HEIGHT).abs() < 0.001);
    }

    #[test]
    fn test_invader_grid_layout() {
        let world = world_800x600();
        let first = world.invaders[0].rect;
        assert!((first.pos.x - 30.0).abs() < 0.001);
        assert!((first.pos.y - 30.0).abs() < 0.001);

        // Second column, first row
        let second = world.invaders[1].rect;
        assert!((second.pos.x - 60.0).abs() < 0.001);
        assert!((second.pos.y - 30.0).abs() < 0.001);

        // First column, second row
        let next_row = world.invaders[INVADER_COLS as usize].rect;
        assert!((next_row.pos.x - 30.0).abs() < 0.001);
        assert!((next_row.pos.y - 55.0).abs() < 0.001);
    }

    #[test]
    fn test_invader_grid_ignores_viewport() {
        let tuning = Tuning::default();
        let small = World::new(200.0, 200.0, &tuning);
        let large = World::new(1600.0, 1200.0, &tuning);
        assert_eq!(small.invaders, large.invaders);
    }

    #[test]
    fn test_barricade_count_and_arch() {
        let world = world_800x600();
        // 7x4 blocks minus a 3x2 notch, four clusters
        assert_eq!(world.barricades.len(), 4 * (28 - 6));
        assert!(world.barricades.iter().all(|b| b.health == BARRICADE_HEALTH));

        // Nothing inside the notch of the first cluster
        let spacing = (800.0 - 4.0 * 56.0) / 5.0;
        let notch = Rect::new(spacing + 16.5, 480.0 + 16.5, 23.0, 15.0);
        assert!(!world.barricades.iter().any(|b| b.rect.overlaps(&notch)));
    }

    #[test]
    fn test_arch_notch_follows_cluster_shape() {
        let cluster = |wide: u32, high: u32| {
            let tuning = Tuning {
                barricade_blocks_wide: wide,
                barricade_blocks_high: high,
                barricade_count: 1,
                ..Tuning::default()
            };
            build_barricades(800.0, 600.0, &tuning)
        };

        // 3 wide: only the centre column is carved, in rows 2 and 3
        let narrow = cluster(3, 4);
        assert_eq!(narrow.len(), 12 - 2);
        let left = narrow.iter().map(|b| b.rect.left()).fold(f32::INFINITY, f32::min);
        let carved_x = left + BARRICADE_BLOCK_SIZE;
        assert!(
            !narrow
                .iter()
                .any(|b| (b.rect.left() - carved_x).abs() < 0.001 && b.rect.top() >= 480.0 + 16.0)
        );

        // 9 wide: columns 3 through 5
        assert_eq!(cluster(9, 4).len(), 36 - 6);
        // Too narrow or too flat for a notch
        assert_eq!(cluster(2, 4).len(), 8);
        assert_eq!(cluster(7, 1).len(), 7);
    }

    #[test]
    fn test_barricades_have_equal_margins() {
        let world = world_800x600();
        let left = world
            .barricades
            .iter()
            .map(|b| b.rect.left())
            .fold(f32::INFINITY, f32::min);
        let right = world
            .barricades
            .iter()
            .map(|b| b.rect.right())
            .fold(f32::NEG_INFINITY, f32::max);
        assert!((left - (800.0 - right)).abs() < 0.01);

        let top = world
            .barricades
            .iter()
            .map(|b| b.rect.top())
            .fold(f32::INFINITY, f32::min);
        assert!((top - 480.0).abs() < 0.001);
    }

    #[test]
    fn test_block_health_tiers() {
        let mut block = BarricadeBlock::new(Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(block.tier(), HealthTier::Full);
        block.hit();
        assert_eq!(block.tier(), HealthTier::Damaged);
        block.hit();
        assert_eq!(block.tier(), HealthTier::Critical);
        assert!(!block.is_destroyed());
        block.hit();
        assert!(block.is_destroyed());
        block.hit();
        assert_eq!(block.health, 0);
    }

    #[test]
    fn test_first_terminal_phase_sticks() {
        let mut world = world_800x600();
        world.finish(GamePhase::Lost);
        world.finish(GamePhase::Won);
        assert_eq!(world.phase, GamePhase::Lost);
        assert_eq!(world.message(), Some(MESSAGE_LOST));
    }

    #[test]
    fn test_direction_flip() {
        assert_eq!(Direction::Right.flipped(), Direction::Left);
        assert_eq!(Direction::Left.flipped(), Direction::Right);
        assert!((Direction::Left.sign() + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_world_snapshot_serializes() {
        let world = world_800x600();
        let json = serde_json::to_string(&world).expect("world should serialize");
        let back: World = serde_json::from_str(&json).expect("world should deserialize");
        assert_eq!(world, back);
    }
}
