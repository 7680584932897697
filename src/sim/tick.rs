//! Per-frame simulation step
//!
//! One call to [`tick`] advances the world by exactly one rendered frame.
//! The phase order below is part of the game rules: in particular the
//! invaders-reach-player loss is checked before bullets are resolved, so a
//! frame that does both ends in a loss.

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use super::state::{Bullet, GamePhase, World};
use crate::consts::*;
use crate::tuning::Tuning;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move-left held
    pub left: bool,
    /// Move-right held
    pub right: bool,
    /// Fire pressed since the previous frame (edge, not level)
    pub fire: bool,
}

/// What a single frame produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Score gained this frame
    pub gained: u32,
    /// A player bullet was spawned; the fire request is spent
    pub fired: bool,
}

/// Advance the world by one frame.
///
/// Does nothing once the world has reached a terminal phase.
pub fn tick(
    world: &mut World,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> TickOutcome {
    if world.is_over() {
        return TickOutcome::default();
    }

    move_player(world, input, tuning);
    let fired = input.fire && fire_player_bullet(world, tuning);
    advance_player_bullets(world, tuning);

    let (edge_reached, lowest_y) = advance_invaders(world);
    if edge_reached {
        world.direction = world.direction.flipped();
        let drop = Vec2::new(0.0, tuning.invader_descent);
        for invader in &mut world.invaders {
            invader.rect.translate(drop);
        }
        log::debug!("Invaders bounced, now heading {:?}", world.direction);
    }

    if !world.speed_boosted && lowest_y > world.viewport.y * tuning.pace_threshold {
        world.invader_speed *= tuning.pace_factor;
        world.speed_boosted = true;
        log::debug!("Invader pace raised to {:.3}", world.invader_speed);
    }

    fire_invader_bullet(world, tuning, rng);
    advance_invader_bullets(world, tuning);

    let gained = resolve_player_bullets(world, tuning);
    resolve_invader_bullets(world);
    crush_barricades(world);
    world.barricades.retain(|b| !b.is_destroyed());

    if world.invaders.is_empty() {
        world.finish(GamePhase::Won);
    }
    if let Some(message) = world.message() {
        log::debug!("World reached a terminal phase: {message}");
    }

    TickOutcome { gained, fired }
}

/// Held direction keys move the ship; the result is clamped to the viewport
fn move_player(world: &mut World, input: &TickInput, tuning: &Tuning) {
    let mut x = world.player.pos.x;
    if input.left {
        x -= tuning.player_speed;
    }
    if input.right {
        x += tuning.player_speed;
    }
    let max_x = (world.viewport.x - world.player.size.x).max(0.0);
    world.player.pos.x = x.clamp(0.0, max_x);
}

/// Spawn a bullet from the top-center of the ship, respecting the live cap.
/// Returns whether a bullet was spawned.
fn fire_player_bullet(world: &mut World, tuning: &Tuning) -> bool {
    if world.bullets.len() >= MAX_PLAYER_BULLETS {
        return false;
    }
    let ship = world.player.hitbox();
    world.bullets.push(Bullet {
        rect: Rect::new(
            ship.center_x() - tuning.bullet_width / 2.0,
            ship.top() - tuning.bullet_height,
            tuning.bullet_width,
            tuning.bullet_height,
        ),
    });
    true
}

fn advance_player_bullets(world: &mut World, tuning: &Tuning) {
    let step = Vec2::new(0.0, -tuning.bullet_speed);
    for bullet in &mut world.bullets {
        bullet.rect.translate(step);
    }
    world.bullets.retain(|b| b.rect.top() > 0.0);
}

/// Slide the grid sideways. Returns whether any invader touched a side of the
/// viewport and the lowest invader top seen this frame. Sets the loss phase if
/// any invader has reached the player's row.
fn advance_invaders(world: &mut World) -> (bool, f32) {
    let step = Vec2::new(world.invader_speed * world.direction.sign(), 0.0);
    let player_y = world.player.pos.y;
    let width = world.viewport.x;

    let mut edge_reached = false;
    let mut reached_player = false;
    let mut lowest_y = 0.0_f32;

    for invader in &mut world.invaders {
        invader.rect.translate(step);
        if invader.rect.left() <= 0.0 || invader.rect.left() >= width - invader.rect.size.x {
            edge_reached = true;
        }
        if invader.rect.bottom() >= player_y {
            reached_player = true;
        }
        lowest_y = lowest_y.max(invader.rect.top());
    }

    if reached_player {
        world.finish(GamePhase::Lost);
    }
    (edge_reached, lowest_y)
}

/// At most one invader shot per frame, from a uniformly chosen live invader
fn fire_invader_bullet(world: &mut World, tuning: &Tuning, rng: &mut impl Rng) {
    if world.invaders.is_empty() || rng.random::<f64>() >= tuning.invader_fire_chance {
        return;
    }
    let shooter = world.invaders[rng.random_range(0..world.invaders.len())].rect;
    world.invader_bullets.push(Bullet {
        rect: Rect::new(
            shooter.center_x() - tuning.invader_bullet_width / 2.0,
            shooter.bottom(),
            tuning.invader_bullet_width,
            tuning.invader_bullet_height,
        ),
    });
}

fn advance_invader_bullets(world: &mut World, tuning: &Tuning) {
    let step = Vec2::new(0.0, tuning.invader_bullet_speed);
    for bullet in &mut world.invader_bullets {
        bullet.rect.translate(step);
    }
    let floor = world.viewport.y;
    world.invader_bullets.retain(|b| b.rect.top() < floor);
}

/// Newest bullet first; each bullet stops at the first barricade block or
/// invader it overlaps. Blocks shield invaders behind them.
fn resolve_player_bullets(world: &mut World, tuning: &Tuning) -> u32 {
    let mut gained = 0;

    for i in (0..world.bullets.len()).rev() {
        let bullet = world.bullets[i].rect;

        if let Some(block) = world
            .barricades
            .iter_mut()
            .rev()
            .find(|b| b.rect.overlaps(&bullet))
        {
            block.hit();
            world.bullets.remove(i);
            continue;
        }

        if let Some(j) = world
            .invaders
            .iter()
            .rposition(|inv| inv.rect.overlaps(&bullet))
        {
            world.bullets.remove(i);
            world.invaders.remove(j);
            gained += SCORE_PER_KILL;
            world.invader_speed += tuning.kill_speed_bonus;
        }
    }

    gained
}

/// Invader bullets are absorbed by barricades, otherwise they can hit the ship
fn resolve_invader_bullets(world: &mut World) {
    let ship = world.player.hitbox();
    let mut player_hit = false;

    for i in (0..world.invader_bullets.len()).rev() {
        let bullet = world.invader_bullets[i].rect;

        if let Some(block) = world
            .barricades
            .iter_mut()
            .rev()
            .find(|b| b.rect.overlaps(&bullet))
        {
            block.hit();
            world.invader_bullets.remove(i);
            continue;
        }

        if bullet.overlaps(&ship) {
            world.invader_bullets.remove(i);
            player_hit = true;
        }
    }

    if player_hit {
        world.finish(GamePhase::Lost);
    }
}

/// Invaders flatten any block they touch, whatever its health
fn crush_barricades(world: &mut World) {
    let invaders = &world.invaders;
    world
        .barricades
        .retain(|block| !invaders.iter().any(|inv| inv.rect.overlaps(&block.rect)));
}
