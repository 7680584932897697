//! Game session controller
//!
//! Owns everything that lives across frames but outside the world itself:
//! score, held keys, the RNG, and whether the frame loop should keep running.
//! Hosts call [`Session::frame`] once per display refresh and render the
//! world afterwards.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::platform::{InputState, Key};
use crate::sim::{World, tick};
use crate::tuning::Tuning;

pub struct Session {
    world: World,
    tuning: Tuning,
    rng: Pcg32,
    input: InputState,
    score: u64,
    running: bool,
    frames: u64,
}

impl Session {
    /// Start a session for a viewport. `seed` feeds the invader-fire RNG.
    pub fn new(width: f32, height: f32, tuning: Tuning, seed: u64) -> Self {
        log::info!("Session started at {width}x{height} (seed {seed})");
        Self {
            world: World::new(width, height, &tuning),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            input: InputState::new(),
            score: 0,
            running: true,
            frames: 0,
        }
    }

    /// Advance one frame. Returns whether the host should schedule another.
    pub fn frame(&mut self) -> bool {
        if !self.running {
            return false;
        }

        let input = self.input.tick_input();
        let outcome = tick(&mut self.world, &input, &self.tuning, &mut self.rng);
        if outcome.fired {
            self.input.shot_fired();
        }
        self.score += u64::from(outcome.gained);
        self.frames += 1;

        if self.world.is_over() {
            self.running = false;
            log::info!(
                "{} after {} frames, score {}",
                self.world.message().unwrap_or_default(),
                self.frames,
                self.score
            );
        }
        self.running
    }

    /// Throw the world away and start over at the current viewport size
    pub fn restart(&mut self) {
        let viewport = self.world.viewport;
        self.reset(viewport.x, viewport.y);
        log::info!("Session restarted");
    }

    /// Viewport changed: start over at the new size
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.world.viewport.x == width && self.world.viewport.y == height {
            return;
        }
        self.reset(width, height);
        log::info!("Session restarted for new viewport {width}x{height}");
    }

    fn reset(&mut self, width: f32, height: f32) {
        self.world = World::new(width, height, &self.tuning);
        self.input.clear();
        self.score = 0;
        self.frames = 0;
        self.running = true;
    }

    /// Stop scheduling frames without touching the world (tab hidden)
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Resume a stopped session; a finished world stays stopped
    pub fn start(&mut self) {
        self.running = !self.world.is_over();
    }

    pub fn key_down(&mut self, key: Key, repeat: bool) {
        self.input.press(key, repeat);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.release(key);
    }

    /// Drop held keys (window lost focus)
    pub fn release_all(&mut self) {
        self.input.clear();
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_over(&self) -> bool {
        self.world.is_over()
    }

    /// End-of-game text, if the session has finished
    pub fn message(&self) -> Option<&'static str> {
        self.world.message()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Bullet, GamePhase, Invader, Rect};

    fn session() -> Session {
        Session::new(800.0, 600.0, Tuning::default(), 7)
    }

    #[test]
    fn test_fresh_session() {
        let s = session();
        assert_eq!(s.score(), 0);
        assert!(s.is_running());
        assert!(!s.is_over());
        assert_eq!(s.message(), None);
        assert_eq!(*s.world(), World::new(800.0, 600.0, &Tuning::default()));
    }

    #[test]
    fn test_six_presses_fire_five_bullets() {
        let mut s = session();
        for _ in 0..6 {
            s.key_down(Key::Fire, false);
            s.frame();
            s.key_up(Key::Fire);
        }
        assert_eq!(s.world().bullets.len(), MAX_PLAYER_BULLETS);
    }

    #[test]
    fn test_held_fire_shoots_once() {
        let mut s = session();
        s.key_down(Key::Fire, false);
        for _ in 0..4 {
            s.frame();
            s.key_down(Key::Fire, true);
        }
        assert_eq!(s.world().bullets.len(), 1);
    }

    #[test]
    fn test_fire_held_through_cap_shoots_when_a_slot_frees() {
        let mut s = session();
        s.world.invaders = vec![Invader {
            rect: Rect::new(700.0, 30.0, 20.0, 15.0),
        }];
        s.world.barricades.clear();

        for _ in 0..MAX_PLAYER_BULLETS {
            s.key_down(Key::Fire, false);
            s.frame();
            s.key_up(Key::Fire);
        }
        assert_eq!(s.world().bullets.len(), MAX_PLAYER_BULLETS);

        // Fresh press at the cap, then held with auto-repeat
        s.key_down(Key::Fire, false);
        s.frame();
        assert_eq!(s.world().bullets.len(), MAX_PLAYER_BULLETS);
        for _ in 0..80 {
            s.key_down(Key::Fire, true);
            s.frame();
        }

        // The first volley has left the top; exactly one late shot is live
        assert_eq!(s.world().bullets.len(), 1);
        assert!(s.world().bullets[0].rect.top() > 100.0);

        // The request was spent by that shot
        for _ in 0..10 {
            s.key_down(Key::Fire, true);
            s.frame();
        }
        assert_eq!(s.world().bullets.len(), 1);
    }

    #[test]
    fn test_fire_released_at_cap_is_dropped() {
        let mut s = session();
        s.world.invaders = vec![Invader {
            rect: Rect::new(700.0, 30.0, 20.0, 15.0),
        }];
        s.world.barricades.clear();

        for _ in 0..MAX_PLAYER_BULLETS {
            s.key_down(Key::Fire, false);
            s.frame();
            s.key_up(Key::Fire);
        }
        s.key_down(Key::Fire, false);
        s.frame();
        s.key_up(Key::Fire);
        for _ in 0..80 {
            s.frame();
        }
        assert!(s.world().bullets.is_empty());
    }

    #[test]
    fn test_score_accumulates_and_session_stops_on_win() {
        let mut s = session();
        s.world.invaders = vec![Invader {
            rect: Rect::new(100.0, 150.0, 20.0, 15.0),
        }];
        s.world.barricades.clear();
        s.world.bullets.push(Bullet {
            rect: Rect::new(105.0, 165.0, BULLET_WIDTH, BULLET_HEIGHT),
        });

        assert!(!s.frame());
        assert_eq!(s.score(), u64::from(SCORE_PER_KILL));
        assert_eq!(s.world().phase, GamePhase::Won);
        assert_eq!(s.message(), Some(MESSAGE_WON));
        assert!(!s.is_running());

        // Frames after the end change nothing
        assert!(!s.frame());
        assert_eq!(s.frames(), 1);
    }

    #[test]
    fn test_restart_matches_fresh_world() {
        let mut s = session();
        s.key_down(Key::Left, false);
        for _ in 0..20 {
            s.key_down(Key::Fire, false);
            s.frame();
        }
        s.world.finish(GamePhase::Lost);
        s.score = 120;
        s.stop();

        s.restart();
        assert_eq!(*s.world(), World::new(800.0, 600.0, &Tuning::default()));
        assert_eq!(s.score(), 0);
        assert!(!s.is_over());
        assert!(s.is_running());

        // Held keys were dropped by the restart
        s.frame();
        assert!(s.world().bullets.is_empty());
        assert!((s.world().player.pos.x - 380.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_restarts_at_new_size() {
        let mut s = session();
        s.score = 40;
        s.resize(1024.0, 768.0);
        assert_eq!(*s.world(), World::new(1024.0, 768.0, &Tuning::default()));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_resize_to_same_size_keeps_state() {
        let mut s = session();
        s.frame();
        s.score = 30;
        s.resize(800.0, 600.0);
        assert_eq!(s.score(), 30);
        assert_eq!(s.frames(), 1);
    }

    #[test]
    fn test_stop_and_start() {
        let mut s = session();
        s.stop();
        assert!(!s.frame());
        assert_eq!(s.frames(), 0);

        s.start();
        assert!(s.frame());

        s.world.finish(GamePhase::Lost);
        s.start();
        assert!(!s.is_running());
    }
}
