//! Keyboard input
//!
//! Movement keys are level-triggered (held); fire is edge-triggered: one
//! fresh key press produces one fire request, and auto-repeat never does.
//! A request stays pending while the key is held until a shot is actually
//! spawned, so a press made at the bullet cap fires once a slot frees up.

use crate::sim::TickInput;

/// Logical game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` to a control
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "Space" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Held keys plus a pending fire edge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    left: bool,
    right: bool,
    fire_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. `repeat` is the host's auto-repeat flag.
    pub fn press(&mut self, key: Key, repeat: bool) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Fire => {
                if !repeat {
                    self.fire_pending = true;
                }
            }
        }
    }

    /// Key went up. Releasing fire drops a request that never got a shot.
    pub fn release(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Fire => self.fire_pending = false,
        }
    }

    /// Input for the next frame
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            fire: self.fire_pending,
        }
    }

    /// A bullet was spawned for the pending request
    pub fn shot_fired(&mut self) {
        self.fire_pending = false;
    }

    /// Forget everything (restart, focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
