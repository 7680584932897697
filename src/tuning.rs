//! Data-driven game balance
//!
//! Every value has a default in [`crate::consts`]; a JSON document may
//! override any subset of them. Values that the rules depend on for
//! correctness (bullet cap, score per kill, block health) are fixed and live
//! only in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Balance values consumed by world construction and the simulation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_floor_gap: f32,

    pub bullet_speed: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,

    pub invader_rows: u32,
    pub invader_cols: u32,
    pub invader_width: f32,
    pub invader_height: f32,
    pub invader_padding: f32,
    pub invader_origin: f32,
    pub invader_speed: f32,
    pub invader_descent: f32,

    pub invader_bullet_speed: f32,
    pub invader_bullet_width: f32,
    pub invader_bullet_height: f32,
    pub invader_fire_chance: f64,

    pub kill_speed_bonus: f32,
    pub pace_threshold: f32,
    pub pace_factor: f32,

    pub barricade_block_size: f32,
    pub barricade_blocks_wide: u32,
    pub barricade_blocks_high: u32,
    pub barricade_count: u32,
    pub barricade_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_floor_gap: PLAYER_FLOOR_GAP,

            bullet_speed: BULLET_SPEED,
            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,

            invader_rows: INVADER_ROWS,
            invader_cols: INVADER_COLS,
            invader_width: INVADER_WIDTH,
            invader_height: INVADER_HEIGHT,
            invader_padding: INVADER_PADDING,
            invader_origin: INVADER_ORIGIN,
            invader_speed: INVADER_SPEED,
            invader_descent: INVADER_DESCENT,

            invader_bullet_speed: INVADER_BULLET_SPEED,
            invader_bullet_width: INVADER_BULLET_WIDTH,
            invader_bullet_height: INVADER_BULLET_HEIGHT,
            invader_fire_chance: INVADER_FIRE_CHANCE,

            kill_speed_bonus: KILL_SPEED_BONUS,
            pace_threshold: PACE_THRESHOLD,
            pace_factor: PACE_FACTOR,

            barricade_block_size: BARRICADE_BLOCK_SIZE,
            barricade_blocks_wide: BARRICADE_BLOCKS_WIDE,
            barricade_blocks_high: BARRICADE_BLOCKS_HIGH,
            barricade_count: BARRICADE_COUNT,
            barricade_offset: BARRICADE_OFFSET,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that every value keeps the simulation well-formed
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("invader_width", self.invader_width),
            ("invader_height", self.invader_height),
            ("invader_speed", self.invader_speed),
            ("invader_descent", self.invader_descent),
            ("invader_bullet_speed", self.invader_bullet_speed),
            ("invader_bullet_width", self.invader_bullet_width),
            ("invader_bullet_height", self.invader_bullet_height),
            ("barricade_block_size", self.barricade_block_size),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive {
                    field,
                    value: f64::from(value),
                });
            }
        }

        let non_negative = [
            ("player_floor_gap", self.player_floor_gap),
            ("invader_padding", self.invader_padding),
            ("invader_origin", self.invader_origin),
            ("kill_speed_bonus", self.kill_speed_bonus),
            ("barricade_offset", self.barricade_offset),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(TuningError::Negative {
                    field,
                    value: f64::from(value),
                });
            }
        }

        if !(0.0..=1.0).contains(&self.invader_fire_chance) {
            return Err(TuningError::ChanceOutOfRange(self.invader_fire_chance));
        }
        if !(self.pace_threshold > 0.0 && self.pace_threshold <= 1.0) {
            return Err(TuningError::ThresholdOutOfRange(self.pace_threshold));
        }
        if !(self.pace_factor >= 1.0) {
            return Err(TuningError::PaceFactorTooLow(self.pace_factor));
        }

        let counts = [
            ("invader_rows", self.invader_rows),
            ("invader_cols", self.invader_cols),
            ("barricade_blocks_wide", self.barricade_blocks_wide),
            ("barricade_blocks_high", self.barricade_blocks_high),
        ];
        for (field, value) in counts {
            if value == 0 {
                return Err(TuningError::EmptyLayout { field });
            }
        }

        let layouts = [
            (
                "invader grid",
                [self.invader_rows, self.invader_cols, 1],
                MAX_INVADERS,
            ),
            (
                "barricade layout",
                [
                    self.barricade_blocks_wide,
                    self.barricade_blocks_high,
                    self.barricade_count,
                ],
                MAX_BARRICADE_BLOCKS,
            ),
        ];
        for (what, dims, max) in layouts {
            if entity_count(&dims).is_none_or(|n| n > max) {
                return Err(TuningError::LayoutTooLarge { what, max });
            }
        }

        Ok(())
    }
}

/// Product of layout dimensions, `None` on overflow
fn entity_count(dims: &[u32]) -> Option<u64> {
    dims.iter()
        .try_fold(1_u64, |acc, &d| acc.checked_mul(u64::from(d)))
}
