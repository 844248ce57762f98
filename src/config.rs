//! Playfield geometry, scoring table and runtime settings.
//!
//! Geometry is fixed at compile time; only the handful of knobs in
//! `GameConfig` can be changed from the environment.

use std::path::PathBuf;
use std::time::Duration;

// ── Canvas & grid ────────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: u32 = 505;
pub const CANVAS_HEIGHT: u32 = 606;

pub const NUM_ROWS: i32 = 6;
pub const NUM_COLS: i32 = 5;

/// Tile size in pixels.
pub const COL_WIDTH: f32 = 101.0;
pub const ROW_HEIGHT: f32 = 83.0;

/// Strip at the top of the canvas reserved for the score.
pub const HEADER_HEIGHT: f32 = 50.0;

/// Correction applied to a touch y coordinate before converting it to a row
/// (sprite anchor vs. tile origin).
pub const TOUCH_Y_OFFSET: f32 = -45.0;

/// The row the player has to reach.
pub const GOAL_ROW: i32 = 0;

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Lanes an enemy may spawn in (inclusive); start and goal rows are excluded.
pub const ENEMY_ROWS: (i32, i32) = (1, 3);
/// Pixels per second (inclusive).
pub const ENEMY_SPEEDS: (i32, i32) = (100, 400);
pub const ENEMY_Y_OFFSET: f32 = -23.0;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_START_ROW: i32 = 5;
pub const PLAYER_START_COL: i32 = 2;
pub const PLAYER_Y_OFFSET: f32 = -35.0;
/// Inset from each tile edge where the player's contact area begins.
pub const PLAYER_BOUNDARY_OFFSET: f32 = 30.0;

// ── Scoring ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreOffsets {
    pub collision: i64,
    pub success_base: i64,
    pub success_per_enemy: i64,
    pub time_deduction: i64,
}

pub const SCORE_OFFSETS: ScoreOffsets = ScoreOffsets {
    collision: -5000,
    success_base: 15000,
    success_per_enemy: 500,
    time_deduction: -150,
};

/// Seconds of simulated time between two time deductions.
pub const TIME_DEDUCTION_INTERVAL: f32 = 0.5;

// ── Transitions ──────────────────────────────────────────────────────────────

/// Pixels the hit sprite grows by per frame.
pub const HIT_RATE_OF_CHANGE: f32 = 10.0;
pub const WIN_FADE_START_ALPHA: f32 = 0.01;
pub const WIN_FADE_FACTOR: f32 = 1.1;
pub const WIN_FADE_THRESHOLD: f32 = 0.5;

// ── Runtime settings ─────────────────────────────────────────────────────────

pub const DEFAULT_NUM_ENEMIES: usize = 3;
pub const DEFAULT_FPS: u32 = 30;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub num_enemies: usize,
    /// Target duration of one frame.
    pub frame: Duration,
    /// Where log output goes; logging is off when unset.
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_enemies: DEFAULT_NUM_ENEMIES,
            frame: frame_duration(DEFAULT_FPS),
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Read `ROAD_CROSSING_ENEMIES`, `ROAD_CROSSING_FPS` and
    /// `ROAD_CROSSING_LOG`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let num_enemies = lookup("ROAD_CROSSING_ENEMIES")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.num_enemies);

        let frame = lookup("ROAD_CROSSING_FPS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&fps| fps > 0)
            .map(frame_duration)
            .unwrap_or(defaults.frame);

        let log_path = lookup("ROAD_CROSSING_LOG")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            num_enemies,
            frame,
            log_path,
        }
    }
}

fn frame_duration(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / fps as f64)
}
