//! Playfield actors: lane enemies, the player and the score.

use std::collections::VecDeque;
use std::fmt;

use log::debug;
use rand::RngCore;

use crate::config::{
    COL_WIDTH, ENEMY_ROWS, ENEMY_SPEEDS, ENEMY_Y_OFFSET, HEADER_HEIGHT, PLAYER_BOUNDARY_OFFSET,
    PLAYER_START_COL, PLAYER_START_ROW, PLAYER_Y_OFFSET, ROW_HEIGHT,
};
use crate::error::Result;
use crate::graphics::{
    Surface, SpriteSheet, TextAlign, TextStyle, ENEMY_SPRITE, PLAYER_SPRITE, WHITE,
};
use crate::grid::{random_integer, CollisionBox, GridPosition, PixelPosition};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Up,
    Right,
    Down,
}

impl Move {
    /// Row and column change applied by this move.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Move::Left => (0, -1),
            Move::Up => (-1, 0),
            Move::Right => (0, 1),
            Move::Down => (1, 0),
        }
    }
}

/// Shared lifecycle of everything that lives on the playfield.
pub trait Entity: fmt::Debug {
    /// (Re)roll or reset the entity's state.
    fn initialize(&mut self, rng: &mut dyn RngCore);

    /// Advance by `dt` seconds.
    fn update(&mut self, dt: f32, rng: &mut dyn RngCore);

    fn render(&self, surface: &mut dyn Surface, sprites: &SpriteSheet) -> Result<()>;

    /// Lane the entity currently occupies.
    fn row(&self) -> i32;

    fn collision_box(&self) -> CollisionBox;
}

// ── Enemy ────────────────────────────────────────────────────────────────────

/// An obstacle crossing its lane left to right.  Leaving the right edge
/// respawns it off the left edge with a fresh lane and speed.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub row: i32,
    pub x: f32,
    pub y: f32,
    /// Pixels per second.
    pub speed: f32,
    bounds: CollisionBox,
    canvas_width: f32,
}

impl Enemy {
    /// An enemy parked off-screen; call `initialize` before use.
    pub fn new(canvas_width: f32) -> Self {
        Self {
            row: 0,
            x: -COL_WIDTH,
            y: 0.0,
            speed: 0.0,
            bounds: CollisionBox::tile_at(-COL_WIDTH),
            canvas_width,
        }
    }

    pub fn spawned(canvas_width: f32, rng: &mut dyn RngCore) -> Self {
        let mut enemy = Self::new(canvas_width);
        enemy.initialize(rng);
        enemy
    }
}

impl Entity for Enemy {
    fn initialize(&mut self, rng: &mut dyn RngCore) {
        self.row = random_integer(rng, ENEMY_ROWS.0, ENEMY_ROWS.1);
        self.x = -COL_WIDTH;
        self.y = self.row as f32 * ROW_HEIGHT + ENEMY_Y_OFFSET;
        self.speed = random_integer(rng, ENEMY_SPEEDS.0, ENEMY_SPEEDS.1) as f32;
        self.bounds = CollisionBox::tile_at(self.x);
    }

    fn update(&mut self, dt: f32, rng: &mut dyn RngCore) {
        self.x += self.speed * dt;

        if self.x >= self.canvas_width {
            self.initialize(rng);
            debug!("enemy respawned in row {} at {} px/s", self.row, self.speed);
        }

        self.bounds = CollisionBox::tile_at(self.x);
    }

    fn render(&self, surface: &mut dyn Surface, sprites: &SpriteSheet) -> Result<()> {
        surface.draw_image(sprites.get(ENEMY_SPRITE)?, self.x, self.y);
        Ok(())
    }

    fn row(&self) -> i32 {
        self.row
    }

    fn collision_box(&self) -> CollisionBox {
        self.bounds
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// The grid-stepping player.  Input is queued by `handle_input` and applied
/// once per `update`.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub row: i32,
    pub col: i32,
    position: PixelPosition,
    bounds: CollisionBox,
    pending_moves: VecDeque<Move>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// A player standing on the start cell with an empty queue.
    pub fn new() -> Self {
        let mut player = Self {
            row: PLAYER_START_ROW,
            col: PLAYER_START_COL,
            position: PixelPosition::default(),
            bounds: CollisionBox::default(),
            pending_moves: VecDeque::new(),
        };
        player.reset();
        player
    }

    /// Queue a move.  `None` (an unmapped key) is ignored.
    pub fn handle_input(&mut self, mv: Option<Move>) {
        if let Some(mv) = mv {
            self.pending_moves.push_back(mv);
        }
    }

    pub fn pending_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.pending_moves.iter().copied()
    }

    pub fn grid(&self) -> GridPosition {
        GridPosition::new(self.row, self.col)
    }

    /// Top-left pixel of the player sprite.
    pub fn position(&self) -> PixelPosition {
        self.position
    }

    fn reset(&mut self) {
        self.row = PLAYER_START_ROW;
        self.col = PLAYER_START_COL;
        self.pending_moves.clear();
        self.sync_position();
    }

    fn sync_position(&mut self) {
        self.position = self.grid().to_pixels(PLAYER_Y_OFFSET);
        self.bounds = CollisionBox::inset_tile_at(self.position.x, PLAYER_BOUNDARY_OFFSET);
    }
}

impl Entity for Player {
    fn initialize(&mut self, _rng: &mut dyn RngCore) {
        self.reset();
    }

    fn update(&mut self, _dt: f32, _rng: &mut dyn RngCore) {
        while let Some(mv) = self.pending_moves.pop_front() {
            let (d_row, d_col) = mv.delta();
            self.row += d_row;
            self.col += d_col;
        }

        // Clamp only once the queue is drained: a move into the wall is
        // consumed but has no effect beyond the clamp.
        let clamped = self.grid().clamped();
        self.row = clamped.row;
        self.col = clamped.col;

        self.sync_position();
    }

    fn render(&self, surface: &mut dyn Surface, sprites: &SpriteSheet) -> Result<()> {
        surface.draw_image(sprites.get(PLAYER_SPRITE)?, self.position.x, self.position.y);
        Ok(())
    }

    fn row(&self) -> i32 {
        self.row
    }

    fn collision_box(&self) -> CollisionBox {
        self.bounds
    }
}

// ── Score ────────────────────────────────────────────────────────────────────

/// Non-negative score.  Only changes through `offset`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    value: u64,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Add a signed offset, flooring at zero.
    pub fn offset(&mut self, delta: i64) {
        self.value = if delta < 0 {
            self.value.saturating_sub(delta.unsigned_abs())
        } else {
            self.value.saturating_add(delta as u64)
        };
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// Redraw the header strip with the current value.
    pub fn render(&self, surface: &mut dyn Surface) {
        let width = surface.width() as f32;
        surface.clear_rect(0.0, 0.0, width, HEADER_HEIGHT);

        let style = TextStyle {
            size: 36.0,
            bold: true,
            align: TextAlign::Right,
            color: WHITE,
        };
        surface.draw_text(&format!("Score: {}", self.value), width - 5.0, 40.0, &style);
    }
}
