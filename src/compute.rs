//! Game logic driven by the frame loop.
//!
//! `GameState` owns every entity plus the score and the running transition.
//! The loop calls `frame` once per tick; all randomness comes through the
//! injected RNG so tests can seed it.

use log::{info, warn};
use rand::RngCore;

use crate::config::{
    GameConfig, CANVAS_WIDTH, COL_WIDTH, GOAL_ROW, NUM_COLS, NUM_ROWS, ROW_HEIGHT, SCORE_OFFSETS,
    TIME_DEDUCTION_INTERVAL,
};
use crate::entities::{Enemy, Entity, Move, Player, Score};
use crate::error::Result;
use crate::graphics::{SpriteSheet, Surface, GRASS_TILE, PLAYER_SPRITE, STONE_TILE, WATER_TILE};
use crate::input::touch_move;
use crate::transition::Transition;

/// What happened during one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Playing,
    PlayerHit,
    PlayerWon,
    /// A transition was ticked instead of the simulation.
    Transitioning,
}

#[derive(Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Box<dyn Entity>>,
    pub score: Score,
    transition: Option<Transition>,
    /// Simulated seconds since the last time deduction.
    deduction_timer: f32,
}

// ── Constructors ─────────────────────────────────────────────────────────────

impl GameState {
    /// Fresh game on the default canvas with `config.num_enemies` enemies.
    pub fn new(config: &GameConfig, rng: &mut dyn RngCore) -> Self {
        let enemies = (0..config.num_enemies)
            .map(|_| Box::new(Enemy::spawned(CANVAS_WIDTH as f32, &mut *rng)) as Box<dyn Entity>)
            .collect();
        Self::from_parts(Player::new(), enemies)
    }

    /// Assemble a state from already-initialised entities.
    pub fn from_parts(player: Player, enemies: Vec<Box<dyn Entity>>) -> Self {
        Self {
            player,
            enemies,
            score: Score::new(),
            transition: None,
            deduction_timer: 0.0,
        }
    }

    pub fn in_transition(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Start over: zero score, drop any transition, re-roll every entity.
    pub fn restart(&mut self, rng: &mut dyn RngCore) {
        info!("restarting at score {}", self.score.value());
        self.score.reset();
        self.transition = None;
        self.deduction_timer = 0.0;
        self.player.initialize(rng);
        for enemy in &mut self.enemies {
            enemy.initialize(rng);
        }
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

impl GameState {
    pub fn handle_input(&mut self, mv: Option<Move>) {
        self.player.handle_input(mv);
    }

    /// A touch (or click) at canvas pixel (`x`, `y`).
    pub fn handle_touch(&mut self, x: f32, y: f32) {
        let mv = touch_move(x, y, self.player.grid());
        self.player.handle_input(mv);
    }
}

// ── Simulation ───────────────────────────────────────────────────────────────

impl GameState {
    /// Advance the simulation by `dt` seconds and settle collisions, the goal
    /// and the time penalty.
    pub fn update(&mut self, dt: f32, rng: &mut dyn RngCore) -> FrameOutcome {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("ignoring malformed frame delta {dt}");
            0.0
        };

        for enemy in &mut self.enemies {
            enemy.update(dt, rng);
        }
        self.player.update(dt, rng);

        // Whole intervals are charged in one go; the remainder carries over.
        self.deduction_timer += dt;
        let intervals = (self.deduction_timer / TIME_DEDUCTION_INTERVAL).floor();
        if intervals >= 1.0 {
            self.deduction_timer = self.deduction_timer.rem_euclid(TIME_DEDUCTION_INTERVAL);
            self.score.offset(SCORE_OFFSETS.time_deduction.saturating_mul(intervals as i64));
        }

        if self.player_collides() {
            self.score.offset(SCORE_OFFSETS.collision);
            info!(
                "player hit at {:?}, score now {}",
                self.player.grid(),
                self.score.value()
            );
            return FrameOutcome::PlayerHit;
        }

        if self.player.row == GOAL_ROW {
            let bonus = SCORE_OFFSETS.success_per_enemy * self.enemies.len() as i64;
            self.score.offset(SCORE_OFFSETS.success_base + bonus);
            info!("player reached the goal, score now {}", self.score.value());
            return FrameOutcome::PlayerWon;
        }

        FrameOutcome::Playing
    }

    /// Any enemy in the player's lane whose box overlaps the player's.
    pub fn player_collides(&self) -> bool {
        let player_box = self.player.collision_box();
        self.enemies
            .iter()
            .filter(|e| e.row() == self.player.row)
            .any(|e| e.collision_box().overlaps(&player_box))
    }
}

// ── Rendering ────────────────────────────────────────────────────────────────

fn tile_for_row(row: i32) -> &'static str {
    match row {
        0 => WATER_TILE,
        1..=3 => STONE_TILE,
        _ => GRASS_TILE,
    }
}

impl GameState {
    /// Draw the whole scene: background, enemies, player, score header.
    pub fn render(&self, surface: &mut dyn Surface, sprites: &SpriteSheet) -> Result<()> {
        let (w, h) = (surface.width() as f32, surface.height() as f32);
        surface.clear_rect(0.0, 0.0, w, h);

        for row in 0..NUM_ROWS {
            let tile = sprites.get(tile_for_row(row))?;
            for col in 0..NUM_COLS {
                surface.draw_image(tile, col as f32 * COL_WIDTH, row as f32 * ROW_HEIGHT);
            }
        }

        for enemy in &self.enemies {
            enemy.render(surface, sprites)?;
        }
        self.player.render(surface, sprites)?;
        self.score.render(surface);
        Ok(())
    }

    /// One full engine pass.
    ///
    /// While a transition runs it is the only thing ticked: the simulation is
    /// paused and the scene is not redrawn.  When it finishes the player goes
    /// back to the start cell.  A hit or win starts its transition before the
    /// scene is drawn, so a failed draw never drops the outcome.
    pub fn frame(
        &mut self,
        dt: f32,
        surface: &mut dyn Surface,
        sprites: &SpriteSheet,
        rng: &mut dyn RngCore,
    ) -> Result<FrameOutcome> {
        if let Some(transition) = self.transition.as_mut() {
            if !transition.tick(surface) {
                info!("{:?} transition finished", transition.kind());
                self.transition = None;
                self.player.initialize(rng);
            }
            return Ok(FrameOutcome::Transitioning);
        }

        // The hit effect needs the player sprite; check for it before any
        // score changes.
        sprites.get(PLAYER_SPRITE)?;

        let outcome = self.update(dt, rng);
        self.transition = match outcome {
            FrameOutcome::PlayerHit => {
                Some(Transition::player_hit(self.player.position(), sprites)?)
            }
            FrameOutcome::PlayerWon => Some(Transition::player_wins()),
            FrameOutcome::Playing | FrameOutcome::Transitioning => None,
        };

        self.render(surface, sprites)?;
        Ok(outcome)
    }
}
