//! Modal transition effects played when the player is hit or reaches the
//! goal.
//!
//! Each effect is a small state value plus a pure `step` function; the
//! owning `Transition` draws the current frame and then steps it.  The frame
//! loop keeps calling `tick` until it returns `false`, then drops the
//! transition.

use log::warn;

use crate::config::{
    HIT_RATE_OF_CHANGE, WIN_FADE_FACTOR, WIN_FADE_START_ALPHA, WIN_FADE_THRESHOLD,
};
use crate::error::Result;
use crate::graphics::{red_filter, RgbaImage, SpriteSheet, Surface, PLAYER_SPRITE, WHITE};
use crate::grid::PixelPosition;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    PlayerHit,
    PlayerWins,
}

/// Rectangle of the growing hit sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomFrame {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ZoomFrame {
    /// Grow by `rate` around the same centre.  The flag is `false` once the
    /// height has reached `limit`.
    pub fn step(self, rate: f32, limit: f32) -> (Self, bool) {
        let next = ZoomFrame {
            x: self.x - rate / 2.0,
            y: self.y - rate / 2.0,
            w: self.w + rate,
            h: self.h + rate,
        };
        (next, next.h < limit)
    }
}

/// Opacity of the white win overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeFrame {
    pub alpha: f32,
}

impl FadeFrame {
    pub fn step(self, factor: f32, threshold: f32) -> (Self, bool) {
        let next = FadeFrame {
            alpha: self.alpha * factor,
        };
        (next, next.alpha < threshold)
    }
}

#[derive(Clone, Debug)]
enum Effect {
    Zoom { image: RgbaImage, frame: ZoomFrame },
    Fade { frame: FadeFrame },
}

#[derive(Clone, Debug)]
pub struct Transition {
    effect: Effect,
    done: bool,
}

impl Transition {
    /// Red, expanding copy of the player sprite anchored at `position`.
    /// The sprite is snapshotted and filtered once; the transition owns the
    /// copy.
    pub fn player_hit(position: PixelPosition, sprites: &SpriteSheet) -> Result<Self> {
        let mut image = sprites.get(PLAYER_SPRITE)?.clone();
        red_filter(&mut image);

        let frame = ZoomFrame {
            x: position.x,
            y: position.y,
            w: image.width() as f32,
            h: image.height() as f32,
        };
        Ok(Self {
            effect: Effect::Zoom { image, frame },
            done: false,
        })
    }

    /// White overlay fading in over the whole canvas.
    pub fn player_wins() -> Self {
        Self {
            effect: Effect::Fade {
                frame: FadeFrame {
                    alpha: WIN_FADE_START_ALPHA,
                },
            },
            done: false,
        }
    }

    pub fn kind(&self) -> TransitionKind {
        match self.effect {
            Effect::Zoom { .. } => TransitionKind::PlayerHit,
            Effect::Fade { .. } => TransitionKind::PlayerWins,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Draw one frame and advance.  Returns `true` while more frames are
    /// needed.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> bool {
        if self.done {
            warn!("{:?} transition ticked after completion", self.kind());
            return false;
        }

        let more = match &mut self.effect {
            Effect::Zoom { image, frame } => {
                surface.draw_image_scaled(image, frame.x, frame.y, frame.w, frame.h);
                let limit = surface.height() as f32 * 2.0;
                let (next, more) = frame.step(HIT_RATE_OF_CHANGE, limit);
                *frame = next;
                more
            }
            Effect::Fade { frame } => {
                let (w, h) = (surface.width() as f32, surface.height() as f32);
                surface.fill_rect(0.0, 0.0, w, h, WHITE, frame.alpha);
                let (next, more) = frame.step(WIN_FADE_FACTOR, WIN_FADE_THRESHOLD);
                *frame = next;
                more
            }
        };

        self.done = !more;
        more
    }
}
