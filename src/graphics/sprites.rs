//! Sprite provider.  The built-in sheet paints every sprite procedurally so
//! the game needs no image files on disk.

use std::collections::HashMap;

use image::{Rgba, RgbaImage};

use crate::error::{GameError, Result};

pub const ENEMY_SPRITE: &str = "enemy-bug";
pub const PLAYER_SPRITE: &str = "char-boy";
pub const WATER_TILE: &str = "water-block";
pub const STONE_TILE: &str = "stone-block";
pub const GRASS_TILE: &str = "grass-block";

// Every sprite shares the tile canvas: a 101 px wide, 171 px tall image whose
// visible top face starts 50 px down.
const SPRITE_WIDTH: u32 = 101;
const SPRITE_HEIGHT: u32 = 171;
const FACE_TOP: u32 = 50;
const FACE_BOTTOM: u32 = 133;

#[derive(Clone, Debug, Default)]
pub struct SpriteSheet {
    sprites: HashMap<String, RgbaImage>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheet holding every sprite the game refers to.
    pub fn builtin() -> Self {
        let mut sheet = Self::new();
        sheet.insert(
            WATER_TILE,
            paint_tile(Rgba([60, 120, 220, 255]), Rgba([40, 80, 170, 255]), true),
        );
        sheet.insert(
            STONE_TILE,
            paint_tile(Rgba([150, 150, 150, 255]), Rgba([105, 105, 105, 255]), false),
        );
        sheet.insert(
            GRASS_TILE,
            paint_tile(Rgba([90, 190, 80, 255]), Rgba([60, 140, 50, 255]), false),
        );
        sheet.insert(ENEMY_SPRITE, paint_bug());
        sheet.insert(PLAYER_SPRITE, paint_player());
        sheet
    }

    pub fn insert(&mut self, key: impl Into<String>, image: RgbaImage) {
        self.sprites.insert(key.into(), image);
    }

    pub fn get(&self, key: &str) -> Result<&RgbaImage> {
        self.sprites
            .get(key)
            .ok_or_else(|| GameError::MissingSprite(key.to_string()))
    }
}

// ── Painting helpers ─────────────────────────────────────────────────────────

fn blank() -> RgbaImage {
    RgbaImage::new(SPRITE_WIDTH, SPRITE_HEIGHT)
}

fn fill_box(img: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn fill_ellipse(img: &mut RgbaImage, cx: f32, cy: f32, rx: f32, ry: f32, color: Rgba<u8>) {
    for y in 0..img.height() {
        for x in 0..img.width() {
            let dx = (x as f32 + 0.5 - cx) / rx;
            let dy = (y as f32 + 0.5 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn paint_tile(face: Rgba<u8>, side: Rgba<u8>, waves: bool) -> RgbaImage {
    let mut img = blank();
    fill_box(&mut img, 0, FACE_TOP, SPRITE_WIDTH, FACE_BOTTOM, face);
    fill_box(&mut img, 0, FACE_BOTTOM, SPRITE_WIDTH, SPRITE_HEIGHT, side);
    if waves {
        let crest = Rgba([150, 200, 255, 255]);
        for band in [70, 95, 120] {
            fill_box(&mut img, 10, band, 45, band + 3, crest);
            fill_box(&mut img, 56, band + 8, 91, band + 11, crest);
        }
    }
    img
}

fn paint_bug() -> RgbaImage {
    let mut img = blank();
    let body = Rgba([200, 30, 30, 255]);
    let shell = Rgba([120, 10, 10, 255]);
    let eye = Rgba([255, 255, 255, 255]);
    fill_ellipse(&mut img, 48.0, 112.0, 44.0, 24.0, body);
    fill_box(&mut img, 47, 90, 50, 134, shell);
    fill_ellipse(&mut img, 90.0, 110.0, 10.0, 12.0, shell);
    fill_ellipse(&mut img, 93.0, 106.0, 3.0, 3.0, eye);
    img
}

fn paint_player() -> RgbaImage {
    let mut img = blank();
    let skin = Rgba([240, 200, 160, 255]);
    let hair = Rgba([90, 50, 20, 255]);
    let shirt = Rgba([40, 90, 200, 255]);
    let legs = Rgba([30, 30, 60, 255]);
    fill_ellipse(&mut img, 50.5, 98.0, 17.0, 17.0, skin);
    fill_box(&mut img, 34, 80, 68, 88, hair);
    fill_box(&mut img, 36, 114, 66, 142, shirt);
    fill_box(&mut img, 38, 142, 48, 160, legs);
    fill_box(&mut img, 54, 142, 64, 160, legs);
    img
}
