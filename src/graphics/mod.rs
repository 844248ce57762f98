//! Drawing-surface abstraction and image post-processing.
//!
//! Game code never talks to a terminal (or any other backend) directly: it
//! draws through `Surface`, and sprites come from a `SpriteSheet`.

mod sprites;

pub use image::{Rgba, RgbaImage};
pub use sprites::{
    SpriteSheet, ENEMY_SPRITE, GRASS_TILE, PLAYER_SPRITE, STONE_TILE, WATER_TILE,
};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Font, alignment and colour for `Surface::draw_text`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in canvas pixels.
    pub size: f32,
    pub bold: bool,
    pub align: TextAlign,
    pub color: Rgba<u8>,
}

/// A 2D drawing surface in canvas pixel coordinates.
///
/// Coordinates may fall partly or fully outside the canvas; implementations
/// clip.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn draw_image(&mut self, image: &RgbaImage, x: f32, y: f32);

    /// Draw `image` stretched to fill the `w` × `h` rectangle at (`x`, `y`).
    fn draw_image_scaled(&mut self, image: &RgbaImage, x: f32, y: f32, w: f32, h: f32);

    /// Blend `color` over the rectangle at opacity `alpha` (0.0..=1.0).
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>, alpha: f32);

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// `x` is the anchor given by `style.align`; `y` is the baseline.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
}

/// Red wash: every pixel becomes its grey level on the red channel only,
/// keeping the original alpha.
pub fn red_filter(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let avg = ((r as u16 + g as u16 + b as u16) / 3) as u8;
        *pixel = Rgba([avg, 0, 0, a]);
    }
}
