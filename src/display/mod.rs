//! Rendering layer: a terminal-backed `Surface`.
//!
//! Game code draws into an RGBA canvas the size of the playfield.  `render`
//! then presents that canvas with half-block cells (two canvas rows per
//! terminal row) and prints text labels on top.  No game logic lives here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    QueueableCommand,
};
use image::{imageops, Pixel, Rgba, RgbaImage};

use crate::error::Result;
use crate::graphics::{Surface, TextAlign, TextStyle};

const HALF_BLOCK: &str = "▀";
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

const C_HINT: Color = Color::DarkGrey;
const CONTROLS_HINT: &str = "← ↑ → ↓ / click : Move   R : Restart   Q : Quit";

// ── Viewport ─────────────────────────────────────────────────────────────────

/// How the canvas maps onto terminal cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Canvas pixels per half-cell, both axes.
    pub scale: f32,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Largest uniform scale that fits the canvas into `term_cols` ×
    /// `term_rows` cells.  Never magnifies.
    pub fn fit(canvas_width: u32, canvas_height: u32, term_cols: u16, term_rows: u16) -> Self {
        let term_cols = term_cols.max(1);
        let term_rows = term_rows.max(1);
        let scale = (canvas_width as f32 / term_cols as f32)
            .max(canvas_height as f32 / (term_rows as f32 * 2.0))
            .max(1.0);

        Self {
            scale,
            cols: ((canvas_width as f32 / scale).ceil() as u16).min(term_cols),
            rows: ((canvas_height as f32 / (scale * 2.0)).ceil() as u16).min(term_rows),
        }
    }

    /// Canvas pixel at the centre of a terminal cell.
    pub fn cell_to_canvas(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.scale,
            (row as f32 + 0.5) * self.scale * 2.0,
        )
    }

    fn canvas_to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.scale).floor() as i32,
            (y / (self.scale * 2.0)).floor() as i32,
        )
    }
}

// ── Compositing ──────────────────────────────────────────────────────────────

/// Source-over compositing; opaque and fully transparent sources skip the
/// float round trip.
fn put_blended(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    match src[3] {
        0 => {}
        255 => *dst = src,
        _ => dst.blend(&src),
    }
}

// ── Surface ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
}

#[derive(Clone, Debug)]
pub struct TerminalSurface {
    canvas: RgbaImage,
    labels: Vec<Label>,
}

impl TerminalSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::new(width, height),
            labels: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Intersect a rectangle with the canvas, as `(x0, y0, x1, y1)` with
    /// exclusive upper bounds.
    fn clip(&self, x: f32, y: f32, w: f32, h: f32) -> Option<(u32, u32, u32, u32)> {
        let x0 = x.floor().max(0.0);
        let y0 = y.floor().max(0.0);
        let x1 = (x + w).ceil().min(self.canvas.width() as f32);
        let y1 = (y + h).ceil().min(self.canvas.height() as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl Surface for TerminalSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn draw_image(&mut self, image: &RgbaImage, x: f32, y: f32) {
        imageops::overlay(&mut self.canvas, image, x.round() as i64, y.round() as i64);
    }

    fn draw_image_scaled(&mut self, image: &RgbaImage, x: f32, y: f32, w: f32, h: f32) {
        if w <= 0.0 || h <= 0.0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };

        // Nearest-neighbour sampling over the visible part only.
        let (iw, ih) = (image.width(), image.height());
        for dy in y0..y1 {
            let v = (((dy as f32 + 0.5 - y) / h) * ih as f32).floor();
            if v < 0.0 || v >= ih as f32 {
                continue;
            }
            for dx in x0..x1 {
                let u = (((dx as f32 + 0.5 - x) / w) * iw as f32).floor();
                if u < 0.0 || u >= iw as f32 {
                    continue;
                }
                let src = *image.get_pixel(u as u32, v as u32);
                put_blended(self.canvas.get_pixel_mut(dx, dy), src);
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>, alpha: f32) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };
        let a = (alpha.clamp(0.0, 1.0) * color[3] as f32).round() as u8;
        let src = Rgba([color[0], color[1], color[2], a]);
        for dy in y0..y1 {
            for dx in x0..x1 {
                put_blended(self.canvas.get_pixel_mut(dx, dy), src);
            }
        }
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) {
            for dy in y0..y1 {
                for dx in x0..x1 {
                    self.canvas.put_pixel(dx, dy, TRANSPARENT);
                }
            }
        }
        self.labels
            .retain(|l| !(l.x >= x && l.x <= x + w && l.y >= y && l.y <= y + h));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.labels.push(Label {
            text: text.to_string(),
            x,
            y,
            style: style.clone(),
        });
    }
}

// ── Presentation ─────────────────────────────────────────────────────────────

/// Canvas colour at the centre of half-cell (`col`, `sub_row`), composited
/// over black.
fn sample(canvas: &RgbaImage, viewport: &Viewport, col: u16, sub_row: u32) -> Color {
    let x = ((col as f32 + 0.5) * viewport.scale) as u32;
    let y = ((sub_row as f32 + 0.5) * viewport.scale) as u32;
    if x >= canvas.width() || y >= canvas.height() {
        return Color::Rgb { r: 0, g: 0, b: 0 };
    }
    let [r, g, b, a] = canvas.get_pixel(x, y).0;
    let over_black = |c: u8| ((c as u16 * a as u16) / 255) as u8;
    Color::Rgb {
        r: over_black(r),
        g: over_black(g),
        b: over_black(b),
    }
}

/// Present one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    surface: &TerminalSurface,
    viewport: &Viewport,
) -> Result<()> {
    let canvas = surface.canvas();

    for row in 0..viewport.rows {
        out.queue(cursor::MoveTo(0, row))?;
        let mut current: Option<(Color, Color)> = None;
        for col in 0..viewport.cols {
            let top = sample(canvas, viewport, col, row as u32 * 2);
            let bottom = sample(canvas, viewport, col, row as u32 * 2 + 1);
            if current != Some((top, bottom)) {
                out.queue(style::SetForegroundColor(top))?;
                out.queue(style::SetBackgroundColor(bottom))?;
                current = Some((top, bottom));
            }
            out.queue(Print(HALF_BLOCK))?;
        }
    }
    out.queue(style::ResetColor)?;

    for label in surface.labels() {
        draw_label(out, canvas, viewport, label)?;
    }

    out.queue(cursor::MoveTo(0, viewport.rows))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS_HINT))?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

fn draw_label<W: Write>(
    out: &mut W,
    canvas: &RgbaImage,
    viewport: &Viewport,
    label: &Label,
) -> std::io::Result<()> {
    let len = label.text.chars().count() as i32;
    // Centre the text vertically on its glyph box rather than the baseline.
    let (anchor, row) = viewport.canvas_to_cell(label.x, label.y - label.style.size * 0.5);
    let start = match label.style.align {
        TextAlign::Left => anchor,
        TextAlign::Center => anchor - len / 2,
        TextAlign::Right => anchor - len,
    };
    let col = start.clamp(0, (viewport.cols as i32 - 1).max(0)) as u16;
    let row = row.clamp(0, (viewport.rows as i32 - 1).max(0)) as u16;

    let [r, g, b, _] = label.style.color.0;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(Color::Rgb { r, g, b }))?;
    out.queue(style::SetBackgroundColor(sample(canvas, viewport, col, row as u32 * 2)))?;
    if label.style.bold {
        out.queue(style::SetAttribute(Attribute::Bold))?;
    }
    out.queue(Print(&label.text))?;
    out.queue(style::SetAttribute(Attribute::Reset))?;
    out.queue(style::ResetColor)?;
    Ok(())
}
