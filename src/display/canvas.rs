//! Palette-indexed framebuffer with the drawing primitives the game uses.
//!
//! Coordinates are floats in game units and are floored to whole pixels.
//! Anything drawn outside the canvas is clipped.

use crate::assets::{Region, SpriteSheet};

/// A string queued for drawing at a pixel position.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub col: u8,
}

#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    texts: Vec<TextRun>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
            texts: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette index at `(x, y)`, or `None` off-canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Fill with one colour and drop all queued text.
    pub fn cls(&mut self, col: u8) {
        self.pixels.fill(col);
        self.texts.clear();
    }

    pub fn pset(&mut self, x: i32, y: i32, col: u8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = col;
        }
    }

    /// Copy `region` of `sheet` with its top-left at `(x, y)`.
    /// Pixels equal to `colkey` are left transparent.
    pub fn blt(&mut self, x: f32, y: f32, sheet: &SpriteSheet, region: Region, colkey: Option<u8>) {
        let (ox, oy) = (x.floor() as i32, y.floor() as i32);
        for j in 0..region.h {
            for i in 0..region.w {
                let Some(col) = sheet.get(region.u + i, region.v + j) else {
                    continue;
                };
                if Some(col) == colkey {
                    continue;
                }
                self.pset(ox + i as i32, oy + j as i32, col);
            }
        }
    }

    /// Filled circle of radius `r` centred on `(x, y)`.
    pub fn circ(&mut self, x: f32, y: f32, r: u32, col: u8) {
        let (cx, cy) = (x.floor() as i32, y.floor() as i32);
        let r = r as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.pset(cx + dx, cy + dy, col);
                }
            }
        }
    }

    pub fn text(&mut self, x: f32, y: f32, text: &str, col: u8) {
        self.texts.push(TextRun {
            x: x.floor() as i32,
            y: y.floor() as i32,
            text: text.to_string(),
            col,
        });
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as u32 * self.width + x as u32) as usize)
    }
}
