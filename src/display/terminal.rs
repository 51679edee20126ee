//! Presents a `Canvas` in the terminal.
//!
//! Each terminal cell shows two stacked pixels as `▀`: the upper pixel is the
//! foreground colour, the lower one the background.  Text runs replace whole
//! cells.  Only cells that changed since the last frame are re-emitted.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Colors, Print},
    terminal, QueueableCommand,
};

use super::canvas::Canvas;

/// The 16-colour palette, index → RGB.
pub const PALETTE: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00),
    (0x2b, 0x33, 0x5f),
    (0x7e, 0x20, 0x72),
    (0x19, 0x95, 0x9c),
    (0x8b, 0x48, 0x52),
    (0x39, 0x5c, 0x98),
    (0xa9, 0xc1, 0xff),
    (0xee, 0xee, 0xee),
    (0xd4, 0x18, 0x6c),
    (0xd3, 0x84, 0x41),
    (0xe9, 0xc3, 0x5b),
    (0x70, 0xc6, 0xa9),
    (0x76, 0x96, 0xde),
    (0xa3, 0xa3, 0xa3),
    (0xff, 0x97, 0x98),
    (0xed, 0xc7, 0xb0),
];

const HALF_BLOCK: char = '▀';

pub fn palette_color(index: u8) -> Color {
    let (r, g, b) = PALETTE[(index & 0x0f) as usize];
    Color::Rgb { r, g, b }
}

/// Terminal rows needed for a canvas `height` pixels tall, saturating at
/// the largest row count a terminal can address.
pub fn rows_for(height: u32) -> u16 {
    u16::try_from(height.div_ceil(2)).unwrap_or(u16::MAX)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: u8,
    pub bg: u8,
}

/// Fold a canvas into terminal cells, row-major, `width` cells per row.
pub fn compose(canvas: &Canvas) -> Vec<Cell> {
    let width = canvas.width() as i32;
    let rows = rows_for(canvas.height()) as i32;

    let mut cells = Vec::with_capacity((width * rows) as usize);
    for row in 0..rows {
        for x in 0..width {
            cells.push(Cell {
                ch: HALF_BLOCK,
                fg: canvas.pixel(x, row * 2).unwrap_or(0),
                bg: canvas.pixel(x, row * 2 + 1).unwrap_or(0),
            });
        }
    }

    for run in canvas.texts() {
        let row = run.y.div_euclid(2);
        if row < 0 || row >= rows {
            continue;
        }
        for (i, ch) in run.text.chars().enumerate() {
            let x = run.x + i as i32;
            if x < 0 || x >= width {
                continue;
            }
            let cell = &mut cells[(row * width + x) as usize];
            // Text sits on whatever the upper pixel of its cell was.
            *cell = Cell {
                ch,
                fg: run.col,
                bg: cell.fg,
            };
        }
    }

    cells
}

/// Canvas plus the last frame that was actually written to the terminal.
pub struct TerminalScreen {
    canvas: Canvas,
    shown: Vec<Cell>,
}

impl TerminalScreen {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            shown: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Forget what is on screen so the next `present` repaints everything.
    pub fn invalidate(&mut self) {
        self.shown.clear();
    }

    /// Write the canvas to `out`, touching only changed cells.
    pub fn present<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let cells = compose(&self.canvas);
        let width = self.canvas.width() as usize;
        let full = self.shown.len() != cells.len();
        if full {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut colors: Option<(u8, u8)> = None;
        let mut cursor_at: Option<usize> = None;
        for (i, cell) in cells.iter().enumerate() {
            if !full && self.shown[i] == *cell {
                continue;
            }
            // Printing advances the cursor, so only move when we skipped.
            if cursor_at != Some(i) || i % width == 0 {
                out.queue(cursor::MoveTo((i % width) as u16, (i / width) as u16))?;
            }
            if colors != Some((cell.fg, cell.bg)) {
                out.queue(style::SetColors(Colors::new(
                    palette_color(cell.fg),
                    palette_color(cell.bg),
                )))?;
                colors = Some((cell.fg, cell.bg));
            }
            out.queue(Print(cell.ch))?;
            cursor_at = Some(i + 1);
        }

        out.queue(style::ResetColor)?;
        out.flush()?;
        self.shown = cells;
        Ok(())
    }
}
