//! Sprite sheet resource.
//!
//! The sheet is a small palette-indexed image stored as RON: one string per
//! pixel row, one hex digit per pixel.  All sprites and background tiles are
//! 8×8 regions of it.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::entities::Facing;

/// The sheet that ships with the game.
pub const BUNDLED_SHEET: &str = include_str!("../assets/sheet.ron");

/// Errors that can occur when loading a sprite sheet.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Sheet file could not be read.
    #[error("failed to read sprite sheet '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// RON parsing failed.
    #[error("sprite sheet is not valid RON: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("sprite sheet dimensions must be non-zero, got {width}x{height}")]
    Dimensions { width: u32, height: u32 },

    #[error("sprite sheet declares {expected} rows but has {actual}")]
    RowCount { expected: u32, actual: usize },

    #[error("row {row} of the sprite sheet is {actual} pixels wide, expected {expected}")]
    RowWidth {
        row: usize,
        expected: u32,
        actual: usize,
    },

    /// A pixel that is not a palette index `0`..`f`.
    #[error("invalid pixel '{character}' at ({x}, {y})")]
    BadPixel { character: char, x: usize, y: usize },
}

#[derive(Debug, Deserialize)]
struct SheetFile {
    width: u32,
    height: u32,
    rows: Vec<String>,
}

/// A rectangle of the sheet, in sheet pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub u: u32,
    pub v: u32,
    pub w: u32,
    pub h: u32,
}

impl Region {
    pub const fn sprite(u: u32, v: u32) -> Self {
        Self { u, v, w: 8, h: 8 }
    }
}

/// Player sprite for a facing.
pub fn player_region(facing: Facing) -> Region {
    match facing {
        Facing::Up => Region::sprite(8, 8),
        Facing::Down => Region::sprite(0, 0),
        Facing::Left => Region::sprite(8, 0),
        Facing::Right => Region::sprite(0, 8),
    }
}

/// Enemy sprite for a facing.
pub fn enemy_region(facing: Facing) -> Region {
    match facing {
        Facing::Up => Region::sprite(8, 24),
        Facing::Down => Region::sprite(0, 16),
        Facing::Left => Region::sprite(8, 16),
        Facing::Right => Region::sprite(0, 24),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteSheet {
    pub width: u32,
    pub height: u32,
    /// Palette indices, row-major.
    pixels: Vec<u8>,
}

impl SpriteSheet {
    /// Parse a sheet from its RON source.
    pub fn parse(source: &str) -> Result<Self, AssetError> {
        let file: SheetFile = ron::from_str(source)?;
        if file.width == 0 || file.height == 0 {
            return Err(AssetError::Dimensions {
                width: file.width,
                height: file.height,
            });
        }
        if file.rows.len() != file.height as usize {
            return Err(AssetError::RowCount {
                expected: file.height,
                actual: file.rows.len(),
            });
        }

        let mut pixels = Vec::with_capacity((file.width * file.height) as usize);
        for (y, row) in file.rows.iter().enumerate() {
            let width = row.chars().count();
            if width != file.width as usize {
                return Err(AssetError::RowWidth {
                    row: y,
                    expected: file.width,
                    actual: width,
                });
            }
            for (x, character) in row.chars().enumerate() {
                let index = character
                    .to_digit(16)
                    .ok_or(AssetError::BadPixel { character, x, y })?;
                pixels.push(index as u8);
            }
        }

        Ok(Self {
            width: file.width,
            height: file.height,
            pixels,
        })
    }

    /// Read and parse a sheet from disk.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let source = fs::read_to_string(path).map_err(|source| AssetError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&source)
    }

    /// The sheet compiled into the binary.
    pub fn bundled() -> Result<Self, AssetError> {
        Self::parse(BUNDLED_SHEET)
    }

    /// Palette index at `(u, v)`, or `None` outside the sheet.
    pub fn get(&self, u: u32, v: u32) -> Option<u8> {
        if u >= self.width || v >= self.height {
            return None;
        }
        self.pixels.get((v * self.width + u) as usize).copied()
    }
}
