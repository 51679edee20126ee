//! Errors that can stop the game before or while it runs.

use std::path::PathBuf;

use thiserror::Error;

use crate::assets::AssetError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("failed to read config '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// A display or timing value the game cannot run with.
    #[error("invalid display setting: {0}")]
    InvalidDisplay(String),

    #[error(
        "terminal is {cols}x{rows} but the game needs at least {need_cols}x{need_rows}; \
         enlarge the window or lower the display size"
    )]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        need_cols: u16,
        need_rows: u16,
    },

    #[error("failed to open log file '{}': {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
