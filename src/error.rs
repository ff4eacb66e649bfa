use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("window `{0}` is declared more than once")]
    DuplicateWindow(String),
}

pub type Result<T> = std::result::Result<T, DeskError>;
