use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The sprite key was never registered with the sprite sheet.
    #[error("sprite `{0}` is not loaded")]
    MissingSprite(String),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
