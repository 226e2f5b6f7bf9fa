use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChangeDetectError {
    #[error("Image loading error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Image too small for analysis (minimum: {0}x{0})")]
    ImageTooSmall(u32),

    #[error("Dimension mismatch: before is {}x{}, after is {}x{}", before.0, before.1, after.0, after.1)]
    DimensionMismatch {
        before: (u32, u32),
        after: (u32, u32),
    },

    #[error("Unreadable image {}: {source}", path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChangeDetectError>;
