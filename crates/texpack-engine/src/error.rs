//! Engine error types.

use texpack_spec::{BackendError, ResolutionError};
use thiserror::Error;

use crate::png::PngError;

/// Errors from configuring, composing and encoding packed textures.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("Invalid resolution: {0}")]
    InvalidResolution(#[from] ResolutionError),

    #[error("Slot limit exceeded: at most {max} input slots are allowed")]
    SlotLimitExceeded { max: usize },

    #[error("Composition was cancelled")]
    Cancelled,

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("PNG error: {0}")]
    Png(#[from] PngError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError for PackError {
    fn code(&self) -> &'static str {
        match self {
            PackError::InvalidResolution(_) => "PACK_001",
            PackError::SlotLimitExceeded { .. } => "PACK_002",
            PackError::Cancelled => "PACK_003",
            PackError::InvalidSettings(_) => "PACK_004",
            PackError::Png(_) => "PACK_005",
            PackError::Image(_) => "PACK_006",
            PackError::Io(_) => "PACK_007",
            PackError::InvalidDimensions(_) => "PACK_008",
        }
    }

    fn category(&self) -> &'static str {
        "texture"
    }
}
