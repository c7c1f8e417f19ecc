//! Texture backend errors.

use chromabake_spec::{BackendError, CodecError};
use thiserror::Error;

/// Errors from decoding sources, packing and writing images.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] ::png::DecodingError),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] ::png::EncodingError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
}

impl BackendError for TextureError {
    fn code(&self) -> &'static str {
        match self {
            TextureError::Io(_) => "TEXTURE_001",
            TextureError::Decoding(_) => "TEXTURE_002",
            TextureError::Encoding(_) => "TEXTURE_003",
            TextureError::Codec(_) => "TEXTURE_004",
            TextureError::UnsupportedFormat(_) => "TEXTURE_005",
        }
    }

    fn category(&self) -> &'static str {
        "texture"
    }
}
