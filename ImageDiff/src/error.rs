//! Error types for `ImageDiff`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `ImageDiff` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Row Token Errors ====================
    /// A row token could not be decoded back into pixels.
    ///
    /// Tokens are only ever produced by the row encoder, so this signals a
    /// desync somewhere between encoding, diffing and decoding. It aborts
    /// the run instead of skipping the row.
    #[error("malformed row token: {message}")]
    MalformedToken {
        /// Description of what failed to decode.
        message: String,
    },

    // ==================== Image Errors ====================
    /// Failed to open or decode an input image.
    #[error("failed to open image {path}: {message}")]
    ImageOpenFailed {
        /// The image path.
        path: PathBuf,
        /// The error message from the decoder.
        message: String,
    },

    /// Failed to encode PNG image.
    #[error("failed to encode PNG: {message}")]
    PngEncodeFailed {
        /// The encoding error message.
        message: String,
    },

    /// Failed to create an image buffer from canvas data.
    #[error("failed to create image buffer")]
    ImageBufferFailed,
}

/// A specialized Result type for `ImageDiff` operations.
pub type Result<T> = std::result::Result<T, Error>;
