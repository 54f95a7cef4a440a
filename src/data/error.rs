//! Error type for fetching and decoding images.

use thiserror::Error;

/// Errors that can occur while getting an image onto the screen.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed or returned an error status
    #[error("Failed to download {url}: {message}")]
    Http {
        /// Requested URL
        url: String,
        /// Transport or status description
        message: String,
    },

    /// Reading a local image failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bytes were recognised but could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Bytes do not look like any supported image format
    #[error("Unsupported image format ({len} bytes)")]
    UnsupportedFormat {
        /// Size of the rejected payload
        len: usize,
    },
}

impl FetchError {
    /// Create an HTTP error for a URL.
    pub fn http(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Http {
            url: url.into(),
            message: message.to_string(),
        }
    }
}
