//! Getting row images onto the screen.
//!
//! This module provides:
//! - `ImageFetcher`: source of raw bytes for a row URL (`HttpFetcher` by default)
//! - `ImageLoader`: magic-byte sniffing, decoding and resizing
//!
//! Fetching is blocking and happens on the UI thread when the cursor lands
//! on a row; nothing is cached beyond the image currently shown.

mod error;
mod fetch;
pub mod loaders;

pub use error::FetchError;
pub use fetch::{HttpFetcher, ImageFetcher};
pub use loaders::{DecodedImage, ImageLoader};
