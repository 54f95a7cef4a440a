//! Image decoders.

mod image_loader;

pub use image_loader::{DecodedImage, ImageLoader};
