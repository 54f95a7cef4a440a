//! Loader for standard image formats (PNG, JPEG, BMP, GIF, TIFF, WebP).
//!
//! Decodes downloaded bytes and resizes them to the square display size.

use image::imageops::FilterType;

use crate::data::FetchError;

/// Decoded RGBA pixels ready for upload as a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Unpremultiplied RGBA8 pixels, row-major
    pub rgba: Vec<u8>,
}

/// Loader for standard image formats.
#[derive(Debug, Clone, Copy)]
pub struct ImageLoader {
    display_size: u32,
}

impl ImageLoader {
    /// Create a loader that resizes to `display_size` x `display_size`.
    pub fn new(display_size: u32) -> Self {
        Self {
            display_size: display_size.max(1),
        }
    }

    /// Side length images are resized to.
    pub fn display_size(&self) -> u32 {
        self.display_size
    }

    /// Check common image magic bytes.
    pub fn can_load(&self, data: &[u8]) -> bool {
        if data.len() < 8 {
            return false;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return true;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return true;
        }

        // GIF87a / GIF89a
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return true;
        }

        // BMP: 42 4D (BM)
        if data.starts_with(&[0x42, 0x4D]) {
            return true;
        }

        // TIFF: 49 49 2A 00 (little endian) or 4D 4D 00 2A (big endian)
        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return true;
        }

        // WebP: RIFF....WEBP
        data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP"
    }

    /// Decode image bytes and resize them to the display size.
    pub fn load(&self, data: &[u8]) -> Result<DecodedImage, FetchError> {
        if !self.can_load(data) {
            return Err(FetchError::UnsupportedFormat { len: data.len() });
        }

        let img = image::load_from_memory(data)?;
        let (src_w, src_h) = (img.width(), img.height());
        let resized = img
            .resize_exact(self.display_size, self.display_size, FilterType::Lanczos3)
            .to_rgba8();

        log::trace!(
            "ImageLoader: decoded {}x{} image, resized to {}x{}",
            src_w,
            src_h,
            resized.width(),
            resized.height()
        );

        Ok(DecodedImage {
            width: resized.width(),
            height: resized.height(),
            rgba: resized.into_raw(),
        })
    }
}
