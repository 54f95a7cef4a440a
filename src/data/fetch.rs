//! Image byte fetching.
//!
//! Rows reference images by URL. `HttpFetcher` does a blocking GET for
//! `http(s)://` URLs and reads `file://` URLs or bare paths from disk.

use std::path::Path;

use crate::constants::MAX_IMAGE_BYTES;
use crate::data::FetchError;

/// Source of raw image bytes for a row URL.
pub trait ImageFetcher {
    /// Fetch the bytes behind a URL.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Default fetcher backed by `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match classify(url) {
            Source::Remote => {
                log::debug!("GET {}", url);
                let mut response = ureq::get(url)
                    .call()
                    .map_err(|e| FetchError::http(url, e))?;
                let bytes = response
                    .body_mut()
                    .with_config()
                    .limit(MAX_IMAGE_BYTES)
                    .read_to_vec()
                    .map_err(|e| FetchError::http(url, e))?;
                log::trace!("Downloaded {} bytes from {}", bytes.len(), url);
                Ok(bytes)
            }
            Source::Local(path) => {
                log::debug!("Reading local image {:?}", path);
                Ok(std::fs::read(path)?)
            }
        }
    }
}

enum Source<'a> {
    Remote,
    Local(&'a Path),
}

fn classify(url: &str) -> Source<'_> {
    if let Some(path) = url.strip_prefix("file://") {
        return Source::Local(Path::new(path));
    }
    if url.contains("://") {
        Source::Remote
    } else {
        Source::Local(Path::new(url.trim()))
    }
}
