use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("{url} is not an image (content-type '{content_type}')")]
    NotImage { url: String, content_type: String },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Domain interface for fetching one image URL to a file.
///
/// On success `dest` holds the full body. On failure nothing is left at
/// `dest`.
pub trait ImageFetcher: Send {
    /// Returns the number of bytes written.
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, DownloadError>;
}
