use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("model file not found: {0}")]
    Missing(PathBuf),
    #[error("model '{name}' not found in {searched:?} and no download URL given")]
    NotFound { name: String, searched: Vec<PathBuf> },
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Where to look for a model file.
pub struct ModelSource<'a> {
    /// File name inside the cache and bundled directories.
    pub name: &'a str,
    /// Used as-is when given; must exist.
    pub explicit_path: Option<&'a Path>,
    pub cache_dir: Option<PathBuf>,
    pub bundled_dir: Option<&'a Path>,
    pub url: Option<&'a str>,
}

impl<'a> ModelSource<'a> {
    /// Looks in the platform cache directory and nowhere else.
    pub fn named(name: &'a str) -> Self {
        Self {
            name,
            explicit_path: None,
            cache_dir: model_cache_dir().ok(),
            bundled_dir: None,
            url: None,
        }
    }
}

/// Resolve a model file, checking local locations before downloading.
///
/// Resolution order:
/// 1. Explicit path
/// 2. User cache directory (platform-specific)
/// 3. Bundled directory (for development / pre-packaged installs)
/// 4. Download from URL into the cache
pub fn resolve(
    source: &ModelSource<'_>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    if let Some(path) = source.explicit_path {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(ModelResolveError::Missing(path.to_path_buf()))
        };
    }

    let mut searched = Vec::new();
    let candidates = source
        .cache_dir
        .as_deref()
        .into_iter()
        .chain(source.bundled_dir);
    for dir in candidates {
        let path = dir.join(source.name);
        if path.is_file() {
            log::debug!("Using model at {}", path.display());
            return Ok(path);
        }
        searched.push(path);
    }

    let Some(url) = source.url else {
        return Err(ModelResolveError::NotFound {
            name: source.name.to_string(),
            searched,
        });
    };
    let cache_dir = source
        .cache_dir
        .as_deref()
        .ok_or(ModelResolveError::NoCacheDir)?;
    fs::create_dir_all(cache_dir).map_err(ModelResolveError::CacheDir)?;
    let cached_path = cache_dir.join(source.name);
    log::info!("Downloading {} from {url}", source.name);
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/Hairset/models/`
/// - Linux: `$XDG_CACHE_HOME/Hairset/models/` or `~/.cache/Hairset/models/`
/// - Windows: `%LOCALAPPDATA%/Hairset/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("Hairset").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("Hairset").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_inner(url, dest, &temp_path, progress);

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn download_inner(
    url: &str,
    dest: &Path,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), ModelResolveError> {
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ModelResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    let write_err = |e: std::io::Error| ModelResolveError::Write {
        path: temp_path.to_path_buf(),
        source: e,
    };
    let mut file = fs::File::create(temp_path).map_err(write_err)?;

    let mut reader = response;
    let mut buf = vec![0u8; 1024 * 1024];
    loop {
        let n = reader.read(&mut buf).map_err(write_err)?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).map_err(write_err)?;
        downloaded += n as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(write_err)?;
    drop(file);

    fs::rename(temp_path, dest).map_err(|e| ModelResolveError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
