use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::download::domain::image_fetcher::{DownloadError, ImageFetcher};
use crate::shared::constants::{DOWNLOAD_TIMEOUT, USER_AGENT};

const CHUNK_SIZE: usize = 8192;

/// Downloads images over HTTP with a browser user agent and a fixed timeout.
///
/// The body is streamed to `<dest>.part` and renamed into place only once
/// complete, so an interrupted transfer never leaves a truncated image.
pub struct HttpImageFetcher {
    client: reqwest::blocking::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(DOWNLOAD_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        let temp_path = dest.with_extension("part");
        let result = self.fetch_inner(url, dest, &temp_path);
        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

impl HttpImageFetcher {
    fn fetch_inner(&self, url: &str, dest: &Path, temp_path: &Path) -> Result<u64, DownloadError> {
        let transport = |e: reqwest::Error| DownloadError::Transport {
            url: url.to_string(),
            source: Box::new(e),
        };

        let mut response = self.client.get(url).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !is_image_content_type(&content_type) {
            return Err(DownloadError::NotImage {
                url: url.to_string(),
                content_type,
            });
        }

        let write_err = |path: &Path, e: std::io::Error| DownloadError::Write {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = fs::File::create(temp_path).map_err(|e| write_err(temp_path, e))?;
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut written: u64 = 0;
        loop {
            let n = response.read(&mut buf).map_err(|e| DownloadError::Transport {
                url: url.to_string(),
                source: Box::new(e),
            })?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n])
                .map_err(|e| write_err(temp_path, e))?;
            written += n as u64;
        }
        file.flush().map_err(|e| write_err(temp_path, e))?;
        drop(file);

        fs::rename(temp_path, dest).map_err(|e| write_err(dest, e))?;
        Ok(written)
    }
}

fn is_image_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("image")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_server::{serve, CannedResponse};
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("image/jpeg", true)]
    #[case("image/png; charset=binary", true)]
    #[case("IMAGE/WEBP", true)]
    #[case("text/html; charset=utf-8", false)]
    #[case("application/octet-stream", false)]
    #[case("", false)]
    fn test_is_image_content_type(#[case] content_type: &str, #[case] expected: bool) {
        assert_eq!(is_image_content_type(content_type), expected);
    }

    #[test]
    fn test_fetch_writes_image_body() {
        let body = vec![0xFFu8, 0xD8, 0xFF, 0xE0, 1, 2, 3, 4];
        let (base, requests) = serve(vec![CannedResponse::ok("image/jpeg", body.clone())]);
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("2b_00000.jpg");

        let written = HttpImageFetcher::new()
            .unwrap()
            .fetch(&format!("{base}/a.jpg"), &dest)
            .unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(fs::read(&dest).unwrap(), body);
        assert!(!dest.with_extension("part").exists());

        let head = requests.recv().unwrap().to_ascii_lowercase();
        assert!(head.contains(&format!("user-agent: {}", USER_AGENT.to_ascii_lowercase())));
    }

    #[test]
    fn test_fetch_rejects_non_image_without_writing() {
        let (base, _requests) = serve(vec![CannedResponse::ok("text/html", "<html></html>")]);
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("2b_00000.jpg");

        let err = HttpImageFetcher::new()
            .unwrap()
            .fetch(&format!("{base}/page"), &dest)
            .unwrap_err();

        assert!(matches!(err, DownloadError::NotImage { .. }));
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }

    #[test]
    fn test_fetch_rejects_missing_content_type() {
        let (base, _requests) = serve(vec![CannedResponse {
            status: 200,
            content_type: None,
            body: b"???".to_vec(),
        }]);
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("x.jpg");

        let err = HttpImageFetcher::new()
            .unwrap()
            .fetch(&format!("{base}/x"), &dest)
            .unwrap_err();
        assert!(matches!(err, DownloadError::NotImage { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_fetch_http_error_status() {
        let (base, _requests) = serve(vec![CannedResponse::status(404)]);
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("x.jpg");

        let err = HttpImageFetcher::new()
            .unwrap()
            .fetch(&format!("{base}/missing.jpg"), &dest)
            .unwrap_err();
        assert!(matches!(err, DownloadError::Status { status: 404, .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_fetch_unreachable_host() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("x.jpg");
        let err = HttpImageFetcher::new()
            .unwrap()
            .fetch("http://invalid.nonexistent.example.com/x.jpg", &dest)
            .unwrap_err();
        assert!(matches!(err, DownloadError::Transport { .. }));
        assert!(!dest.exists());
    }
}
