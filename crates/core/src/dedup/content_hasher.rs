use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Content fingerprint of a downloaded image, used to spot the same picture
/// served from different URLs within one category run.
///
/// Lowercase hex SHA-256; the file is streamed so large downloads are not
/// held in memory.
pub fn compute_sha256(path: &Path) -> std::io::Result<String> {
    let file = std::fs::File::open(path)?;
    let mut reader = std::io::BufReader::with_capacity(64 * 1024, file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sha256_known_value() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("test.bin");
        fs::write(&path, b"hello world").unwrap();
        assert_eq!(
            compute_sha256(&path).unwrap(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_sha256_empty_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("empty.bin");
        fs::write(&path, b"").unwrap();
        assert_eq!(
            compute_sha256(&path).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_spans_multiple_chunks() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.bin");
        let b = tmp.path().join("b.bin");
        let mut data = vec![7u8; 200 * 1024];
        fs::write(&a, &data).unwrap();
        data[150 * 1024] = 8;
        fs::write(&b, &data).unwrap();
        assert_ne!(compute_sha256(&a).unwrap(), compute_sha256(&b).unwrap());
    }

    #[test]
    fn test_sha256_nonexistent_file() {
        assert!(compute_sha256(Path::new("/nonexistent/file.bin")).is_err());
    }
}
