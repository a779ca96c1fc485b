//! 上传去重所用的文件摘要计算。
//!
//! File digests for upload deduplication.
//!
//! The backend refuses duplicate images by content hash; computing the
//! SHA-256 on the client before uploading lets it short-circuit the transfer
//! entirely. Files are read in chunks so large originals never sit in memory
//! whole, and an optional callback reports progress for upload UIs.

use crate::Result;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

const CHUNK_SIZE: usize = 64 * 1024;

/// Hex-encoded SHA-256 of an in-memory buffer. Embedders that already hold
/// the bytes (WASM file pickers, tests) skip the filesystem round trip.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Hex-encoded SHA-256 of a file, read in chunks.
///
/// `on_progress` receives the running percentage (0–100) after each chunk;
/// it always ends on 100, including for empty files.
pub async fn file_sha256(
    path: &Path,
    on_progress: Option<&(dyn Fn(u8) + Send + Sync)>,
) -> Result<String> {
    let mut file = File::open(path).await?;
    let total = file.metadata().await?.len();

    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut read_so_far: u64 = 0;

    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        read_so_far += n as u64;
        if let Some(progress) = on_progress {
            let percent = if total == 0 {
                100
            } else {
                ((read_so_far * 100) / total).min(100) as u8
            };
            progress(percent);
        }
    }

    if read_so_far == 0 {
        if let Some(progress) = on_progress {
            progress(100);
        }
    }

    let digest = hasher.finalize();
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    #[test]
    fn test_sha256_hex_known_vectors() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_file_digest_matches_in_memory_digest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let payload = vec![0xabu8; 3 * CHUNK_SIZE + 17];
        file.write_all(&payload).unwrap();
        file.flush().unwrap();

        let digest = file_sha256(file.path(), None).await.unwrap();
        assert_eq!(digest, sha256_hex(&payload));
    }

    #[tokio::test]
    async fn test_progress_is_monotonic_and_ends_at_100() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&vec![7u8; 2 * CHUNK_SIZE + 5]).unwrap();
        file.flush().unwrap();

        let seen = Mutex::new(Vec::new());
        let record = |percent: u8| seen.lock().unwrap().push(percent);
        file_sha256(file.path(), Some(&record)).await.unwrap();

        let seen = seen.into_inner().unwrap();
        assert!(!seen.is_empty());
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*seen.last().unwrap(), 100);
    }

    #[tokio::test]
    async fn test_empty_file_still_reports_completion() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let seen = Mutex::new(Vec::new());
        let record = |percent: u8| seen.lock().unwrap().push(percent);
        let digest = file_sha256(file.path(), Some(&record)).await.unwrap();

        assert_eq!(digest, sha256_hex(b""));
        assert_eq!(seen.into_inner().unwrap(), vec![100]);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let err = file_sha256(Path::new("/definitely/not/here.png"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
