//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing content digests
//! used by change detection. Files are streamed through a fixed-size buffer
//! so large sources never need to be held in memory twice.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::HashError;

/// A 32-byte BLAKE3 digest.
pub type Hash = [u8; 32];

/// Default read buffer size (64 KiB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Streaming BLAKE3 hasher for file contents.
#[derive(Debug, Clone)]
pub struct Hasher {
    buffer_size: usize,
}

impl Hasher {
    /// Create a hasher with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer_size: BUFFER_SIZE,
        }
    }

    /// Compute the digest of the full file content.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read. Callers
    /// treat this as a failure of that one file only.
    pub fn full_hash(&self, path: &Path) -> Result<Hash, HashError> {
        let file = File::open(path).map_err(|e| map_io_error(path, e))?;
        let mut reader = BufReader::with_capacity(self.buffer_size, file);
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; self.buffer_size];

        loop {
            let read = reader
                .read(&mut buffer)
                .map_err(|e| map_io_error(path, e))?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }

        Ok(*hasher.finalize().as_bytes())
    }

    /// Compute the digest of in-memory content.
    ///
    /// Produces the same value as [`Hasher::full_hash`] on a file holding
    /// exactly these bytes.
    #[must_use]
    pub fn hash_bytes(&self, bytes: &[u8]) -> Hash {
        *blake3::hash(bytes).as_bytes()
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

fn map_io_error(path: &Path, error: std::io::Error) -> HashError {
    use std::io::ErrorKind;

    match error.kind() {
        ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}

/// Render a digest as lowercase hex.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    blake3::Hash::from(*hash).to_hex().to_string()
}
