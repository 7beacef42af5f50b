// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fixed-directory store for uploaded images

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::sanitize::secure_filename;

/// Errors from storing an upload
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Filename '{0}' has no usable characters")]
    InvalidFilename(String),

    #[error("Failed to write upload {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A file written to the upload directory
#[derive(Debug, Clone, PartialEq)]
pub struct StoredUpload {
    /// Sanitized filename, relative to the upload directory
    pub filename: String,
    /// Full path on disk
    pub path: PathBuf,
    /// Bytes written
    pub size_bytes: usize,
}

/// Writes uploads under one directory, keyed by sanitized filename
///
/// Same-named uploads overwrite each other.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| UploadError::Io {
                path: self.dir.display().to_string(),
                source,
            })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an already-sanitized filename is stored at
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Sanitize `client_filename` and write `bytes` under it
    pub async fn save(
        &self,
        client_filename: &str,
        bytes: &[u8],
    ) -> Result<StoredUpload, UploadError> {
        let filename = secure_filename(client_filename);
        if filename.is_empty() {
            return Err(UploadError::InvalidFilename(client_filename.to_string()));
        }

        let path = self.path_for(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| UploadError::Io {
                path: path.display().to_string(),
                source,
            })?;

        debug!("Stored upload {} ({} bytes)", path.display(), bytes.len());

        Ok(StoredUpload {
            filename,
            path,
            size_bytes: bytes.len(),
        })
    }
}
