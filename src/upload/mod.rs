// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upload admission and storage
//!
//! An upload is checked against the extension allow-list, its filename is
//! sanitized, and the bytes are written to the fixed upload directory.

pub mod admission;
pub mod sanitize;
pub mod store;

pub use admission::{allowed_file, ALLOWED_EXTENSIONS};
pub use sanitize::secure_filename;
pub use store::{StoredUpload, UploadError, UploadStore};

/// An image as received from the client
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Filename supplied by the client (unsanitized)
    pub filename: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}
