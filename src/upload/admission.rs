// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Extension allow-list checked before an upload touches the disk

/// Extensions accepted for upload (compared lower-case)
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Whether a client filename may be uploaded
///
/// Requires a dot; the text after the last dot, lower-cased, must be in
/// `ALLOWED_EXTENSIONS`. The file content is not inspected.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
