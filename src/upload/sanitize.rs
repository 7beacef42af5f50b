// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Filename sanitization for stored uploads

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Device names Windows refuses as filenames
const WINDOWS_DEVICE_FILES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

fn strip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("static pattern compiles"))
}

/// Reduce a client filename to something safe to join onto the upload dir
///
/// - NFKD-normalized, then non-ASCII characters are dropped (`é` -> `e`)
/// - `/` and `\` become spaces, so no path components survive
/// - whitespace runs become a single `_`
/// - anything outside `[A-Za-z0-9_.-]` is removed
/// - leading and trailing `.` / `_` are trimmed
/// - Windows device names get a `_` prefix
///
/// The result may be empty; callers must reject that.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let stripped = strip_pattern().replace_all(&joined, "");
    let trimmed = stripped.trim_matches(|c: char| c == '.' || c == '_');

    let stem = trimmed.split('.').next().unwrap_or_default().to_uppercase();
    if !trimmed.is_empty() && WINDOWS_DEVICE_FILES.contains(&stem.as_str()) {
        return format!("_{}", trimmed);
    }

    trimmed.to_string()
}
