// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart parsing and upload validation for prediction requests

use axum_extra::extract::multipart::{Multipart, MultipartRejection};
use tracing::debug;

use crate::api::errors::ApiError;
use crate::upload::UploadedImage;

/// Multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// Why an upload was turned away before reaching the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No `file` field (or the body was not multipart)
    MissingFile,
    /// `file` field present with an empty filename
    EmptyFilename,
    /// Extension not allowed, or the name sanitized to nothing
    DisallowedFile,
}

impl Rejection {
    /// Where the HTML form flow redirects to
    pub fn redirect_target(self) -> &'static str {
        match self {
            Rejection::MissingFile | Rejection::EmptyFilename => "/predict",
            Rejection::DisallowedFile => "/",
        }
    }

    /// JSON API equivalent
    pub fn to_api_error(self) -> ApiError {
        let message = match self {
            Rejection::MissingFile => "file is required".to_string(),
            Rejection::EmptyFilename => "file must have a filename".to_string(),
            Rejection::DisallowedFile => format!(
                "unsupported file, allowed extensions: {:?}",
                crate::upload::ALLOWED_EXTENSIONS
            ),
        };
        ApiError::ValidationError {
            field: FILE_FIELD.to_string(),
            message,
        }
    }
}

/// Outcome of reading the request body
#[derive(Debug)]
pub enum UploadField {
    Rejected(Rejection),
    Accepted(UploadedImage),
}

/// Pull the `file` field out of a multipart body and run the admission checks
///
/// A body that is not multipart at all counts as a missing file.
pub async fn read_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadField, ApiError> {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            debug!("Request body is not multipart: {}", e);
            return Ok(UploadField::Rejected(Rejection::MissingFile));
        }
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Failed to parse multipart data: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Ok(UploadField::Rejected(Rejection::EmptyFilename));
        }

        if !crate::upload::allowed_file(&filename) {
            return Ok(UploadField::Rejected(Rejection::DisallowedFile));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to read upload: {}", e)))?;

        return Ok(UploadField::Accepted(UploadedImage::new(
            filename,
            bytes.to_vec(),
        )));
    }

    Ok(UploadField::Rejected(Rejection::MissingFile))
}
