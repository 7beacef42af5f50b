// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! JSON response for POST /v1/predict

use serde::{Deserialize, Serialize};

use crate::api::pages::upload_url;
use crate::classifier::{ClassificationResult, RetinopathyGrade};

/// Response from the JSON prediction endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    /// Request identifier, also present in logs
    pub request_id: String,
    /// Sanitized filename the upload was stored under
    pub filename: String,
    /// URL the stored image is served from
    pub image_url: String,
    /// Severity label (e.g. "Moderate")
    pub severity: String,
    /// Grade enum value, absent if the index was out of range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<RetinopathyGrade>,
    /// Argmax class index
    pub class_index: usize,
    /// Confidence percentage, rounded to 2 decimals
    pub confidence: f64,
    /// Advisory message
    pub message: String,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Model used
    pub model: String,
}

impl PredictResponse {
    pub fn new(
        request_id: String,
        filename: String,
        result: ClassificationResult,
        processing_time_ms: u64,
        model: &str,
    ) -> Self {
        Self {
            request_id,
            image_url: upload_url(&filename),
            filename,
            severity: result.label,
            grade: result.grade,
            class_index: result.class_index,
            confidence: result.confidence,
            message: result.message,
            processing_time_ms,
            model: model.to_string(),
        }
    }
}
