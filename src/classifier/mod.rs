// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Retinopathy classification
//!
//! Components:
//! - `Classifier` - the single seam to the pre-trained model
//! - `onnx` - ONNX Runtime implementation of that seam
//! - `labels` - the five severity grades and their advisory messages
//! - `result` - argmax, confidence rounding and the final result type

pub mod labels;
pub mod onnx;
pub mod result;

use anyhow::Result;
use ndarray::Array4;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

use crate::vision::{load_image, preprocess_for_classification, ImageError};

pub use labels::{advisory_message, label_for_index, RetinopathyGrade, FALLBACK_MESSAGE};
pub use onnx::OnnxClassifier;
pub use result::{argmax, format_confidence, ClassificationResult};

/// A pre-trained image classifier
///
/// `classify` takes a `[1, 224, 224, 3]` tensor and returns one probability
/// per grade. Implementations are read-only after construction.
#[cfg_attr(test, mockall::automock)]
pub trait Classifier: Send + Sync {
    /// Run the model on a preprocessed tensor
    fn classify(&self, input: &Array4<f32>) -> Result<Vec<f32>>;

    /// Model name for logs and health reporting
    fn name(&self) -> &str;
}

/// Errors from the decode -> preprocess -> classify pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid image: {0}")]
    Image(#[from] ImageError),

    #[error("Classification failed: {0}")]
    Classifier(anyhow::Error),

    #[error("Classifier returned an empty probability vector")]
    EmptyPrediction,
}

/// Classify an image already stored on disk
///
/// Blocking: decodes, resizes and runs the model on the calling thread.
pub fn classify_image_file(
    classifier: &dyn Classifier,
    path: &Path,
) -> Result<ClassificationResult, PipelineError> {
    let started = Instant::now();

    let (image, info) = load_image(path)?;
    debug!(
        "Decoded image: {}x{}, {} bytes",
        info.width, info.height, info.size_bytes
    );

    let tensor = preprocess_for_classification(&image);
    let probabilities = classifier
        .classify(&tensor)
        .map_err(PipelineError::Classifier)?;

    let result = ClassificationResult::from_probabilities(&probabilities)
        .ok_or(PipelineError::EmptyPrediction)?;

    info!(
        "Classified {} as {} ({}%) in {}ms",
        path.display(),
        result.label,
        result.confidence_display(),
        started.elapsed().as_millis()
    );

    Ok(result)
}
