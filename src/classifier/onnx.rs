// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ONNX Runtime adapter for the retinopathy CNN
//!
//! The trained Keras model is exported to ONNX once, outside this crate.
//! This module only loads that artifact and runs it; it knows nothing about
//! the network's layers.

use anyhow::{Context, Result};
use ndarray::{Array4, Axis};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::labels::NUM_GRADES;
use super::Classifier;
use crate::vision::CLASSIFIER_INPUT_SHAPE;

/// Retinopathy classifier backed by an ONNX Runtime session
///
/// Runs on CPU. The session is loaded once at startup and shared across
/// requests; the mutex serialises `run` calls, which need exclusive access.
#[derive(Clone)]
pub struct OnnxClassifier {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// Model input name
    input_name: String,
    /// Model name reported by /health
    model_name: String,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("input_name", &self.input_name)
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}

impl OnnxClassifier {
    /// Load the classifier from an ONNX file
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found
    /// - ONNX Runtime initialization fails
    pub fn new<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("Classifier model not found: {}", model_path.display());
        }

        info!("Loading retinopathy classifier from {}", model_path.display());

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load classifier model from {}",
                model_path.display()
            ))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "input".to_string());

        if let Some(input) = session.inputs.first() {
            debug!("Classifier input {}: {:?}", input_name, input.input_type);
        }

        let model_name = model_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "retinopathy-cnn".to_string());

        info!("✅ Retinopathy classifier loaded (CPU-only)");

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            model_name,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, input: &Array4<f32>) -> Result<Vec<f32>> {
        validate_input_shape(input.shape())?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Classifier session lock poisoned"))?;

        let input_value =
            Value::from_array(input.to_owned()).context("Failed to create input tensor")?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_value])
            .context("Classifier inference failed")?;

        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        debug!("Classifier output shape: {:?}", output_tensor.shape());

        // [batch, classes] -> first batch row
        let probabilities: Vec<f32> = if output_tensor.ndim() >= 2 {
            output_tensor.index_axis(Axis(0), 0).iter().copied().collect()
        } else {
            output_tensor.iter().copied().collect()
        };

        validate_output_len(probabilities.len())?;

        Ok(probabilities)
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

/// Check a tensor shape against the classifier's expected input
pub fn validate_input_shape(shape: &[usize]) -> Result<()> {
    if shape != CLASSIFIER_INPUT_SHAPE {
        anyhow::bail!(
            "Invalid input shape: {:?}, expected {:?}",
            shape,
            CLASSIFIER_INPUT_SHAPE
        );
    }
    Ok(())
}

/// Check the probability vector length against the number of grades
pub fn validate_output_len(len: usize) -> Result<()> {
    if len != NUM_GRADES {
        anyhow::bail!(
            "Classifier returned {} probabilities, expected {}",
            len,
            NUM_GRADES
        );
    }
    Ok(())
}
