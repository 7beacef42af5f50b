// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Turns a probability vector into a labelled, human-readable result

use serde::{Deserialize, Serialize};

use super::labels::{advisory_message, label_for_index, RetinopathyGrade};

/// Index of the highest probability
///
/// Ties resolve to the lowest index. Returns `None` for an empty vector.
pub fn argmax(probabilities: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in probabilities.iter().enumerate() {
        let replace = match best {
            None => true,
            Some((_, max)) => p > max,
        };
        if replace {
            best = Some((i, p));
        }
    }
    best.map(|(i, _)| i)
}

/// Round to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a rounded percentage for display
///
/// Whole numbers keep a single decimal (`70.0`), anything else prints as is.
pub fn format_confidence(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Outcome of classifying one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// Argmax class index
    pub class_index: usize,
    /// Grade for the class index (None if the index is out of range)
    pub grade: Option<RetinopathyGrade>,
    /// Display label
    pub label: String,
    /// Confidence as a percentage rounded to 2 decimals
    pub confidence: f64,
    /// Advisory message
    pub message: String,
}

impl ClassificationResult {
    /// Build a result from a softmax vector
    ///
    /// Returns `None` if the vector is empty.
    pub fn from_probabilities(probabilities: &[f32]) -> Option<Self> {
        let index = argmax(probabilities)?;
        let confidence = round2(f64::from(probabilities[index]) * 100.0);
        Some(Self::from_index(index, confidence))
    }

    /// Build a result for a class index and an already-scaled confidence
    ///
    /// Label and message both come from the same index.
    pub fn from_index(class_index: usize, confidence: f64) -> Self {
        Self {
            class_index,
            grade: RetinopathyGrade::from_index(class_index),
            label: label_for_index(class_index).to_string(),
            confidence,
            message: advisory_message(class_index).to_string(),
        }
    }

    /// Confidence formatted for display
    pub fn confidence_display(&self) -> String {
        format_confidence(self.confidence)
    }
}
