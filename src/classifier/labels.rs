// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Diabetic retinopathy grades and their advisory messages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of classes the model distinguishes
pub const NUM_GRADES: usize = 5;

/// Message shown when the class index does not map to a grade
pub const FALLBACK_MESSAGE: &str = "Unable to determine the retinopathy level.";

/// Label shown when the class index does not map to a grade
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Severity grade, in the model's output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetinopathyGrade {
    NoDr,
    Mild,
    Moderate,
    Severe,
    Proliferative,
}

impl RetinopathyGrade {
    /// All grades, indexed by model output position
    pub const ALL: [RetinopathyGrade; NUM_GRADES] = [
        RetinopathyGrade::NoDr,
        RetinopathyGrade::Mild,
        RetinopathyGrade::Moderate,
        RetinopathyGrade::Severe,
        RetinopathyGrade::Proliferative,
    ];

    /// Grade for a model output index, if it is one of the five classes
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position of this grade in the model output
    pub fn index(self) -> usize {
        match self {
            RetinopathyGrade::NoDr => 0,
            RetinopathyGrade::Mild => 1,
            RetinopathyGrade::Moderate => 2,
            RetinopathyGrade::Severe => 3,
            RetinopathyGrade::Proliferative => 4,
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            RetinopathyGrade::NoDr => "No DR",
            RetinopathyGrade::Mild => "Mild",
            RetinopathyGrade::Moderate => "Moderate",
            RetinopathyGrade::Severe => "Severe",
            RetinopathyGrade::Proliferative => "Proliferative DR",
        }
    }

    /// Advisory message shown to the patient
    pub fn advisory(self) -> &'static str {
        match self {
            RetinopathyGrade::NoDr => {
                "Your eyes show no signs of diabetic retinopathy. Continue regular check-ups."
            }
            RetinopathyGrade::Mild => {
                "Mild diabetic retinopathy detected. Keep your blood sugar levels in control and consult your ophthalmologist."
            }
            RetinopathyGrade::Moderate => {
                "Moderate diabetic retinopathy detected. Medical evaluation is advised."
            }
            RetinopathyGrade::Severe => {
                "Severe diabetic retinopathy detected. Please consult a retina specialist immediately."
            }
            RetinopathyGrade::Proliferative => {
                "Proliferative diabetic retinopathy detected. This is the most advanced stage. Urgent treatment is needed."
            }
        }
    }
}

impl fmt::Display for RetinopathyGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Advisory message for a raw class index
pub fn advisory_message(index: usize) -> &'static str {
    RetinopathyGrade::from_index(index)
        .map(RetinopathyGrade::advisory)
        .unwrap_or(FALLBACK_MESSAGE)
}

/// Label for a raw class index
pub fn label_for_index(index: usize) -> &'static str {
    RetinopathyGrade::from_index(index)
        .map(RetinopathyGrade::label)
        .unwrap_or(UNKNOWN_LABEL)
}
