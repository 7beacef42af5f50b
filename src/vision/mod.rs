// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module for retinal photographs
//!
//! This module provides:
//! - Image decoding with magic-byte format detection
//! - Preprocessing into the classifier's NHWC input tensor

pub mod image_utils;
pub mod preprocessing;

pub use image_utils::{decode_image_bytes, detect_format, load_image, ImageError, ImageInfo};
pub use preprocessing::{
    preprocess_for_classification, CLASSIFIER_INPUT_SHAPE, CLASSIFIER_INPUT_SIZE,
};
