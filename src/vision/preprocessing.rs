// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for the retinopathy classifier

use image::imageops::FilterType;
use image::DynamicImage;
use ndarray::Array4;

/// Square input size expected by the classifier
pub const CLASSIFIER_INPUT_SIZE: u32 = 224;

/// Number of colour channels (RGB)
pub const CLASSIFIER_CHANNELS: usize = 3;

/// Tensor shape fed to the classifier: [batch, height, width, channels]
pub const CLASSIFIER_INPUT_SHAPE: [usize; 4] = [
    1,
    CLASSIFIER_INPUT_SIZE as usize,
    CLASSIFIER_INPUT_SIZE as usize,
    CLASSIFIER_CHANNELS,
];

/// Preprocess an image for classification
///
/// Steps:
/// 1. Resize to exactly 224x224 (nearest neighbour, aspect ratio not kept)
/// 2. Convert to RGB
/// 3. Lay out as NHWC with a leading batch dimension [1, 224, 224, 3]
/// 4. Scale by 1/255 so every value lands in [0, 1]
pub fn preprocess_for_classification(image: &DynamicImage) -> Array4<f32> {
    let resized = image.resize_exact(
        CLASSIFIER_INPUT_SIZE,
        CLASSIFIER_INPUT_SIZE,
        FilterType::Nearest,
    );
    let rgb = resized.to_rgb8();

    let mut tensor = Array4::zeros(CLASSIFIER_INPUT_SHAPE);

    for (x, y, pixel) in rgb.enumerate_pixels() {
        for c in 0..CLASSIFIER_CHANNELS {
            tensor[[0, y as usize, x as usize, c]] = pixel[c] as f32 / 255.0;
        }
    }

    tensor
}
