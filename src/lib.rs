// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod upload;
pub mod version;
pub mod vision;

pub use api::{create_app, start_server, AppState};
pub use classifier::{
    classify_image_file, ClassificationResult, Classifier, OnnxClassifier, RetinopathyGrade,
};
pub use config::AppConfig;
pub use upload::UploadStore;
