// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Runtime configuration for the screening node

use std::env;
use std::path::PathBuf;

/// Default ONNX export of the retinopathy CNN
pub const DEFAULT_MODEL_PATH: &str = "models/diabetic_retinopathy_cnn.onnx";

/// Uploads live under the static tree so the result page can link to them
pub const DEFAULT_UPLOAD_DIR: &str = "static/uploads";

/// Default listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

/// Maximum request body size (10MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Configuration for the HTTP server and classifier
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the server binds to
    pub listen_addr: String,
    /// Path to the classifier model file
    pub model_path: PathBuf,
    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,
    /// Request body limit in bytes
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!("Invalid listen address: {}", self.listen_addr));
        }

        if self.max_upload_bytes == 0 {
            return Err("Max upload size must be greater than 0".to_string());
        }

        if self.upload_dir.as_os_str().is_empty() {
            return Err("Upload directory must not be empty".to_string());
        }

        Ok(())
    }
}
