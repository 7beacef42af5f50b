// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

/// Retinopathy screening server
///
/// Flags override the matching environment variables.
#[derive(Parser, Debug, Default)]
#[command(name = "retina-screen-node")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Upload a retinal image, get a retinopathy grade", long_about = None)]
pub struct ServeArgs {
    /// Address to listen on (e.g. 0.0.0.0:5000)
    #[arg(long)]
    pub listen: Option<String>,

    /// ONNX classifier model
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Directory uploaded images are written to
    #[arg(long)]
    pub upload_dir: Option<PathBuf>,

    /// Request body limit in bytes
    #[arg(long)]
    pub max_upload_bytes: Option<usize>,
}

impl ServeArgs {
    /// Apply the flags on top of a base configuration
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(listen) = self.listen {
            config.listen_addr = listen;
        }
        if let Some(model) = self.model {
            config.model_path = model;
        }
        if let Some(dir) = self.upload_dir {
            config.upload_dir = dir;
        }
        if let Some(limit) = self.max_upload_bytes {
            config.max_upload_bytes = limit;
        }
        config
    }

    /// Environment configuration with the flags applied
    pub fn into_config(self) -> AppConfig {
        self.apply(AppConfig::from_env())
    }
}
