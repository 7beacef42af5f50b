// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Parser;
use retina_screen_node::{
    api::start_server,
    classifier::{Classifier, OnnxClassifier},
    cli::ServeArgs,
    version,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting {}", version::get_version_string());
    println!();

    let config = ServeArgs::parse().into_config();
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    // The classifier is loaded once and shared read-only by all requests
    println!("🧠 Loading classifier from {}...", config.model_path.display());
    let classifier = OnnxClassifier::new(&config.model_path)?;
    println!("✅ Classifier loaded: {}", classifier.name());

    let classifier: Arc<dyn Classifier> = Arc::new(classifier);

    println!("🌐 Listening on http://{}", config.listen_addr);
    start_server(config, classifier).await?;

    println!("👋 Retina Screen Node stopped");
    Ok(())
}
