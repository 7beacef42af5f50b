// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

use crate::classifier::{classify_image_file, OnnxClassifier, RetinopathyGrade};
use crate::config::AppConfig;
use crate::upload::{allowed_file, secure_filename};

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Fundus image to classify (PNG or JPEG)
    pub image: PathBuf,

    /// ONNX model (defaults to MODEL_PATH or the built-in path)
    #[arg(long, env = "MODEL_PATH")]
    pub model: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the grades command
#[derive(Args, Debug)]
pub struct GradesArgs {
    /// Print the grades as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the check-filename command
#[derive(Args, Debug)]
pub struct CheckFilenameArgs {
    /// Filename as a client would submit it
    pub filename: String,
}

/// Run the full pipeline on one local file
pub async fn classify(args: ClassifyArgs) -> Result<()> {
    let name = args.image.display().to_string();
    if !allowed_file(&name) {
        return Err(anyhow!(
            "{} is not an allowed image type (png, jpg, jpeg)",
            name
        ));
    }

    let model_path = args.model.unwrap_or_else(|| AppConfig::default().model_path);
    info!("Loading classifier from {}", model_path.display());

    let image = args.image;
    let result = tokio::task::spawn_blocking(move || {
        let classifier = OnnxClassifier::new(&model_path)?;
        classify_image_file(&classifier, &image).map_err(anyhow::Error::from)
    })
    .await??;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Severity Level: {}", result.label);
        println!("Confidence:     {}%", result.confidence_display());
        println!("{}", result.message);
    }

    Ok(())
}

/// Print the grade table
pub fn list_grades(args: GradesArgs) -> Result<()> {
    if args.json {
        let grades: Vec<_> = RetinopathyGrade::ALL
            .iter()
            .map(|g| {
                json!({
                    "index": g.index(),
                    "label": g.label(),
                    "message": g.advisory(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&grades)?);
        return Ok(());
    }

    for grade in RetinopathyGrade::ALL {
        println!("{}  {:<16} {}", grade.index(), grade.label(), grade.advisory());
    }
    Ok(())
}

/// Show whether a filename would be admitted and what it would be stored as
pub fn check_filename(args: CheckFilenameArgs) -> Result<()> {
    let allowed = allowed_file(&args.filename);
    let stored = secure_filename(&args.filename);

    println!("Allowed:     {}", if allowed { "yes" } else { "no" });
    if stored.is_empty() {
        println!("Stored as:   (nothing usable, upload would be rejected)");
    } else {
        println!("Stored as:   {}", stored);
    }
    Ok(())
}
