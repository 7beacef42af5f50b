// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod classify;
pub mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use serve::ServeArgs;

/// Retina Screen Node CLI
#[derive(Parser, Debug)]
#[command(name = "retina-cli")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Offline tools for the retinopathy screening node", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a single fundus image without starting the server
    Classify(classify::ClassifyArgs),

    /// List the severity grades and their advisory messages
    Grades(classify::GradesArgs),

    /// Check an upload filename against the allow-list and show its stored name
    CheckFilename(classify::CheckFilenameArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Classify(args) => classify::classify(args).await,
        Commands::Grades(args) => classify::list_grades(args),
        Commands::CheckFilename(args) => classify::check_filename(args),
    }
}
