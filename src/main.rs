// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use photo_registry::{Config, PlatformMode};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "photo-registry")]
#[command(about = "Capture photos into a persistent photo registry")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/photo-registry/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Platform mode to emulate (embedded or browser)
    #[arg(long, global = true)]
    mode: Option<PlatformMode>,

    /// Durable application-data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture a photo (uses an image file as the camera)
    Capture {
        /// Image file the camera returns
        #[arg(short, long)]
        image: PathBuf,
    },

    /// List stored photos, newest first
    List,

    /// Delete a stored photo
    Delete {
        /// Photo index to delete (from 'photo-registry list')
        index: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=photo_registry=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    if let Some(mode) = cli.mode {
        config.platform = mode;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir);
    }

    match cli.command {
        Commands::Capture { image } => cli::capture(&config, image),
        Commands::List => cli::list(&config),
        Commands::Delete { index } => cli::delete(&config, index),
    }
}
