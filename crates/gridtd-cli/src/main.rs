//! gridtd CLI - train and inspect the grid-world TD agent

// Clippy pedantic allows - these are intentional design choices
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod render;
mod settings;

use commands::{board, config, train};
use settings::Settings;

#[derive(Parser)]
#[command(name = "gridtd")]
#[command(author, version, about = "gridtd - TD(0) value learning on a small grid world", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to $GRIDTD_CONFIG, ./gridtd.toml, then the user config dir)
    #[arg(short = 'c', long = "config", global = true)]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent and print the learned values
    Train(train::TrainArgs),

    /// Show the board layout
    Board,

    /// Configuration management
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

/// Install the stderr subscriber, plus a plain-text transcript layer when
/// a path is given
fn init_logging(verbose: bool, transcript: Option<&Path>) -> Result<()> {
    let log_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("gridtd_cli={log_level},gridtd_rl={log_level},gridtd_core={log_level}").into()
    });

    let transcript_layer = match transcript {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create transcript {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false)
                    .with_level(false)
                    .without_time(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(transcript_layer)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut settings, source) = Settings::load(cli.config_file.as_deref())?;
    if let Commands::Train(args) = &cli.command {
        args.apply(&mut settings);
    }

    init_logging(cli.verbose, settings.output.transcript.as_deref())?;
    match &source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    match cli.command {
        Commands::Train(_) => train::run(&settings),
        Commands::Board => board::run(),
        Commands::Config(cmd) => config::run(cmd, &settings, source.as_deref()),
    }
}
