//! Den CLI - den command

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::Level;

mod cmd;
mod config;
mod util;

/// Den - Sync compendium packs between source files and LevelDB-style stores
#[derive(Parser)]
#[command(name = "den")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a folder of YAML/JSON documents into a store
    Pack {
        /// Folder holding one document per file
        source: PathBuf,
        /// Store directory (created if missing)
        store: PathBuf,
    },
    /// Unpack a store into one file per document
    Unpack {
        /// Store directory
        store: PathBuf,
        /// Output folder (created if missing)
        output: PathBuf,
        /// Output format: json, yml or yaml
        #[arg(short, long, default_value = "yml")]
        format: String,
    },
    /// Pack (or unpack) every pack listed in den.toml
    Build {
        /// Path to den.toml (default: search upward from the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Build profile
        #[arg(short, long)]
        profile: Option<String>,
        /// Unpack stores back into source folders instead of packing
        #[arg(long)]
        unpack: bool,
        /// Unpack format (overrides the profile's format)
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the parsed den.toml
    Show {
        /// Path to den.toml (default: search upward from the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print an example den.toml
    Example,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    match cli.command {
        Commands::Pack { source, store } => cmd::pack::run(&source, &store).await,
        Commands::Unpack { store, output, format } => {
            cmd::unpack::run(&store, &output, &format).await
        }
        Commands::Build { config, profile, unpack, format } => {
            let config_path = locate_config(config, &cwd)?;
            cmd::build::run(&config_path, profile.as_deref(), unpack, format.as_deref()).await
        }
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show { config } => {
                let config_path = locate_config(config, &cwd)?;
                cmd::config::run_show(&config_path).await
            }
            ConfigCommands::Example => cmd::config::run_example().await,
        },
    }
}

fn locate_config(explicit: Option<PathBuf>, cwd: &Path) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_absolute() => Ok(path),
        Some(path) => Ok(cwd.join(path)),
        None => config::find_config(cwd),
    }
}
