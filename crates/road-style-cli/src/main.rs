//! road-style CLI tool.
//!
//! Usage:
//! ```bash
//! road-style generate [--palette NAME] [--format json|compact] [--class NAME ...]
//! road-style list-classes
//! road-style eval --feature '{"class":"motorway"}' [--zoom 12]
//! road-style init
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Road style layer generator for MapLibre vector tiles
#[derive(Parser)]
#[command(name = "road-style")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated stylesheet
    Generate {
        /// Palette to use (overrides the config file)
        #[arg(short, long)]
        palette: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Only generate these road classes (can be specified multiple times)
        #[arg(long = "class")]
        classes: Vec<String>,
    },

    /// List built-in road classes
    ListClasses,

    /// Show which layers draw a feature and in which colours
    Eval {
        /// Feature properties as a JSON object
        #[arg(long)]
        feature: String,

        /// Zoom level to evaluate at
        #[arg(short, long, default_value_t = 14.0)]
        zoom: f64,

        /// Palette to use (overrides the config file)
        #[arg(short, long)]
        palette: Option<String>,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for stylesheets.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Single-line JSON.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            palette,
            format,
            classes,
        } => {
            let source = resolve_config(cli.config.as_deref())?;
            commands::generate::run(&source, palette, &classes, format)
        }
        Commands::ListClasses => {
            commands::list_classes::run();
            Ok(())
        }
        Commands::Eval {
            feature,
            zoom,
            palette,
        } => {
            let source = resolve_config(cli.config.as_deref())?;
            commands::eval::run(&source, &feature, zoom, palette)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}

fn resolve_config(explicit: Option<&std::path::Path>) -> Result<config_resolver::ConfigSource> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(config_resolver::resolve(&cwd, explicit))
}
