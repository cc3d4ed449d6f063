//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod generate;
mod layout;
mod packs;
mod style;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::assets::PackList;
use crate::config::{load_config, load_packs, IsospriteConfig};
use crate::pack::{SheetKind, SpritePack};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Isosprite - deterministic procedural isometric sprite sheets
#[derive(Parser)]
#[command(name = "isosprite")]
#[command(about = "Isosprite - generate isometric sprite sheets from pack descriptors")]
#[command(version)]
pub struct Cli {
    /// Path to isosprite.toml (default: discovered from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate sheet PNGs for one or more packs
    Generate {
        /// Pack descriptor files or directories (.json, .toml)
        packs: Vec<PathBuf>,

        /// Only generate this pack
        #[arg(long)]
        pack: Option<String>,

        /// Sheet kind to generate (default: main)
        #[arg(short, long, conflicts_with = "all")]
        kind: Option<SheetKind>,

        /// Generate every kind the pack supports
        #[arg(long)]
        all: bool,

        /// Override every pack's seed
        #[arg(long)]
        seed: Option<u32>,

        /// Scale output by integer factor (1-16)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: u8,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Print the resolved style for a sprite key
    Style {
        /// Sprite key, e.g. house_small or dense:apartment_high
        key: String,

        /// Render the sprite to this PNG file
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Status variant for the preview: main, construction or abandoned
        #[arg(long, default_value = "main")]
        variant: SheetKind,

        /// Tile size of the preview in pixels
        #[arg(long, default_value = "64", value_parser = clap::value_parser!(u32).range(8..=1024))]
        size: u32,

        /// Seed for the preview
        #[arg(long, default_value = "0")]
        seed: u32,

        /// Scale the preview by integer factor (1-16)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: u8,
    },

    /// Print where each cell of a sheet is placed
    Layout {
        /// Pack descriptor files or directories (.json, .toml)
        packs: Vec<PathBuf>,

        /// Pack id
        #[arg(long)]
        pack: String,

        /// Sheet kind
        #[arg(short, long, default_value = "main")]
        kind: SheetKind,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List packs and the sheet kinds they support
    Packs {
        /// Pack descriptor files or directories (.json, .toml)
        packs: Vec<PathBuf>,
    },
}

/// Install the stderr log subscriber.
fn init_logging(verbose: bool) {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    // Only fails if a subscriber is already installed
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Load the config, reporting failures the way every command does.
fn load_cli_config(path: Option<&Path>) -> Result<IsospriteConfig, ExitCode> {
    load_config(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}

/// Packs from the config file, its pack directory, then the command line.
///
/// Later sources replace earlier packs with the same id.
fn collect_packs(config: &IsospriteConfig, inputs: &[PathBuf]) -> Result<PackList, ExitCode> {
    let mut list: PackList = config.packs.iter().cloned().collect();

    let mut sources = Vec::new();
    if let Some(dir) = &config.assets.pack_dir {
        sources.push(dir.clone());
    }
    for input in inputs {
        if !input.exists() {
            eprintln!("Error: {} does not exist", input.display());
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
        sources.push(input.clone());
    }

    let loaded = load_packs(&sources).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })?;
    for pack in loaded {
        list.register(pack);
    }
    Ok(list)
}

/// Look up one pack by id.
fn find_pack<'a>(list: &'a PackList, id: &str) -> Result<&'a SpritePack, ExitCode> {
    list.get(id).ok_or_else(|| {
        eprintln!("Error: no pack with id '{}' (known: {})", id, list.ids().join(", "));
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Run the CLI application.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_cli_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let result = match cli.command {
        Commands::Generate { packs, pack, kind, all, seed, scale, output } => {
            let options = generate::GenerateOptions { pack, kind, all, seed, scale, output };
            generate::run_generate(&config, &packs, &options)
        }
        Commands::Style { key, preview, variant, size, seed, scale } => {
            if variant.is_main_grid() {
                style::run_style(&key, preview.as_deref(), variant, size, seed, scale)
            } else {
                eprintln!("Error: --variant must be main, construction or abandoned");
                Err(ExitCode::from(EXIT_INVALID_ARGS))
            }
        }
        Commands::Layout { packs, pack, kind, json } => layout::run_layout(&config, &packs, &pack, kind, json),
        Commands::Packs { packs } => packs::run_packs(&config, &packs),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(code) => code,
    }
}
