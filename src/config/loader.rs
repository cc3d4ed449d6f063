//! Configuration loading and discovery for `isosprite.toml`
//!
//! Also loads standalone pack descriptor files (`.json` or `.toml`).

use super::schema::{validate_packs, IsospriteConfig};
use crate::pack::SpritePack;
use glob::glob;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Config file name looked up during discovery
pub const CONFIG_FILE: &str = "isosprite.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML parsing error
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// JSON parsing error
    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Pack file with an extension other than .json or .toml
    #[error("Unsupported pack file {} (expected .json or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// The per-user config directory: `$XDG_CONFIG_HOME/isosprite` or
/// `~/.config/isosprite`.
pub fn config_dir() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;
    Some(xdg_config.join("isosprite"))
}

/// Find isosprite.toml by walking up from the current working directory,
/// then in the user config directory.
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }
    find_xdg_config()
}

/// Find isosprite.toml in the user config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let config_path = config_dir()?.join(CONFIG_FILE);
    config_path.exists().then_some(config_path)
}

/// Find isosprite.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from `path`, or from the discovered file, or defaults.
pub fn load_config(path: Option<&Path>) -> Result<IsospriteConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(IsospriteConfig::default()),
    }
}

/// Load and validate a specific config file.
pub fn load_config_file(path: &Path) -> Result<IsospriteConfig, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let contents = read(path)?;
    let config: IsospriteConfig = toml::from_str(&contents)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

/// Check if a path has a pack descriptor extension (.json or .toml).
pub fn is_pack_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("json") | Some("toml"))
}

/// Load one pack descriptor; the format follows the file extension.
pub fn load_pack_file(path: &Path) -> Result<SpritePack, ConfigError> {
    let contents = read(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&contents)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source }),
        Some("toml") => toml::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source }),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Find pack descriptor files directly inside a directory, sorted by path.
pub fn find_pack_files(dir: &Path) -> Vec<PathBuf> {
    let dir_str = dir.display().to_string();
    let mut files = Vec::new();
    for ext in ["json", "toml"] {
        if let Ok(paths) = glob(&format!("{}/*.{}", dir_str, ext)) {
            files.extend(paths.filter_map(Result::ok));
        }
    }
    // A config file can live next to pack files
    files.retain(|p| p.file_name().and_then(|n| n.to_str()) != Some(CONFIG_FILE));
    files.sort();
    files
}

/// Load packs from a list of files and directories, rejecting invalid or
/// duplicate descriptors.
pub fn load_packs(inputs: &[PathBuf]) -> Result<Vec<SpritePack>, ConfigError> {
    let mut packs = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for file in find_pack_files(input) {
                packs.push(load_pack_file(&file)?);
            }
        } else {
            packs.push(load_pack_file(input)?);
        }
    }

    let errors = validate_packs(&packs);
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    debug!(count = packs.len(), "loaded packs");
    Ok(packs)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
}
