//! Configuration schema types for `isosprite.toml`
//!
//! Defines the structure and validation for generator configuration.

use crate::asset_mode::AssetMode;
use crate::pack::{default_tile_size, SpritePack};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Root configuration structure for isosprite.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsospriteConfig {
    /// Generator defaults
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Asset loading behaviour
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Inline pack descriptors
    #[serde(default)]
    pub packs: Vec<SpritePack>,
}

/// Generator section: global seed and default tile size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Global seed; when set it replaces every pack's own seed
    #[serde(default)]
    pub seed: Option<u32>,
    /// Tile width for derived procedural packs
    #[serde(default = "default_tile_size")]
    pub tile_width: u32,
    /// Tile height for derived procedural packs
    #[serde(default = "default_tile_size")]
    pub tile_height: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { seed: None, tile_width: default_tile_size(), tile_height: default_tile_size() }
    }
}

/// Assets section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Asset mode used when no per-call override or user preference is set
    #[serde(default)]
    pub mode: Option<AssetMode>,
    /// Directory holding `.json`/`.toml` pack descriptors
    #[serde(default)]
    pub pack_dir: Option<PathBuf>,
}

/// Validation error for configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "packs.classic.cols")
    pub field: String,
    /// Error message
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: impl Into<String>, message: &str) -> Self {
        Self { field: field.into(), message: message.to_string() }
    }
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' {}", self.field, self.message)
    }
}

impl IsospriteConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.generator.tile_width == 0 {
            errors.push(ConfigValidationError::new("generator.tile_width", "must be a positive integer"));
        }
        if self.generator.tile_height == 0 {
            errors.push(ConfigValidationError::new("generator.tile_height", "must be a positive integer"));
        }

        errors.extend(validate_packs(&self.packs));
        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Validate one pack descriptor.
pub fn validate_pack(pack: &SpritePack) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    let field = |name: &str| format!("packs.{}.{}", pack.id, name);

    if pack.id.is_empty() {
        errors.push(ConfigValidationError::new("packs.id", "must be a non-empty string"));
    }
    if pack.cols == 0 {
        errors.push(ConfigValidationError::new(field("cols"), "must be a positive integer"));
    }
    if pack.rows == 0 {
        errors.push(ConfigValidationError::new(field("rows"), "must be a positive integer"));
    }
    for (kind, grid) in &pack.grids {
        if grid.cols == 0 || grid.rows == 0 {
            errors.push(ConfigValidationError::new(field(&format!("grids.{}", kind)), "dimensions must be positive"));
        }
    }
    if let Some(spec) = &pack.procedural {
        if spec.tile_width == 0 || spec.tile_height == 0 {
            errors.push(ConfigValidationError::new(field("procedural"), "tile size must be positive"));
        }
    }
    errors
}

/// Validate a set of packs, including id uniqueness.
pub fn validate_packs(packs: &[SpritePack]) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for pack in packs {
        errors.extend(validate_pack(pack));
        if !pack.id.is_empty() && !seen.insert(pack.id.as_str()) {
            errors.push(ConfigValidationError::new(format!("packs.{}", pack.id), "is defined more than once"));
        }
    }
    errors
}
