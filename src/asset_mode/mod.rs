//! Asset mode: file-based sheets, procedural fallback, or always procedural
//!
//! The effective mode is resolved with this precedence:
//! 1. an explicit per-call override
//! 2. the runtime preference store
//! 3. the build-time default (`ISOSPRITE_ASSET_MODE` at compile time)
//! 4. [`AssetMode::Off`]

mod prefs;

pub use prefs::{FilePreferences, MemoryPreferences, PreferenceStore, PrefsError, PREFERENCES_FILE};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How sheets for a pack are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AssetMode {
    /// Always load image files
    #[default]
    Off,
    /// Load image files, regenerate procedurally if loading fails
    Fallback,
    /// Always regenerate procedurally, even for file-backed packs
    Force,
}

/// An asset mode string matched none of the known names or aliases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown asset mode '{0}' (expected off, fallback or force)")]
pub struct UnknownAssetMode(pub String);

impl AssetMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetMode::Off => "off",
            AssetMode::Fallback => "fallback",
            AssetMode::Force => "force",
        }
    }

    /// Whether a file-backed pack is regenerated instead of loaded.
    pub fn forces_generation(self) -> bool {
        self == AssetMode::Force
    }
}

impl FromStr for AssetMode {
    type Err = UnknownAssetMode;

    /// Parse a mode name or one of its aliases, ignoring case and whitespace.
    ///
    /// ```
    /// use isosprite::asset_mode::AssetMode;
    ///
    /// assert_eq!("auto".parse(), Ok(AssetMode::Fallback));
    /// assert_eq!(" Always ".parse(), Ok(AssetMode::Force));
    /// assert_eq!("0".parse(), Ok(AssetMode::Off));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "0" | "false" | "disabled" => Ok(AssetMode::Off),
            "fallback" | "auto" => Ok(AssetMode::Fallback),
            "force" | "1" | "true" | "on" | "always" => Ok(AssetMode::Force),
            _ => Err(UnknownAssetMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for AssetMode {
    type Error = UnknownAssetMode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AssetMode> for String {
    fn from(mode: AssetMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for AssetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode baked in at compile time, if `ISOSPRITE_ASSET_MODE` was set and valid.
pub fn build_default() -> Option<AssetMode> {
    option_env!("ISOSPRITE_ASSET_MODE").and_then(|s| s.parse().ok())
}

/// Resolve the effective mode from all sources.
pub fn resolve_asset_mode(explicit: Option<AssetMode>, prefs: &dyn PreferenceStore) -> AssetMode {
    resolve_with_default(explicit, prefs, build_default())
}

fn resolve_with_default(
    explicit: Option<AssetMode>,
    prefs: &dyn PreferenceStore,
    build: Option<AssetMode>,
) -> AssetMode {
    explicit.or_else(|| prefs.asset_mode()).or(build).unwrap_or_default()
}
