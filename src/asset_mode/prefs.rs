//! Runtime preference stores for the asset mode.

use super::AssetMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use tracing::warn;

/// File name used for persisted preferences inside the config directory
pub const PREFERENCES_FILE: &str = "preferences.toml";

/// Preference persistence error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PrefsError {
    /// File I/O error
    #[error("Failed to write preferences: {0}")]
    Io(#[from] std::io::Error),
    /// TOML serialization error
    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User preference source consulted after an explicit override.
pub trait PreferenceStore: Send + Sync {
    /// The stored mode, or `None` if the user never chose one.
    fn asset_mode(&self) -> Option<AssetMode>;

    /// Store a mode, or forget it with `None`.
    fn set_asset_mode(&self, mode: Option<AssetMode>) -> Result<(), PrefsError>;
}

/// In-process store, for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    mode: RwLock<Option<AssetMode>>,
}

impl MemoryPreferences {
    pub fn with_mode(mode: AssetMode) -> Self {
        Self { mode: RwLock::new(Some(mode)) }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn asset_mode(&self) -> Option<AssetMode> {
        *self.mode.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_asset_mode(&self, mode: Option<AssetMode>) -> Result<(), PrefsError> {
        *self.mode.write().unwrap_or_else(PoisonError::into_inner) = mode;
        Ok(())
    }
}

/// On-disk layout of the preferences file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesFile {
    /// Kept as a string so an unknown value only disables the preference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    asset_mode: Option<String>,
}

/// Preferences persisted in a small TOML file.
///
/// A missing or unreadable file means "no preference"; only writes report errors.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the user config directory, if one can be determined.
    pub fn in_config_dir() -> Option<Self> {
        crate::config::config_dir().map(|dir| Self::new(dir.join(PREFERENCES_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> PreferencesFile {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return PreferencesFile::default();
        };
        toml::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), "ignoring unreadable preferences: {}", e);
            PreferencesFile::default()
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn asset_mode(&self) -> Option<AssetMode> {
        let raw = self.read().asset_mode?;
        match raw.parse() {
            Ok(mode) => Some(mode),
            Err(e) => {
                warn!(path = %self.path.display(), "{}", e);
                None
            }
        }
    }

    fn set_asset_mode(&self, mode: Option<AssetMode>) -> Result<(), PrefsError> {
        let mut prefs = self.read();
        prefs.asset_mode = mode.map(String::from);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string(&prefs)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let prefs = MemoryPreferences::with_mode(AssetMode::Fallback);
        assert_eq!(prefs.asset_mode(), Some(AssetMode::Fallback));
        prefs.set_asset_mode(None).unwrap();
        assert_eq!(prefs.asset_mode(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let prefs = FilePreferences::new(dir.path().join("nested").join(PREFERENCES_FILE));
        assert_eq!(prefs.asset_mode(), None);

        prefs.set_asset_mode(Some(AssetMode::Force)).unwrap();
        assert_eq!(FilePreferences::new(prefs.path()).asset_mode(), Some(AssetMode::Force));

        prefs.set_asset_mode(None).unwrap();
        assert_eq!(prefs.asset_mode(), None);
    }

    #[test]
    fn test_file_store_accepts_aliases_and_ignores_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);

        fs::write(&path, "asset_mode = \"always\"\n").unwrap();
        assert_eq!(FilePreferences::new(&path).asset_mode(), Some(AssetMode::Force));

        fs::write(&path, "asset_mode = \"sometimes\"\n").unwrap();
        assert_eq!(FilePreferences::new(&path).asset_mode(), None);

        fs::write(&path, "not toml [").unwrap();
        assert_eq!(FilePreferences::new(&path).asset_mode(), None);
    }
}
