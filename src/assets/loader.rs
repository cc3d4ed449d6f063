//! Sheet loading with procedural fallback

use super::derive::forced_procedural;
use crate::asset_mode::AssetMode;
use crate::pack::{ProceduralSpec, SheetKind, SpritePack};
use crate::sheet::{GenerateError, SheetGenerator};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Failure to obtain a sheet.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The pack names no source for this kind
    #[error("Pack '{pack_id}' has no source for '{kind}'")]
    MissingSource { pack_id: String, kind: SheetKind },
    /// File I/O error
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Image decoding error
    #[error("Failed to decode {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Procedural generation failed
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Loads file-backed sheets. Implemented by hosts with their own storage.
pub trait SheetLoader: Send + Sync {
    fn load(&self, pack: &SpritePack, kind: SheetKind, source: &str) -> Result<RgbaImage, LoadError>;
}

/// Loads sheet images from disk, relative to a root directory.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SheetLoader for FileLoader {
    fn load(&self, _pack: &SpritePack, _kind: SheetKind, source: &str) -> Result<RgbaImage, LoadError> {
        let path = self.root.join(source);
        let image = image::open(&path).map_err(|source| match source {
            image::ImageError::IoError(source) => LoadError::Io { path: path.clone(), source },
            source => LoadError::Image { path: path.clone(), source },
        })?;
        Ok(image.to_rgba8())
    }
}

/// Obtains sheets according to an [`AssetMode`].
///
/// - procedural packs are always generated
/// - `Off` loads files and propagates failures
/// - `Fallback` loads files and regenerates when loading fails; if the pack
///   cannot be generated for that kind, the load failure is returned
/// - `Force` generates every pack, file-backed or not
pub struct AssetResolver<'a> {
    generator: SheetGenerator<'a>,
    loader: &'a dyn SheetLoader,
    mode: AssetMode,
    default_spec: ProceduralSpec,
}

impl<'a> AssetResolver<'a> {
    pub fn new(generator: SheetGenerator<'a>, loader: &'a dyn SheetLoader, mode: AssetMode) -> Self {
        Self { generator, loader, mode, default_spec: ProceduralSpec::default() }
    }

    /// Tile size and seed used when a file-backed pack is generated.
    pub fn with_default_spec(mut self, spec: ProceduralSpec) -> Self {
        self.default_spec = spec;
        self
    }

    pub fn mode(&self) -> AssetMode {
        self.mode
    }

    /// Load or generate one sheet. `Ok(None)` means the pack has no such sheet.
    pub fn load_sheet(&self, pack: &SpritePack, kind: SheetKind) -> Result<Option<RgbaImage>, LoadError> {
        if pack.is_procedural() {
            return Ok(self.generator.generate(pack, kind)?);
        }
        if self.mode.forces_generation() {
            debug!(pack = %pack.id, %kind, "asset mode forces generation");
            return Ok(self.generator.generate(&forced_procedural(pack, &self.default_spec), kind)?);
        }

        let Some(source) = pack.sources.get(&kind) else {
            if !pack.supports(kind) {
                return Ok(None);
            }
            let err = LoadError::MissingSource { pack_id: pack.id.clone(), kind };
            return self.fall_back(pack, kind, err).map(Some);
        };

        match self.loader.load(pack, kind, source) {
            Ok(image) => Ok(Some(image)),
            Err(err) => self.fall_back(pack, kind, err).map(Some),
        }
    }

    /// Regenerate after a failed load, or return the original error.
    fn fall_back(&self, pack: &SpritePack, kind: SheetKind, err: LoadError) -> Result<RgbaImage, LoadError> {
        if self.mode != AssetMode::Fallback {
            return Err(err);
        }
        warn!(pack = %pack.id, %kind, "sheet load failed, generating instead: {}", err);
        match self.generator.generate(&forced_procedural(pack, &self.default_spec), kind) {
            Ok(Some(image)) => Ok(image),
            Ok(None) => Err(err),
            Err(gen_err) => {
                debug!(pack = %pack.id, %kind, "fallback generation failed: {}", gen_err);
                Err(err)
            }
        }
    }
}
