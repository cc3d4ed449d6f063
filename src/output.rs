//! PNG output and file naming for generated sheets

use crate::pack::SheetKind;
use image::imageops::FilterType;
use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// Keeps pixel edges crisp for previews. A factor of 0 or 1 returns the image
/// unchanged.
pub fn scale_image(image: RgbaImage, factor: u8) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    let new_w = w * factor as u32;
    let new_h = h * factor as u32;
    image::imageops::resize(&image, new_w, new_h, FilterType::Nearest)
}

/// Make a pack id or sprite key safe to use in a file name.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Output path for a sheet: `dir/{pack}_{kind}.png`.
///
/// ```
/// use isosprite::output::sheet_output_path;
/// use isosprite::pack::SheetKind;
/// use std::path::{Path, PathBuf};
///
/// let path = sheet_output_path(Path::new("out"), "city:v2", SheetKind::Dense);
/// assert_eq!(path, PathBuf::from("out/city_v2_dense.png"));
/// ```
pub fn sheet_output_path(dir: &Path, pack_id: &str, kind: SheetKind) -> PathBuf {
    dir.join(format!("{}_{}.png", file_stem(pack_id), kind))
}

/// Default preview path for a single sprite key: `{key}.png`.
pub fn cell_output_path(key: &str) -> PathBuf {
    PathBuf::from(format!("{}.png", file_stem(key)))
}
