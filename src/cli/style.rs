//! Style command implementation

use std::path::Path;
use std::process::ExitCode;
use tracing::info;

use crate::output::{save_png, scale_image};
use crate::pack::{ProceduralSpec, SheetKind, SpritePack};
use crate::registry::ExtensionRegistry;
use crate::sheet::SheetGenerator;
use crate::style::resolve_style;

use super::EXIT_ERROR;

/// Execute the style command: print the resolved style as JSON, optionally
/// rendering a preview tile.
pub fn run_style(
    key: &str,
    preview: Option<&Path>,
    variant: SheetKind,
    size: u32,
    seed: u32,
    scale: u8,
) -> Result<(), ExitCode> {
    let style = resolve_style(key);
    match serde_json::to_string_pretty(&style) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    }

    let Some(path) = preview else {
        return Ok(());
    };

    let pack = SpritePack {
        id: "preview".to_string(),
        cols: 1,
        rows: 1,
        procedural: Some(ProceduralSpec { tile_width: size, tile_height: size, seed, tint: None }),
        ..Default::default()
    };
    let registry = ExtensionRegistry::new();
    let image = SheetGenerator::new(&registry).generate_cell(&pack, variant, key, None).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })?;

    if let Err(e) = save_png(&scale_image(image, scale), path) {
        eprintln!("Error: failed to write {}: {}", path.display(), e);
        return Err(ExitCode::from(EXIT_ERROR));
    }
    info!(path = %path.display(), "wrote preview");
    Ok(())
}
