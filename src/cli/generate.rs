//! Generate command implementation

use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

use crate::assets::forced_procedural;
use crate::config::IsospriteConfig;
use crate::output::{save_png, scale_image, sheet_output_path};
use crate::pack::{ProceduralSpec, SheetKind, SpritePack};
use crate::registry::ExtensionRegistry;
use crate::sheet::{GenerateError, SheetGenerator, SheetOutput};

use super::{collect_packs, find_pack, EXIT_ERROR, EXIT_INVALID_ARGS};

/// Options for the generate command
pub struct GenerateOptions {
    pub pack: Option<String>,
    pub kind: Option<SheetKind>,
    pub all: bool,
    pub seed: Option<u32>,
    pub scale: u8,
    pub output: PathBuf,
}

/// Execute the generate command
pub fn run_generate(
    config: &IsospriteConfig,
    inputs: &[PathBuf],
    options: &GenerateOptions,
) -> Result<(), ExitCode> {
    let list = collect_packs(config, inputs)?;
    let selected: Vec<&SpritePack> = match &options.pack {
        Some(id) => vec![find_pack(&list, id)?],
        None => list.iter().collect(),
    };
    if selected.is_empty() {
        eprintln!("Error: no packs given (pass pack files or set assets.pack_dir)");
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }

    let registry = ExtensionRegistry::new();
    let generator = SheetGenerator::new(&registry).with_seed(options.seed.or(config.generator.seed));
    let default_spec = ProceduralSpec {
        tile_width: config.generator.tile_width,
        tile_height: config.generator.tile_height,
        ..ProceduralSpec::default()
    };

    let mut written = 0;
    for pack in selected {
        // The CLI is an authoring tool: file-backed packs are always generated
        let pack = forced_procedural(pack, &default_spec);
        let sheets = render_sheets(&generator, &pack, options).map_err(|e| {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        })?;

        for sheet in sheets {
            let path = sheet_output_path(&options.output, &pack.id, sheet.kind);
            if let Err(e) = save_png(&scale_image(sheet.image, options.scale), &path) {
                eprintln!("Error: failed to write {}: {}", path.display(), e);
                return Err(ExitCode::from(EXIT_ERROR));
            }
            info!(path = %path.display(), warnings = sheet.warnings.len(), "wrote sheet");
            written += 1;
        }
    }

    if written == 0 {
        warn!("nothing generated: no selected pack supports the requested kind");
    }
    Ok(())
}

fn render_sheets(
    generator: &SheetGenerator<'_>,
    pack: &SpritePack,
    options: &GenerateOptions,
) -> Result<Vec<SheetOutput>, GenerateError> {
    if options.all {
        return generator.generate_all(pack);
    }
    let kind = options.kind.unwrap_or(SheetKind::Main);
    match generator.render(pack, kind)? {
        Some(sheet) => Ok(vec![sheet]),
        None => {
            warn!(pack = %pack.id, %kind, "pack does not support this kind, skipping");
            Ok(Vec::new())
        }
    }
}
