//! Sheet generation driver

use super::layout::{plan_cells, SheetPlan};
use super::{GenerateError, Warning};
use crate::canvas::{CellCanvas, CellRect};
use crate::cell::{Cell, CellContext};
use crate::color::parse_hex_color;
use crate::pack::{ProceduralSpec, SheetKind, SpritePack};
use crate::registry::ExtensionRegistry;
use crate::render::{render_sprite, Lighting, RenderOptions};
use crate::seed::cell_seed;
use crate::style::resolve_style;
use image::RgbaImage;
use rayon::prelude::*;
use tracing::{debug, trace, warn};

/// Largest sheet edge, in pixels, the generator will allocate
pub const MAX_SHEET_DIMENSION: u64 = 16_384;

/// A generated sheet together with the diagnostics collected on the way.
#[derive(Debug, Clone)]
pub struct SheetOutput {
    pub kind: SheetKind,
    pub image: RgbaImage,
    pub warnings: Vec<Warning>,
}

/// Draws sheets for procedural packs.
///
/// Holds no cache: every call redraws. Each cell is a pure function of the
/// global seed, pack id, kind, variant, key and salt, plus whatever the
/// registry's renderers do with it.
#[derive(Debug, Clone, Copy)]
pub struct SheetGenerator<'r> {
    registry: &'r ExtensionRegistry,
    seed_override: Option<u32>,
    lighting: Lighting,
}

/// Per-sheet parameters shared by all cells.
struct SheetParams<'a> {
    pack_id: &'a str,
    kind: SheetKind,
    tile_width: u32,
    tile_height: u32,
    seed: u32,
    options: RenderOptions,
}

impl<'r> SheetGenerator<'r> {
    pub fn new(registry: &'r ExtensionRegistry) -> Self {
        Self { registry, seed_override: None, lighting: Lighting::DEFAULT }
    }

    /// Replace every pack's own seed with `seed`.
    pub fn with_seed(mut self, seed: Option<u32>) -> Self {
        self.seed_override = seed;
        self
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    /// Generate one sheet, or `Ok(None)` if the pack has no layout for `kind`.
    pub fn generate(&self, pack: &SpritePack, kind: SheetKind) -> Result<Option<RgbaImage>, GenerateError> {
        Ok(self.render(pack, kind)?.map(|output| output.image))
    }

    /// Generate a main-grid sheet: main, construction or abandoned.
    pub fn generate_variant_sheet(&self, pack: &SpritePack, kind: SheetKind) -> Result<RgbaImage, GenerateError> {
        if !kind.is_main_grid() {
            return Err(GenerateError::InvalidVariant { kind });
        }
        // Main-grid kinds are always supported
        self.generate(pack, kind)?.ok_or(GenerateError::InvalidVariant { kind })
    }

    /// Generate one sheet and keep the warnings collected on the way.
    pub fn render(&self, pack: &SpritePack, kind: SheetKind) -> Result<Option<SheetOutput>, GenerateError> {
        let Some(plan) = plan_cells(pack, kind) else {
            debug!(pack = %pack.id, %kind, "kind not supported by pack");
            return Ok(None);
        };
        let spec = self.procedural_spec(pack)?;
        let mut warnings = plan.warnings.clone();
        let params = self.sheet_params(pack, kind, &spec, &mut warnings);
        let image = self.draw_plan(&plan, &params)?;

        for warning in &warnings {
            warn!(pack = %pack.id, %kind, "{}", warning.message);
        }
        Ok(Some(SheetOutput { kind, image, warnings }))
    }

    /// Every sheet the pack supports, drawn in parallel.
    pub fn generate_all(&self, pack: &SpritePack) -> Result<Vec<SheetOutput>, GenerateError> {
        let sheets: Vec<Option<SheetOutput>> = pack
            .supported_kinds()
            .par_iter()
            .map(|&kind| self.render(pack, kind))
            .collect::<Result<_, _>>()?;
        Ok(sheets.into_iter().flatten().collect())
    }

    /// Draw a single cell into a standalone tile-sized image.
    pub fn generate_cell(
        &self,
        pack: &SpritePack,
        kind: SheetKind,
        key: &str,
        salt: Option<u32>,
    ) -> Result<RgbaImage, GenerateError> {
        let spec = self.procedural_spec(pack)?;
        let params = self.sheet_params(pack, kind, &spec, &mut Vec::new());
        let mut image = allocate(params.tile_width, 1, params.tile_height, 1)?;
        self.draw_cell(&mut image, &Cell::new(0, 0, key, salt), &params);
        Ok(image)
    }

    fn procedural_spec(&self, pack: &SpritePack) -> Result<ProceduralSpec, GenerateError> {
        pack.procedural_spec().ok_or_else(|| GenerateError::NotProcedural { pack_id: pack.id.clone() })
    }

    fn sheet_params<'a>(
        &self,
        pack: &'a SpritePack,
        kind: SheetKind,
        spec: &ProceduralSpec,
        warnings: &mut Vec<Warning>,
    ) -> SheetParams<'a> {
        let tint = spec.tint.as_deref().and_then(|hex| match parse_hex_color(hex) {
            Ok(color) => Some(color),
            Err(e) => {
                warnings.push(Warning::new(format!("Ignoring tint '{}' on pack '{}': {}", hex, pack.id, e)));
                None
            }
        });
        SheetParams {
            pack_id: &pack.id,
            kind,
            tile_width: spec.tile_width,
            tile_height: spec.tile_height,
            seed: self.seed_override.unwrap_or(spec.seed),
            options: RenderOptions { lighting: self.lighting, tint },
        }
    }

    fn draw_plan(&self, plan: &SheetPlan, params: &SheetParams<'_>) -> Result<RgbaImage, GenerateError> {
        let mut image = allocate(params.tile_width, plan.grid.cols, params.tile_height, plan.grid.rows)?;
        debug!(
            pack = params.pack_id,
            kind = %plan.kind,
            width = image.width(),
            height = image.height(),
            cells = plan.cells.len(),
            "generating sheet"
        );
        for cell in &plan.cells {
            self.draw_cell(&mut image, cell, params);
        }
        Ok(image)
    }

    fn draw_cell(&self, image: &mut RgbaImage, cell: &Cell, params: &SheetParams<'_>) {
        let variant = params.kind.variant();
        let rect = CellRect::new(
            cell.col * params.tile_width,
            cell.row * params.tile_height,
            params.tile_width,
            params.tile_height,
        );
        let seed = cell_seed(
            params.seed,
            params.pack_id,
            params.kind.as_str(),
            variant.as_str(),
            &cell.key,
            cell.salt,
        );
        trace!(key = %cell.key, col = cell.col, row = cell.row, seed, "drawing cell");

        let mut canvas = CellCanvas::new(image, rect);
        canvas.clear();
        let mut ctx = CellContext {
            pack_id: params.pack_id,
            kind: params.kind,
            variant,
            key: &cell.key,
            salt: cell.salt,
            seed,
            canvas,
        };
        if self.registry.dispatch(&mut ctx) {
            return;
        }

        let style = resolve_style(&cell.key);
        let mut rng = ctx.rng();
        render_sprite(&mut ctx.canvas, &cell.key, &style, variant, &mut rng, &params.options);
    }
}

/// Allocate a transparent sheet of `cols` x `rows` tiles.
fn allocate(tile_width: u32, cols: u32, tile_height: u32, rows: u32) -> Result<RgbaImage, GenerateError> {
    let width = tile_width as u64 * cols as u64;
    let height = tile_height as u64 * rows as u64;
    if width == 0 || height == 0 || width > MAX_SHEET_DIMENSION || height > MAX_SHEET_DIMENSION {
        return Err(GenerateError::InvalidSurface { width, height });
    }
    Ok(RgbaImage::new(width as u32, height as u32))
}
