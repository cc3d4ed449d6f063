//! Integration tests for sheet generation through the public API

use image::{Rgba, RgbaImage};
use isosprite::pack::{GridSize, ProceduralSpec, SheetKind, SheetLayout, SpritePack};
use isosprite::registry::{renderer_fn, ExtensionRegistry, Scope};
use isosprite::sheet::{plan_cells, GenerateError, SheetGenerator};
use isosprite::style::{resolve_style, SpriteStyle};
use std::collections::BTreeMap;

const TILE: u32 = 32;

fn spec(seed: u32) -> Option<ProceduralSpec> {
    Some(ProceduralSpec { tile_width: TILE, tile_height: TILE, seed, tint: None })
}

/// 2x2 row-major pack with one sprite of each drawing family
fn town_pack(seed: u32) -> SpritePack {
    SpritePack {
        id: "town".to_string(),
        name: "Town".to_string(),
        cols: 2,
        rows: 2,
        sprite_order: ["tree", "house_small", "park_small", "water"].map(String::from).to_vec(),
        procedural: spec(seed),
        ..Default::default()
    }
}

fn cell(image: &RgbaImage, col: u32, row: u32) -> RgbaImage {
    image::imageops::crop_imm(image, col * TILE, row * TILE, TILE, TILE).to_image()
}

fn generate(pack: &SpritePack, kind: SheetKind) -> RgbaImage {
    let registry = ExtensionRegistry::new();
    SheetGenerator::new(&registry)
        .generate(pack, kind)
        .expect("generation failed")
        .expect("kind not supported")
}

// ============================================================================
// Sheet geometry
// ============================================================================

#[test]
fn test_town_sheet_dimensions_and_tree_placement() {
    let sheet = generate(&town_pack(7), SheetKind::Main);
    assert_eq!(sheet.dimensions(), (64, 64));

    let tree = cell(&sheet, 0, 0);
    assert_eq!(tree.get_pixel(0, 0)[3], 0, "tree cell top-left corner should be empty");
    let top_rows = (TILE as f32 * 0.4) as u32;
    for y in 0..top_rows {
        for x in 0..TILE {
            assert_eq!(tree.get_pixel(x, y)[3], 0, "tree pixel above canopy at ({}, {})", x, y);
        }
    }
    assert!(tree.pixels().any(|p| p[3] > 0), "tree cell is empty");
}

#[test]
fn test_every_town_cell_draws_something() {
    let sheet = generate(&town_pack(7), SheetKind::Main);
    for (col, row) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        assert!(cell(&sheet, col, row).pixels().any(|p| p[3] > 0), "cell ({}, {}) is empty", col, row);
    }
}

#[test]
fn test_kind_grid_override_sizes_sheet() {
    let mut pack = town_pack(0);
    pack.dense_variants = Some(BTreeMap::from([("apartment_high".to_string(), vec![[2, 0]])]));
    pack.grids.insert(SheetKind::Dense, GridSize { cols: 3, rows: 1 });

    let sheet = generate(&pack, SheetKind::Dense);
    assert_eq!(sheet.dimensions(), (96, 32));
    assert!(cell(&sheet, 0, 0).pixels().all(|p| p[3] == 0));
    assert!(cell(&sheet, 2, 0).pixels().any(|p| p[3] > 0));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_is_byte_identical() {
    for kind in [SheetKind::Main, SheetKind::Construction, SheetKind::Abandoned] {
        let a = generate(&town_pack(42), kind);
        let b = generate(&town_pack(42), kind);
        assert_eq!(a.as_raw(), b.as_raw(), "{} differs between runs", kind);
    }
}

#[test]
fn test_seed_changes_house() {
    let a = generate(&town_pack(42), SheetKind::Main);
    let b = generate(&town_pack(43), SheetKind::Main);
    assert_ne!(cell(&a, 1, 0), cell(&b, 1, 0), "house_small ignored the seed");
}

#[test]
fn test_generator_seed_overrides_pack_seed() {
    let registry = ExtensionRegistry::new();
    let overridden = SheetGenerator::new(&registry).with_seed(Some(5));
    let a = overridden.generate(&town_pack(1), SheetKind::Main).unwrap().unwrap();
    let b = overridden.generate(&town_pack(2), SheetKind::Main).unwrap().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_variants_differ_from_main() {
    let main = generate(&town_pack(3), SheetKind::Main);
    let construction = generate(&town_pack(3), SheetKind::Construction);
    let abandoned = generate(&town_pack(3), SheetKind::Abandoned);
    assert_ne!(cell(&main, 1, 0), cell(&construction, 1, 0));
    assert_ne!(cell(&main, 1, 0), cell(&abandoned, 1, 0));
}

// ============================================================================
// Layout
// ============================================================================

/// Registry whose exact-key renderers paint keys `k0..k3` in distinct colors
fn marker_registry() -> ExtensionRegistry {
    let registry = ExtensionRegistry::new();
    for i in 0..4u8 {
        let color = Rgba([i * 60, 255 - i * 60, 7, 255]);
        registry.register_exact(
            Scope::Global,
            &format!("k{}", i),
            renderer_fn(move |ctx| {
                ctx.canvas.fill(color);
                true
            }),
        );
    }
    registry
}

fn marker_pack(cols: u32, rows: u32, layout: SheetLayout, keys: usize) -> SpritePack {
    SpritePack {
        id: "markers".to_string(),
        cols,
        rows,
        layout,
        sprite_order: (0..keys).map(|i| format!("k{}", i)).collect(),
        procedural: spec(0),
        ..Default::default()
    }
}

#[test]
fn test_row_major_places_keys_in_columns() {
    let registry = marker_registry();
    let sheet = SheetGenerator::new(&registry)
        .generate(&marker_pack(4, 1, SheetLayout::RowMajor, 4), SheetKind::Main)
        .unwrap()
        .unwrap();
    assert_eq!(sheet.dimensions(), (128, 32));
    for i in 0..4u32 {
        let expected = Rgba([i as u8 * 60, 255 - i as u8 * 60, 7, 255]);
        assert_eq!(*sheet.get_pixel(i * TILE + 5, 5), expected, "k{} misplaced", i);
    }
}

#[test]
fn test_column_major_places_keys_in_rows() {
    let registry = marker_registry();
    let sheet = SheetGenerator::new(&registry)
        .generate(&marker_pack(1, 4, SheetLayout::ColumnMajor, 4), SheetKind::Main)
        .unwrap()
        .unwrap();
    assert_eq!(sheet.dimensions(), (32, 128));
    for i in 0..4u32 {
        let expected = Rgba([i as u8 * 60, 255 - i as u8 * 60, 7, 255]);
        assert_eq!(*sheet.get_pixel(5, i * TILE + 5), expected, "k{} misplaced", i);
    }
}

#[test]
fn test_overflowing_key_list_is_skipped() {
    let pack = marker_pack(2, 1, SheetLayout::RowMajor, 4);
    let plan = plan_cells(&pack, SheetKind::Main).unwrap();
    let keys: Vec<&str> = plan.cells.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["k0", "k1"]);
    assert_eq!(plan.warnings.len(), 1);

    let registry = marker_registry();
    let sheet = SheetGenerator::new(&registry).generate(&pack, SheetKind::Main).unwrap().unwrap();
    assert_eq!(sheet.dimensions(), (64, 32));
}

// ============================================================================
// Unsupported kinds and errors
// ============================================================================

#[test]
fn test_dense_without_map_is_not_supported() {
    let registry = ExtensionRegistry::new();
    let generator = SheetGenerator::new(&registry);
    assert_eq!(generator.generate(&town_pack(0), SheetKind::Dense), Ok(None));
    assert_eq!(generator.generate(&town_pack(0), SheetKind::ParksConstruction), Ok(None));
}

#[test]
fn test_file_backed_pack_is_not_procedural() {
    let mut pack = town_pack(0);
    pack.procedural = None;
    let registry = ExtensionRegistry::new();
    let err = SheetGenerator::new(&registry).generate(&pack, SheetKind::Main).unwrap_err();
    assert_eq!(err, GenerateError::NotProcedural { pack_id: "town".to_string() });
}

#[test]
fn test_procedural_source_key_is_enough() {
    let mut pack = town_pack(0);
    pack.procedural = None;
    pack.sources.insert(SheetKind::Main, "procedural:town:main".to_string());
    let sheet = generate(&pack, SheetKind::Main);
    // Tagged packs fall back to the default 64px tile
    assert_eq!(sheet.dimensions(), (128, 128));
}

#[test]
fn test_variant_entrypoint() {
    let registry = ExtensionRegistry::new();
    let generator = SheetGenerator::new(&registry);
    let sheet = generator.generate_variant_sheet(&town_pack(0), SheetKind::Abandoned).unwrap();
    assert_eq!(sheet.dimensions(), (64, 64));
    assert_eq!(
        generator.generate_variant_sheet(&town_pack(0), SheetKind::Farms),
        Err(GenerateError::InvalidVariant { kind: SheetKind::Farms })
    );
}

// ============================================================================
// Style resolution
// ============================================================================

#[test]
fn test_style_resolution_is_stable() {
    for key in ["house_small", "dense:apartment_high", "park:basketball_courts", "mystery"] {
        assert_eq!(resolve_style(key), resolve_style(key), "{}", key);
    }
}

#[test]
fn test_prefixed_style_differs_only_by_adjustment() {
    let bare = resolve_style("apartment_high");
    let dense = resolve_style("dense:apartment_high");
    assert_eq!(dense.height, bare.height * 1.25);
    let unadjusted = SpriteStyle {
        height: bare.height,
        footprint_w: bare.footprint_w,
        footprint_d: bare.footprint_d,
        ..dense
    };
    assert_eq!(unadjusted, bare);
}
