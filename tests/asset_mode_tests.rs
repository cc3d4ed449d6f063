//! Integration tests for asset modes, cache keys and pack derivation

use image::RgbaImage;
use isosprite::asset_mode::{resolve_asset_mode, AssetMode, FilePreferences, MemoryPreferences, PreferenceStore};
use isosprite::assets::{
    cache_key, derive_procedural_pack, filtered_cache_key, AssetResolver, FileLoader, LoadError, PackList,
};
use isosprite::pack::{ProceduralSpec, SheetKind, SpritePack};
use isosprite::registry::ExtensionRegistry;
use isosprite::sheet::SheetGenerator;
use std::collections::BTreeMap;
use tempfile::TempDir;

fn classic() -> SpritePack {
    SpritePack {
        id: "classic".to_string(),
        name: "Classic".to_string(),
        cols: 2,
        rows: 1,
        sprite_order: vec!["house_small".to_string(), "shop_corner".to_string()],
        sources: BTreeMap::from([
            (SheetKind::Main, "classic.png".to_string()),
            (SheetKind::Construction, "classic_construction.png".to_string()),
        ]),
        ..Default::default()
    }
}

fn small_spec() -> ProceduralSpec {
    ProceduralSpec { tile_width: 8, tile_height: 8, seed: 3, tint: None }
}

#[test]
fn test_fallback_prefers_existing_files() {
    let dir = TempDir::new().unwrap();
    RgbaImage::new(5, 5).save(dir.path().join("classic.png")).unwrap();

    let registry = ExtensionRegistry::new();
    let loader = FileLoader::new(dir.path());
    let resolver = AssetResolver::new(SheetGenerator::new(&registry), &loader, AssetMode::Fallback)
        .with_default_spec(small_spec());

    let main = resolver.load_sheet(&classic(), SheetKind::Main).unwrap().unwrap();
    assert_eq!(main.dimensions(), (5, 5));

    // classic_construction.png is missing, so it is generated
    let construction = resolver.load_sheet(&classic(), SheetKind::Construction).unwrap().unwrap();
    assert_eq!(construction.dimensions(), (16, 8));

    // Abandoned has no source at all but is a main-grid kind
    let abandoned = resolver.load_sheet(&classic(), SheetKind::Abandoned).unwrap().unwrap();
    assert_eq!(abandoned.dimensions(), (16, 8));

    assert_eq!(resolver.load_sheet(&classic(), SheetKind::Dense).unwrap(), None);
}

#[test]
fn test_off_reports_missing_files() {
    let dir = TempDir::new().unwrap();
    let registry = ExtensionRegistry::new();
    let loader = FileLoader::new(dir.path());
    let resolver = AssetResolver::new(SheetGenerator::new(&registry), &loader, AssetMode::Off);

    let err = resolver.load_sheet(&classic(), SheetKind::Main).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("classic.png"));
}

#[test]
fn test_force_matches_derived_pack() {
    let dir = TempDir::new().unwrap();
    RgbaImage::new(5, 5).save(dir.path().join("classic.png")).unwrap();

    let registry = ExtensionRegistry::new();
    let loader = FileLoader::new(dir.path());
    let generator = SheetGenerator::new(&registry);
    let resolver = AssetResolver::new(generator, &loader, AssetMode::Force).with_default_spec(small_spec());

    let forced = resolver.load_sheet(&classic(), SheetKind::Main).unwrap().unwrap();
    let derived = derive_procedural_pack(&classic(), "classic", "Classic", small_spec());
    assert_eq!(Some(forced), generator.generate(&derived, SheetKind::Main).unwrap());
}

#[test]
fn test_procedural_pack_ignores_mode() {
    let dir = TempDir::new().unwrap();
    let registry = ExtensionRegistry::new();
    let loader = FileLoader::new(dir.path());
    let pack = derive_procedural_pack(&classic(), "night", "Night", small_spec());

    for mode in [AssetMode::Off, AssetMode::Fallback, AssetMode::Force] {
        let resolver = AssetResolver::new(SheetGenerator::new(&registry), &loader, mode);
        let sheet = resolver.load_sheet(&pack, SheetKind::Main).unwrap().unwrap();
        assert_eq!(sheet.dimensions(), (16, 8), "{}", mode);
    }
}

#[test]
fn test_cache_keys_resolve_through_pack_list() {
    let mut packs = PackList::new();
    packs.register(classic());
    packs.register(derive_procedural_pack(&classic(), "night", "Night", small_spec()));

    let key = cache_key("night", SheetKind::Construction);
    let (pack, kind) = packs.resolve_cache_key(&key).unwrap();
    assert_eq!(pack.id, "night");
    assert_eq!(kind, SheetKind::Construction);
    assert_eq!(pack.sources[&kind], key);

    let filtered = filtered_cache_key(&key);
    assert_ne!(filtered, key);
    let (pack, kind) = packs.resolve_cache_key(&filtered).unwrap();
    assert_eq!(pack.id, "night");
    assert_eq!(kind, SheetKind::Construction);

    assert!(packs.resolve_cache_key("procedural:day:main").is_none());
    assert!(packs.resolve_cache_key("classic.png").is_none());
}

#[test]
fn test_mode_precedence_with_file_preferences() {
    let dir = TempDir::new().unwrap();
    let prefs = FilePreferences::new(dir.path().join("prefs").join("preferences.toml"));
    assert_eq!(prefs.asset_mode(), None);

    prefs.set_asset_mode(Some(AssetMode::Force)).unwrap();
    let reloaded = FilePreferences::new(prefs.path());
    assert_eq!(resolve_asset_mode(None, &reloaded), AssetMode::Force);
    assert_eq!(resolve_asset_mode(Some(AssetMode::Off), &reloaded), AssetMode::Off);

    let memory = MemoryPreferences::with_mode(AssetMode::Fallback);
    assert_eq!(resolve_asset_mode(None, &memory), AssetMode::Fallback);
}
