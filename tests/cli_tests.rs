//! CLI integration tests
//!
//! Run the `isosprite` binary against pack files in a temporary directory and
//! check exit codes, stdout and written images.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const PACK_JSON: &str = r#"{
    "id": "town",
    "name": "Town",
    "cols": 2,
    "rows": 1,
    "spriteOrder": ["tree", "house_small"],
    "denseVariants": { "apartment_high": [[1, 0]] },
    "procedural": { "tileWidth": 16, "tileHeight": 16, "seed": 11 }
}"#;

/// Temp workspace holding one pack file
fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let pack = dir.path().join("town.json");
    fs::write(&pack, PACK_JSON).unwrap();
    (dir, pack)
}

/// Run the binary isolated from any user or project config
fn isosprite(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_isosprite"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .output()
        .expect("Failed to run isosprite")
}

fn dimensions(path: &Path) -> (u32, u32) {
    let img = image::open(path).expect("Failed to open output image");
    (img.width(), img.height())
}

#[test]
fn test_generate_main_sheet() {
    let (dir, pack) = workspace();
    let out = dir.path().join("out");
    let output = isosprite(dir.path(), &["generate", pack.to_str().unwrap(), "-o", out.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(dimensions(&out.join("town_main.png")), (32, 16));
}

#[test]
fn test_generate_all_with_scale() {
    let (dir, pack) = workspace();
    let out = dir.path().join("out");
    let output = isosprite(
        dir.path(),
        &["generate", pack.to_str().unwrap(), "--all", "--scale", "2", "-o", out.to_str().unwrap()],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    for kind in ["main", "construction", "abandoned", "dense"] {
        assert_eq!(dimensions(&out.join(format!("town_{}.png", kind))), (64, 32), "{}", kind);
    }
    assert!(!out.join("town_farms.png").exists());
}

#[test]
fn test_generate_is_deterministic() {
    let (dir, pack) = workspace();
    let pack = pack.to_str().unwrap();
    for name in ["a", "b"] {
        let out = dir.path().join(name);
        let output = isosprite(dir.path(), &["generate", pack, "--seed", "99", "-o", out.to_str().unwrap()]);
        assert!(output.status.success());
    }
    let a = fs::read(dir.path().join("a/town_main.png")).unwrap();
    let b = fs::read(dir.path().join("b/town_main.png")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_generate_unknown_pack_is_invalid_args() {
    let (dir, pack) = workspace();
    let output = isosprite(dir.path(), &["generate", pack.to_str().unwrap(), "--pack", "nope"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope"));
}

#[test]
fn test_missing_input_is_invalid_args() {
    let (dir, _) = workspace();
    let output = isosprite(dir.path(), &["packs", "missing.json"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_style_prints_json() {
    let (dir, _) = workspace();
    let output = isosprite(dir.path(), &["style", "dense:apartment_high"]);
    assert!(output.status.success());

    let style: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(style["base"].as_str().unwrap().starts_with('#'));
    assert!(style["height"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_style_preview() {
    let (dir, _) = workspace();
    let preview = dir.path().join("house.png");
    let output = isosprite(
        dir.path(),
        &["style", "house_small", "--preview", preview.to_str().unwrap(), "--size", "24", "--scale", "2"],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(dimensions(&preview), (48, 48));
}

#[test]
fn test_style_rejects_cell_map_variant() {
    let (dir, _) = workspace();
    let output = isosprite(dir.path(), &["style", "house_small", "--variant", "dense"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_layout_json() {
    let (dir, pack) = workspace();
    let output = isosprite(dir.path(), &["layout", pack.to_str().unwrap(), "--pack", "town", "--json"]);
    assert!(output.status.success());

    let cells: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let cells = cells.as_array().unwrap();
    assert_eq!(cells.len(), 2);
    assert_eq!(cells[1]["key"], "house_small");
    assert_eq!(cells[1]["col"], 1);
    assert!(cells[1].get("salt").is_none());
}

#[test]
fn test_layout_dense_text() {
    let (dir, pack) = workspace();
    let output = isosprite(dir.path(), &["layout", pack.to_str().unwrap(), "--pack", "town", "--kind", "dense"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(1, 0) dense:apartment_high #0"), "stdout: {}", stdout);
}

#[test]
fn test_packs_lists_kinds() {
    let (dir, pack) = workspace();
    let output = isosprite(dir.path(), &["packs", pack.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("town (Town) 2x1 [procedural]"), "stdout: {}", stdout);
    assert!(stdout.contains("kinds: main, construction, abandoned, dense"));
}

#[test]
fn test_config_pack_dir() {
    let (dir, _) = workspace();
    fs::write(dir.path().join("isosprite.toml"), "[assets]\npack_dir = \".\"\n").unwrap();
    let output = isosprite(dir.path(), &["packs"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("town"));
}
