//! Isosprite - deterministic procedural isometric sprite sheets
//!
//! This library provides functionality to:
//! - Derive stable per-cell seeds and a small deterministic RNG ([`seed`])
//! - Resolve sprite keys such as `dense:apartment_high` into drawing styles ([`style`])
//! - Draw isometric prisms, trees, parks and status overlays ([`render`])
//! - Lay out and generate whole sheets for a pack ([`sheet`])
//! - Let hosts override drawing per key or namespace ([`registry`])
//! - Decide between shipped sheet files and generation ([`asset_mode`], [`assets`])
//!
//! ```
//! use isosprite::pack::{ProceduralSpec, SheetKind, SpritePack};
//! use isosprite::registry::ExtensionRegistry;
//! use isosprite::sheet::SheetGenerator;
//!
//! let pack = SpritePack {
//!     id: "demo".into(),
//!     cols: 2,
//!     rows: 1,
//!     sprite_order: vec!["tree".into(), "house_small".into()],
//!     procedural: Some(ProceduralSpec { tile_width: 32, tile_height: 32, ..Default::default() }),
//!     ..Default::default()
//! };
//! let registry = ExtensionRegistry::new();
//! let sheet = SheetGenerator::new(&registry).generate(&pack, SheetKind::Main).unwrap().unwrap();
//! assert_eq!(sheet.dimensions(), (64, 32));
//! ```

pub mod asset_mode;
pub mod assets;
pub mod canvas;
pub mod cell;
pub mod cli;
pub mod color;
pub mod config;
pub mod output;
pub mod pack;
pub mod registry;
pub mod render;
pub mod seed;
pub mod shapes;
pub mod sheet;
pub mod style;

pub use asset_mode::AssetMode;
pub use pack::{SheetKind, SpritePack};
pub use registry::ExtensionRegistry;
pub use sheet::{GenerateError, SheetGenerator};
