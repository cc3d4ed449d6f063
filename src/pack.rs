//! Pack descriptors
//!
//! A [`SpritePack`] is supplied by the host application. It describes the grid
//! geometry, the ordered key list for the main sheet, optional per-kind cell
//! maps, and, for procedural packs, the tile size and seed.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Reserved prefix marking a cache key as procedurally generated.
pub const PROCEDURAL_PREFIX: &str = "procedural:";

/// Traversal order for the ordered-grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SheetLayout {
    /// index % cols, index / cols
    #[default]
    #[serde(alias = "row")]
    RowMajor,
    /// index / rows, index % rows
    #[serde(alias = "column")]
    ColumnMajor,
}

/// Every kind of sheet a pack can provide.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SheetKind {
    Main,
    Construction,
    Abandoned,
    Dense,
    Modern,
    Parks,
    ParksConstruction,
    Farms,
    Shops,
    Stations,
}

impl SheetKind {
    pub const ALL: [SheetKind; 10] = [
        SheetKind::Main,
        SheetKind::Construction,
        SheetKind::Abandoned,
        SheetKind::Dense,
        SheetKind::Modern,
        SheetKind::Parks,
        SheetKind::ParksConstruction,
        SheetKind::Farms,
        SheetKind::Shops,
        SheetKind::Stations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SheetKind::Main => "main",
            SheetKind::Construction => "construction",
            SheetKind::Abandoned => "abandoned",
            SheetKind::Dense => "dense",
            SheetKind::Modern => "modern",
            SheetKind::Parks => "parks",
            SheetKind::ParksConstruction => "parksConstruction",
            SheetKind::Farms => "farms",
            SheetKind::Shops => "shops",
            SheetKind::Stations => "stations",
        }
    }

    /// True for the three kinds laid out from `sprite_order`.
    pub fn is_main_grid(self) -> bool {
        matches!(self, SheetKind::Main | SheetKind::Construction | SheetKind::Abandoned)
    }

    /// Status variant drawn on top of the base sprites.
    pub fn variant(self) -> Variant {
        match self {
            SheetKind::Construction | SheetKind::ParksConstruction => Variant::Construction,
            SheetKind::Abandoned => Variant::Abandoned,
            _ => Variant::Main,
        }
    }

    /// Namespace prefix given to cell-mapped sprite keys.
    pub fn key_prefix(self) -> Option<&'static str> {
        match self {
            SheetKind::Dense => Some("dense"),
            SheetKind::Modern => Some("modern"),
            SheetKind::Parks | SheetKind::ParksConstruction => Some("park"),
            SheetKind::Farms => Some("farm"),
            SheetKind::Shops => Some("shop"),
            SheetKind::Stations => Some("station"),
            _ => None,
        }
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SheetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SheetKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .or(match s {
                "parks-construction" | "parks_construction" => Some(SheetKind::ParksConstruction),
                _ => None,
            })
            .ok_or_else(|| format!("unknown sheet kind '{}'", s))
    }
}

/// Status variant of a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Main,
    Construction,
    Abandoned,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Main => "main",
            Variant::Construction => "construction",
            Variant::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Building type name to one or more `[col, row]` positions.
pub type CellMap = BTreeMap<String, Vec<[u32; 2]>>;

/// Grid size override for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: u32,
    pub rows: u32,
}

/// Procedural generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProceduralSpec {
    #[serde(default = "default_tile_size")]
    pub tile_width: u32,
    #[serde(default = "default_tile_size")]
    pub tile_height: u32,
    #[serde(default)]
    pub seed: u32,
    /// Optional theme color (`#rrggbb`) blended into every building's base
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<String>,
}

pub(crate) fn default_tile_size() -> u32 {
    64
}

impl Default for ProceduralSpec {
    fn default() -> Self {
        Self { tile_width: default_tile_size(), tile_height: default_tile_size(), seed: 0, tint: None }
    }
}

/// A pack descriptor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpritePack {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub cols: u32,
    pub rows: u32,
    #[serde(default)]
    pub layout: SheetLayout,
    #[serde(default)]
    pub sprite_order: Vec<String>,
    /// Image file path or cache key per kind
    #[serde(default)]
    pub sources: BTreeMap<SheetKind, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dense_variants: Option<CellMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modern_variants: Option<CellMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parks_variants: Option<CellMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farms_variants: Option<CellMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shops_variants: Option<CellMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stations_variants: Option<CellMap>,
    /// Per-kind grid overrides; kinds not listed use `cols` x `rows`
    #[serde(default)]
    pub grids: BTreeMap<SheetKind, GridSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedural: Option<ProceduralSpec>,
}

impl SpritePack {
    /// The cell map backing a cell-mapped kind, if the pack has one.
    pub fn cell_map(&self, kind: SheetKind) -> Option<&CellMap> {
        match kind {
            SheetKind::Dense => self.dense_variants.as_ref(),
            SheetKind::Modern => self.modern_variants.as_ref(),
            SheetKind::Parks | SheetKind::ParksConstruction => self.parks_variants.as_ref(),
            SheetKind::Farms => self.farms_variants.as_ref(),
            SheetKind::Shops => self.shops_variants.as_ref(),
            SheetKind::Stations => self.stations_variants.as_ref(),
            SheetKind::Main | SheetKind::Construction | SheetKind::Abandoned => None,
        }
    }

    /// Whether the pack can provide a sheet of this kind at all.
    pub fn supports(&self, kind: SheetKind) -> bool {
        kind.is_main_grid() || self.cell_map(kind).is_some()
    }

    /// Kinds this pack can provide, in canonical order.
    pub fn supported_kinds(&self) -> Vec<SheetKind> {
        SheetKind::ALL.iter().copied().filter(|k| self.supports(*k)).collect()
    }

    /// Grid dimensions used for a kind.
    pub fn grid_for(&self, kind: SheetKind) -> GridSize {
        let lookup = match kind {
            SheetKind::ParksConstruction => {
                self.grids.get(&kind).or_else(|| self.grids.get(&SheetKind::Parks))
            }
            _ => self.grids.get(&kind),
        };
        lookup.copied().unwrap_or(GridSize { cols: self.cols, rows: self.rows })
    }

    /// A pack is procedural if it carries a descriptor or any of its
    /// sources is a procedural cache key. Both signals are equivalent.
    pub fn is_procedural(&self) -> bool {
        self.procedural.is_some() || self.sources.values().any(|s| is_procedural_key(s))
    }

    /// Procedural parameters, defaulted for packs only tagged by their keys.
    pub fn procedural_spec(&self) -> Option<ProceduralSpec> {
        match &self.procedural {
            Some(spec) => Some(spec.clone()),
            None if self.is_procedural() => Some(ProceduralSpec::default()),
            None => None,
        }
    }
}

/// True if a source string is a procedural cache key.
pub fn is_procedural_key(source: &str) -> bool {
    source.starts_with(PROCEDURAL_PREFIX)
}
