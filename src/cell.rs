//! Cells: the atomic unit of sheet generation

use crate::canvas::CellCanvas;
use crate::pack::{SheetKind, Variant};
use crate::seed::Rng;
use crate::style::SpriteKey;

/// One grid slot to fill: position, sprite key, and optional salt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub col: u32,
    pub row: u32,
    /// Bare (`house_small`) or namespaced (`dense:apartment_high`) key
    pub key: String,
    /// Distinguishes several physical cells sharing one logical key
    pub salt: Option<u32>,
}

impl Cell {
    pub fn new(col: u32, row: u32, key: impl Into<String>, salt: Option<u32>) -> Self {
        Self { col, row, key: key.into(), salt }
    }
}

/// Everything a renderer needs to draw one cell.
///
/// The canvas has already been cleared when a renderer receives it.
pub struct CellContext<'a> {
    pub pack_id: &'a str,
    pub kind: SheetKind,
    pub variant: Variant,
    pub key: &'a str,
    pub salt: Option<u32>,
    /// Per-cell seed derived from the pack seed and the fields above
    pub seed: u32,
    pub canvas: CellCanvas<'a>,
}

impl<'a> CellContext<'a> {
    /// The key split into prefix and name.
    pub fn sprite_key(&self) -> SpriteKey<'a> {
        SpriteKey::parse(self.key)
    }

    /// A fresh generator for this cell. Every call starts the same stream.
    pub fn rng(&self) -> Rng {
        Rng::new(self.seed)
    }
}
