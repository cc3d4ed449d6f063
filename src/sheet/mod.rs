//! Sheet compositor
//!
//! Lays out a pack's cells for one sheet kind and drives per-cell drawing:
//!
//! - `main`, `construction` and `abandoned` place `sprite_order` on the pack
//!   grid, row-major or column-major ([`ordered_grid_cells`])
//! - cell-mapped kinds emit one namespaced cell per mapped position
//!   ([`cell_map_cells`])
//!
//! Every cell is cleared, seeded, offered to the [`ExtensionRegistry`](crate::registry::ExtensionRegistry),
//! and otherwise drawn by the built-in style resolver and renderer.

mod error;
mod generator;
mod layout;

pub use crate::cell::Cell;
pub use error::{GenerateError, Warning};
pub use generator::{SheetGenerator, SheetOutput, MAX_SHEET_DIMENSION};
pub use layout::{cell_map_cells, ordered_grid_cells, plan_cells, SheetPlan};
