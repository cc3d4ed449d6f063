//! Cell placement for the two sheet layouts

use super::Warning;
use crate::cell::Cell;
use crate::pack::{CellMap, GridSize, SheetKind, SheetLayout, SpritePack};

/// Cells of one sheet, before any pixels are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    pub kind: SheetKind,
    pub grid: GridSize,
    pub cells: Vec<Cell>,
    pub warnings: Vec<Warning>,
}

/// Place an ordered key list on a `cols` x `rows` grid.
///
/// Keys whose computed position falls outside the grid are skipped; they
/// never wrap onto another row or column.
///
/// # Examples
///
/// ```
/// use isosprite::pack::SheetLayout;
/// use isosprite::sheet::ordered_grid_cells;
///
/// let keys = vec!["a".to_string(), "b".to_string(), "c".to_string()];
/// let cells = ordered_grid_cells(&keys, 1, 2, SheetLayout::ColumnMajor);
/// assert_eq!(cells.len(), 2);
/// assert_eq!((cells[1].col, cells[1].row), (0, 1));
/// ```
pub fn ordered_grid_cells(keys: &[String], cols: u32, rows: u32, layout: SheetLayout) -> Vec<Cell> {
    keys.iter()
        .enumerate()
        .filter_map(|(i, key)| {
            let i = u32::try_from(i).ok()?;
            let (col, row) = match layout {
                SheetLayout::RowMajor if cols > 0 => (i % cols, i / cols),
                SheetLayout::ColumnMajor if rows > 0 => (i / rows, i % rows),
                _ => return None,
            };
            (col < cols && row < rows).then(|| Cell::new(col, row, key.clone(), None))
        })
        .collect()
}

/// One cell per `(type, position)` pair of a cell map.
///
/// Keys are namespaced as `<prefix>:<type>` and each position's index in its
/// list becomes the salt. Positions outside the grid are skipped.
pub fn cell_map_cells(map: &CellMap, prefix: &str, cols: u32, rows: u32) -> Vec<Cell> {
    let mut cells = Vec::new();
    for (name, positions) in map {
        let key = format!("{}:{}", prefix, name);
        for (index, &[col, row]) in positions.iter().enumerate() {
            if col < cols && row < rows {
                cells.push(Cell::new(col, row, key.clone(), Some(index as u32)));
            }
        }
    }
    cells
}

/// Lay out the cells of `kind` for `pack`, or `None` if unsupported.
pub fn plan_cells(pack: &SpritePack, kind: SheetKind) -> Option<SheetPlan> {
    let grid = pack.grid_for(kind);
    let mut warnings = Vec::new();

    let (cells, requested) = if kind.is_main_grid() {
        let cells = ordered_grid_cells(&pack.sprite_order, grid.cols, grid.rows, pack.layout);
        (cells, pack.sprite_order.len())
    } else {
        let map = pack.cell_map(kind)?;
        let prefix = kind.key_prefix()?;
        let requested = map.values().map(Vec::len).sum();
        (cell_map_cells(map, prefix, grid.cols, grid.rows), requested)
    };

    if cells.len() < requested {
        warnings.push(Warning::new(format!(
            "{} of {} '{}' cells fall outside the {}x{} grid",
            requested - cells.len(),
            requested,
            kind,
            grid.cols,
            grid.rows
        )));
    }

    Some(SheetPlan { kind, grid, cells, warnings })
}
