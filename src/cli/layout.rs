//! Layout command implementation

use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::IsospriteConfig;
use crate::pack::SheetKind;
use crate::sheet::plan_cells;

use super::{collect_packs, find_pack, EXIT_ERROR};

#[derive(Serialize)]
struct CellRow<'a> {
    col: u32,
    row: u32,
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    salt: Option<u32>,
}

/// Execute the layout command
pub fn run_layout(
    config: &IsospriteConfig,
    inputs: &[PathBuf],
    pack_id: &str,
    kind: SheetKind,
    json: bool,
) -> Result<(), ExitCode> {
    let list = collect_packs(config, inputs)?;
    let pack = find_pack(&list, pack_id)?;

    let Some(plan) = plan_cells(pack, kind) else {
        println!("Pack '{}' does not support '{}'", pack.id, kind);
        return Ok(());
    };

    if json {
        let rows: Vec<CellRow<'_>> = plan
            .cells
            .iter()
            .map(|c| CellRow { col: c.col, row: c.row, key: &c.key, salt: c.salt })
            .collect();
        match serde_json::to_string_pretty(&rows) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                return Err(ExitCode::from(EXIT_ERROR));
            }
        }
    } else {
        println!("{} {} ({}x{} cells)", pack.id, kind, plan.grid.cols, plan.grid.rows);
        for cell in &plan.cells {
            match cell.salt {
                Some(salt) => println!("  ({}, {}) {} #{}", cell.col, cell.row, cell.key, salt),
                None => println!("  ({}, {}) {}", cell.col, cell.row, cell.key),
            }
        }
    }

    for warning in &plan.warnings {
        eprintln!("Warning: {}", warning.message);
    }
    Ok(())
}
