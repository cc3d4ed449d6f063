//! Packs command implementation

use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::IsospriteConfig;

use super::collect_packs;

/// Execute the packs command: one line per pack with its supported kinds
pub fn run_packs(config: &IsospriteConfig, inputs: &[PathBuf]) -> Result<(), ExitCode> {
    let list = collect_packs(config, inputs)?;
    if list.is_empty() {
        println!("No packs found");
        return Ok(());
    }

    for pack in list.iter() {
        let kinds: Vec<String> = pack.supported_kinds().iter().map(|k| k.to_string()).collect();
        let source = if pack.is_procedural() { "procedural" } else { "files" };
        let name = if pack.name.is_empty() { pack.id.as_str() } else { pack.name.as_str() };
        println!("{} ({}) {}x{} [{}]", pack.id, name, pack.cols, pack.rows, source);
        println!("  kinds: {}", kinds.join(", "));
    }
    Ok(())
}
