//! Configuration for the isosprite generator
//!
//! Provides types and parsing for `isosprite.toml` and standalone pack
//! descriptor files.

pub mod loader;
pub mod schema;

pub use loader::{
    config_dir, find_config, find_config_from, find_pack_files, find_xdg_config, is_pack_file,
    load_config, load_config_file, load_pack_file, load_packs, ConfigError, CONFIG_FILE,
};
pub use schema::*;
