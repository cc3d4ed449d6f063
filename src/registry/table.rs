//! Named renderer table.

use std::collections::HashMap;
use std::sync::Arc;

use super::traits::{CellRenderer, Registry};

/// Shared handle to a registered renderer.
pub type SharedRenderer = Arc<dyn CellRenderer>;

/// One key → renderer mapping. Re-inserting a key replaces its renderer.
#[derive(Default, Clone)]
pub struct RendererTable {
    renderers: HashMap<String, SharedRenderer>,
}

impl RendererTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a renderer, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, renderer: SharedRenderer) -> Option<SharedRenderer> {
        self.renderers.insert(name.into(), renderer)
    }

    pub fn remove(&mut self, name: &str) -> Option<SharedRenderer> {
        self.renderers.remove(name)
    }

    /// Registered names in sorted order.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.renderers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for RendererTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.sorted_names()).finish()
    }
}

impl Registry<SharedRenderer> for RendererTable {
    fn contains(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&SharedRenderer> {
        self.renderers.get(name)
    }

    fn len(&self) -> usize {
        self.renderers.len()
    }

    fn clear(&mut self) {
        self.renderers.clear();
    }

    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        Box::new(self.renderers.keys())
    }
}
