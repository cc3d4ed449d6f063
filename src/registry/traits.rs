//! Common traits for the extension registry.

use crate::cell::CellContext;

/// Common trait for tables that store named items.
///
/// # Type Parameters
///
/// * `V` - The type of value stored in the table
///
/// # Example
///
/// ```
/// use isosprite::registry::{renderer_fn, Registry, RendererTable};
/// use std::sync::Arc;
///
/// let mut table = RendererTable::new();
/// table.insert("farm", Arc::new(renderer_fn(|_| true)));
///
/// assert!(table.contains("farm"));
/// assert_eq!(table.len(), 1);
/// ```
pub trait Registry<V> {
    /// Check if an item with the given name exists.
    fn contains(&self, name: &str) -> bool;

    /// Get an item by name.
    fn get(&self, name: &str) -> Option<&V>;

    /// Get the number of items.
    fn len(&self) -> usize;

    /// Check if the table is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all items.
    fn clear(&mut self);

    /// Iterate over all names.
    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_>;
}

/// Draws a cell in place of the built-in renderer.
///
/// Return `true` when the cell was handled. Returning `false` declines, and
/// the next renderer in the chain gets the cell, cleared again.
pub trait CellRenderer: Send + Sync {
    fn render(&self, ctx: &mut CellContext<'_>) -> bool;
}

impl<F> CellRenderer for F
where
    F: Fn(&mut CellContext<'_>) -> bool + Send + Sync,
{
    fn render(&self, ctx: &mut CellContext<'_>) -> bool {
        self(ctx)
    }
}

/// Pin a closure to the [`CellRenderer`] signature so its argument type is
/// inferred without annotations.
pub fn renderer_fn<F>(f: F) -> F
where
    F: Fn(&mut CellContext<'_>) -> bool + Send + Sync,
{
    f
}
