//! Extension registry for custom cell renderers.
//!
//! Application code can take over drawing for individual cells without
//! touching the generator. Renderers are registered along two axes:
//! - match type: the namespace prefix of a key (`farm` for `farm:silo`) or
//!   the exact full key (`house_small`, `dense:apartment_high`)
//! - scope: global, or bound to a single pack id
//!
//! [`ExtensionRegistry::dispatch`] offers a cell to matching renderers in
//! priority order: pack exact, global exact, pack prefix, global prefix. The
//! first one returning `true` wins; if none does, the built-in renderer runs.

mod table;
mod traits;

pub use table::{RendererTable, SharedRenderer};
pub use traits::{renderer_fn, CellRenderer, Registry};

use crate::cell::CellContext;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Where a registration applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Pack(String),
}

impl Scope {
    pub fn pack(id: impl Into<String>) -> Self {
        Scope::Pack(id.into())
    }
}

/// Which table produced a match, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    PackExact,
    GlobalExact,
    PackPrefix,
    GlobalPrefix,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::PackExact => "pack-exact",
            Tier::GlobalExact => "global-exact",
            Tier::PackPrefix => "pack-prefix",
            Tier::GlobalPrefix => "global-prefix",
        };
        f.write_str(name)
    }
}

/// Snapshot of registered keys, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegisteredKeys {
    pub global_prefix: Vec<String>,
    pub global_exact: Vec<String>,
    pub pack_prefix: BTreeMap<String, Vec<String>>,
    pub pack_exact: BTreeMap<String, Vec<String>>,
}

impl RegisteredKeys {
    pub fn is_empty(&self) -> bool {
        self.global_prefix.is_empty()
            && self.global_exact.is_empty()
            && self.pack_prefix.is_empty()
            && self.pack_exact.is_empty()
    }
}

#[derive(Default)]
struct Tables {
    global_prefix: RendererTable,
    global_exact: RendererTable,
    pack_prefix: HashMap<String, RendererTable>,
    pack_exact: HashMap<String, RendererTable>,
}

impl Tables {
    fn table_mut(&mut self, scope: &Scope, exact: bool) -> &mut RendererTable {
        match (scope, exact) {
            (Scope::Global, false) => &mut self.global_prefix,
            (Scope::Global, true) => &mut self.global_exact,
            (Scope::Pack(id), false) => self.pack_prefix.entry(id.clone()).or_default(),
            (Scope::Pack(id), true) => self.pack_exact.entry(id.clone()).or_default(),
        }
    }

    fn remove(&mut self, scope: &Scope, exact: bool, key: &str) -> bool {
        let removed = match (scope, exact) {
            (Scope::Global, false) => self.global_prefix.remove(key),
            (Scope::Global, true) => self.global_exact.remove(key),
            (Scope::Pack(id), false) => self.pack_prefix.get_mut(id).and_then(|t| t.remove(key)),
            (Scope::Pack(id), true) => self.pack_exact.get_mut(id).and_then(|t| t.remove(key)),
        };
        // Drop empty per-pack tables so listings stay tidy
        self.pack_prefix.retain(|_, t| !t.is_empty());
        self.pack_exact.retain(|_, t| !t.is_empty());
        removed.is_some()
    }

    /// Matching renderers for a cell, highest priority first.
    fn candidates(&self, pack_id: &str, key: &str, prefix: Option<&str>) -> Vec<(Tier, SharedRenderer)> {
        let mut found = Vec::new();
        if let Some(r) = self.pack_exact.get(pack_id).and_then(|t| t.get(key)) {
            found.push((Tier::PackExact, Arc::clone(r)));
        }
        if let Some(r) = self.global_exact.get(key) {
            found.push((Tier::GlobalExact, Arc::clone(r)));
        }
        if let Some(prefix) = prefix {
            if let Some(r) = self.pack_prefix.get(pack_id).and_then(|t| t.get(prefix)) {
                found.push((Tier::PackPrefix, Arc::clone(r)));
            }
            if let Some(r) = self.global_prefix.get(prefix) {
                found.push((Tier::GlobalPrefix, Arc::clone(r)));
            }
        }
        found
    }
}

fn pack_listing(tables: &HashMap<String, RendererTable>) -> BTreeMap<String, Vec<String>> {
    tables.iter().map(|(id, t)| (id.clone(), t.sorted_names())).collect()
}

/// Owned registry of extension renderers.
///
/// Safe to share between threads; registration may happen at any time and
/// renderers run without the lock held, so a renderer may itself register.
#[derive(Default)]
pub struct ExtensionRegistry {
    tables: RwLock<Tables>,
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry").field("keys", &self.list()).finish()
    }
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a renderer for every key namespaced with `prefix`.
    ///
    /// Replaces any renderer already registered for the same scope and prefix.
    pub fn register_prefix<R>(&self, scope: Scope, prefix: &str, renderer: R)
    where
        R: CellRenderer + 'static,
    {
        debug!(prefix, ?scope, "registering prefix renderer");
        self.write().table_mut(&scope, false).insert(prefix, Arc::new(renderer));
    }

    /// Register a renderer for one full key.
    pub fn register_exact<R>(&self, scope: Scope, key: &str, renderer: R)
    where
        R: CellRenderer + 'static,
    {
        debug!(key, ?scope, "registering exact-key renderer");
        self.write().table_mut(&scope, true).insert(key, Arc::new(renderer));
    }

    /// Returns `true` if a renderer was removed.
    pub fn unregister_prefix(&self, scope: &Scope, prefix: &str) -> bool {
        self.write().remove(scope, false, prefix)
    }

    /// Returns `true` if a renderer was removed.
    pub fn unregister_exact(&self, scope: &Scope, key: &str) -> bool {
        self.write().remove(scope, true, key)
    }

    /// Remove every registration.
    pub fn clear(&self) {
        *self.write() = Tables::default();
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    /// All registered keys, sorted.
    pub fn list(&self) -> RegisteredKeys {
        let tables = self.read();
        RegisteredKeys {
            global_prefix: tables.global_prefix.sorted_names(),
            global_exact: tables.global_exact.sorted_names(),
            pack_prefix: pack_listing(&tables.pack_prefix),
            pack_exact: pack_listing(&tables.pack_exact),
        }
    }

    /// Offer a cell to matching renderers in priority order.
    ///
    /// Returns `true` if one of them handled it. After a renderer declines,
    /// the cell is cleared again before the next one runs, so the built-in
    /// path (or the next renderer) always starts from a blank cell.
    pub fn dispatch(&self, ctx: &mut CellContext<'_>) -> bool {
        let prefix = ctx.sprite_key().prefix;
        let candidates = self.read().candidates(ctx.pack_id, ctx.key, prefix);

        for (tier, renderer) in candidates {
            if renderer.render(ctx) {
                debug!(key = ctx.key, pack = ctx.pack_id, %tier, "extension renderer handled cell");
                return true;
            }
            ctx.canvas.clear();
        }
        false
    }
}
