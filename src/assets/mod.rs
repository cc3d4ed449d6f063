//! Pack integration: cache keys, procedural pack derivation, the pack list,
//! and the asset-mode aware sheet loader.

mod derive;
mod loader;

pub use derive::{derive_procedural_pack, forced_procedural};
pub use loader::{AssetResolver, FileLoader, LoadError, SheetLoader};

use crate::pack::{SheetKind, SpritePack, PROCEDURAL_PREFIX};

/// Suffix for the filtered copy of a cached sheet
pub const FILTERED_SUFFIX: &str = "#filtered";

/// Cache key for a generated sheet: `procedural:<pack_id>:<kind>`.
///
/// ```
/// use isosprite::assets::cache_key;
/// use isosprite::pack::SheetKind;
///
/// assert_eq!(cache_key("classic", SheetKind::ParksConstruction), "procedural:classic:parksConstruction");
/// ```
pub fn cache_key(pack_id: &str, kind: SheetKind) -> String {
    format!("{}{}:{}", PROCEDURAL_PREFIX, pack_id, kind)
}

/// Split a procedural cache key back into pack id and kind.
///
/// The kind is taken from after the last `:`, so pack ids may contain colons.
pub fn parse_cache_key(key: &str) -> Option<(&str, SheetKind)> {
    let rest = key.strip_prefix(PROCEDURAL_PREFIX)?;
    let rest = rest.strip_suffix(FILTERED_SUFFIX).unwrap_or(rest);
    let (pack_id, kind) = rest.rsplit_once(':')?;
    if pack_id.is_empty() {
        return None;
    }
    Some((pack_id, kind.parse().ok()?))
}

/// Key under which a host caches the filtered copy of a sheet.
///
/// The crate never filters sheets itself; hosts that post-process a
/// generated sheet store the result under this key. It still parses back to
/// the source pack and kind.
///
/// ```
/// use isosprite::assets::{cache_key, filtered_cache_key, parse_cache_key};
/// use isosprite::pack::SheetKind;
///
/// let key = filtered_cache_key(&cache_key("night", SheetKind::Main));
/// assert_eq!(key, "procedural:night:main#filtered");
/// assert_eq!(parse_cache_key(&key), Some(("night", SheetKind::Main)));
/// ```
pub fn filtered_cache_key(key: &str) -> String {
    format!("{}{}", key, FILTERED_SUFFIX)
}

/// Owned, ordered collection of packs known to the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackList {
    packs: Vec<SpritePack>,
}

impl PackList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pack, replacing one with the same id in place.
    ///
    /// Returns the replaced pack.
    pub fn register(&mut self, pack: SpritePack) -> Option<SpritePack> {
        match self.packs.iter_mut().find(|p| p.id == pack.id) {
            Some(slot) => Some(std::mem::replace(slot, pack)),
            None => {
                self.packs.push(pack);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<SpritePack> {
        let index = self.packs.iter().position(|p| p.id == id)?;
        Some(self.packs.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&SpritePack> {
        self.packs.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Packs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SpritePack> {
        self.packs.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.packs.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Look up the pack a cache key belongs to.
    pub fn resolve_cache_key(&self, key: &str) -> Option<(&SpritePack, SheetKind)> {
        let (pack_id, kind) = parse_cache_key(key)?;
        Some((self.get(pack_id)?, kind))
    }
}

impl FromIterator<SpritePack> for PackList {
    fn from_iter<I: IntoIterator<Item = SpritePack>>(iter: I) -> Self {
        let mut list = PackList::new();
        for pack in iter {
            list.register(pack);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(id: &str, cols: u32) -> SpritePack {
        SpritePack { id: id.into(), cols, rows: 1, ..Default::default() }
    }

    #[test]
    fn test_cache_key_round_trip() {
        for kind in SheetKind::ALL {
            let key = cache_key("city:v2", kind);
            assert_eq!(parse_cache_key(&key), Some(("city:v2", kind)));
            assert_eq!(parse_cache_key(&filtered_cache_key(&key)), Some(("city:v2", kind)));
        }
    }

    #[test]
    fn test_cache_keys_do_not_collide_across_packs() {
        assert_ne!(cache_key("a", SheetKind::Main), cache_key("b", SheetKind::Main));
        assert_ne!(cache_key("a", SheetKind::Main), cache_key("a", SheetKind::Dense));
    }

    #[test]
    fn test_parse_rejects_foreign_keys() {
        assert_eq!(parse_cache_key("assets/main.png"), None);
        assert_eq!(parse_cache_key("procedural:main"), None);
        assert_eq!(parse_cache_key("procedural::main"), None);
        assert_eq!(parse_cache_key("procedural:a:roads"), None);
    }

    #[test]
    fn test_pack_list_replaces_in_place() {
        let mut list: PackList = vec![pack("a", 1), pack("b", 1)].into_iter().collect();
        assert!(list.register(pack("a", 5)).is_some());
        assert_eq!(list.ids(), vec!["a", "b"]);
        assert_eq!(list.get("a").map(|p| p.cols), Some(5));
        assert!(list.remove("a").is_some());
        assert!(!list.contains("a"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_resolve_cache_key() {
        let list: PackList = vec![pack("classic", 2)].into_iter().collect();
        let (found, kind) = list.resolve_cache_key("procedural:classic:abandoned").unwrap();
        assert_eq!(found.id, "classic");
        assert_eq!(kind, SheetKind::Abandoned);
        assert!(list.resolve_cache_key("procedural:other:main").is_none());
    }
}
