//! Deriving procedural packs from existing ones.

use super::cache_key;
use crate::pack::{ProceduralSpec, SpritePack};

/// Build a new procedural pack from `base`.
///
/// Key lists, grids and cell maps are copied; every source the new pack can
/// provide becomes its procedural cache key.
///
/// ```
/// use isosprite::assets::derive_procedural_pack;
/// use isosprite::pack::{ProceduralSpec, SheetKind, SpritePack};
///
/// let base = SpritePack { id: "classic".into(), cols: 2, rows: 2, ..Default::default() };
/// let pack = derive_procedural_pack(&base, "night", "Night", ProceduralSpec::default());
/// assert_eq!(pack.sources[&SheetKind::Main], "procedural:night:main");
/// assert!(pack.is_procedural());
/// ```
pub fn derive_procedural_pack(base: &SpritePack, id: &str, name: &str, spec: ProceduralSpec) -> SpritePack {
    let mut pack = base.clone();
    pack.id = id.to_string();
    pack.name = name.to_string();
    pack.sources = pack.supported_kinds().into_iter().map(|kind| (kind, cache_key(id, kind))).collect();
    pack.procedural = Some(spec);
    pack
}

/// Procedural stand-in for a file-backed pack, keeping its id so cell seeds
/// match a pack that was procedural all along.
pub fn forced_procedural(pack: &SpritePack, spec: &ProceduralSpec) -> SpritePack {
    let spec = pack.procedural.clone().unwrap_or_else(|| spec.clone());
    derive_procedural_pack(pack, &pack.id, &pack.name, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::SheetKind;
    use std::collections::BTreeMap;

    fn base() -> SpritePack {
        SpritePack {
            id: "classic".into(),
            name: "Classic".into(),
            cols: 3,
            rows: 1,
            sprite_order: vec!["tree".into(), "house_small".into(), "water".into()],
            sources: BTreeMap::from([(SheetKind::Main, "classic/main.png".to_string())]),
            dense_variants: Some(BTreeMap::from([("apartment_high".to_string(), vec![[0, 0]])])),
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_copies_layout_and_replaces_sources() {
        let spec = ProceduralSpec { tile_width: 48, tile_height: 40, seed: 12, tint: None };
        let pack = derive_procedural_pack(&base(), "neo", "Neo", spec.clone());

        assert_eq!(pack.id, "neo");
        assert_eq!(pack.sprite_order, base().sprite_order);
        assert_eq!(pack.dense_variants, base().dense_variants);
        assert_eq!(pack.procedural, Some(spec));
        assert_eq!(pack.sources.get(&SheetKind::Dense).map(String::as_str), Some("procedural:neo:dense"));
        assert!(!pack.sources.contains_key(&SheetKind::Farms));
        assert!(pack.sources.values().all(|s| s.starts_with("procedural:neo:")));
    }

    #[test]
    fn test_forced_keeps_identity() {
        let forced = forced_procedural(&base(), &ProceduralSpec::default());
        assert_eq!(forced.id, "classic");
        assert_eq!(forced.procedural, Some(ProceduralSpec::default()));
    }
}
