//! Sprite key to visual style resolution
//!
//! A sprite key like `apartment_high` or `dense:apartment_high` resolves to a
//! declarative [`SpriteStyle`]. The bare key is classified by an ordered rule
//! table (first match wins); a recognised namespace prefix then applies a
//! fixed adjustment on top. Resolution is a pure function of the key.

use crate::color::rgb;
use image::Rgba;
use serde::Serialize;
use std::fmt;

/// Broad drawing strategy for a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeClass {
    Building,
    Tree,
    Park,
    Utility,
    Special,
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeClass::Building => "building",
            ShapeClass::Tree => "tree",
            ShapeClass::Park => "park",
            ShapeClass::Utility => "utility",
            ShapeClass::Special => "special",
        };
        f.write_str(name)
    }
}

/// Semantic group a rule belongs to. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Residential,
    Commercial,
    Industrial,
    Civic,
    Utilities,
    Landmark,
    Nature,
    Water,
    Generic,
}

/// Resolved, declarative description of how to draw a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteStyle {
    pub shape: ShapeClass,
    pub category: Category,
    #[serde(serialize_with = "serialize_color")]
    pub base: Rgba<u8>,
    #[serde(serialize_with = "serialize_color")]
    pub roof: Rgba<u8>,
    #[serde(serialize_with = "serialize_color")]
    pub accent: Rgba<u8>,
    /// Footprint multiplier along the isometric x axis
    pub footprint_w: f32,
    /// Footprint multiplier along the isometric y axis
    pub footprint_d: f32,
    pub height: f32,
}

fn serialize_color<S: serde::Serializer>(color: &Rgba<u8>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&crate::color::to_hex(*color))
}

/// Footprints are clamped so the prism base stays inside the tile diamond.
const MAX_FOOTPRINT: f32 = 1.0;

/// Namespace prefixes that adjust the resolved base style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StylePrefix {
    Dense,
    Modern,
    Farm,
    Station,
}

impl StylePrefix {
    pub fn parse(prefix: &str) -> Option<Self> {
        match prefix {
            "dense" => Some(StylePrefix::Dense),
            "modern" => Some(StylePrefix::Modern),
            "farm" => Some(StylePrefix::Farm),
            "station" => Some(StylePrefix::Station),
            _ => None,
        }
    }

    /// Apply this prefix's adjustment to a base style.
    pub fn adjust(self, style: SpriteStyle) -> SpriteStyle {
        match self {
            StylePrefix::Dense => SpriteStyle {
                height: style.height * 1.25,
                footprint_w: (style.footprint_w * 1.05).min(MAX_FOOTPRINT),
                footprint_d: (style.footprint_d * 1.05).min(MAX_FOOTPRINT),
                ..style
            },
            StylePrefix::Modern => SpriteStyle {
                base: rgb(0x9aa5b1),
                roof: rgb(0xc7d0d9),
                accent: rgb(0x5b6b7a),
                height: style.height * 1.15,
                ..style
            },
            StylePrefix::Farm => SpriteStyle {
                base: rgb(0xa67c52),
                roof: rgb(0x6b8e23),
                accent: rgb(0xd9c38c),
                ..style
            },
            StylePrefix::Station => SpriteStyle {
                shape: ShapeClass::Utility,
                base: rgb(0xa0a0a0),
                roof: rgb(0x6e6e6e),
                accent: rgb(0xd0d0d0),
                ..style
            },
        }
    }
}

/// A sprite key split at its first `:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteKey<'a> {
    pub prefix: Option<&'a str>,
    pub name: &'a str,
}

impl<'a> SpriteKey<'a> {
    /// Split `prefix:name`; a key without `:` has no prefix.
    ///
    /// ```
    /// use isosprite::style::SpriteKey;
    ///
    /// let key = SpriteKey::parse("park:basketball_courts");
    /// assert_eq!(key.prefix, Some("park"));
    /// assert_eq!(key.name, "basketball_courts");
    /// assert_eq!(SpriteKey::parse("tree").prefix, None);
    /// ```
    pub fn parse(key: &'a str) -> Self {
        match key.split_once(':') {
            Some((prefix, name)) => Self { prefix: Some(prefix), name },
            None => Self { prefix: None, name: key },
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Match {
    Exact(&'static str),
    Contains(&'static str),
}

impl Match {
    fn matches(self, key: &str) -> bool {
        match self {
            Match::Exact(s) => key == s,
            Match::Contains(s) => key.contains(s),
        }
    }
}

struct StyleRule {
    matchers: &'static [Match],
    style: SpriteStyle,
}

const fn style(
    shape: ShapeClass,
    category: Category,
    base: u32,
    roof: u32,
    accent: u32,
    footprint: (f32, f32),
    height: f32,
) -> SpriteStyle {
    SpriteStyle {
        shape,
        category,
        base: rgb(base),
        roof: rgb(roof),
        accent: rgb(accent),
        footprint_w: footprint.0,
        footprint_d: footprint.1,
        height,
    }
}

use Category::*;
use Match::{Contains, Exact};
use ShapeClass::{Building, Park, Special, Tree, Utility};

/// Ordered rule table. Order is significant: specific keys come before the
/// substrings they contain (`greenhouse`, `warehouse` and `firehouse` before
/// `house`, `amusement_park` and `parking` before `park`, `fire_station`
/// before `station`). Note that
/// `small` contains `mall`, hence the exact match there.
const RULES: &[StyleRule] = &[
    // Non-residential keys containing `house`
    StyleRule {
        matchers: &[Contains("greenhouse")],
        style: style(Building, Industrial, 0xcfe8d4, 0xe8f4ea, 0x7fb58a, (0.8, 0.6), 0.6),
    },
    StyleRule {
        matchers: &[Contains("warehouse"), Contains("depot")],
        style: style(Building, Industrial, 0xa89f91, 0x7d7468, 0x4f6d7a, (0.95, 0.85), 0.8),
    },
    StyleRule {
        matchers: &[Contains("fire")],
        style: style(Building, Civic, 0xc0504d, 0x7f2a28, 0xf2f2f2, (0.85, 0.8), 1.0),
    },
    // Residential
    StyleRule {
        matchers: &[Contains("mansion"), Contains("villa")],
        style: style(Building, Residential, 0xe8d5b5, 0x8b4a3c, 0xf5efe0, (0.9, 0.85), 1.1),
    },
    StyleRule {
        matchers: &[Contains("house"), Contains("cottage"), Contains("bungalow")],
        style: style(Building, Residential, 0xf0e0c0, 0xb5533c, 0x6f4e37, (0.7, 0.7), 0.7),
    },
    StyleRule {
        matchers: &[Contains("apartment_high"), Contains("highrise"), Contains("tower_res")],
        style: style(Building, Residential, 0xd9b38c, 0x7a5c44, 0xfff2cc, (0.85, 0.85), 3.0),
    },
    StyleRule {
        matchers: &[Contains("apartment"), Contains("condo"), Contains("flats")],
        style: style(Building, Residential, 0xd6b896, 0x8c6a50, 0xfff2cc, (0.85, 0.8), 1.6),
    },
    // Commercial
    StyleRule {
        matchers: &[Contains("office_high"), Contains("skyscraper")],
        style: style(Building, Commercial, 0x8fa9bf, 0xd4e0ea, 0xcfe8ff, (0.85, 0.85), 3.4),
    },
    StyleRule {
        matchers: &[Contains("office"), Contains("bank")],
        style: style(Building, Commercial, 0xa7b8c8, 0xdde6ee, 0xcfe8ff, (0.85, 0.8), 1.8),
    },
    StyleRule {
        matchers: &[Contains("hotel")],
        style: style(Building, Commercial, 0xc9a27e, 0xe8d9c5, 0xffe4a8, (0.85, 0.8), 2.4),
    },
    StyleRule {
        matchers: &[Exact("mall"), Contains("shopping_mall"), Contains("supermarket")],
        style: style(Building, Commercial, 0xc9d6df, 0x9fb3c2, 0xe05a47, (1.0, 0.95), 1.0),
    },
    StyleRule {
        matchers: &[Contains("shop"), Contains("store"), Contains("market"), Contains("cafe")],
        style: style(Building, Commercial, 0xe6c07b, 0x9c6b30, 0xd94f3d, (0.75, 0.7), 0.8),
    },
    // Industrial
    StyleRule {
        matchers: &[Contains("factory"), Contains("industrial"), Contains("refinery")],
        style: style(Building, Industrial, 0x9a8f84, 0x6d645c, 0xc9a227, (0.95, 0.9), 1.1),
    },
    // Civic services
    StyleRule {
        matchers: &[Contains("police")],
        style: style(Building, Civic, 0x5b7db1, 0x2f4b7c, 0xf2f2f2, (0.85, 0.8), 1.0),
    },
    StyleRule {
        matchers: &[Contains("hospital"), Contains("clinic")],
        style: style(Building, Civic, 0xf2f2f2, 0xd9534f, 0xd9534f, (0.9, 0.9), 1.6),
    },
    StyleRule {
        matchers: &[Contains("university"), Contains("college")],
        style: style(Building, Civic, 0xc8a46e, 0x7b2d26, 0xf5efe0, (0.95, 0.9), 1.5),
    },
    StyleRule {
        matchers: &[Contains("school"), Contains("library")],
        style: style(Building, Civic, 0xe0b26b, 0x8a4b2a, 0xf5efe0, (0.9, 0.8), 1.0),
    },
    // Utilities
    StyleRule {
        matchers: &[Contains("power"), Contains("plant"), Contains("generator")],
        style: style(Utility, Utilities, 0x8c8c8c, 0x5e5e5e, 0xf2c14e, (0.95, 0.9), 1.4),
    },
    StyleRule {
        matchers: &[Contains("water_tower"), Contains("pump"), Contains("treatment")],
        style: style(Utility, Utilities, 0x7fa7c9, 0x4d7ea8, 0xd7e7f3, (0.7, 0.7), 1.8),
    },
    StyleRule {
        matchers: &[Contains("parking"), Contains("garage")],
        style: style(Utility, Utilities, 0x9e9e9e, 0x7a7a7a, 0xf2f2f2, (0.95, 0.9), 0.4),
    },
    StyleRule {
        matchers: &[Contains("station"), Contains("rail"), Contains("subway"), Contains("airport")],
        style: style(Utility, Utilities, 0xb0a89c, 0x6e665c, 0xe0e0e0, (0.95, 0.85), 1.0),
    },
    // Special landmarks
    StyleRule {
        matchers: &[Exact("city_hall"), Contains("capitol")],
        style: style(Special, Landmark, 0xeae4d3, 0x6f8fa6, 0xd4af37, (0.95, 0.95), 1.8),
    },
    StyleRule {
        matchers: &[Contains("stadium"), Contains("arena")],
        style: style(Special, Landmark, 0xbfc5cc, 0x5f7f3f, 0xd4af37, (1.0, 1.0), 1.2),
    },
    StyleRule {
        matchers: &[Contains("amusement_park"), Contains("space"), Contains("museum")],
        style: style(Special, Landmark, 0xe3d4f0, 0x7a5ea8, 0xd4af37, (0.95, 0.95), 1.6),
    },
    StyleRule {
        matchers: &[Contains("church"), Contains("cathedral"), Contains("temple"), Contains("monument")],
        style: style(Special, Landmark, 0xe8e0d0, 0x8b6f4e, 0xd4af37, (0.8, 0.8), 2.0),
    },
    // Parks and nature
    StyleRule {
        matchers: &[Contains("tree"), Contains("forest"), Contains("woods")],
        style: style(Tree, Nature, 0x6b4a2b, 0x3f8f3a, 0x6cc35c, (0.5, 0.5), 1.0),
    },
    StyleRule {
        matchers: &[
            Contains("park"),
            Contains("playground"),
            Contains("garden"),
            Contains("plaza"),
            Contains("court"),
            Contains("field"),
            Contains("tennis"),
            Contains("basketball"),
            Contains("soccer"),
            Contains("football"),
            Contains("baseball"),
            Contains("swim"),
            Contains("dock"),
            Contains("pool"),
            Contains("track"),
            Contains("kart"),
            Contains("marina"),
            Contains("pier"),
        ],
        style: style(Park, Nature, 0x7cb85a, 0x5e9c44, 0xf2f2f2, (1.0, 1.0), 0.1),
    },
    // Water
    StyleRule {
        matchers: &[Contains("water"), Contains("lake"), Contains("pond")],
        style: WATER_STYLE,
    },
];

const WATER_STYLE: SpriteStyle =
    style(Park, Water, 0x3d8bd9, 0x5aa6ec, 0xb9dcfa, (1.0, 1.0), 0.05);

const DEFAULT_STYLE: SpriteStyle =
    style(Building, Generic, 0xc8c8c8, 0x8a8a8a, 0x5a5a5a, (0.8, 0.8), 1.0);

/// Classify a bare (un-prefixed) key.
pub fn resolve_base_style(name: &str) -> SpriteStyle {
    // Water is re-rendered by the host's overlay pass; always keep it flat
    if name == "water" {
        return WATER_STYLE;
    }

    RULES
        .iter()
        .find(|rule| rule.matchers.iter().any(|m| m.matches(name)))
        .map(|rule| rule.style)
        .unwrap_or(DEFAULT_STYLE)
}

/// Resolve a possibly namespaced sprite key to its style.
///
/// # Examples
///
/// ```
/// use isosprite::style::{resolve_style, ShapeClass};
///
/// assert_eq!(resolve_style("tree").shape, ShapeClass::Tree);
/// assert_eq!(resolve_style("station:central").shape, ShapeClass::Utility);
///
/// let bare = resolve_style("apartment_high");
/// let dense = resolve_style("dense:apartment_high");
/// assert!(dense.height > bare.height);
/// ```
pub fn resolve_style(key: &str) -> SpriteStyle {
    let key = SpriteKey::parse(key);
    let base = resolve_base_style(key.name);

    if key.name == "water" {
        return base;
    }

    match key.prefix.and_then(StylePrefix::parse) {
        Some(prefix) => prefix.adjust(base),
        None => base,
    }
}
