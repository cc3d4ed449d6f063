//! Primitive sprite renderer
//!
//! Turns a resolved [`SpriteStyle`] into pixels inside one cell. Trees, flat
//! parks and prism structures each have their own sub-renderer; status
//! overlays for construction and abandoned variants are applied last.
//!
//! All randomness comes from the caller's [`Rng`], so a cell drawn twice from
//! the same seed produces identical pixels.

pub mod overlay;
pub mod park;
pub mod prism;
pub mod tree;

use crate::canvas::CellCanvas;
use crate::color::{darken, desaturate, mix, rgb, shade};
use crate::pack::Variant;
use crate::seed::Rng;
use crate::style::{ShapeClass, SpriteKey, SpriteStyle};
use image::Rgba;

/// Maximum seed-driven brightness shift on structure colors
const JITTER: f32 = 0.06;

/// Share of the pack tint mixed into base and roof colors
const TINT_STRENGTH: f32 = 0.2;

const CONCRETE: Rgba<u8> = rgb(0xc9c3b6);

/// Signed brightness shift per face: positive lightens, negative darkens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub top: f32,
    pub left: f32,
    pub right: f32,
}

impl Lighting {
    /// Single light from the upper left.
    pub const DEFAULT: Lighting = Lighting { top: 0.15, left: 0.0, right: -0.18 };
}

impl Default for Lighting {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-sheet rendering options.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderOptions {
    pub lighting: Lighting,
    /// Pack theme color blended into base and roof colors
    pub tint: Option<Rgba<u8>>,
}

/// Render one sprite into an already-cleared cell.
pub fn render_sprite(
    canvas: &mut CellCanvas<'_>,
    key: &str,
    style: &SpriteStyle,
    variant: Variant,
    rng: &mut Rng,
    options: &RenderOptions,
) {
    let style = prepare_style(style, variant, rng, options);

    match style.shape {
        ShapeClass::Tree => tree::draw_tree_cell(canvas, &style, rng),
        ShapeClass::Park => park::draw_park(canvas, SpriteKey::parse(key).name, &style, rng),
        ShapeClass::Building | ShapeClass::Utility | ShapeClass::Special => {
            prism::draw_structure(canvas, &style, &options.lighting, rng)
        }
    }

    match variant {
        Variant::Main => {}
        Variant::Construction => overlay::construction(canvas),
        Variant::Abandoned => overlay::abandoned(canvas, rng),
    }
}

/// Apply seed jitter, pack tint and variant tint to a resolved style.
pub fn prepare_style(
    style: &SpriteStyle,
    variant: Variant,
    rng: &mut Rng,
    options: &RenderOptions,
) -> SpriteStyle {
    let mut style = *style;

    if matches!(style.shape, ShapeClass::Building | ShapeClass::Utility | ShapeClass::Special) {
        let jitter = rng.range(-JITTER, JITTER);
        style.base = shade(style.base, jitter);
        style.roof = shade(style.roof, jitter * 0.5);
    }

    if let Some(tint) = options.tint {
        style.base = mix(style.base, tint, TINT_STRENGTH);
        style.roof = mix(style.roof, tint, TINT_STRENGTH);
    }

    match variant {
        Variant::Main => {}
        Variant::Construction => {
            style.base = mix(desaturate(style.base, 0.6), CONCRETE, 0.35);
            style.roof = mix(desaturate(style.roof, 0.6), CONCRETE, 0.35);
        }
        Variant::Abandoned => {
            style.base = desaturate(darken(style.base, 0.25), 0.4);
            style.roof = desaturate(darken(style.roof, 0.25), 0.4);
            style.accent = darken(style.accent, 0.4);
        }
    }

    style
}
