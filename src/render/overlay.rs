//! Status overlays painted on top of a finished sprite
//!
//! Overlays only touch pixels the base shape already covers, so the cell's
//! transparent margin stays transparent.

use crate::canvas::CellCanvas;
use crate::color::{rgb, with_alpha};
use crate::seed::Rng;
use crate::shapes::{rasterize_rect, rasterize_thick_line};
use image::Rgba;
use std::collections::HashSet;

const AMBER: Rgba<u8> = rgb(0xf2a93b);
const SCAFFOLD: Rgba<u8> = rgb(0x8a6d3b);
const GRIME: Rgba<u8> = rgb(0x1e1a16);

const STRIPE_ALPHA: f32 = 0.35;
const SCAFFOLD_ALPHA: f32 = 0.8;
const WASH_ALPHA: f32 = 0.28;
const CRACK_ALPHA: f32 = 0.6;

/// Number of crack strokes on an abandoned sprite
pub const CRACK_COUNT: usize = 6;

/// Amber diagonal stripes with vertical scaffold poles.
pub fn construction(canvas: &mut CellCanvas<'_>) {
    let Some((bx, by, bw, bh)) = canvas.opaque_bounds() else {
        return;
    };
    let (bx, by, bw, bh) = (bx as i32, by as i32, bw as i32, bh as i32);

    // Stripes on the x + y diagonal, 3px wide every 8px
    let mut stripes = HashSet::new();
    for y in by..by + bh {
        for x in bx..bx + bw {
            if (x + y).rem_euclid(8) < 3 {
                stripes.insert((x, y));
            }
        }
    }
    canvas.paint_masked(&stripes, with_alpha(AMBER, STRIPE_ALPHA));

    let bar_w = (bw / 24).max(1);
    let mut bars = HashSet::new();
    for i in 1..=3 {
        let x = bx + bw * i / 4;
        bars.extend(rasterize_rect(x, by, bar_w, bh));
    }
    canvas.paint_masked(&bars, with_alpha(SCAFFOLD, SCAFFOLD_ALPHA));
}

/// Dark wash plus random crack strokes.
pub fn abandoned(canvas: &mut CellCanvas<'_>, rng: &mut Rng) {
    let Some((bx, by, bw, bh)) = canvas.opaque_bounds() else {
        return;
    };
    let wash = rasterize_rect(bx as i32, by as i32, bw as i32, bh as i32);
    canvas.paint_masked(&wash, with_alpha(GRIME, WASH_ALPHA));

    let (bx, by, bw, bh) = (bx as f32, by as f32, bw as f32, bh as f32);
    let mut cracks = HashSet::new();
    for _ in 0..CRACK_COUNT {
        let start = (bx + rng.range(0.1, 0.9) * bw, by + rng.range(0.1, 0.8) * bh);
        let end = (
            start.0 + rng.range(-0.12, 0.12) * bw,
            start.1 + rng.range(0.05, 0.2) * bh,
        );
        cracks.extend(rasterize_thick_line(start, end, 1));
    }
    canvas.paint_masked(&cracks, with_alpha(GRIME, CRACK_ALPHA));
}
