//! Flat park tiles: courts, fields, pools, tracks, piers, water and greens

use super::prism::{IsoFrame, Quad};
use super::tree::draw_tree;
use crate::canvas::CellCanvas;
use crate::color::{rgb, shade, with_alpha};
use crate::seed::Rng;
use crate::shapes::Point;
use crate::style::{Category, SpriteStyle};
use image::Rgba;

const LINE: Rgba<u8> = Rgba([250, 250, 245, 255]);
const PAVING: Rgba<u8> = rgb(0xd9d4c5);
const POOL_WATER: Rgba<u8> = rgb(0x4fb3e8);
const DEEP_WATER: Rgba<u8> = rgb(0x3d8bd9);
const DIRT: Rgba<u8> = rgb(0xc49a6c);
const TRACK_CLAY: Rgba<u8> = rgb(0xb5523b);
const ASPHALT: Rgba<u8> = rgb(0x5a5a5a);
const PLANKS: Rgba<u8> = rgb(0x8b6b43);
const PATH: Rgba<u8> = rgb(0xe3d3a8);

/// Sub-renderer chosen from a park key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParkFeature {
    Tennis,
    Basketball,
    Soccer,
    Football,
    Baseball,
    Pool,
    Track,
    GoKart,
    Pier,
    Water,
    Green,
}

/// Ordered by specificity; first match wins.
const FEATURES: &[(&str, ParkFeature)] = &[
    ("tennis", ParkFeature::Tennis),
    ("basketball", ParkFeature::Basketball),
    ("soccer", ParkFeature::Soccer),
    ("football", ParkFeature::Football),
    ("baseball", ParkFeature::Baseball),
    ("pool", ParkFeature::Pool),
    ("swim", ParkFeature::Pool),
    ("kart", ParkFeature::GoKart),
    ("track", ParkFeature::Track),
    ("marina", ParkFeature::Pier),
    ("pier", ParkFeature::Pier),
    ("dock", ParkFeature::Pier),
];

impl ParkFeature {
    /// Pick the sub-renderer for an un-prefixed key.
    pub fn classify(name: &str, style: &SpriteStyle) -> Self {
        if style.category == Category::Water {
            return ParkFeature::Water;
        }
        FEATURES
            .iter()
            .find(|(needle, _)| name.contains(needle))
            .map(|(_, feature)| *feature)
            .unwrap_or(ParkFeature::Green)
    }
}

/// Draw a flat park tile for `name` (the key without its prefix).
pub fn draw_park(canvas: &mut CellCanvas<'_>, name: &str, style: &SpriteStyle, rng: &mut Rng) {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    let frame = IsoFrame::for_tile(w, h);
    let ground = frame.ground(style.footprint_w * 0.96, style.footprint_d * 0.96);
    let grass = shade(style.base, rng.range(-0.05, 0.05));

    let feature = ParkFeature::classify(name, style);
    match feature {
        ParkFeature::Tennis => {
            canvas.fill_polygon(&ground.points(), grass);
            let court = ground.sub_quad(0.15, 0.85, 0.2, 0.8);
            canvas.fill_polygon(&court.points(), rgb(0x3f7fbf));
            outline(canvas, &court);
            line_across_u(canvas, &court, 0.5, shade(LINE, -0.3));
            line_across_v(canvas, &court, 0.5, LINE);
        }
        ParkFeature::Basketball => {
            canvas.fill_polygon(&ground.points(), PAVING);
            let court = ground.sub_quad(0.12, 0.88, 0.18, 0.82);
            canvas.fill_polygon(&court.points(), rgb(0xc8844a));
            outline(canvas, &court);
            line_across_u(canvas, &court, 0.5, LINE);
            canvas.fill_polygon(&quad_ellipse(&court, (0.5, 0.5), 0.12, 0.18, 12), with_alpha(LINE, 0.8));
            for u in [0.06, 0.94] {
                canvas.fill_circle(court.at(u, 0.5), (w * 0.02).max(1.0), rgb(0xe05a2a));
            }
        }
        ParkFeature::Soccer | ParkFeature::Football => {
            let field = ground.sub_quad(0.06, 0.94, 0.06, 0.94);
            canvas.fill_polygon(&ground.points(), grass);
            // Mowed stripes along u
            let stripes = 6;
            for i in (0..stripes).step_by(2) {
                let u0 = i as f32 / stripes as f32;
                let u1 = (i + 1) as f32 / stripes as f32;
                let band = field.sub_quad(u0, u1, 0.0, 1.0);
                canvas.fill_polygon(&band.points(), shade(grass, 0.08));
            }
            outline(canvas, &field);
            line_across_u(canvas, &field, 0.5, LINE);
            if feature == ParkFeature::Football {
                for i in 1..10 {
                    line_across_u(canvas, &field, i as f32 / 10.0, with_alpha(LINE, 0.6));
                }
            } else {
                let ring = quad_ellipse(&field, (0.5, 0.5), 0.12, 0.12, 16);
                canvas.stroke_polygon(&ring, LINE);
            }
        }
        ParkFeature::Baseball => {
            canvas.fill_polygon(&ground.points(), grass);
            let infield = ground.sub_quad(0.45, 0.95, 0.45, 0.95);
            canvas.fill_polygon(&infield.points(), DIRT);
            let diamond = infield.sub_quad(0.2, 0.8, 0.2, 0.8);
            canvas.fill_polygon(&diamond.points(), grass);
            for base in diamond.points() {
                canvas.fill_circle(base, (w * 0.015).max(1.0), LINE);
            }
        }
        ParkFeature::Pool => {
            canvas.fill_polygon(&ground.points(), PAVING);
            let pool = ground.sub_quad(0.2, 0.8, 0.25, 0.75);
            canvas.fill_polygon(&pool.points(), POOL_WATER);
            outline(canvas, &pool);
            for v in [0.35, 0.5, 0.65] {
                line_across_v(canvas, &pool, v, with_alpha(LINE, 0.35));
            }
        }
        ParkFeature::Track | ParkFeature::GoKart => {
            let surface = if feature == ParkFeature::GoKart {
                ASPHALT
            } else {
                TRACK_CLAY
            };
            canvas.fill_polygon(&ground.points(), grass);
            let outer = quad_ellipse(&ground, (0.5, 0.5), 0.45, 0.42, 24);
            canvas.fill_polygon(&outer, surface);
            let lane = quad_ellipse(&ground, (0.5, 0.5), 0.36, 0.33, 24);
            canvas.stroke_polygon(&lane, with_alpha(LINE, 0.7));
            let inner = quad_ellipse(&ground, (0.5, 0.5), 0.28, 0.25, 24);
            canvas.fill_polygon(&inner, grass);
        }
        ParkFeature::Pier => {
            canvas.fill_polygon(&ground.points(), DEEP_WATER);
            ripples(canvas, &ground, rng);
            let deck = ground.sub_quad(0.4, 0.6, 0.0, 0.9);
            canvas.fill_polygon(&deck.points(), PLANKS);
            outline(canvas, &deck);
            for i in 1..6 {
                line_across_u(canvas, &deck, i as f32 / 6.0, shade(PLANKS, -0.25));
            }
        }
        ParkFeature::Water => {
            canvas.fill_polygon(&ground.points(), style.base);
            ripples(canvas, &ground, rng);
        }
        ParkFeature::Green => {
            canvas.fill_polygon(&ground.points(), grass);
            let path_u = ground.sub_quad(0.45, 0.55, 0.0, 1.0);
            let path_v = ground.sub_quad(0.0, 1.0, 0.45, 0.55);
            canvas.fill_polygon(&path_u.points(), PATH);
            canvas.fill_polygon(&path_v.points(), PATH);

            let count = 2 + rng.index(3);
            let mut spots: Vec<Point> = (0..count)
                .map(|_| {
                    let u = pick_off_path(rng);
                    let v = pick_off_path(rng);
                    ground.at(u, v)
                })
                .collect();
            // Back to front so nearer trees overlap farther ones
            spots.sort_by(|a, b| a.1.total_cmp(&b.1));
            let tree_style = crate::style::resolve_base_style("tree");
            for spot in spots {
                draw_tree(canvas, &tree_style, spot, w.min(h) * 0.45, rng);
            }
        }
    }
}

/// A ground coordinate in one of the lawn quadrants, away from the paths.
fn pick_off_path(rng: &mut Rng) -> f32 {
    if rng.chance(0.5) {
        rng.range(0.15, 0.38)
    } else {
        rng.range(0.62, 0.85)
    }
}

fn outline(canvas: &mut CellCanvas<'_>, quad: &Quad) {
    canvas.stroke_polygon(&quad.points(), LINE);
}

/// Line of constant `u` across the quad.
fn line_across_u(canvas: &mut CellCanvas<'_>, quad: &Quad, u: f32, color: Rgba<u8>) {
    canvas.line(quad.at(u, 0.0), quad.at(u, 1.0), 1, color);
}

/// Line of constant `v` across the quad.
fn line_across_v(canvas: &mut CellCanvas<'_>, quad: &Quad, v: f32, color: Rgba<u8>) {
    canvas.line(quad.at(0.0, v), quad.at(1.0, v), 1, color);
}

/// Polygon approximating an ellipse laid flat on the quad.
fn quad_ellipse(quad: &Quad, center: (f32, f32), ru: f32, rv: f32, segments: u32) -> Vec<Point> {
    (0..segments)
        .map(|i| {
            let t = i as f32 / segments as f32 * std::f32::consts::TAU;
            quad.at(center.0 + ru * t.cos(), center.1 + rv * t.sin())
        })
        .collect()
}

/// Short light strokes scattered over a water quad.
fn ripples(canvas: &mut CellCanvas<'_>, quad: &Quad, rng: &mut Rng) {
    let color = with_alpha(rgb(0xb9dcfa), 0.55);
    for _ in 0..5 {
        let u = rng.range(0.15, 0.75);
        let v = rng.range(0.15, 0.85);
        canvas.line(quad.at(u, v), quad.at(u + 0.12, v), 1, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CellRect;
    use crate::style::resolve_style;
    use image::RgbaImage;

    #[test]
    fn test_classify_features() {
        let park = resolve_style("park");
        assert_eq!(ParkFeature::classify("tennis_courts", &park), ParkFeature::Tennis);
        assert_eq!(ParkFeature::classify("basketball_courts", &park), ParkFeature::Basketball);
        assert_eq!(ParkFeature::classify("soccer_field", &park), ParkFeature::Soccer);
        assert_eq!(ParkFeature::classify("football_field", &park), ParkFeature::Football);
        assert_eq!(ParkFeature::classify("baseball_field", &park), ParkFeature::Baseball);
        assert_eq!(ParkFeature::classify("swimming_pool", &park), ParkFeature::Pool);
        assert_eq!(ParkFeature::classify("go_kart_track", &park), ParkFeature::GoKart);
        assert_eq!(ParkFeature::classify("running_track", &park), ParkFeature::Track);
        assert_eq!(ParkFeature::classify("marina_docks", &park), ParkFeature::Pier);
        assert_eq!(ParkFeature::classify("park_small", &park), ParkFeature::Green);
        assert_eq!(ParkFeature::classify("water", &resolve_style("water")), ParkFeature::Water);
    }

    #[test]
    fn test_park_stays_flat() {
        for name in ["park_small", "tennis_courts", "swimming_pool", "marina", "water"] {
            let mut image = RgbaImage::new(64, 64);
            let mut canvas = CellCanvas::new(&mut image, CellRect::new(0, 0, 64, 64));
            let style = resolve_style(name);
            draw_park(&mut canvas, name, &style, &mut Rng::new(4));
            let (_, y, _, _) = canvas.opaque_bounds().expect("park drew nothing");
            // Ground diamond starts halfway down; only trees may rise above it
            if name != "park_small" {
                assert!(y >= 30, "{} starts at row {}", name, y);
            }
        }
    }

    #[test]
    fn test_water_uses_style_color() {
        let mut image = RgbaImage::new(64, 64);
        let mut canvas = CellCanvas::new(&mut image, CellRect::new(0, 0, 64, 64));
        let style = resolve_style("water");
        draw_park(&mut canvas, "water", &style, &mut Rng::new(1));
        // Right corner of the diamond is away from the ripple band
        assert_eq!(canvas.get_pixel(58, 48), Some(style.base));
    }
}
