//! Isometric prisms: buildings, utilities and landmarks

use super::Lighting;
use crate::canvas::CellCanvas;
use crate::color::{darken, shade, with_alpha};
use crate::seed::Rng;
use crate::shapes::Point;
use crate::style::{ShapeClass, SpriteStyle};
use image::Rgba;

/// Height in pixels per unit of height multiplier, as a fraction of tile height
const HEIGHT_FACTOR: f32 = 0.18;

/// Prisms at least this tall get windows
pub const WINDOW_MIN_HEIGHT: f32 = 1.2;

/// Minimum window pitch in logical pixels
const WINDOW_PITCH_X: f32 = 16.0;
const WINDOW_PITCH_Y: f32 = 18.0;

/// Inset of each window inside its grid cell
const WINDOW_PAD_X: f32 = 0.15;
const WINDOW_PAD_Y: f32 = 0.20;

/// Probability that a window is dark
const WINDOW_OFF_CHANCE: f32 = 0.18;

const OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 56]);

fn add(a: Point, b: Point) -> Point {
    (a.0 + b.0, a.1 + b.1)
}

fn sub(a: Point, b: Point) -> Point {
    (a.0 - b.0, a.1 - b.1)
}

fn scale(a: Point, f: f32) -> Point {
    (a.0 * f, a.1 * f)
}

/// Isometric basis anchored at a ground point.
///
/// `ex` and `ey` are half a tile along the two ground axes, so a footprint of
/// 1.0 x 1.0 spans the whole tile diamond.
#[derive(Debug, Clone, Copy)]
pub struct IsoFrame {
    pub center: Point,
    pub ex: Point,
    pub ey: Point,
}

impl IsoFrame {
    /// Frame for a full tile: the ground diamond touches the bottom edge.
    pub fn for_tile(width: f32, height: f32) -> Self {
        Self {
            center: (width / 2.0, height * 0.75),
            ex: (width / 4.0, height / 8.0),
            ey: (-width / 4.0, height / 8.0),
        }
    }

    /// Same basis, re-anchored at another ground point.
    pub fn at(&self, center: Point) -> Self {
        Self { center, ..*self }
    }

    /// Ground quad for a footprint.
    pub fn ground(&self, footprint_w: f32, footprint_d: f32) -> Quad {
        let x = scale(self.ex, footprint_w);
        let y = scale(self.ey, footprint_d);
        Quad {
            back: sub(sub(self.center, x), y),
            right: sub(add(self.center, x), y),
            front: add(add(self.center, x), y),
            left: add(sub(self.center, x), y),
        }
    }
}

/// A flat isometric quadrilateral, corners named by screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub back: Point,
    pub right: Point,
    pub front: Point,
    pub left: Point,
}

impl Quad {
    pub fn points(&self) -> [Point; 4] {
        [self.back, self.right, self.front, self.left]
    }

    /// Translate straight up by `dy` pixels.
    pub fn lifted(&self, dy: f32) -> Quad {
        let up = |p: Point| (p.0, p.1 - dy);
        Quad { back: up(self.back), right: up(self.right), front: up(self.front), left: up(self.left) }
    }

    /// Point at `(u, v)`: `u` runs back to right, `v` runs back to left.
    pub fn at(&self, u: f32, v: f32) -> Point {
        let du = sub(self.right, self.back);
        let dv = sub(self.left, self.back);
        add(self.back, add(scale(du, u), scale(dv, v)))
    }

    /// Sub-quad spanning `u0..u1` by `v0..v1`.
    pub fn sub_quad(&self, u0: f32, u1: f32, v0: f32, v1: f32) -> Quad {
        Quad {
            back: self.at(u0, v0),
            right: self.at(u1, v0),
            front: self.at(u1, v1),
            left: self.at(u0, v1),
        }
    }

    pub fn center(&self) -> Point {
        self.at(0.5, 0.5)
    }
}

/// An axis-aligned isometric box.
#[derive(Debug, Clone, Copy)]
pub struct Prism {
    pub base: Quad,
    pub top: Quad,
}

impl Prism {
    pub fn new(frame: &IsoFrame, footprint_w: f32, footprint_d: f32, height_px: f32) -> Self {
        let base = frame.ground(footprint_w, footprint_d);
        Self { base, top: base.lifted(height_px) }
    }

    /// Screen-right face, seen from the front.
    pub fn right_face(&self) -> [Point; 4] {
        [self.base.right, self.base.front, self.top.front, self.top.right]
    }

    /// Screen-left face, seen from the front.
    pub fn left_face(&self) -> [Point; 4] {
        [self.base.left, self.base.front, self.top.front, self.top.left]
    }

    pub fn height(&self) -> f32 {
        self.base.back.1 - self.top.back.1
    }
}

/// Prism height in pixels for a height multiplier, kept inside the tile.
pub fn prism_height(tile_height: f32, multiplier: f32, frame: &IsoFrame, footprint: (f32, f32)) -> f32 {
    let wanted = tile_height * HEIGHT_FACTOR * multiplier;
    let back_y = frame.ground(footprint.0, footprint.1).back.1;
    wanted.min((back_y - 1.0).max(0.0))
}

/// Paint a prism: right face, left face, then top face.
pub fn draw_prism(
    canvas: &mut CellCanvas<'_>,
    prism: &Prism,
    wall: Rgba<u8>,
    roof: Rgba<u8>,
    lighting: &Lighting,
) {
    let right = prism.right_face();
    let left = prism.left_face();
    let top = prism.top.points();

    canvas.fill_polygon(&right, shade(wall, lighting.right));
    canvas.stroke_polygon(&right, OUTLINE);
    canvas.fill_polygon(&left, shade(wall, lighting.left));
    canvas.stroke_polygon(&left, OUTLINE);
    canvas.fill_polygon(&top, shade(roof, lighting.top));
    canvas.stroke_polygon(&top, OUTLINE);
}

/// Sprinkle a lit/unlit window grid over both visible walls.
pub fn draw_windows(
    canvas: &mut CellCanvas<'_>,
    prism: &Prism,
    glass: Rgba<u8>,
    lighting: &Lighting,
    rng: &mut Rng,
) {
    let faces = [
        (prism.base.left, prism.base.front, shade(glass, lighting.left)),
        (prism.base.front, prism.base.right, shade(glass, lighting.right)),
    ];
    let height = prism.height();

    for (start, end, color) in faces {
        let edge = sub(end, start);
        let width = (edge.0 * edge.0 + edge.1 * edge.1).sqrt();
        if width < WINDOW_PITCH_X / 2.0 || height < WINDOW_PITCH_Y / 2.0 {
            continue;
        }
        let cols = (width / WINDOW_PITCH_X).floor().max(1.0) as u32;
        let rows = (height / WINDOW_PITCH_Y).floor().max(1.0) as u32;
        let color = with_alpha(color, 0.6);

        // u runs along the wall, v runs upward
        let point = |u: f32, v: f32| -> Point { (start.0 + edge.0 * u, start.1 + edge.1 * u - height * v) };

        for row in 0..rows {
            for col in 0..cols {
                if rng.chance(WINDOW_OFF_CHANCE) {
                    continue;
                }
                let cw = 1.0 / cols as f32;
                let ch = 1.0 / rows as f32;
                let u0 = col as f32 * cw + cw * WINDOW_PAD_X;
                let u1 = (col + 1) as f32 * cw - cw * WINDOW_PAD_X;
                let v0 = row as f32 * ch + ch * WINDOW_PAD_Y;
                let v1 = (row + 1) as f32 * ch - ch * WINDOW_PAD_Y;
                let window = [point(u0, v0), point(u1, v0), point(u1, v1), point(u0, v1)];
                canvas.fill_polygon(&window, color);
            }
        }
    }
}

/// Draw a building, utility or landmark prism with its class details.
pub fn draw_structure(
    canvas: &mut CellCanvas<'_>,
    style: &SpriteStyle,
    lighting: &Lighting,
    rng: &mut Rng,
) {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    let frame = IsoFrame::for_tile(w, h);
    let footprint = (style.footprint_w, style.footprint_d);
    let height = prism_height(h, style.height, &frame, footprint);
    let prism = Prism::new(&frame, footprint.0, footprint.1, height);

    draw_prism(canvas, &prism, style.base, style.roof, lighting);

    if style.height >= WINDOW_MIN_HEIGHT {
        draw_windows(canvas, &prism, style.accent, lighting, rng);
    }

    match style.shape {
        ShapeClass::Utility => {
            // Stack rising from the back half of the roof
            let anchor = prism.top.at(0.3, 0.3);
            let stack_frame = frame.at(anchor);
            let stack_h = (height * 0.6).min((anchor.1 - 1.0).max(0.0));
            let stack = Prism::new(&stack_frame, 0.18, 0.18, stack_h);
            draw_prism(canvas, &stack, darken(style.accent, 0.2), style.accent, lighting);
        }
        ShapeClass::Special => {
            let anchor = prism.top.center();
            let spire_frame = frame.at(anchor);
            let spire_h = (height * 0.35).min((anchor.1 - 1.0).max(0.0));
            let spire = Prism::new(&spire_frame, 0.35, 0.35, spire_h);
            draw_prism(canvas, &spire, style.accent, style.accent, lighting);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CellRect;
    use crate::style::resolve_style;
    use image::RgbaImage;

    #[test]
    fn test_full_footprint_spans_tile_diamond() {
        let frame = IsoFrame::for_tile(64.0, 64.0);
        let quad = frame.ground(1.0, 1.0);
        assert_eq!(quad.back, (32.0, 32.0));
        assert_eq!(quad.right, (64.0, 48.0));
        assert_eq!(quad.front, (32.0, 64.0));
        assert_eq!(quad.left, (0.0, 48.0));
    }

    #[test]
    fn test_quad_at_corners() {
        let quad = IsoFrame::for_tile(64.0, 64.0).ground(1.0, 1.0);
        assert_eq!(quad.at(0.0, 0.0), quad.back);
        assert_eq!(quad.at(1.0, 0.0), quad.right);
        assert_eq!(quad.at(0.0, 1.0), quad.left);
        assert_eq!(quad.at(1.0, 1.0), quad.front);
    }

    #[test]
    fn test_prism_height_formula_and_clamp() {
        let frame = IsoFrame::for_tile(64.0, 64.0);
        let h = prism_height(64.0, 1.0, &frame, (0.8, 0.8));
        assert!((h - 64.0 * 0.18).abs() < 1e-4);

        let tall = prism_height(64.0, 10.0, &frame, (0.8, 0.8));
        let back_y = frame.ground(0.8, 0.8).back.1;
        assert!(tall <= back_y - 1.0 + 1e-4);
    }

    #[test]
    fn test_face_shading() {
        let mut image = RgbaImage::new(64, 64);
        let mut canvas = CellCanvas::new(&mut image, CellRect::new(0, 0, 64, 64));
        let style = resolve_style("house_small");
        let frame = IsoFrame::for_tile(64.0, 64.0);
        let prism = Prism::new(&frame, 0.8, 0.8, 12.0);
        draw_prism(&mut canvas, &prism, style.base, style.roof, &Lighting::DEFAULT);

        // Sample well inside each face
        let left = prism.base.left;
        let left_px = canvas.get_pixel((left.0 + 6.0) as u32, (left.1 - 4.0) as u32).unwrap();
        let right = prism.base.right;
        let right_px = canvas.get_pixel((right.0 - 6.0) as u32, (right.1 - 4.0) as u32).unwrap();
        let top = prism.top.center();
        let top_px = canvas.get_pixel(top.0 as u32, top.1 as u32).unwrap();

        assert_eq!(left_px, style.base);
        assert_eq!(right_px, shade(style.base, -0.18));
        assert_eq!(top_px, shade(style.roof, 0.15));
    }

    #[test]
    fn test_windows_follow_rng() {
        let render = |seed: u32| {
            let mut image = RgbaImage::new(128, 128);
            {
                let mut canvas = CellCanvas::new(&mut image, CellRect::new(0, 0, 128, 128));
                let style = resolve_style("office_high");
                draw_structure(&mut canvas, &style, &Lighting::DEFAULT, &mut Rng::new(seed));
            }
            image
        };
        assert_eq!(render(3), render(3));
    }
}
