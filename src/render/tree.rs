//! Trees: trunk rectangle, two-circle canopy, highlight

use crate::canvas::CellCanvas;
use crate::color::{shade, with_alpha};
use crate::seed::Rng;
use crate::shapes::Point;
use crate::style::SpriteStyle;
use image::Rgba;

const SHADOW: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Draw a tree standing on `ground`, sized relative to `size` pixels.
///
/// Uses the style's base as trunk, roof as canopy and accent as highlight.
pub fn draw_tree(
    canvas: &mut CellCanvas<'_>,
    style: &SpriteStyle,
    ground: Point,
    size: f32,
    rng: &mut Rng,
) {
    let (gx, gy) = ground;
    let canopy = shade(style.roof, rng.range(-0.06, 0.06));

    // Soft contact shadow
    canvas.fill_circle((gx, gy - size * 0.01), size * 0.07, with_alpha(SHADOW, 0.18));

    let trunk_w = size * 0.07;
    let trunk_h = size * 0.18;
    canvas.fill_rect(gx - trunk_w / 2.0, gy - trunk_h, trunk_w, trunk_h, style.base);

    canvas.fill_circle((gx, gy - size * 0.26), size * 0.16, canopy);
    canvas.fill_circle((gx + size * 0.08, gy - size * 0.2), size * 0.12, shade(canopy, -0.12));
    canvas.fill_circle((gx - size * 0.05, gy - size * 0.3), size * 0.06, style.accent);
}

/// Draw a single tree filling its cell.
pub fn draw_tree_cell(canvas: &mut CellCanvas<'_>, style: &SpriteStyle, rng: &mut Rng) {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    let size = w.min(h);
    draw_tree(canvas, style, (w / 2.0, h * 0.86), size, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CellRect;
    use crate::style::resolve_style;
    use image::RgbaImage;

    #[test]
    fn test_tree_occupies_lower_part_of_cell() {
        let mut image = RgbaImage::new(32, 32);
        let mut canvas = CellCanvas::new(&mut image, CellRect::new(0, 0, 32, 32));
        draw_tree_cell(&mut canvas, &resolve_style("tree"), &mut Rng::new(1));

        let (_, y, _, h) = canvas.opaque_bounds().expect("tree drew nothing");
        assert!(y as f32 >= 32.0 * 0.4, "canopy starts at row {}", y);
        assert!(y + h <= 32);
        assert_eq!(canvas.get_pixel(0, 0).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_trunk_uses_base_color() {
        let style = resolve_style("tree");
        let mut image = RgbaImage::new(64, 64);
        let mut canvas = CellCanvas::new(&mut image, CellRect::new(0, 0, 64, 64));
        draw_tree_cell(&mut canvas, &style, &mut Rng::new(1));
        // Just above the ground point, below every canopy circle
        let px = canvas.get_pixel(32, (64.0 * 0.86 - 2.5) as u32).unwrap();
        assert_eq!(px, style.base);
    }
}
