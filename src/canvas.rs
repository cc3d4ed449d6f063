//! Cell-scoped drawing surface
//!
//! A [`CellCanvas`] borrows a sheet image and exposes only one cell's
//! rectangle. All coordinates are cell-local; anything outside the rectangle
//! is clipped, so a renderer can never bleed into its neighbours.

use crate::shapes::{
    rasterize_circle, rasterize_polygon, rasterize_rect, rasterize_thick_line, Point,
};
use image::{Rgba, RgbaImage};
use std::collections::HashSet;

/// Transparent color used for clearing
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Pixel rectangle of one cell within a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CellRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Mutable view of a single cell inside a sheet image.
pub struct CellCanvas<'a> {
    image: &'a mut RgbaImage,
    rect: CellRect,
}

impl<'a> CellCanvas<'a> {
    /// Create a canvas over `rect`, shrunk to fit inside the image.
    pub fn new(image: &'a mut RgbaImage, rect: CellRect) -> Self {
        let x = rect.x.min(image.width());
        let y = rect.y.min(image.height());
        let width = rect.width.min(image.width() - x);
        let height = rect.height.min(image.height() - y);
        Self { image, rect: CellRect { x, y, width, height } }
    }

    pub fn width(&self) -> u32 {
        self.rect.width
    }

    pub fn height(&self) -> u32 {
        self.rect.height
    }

    /// Sheet-space rectangle this canvas paints into.
    pub fn rect(&self) -> CellRect {
        self.rect
    }

    /// Reset every pixel of the cell to transparent.
    pub fn clear(&mut self) {
        self.fill(TRANSPARENT);
    }

    /// Overwrite every pixel of the cell with `color` (no blending).
    pub fn fill(&mut self, color: Rgba<u8>) {
        for y in 0..self.rect.height {
            for x in 0..self.rect.width {
                self.image.put_pixel(self.rect.x + x, self.rect.y + y, color);
            }
        }
    }

    /// Read a cell-local pixel.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.rect.width && y < self.rect.height {
            Some(*self.image.get_pixel(self.rect.x + x, self.rect.y + y))
        } else {
            None
        }
    }

    /// Blend `color` over a set of cell-local pixels.
    pub fn paint(&mut self, pixels: &HashSet<(i32, i32)>, color: Rgba<u8>) {
        self.paint_where(pixels, color, false);
    }

    /// Blend `color` only over pixels that already hold something.
    ///
    /// Used by overlays so stains and scaffolding stay on the sprite.
    pub fn paint_masked(&mut self, pixels: &HashSet<(i32, i32)>, color: Rgba<u8>) {
        self.paint_where(pixels, color, true);
    }

    fn paint_where(&mut self, pixels: &HashSet<(i32, i32)>, color: Rgba<u8>, masked: bool) {
        if color[3] == 0 {
            return;
        }
        let src_alpha = color[3] as f32 / 255.0;
        let (w, h) = (self.rect.width as i32, self.rect.height as i32);

        for &(x, y) in pixels {
            if x < 0 || y < 0 || x >= w || y >= h {
                continue;
            }
            let sx = self.rect.x + x as u32;
            let sy = self.rect.y + y as u32;
            let dst = *self.image.get_pixel(sx, sy);
            if masked && dst[3] == 0 {
                continue;
            }
            self.image.put_pixel(sx, sy, blend_over(color, dst, src_alpha));
        }
    }

    pub fn fill_polygon(&mut self, points: &[Point], color: Rgba<u8>) {
        self.paint(&rasterize_polygon(points), color);
    }

    /// Stroke the closed outline of a polygon.
    pub fn stroke_polygon(&mut self, points: &[Point], color: Rgba<u8>) {
        let mut outline = HashSet::new();
        for i in 0..points.len() {
            let next = points[(i + 1) % points.len()];
            outline.extend(rasterize_thick_line(points[i], next, 1));
        }
        self.paint(&outline, color);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
        let pixels =
            rasterize_rect(x.round() as i32, y.round() as i32, w.round() as i32, h.round() as i32);
        self.paint(&pixels, color);
    }

    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba<u8>) {
        self.paint(&rasterize_circle(center, radius), color);
    }

    pub fn line(&mut self, from: Point, to: Point, thickness: i32, color: Rgba<u8>) {
        self.paint(&rasterize_thick_line(from, to, thickness), color);
    }

    /// Bounding box `(x, y, w, h)` of the non-transparent pixels, if any.
    pub fn opaque_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..self.rect.height {
            for x in 0..self.rect.width {
                if self.image.get_pixel(self.rect.x + x, self.rect.y + y)[3] == 0 {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
        bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
    }
}

/// Porter-Duff "source over" for a single pixel.
pub(crate) fn blend_over(src: Rgba<u8>, dst: Rgba<u8>, src_alpha: f32) -> Rgba<u8> {
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);

    if out_alpha == 0.0 {
        return TRANSPARENT;
    }

    let composite = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let result = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (result.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        composite(src[0], dst[0]),
        composite(src[1], dst[1]),
        composite(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
