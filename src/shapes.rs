//! Shape rasterization primitives for sprite drawing.
//!
//! This module converts geometric shapes into sets of integer pixel
//! coordinates. Coordinates are local to whatever surface the caller paints
//! on; no clipping happens here.

use std::collections::HashSet;

/// A point in logical pixel space.
pub type Point = (f32, f32);

/// Rasterize a one-pixel line between two integer points (Bresenham).
///
/// Both endpoints are included. Used for roof ridges, window mullions and
/// park markings.
///
/// ```
/// use isosprite::shapes::rasterize_line;
///
/// // A shallow roof ridge running down-right
/// let ridge = rasterize_line((12, 20), (20, 24));
/// assert_eq!(ridge.len(), 9);
/// assert!(ridge.contains(&(12, 20)));
/// assert!(ridge.contains(&(20, 24)));
/// ```
pub fn rasterize_line(from: (i32, i32), to: (i32, i32)) -> HashSet<(i32, i32)> {
    let (mut x, mut y) = from;
    let run = (to.0 - x).abs();
    let rise = (to.1 - y).abs();
    let step_x = (to.0 - x).signum();
    let step_y = (to.1 - y).signum();
    let mut error = run - rise;

    let mut pixels = HashSet::with_capacity(run.max(rise) as usize + 1);
    pixels.insert((x, y));
    while (x, y) != to {
        let doubled = error * 2;
        if doubled >= -rise {
            error -= rise;
            x += step_x;
        }
        if doubled <= run {
            error += run;
            y += step_y;
        }
        pixels.insert((x, y));
    }
    pixels
}

/// Rasterize a line with a square brush of the given thickness.
pub fn rasterize_thick_line(p0: Point, p1: Point, thickness: i32) -> HashSet<(i32, i32)> {
    let core = rasterize_line(round_point(p0), round_point(p1));
    if thickness <= 1 {
        return core;
    }

    let lo = -(thickness - 1) / 2;
    let hi = thickness / 2;
    let mut pixels = HashSet::with_capacity(core.len() * (thickness * thickness) as usize);
    for (x, y) in core {
        for oy in lo..=hi {
            for ox in lo..=hi {
                pixels.insert((x + ox, y + oy));
            }
        }
    }
    pixels
}

/// Rasterize a filled rectangle.
///
/// # Examples
///
/// ```
/// use isosprite::shapes::rasterize_rect;
///
/// let pixels = rasterize_rect(0, 0, 3, 2);
/// assert_eq!(pixels.len(), 6);
/// assert!(pixels.contains(&(2, 1)));
/// ```
pub fn rasterize_rect(x: i32, y: i32, w: i32, h: i32) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    if w <= 0 || h <= 0 {
        return pixels;
    }

    for dy in 0..h {
        for dx in 0..w {
            pixels.insert((x + dx, y + dy));
        }
    }

    pixels
}

/// Rasterize a filled disc around a logical point.
///
/// Covers every pixel whose center lies within `radius` of `center`. A disc
/// too small to cover any center still marks the pixel under it.
pub fn rasterize_circle(center: Point, radius: f32) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();
    let (cx, cy) = center;
    let r = radius.max(0.0);
    if !(cx.is_finite() && cy.is_finite() && r.is_finite()) {
        return pixels;
    }

    let r_sq = r * r;
    for y in (cy - r - 0.5).floor() as i32..=(cy + r).ceil() as i32 {
        let dy = y as f32 + 0.5 - cy;
        for x in (cx - r - 0.5).floor() as i32..=(cx + r).ceil() as i32 {
            let dx = x as f32 + 0.5 - cx;
            if dx * dx + dy * dy <= r_sq {
                pixels.insert((x, y));
            }
        }
    }
    if pixels.is_empty() {
        pixels.insert(round_point(center));
    }
    pixels
}

/// Rasterize a filled polygon with sub-pixel vertices.
///
/// A pixel is covered when its center lies inside the polygon (even-odd rule,
/// half-open spans), so two polygons sharing an edge never double-paint it.
///
/// # Examples
///
/// ```
/// use isosprite::shapes::rasterize_polygon;
///
/// let diamond = [(4.0, 0.0), (8.0, 4.0), (4.0, 8.0), (0.0, 4.0)];
/// let pixels = rasterize_polygon(&diamond);
/// assert!(pixels.contains(&(4, 4)));
/// assert!(pixels.contains(&(1, 4)));
/// assert!(!pixels.contains(&(0, 0)));
/// ```
pub fn rasterize_polygon(vertices: &[Point]) -> HashSet<(i32, i32)> {
    let mut pixels = HashSet::new();

    if vertices.len() < 3 {
        return pixels;
    }

    let min_y = vertices.iter().map(|(_, y)| *y).fold(f32::INFINITY, f32::min);
    let max_y = vertices.iter().map(|(_, y)| *y).fold(f32::NEG_INFINITY, f32::max);
    if !min_y.is_finite() || !max_y.is_finite() {
        return pixels;
    }

    let mut intersections: Vec<f32> = Vec::with_capacity(vertices.len());
    for y in (min_y.floor() as i32)..=(max_y.ceil() as i32) {
        let sample_y = y as f32 + 0.5;
        intersections.clear();

        for i in 0..vertices.len() {
            let (x1, y1) = vertices[i];
            let (x2, y2) = vertices[(i + 1) % vertices.len()];

            // Half-open test skips horizontal edges and counts shared vertices once
            if (y1 <= sample_y && sample_y < y2) || (y2 <= sample_y && sample_y < y1) {
                intersections.push(x1 + (sample_y - y1) * (x2 - x1) / (y2 - y1));
            }
        }

        intersections.sort_by(f32::total_cmp);

        for pair in intersections.chunks(2) {
            if let [start, end] = pair {
                let x_start = (start - 0.5).ceil() as i32;
                let x_end = (end - 0.5).floor() as i32;
                for x in x_start..=x_end {
                    pixels.insert((x, y));
                }
            }
        }
    }

    pixels
}

/// Round a logical point to the nearest pixel.
pub fn round_point(p: Point) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}
