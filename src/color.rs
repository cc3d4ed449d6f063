//! Color utilities for sprite palettes
//!
//! Supports hex parsing (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`) and the small
//! set of channel operations the shading model needs.

use image::Rgba;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Build an opaque color from a `0xRRGGBB` literal.
pub const fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
}

/// Parse a hex color string.
///
/// # Examples
///
/// ```
/// use isosprite::color::parse_hex_color;
///
/// let red = parse_hex_color("#F00").unwrap();
/// assert_eq!(red, image::Rgba([255, 0, 0, 255]));
///
/// let glass = parse_hex_color("#88ccff80").unwrap();
/// assert_eq!(glass, image::Rgba([0x88, 0xcc, 0xff, 0x80]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is empty, lacks the leading `#`, or has
/// the wrong length or non-hex digits.
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    let digits = hex
        .chars()
        .map(parse_hex_digit)
        .collect::<Result<Vec<u8>, ColorError>>()?;

    match digits.len() {
        // #RGB / #RGBA: each digit is doubled
        3 => Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, 255])),
        4 => Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, digits[3] * 17])),
        6 => Ok(Rgba([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            255,
        ])),
        8 => Ok(Rgba([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            digits[6] * 16 + digits[7],
        ])),
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Format a color as `#rrggbb`, or `#rrggbbaa` when not opaque.
pub fn to_hex(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

fn channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Linear interpolation between two colors; alpha is taken from `a`.
pub fn mix(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| channel(x as f32 + (y as f32 - x as f32) * t);
    Rgba([lerp(a[0], b[0]), lerp(a[1], b[1]), lerp(a[2], b[2]), a[3]])
}

/// Move a color toward white by `amount` (0.15 = 15% lighter).
pub fn lighten(color: Rgba<u8>, amount: f32) -> Rgba<u8> {
    mix(color, Rgba([255, 255, 255, color[3]]), amount)
}

/// Scale a color's channels down by `amount` (0.18 = 18% darker).
pub fn darken(color: Rgba<u8>, amount: f32) -> Rgba<u8> {
    let f = (1.0 - amount).clamp(0.0, 1.0);
    Rgba([
        channel(color[0] as f32 * f),
        channel(color[1] as f32 * f),
        channel(color[2] as f32 * f),
        color[3],
    ])
}

/// Apply a signed brightness shift: positive lightens, negative darkens.
pub fn shade(color: Rgba<u8>, amount: f32) -> Rgba<u8> {
    if amount >= 0.0 {
        lighten(color, amount)
    } else {
        darken(color, -amount)
    }
}

/// Replace the alpha channel with `alpha` in `[0, 1]`.
pub fn with_alpha(color: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], channel(alpha.clamp(0.0, 1.0) * 255.0)])
}

/// Pull a color toward its own gray value by `amount`.
pub fn desaturate(color: Rgba<u8>, amount: f32) -> Rgba<u8> {
    let luma = 0.299 * color[0] as f32 + 0.587 * color[1] as f32 + 0.114 * color[2] as f32;
    let gray = channel(luma);
    mix(color, Rgba([gray, gray, gray, color[3]]), amount)
}
