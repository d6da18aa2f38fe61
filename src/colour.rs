//! Scalar-to-colour mapping and the status pixel's palette.
//!
//! Both input channels deliver a single scalar per sample. It is saturated to
//! `[0.0, 1.0]` and rendered on a linear red→blue gradient with the green
//! channel always off: `0.0` is pure red, `1.0` pure blue.

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

// ── Palette ────────────────────────────────────────────────────

pub const RED: Rgb = (255, 0, 0);
pub const GREEN: Rgb = (0, 255, 0);
pub const BLUE: Rgb = (0, 0, 255);
pub const YELLOW: Rgb = (255, 255, 0);
pub const BLACK: Rgb = (0, 0, 0);

/// Saturate `value` to `[0.0, 1.0]`.
///
/// NaN is passed through untouched; the float-to-int casts in
/// [`map_value_to_colour`] then saturate it to zero.
pub fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Map a scalar onto the red↔blue gradient.
///
/// `R = round((1 − v) · 255)`, `G = 0`, `B = round(v · 255)` with `v` clamped
/// to the unit interval first. Never fails.
pub fn map_value_to_colour(value: f32) -> Rgb {
    let v = clamp_unit(value);
    let red = ((1.0 - v) * 255.0).round() as u8;
    let blue = (v * 255.0).round() as u8;
    (red, 0, blue)
}
