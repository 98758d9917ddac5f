//! Unit conversion utilities.
//!
//! Converters between the measurement units used by presentation markup
//! (EMU, 1000ths of a percent, 60000ths of a degree, centipoints) and the
//! units the output DOM works in (CSS pixels at 96 DPI, decimal ratios,
//! degrees, points).

pub const EMUS_PER_INCH: i64 = 914_400;

/// DPI assumed by the output DOM.
pub const RENDER_DPI: f64 = 96.0;

/// Percentage values are expressed in 1000ths of a percent (100000 = 100%).
pub const PCT_UNITS_PER_ONE: f64 = 100_000.0;

/// Angles are expressed in 60000ths of a degree (5400000 = 90 degrees).
pub const ANGLE_UNITS_PER_DEG: f64 = 60_000.0;

/// Convert EMUs to CSS pixels at 96 DPI.
#[inline]
pub fn emu_to_px(emu: f64) -> f64 {
    emu * RENDER_DPI / EMUS_PER_INCH as f64
}

/// Convert a 1000ths-of-a-percent value to a decimal ratio (100000 -> 1.0).
#[inline]
pub fn pct_to_ratio(value: f64) -> f64 {
    value / PCT_UNITS_PER_ONE
}

/// Convert a 60000ths-of-a-degree angle to degrees (5400000 -> 90.0).
#[inline]
pub fn angle_to_deg(value: f64) -> f64 {
    value / ANGLE_UNITS_PER_DEG
}

/// Convert a centipoint font size (`sz` attribute) to points (1800 -> 18.0).
#[inline]
pub fn centipt_to_pt(value: f64) -> f64 {
    value / 100.0
}
