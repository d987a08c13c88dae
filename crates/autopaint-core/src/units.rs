//! Unit conversion utilities
//!
//! Device coordinates are CSS pixels (96 per inch). Polygon offsetting runs in
//! a fixed-precision integer grid so results do not depend on float noise.

/// Device pixels per inch
pub const PX_PER_INCH: f64 = 96.0;

/// Integer grid units per inch used for polygon offsetting
pub const FIXED_UNITS_PER_INCH: f64 = 100_000.0;

/// Quantize a device coordinate onto the fixed-precision grid
pub fn to_fixed(px: f64) -> f64 {
    (px * FIXED_UNITS_PER_INCH / PX_PER_INCH).round()
}

/// Convert a fixed-precision grid value back to device pixels
pub fn from_fixed(units: f64) -> f64 {
    units * PX_PER_INCH / FIXED_UNITS_PER_INCH
}

/// Scale a device distance into grid units without rounding
pub fn distance_to_fixed(px: f64) -> f64 {
    px * FIXED_UNITS_PER_INCH / PX_PER_INCH
}
