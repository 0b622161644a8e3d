// Our Real scalar type. The kernel is double precision only.
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used across the crate.
/// Defaults to `1e-6`, the tolerance `Matrix4x4::is_affine` applies to each
/// bottom-row entry, but can be overridden:
///  1) **Build-time**: set env var `TRSKIT_TOLERANCE` (e.g. `TRSKIT_TOLERANCE=1e-9 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

/// Tolerance applied when no override is configured.
pub const DEFAULT_TOLERANCE: Real = 1e-6;

/// Returns the current tolerance value.
/// If not set yet, it tries `TRSKIT_TOLERANCE` (parsed as `Real`) and
/// falls back to [`DEFAULT_TOLERANCE`].
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided
        if let Some(environment_variable) = option_env!("TRSKIT_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        DEFAULT_TOLERANCE
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `trskit::float_types::set_tolerance(1e-9);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Returns `true` when `a` and `b` differ by at most [`tolerance`].
#[inline]
pub fn nearly(a: Real, b: Real) -> bool {
    (a - b).abs() <= tolerance()
}

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Angle conversion
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
pub const DEG_TO_RAD: Real = PI / 180.0;
pub const RAD_TO_DEG: Real = 180.0 / PI;

#[inline]
pub const fn to_radians(degrees: Real) -> Real {
    degrees * DEG_TO_RAD
}

#[inline]
pub const fn to_degrees(radians: Real) -> Real {
    radians * RAD_TO_DEG
}
