//! 3- and 4-component vectors.
//!
//! These are plain nalgebra column vectors. `Vec4` only shows up as the
//! homogeneous intermediate of `Matrix4x4` products: `w = 1` for points,
//! `w = 0` for directions.

use crate::float_types::{Real, tolerance};
use nalgebra::{Vector3, Vector4};

pub type Vec3 = Vector3<Real>;
pub type Vec4 = Vector4<Real>;

#[inline]
pub fn vec3(x: Real, y: Real, z: Real) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Lift a point to homogeneous coordinates (`w = 1`).
#[inline]
pub fn point4(p: Vec3) -> Vec4 {
    p.push(1.0)
}

/// Lift a direction to homogeneous coordinates (`w = 0`), so translation
/// has no effect on it.
#[inline]
pub fn direction4(v: Vec3) -> Vec4 {
    v.push(0.0)
}

/// Returns `v` scaled to unit length, or `None` when its length is within
/// [`tolerance`] of zero.
#[inline]
pub fn try_unit(v: Vec3) -> Option<Vec3> {
    v.try_normalize(tolerance())
}
