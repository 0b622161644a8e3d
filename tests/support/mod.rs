//! Test support library
//! Provides comparison helpers and seeded generators shared by the test files.
#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use trskit::{Matrix3x3, Matrix4x4, Vec3, float_types::Real, vec3};

/// Component tolerance used by the value checks.
pub const TOL: Real = 1e-4;
/// Looser tolerance for `M * M⁻¹ == I` checks.
pub const ROUND_TRIP_TOL: Real = 1e-3;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() <= eps
}

pub fn vec3_eq(a: Vec3, b: Vec3, eps: Real) -> bool {
    (0..3).all(|i| approx_eq(a[i], b[i], eps))
}

pub fn mat3_eq(a: &Matrix3x3, b: &Matrix3x3, eps: Real) -> bool {
    (0..3).all(|i| (0..3).all(|j| approx_eq(a.at(i, j), b.at(i, j), eps)))
}

pub fn mat4_eq(a: &Matrix4x4, b: &Matrix4x4, eps: Real) -> bool {
    (0..4).all(|i| (0..4).all(|j| approx_eq(a.at(i, j), b.at(i, j), eps)))
}

/// The generator every randomized test starts from, so failures reproduce.
pub fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// Uniformly distributed direction, `+X` if the sample lands on the origin.
pub fn rand_unit(rng: &mut ChaCha8Rng) -> Vec3 {
    let v = vec3(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    );
    v.try_normalize(1e-9).unwrap_or(Vec3::x())
}

/// Vector with components in `[-10, 10)`.
pub fn rand_vec(rng: &mut ChaCha8Rng) -> Vec3 {
    vec3(
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
        rng.gen_range(-10.0..10.0),
    )
}

/// Scale with each component's magnitude in `[0.25, 4)` and a random sign
/// when `allow_negative` is set.
pub fn rand_scale(rng: &mut ChaCha8Rng, allow_negative: bool) -> Vec3 {
    Vec3::from_fn(|_, _| {
        let magnitude: Real = rng.gen_range(0.25..4.0);
        if allow_negative && rng.gen_bool(0.5) {
            -magnitude
        } else {
            magnitude
        }
    })
}

/// Random rotation about a random axis.
pub fn rand_rotation(rng: &mut ChaCha8Rng) -> Matrix3x3 {
    let axis = rand_unit(rng);
    let angle = rng.gen_range(-3.0..3.0);
    Matrix3x3::rotation_axis_angle(axis, angle).expect("unit axis")
}
