//! A small **affine transform kernel** built on [nalgebra](https://nalgebra.org):
//! 4x4 homogeneous matrices, 3x3 rotation matrices and unit quaternions, with
//! the operations needed to compose, decompose and invert
//! Translation · Rotation · Scale transforms.
//!
//! # Types
//! - [`Vec3`] / [`Vec4`]: nalgebra column vectors of [`Real`](float_types::Real)
//! - [`Matrix3x3`]: rotation, or rotation with scaled columns
//! - [`Quat`]: unit quaternion, scalar first
//! - [`Matrix4x4`]: homogeneous transform, `T · R · S` when affine
//!
//! # Conventions
//! - Angles are radians everywhere in the kernel. Convert degrees with
//!   [`float_types::to_radians`] at the call site.
//! - Points are transformed with `w = 1`, directions with `w = 0`.
//! - "≈" comparisons use [`float_types::tolerance`], `1e-6` unless overridden.
//!
//! # Example
//! ```
//! use trskit::{Matrix3x3, Matrix4x4, vec3};
//!
//! let r = Matrix3x3::rotation_axis_angle(vec3(0.0, 0.0, 1.0), std::f64::consts::FRAC_PI_2).unwrap();
//! let m = Matrix4x4::from_trs(vec3(10.0, 0.0, 0.0), r, vec3(2.0, 2.0, 2.0));
//! let p = m.transform_point(vec3(1.0, 0.0, 0.0));
//! assert!((p - vec3(10.0, 2.0, 0.0)).norm() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod matrix3;
pub mod matrix4;
pub mod quat;
pub mod session;
pub mod traits;
pub mod vector;

pub use errors::KernelError;
pub use matrix3::Matrix3x3;
pub use matrix4::Matrix4x4;
pub use quat::Quat;
pub use traits::Transform;
pub use vector::{Vec3, Vec4, vec3};
