//! Rotation quaternions, scalar first.

use crate::errors::KernelError;
use crate::float_types::{Real, tolerance};
use crate::matrix3::Matrix3x3;
use crate::vector::{Vec3, try_unit};
use nalgebra::Quaternion;
use std::fmt;

/// Quaternion `s + xi + yj + zk`.
///
/// Rotations are represented by unit quaternions. The constructors below
/// always return unit quaternions, nothing renormalizes afterwards: drift from
/// long chains of products is the caller's to correct with [`Quat::normalized`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub s: Real,
    pub x: Real,
    pub y: Real,
    pub z: Real,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        s: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(s: Real, x: Real, y: Real, z: Real) -> Self {
        Quat { s, x, y, z }
    }

    /// Rotation of `angle` radians about `axis`:
    /// `s = cos(θ/2)`, `(x, y, z) = sin(θ/2)·normalize(axis)`.
    pub fn from_axis_angle(axis: Vec3, angle: Real) -> Result<Self, KernelError> {
        let axis = try_unit(axis).ok_or(KernelError::InvalidArgument {
            axis: [axis.x, axis.y, axis.z],
        })?;
        let (sin, cos) = (angle * 0.5).sin_cos();
        let v = axis * sin;
        Ok(Quat::new(cos, v.x, v.y, v.z))
    }

    /// Same rotation as [`Matrix3x3::from_euler_zyx`], built directly from the
    /// half angles as `qz(yaw) · qy(pitch) · qx(roll)`.
    pub fn from_euler_zyx(yaw: Real, pitch: Real, roll: Real) -> Self {
        let (sy, cy) = (yaw * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sr, cr) = (roll * 0.5).sin_cos();

        Quat::new(
            cr * cp * cy + sr * sp * sy,
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
        )
    }

    /// Quaternion of the rotation matrix `m`, see [`Matrix3x3::to_quat`].
    pub fn from_matrix3x3(m: &Matrix3x3) -> Self {
        m.to_quat()
    }

    /// Rotation matrix of `self`.
    ///
    /// Only meaningful for unit quaternions; a non-unit input yields a matrix
    /// that also scales.
    pub fn to_matrix3x3(&self) -> Matrix3x3 {
        let Quat { s, x, y, z } = *self;
        if (self.norm_squared() - 1.0).abs() > tolerance().max(1e-9) * 10.0 {
            log::debug!("converting non-unit quaternion {self} to a rotation matrix");
        }

        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (sx, sy, sz) = (s * x, s * y, s * z);

        Matrix3x3::new([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - sz), 2.0 * (xz + sy)],
            [2.0 * (xy + sz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - sx)],
            [2.0 * (xz - sy), 2.0 * (yz + sx), 1.0 - 2.0 * (xx + yy)],
        ])
    }

    #[inline]
    pub fn dot(a: Quat, b: Quat) -> Real {
        a.s * b.s + a.x * b.x + a.y * b.y + a.z * b.z
    }

    #[inline]
    pub fn norm_squared(&self) -> Real {
        Quat::dot(*self, *self)
    }

    #[inline]
    pub fn norm(&self) -> Real {
        self.norm_squared().sqrt()
    }

    #[must_use]
    pub fn normalized(&self) -> Quat {
        let n = self.norm();
        Quat::new(self.s / n, self.x / n, self.y / n, self.z / n)
    }

    /// The inverse rotation, for unit quaternions.
    #[must_use]
    pub fn conjugate(&self) -> Quat {
        Quat::new(self.s, -self.x, -self.y, -self.z)
    }

    /// Rotates `v` by `self` (`q · (0, v) · q*`).
    pub fn rotate_vector(&self, v: Vec3) -> Vec3 {
        let s = self.s;
        let u = Vec3::new(self.x, self.y, self.z);
        v * (s * s - u.dot(&u)) + u * (2.0 * u.dot(&v)) + u.cross(&v) * (2.0 * s)
    }
}

impl From<Quaternion<Real>> for Quat {
    fn from(q: Quaternion<Real>) -> Self {
        Quat::new(q.w, q.i, q.j, q.k)
    }
}

impl From<Quat> for Quaternion<Real> {
    fn from(q: Quat) -> Self {
        Quaternion::new(q.s, q.x, q.y, q.z)
    }
}

/// Hamilton product. `a * b` applies `b` first, then `a`.
impl std::ops::Mul for Quat {
    type Output = Quat;

    fn mul(self, rhs: Quat) -> Self::Output {
        let (a, b) = (self, rhs);
        Quat::new(
            a.s * b.s - a.x * b.x - a.y * b.y - a.z * b.z,
            a.s * b.x + a.x * b.s + a.y * b.z - a.z * b.y,
            a.s * b.y - a.x * b.z + a.y * b.s + a.z * b.x,
            a.s * b.z + a.x * b.y - a.y * b.x + a.z * b.s,
        )
    }
}

impl std::ops::MulAssign for Quat {
    fn mul_assign(&mut self, rhs: Quat) {
        *self = *self * rhs
    }
}

impl std::ops::Mul<Vec3> for Quat {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate_vector(rhs)
    }
}

impl std::ops::Neg for Quat {
    type Output = Quat;

    fn neg(self) -> Self::Output {
        Quat::new(-self.s, -self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s = {:.6}, x = {:.6}, y = {:.6}, z = {:.6}",
            self.s, self.x, self.y, self.z
        )
    }
}

impl approx::AbsDiffEq for Quat {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        Real::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.s, &other.s, epsilon)
            && approx::AbsDiffEq::abs_diff_eq(&self.x, &other.x, epsilon)
            && approx::AbsDiffEq::abs_diff_eq(&self.y, &other.y, epsilon)
            && approx::AbsDiffEq::abs_diff_eq(&self.z, &other.z, epsilon)
    }
}

impl approx::RelativeEq for Quat {
    fn default_max_relative() -> Self::Epsilon {
        Real::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        approx::RelativeEq::relative_eq(&self.s, &other.s, epsilon, max_relative)
            && approx::RelativeEq::relative_eq(&self.x, &other.x, epsilon, max_relative)
            && approx::RelativeEq::relative_eq(&self.y, &other.y, epsilon, max_relative)
            && approx::RelativeEq::relative_eq(&self.z, &other.z, epsilon, max_relative)
    }
}
