//! 3x3 rotation / rotation-scale matrix.

use crate::errors::KernelError;
use crate::float_types::{Real, nearly, tolerance};
use crate::quat::Quat;
use crate::vector::{Vec3, try_unit};
use nalgebra::{Matrix3, Rotation3};
use std::fmt;

/// 3x3 matrix, addressed as `(row, col)`.
///
/// Holds either a pure rotation (orthonormal columns, determinant +1) or a
/// rotation whose columns have been scaled. The type does not track which;
/// [`Matrix3x3::is_rotation`] tells them apart when it matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3x3 {
    pub(crate) inner: Matrix3<Real>,
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix3x3 {
    /// Build from rows: `rows[r][c]` lands at `(r, c)`.
    pub fn new(rows: [[Real; 3]; 3]) -> Self {
        Matrix3x3 {
            inner: Matrix3::from_fn(|r, c| rows[r][c]),
        }
    }

    pub fn identity() -> Self {
        Matrix3x3 {
            inner: Matrix3::identity(),
        }
    }

    pub fn zeros() -> Self {
        Matrix3x3 {
            inner: Matrix3::zeros(),
        }
    }

    /// Diagonal matrix `diag(s.x, s.y, s.z)`.
    pub fn from_diagonal(s: Vec3) -> Self {
        Matrix3x3 {
            inner: Matrix3::from_diagonal(&s),
        }
    }

    /// **Rodrigues rotation**
    ///
    /// Right-handed rotation of `angle` radians about `axis`:
    /// `R = I·cosθ + sinθ·[axis]× + (1 - cosθ)·(axis ⊗ axis)`.
    ///
    /// `axis` does not need to be unit length, but it must not be (near) zero.
    pub fn rotation_axis_angle(axis: Vec3, angle: Real) -> Result<Self, KernelError> {
        let axis = try_unit(axis).ok_or(KernelError::InvalidArgument {
            axis: [axis.x, axis.y, axis.z],
        })?;
        let (sin, cos) = angle.sin_cos();
        let inner = Matrix3::identity() * cos
            + axis.cross_matrix() * sin
            + (axis * axis.transpose()) * (1.0 - cos);
        Ok(Matrix3x3 { inner })
    }

    /// Returns `Rz(yaw) · Ry(pitch) · Rx(roll)`, all angles in radians.
    ///
    /// Roll is applied first. At `pitch = ±π/2` yaw and roll act about the same
    /// axis (gimbal lock); the result is still a valid rotation.
    pub fn from_euler_zyx(yaw: Real, pitch: Real, roll: Real) -> Self {
        let rz = Rotation3::from_axis_angle(&Vec3::z_axis(), yaw);
        let ry = Rotation3::from_axis_angle(&Vec3::y_axis(), pitch);
        let rx = Rotation3::from_axis_angle(&Vec3::x_axis(), roll);

        // Compose them in the desired order
        let rot = rz * ry * rx;
        Matrix3x3 {
            inner: rot.into_inner(),
        }
    }

    /// Rotation matrix of the unit quaternion `q`.
    pub fn from_quat(q: &Quat) -> Self {
        q.to_matrix3x3()
    }

    /// Element at `(row, col)`.
    ///
    /// # Panics
    /// If `row` or `col` is not in `0..3`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> Real {
        assert!(row < 3 && col < 3, "Matrix3x3 index ({row}, {col}) out of range");
        self.inner[(row, col)]
    }

    /// Mutable element at `(row, col)`.
    ///
    /// # Panics
    /// If `row` or `col` is not in `0..3`.
    #[inline]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut Real {
        assert!(row < 3 && col < 3, "Matrix3x3 index ({row}, {col}) out of range");
        &mut self.inner[(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Real) {
        *self.at_mut(row, col) = value;
    }

    pub fn column(&self, col: usize) -> Vec3 {
        assert!(col < 3, "Matrix3x3 column {col} out of range");
        self.inner.column(col).into_owned()
    }

    pub fn set_column(&mut self, col: usize, v: Vec3) {
        assert!(col < 3, "Matrix3x3 column {col} out of range");
        self.inner.set_column(col, &v);
    }

    /// Euclidean norm of each column.
    pub fn column_norms(&self) -> Vec3 {
        Vec3::from_fn(|j, _| self.inner.column(j).norm())
    }

    /// Returns `self · diag(s)`: column `j` multiplied by `s[j]`.
    pub fn scale_columns(&self, s: Vec3) -> Self {
        let mut out = *self;
        for j in 0..3 {
            out.inner.column_mut(j).scale_mut(s[j]);
        }
        out
    }

    /// Returns `diag(s) · self`: row `i` multiplied by `s[i]`.
    pub fn scale_rows(&self, s: Vec3) -> Self {
        let mut out = *self;
        for i in 0..3 {
            out.inner.row_mut(i).scale_mut(s[i]);
        }
        out
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Matrix3x3 {
            inner: self.inner.transpose(),
        }
    }

    pub fn determinant(&self) -> Real {
        self.inner.determinant()
    }

    /// `true` when the columns are orthonormal and the determinant is +1.
    pub fn is_rotation(&self) -> bool {
        let gram = self.inner.transpose() * self.inner;
        let tol = tolerance().max(1e-9) * 10.0;
        (gram - Matrix3::identity()).amax() <= tol && (self.determinant() - 1.0).abs() <= tol
    }

    /// `true` when every element is within [`tolerance`] of the matching one in `other`.
    pub fn nearly_eq(&self, other: &Matrix3x3) -> bool {
        self.inner
            .iter()
            .zip(other.inner.iter())
            .all(|(a, b)| nearly(*a, *b))
    }

    pub fn mul_vec3(&self, v: Vec3) -> Vec3 {
        self.inner * v
    }

    /// **Matrix to quaternion (Shepperd)**
    ///
    /// Picks the largest of `s², x², y², z²` from the trace and the diagonal and
    /// divides only by that component, so rotations near 180° stay accurate.
    /// The result is returned with `s >= 0`.
    pub fn to_quat(&self) -> Quat {
        let m = &self.inner;
        let (m00, m11, m22) = (m[(0, 0)], m[(1, 1)], m[(2, 2)]);
        let trace = m00 + m11 + m22;

        let q = if trace > 0.0 {
            let k = (trace + 1.0).sqrt() * 2.0; // k = 4s
            Quat::new(
                0.25 * k,
                (m[(2, 1)] - m[(1, 2)]) / k,
                (m[(0, 2)] - m[(2, 0)]) / k,
                (m[(1, 0)] - m[(0, 1)]) / k,
            )
        } else if m00 > m11 && m00 > m22 {
            let k = (1.0 + m00 - m11 - m22).sqrt() * 2.0; // k = 4x
            Quat::new(
                (m[(2, 1)] - m[(1, 2)]) / k,
                0.25 * k,
                (m[(0, 1)] + m[(1, 0)]) / k,
                (m[(0, 2)] + m[(2, 0)]) / k,
            )
        } else if m11 > m22 {
            let k = (1.0 + m11 - m00 - m22).sqrt() * 2.0; // k = 4y
            Quat::new(
                (m[(0, 2)] - m[(2, 0)]) / k,
                (m[(0, 1)] + m[(1, 0)]) / k,
                0.25 * k,
                (m[(1, 2)] + m[(2, 1)]) / k,
            )
        } else {
            let k = (1.0 + m22 - m00 - m11).sqrt() * 2.0; // k = 4z
            Quat::new(
                (m[(1, 0)] - m[(0, 1)]) / k,
                (m[(0, 2)] + m[(2, 0)]) / k,
                (m[(1, 2)] + m[(2, 1)]) / k,
                0.25 * k,
            )
        };

        if q.s < 0.0 { -q } else { q }
    }
}

impl From<Matrix3<Real>> for Matrix3x3 {
    fn from(inner: Matrix3<Real>) -> Self {
        Matrix3x3 { inner }
    }
}

impl From<Matrix3x3> for Matrix3<Real> {
    fn from(m: Matrix3x3) -> Self {
        m.inner
    }
}

impl From<Quat> for Matrix3x3 {
    fn from(q: Quat) -> Self {
        q.to_matrix3x3()
    }
}

impl From<&Quat> for Matrix3x3 {
    fn from(q: &Quat) -> Self {
        q.to_matrix3x3()
    }
}

impl std::ops::Mul for Matrix3x3 {
    type Output = Matrix3x3;

    fn mul(self, rhs: Self) -> Self::Output {
        Matrix3x3 {
            inner: self.inner * rhs.inner,
        }
    }
}

impl std::ops::Mul<Vec3> for Matrix3x3 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        self.mul_vec3(rhs)
    }
}

impl fmt::Display for Matrix3x3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..3 {
            writeln!(
                f,
                "[{:.6} {:.6} {:.6}]",
                self.inner[(r, 0)],
                self.inner[(r, 1)],
                self.inner[(r, 2)]
            )?;
        }
        Ok(())
    }
}

impl approx::AbsDiffEq for Matrix3x3 {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        <Matrix3<Real> as approx::AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.inner, &other.inner, epsilon)
    }
}

impl approx::RelativeEq for Matrix3x3 {
    fn default_max_relative() -> Self::Epsilon {
        <Matrix3<Real> as approx::RelativeEq>::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        approx::RelativeEq::relative_eq(&self.inner, &other.inner, epsilon, max_relative)
    }
}
