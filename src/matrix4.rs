//! 4x4 homogeneous transform matrix with TRS compose / decompose.
//!
//! An affine matrix built as `T · R · S` has the layout
//!
//! ```text
//! | R·diag(s)  t |
//! | 0  0  0    1 |
//! ```
//!
//! The upper-left 3x3 block is the rotation-scale block, column 3 (rows 0..3)
//! is the translation and row 3 is `[0 0 0 1]`. Projective matrices (any other
//! bottom row) can be multiplied and indexed, but the operations that take the
//! TRS structure apart either fail with [`KernelError::NotAffine`] or read the
//! blocks as-is, as documented on each method.

use crate::errors::KernelError;
use crate::float_types::{Real, nearly, tolerance};
use crate::matrix3::Matrix3x3;
use crate::quat::Quat;
use crate::vector::{Vec3, Vec4, direction4, point4};
use nalgebra::Matrix4;
use std::fmt;

/// 4x4 matrix, addressed as `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4x4 {
    pub(crate) inner: Matrix4<Real>,
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4x4 {
    /// Build from rows: `rows[r][c]` lands at `(r, c)`.
    pub fn new(rows: [[Real; 4]; 4]) -> Self {
        Matrix4x4 {
            inner: Matrix4::from_fn(|r, c| rows[r][c]),
        }
    }

    pub fn identity() -> Self {
        Matrix4x4 {
            inner: Matrix4::identity(),
        }
    }

    /// Element at `(row, col)`.
    ///
    /// # Panics
    /// If `row` or `col` is not in `0..4`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> Real {
        assert!(row < 4 && col < 4, "Matrix4x4 index ({row}, {col}) out of range");
        self.inner[(row, col)]
    }

    /// Mutable element at `(row, col)`.
    ///
    /// # Panics
    /// If `row` or `col` is not in `0..4`.
    #[inline]
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut Real {
        assert!(row < 4 && col < 4, "Matrix4x4 index ({row}, {col}) out of range");
        &mut self.inner[(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Real) {
        *self.at_mut(row, col) = value;
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Matrix4x4 {
            inner: self.inner.transpose(),
        }
    }

    /// Standard matrix product `self · rhs`.
    pub fn multiply(&self, rhs: &Matrix4x4) -> Matrix4x4 {
        Matrix4x4 {
            inner: self.inner * rhs.inner,
        }
    }

    /// Homogeneous product `self · v`.
    pub fn multiply_vec4(&self, v: Vec4) -> Vec4 {
        self.inner * v
    }

    /// The bottom row `[p0 p1 p2 p3]`.
    pub fn bottom_row(&self) -> [Real; 4] {
        [
            self.inner[(3, 0)],
            self.inner[(3, 1)],
            self.inner[(3, 2)],
            self.inner[(3, 3)],
        ]
    }

    /// `true` iff the bottom row is `[0 0 0 1]`, each entry within [`tolerance`].
    pub fn is_affine(&self) -> bool {
        let [p0, p1, p2, p3] = self.bottom_row();
        nearly(p0, 0.0) && nearly(p1, 0.0) && nearly(p2, 0.0) && nearly(p3, 1.0)
    }

    /// Returns `Ok(())` for affine matrices and [`KernelError::NotAffine`] otherwise.
    pub fn ensure_affine(&self) -> Result<(), KernelError> {
        if self.is_affine() {
            Ok(())
        } else {
            Err(KernelError::NotAffine {
                bottom_row: self.bottom_row(),
            })
        }
    }

    /// Transforms the point `p` as `(x, y, z, 1)`.
    ///
    /// When the resulting `w` is neither ~0 nor ~1 the result is divided by
    /// `w` (perspective divide). With `w` ~0 the point went to infinity and
    /// `(x, y, z)` is returned undivided.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let r = self.multiply_vec4(point4(p));
        if !nearly(r.w, 0.0) && !nearly(r.w, 1.0) {
            r.xyz() / r.w
        } else {
            r.xyz()
        }
    }

    /// Transforms the direction `v` as `(x, y, z, 0)`: translation has no
    /// effect and the resulting `w` is ignored.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.multiply_vec4(direction4(v)).xyz()
    }

    /// Identity with `t` in column 3.
    pub fn translate(t: Vec3) -> Matrix4x4 {
        let mut m = Matrix4x4::identity();
        m.set_translation(t);
        m
    }

    /// Identity with `s` on the first three diagonal entries.
    pub fn scale(s: Vec3) -> Matrix4x4 {
        let mut m = Matrix4x4::identity();
        m.inner[(0, 0)] = s.x;
        m.inner[(1, 1)] = s.y;
        m.inner[(2, 2)] = s.z;
        m
    }

    /// Identity with the upper-left block replaced by the rotation.
    ///
    /// Takes a [`Matrix3x3`] or a [`Quat`].
    pub fn rotate(r: impl Into<Matrix3x3>) -> Matrix4x4 {
        let mut m = Matrix4x4::identity();
        m.set_rotation_scale(&r.into());
        m
    }

    /// **Compose `T · R · S`**
    ///
    /// Starts from [`Matrix4x4::rotate`], scales column `j` of the
    /// rotation block by `s[j]`, then writes `t` into column 3. Applied to a
    /// point it scales, then rotates, then translates.
    ///
    /// Takes the rotation as a [`Matrix3x3`] or a [`Quat`].
    pub fn from_trs(t: Vec3, r: impl Into<Matrix3x3>, s: Vec3) -> Matrix4x4 {
        let mut m = Matrix4x4::rotate(r);
        let rs = m.get_rotation_scale().scale_columns(s);
        m.set_rotation_scale(&rs);
        m.set_translation(t);
        m
    }

    /// Column 3, rows 0..3.
    pub fn get_translation(&self) -> Vec3 {
        self.inner.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// The upper-left 3x3 block as stored, rotation and scale together.
    pub fn get_rotation_scale(&self) -> Matrix3x3 {
        Matrix3x3::from(self.inner.fixed_view::<3, 3>(0, 0).into_owned())
    }

    /// Per-axis scale: the Euclidean norm of each of the first three columns
    /// (rows 0..3).
    ///
    /// Always non-negative. A reflection (negative scale) cannot be told apart
    /// from a rotation here and comes back as positive scale.
    pub fn get_scale(&self) -> Vec3 {
        self.get_rotation_scale().column_norms()
    }

    /// The rotation-scale block with each column normalized to unit length.
    ///
    /// A column whose norm is within [`tolerance`] of zero carries no
    /// direction. It is replaced by the matching identity column so the
    /// result stays usable by [`Matrix4x4::set_scale`].
    pub fn get_rotation(&self) -> Matrix3x3 {
        let rs = self.get_rotation_scale();
        let norms = rs.column_norms();
        let mut r = rs;
        for j in 0..3 {
            if norms[j] > tolerance() {
                r.set_column(j, rs.column(j) / norms[j]);
            } else {
                log::debug!("column {j} of the rotation-scale block is degenerate, using the basis axis");
                r.set_column(j, Vec3::ith(j, 1.0));
            }
        }
        r
    }

    /// [`Matrix4x4::get_rotation`] as a quaternion.
    pub fn get_rotation_quat(&self) -> Quat {
        self.get_rotation().to_quat()
    }

    /// Writes `t` into column 3, rows 0..3. Nothing else changes.
    pub fn set_translation(&mut self, t: Vec3) {
        self.inner.fixed_view_mut::<3, 1>(0, 3).copy_from(&t);
    }

    /// Keeps the current rotation and replaces the scale with `s`.
    pub fn set_scale(&mut self, s: Vec3) {
        let rs = self.get_rotation().scale_columns(s);
        self.set_rotation_scale(&rs);
    }

    /// Keeps the current scale and replaces the rotation.
    ///
    /// Takes a [`Matrix3x3`] or a [`Quat`].
    pub fn set_rotation(&mut self, r: impl Into<Matrix3x3>) {
        let s = self.get_scale();
        let rs = r.into().scale_columns(s);
        self.set_rotation_scale(&rs);
    }

    /// Overwrites the upper-left 3x3 block. Row 3 and column 3 are untouched.
    pub fn set_rotation_scale(&mut self, rs: &Matrix3x3) {
        self.inner.fixed_view_mut::<3, 3>(0, 0).copy_from(&rs.inner);
    }

    /// Splits an affine matrix into `(t, R, s)` with
    /// `from_trs(t, R, s) ≈ self` whenever the block holds a rotation and
    /// positive scale.
    pub fn try_decompose(&self) -> Result<(Vec3, Matrix3x3, Vec3), KernelError> {
        self.ensure_affine()?;
        Ok((self.get_translation(), self.get_rotation(), self.get_scale()))
    }

    /// **Rigid inverse**
    ///
    /// Treats the upper-left block as a pure rotation `R`:
    /// `R⁻¹ = Rᵀ`, `t⁻¹ = -Rᵀ·t`. Exact for matrices built with unit scale;
    /// with any other scale the result is not an inverse.
    pub fn inverse_tr(&self) -> Result<Matrix4x4, KernelError> {
        self.ensure_affine()?;
        let r_inv = self.get_rotation_scale().transpose();
        let t_inv = -(r_inv * self.get_translation());
        Ok(Matrix4x4::from_trs(t_inv, r_inv, Vec3::repeat(1.0)))
    }

    /// **TRS inverse**
    ///
    /// For `M = T·R·S` with no zero scale component,
    /// `M⁻¹ = S⁻¹·Rᵀ·T⁻¹`: the linear block is `diag(1/s)·Rᵀ` and the
    /// translation is `-(diag(1/s)·Rᵀ)·t`.
    pub fn inverse_trs(&self) -> Result<Matrix4x4, KernelError> {
        self.ensure_affine()?;
        let s = self.get_scale();
        if s.iter().any(|c| *c <= tolerance()) {
            return Err(KernelError::DegenerateScale {
                scale: [s.x, s.y, s.z],
            });
        }
        let s_inv = s.map(|c| 1.0 / c);
        let linear = self.get_rotation().transpose().scale_rows(s_inv);
        let t_inv = -(linear * self.get_translation());

        let mut m = Matrix4x4::identity();
        m.set_rotation_scale(&linear);
        m.set_translation(t_inv);
        Ok(m)
    }

    /// `true` when every element is within [`tolerance`] of the matching one in `other`.
    pub fn nearly_eq(&self, other: &Matrix4x4) -> bool {
        self.inner
            .iter()
            .zip(other.inner.iter())
            .all(|(a, b)| nearly(*a, *b))
    }
}

impl From<Matrix4<Real>> for Matrix4x4 {
    fn from(inner: Matrix4<Real>) -> Self {
        Matrix4x4 { inner }
    }
}

impl From<Matrix4x4> for Matrix4<Real> {
    fn from(m: Matrix4x4) -> Self {
        m.inner
    }
}

impl std::ops::Mul for Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl std::ops::MulAssign for Matrix4x4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs
    }
}

impl std::ops::Mul<Vec4> for Matrix4x4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Self::Output {
        self.multiply_vec4(rhs)
    }
}

impl fmt::Display for Matrix4x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            writeln!(
                f,
                "[{:.6} {:.6} {:.6} {:.6}]",
                self.inner[(r, 0)],
                self.inner[(r, 1)],
                self.inner[(r, 2)],
                self.inner[(r, 3)]
            )?;
        }
        Ok(())
    }
}

impl approx::AbsDiffEq for Matrix4x4 {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        <Matrix4<Real> as approx::AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.inner, &other.inner, epsilon)
    }
}

impl approx::RelativeEq for Matrix4x4 {
    fn default_max_relative() -> Self::Epsilon {
        <Matrix4<Real> as approx::RelativeEq>::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        approx::RelativeEq::relative_eq(&self.inner, &other.inner, epsilon, max_relative)
    }
}
