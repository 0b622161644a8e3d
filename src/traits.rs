use crate::errors::KernelError;
use crate::float_types::Real;
use crate::matrix3::Matrix3x3;
use crate::matrix4::Matrix4x4;
use crate::vector::Vec3;

/// Things a [`Matrix4x4`] can act on, plus the elementary transforms built on
/// top of that.
///
/// Every provided method applies its transform *after* whatever `self`
/// already encodes, i.e. it left-multiplies.
pub trait Transform: Sized {
    fn transform(&self, matrix: &Matrix4x4) -> Self;

    /// Returns a new Self translated by vector.
    fn translated_by(&self, vector: Vec3) -> Self {
        self.transform(&Matrix4x4::translate(vector))
    }

    /// Returns a new Self translated by x, y, and z.
    fn translated(&self, x: Real, y: Real, z: Real) -> Self {
        self.translated_by(Vec3::new(x, y, z))
    }

    /// Rotates by x_degrees, y_degrees, z_degrees (X first, then Y, then Z).
    fn rotated(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        let rot = Matrix3x3::from_euler_zyx(
            z_deg.to_radians(),
            y_deg.to_radians(),
            x_deg.to_radians(),
        );
        self.transform(&Matrix4x4::rotate(rot))
    }

    /// Rotates by `angle` radians about `axis`.
    fn rotated_about(&self, axis: Vec3, angle: Real) -> Result<Self, KernelError> {
        let rot = Matrix3x3::rotation_axis_angle(axis, angle)?;
        Ok(self.transform(&Matrix4x4::rotate(rot)))
    }

    /// Scales by scale_x, scale_y, scale_z
    fn scaled(&self, sx: Real, sy: Real, sz: Real) -> Self {
        self.transform(&Matrix4x4::scale(Vec3::new(sx, sy, sz)))
    }
}

impl Transform for Matrix4x4 {
    fn transform(&self, matrix: &Matrix4x4) -> Self {
        matrix.multiply(self)
    }
}

/// A bare `Vec3` is transformed as a point.
impl Transform for Vec3 {
    fn transform(&self, matrix: &Matrix4x4) -> Self {
        matrix.transform_point(*self)
    }
}
