//! Kernel errors

use crate::float_types::Real;

/// All the recoverable misuse the kernel reports.
///
/// Out-of-range element access is not represented here: it is a caller bug and
/// panics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    /// (InvalidArgument) A rotation axis with near-zero length
    #[error("(InvalidArgument) rotation axis {axis:?} has near-zero length")]
    InvalidArgument { axis: [Real; 3] },
    /// (DegenerateScale) A scale component is near zero so it has no reciprocal
    #[error("(DegenerateScale) scale {scale:?} has a near-zero component, the inverse is undefined")]
    DegenerateScale { scale: [Real; 3] },
    /// (NotAffine) The bottom row is not `[0 0 0 1]`
    #[error("(NotAffine) bottom row {bottom_row:?} is not [0, 0, 0, 1], the matrix has no TRS decomposition")]
    NotAffine { bottom_row: [Real; 4] },
}

impl KernelError {
    /// Short name of the error kind, as shown in the inspector status line.
    pub const fn kind(&self) -> &'static str {
        match self {
            KernelError::InvalidArgument { .. } => "InvalidArgument",
            KernelError::DegenerateScale { .. } => "DegenerateScale",
            KernelError::NotAffine { .. } => "NotAffine",
        }
    }
}
