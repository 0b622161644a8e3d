//! Headless state of the matrix inspector.
//!
//! A [`Session`] holds the matrix being edited, the T / R (Euler ZYX in
//! degrees) / S inputs, a probe point and vector, and the outcome of the last
//! action. Kernel errors raised by an action are caught here and kept as the
//! status text; they never leave [`Session::run`] or the `apply_*` methods.

use crate::errors::KernelError;
use crate::float_types::{Real, to_radians};
use crate::matrix3::Matrix3x3;
use crate::matrix4::Matrix4x4;
use crate::quat::Quat;
use crate::vector::Vec3;
use std::fmt;

/// One of the read-only operations the inspector can run, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetTranslation,
    GetRotation,
    GetRotationQuat,
    GetScale,
    GetRotationScale,
    IsAffine,
    TransformPoint,
    TransformVector,
    Translate,
    Scale,
    RotateMatrix,
    RotateQuat,
    FromTrsMatrix,
    FromTrsQuat,
    InverseTr,
    InverseTrs,
}

impl Operation {
    pub const ALL: [Operation; 16] = [
        Operation::GetTranslation,
        Operation::GetRotation,
        Operation::GetRotationQuat,
        Operation::GetScale,
        Operation::GetRotationScale,
        Operation::IsAffine,
        Operation::TransformPoint,
        Operation::TransformVector,
        Operation::Translate,
        Operation::Scale,
        Operation::RotateMatrix,
        Operation::RotateQuat,
        Operation::FromTrsMatrix,
        Operation::FromTrsQuat,
        Operation::InverseTr,
        Operation::InverseTrs,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Operation::GetTranslation => "Get Translation (A)",
            Operation::GetRotation => "Get Rotation (A)",
            Operation::GetRotationQuat => "Get Rotation Quat (A)",
            Operation::GetScale => "Get Scale (A)",
            Operation::GetRotationScale => "Get Rotation-Scale (A)",
            Operation::IsAffine => "Is Affine? (A)",
            Operation::TransformPoint => "Transform Point (A, P)",
            Operation::TransformVector => "Transform Vector (A, V)",
            Operation::Translate => "Get Matrix Translate (T)",
            Operation::Scale => "Get Matrix Scale (S)",
            Operation::RotateMatrix => "Get Matrix Rotate (ZYX -> R)",
            Operation::RotateQuat => "Get Matrix Rotate (ZYX -> q)",
            Operation::FromTrsMatrix => "Get Matrix TRS (T, ZYX -> R, S)",
            Operation::FromTrsQuat => "Get Matrix TRS (T, ZYX -> q, S)",
            Operation::InverseTr => "Get Inverse TR (A)",
            Operation::InverseTrs => "Get Inverse TRS (A)",
        }
    }
}

impl TryFrom<usize> for Operation {
    type Error = usize;

    /// Menu index to operation; hands the index back when out of range.
    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Operation::ALL.get(index).copied().ok_or(index)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the last action did.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Status {
    #[default]
    None,
    Ok(String),
    Error(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::None => Ok(()),
            Status::Ok(msg) => write!(f, "OK: {msg}"),
            Status::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}

/// Which control produced the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    None,
    SetTranslation,
    SetRotation,
    SetScale,
    Run(Operation),
}

/// Value produced by the last [`Session::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Vector(Vec3),
    Rotation(Matrix3x3),
    Quaternion(Quat),
    Flag(bool),
    Matrix {
        label: &'static str,
        matrix: Matrix4x4,
    },
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Vector(v) => write!(f, "({:.6}, {:.6}, {:.6})", v.x, v.y, v.z),
            Output::Rotation(m) => write!(f, "{m}"),
            Output::Quaternion(q) => write!(f, "{q}"),
            Output::Flag(b) => write!(f, "{b}"),
            Output::Matrix { label, matrix } => write!(f, "{label}\n{matrix}"),
        }
    }
}

/// Inspector state. One per window; pass it by `&mut` to whatever drives it.
#[derive(Debug, Clone)]
pub struct Session {
    /// Matrix A under edit.
    pub a: Matrix4x4,
    pub t: Vec3,
    pub yaw_deg: Real,
    pub pitch_deg: Real,
    pub roll_deg: Real,
    pub s: Vec3,
    /// Probe for [`Operation::TransformPoint`].
    pub p: Vec3,
    /// Probe for [`Operation::TransformVector`].
    pub v: Vec3,
    status: Status,
    last_action: Action,
    output: Option<Output>,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            a: Matrix4x4::identity(),
            t: Vec3::zeros(),
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            roll_deg: 0.0,
            s: Vec3::repeat(1.0),
            p: Vec3::new(1.0, 2.0, 3.0),
            v: Vec3::new(1.0, 0.0, 0.0),
            status: Status::None,
            last_action: Action::None,
            output: None,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn last_action(&self) -> Action {
        self.last_action
    }

    pub fn output(&self) -> Option<&Output> {
        self.output.as_ref()
    }

    /// Euler inputs converted to radians, as `(yaw, pitch, roll)`.
    pub fn euler_radians(&self) -> (Real, Real, Real) {
        (
            to_radians(self.yaw_deg),
            to_radians(self.pitch_deg),
            to_radians(self.roll_deg),
        )
    }

    pub fn euler_matrix(&self) -> Matrix3x3 {
        let (yaw, pitch, roll) = self.euler_radians();
        Matrix3x3::from_euler_zyx(yaw, pitch, roll)
    }

    pub fn euler_quat(&self) -> Quat {
        let (yaw, pitch, roll) = self.euler_radians();
        Quat::from_euler_zyx(yaw, pitch, roll)
    }

    /// Puts the pitch input at +90° or -90°.
    pub fn set_gimbal_lock(&mut self, positive: bool) {
        self.pitch_deg = if positive { 90.0 } else { -90.0 };
    }

    pub fn apply_translation(&mut self) {
        self.a.set_translation(self.t);
        self.finish(Action::SetTranslation, Ok("SetTranslation applied to A."));
    }

    pub fn apply_rotation(&mut self) {
        let rotation = self.euler_matrix();
        self.a.set_rotation(rotation);
        self.finish(Action::SetRotation, Ok("SetRotation (from Euler) applied to A."));
    }

    pub fn apply_scale(&mut self) {
        self.a.set_scale(self.s);
        self.finish(Action::SetScale, Ok("SetScale applied to A."));
    }

    /// Runs `op` against the current inputs and records its output and status.
    ///
    /// Returns `true` on success. A failed operation keeps the previous output.
    pub fn run(&mut self, op: Operation) -> bool {
        match self.evaluate(op) {
            Ok(output) => {
                self.output = Some(output);
                self.finish(Action::Run(op), Ok(op.label()));
                true
            }
            Err(err) => {
                log::debug!("{op} failed: {err}");
                self.finish(Action::Run(op), Err(err));
                false
            }
        }
    }

    /// Like [`Session::run`] but selected by menu index.
    pub fn run_index(&mut self, index: usize) -> bool {
        match Operation::try_from(index) {
            Ok(op) => self.run(op),
            Err(index) => {
                self.status = Status::Error(format!("Unknown operation {index}."));
                false
            }
        }
    }

    fn evaluate(&self, op: Operation) -> Result<Output, KernelError> {
        let a = &self.a;
        let output = match op {
            Operation::GetTranslation => Output::Vector(a.get_translation()),
            Operation::GetRotation => Output::Rotation(a.get_rotation()),
            Operation::GetRotationQuat => Output::Quaternion(a.get_rotation_quat()),
            Operation::GetScale => Output::Vector(a.get_scale()),
            Operation::GetRotationScale => Output::Rotation(a.get_rotation_scale()),
            Operation::IsAffine => Output::Flag(a.is_affine()),
            Operation::TransformPoint => Output::Vector(a.transform_point(self.p)),
            Operation::TransformVector => Output::Vector(a.transform_vector(self.v)),
            Operation::Translate => Output::Matrix {
                label: "Translate(T)",
                matrix: Matrix4x4::translate(self.t),
            },
            Operation::Scale => Output::Matrix {
                label: "Scale(S)",
                matrix: Matrix4x4::scale(self.s),
            },
            Operation::RotateMatrix => Output::Matrix {
                label: "Rotate(R)",
                matrix: Matrix4x4::rotate(self.euler_matrix()),
            },
            Operation::RotateQuat => Output::Matrix {
                label: "Rotate(q)",
                matrix: Matrix4x4::rotate(self.euler_quat()),
            },
            Operation::FromTrsMatrix => Output::Matrix {
                label: "FromTRS(T, R, S)",
                matrix: Matrix4x4::from_trs(self.t, self.euler_matrix(), self.s),
            },
            Operation::FromTrsQuat => Output::Matrix {
                label: "FromTRS(T, q, S)",
                matrix: Matrix4x4::from_trs(self.t, self.euler_quat(), self.s),
            },
            Operation::InverseTr => Output::Matrix {
                label: "InverseTR(A)",
                matrix: a.inverse_tr()?,
            },
            Operation::InverseTrs => Output::Matrix {
                label: "InverseTRS(A)",
                matrix: a.inverse_trs()?,
            },
        };
        Ok(output)
    }

    fn finish(&mut self, action: Action, result: Result<&str, KernelError>) {
        self.last_action = action;
        self.status = match result {
            Ok(msg) => Status::Ok(msg.to_string()),
            Err(err) => Status::Error(err.to_string()),
        };
    }
}
