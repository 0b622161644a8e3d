mod support;

use trskit::session::{Action, Operation, Output, Session, Status};
use trskit::{Matrix3x3, Matrix4x4, vec3};

#[test]
fn menu_order_and_labels() {
    assert_eq!(Operation::ALL.len(), 16);
    assert_eq!(Operation::try_from(0), Ok(Operation::GetTranslation));
    assert_eq!(Operation::try_from(15), Ok(Operation::InverseTrs));
    assert_eq!(Operation::try_from(16), Err(16));
    for (i, op) in Operation::ALL.iter().enumerate() {
        assert_eq!(Operation::try_from(i), Ok(*op));
        assert!(!op.label().is_empty());
    }
    assert_eq!(Operation::IsAffine.to_string(), "Is Affine? (A)");
}

#[test]
fn fresh_session() {
    let session = Session::new();
    assert_eq!(session.a, Matrix4x4::identity());
    assert_eq!(session.s, vec3(1.0, 1.0, 1.0));
    assert_eq!(session.p, vec3(1.0, 2.0, 3.0));
    assert_eq!(session.v, vec3(1.0, 0.0, 0.0));
    assert_eq!(*session.status(), Status::None);
    assert_eq!(session.status().to_string(), "");
    assert_eq!(session.last_action(), Action::None);
    assert!(session.output().is_none());
}

#[test]
fn every_operation_succeeds_on_identity() {
    let mut session = Session::new();
    for op in Operation::ALL {
        assert!(session.run(op), "{op} failed: {}", session.status());
        assert_eq!(session.last_action(), Action::Run(op));
        assert_eq!(*session.status(), Status::Ok(op.label().to_string()));
        assert!(session.output().is_some());
    }
}

#[test]
fn apply_actions_edit_matrix_a() {
    let mut session = Session::new();
    session.t = vec3(1.0, 2.0, 3.0);
    session.apply_translation();
    assert_eq!(session.last_action(), Action::SetTranslation);
    assert_eq!(session.a.get_translation(), vec3(1.0, 2.0, 3.0));
    assert!(session.status().to_string().starts_with("OK: "));

    session.s = vec3(2.0, 3.0, 4.0);
    session.apply_scale();
    assert_eq!(session.last_action(), Action::SetScale);
    assert!(support::vec3_eq(session.a.get_scale(), vec3(2.0, 3.0, 4.0), 1e-12));

    session.yaw_deg = 30.0;
    session.pitch_deg = -20.0;
    session.roll_deg = 45.0;
    session.apply_rotation();
    assert_eq!(session.last_action(), Action::SetRotation);
    assert!(support::mat3_eq(&session.a.get_rotation(), &session.euler_matrix(), 1e-12));
    assert!(support::vec3_eq(session.a.get_scale(), vec3(2.0, 3.0, 4.0), 1e-12));
    assert_eq!(session.a.get_translation(), vec3(1.0, 2.0, 3.0));
}

#[test]
fn transform_probes() {
    let mut session = Session::new();
    session.a = Matrix4x4::translate(vec3(5.0, -2.0, 3.0));

    assert!(session.run(Operation::TransformPoint));
    assert_eq!(session.output(), Some(&Output::Vector(vec3(6.0, 0.0, 6.0))));

    assert!(session.run(Operation::TransformVector));
    assert_eq!(session.output(), Some(&Output::Vector(vec3(1.0, 0.0, 0.0))));

    assert!(session.run(Operation::IsAffine));
    assert_eq!(session.output(), Some(&Output::Flag(true)));
}

#[test]
fn quat_and_matrix_paths_agree() {
    let mut session = Session::new();
    session.t = vec3(1.0, -1.0, 0.5);
    session.s = vec3(2.0, 1.0, 0.5);
    session.yaw_deg = 10.0;
    session.pitch_deg = 20.0;
    session.roll_deg = 30.0;

    let matrix_of = |session: &Session| match session.output() {
        Some(Output::Matrix { matrix, .. }) => *matrix,
        other => panic!("expected a matrix, got {other:?}"),
    };

    assert!(session.run(Operation::FromTrsMatrix));
    let from_matrix = matrix_of(&session);
    assert!(session.run(Operation::FromTrsQuat));
    let from_quat = matrix_of(&session);
    assert!(support::mat4_eq(&from_matrix, &from_quat, 1e-12));

    assert!(session.run(Operation::RotateMatrix));
    let r = matrix_of(&session);
    assert!(session.run(Operation::RotateQuat));
    assert!(support::mat4_eq(&r, &matrix_of(&session), 1e-12));
}

#[test]
fn gimbal_lock_presets() {
    let mut session = Session::new();
    session.set_gimbal_lock(true);
    assert_eq!(session.pitch_deg, 90.0);
    assert!(session.euler_matrix().is_rotation());
    session.set_gimbal_lock(false);
    assert_eq!(session.pitch_deg, -90.0);
    assert!(support::mat3_eq(
        &session.euler_quat().to_matrix3x3(),
        &session.euler_matrix(),
        1e-12
    ));
}

#[test]
fn kernel_errors_become_status() {
    let mut session = Session::new();
    assert!(session.run(Operation::GetScale));
    let previous = session.output().cloned();

    session.s = vec3(1.0, 0.0, 1.0);
    session.apply_scale();
    assert!(!session.run(Operation::InverseTrs));
    assert_eq!(session.last_action(), Action::Run(Operation::InverseTrs));
    match session.status() {
        Status::Error(msg) => assert!(msg.contains("DegenerateScale"), "{msg}"),
        other => panic!("expected an error status, got {other:?}"),
    }
    assert!(session.status().to_string().starts_with("Error: "));
    assert_eq!(session.output().cloned(), previous);

    let mut p = Matrix4x4::identity();
    p.set(3, 2, -1.0);
    p.set(3, 3, 0.0);
    session.a = p;
    assert!(!session.run(Operation::InverseTr));
    assert!(matches!(session.status(), Status::Error(msg) if msg.contains("NotAffine")));

    // Getters still answer on the projective matrix.
    assert!(session.run(Operation::IsAffine));
    assert_eq!(session.output(), Some(&Output::Flag(false)));
    assert!(session.run(Operation::GetRotation));
    assert_eq!(session.output(), Some(&Output::Rotation(Matrix3x3::identity())));
}

#[test]
fn unknown_index_is_reported() {
    let mut session = Session::new();
    assert!(!session.run_index(42));
    assert_eq!(*session.status(), Status::Error("Unknown operation 42.".to_string()));
    assert!(session.run_index(5));
    assert_eq!(session.output(), Some(&Output::Flag(true)));
}

#[test]
fn output_display() {
    assert_eq!(
        Output::Vector(vec3(1.0, 2.5, -3.0)).to_string(),
        "(1.000000, 2.500000, -3.000000)"
    );
    let text = Output::Matrix {
        label: "Translate(T)",
        matrix: Matrix4x4::identity(),
    }
    .to_string();
    assert!(text.starts_with("Translate(T)\n[1.000000 0.000000 0.000000 0.000000]"));
}
