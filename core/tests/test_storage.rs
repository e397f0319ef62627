// core/tests/test_storage.rs

use serde_json::json;
use std::fs;

use swinggraph_core::storage::{load_trajectory, save_report, trajectory_from_json, LoadError};
use swinggraph_core::{analyze_improvement, ImprovementReport, Trajectory};

fn valid_recording() -> serde_json::Value {
    json!({
        "Timestamp": [0.0, 0.1, 0.2],
        "Shoulder_X": [0.1, 0.1, 0.1],
        "Shoulder_Y": [1.0, 1.0, 1.0],
        "Shoulder_Z": [0.0, 0.0, 0.0],
        "Elbow_X": [0.5, 0.6, 0.7],
        "Elbow_Y": [0.5, 0.5, 0.5],
        "Elbow_Z": [0.0, 0.0, 0.0],
        "Wrist_X": [0.9, 1.0, 1.1],
        "Wrist_Y": [0.2, 0.2, 0.2],
        "Wrist_Z": [0.0, 0.0, 0.0]
    })
}

#[test]
fn parses_collaborator_payload() {
    let traj = trajectory_from_json(&valid_recording().to_string(), "before.json")
        .expect("gyldig opptak skal parses");

    assert_eq!(traj.len(), 3);
    assert!((traj.samples[1].t - 0.1).abs() < 1e-12);
    assert!((traj.samples[2].elbow.x - 0.7).abs() < 1e-12);
    assert!((traj.samples[0].wrist.y - 0.2).abs() < 1e-12);
}

#[test]
fn missing_joint_key_is_fatal_and_names_the_field() {
    let mut payload = valid_recording();
    payload.as_object_mut().unwrap().remove("Wrist_Z");

    let err = trajectory_from_json(&payload.to_string(), "before.json")
        .expect_err("manglende nøkkel skal være fatal");

    match &err {
        LoadError::Parse { path, message, .. } => {
            assert_eq!(path, "before.json");
            assert!(message.contains("Wrist_Z"), "melding: {message}");
        }
        other => panic!("feil variant: {other:?}"),
    }
}

#[test]
fn mismatched_array_length_is_fatal_and_names_the_field() {
    let mut payload = valid_recording();
    payload["Shoulder_X"] = json!([0.1, 0.1]);

    let err = trajectory_from_json(&payload.to_string(), "after.json")
        .expect_err("ulik lengde skal være fatal");

    match &err {
        LoadError::LengthMismatch {
            field,
            got,
            expected,
            ..
        } => {
            assert_eq!(*field, "Shoulder_X");
            assert_eq!(*got, 2);
            assert_eq!(*expected, 3);
        }
        other => panic!("feil variant: {other:?}"),
    }
}

#[test]
fn non_ascending_timestamps_are_rejected() {
    let mut payload = valid_recording();
    payload["Timestamp"] = json!([0.0, 0.1, 0.1]);

    let err = trajectory_from_json(&payload.to_string(), "before.json")
        .expect_err("ikke-stigende tidsstempler skal avvises");

    assert!(matches!(
        err,
        LoadError::NonMonotonicTimestamps { index: 2, .. }
    ));
}

#[test]
fn single_sample_recording_loads_but_warns() {
    // InsufficientData håndteres av aggregatoren, ikke lasteren
    let payload = json!({
        "Timestamp": [0.0],
        "Shoulder_X": [0.1], "Shoulder_Y": [1.0], "Shoulder_Z": [0.0],
        "Elbow_X": [0.5], "Elbow_Y": [0.5], "Elbow_Z": [0.0],
        "Wrist_X": [0.9], "Wrist_Y": [0.2], "Wrist_Z": [0.0]
    });

    let traj = trajectory_from_json(&payload.to_string(), "short.json").expect("skal laste");
    assert_eq!(traj.len(), 1);
}

#[test]
fn load_trajectory_reports_missing_file() {
    let err = load_trajectory("tests/finnes_ikke.json").expect_err("fil mangler");
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("finnes_ikke.json"));
}

#[test]
fn report_round_trips_through_json() {
    let path = "tests/tmp_report.json";
    let _ = fs::remove_file(path);

    // Nøytral rapport fra to trivielle opptak gir et fullt utfylt skjema
    let report = analyze_improvement(&Trajectory::default(), &Trajectory::default());

    save_report(&report, path).expect("save_report failed");
    let loaded: ImprovementReport =
        serde_json::from_str(&fs::read_to_string(path).expect("les tilbake"))
            .expect("parse tilbake");

    assert!((loaded.overall_score - report.overall_score).abs() < 1e-9);
    assert_eq!(loaded.improved, report.improved);
    assert_eq!(loaded.criteria, report.criteria);
    assert_eq!(loaded.swing_count, report.swing_count);
    assert!(
        (loaded.statistics.arm_rotation.p_value - report.statistics.arm_rotation.p_value).abs()
            < 1e-9
    );
    assert_eq!(
        loaded.statistics.range_of_motion.shoulder.method,
        report.statistics.range_of_motion.shoulder.method
    );
    assert!(
        (loaded.details.range_of_motion.details.shoulder
            - report.details.range_of_motion.details.shoulder)
            .abs()
            < 1e-9
    );

    let _ = fs::remove_file(path);
}
