// core/tests/report_smoke.rs
//
// Røyk-test for hele JSON-stien: samarbeidspartner-payload inn,
// rapport-JSON ut, kun rene tall/bools/strenger i serialisert form.

use serde_json::json;
use swinggraph_core::{analyze_improvement, trajectory_from_json};

/// Payload på sporingsformatet: albuen pulser hver 30. frame slik at
/// segmenteringen finner svinger.
fn recording_payload(n: usize) -> String {
    let dt = 1.0 / 30.0;
    let pulse = [0.2, 0.6, 1.0, 0.5, 0.1];

    let mut elbow_x = Vec::with_capacity(n);
    let mut x = 0.8;
    for i in 0..n {
        elbow_x.push(x);
        let phase = i % 30;
        let v = if (15..20).contains(&phase) {
            pulse[phase - 15]
        } else {
            0.01
        };
        x += v * dt;
    }

    let ts: Vec<f64> = (0..n).map(|i| i as f64 * dt).collect();
    let zeros = vec![0.0; n];
    let ones = vec![1.0; n];

    json!({
        "Timestamp": ts,
        "Shoulder_X": zeros, "Shoulder_Y": ones, "Shoulder_Z": zeros,
        "Elbow_X": elbow_x, "Elbow_Y": zeros, "Elbow_Z": zeros,
        "Wrist_X": vec![0.5; n], "Wrist_Y": vec![-0.5; n], "Wrist_Z": zeros
    })
    .to_string()
}

#[test]
fn smoke_full_json_pipeline() {
    let before = trajectory_from_json(&recording_payload(300), "before").unwrap();
    let after = trajectory_from_json(&recording_payload(300), "after").unwrap();

    let report = analyze_improvement(&before, &after);
    let v = serde_json::to_value(&report).unwrap();

    // Toppnivåfeltene finnes og har rene typer
    assert!(v["overall_score"].is_number());
    assert!(v["improved"].is_boolean());
    assert!(v["criteria"]["range_of_motion"].is_boolean());
    assert!(v["swing_count"]["before"].as_u64().unwrap() >= 1);
    assert_eq!(
        v["swing_count"]["before"].as_u64(),
        v["swing_count"]["after"].as_u64()
    );

    // Statistikkblokken: p-verdi i [0,1] og metode som streng
    let shoulder = &v["statistics"]["range_of_motion"]["shoulder"];
    let p = shoulder["p_value"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&p));
    assert!(shoulder["method"].is_string());

    // Identiske opptak → ingen endring
    let overall = v["overall_score"].as_f64().unwrap();
    assert!((overall - 1.0).abs() < 1e-9, "overall = {overall}");
}
