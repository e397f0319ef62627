//! Lasting av poseopptak (JSON fra sporings-samarbeidspartneren) og
//! lagring av forbedringsrapporter.

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::types::{ImprovementReport, Sample, Trajectory, Vec3};

/// Råformatet fra pose-sporingen: parallelle arrays per ledd-akse,
/// alle like lange som `Timestamp`.
#[derive(Debug, Clone, Deserialize)]
pub struct PoseRecording {
    #[serde(rename = "Timestamp")]
    pub timestamp: Vec<f64>,
    #[serde(rename = "Shoulder_X")]
    pub shoulder_x: Vec<f64>,
    #[serde(rename = "Shoulder_Y")]
    pub shoulder_y: Vec<f64>,
    #[serde(rename = "Shoulder_Z")]
    pub shoulder_z: Vec<f64>,
    #[serde(rename = "Elbow_X")]
    pub elbow_x: Vec<f64>,
    #[serde(rename = "Elbow_Y")]
    pub elbow_y: Vec<f64>,
    #[serde(rename = "Elbow_Z")]
    pub elbow_z: Vec<f64>,
    #[serde(rename = "Wrist_X")]
    pub wrist_x: Vec<f64>,
    #[serde(rename = "Wrist_Y")]
    pub wrist_y: Vec<f64>,
    #[serde(rename = "Wrist_Z")]
    pub wrist_z: Vec<f64>,
}

/// Fatale inndatafeil. Manglende leddata har ingen fornuftig numerisk
/// default, så disse stopper analysen før den starter.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("klarte ikke å lese {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("ugyldig opptak i {path} (ved {at}): {message}")]
    Parse {
        path: String,
        at: String,
        message: String,
    },
    #[error("{path}: {field} har lengde {got}, Timestamp har {expected}")]
    LengthMismatch {
        path: String,
        field: &'static str,
        got: usize,
        expected: usize,
    },
    #[error("{path}: Timestamp må være strengt stigende (brudd ved indeks {index})")]
    NonMonotonicTimestamps { path: String, index: usize },
}

/// Leser og validerer ett opptak fra disk.
pub fn load_trajectory(path: &str) -> Result<Trajectory, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    let traj = trajectory_from_json(&contents, path)?;
    info!("📂 Opptak lastet fra {} ({} samples)", path, traj.len());
    Ok(traj)
}

/// Parser og validerer et opptak fra en JSON-streng. `source` brukes
/// som fil-/kilde-etikett i feilmeldinger.
pub fn trajectory_from_json(json: &str, source: &str) -> Result<Trajectory, LoadError> {
    let mut de = serde_json::Deserializer::from_str(json);
    let recording: PoseRecording =
        serde_path_to_error::deserialize(&mut de).map_err(|e| LoadError::Parse {
            path: source.to_string(),
            at: e.path().to_string(),
            message: e.to_string(),
        })?;
    into_trajectory(recording, source)
}

fn into_trajectory(recording: PoseRecording, source: &str) -> Result<Trajectory, LoadError> {
    let n = recording.timestamp.len();

    let check = |field: &'static str, xs: &[f64]| -> Result<(), LoadError> {
        if xs.len() != n {
            Err(LoadError::LengthMismatch {
                path: source.to_string(),
                field,
                got: xs.len(),
                expected: n,
            })
        } else {
            Ok(())
        }
    };
    check("Shoulder_X", &recording.shoulder_x)?;
    check("Shoulder_Y", &recording.shoulder_y)?;
    check("Shoulder_Z", &recording.shoulder_z)?;
    check("Elbow_X", &recording.elbow_x)?;
    check("Elbow_Y", &recording.elbow_y)?;
    check("Elbow_Z", &recording.elbow_z)?;
    check("Wrist_X", &recording.wrist_x)?;
    check("Wrist_Y", &recording.wrist_y)?;
    check("Wrist_Z", &recording.wrist_z)?;

    for i in 1..n {
        if recording.timestamp[i] <= recording.timestamp[i - 1] {
            return Err(LoadError::NonMonotonicTimestamps {
                path: source.to_string(),
                index: i,
            });
        }
    }

    if n < 2 {
        // For kort til derivasjon; segmenteringen gir tom svingliste og
        // aggregatoren svarer med nøytral rapport.
        warn!("{source}: kun {n} sample(s), analysen vil gi nøytral rapport");
    }

    let samples = (0..n)
        .map(|i| Sample {
            t: recording.timestamp[i],
            shoulder: Vec3::new(
                recording.shoulder_x[i],
                recording.shoulder_y[i],
                recording.shoulder_z[i],
            ),
            elbow: Vec3::new(
                recording.elbow_x[i],
                recording.elbow_y[i],
                recording.elbow_z[i],
            ),
            wrist: Vec3::new(
                recording.wrist_x[i],
                recording.wrist_y[i],
                recording.wrist_z[i],
            ),
        })
        .collect();

    Ok(Trajectory::new(samples))
}

/// Lagrer rapporten til disk som JSON (pretty-print).
pub fn save_report(
    report: &ImprovementReport,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    info!(
        "✅ Rapport lagret til {} (improved={})",
        path, report.improved
    );
    Ok(())
}
