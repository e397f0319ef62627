//! Kinematiske trekk per sving: bevegelsesutslag (range of motion),
//! jevnhet (invers jerk) og armrotasjon.

use log::debug;

use crate::derivatives::{gradient, mean, peak_to_peak};
use crate::types::{FeatureVector, Joint, JointValues, Sample, Swing, Trajectory, Vec3};

/// Epsilon i jevnhetsscoren, mot divisjon på null ved jerk ≈ 0.
pub const JERK_EPSILON: f64 = 1e-6;

/// Vertikalaksen rotasjonsvinkelen måles mot.
const VERTICAL: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Trekker ut én trekkvektor for svingens frame-område.
/// Alle verdier er sanert: NaN/Inf fra degenererte svinger blir 0.0.
pub fn extract_features(traj: &Trajectory, swing: &Swing) -> FeatureVector {
    let frames = &traj.samples[swing.start..swing.end];
    let ts: Vec<f64> = frames.iter().map(|s| s.t).collect();

    let per_joint = |joint: Joint| {
        let magnitude: Vec<f64> = frames.iter().map(|s| joint.position(s).norm()).collect();
        let rom = sanitize("range_of_motion", peak_to_peak(&magnitude));
        let smooth = sanitize("smoothness", smoothness(&magnitude, &ts));
        (rom, smooth)
    };

    let (rom_shoulder, smooth_shoulder) = per_joint(Joint::Shoulder);
    let (rom_elbow, smooth_elbow) = per_joint(Joint::Elbow);
    let (rom_wrist, smooth_wrist) = per_joint(Joint::Wrist);

    FeatureVector {
        range_of_motion: JointValues {
            shoulder: rom_shoulder,
            elbow: rom_elbow,
            wrist: rom_wrist,
        },
        smoothness: JointValues {
            shoulder: smooth_shoulder,
            elbow: smooth_elbow,
            wrist: smooth_wrist,
        },
        arm_rotation: sanitize("arm_rotation", rotation_score(frames)),
    }
}

/// Jevnhet = 1 / (snitt |jerk| + ε). Jerk er tredje tidsderiverte av
/// posisjonsstørrelsen; lavere jerk gir høyere score.
fn smoothness(magnitude: &[f64], ts: &[f64]) -> f64 {
    let velocity = gradient(magnitude, ts);
    let acceleration = gradient(&velocity, ts);
    let jerk = gradient(&acceleration, ts);

    let abs_jerk: Vec<f64> = jerk.iter().map(|j| j.abs()).collect();
    1.0 / (mean(&abs_jerk) + JERK_EPSILON)
}

/// Rotasjonsscore per frame: vinkel mellom kryssproduktet av
/// overarm/underarm og vertikalaksen. 1.0 når kryssproduktet står
/// vinkelrett på vertikalen (90°), lineært fallende mot 0 ved 0°/180°.
fn rotation_score(frames: &[Sample]) -> f64 {
    let mut scores = Vec::with_capacity(frames.len());
    for s in frames {
        let upper_arm = s.elbow.sub(s.shoulder);
        let forearm = s.wrist.sub(s.elbow);
        let cross = upper_arm.cross(forearm);

        // Null-lengde kryssprodukt (strak arm) gir NaN her; snittet
        // smittes og saneres av kalleren.
        let cosine = (cross.dot(VERTICAL) / (cross.norm() * VERTICAL.norm())).clamp(-1.0, 1.0);
        let degrees = cosine.acos().to_degrees();
        scores.push(1.0 - (degrees - 90.0).abs() / 90.0);
    }
    mean(&scores)
}

fn sanitize(feature: &str, value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        debug!("ikke-finitt {feature} ({value}) sanert til 0.0");
        0.0
    }
}
