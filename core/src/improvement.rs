//! Sammenstilling av før/etter-analysen til én forbedringsrapport.

use log::{info, warn};

use crate::derivatives::safe_mean;
use crate::features::extract_features;
use crate::segmentation::segment_swings;
use crate::stats::compare_feature;
use crate::types::{
    ComparisonResult, CriteriaFlags, CriterionScore, FeatureVector, ImprovementReport, Joint,
    JointComparisons, JointValues, ReportDetails, ReportStatistics, RotationScore, SwingCount,
    Trajectory,
};

/// Forbedringsscore = 1 + relativ endring. 1.0 betyr ingen endring.
/// NaN på en av sidene, eller baseline 0, gir nøytral 1.0 – ingen
/// meningsfull relativ endring kan beregnes da.
pub fn calculate_improvement_score(before: f64, after: f64) -> f64 {
    if before.is_nan() || after.is_nan() || before == 0.0 {
        return 1.0;
    }
    1.0 + (after - before) / before
}

/// Kjører hele pipelinen: segmentering → trekk → statistikk → rapport.
/// Gir alltid en velformet rapport; manglende svinger gir den nøytrale
/// varianten i stedet for feil.
pub fn analyze_improvement(before: &Trajectory, after: &Trajectory) -> ImprovementReport {
    let swings_before = segment_swings(before);
    let swings_after = segment_swings(after);
    let swing_count = SwingCount {
        before: swings_before.len(),
        after: swings_after.len(),
    };
    info!(
        "segmentering: {} svinger før, {} etter",
        swing_count.before, swing_count.after
    );

    if swings_before.is_empty() || swings_after.is_empty() {
        warn!("minst én side uten svinger – nøytral rapport");
        return neutral_report(swing_count);
    }

    let feats_before: Vec<FeatureVector> = swings_before
        .iter()
        .map(|s| extract_features(before, s))
        .collect();
    let feats_after: Vec<FeatureVector> = swings_after
        .iter()
        .map(|s| extract_features(after, s))
        .collect();

    let rom = criterion_score(&feats_before, &feats_after, |f| f.range_of_motion);
    let smoothness = criterion_score(&feats_before, &feats_after, |f| f.smoothness);
    let rotation = rotation_score(&feats_before, &feats_after);

    let overall = {
        let m = (rom.score + smoothness.score + rotation.score) / 3.0;
        if m.is_nan() {
            1.0
        } else {
            m
        }
    };

    let statistics = ReportStatistics {
        range_of_motion: joint_comparisons(&feats_before, &feats_after, |f, j| {
            f.range_of_motion.get(j)
        }),
        smoothness: joint_comparisons(&feats_before, &feats_after, |f, j| f.smoothness.get(j)),
        arm_rotation: compare_feature(
            &rotation_values(&feats_before),
            &rotation_values(&feats_after),
        ),
    };

    ImprovementReport {
        overall_score: overall,
        improved: overall > 1.0,
        criteria: CriteriaFlags {
            range_of_motion: rom.score > 1.0,
            smoothness: smoothness.score > 1.0,
            arm_rotation: rotation.score > 1.0,
        },
        details: ReportDetails {
            range_of_motion: rom,
            smoothness,
            arm_rotation: rotation,
        },
        statistics,
        swing_count,
    }
}

/// Per-ledd-snitt over svingene for ett kriterium.
fn joint_means(
    features: &[FeatureVector],
    pick: impl Fn(&FeatureVector) -> JointValues,
) -> JointValues {
    let collect = |joint: Joint| {
        let values: Vec<f64> = features.iter().map(|f| pick(f).get(joint)).collect();
        safe_mean(&values)
    };
    JointValues {
        shoulder: collect(Joint::Shoulder),
        elbow: collect(Joint::Elbow),
        wrist: collect(Joint::Wrist),
    }
}

/// Kriteriescore: representativ verdi er snittet av de tre
/// ledd-snittene; detaljene bruker samme funksjon per ledd.
fn criterion_score(
    before: &[FeatureVector],
    after: &[FeatureVector],
    pick: impl Fn(&FeatureVector) -> JointValues,
) -> CriterionScore {
    let b = joint_means(before, &pick);
    let a = joint_means(after, &pick);
    CriterionScore {
        score: calculate_improvement_score(b.mean(), a.mean()),
        details: JointValues {
            shoulder: calculate_improvement_score(b.shoulder, a.shoulder),
            elbow: calculate_improvement_score(b.elbow, a.elbow),
            wrist: calculate_improvement_score(b.wrist, a.wrist),
        },
    }
}

fn rotation_values(features: &[FeatureVector]) -> Vec<f64> {
    features.iter().map(|f| f.arm_rotation).collect()
}

fn rotation_score(before: &[FeatureVector], after: &[FeatureVector]) -> RotationScore {
    let b = safe_mean(&rotation_values(before));
    let a = safe_mean(&rotation_values(after));
    RotationScore {
        score: calculate_improvement_score(b, a),
        before: b,
        after: a,
    }
}

fn joint_comparisons(
    before: &[FeatureVector],
    after: &[FeatureVector],
    pick: impl Fn(&FeatureVector, Joint) -> f64,
) -> JointComparisons {
    let per_joint = |joint: Joint| {
        let b: Vec<f64> = before.iter().map(|f| pick(f, joint)).collect();
        let a: Vec<f64> = after.iter().map(|f| pick(f, joint)).collect();
        compare_feature(&b, &a)
    };
    JointComparisons {
        shoulder: per_joint(Joint::Shoulder),
        elbow: per_joint(Joint::Elbow),
        wrist: per_joint(Joint::Wrist),
    }
}

/// Fast nøytral-/feilrapport når en av sidene mangler svinger.
fn neutral_report(swing_count: SwingCount) -> ImprovementReport {
    let neutral = ComparisonResult::neutral();
    let neutral_joints = JointComparisons {
        shoulder: neutral,
        elbow: neutral,
        wrist: neutral,
    };
    let unit = JointValues {
        shoulder: 1.0,
        elbow: 1.0,
        wrist: 1.0,
    };

    ImprovementReport {
        overall_score: 1.0,
        improved: false,
        criteria: CriteriaFlags {
            range_of_motion: false,
            smoothness: false,
            arm_rotation: false,
        },
        details: ReportDetails {
            range_of_motion: CriterionScore {
                score: 1.0,
                details: unit,
            },
            smoothness: CriterionScore {
                score: 1.0,
                details: unit,
            },
            arm_rotation: RotationScore {
                score: 1.0,
                before: 0.0,
                after: 0.0,
            },
        },
        statistics: ReportStatistics {
            range_of_motion: neutral_joints,
            smoothness: neutral_joints,
            arm_rotation: neutral,
        },
        swing_count,
    }
}
