use crate::types::ImprovementReport;

/// Skriver et menneskelesbart sammendrag av rapporten til stdout.
pub fn print_improvement_report(report: &ImprovementReport) {
    println!("--- Improvement Report ---");
    println!(
        "Svinger: {} før / {} etter",
        report.swing_count.before, report.swing_count.after
    );
    println!(
        "Overall score: {:.3} ({})",
        report.overall_score,
        verdict(report.improved)
    );
    println!(
        "  Range of motion: {:.3} ({})",
        report.details.range_of_motion.score,
        verdict(report.criteria.range_of_motion)
    );
    println!(
        "  Smoothness:      {:.3} ({})",
        report.details.smoothness.score,
        verdict(report.criteria.smoothness)
    );
    println!(
        "  Arm rotation:    {:.3} ({})",
        report.details.arm_rotation.score,
        verdict(report.criteria.arm_rotation)
    );
    println!(
        "Signifikante funn: rom/skulder p={:.4}, rotasjon p={:.4}",
        report.statistics.range_of_motion.shoulder.p_value,
        report.statistics.arm_rotation.p_value
    );
}

fn verdict(improved: bool) -> &'static str {
    if improved {
        "forbedring"
    } else {
        "ingen forbedring"
    }
}
