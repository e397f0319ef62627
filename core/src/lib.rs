pub mod cli;
pub mod derivatives;
pub mod features;
pub mod improvement;
pub mod metrics;
#[cfg(feature = "python")]
pub mod py;
pub mod segmentation;
pub mod stats;
pub mod storage;
pub mod types;

pub use features::extract_features;
pub use improvement::{analyze_improvement, calculate_improvement_score};
pub use segmentation::segment_swings;
pub use stats::compare_feature;
pub use storage::{load_trajectory, save_report, trajectory_from_json, LoadError};
pub use types::{
    ComparisonResult, FeatureVector, ImprovementReport, Joint, JointValues, Sample, Swing,
    TestMethod, Trajectory, Vec3,
};
