use serde::{Deserialize, Serialize};

/// 3D-posisjon/vektor for et ledd. Vi trenger bare sub/dot/kryss/norm,
/// så den er håndrullet i stedet for å dra inn et lineæralgebra-crate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }
}

/// Ett pose-sample fra sporings-samarbeidspartneren.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: f64, // sekunder fra start, strengt stigende
    pub shoulder: Vec3,
    pub elbow: Vec3,
    pub wrist: Vec3,
}

/// Ett sammenhengende opptak. Kun lesetilgang under analysen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trajectory {
    pub samples: Vec<Sample>,
}

impl Trajectory {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// De tre leddene vi følger per arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    Shoulder,
    Elbow,
    Wrist,
}

impl Joint {
    pub const ALL: [Joint; 3] = [Joint::Shoulder, Joint::Elbow, Joint::Wrist];

    #[inline]
    pub fn position(self, sample: &Sample) -> Vec3 {
        match self {
            Joint::Shoulder => sample.shoulder,
            Joint::Elbow => sample.elbow,
            Joint::Wrist => sample.wrist,
        }
    }
}

/// Én repetisjon av bevegelsen, avgrenset av to hastighetstopper.
/// Indeksene peker inn i `Trajectory::samples`; `end` er eksklusiv.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swing {
    pub start: usize,
    pub end: usize,
    pub peak_velocity: f64,
}

impl Swing {
    pub fn frame_count(&self) -> usize {
        self.end - self.start
    }
}

/// Én skalar per ledd.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointValues {
    pub shoulder: f64,
    pub elbow: f64,
    pub wrist: f64,
}

impl JointValues {
    pub fn get(&self, joint: Joint) -> f64 {
        match joint {
            Joint::Shoulder => self.shoulder,
            Joint::Elbow => self.elbow,
            Joint::Wrist => self.wrist,
        }
    }

    /// Snitt over de tre leddene.
    pub fn mean(&self) -> f64 {
        (self.shoulder + self.elbow + self.wrist) / 3.0
    }
}

/// Kinematiske trekk for én sving. Alle felt er endelige tall;
/// NaN/Inf fra degenererte svinger er sanert til 0.0 før lagring.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    pub range_of_motion: JointValues,
    pub smoothness: JointValues,
    pub arm_rotation: f64,
}

/// Hvilken statistisk test som produserte resultatet.
/// `None` markerer nøytral fallback (brutte forutsetninger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestMethod {
    Paired,
    Unpaired,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub statistic: f64,
    pub p_value: f64, // alltid i [0, 1]
    pub significant: bool,
    pub improvement: f64,
    pub method: TestMethod,
}

impl ComparisonResult {
    /// Nøytralt resultat når testforutsetninger er brutt: en manglende
    /// test skal aldri stoppe analysen.
    pub fn neutral() -> Self {
        Self {
            statistic: 0.0,
            p_value: 1.0,
            significant: false,
            improvement: 1.0,
            method: TestMethod::None,
        }
    }
}

/// Kriteriescore med per-ledd-detaljer (range of motion, smoothness).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: f64,
    pub details: JointValues,
}

/// Armrotasjon har ingen per-ledd-oppdeling; detaljene er rå snittverdier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationScore {
    pub score: f64,
    pub before: f64,
    pub after: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaFlags {
    pub range_of_motion: bool,
    pub smoothness: bool,
    pub arm_rotation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportDetails {
    pub range_of_motion: CriterionScore,
    pub smoothness: CriterionScore,
    pub arm_rotation: RotationScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointComparisons {
    pub shoulder: ComparisonResult,
    pub elbow: ComparisonResult,
    pub wrist: ComparisonResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportStatistics {
    pub range_of_motion: JointComparisons,
    pub smoothness: JointComparisons,
    pub arm_rotation: ComparisonResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingCount {
    pub before: usize,
    pub after: usize,
}

/// Sluttresultatet av én før/etter-analyse.
/// Konvensjon for alle scorer: 1.0 = ingen endring, >1.0 = forbedring,
/// <1.0 = tilbakegang.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImprovementReport {
    pub overall_score: f64,
    pub improved: bool,
    pub criteria: CriteriaFlags,
    pub details: ReportDetails,
    pub statistics: ReportStatistics,
    pub swing_count: SwingCount,
}
