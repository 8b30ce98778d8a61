//! Branch identity of the solutions.
//!
//! With J7 fixed, a reachable pose has up to four solutions. They differ in two binary choices:
//! the root taken for J6 (wrist case) and whether the shoulder reaches forward or is flipped
//! over by rotating J1 by 180 degrees and negating J2 (shoulder case). J4 is taken from the
//! elbow triangle as θ246 + θH46 + θ342 - 2π. The mirrored elbow root only fits the J4 range
//! close to full stretch (J4 above θH46 + θ342 - π, about -0.467 rad) and is not returned.
//!
//! The case is never stored. It is re-derived from the reference joints every time it is
//! needed, using the same sign tests that separate the branches of the solver.

use nalgebra::Vector3;

/// Below this the reference is treated as sitting on the boundary between two cases.
pub const CASE_BOUNDARY_TOLERANCE: f64 = 1E-9;

/// Which root of the J6 equation the solution uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WristCase {
    /// The elbow offset point is clockwise from the shoulder as seen along the J6 axis
    /// (non-positive triple product). J6 = π - Θ6 - Φ6.
    Negative,
    /// Counterclockwise (positive triple product). J6 = Θ6 - Φ6.
    Positive,
}

/// Whether J2 is tilted forward or the shoulder is flipped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShoulderCase {
    /// J2 >= 0, J1 points the arm towards the wrist.
    Front,
    /// J2 < 0, J1 is rotated by 180 degrees from the front solution.
    Back,
}

/// One of the four solution slots. The order of `Branch::ALL` is the order of the
/// solutions returned by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    NegativeFront,
    NegativeBack,
    PositiveFront,
    PositiveBack,
}

impl Branch {
    pub const ALL: [Branch; 4] = [
        Branch::NegativeFront,
        Branch::NegativeBack,
        Branch::PositiveFront,
        Branch::PositiveBack,
    ];

    pub fn from_cases(wrist: WristCase, shoulder: ShoulderCase) -> Self {
        match (wrist, shoulder) {
            (WristCase::Negative, ShoulderCase::Front) => Branch::NegativeFront,
            (WristCase::Negative, ShoulderCase::Back) => Branch::NegativeBack,
            (WristCase::Positive, ShoulderCase::Front) => Branch::PositiveFront,
            (WristCase::Positive, ShoulderCase::Back) => Branch::PositiveBack,
        }
    }

    /// Slot of this branch in the solutions array.
    pub fn index(&self) -> usize {
        match self {
            Branch::NegativeFront => 0,
            Branch::NegativeBack => 1,
            Branch::PositiveFront => 2,
            Branch::PositiveBack => 3,
        }
    }

    pub fn wrist(&self) -> WristCase {
        match self {
            Branch::NegativeFront | Branch::NegativeBack => WristCase::Negative,
            Branch::PositiveFront | Branch::PositiveBack => WristCase::Positive,
        }
    }

    pub fn shoulder(&self) -> ShoulderCase {
        match self {
            Branch::NegativeFront | Branch::PositiveFront => ShoulderCase::Front,
            Branch::NegativeBack | Branch::PositiveBack => ShoulderCase::Back,
        }
    }
}

/// The case a joint configuration belongs to, together with the information which of the
/// two choices could not be decided because the configuration is on (or numerically at)
/// the boundary between cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseIdentity {
    /// Branch of the configuration. On the boundary, ties go to `Negative` and `Front`.
    pub branch: Branch,
    pub wrist_ambiguous: bool,
    pub shoulder_ambiguous: bool,
}

impl CaseIdentity {
    /// Classify from the positions of the shoulder (joint 2 origin), the elbow offset point H
    /// (on the forearm axis, level with joint 4), the wrist (joint 6 origin), the J6 axis and J2.
    pub fn classify(p_2: &Vector3<f64>, p_h: &Vector3<f64>, p_6: &Vector3<f64>,
                    z_6: &Vector3<f64>, q2: f64) -> Self {
        let (wrist, wrist_ambiguous) = classify_wrist(p_2, p_h, p_6, z_6);
        let (shoulder, shoulder_ambiguous) = classify_shoulder(q2);
        CaseIdentity {
            branch: Branch::from_cases(wrist, shoulder),
            wrist_ambiguous,
            shoulder_ambiguous,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        self.wrist_ambiguous || self.shoulder_ambiguous
    }

    /// True if the branch agrees with every part of this identity that is not ambiguous.
    pub fn compatible(&self, branch: Branch) -> bool {
        (self.wrist_ambiguous || branch.wrist() == self.branch.wrist())
            && (self.shoulder_ambiguous || branch.shoulder() == self.branch.shoulder())
    }
}

fn classify_wrist(p_2: &Vector3<f64>, p_h: &Vector3<f64>, p_6: &Vector3<f64>,
                  z_6: &Vector3<f64>) -> (WristCase, bool) {
    let v_6h = p_h - p_6;
    let v_62 = p_2 - p_6;
    let scale = v_6h.norm() * v_62.norm();
    // Sine of the angle from V6H to V62 around the J6 axis
    let sine = v_6h.cross(&v_62).dot(z_6) / scale;
    let ambiguous = !sine.is_finite() || sine.abs() < CASE_BOUNDARY_TOLERANCE;
    let case = if sine <= 0.0 || sine.is_nan() { WristCase::Negative } else { WristCase::Positive };
    (case, ambiguous)
}

fn classify_shoulder(q2: f64) -> (ShoulderCase, bool) {
    let ambiguous = !q2.is_finite() || q2.abs() < CASE_BOUNDARY_TOLERANCE;
    let case = if q2 < 0.0 { ShoulderCase::Back } else { ShoulderCase::Front };
    (case, ambiguous)
}
