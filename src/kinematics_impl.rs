//! Closed-form inverse kinematics of the Franka robots with the J7 angle as the
//! redundancy parameter.
//!
//! The algorithm follows Yanhao He and Steven Liu, _Analytical Inverse Kinematics for Franka
//! Emika Panda – a Geometrical Solver for 7-DOF Manipulators with Unconventional Design_ (2021).
//! Fixing J7 fixes the wrist point (origin of joint 6). The elbow angle J4 then follows from
//! the triangle shoulder - elbow - wrist, J6 has two roots, and the shoulder can be flipped,
//! giving four branches. J1, J2, J3 and J5 are obtained by back substitution.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{Isometry3, Matrix3, Matrix4, Translation3, Vector3};
use tracing::{debug, trace};

use crate::cases::{Branch, CaseIdentity, ShoulderCase, WristCase};
use crate::constraints::{Constraints, LIMIT_TOLERANCE};
use crate::kinematic_traits::{Joints, Kinematics, Pose, Solutions, JOINTS_NAN, SOLUTIONS_NAN};
use crate::parameter_error::ParameterError;
use crate::parameters::franka_kinematics::Parameters;
use crate::utils::franka_kinematics::{is_valid, valid};
use crate::utils::max_joint_distance;

/// Arguments of acos and asin that exceed [-1, 1] by less than this are clamped
/// (rounding at the boundary of the workspace). Larger excess means no solution.
pub const DOMAIN_TOLERANCE: f64 = 1E-12;

/// The shoulder is singular (J1 and J3 axes aligned) when the horizontal part of the
/// shoulder to elbow direction is shorter than this fraction of its length.
pub const SHOULDER_SINGULARITY_TOLERANCE: f64 = 1E-9;

const TWO_PI: f64 = 2.0 * PI;

#[derive(Debug, Clone)]
pub struct FrankaKinematics {
    parameters: Parameters,
    constraints: Constraints,

    // Derived from the parameters once, so that the solver only reads constants.
    d7e: f64,
    yaw: f64,
    p_2: Vector3<f64>,
    ll24: f64,
    ll46: f64,
    l24: f64,
    l46: f64,
    theta_h46: f64,
    theta_342: f64,
    theta_46h: f64,
}

/// Everything that does not depend on the branch.
struct WristPoint {
    r_6: Matrix3<f64>,
    p_6: Vector3<f64>,
    v_26: Vector3<f64>,
    l26: f64,
    theta_246: f64,
    theta_462: f64,
    theta_26h: f64,
    q4: f64,
}

impl FrankaKinematics {
    /// Creates a new `FrankaKinematics` instance with the given parameters.
    pub fn new(parameters: Parameters) -> Self {
        let p = &parameters;
        let ll24 = p.a4 * p.a4 + p.d3 * p.d3;
        let ll46 = p.a4 * p.a4 + p.d5 * p.d5;
        FrankaKinematics {
            constraints: Constraints::from_parameters(p),
            d7e: p.d7e(),
            yaw: p.end_effector.yaw(),
            p_2: Vector3::new(0.0, 0.0, p.d1),
            ll24,
            ll46,
            l24: ll24.sqrt(),
            l46: ll46.sqrt(),
            theta_h46: f64::atan2(p.d5, p.a4),
            theta_342: f64::atan2(p.d3, p.a4),
            theta_46h: f64::atan2(p.a4, p.d5),
            parameters,
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// All four branches from a 4x4 homogeneous transform, given as 16 values in column-major
    /// order, and a reference of exactly 7 joints. Wrong lengths are reported as
    /// [`ParameterError::InvalidLength`]; unreachable branches are NaN, not errors.
    pub fn solve_all(&self, pose: &[f64], q7: f64, reference: &[f64]) -> Result<Solutions, ParameterError> {
        let (r_ee, p_ee) = rotation_translation_from_column_major(pose)?;
        let reference = joints_from_slice(reference)?;
        Ok(self.solve_validated(&r_ee, &p_ee, q7, &reference))
    }

    /// The solution of the same branch as the reference, from the flat column-major transform.
    /// See [`FrankaKinematics::solve_all`] for the input contract.
    pub fn solve_case_consistent(&self, pose: &[f64], q7: f64, reference: &[f64]) -> Result<Joints, ParameterError> {
        let (r_ee, p_ee) = rotation_translation_from_column_major(pose)?;
        let reference = joints_from_slice(reference)?;
        let solutions = self.solve_validated(&r_ee, &p_ee, q7, &reference);
        Ok(self.select_case_consistent(&solutions, &reference))
    }

    /// Forward kinematics returning the 4x4 homogeneous transform as 16 values in
    /// column-major order.
    pub fn forward_column_major(&self, joints: &[f64]) -> Result<[f64; 16], ParameterError> {
        let joints = joints_from_slice(joints)?;
        let matrix: Matrix4<f64> = self.forward(&joints).to_homogeneous();
        let mut flat = [0.0; 16];
        flat.copy_from_slice(matrix.as_slice());
        Ok(flat)
    }

    /// Re-derive the branch the given joint configuration belongs to.
    pub fn case_identity(&self, qs: &Joints) -> CaseIdentity {
        let frames = self.forward_with_joint_poses(qs);
        let p_2 = frames[1].translation.vector;
        let p_6 = frames[5].translation.vector;
        let z_6 = frames[5].rotation * Vector3::z();
        // H lies on the forearm axis, level with joint 4
        let p_h = (frames[3] * Translation3::new(-self.parameters.a4, 0.0, 0.0)).translation.vector;
        CaseIdentity::classify(&p_2, &p_h, &p_6, &z_6, qs[1])
    }

    /// Pick the solution matching the case of the reference. If the reference is exactly on the
    /// boundary between cases, the valid solution closest to it among the compatible branches
    /// is taken.
    pub fn select_case_consistent(&self, solutions: &Solutions, reference: &Joints) -> Joints {
        let identity = self.case_identity(reference);
        if !identity.is_ambiguous() {
            return solutions[identity.branch.index()];
        }
        debug!(?identity, "reference is on a case boundary, using the closest compatible solution");
        Branch::ALL.iter()
            .filter(|branch| identity.compatible(**branch))
            .filter_map(|branch| valid(&solutions[branch.index()]))
            .filter_map(|solution| {
                let distance = max_joint_distance(&solution, reference);
                if distance.is_nan() { None } else { Some((distance, solution)) }
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, solution)| solution)
            .unwrap_or(JOINTS_NAN)
    }

    fn solve_validated(&self, r_ee: &Matrix3<f64>, p_ee: &Vector3<f64>, q7: f64, reference: &Joints) -> Solutions {
        self.constraints.validate_all(self.solve_branches(r_ee, p_ee, q7, reference))
    }

    /// All four branches without joint limits applied, except that J6 is shifted by a full turn
    /// when this brings it into its range. Branches without a real solution are NaN.
    fn solve_branches(&self, r_ee: &Matrix3<f64>, p_ee: &Vector3<f64>, q7: f64, reference: &Joints) -> Solutions {
        let Some(w) = self.wrist_point(r_ee, p_ee, q7) else {
            return SOLUTIONS_NAN;
        };
        let mut solutions = SOLUTIONS_NAN;

        // Length from the wrist to the point P where the J3 axis crosses the J5 axis
        let theta_p26 = 3.0 * FRAC_PI_2 - w.theta_462 - w.theta_246 - self.theta_342;
        let theta_p = PI - theta_p26 - w.theta_26h;
        let lp6 = w.l26 * theta_p26.sin() / theta_p.sin();

        for wrist in [WristCase::Negative, WristCase::Positive] {
            let Some(q6) = self.wrist_angle(&w, wrist) else {
                continue;
            };
            let z_5 = w.r_6 * Vector3::new(q6.sin(), q6.cos(), 0.0);
            let v_2p = w.p_6 - lp6 * z_5 - self.p_2;
            let l2p = v_2p.norm();

            let (front, back) = if v_2p.xy().norm() <= SHOULDER_SINGULARITY_TOLERANCE * l2p {
                // J1 and J3 are aligned, any J1 works. Keep the current one.
                trace!(q1 = reference[0], "shoulder singularity");
                ((reference[0], 0.0), (reference[0], 0.0))
            } else {
                let q1 = f64::atan2(v_2p.y, v_2p.x);
                let q2 = (v_2p.z / l2p).clamp(-1.0, 1.0).acos();
                let q1_flipped = if q1 < 0.0 { q1 + PI } else { q1 - PI };
                ((q1, q2), (q1_flipped, -q2))
            };

            for (shoulder, (q1, q2)) in [(ShoulderCase::Front, front), (ShoulderCase::Back, back)] {
                let branch = Branch::from_cases(wrist, shoulder);
                solutions[branch.index()] = self.back_substitute(&w, &v_2p, &z_5, [q1, q2, q6, q7]);
            }
        }
        solutions
    }

    /// Wrist point and the elbow triangle. None if the wrist point cannot be reached.
    fn wrist_point(&self, r_ee: &Matrix3<f64>, p_ee: &Vector3<f64>, q7: f64) -> Option<WristPoint> {
        let z_ee: Vector3<f64> = r_ee.column(2).into_owned();
        let p_7 = p_ee - self.d7e * z_ee;

        // x axis of frame 6 expressed in the end effector frame
        let angle = q7 + self.yaw;
        let x_ee_6 = Vector3::new(angle.cos(), -angle.sin(), 0.0);
        let x_6 = (r_ee * x_ee_6).normalize();
        let p_6 = p_7 - self.parameters.a7 * x_6;

        let v_26 = p_6 - self.p_2;
        let ll26 = v_26.norm_squared();
        let l26 = ll26.sqrt();

        let Some(theta_246) = acos_checked((self.ll24 + self.ll46 - ll26) / (2.0 * self.l24 * self.l46)) else {
            trace!(l26, "wrist point out of reach");
            return None;
        };
        let Some(theta_462) = acos_checked((ll26 + self.ll46 - self.ll24) / (2.0 * l26 * self.l46)) else {
            trace!(l26, "wrist point too close to the shoulder");
            return None;
        };
        let q4 = theta_246 + self.theta_h46 + self.theta_342 - TWO_PI;

        let z_6 = z_ee.cross(&x_6);
        let y_6 = z_6.cross(&x_6);
        let r_6 = Matrix3::from_columns(&[x_6, y_6.normalize(), z_6.normalize()]);

        Some(WristPoint {
            r_6,
            p_6,
            v_26,
            l26,
            theta_246,
            theta_462,
            theta_26h: self.theta_46h + theta_462,
            q4,
        })
    }

    /// J6 for the given wrist case, shifted by a full turn if this brings it into the J6 range.
    /// Values within [`LIMIT_TOLERANCE`] of the range are not shifted, the validator snaps them.
    fn wrist_angle(&self, w: &WristPoint, wrist: WristCase) -> Option<f64> {
        let d26 = -w.l26 * w.theta_26h.cos();
        let v_6_62 = w.r_6.transpose() * (-w.v_26);
        let phi6 = f64::atan2(v_6_62.y, v_6_62.x);
        let Some(theta6) = asin_checked(d26 / v_6_62.xy().norm()) else {
            trace!(?wrist, "no real J6 root");
            return None;
        };
        let q6 = match wrist {
            WristCase::Negative => PI - theta6 - phi6,
            WristCase::Positive => theta6 - phi6,
        };
        // A J6 exactly at its limit must not be shifted because of rounding
        let (q6_min, q6_max) = (self.parameters.q_min[5], self.parameters.q_max[5]);
        Some(if q6 < q6_min - LIMIT_TOLERANCE {
            q6 + TWO_PI
        } else if q6 > q6_max + LIMIT_TOLERANCE {
            q6 - TWO_PI
        } else {
            q6
        })
    }

    /// J3 and J5 once J1, J2, J4, J6 and J7 are known. Returns the sentinel if anything
    /// is not finite, so that a solution is never partially valid.
    fn back_substitute(&self, w: &WristPoint, v_2p: &Vector3<f64>, z_5: &Vector3<f64>,
                       [q1, q2, q6, q7]: [f64; 4]) -> Joints {
        let p = &self.parameters;

        let z_3 = v_2p.normalize();
        let y_3 = (-w.v_26.cross(v_2p)).normalize();
        let x_3 = y_3.cross(&z_3);
        let r_2 = rot_z(q1) * modified_dh_rotation(-FRAC_PI_2, q2);
        let x_2_3 = r_2.transpose() * x_3;
        let q3 = f64::atan2(x_2_3.z, x_2_3.x);

        let v_h4 = self.p_2 + p.d3 * z_3 + p.a4 * x_3 - w.p_6 + p.d5 * *z_5;
        let r_5 = w.r_6 * modified_dh_rotation(FRAC_PI_2, q6).transpose();
        let v_5_h4 = r_5.transpose() * v_h4;
        let q5 = -f64::atan2(v_5_h4.y, v_5_h4.x);

        let joints = [q1, q2, q3, w.q4, q5, q6, q7];
        if is_valid(&joints) {
            joints
        } else {
            trace!(?joints, "degenerate branch");
            JOINTS_NAN
        }
    }

    /// Link transforms of joints 1 to 7 in the modified Denavit-Hartenberg convention
    /// (a, alpha, d), followed by the fixed flange and end effector transforms.
    fn link_transforms(&self, qs: &Joints) -> [Pose; 9] {
        let p = &self.parameters;
        let links = [
            (0.0, 0.0, p.d1),
            (0.0, -FRAC_PI_2, 0.0),
            (0.0, FRAC_PI_2, p.d3),
            (p.a4, FRAC_PI_2, 0.0),
            (-p.a4, -FRAC_PI_2, p.d5),
            (0.0, FRAC_PI_2, 0.0),
            (p.a7, FRAC_PI_2, 0.0),
        ];
        let mut transforms = [Pose::identity(); 9];
        for (i, &(a, alpha, d)) in links.iter().enumerate() {
            transforms[i] = modified_dh(a, alpha, d, qs[i]);
        }
        transforms[7] = Isometry3::translation(0.0, 0.0, p.d_flange);
        transforms[8] = Isometry3::translation(0.0, 0.0, p.end_effector.length())
            * Isometry3::rotation(Vector3::z() * self.yaw);
        transforms
    }
}

impl Kinematics for FrankaKinematics {
    fn inverse(&self, pose: &Pose, q7: f64, reference: &Joints) -> Solutions {
        let (r_ee, p_ee) = rotation_translation(pose);
        self.solve_validated(&r_ee, &p_ee, q7, reference)
    }

    fn inverse_case_consistent(&self, pose: &Pose, q7: f64, reference: &Joints) -> Joints {
        let solutions = self.inverse(pose, q7, reference);
        self.select_case_consistent(&solutions, reference)
    }

    fn forward(&self, qs: &Joints) -> Pose {
        self.forward_with_joint_poses(qs)[8]
    }

    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; 9] {
        let mut poses = self.link_transforms(qs);
        for i in 1..poses.len() {
            poses[i] = poses[i - 1] * poses[i];
        }
        poses
    }
}

/// Modified (Craig) Denavit-Hartenberg transform: Rx(alpha) Tx(a) Rz(theta) Tz(d).
fn modified_dh(a: f64, alpha: f64, d: f64, theta: f64) -> Pose {
    Isometry3::rotation(Vector3::x() * alpha)
        * Isometry3::translation(a, 0.0, 0.0)
        * Isometry3::rotation(Vector3::z() * theta)
        * Isometry3::translation(0.0, 0.0, d)
}

/// Rotational part of the modified Denavit-Hartenberg transform for alpha = ±π/2.
fn modified_dh_rotation(alpha: f64, theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    let sa = alpha.sin().round();
    Matrix3::new(
        c, -s, 0.0,
        0.0, 0.0, -sa,
        sa * s, sa * c, 0.0,
    )
}

fn rot_z(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(
        c, -s, 0.0,
        s, c, 0.0,
        0.0, 0.0, 1.0,
    )
}

fn acos_checked(x: f64) -> Option<f64> {
    if x.is_nan() || x.abs() > 1.0 + DOMAIN_TOLERANCE {
        None
    } else {
        Some(x.clamp(-1.0, 1.0).acos())
    }
}

fn asin_checked(x: f64) -> Option<f64> {
    if x.is_nan() || x.abs() > 1.0 + DOMAIN_TOLERANCE {
        None
    } else {
        Some(x.clamp(-1.0, 1.0).asin())
    }
}

fn rotation_translation(pose: &Pose) -> (Matrix3<f64>, Vector3<f64>) {
    (pose.rotation.to_rotation_matrix().into_inner(), pose.translation.vector)
}

/// Rotation and translation of a 4x4 homogeneous transform stored column by column.
/// The rotation is used as given, it is not orthonormalized.
fn rotation_translation_from_column_major(pose: &[f64]) -> Result<(Matrix3<f64>, Vector3<f64>), ParameterError> {
    if pose.len() != 16 {
        debug!(expected = 16, found = pose.len(), "pose array has wrong length");
        return Err(ParameterError::InvalidLength { expected: 16, found: pose.len() });
    }
    let matrix = Matrix4::from_column_slice(pose);
    Ok((matrix.fixed_view::<3, 3>(0, 0).into_owned(), matrix.fixed_view::<3, 1>(0, 3).into_owned()))
}

/// Pose from a 4x4 homogeneous transform given as 16 values in column-major order.
pub fn pose_from_column_major(pose: &[f64]) -> Result<Pose, ParameterError> {
    let (rotation, translation) = rotation_translation_from_column_major(pose)?;
    let rotation = nalgebra::Rotation3::from_matrix_unchecked(rotation);
    Ok(Pose::from_parts(Translation3::from(translation),
                        nalgebra::UnitQuaternion::from_rotation_matrix(&rotation)))
}

/// Exactly 7 joint values, wrong length is an error.
pub fn joints_from_slice(joints: &[f64]) -> Result<Joints, ParameterError> {
    <Joints>::try_from(joints).map_err(|_| {
        debug!(expected = 7, found = joints.len(), "joint array has wrong length");
        ParameterError::InvalidLength { expected: 7, found: joints.len() }
    })
}
