extern crate nalgebra as na;

use na::Isometry3;

/// Pose is used a pose of the robot end effector. It contains both Cartesian position and rotation quaternion
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(0.3, 0.0, 0.5);
/// // The quaternion should be normalized to represent a valid rotation.
/// let rotation = UnitQuaternion::from_quaternion(na::Quaternion::new(0.0, 1.0, 0.0, 0.0).normalize());
/// let transform = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Rotations of the 7 joints, in radians, in the order of the manufacturer (J1 is the base joint).
pub type Joints = [f64; 7];

/// The solver always returns exactly 4 solutions, one per [`crate::cases::Branch`].
/// Solutions that do not exist or violate joint limits are filled with NaN.
/// Use `is_valid` in utils.rs to check if the solution is valid.
pub type Solutions = [Joints; 4];

/// All joints at zero. The robot is then pointing straight up, with the hand facing down.
pub const JOINTS_AT_ZERO: Joints = [0.0; 7];

/// The invalid solution sentinel. All components are NaN, never only some of them.
pub const JOINTS_NAN: Joints = [f64::NAN; 7];

/// Solutions where no branch is valid.
pub const SOLUTIONS_NAN: Solutions = [JOINTS_NAN; 4];

pub trait Kinematics: Send + Sync {
    /// Find all 4 branch solutions for the given end effector pose and the redundant
    /// angle of joint 7. The reference joints are only used to pick J1 when the
    /// shoulder is singular (axes of J1 and J3 aligned) and are otherwise ignored.
    /// Branches without a solution within joint limits are returned as [`JOINTS_NAN`].
    ///
    /// J4 is taken from the elbow triangle with a single root. Configurations with the arm
    /// almost fully stretched (J4 above θH46 + θ342 - π, about -0.467 rad for Franka robots,
    /// up to the J4 maximum) are only reached by the mirrored root and are never returned.
    fn inverse(&self, pose: &Pose, q7: f64, reference: &Joints) -> Solutions;

    /// Find the single solution that belongs to the same branch (wrist and shoulder case)
    /// as the reference joints. If this solution does not exist or violates joint limits,
    /// [`JOINTS_NAN`] is returned. Other branches are never used as fallback, unless the
    /// reference itself sits on the boundary between branches: then the closest valid
    /// solution among the branches it may belong to is returned.
    fn inverse_case_consistent(&self, pose: &Pose, q7: f64, reference: &Joints) -> Joints;

    /// Find the pose of the end effector for the given joint angles.
    fn forward(&self, qs: &Joints) -> Pose;

    /// Frames of all joints (J1 to J7), followed by the flange and the end effector.
    fn forward_with_joint_poses(&self, qs: &Joints) -> [Pose; 9];
}
