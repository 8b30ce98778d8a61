//! Rust implementation of closed-form inverse and forward kinematics for the seven-axis
//! Franka Emika Panda and Franka Research 3 robots.
//!
//! This work builds upon the 2021 paper titled _Analytical Inverse Kinematics for Franka Emika Panda – a
//! Geometrical Solver for 7-DOF Manipulators with Unconventional Design_, authored by Yanhao He and
//! Steven Liu (ICCRE 2021, [arXiv:2104.03493](https://arxiv.org/abs/2104.03493)).
//!
//! The arm has one joint more than needed to reach a pose. The angle of joint 7 is therefore taken as
//! an input: with J7 fixed, the remaining six joints have up to four solutions, obtained without
//! iteration.
//!
//! # Features
//!
//! - All four branches are returned in fixed slots, branches without a solution within joint limits
//!   are filled with NaN. A solution is either fully valid or fully NaN, never partially valid.
//! - Case consistent solving: to follow a trajectory, the solution of the same branch as the previous
//!   joint positions is returned, so that the robot never jumps between branches.
//! - Hand or bare flange as end effector.
//! - Joint limits of the Panda and FR3 built in, or read with the robot geometry from a YAML file.
//! - Flat interface over 16-value column-major homogeneous transforms, as used by most robot
//!   middleware. Wrong lengths are reported as errors.
//!
//! # Parameters
//!
//! The robot geometry is given in the modified Denavit-Hartenberg convention by _d1, d3, d5, a4_ and
//! _a7_, plus the flange offset and the end effector. At zero, the arm points straight up with the hand
//! facing down. Fill out a `franka_kinematics::Parameters` data structure or use one of the built-in
//! robots:
//!
//! ```
//! use rs_franka_kinematics::kinematic_traits::{Kinematics, JOINTS_AT_ZERO};
//! use rs_franka_kinematics::kinematics_impl::FrankaKinematics;
//! use rs_franka_kinematics::parameters::franka_kinematics::Parameters;
//!
//! let robot = FrankaKinematics::new(Parameters::panda());
//! let joints = [0.0, -0.785, 0.0, -2.356, 0.0, 1.571, 0.785];
//! let pose = robot.forward(&joints);
//! let solution = robot.inverse_case_consistent(&pose, joints[6], &joints);
//! assert!((solution[3] - joints[3]).abs() < 1E-6);
//! let _ = robot.inverse(&pose, 0.3, &JOINTS_AT_ZERO);
//! ```

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;
pub mod parameter_error;

pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod constraints;
pub mod cases;

#[cfg(test)]
mod tests;
