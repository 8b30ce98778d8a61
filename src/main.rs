use std::f64::consts::PI;
use rs_franka_kinematics::kinematic_traits::{Joints, Kinematics, Pose, JOINTS_AT_ZERO};
use rs_franka_kinematics::kinematics_impl::FrankaKinematics;
use rs_franka_kinematics::parameters::franka_kinematics::Parameters;
use rs_franka_kinematics::utils::{dump_joints, dump_solutions};

/// Usage example.
fn main() -> anyhow::Result<()> {
    let robot = FrankaKinematics::new(Parameters::panda());
    let joints: Joints = [0.0, -PI / 4.0, 0.0, -3.0 * PI / 4.0, 0.0, PI / 2.0, PI / 4.0]; // alias of [f64; 7]
    println!("Ready pose joints: ");
    dump_joints(&joints);

    let pose: Pose = robot.forward(&joints); // Pose is alias of nalgebra::Isometry3<f64>
    println!("End effector at {}", pose.translation.vector.transpose());

    println!("All 4 branches for J7 = {:.2} degrees:", joints[6].to_degrees());
    let solutions = robot.inverse(&pose, joints[6], &JOINTS_AT_ZERO);
    dump_solutions(&solutions);

    println!("The same pose with another J7 (the arm has one joint more than needed):");
    let solutions = robot.inverse(&pose, 1.0, &JOINTS_AT_ZERO);
    dump_solutions(&solutions);

    println!("Moving 5 cm down, staying on the branch of the ready pose:");
    let lower = nalgebra::Translation3::new(0.0, 0.0, -0.05) * pose;
    let next = robot.inverse_case_consistent(&lower, joints[6], &joints);
    dump_joints(&next);

    println!("The same through the flat interface (column-major 4x4 matrix):");
    let flat = robot.forward_column_major(&joints)?;
    let next = robot.solve_case_consistent(&flat, joints[6], &joints)?;
    dump_joints(&next);

    #[cfg(feature = "allow_filesystem")] {
        // This requires YAML library
        let parameters = Parameters::fr3();
        println!("Reading:\n{}", &parameters.to_yaml());
    }
    Ok(())
}
