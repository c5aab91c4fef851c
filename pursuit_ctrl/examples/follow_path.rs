//! # Path following demo
//!
//! Drives a toy omnidirectional vehicle around a square of waypoints using
//! the pure pursuit controller. The demo owns everything the library
//! deliberately doesn't: the control loop timing, the choice of current
//! waypoint, the heading-relative steering preprocessing, and the (very
//! crude) plant integration.
//!
//! Run with `cargo run --example follow_path` from the workspace root.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::path::Path;

use log::{info, warn};

use pursuit_ctrl::pure_pursuit::{Params, PurePursuitCtrl};
use util::{
    logger::{logger_init, LevelFilter},
    maths::get_ang_dist_2pi,
    params,
    Pose2
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Control cycle timestep
const DT_S: f64 = 0.05;

/// Distance below which a waypoint counts as reached. Waypoint advancement is
/// the caller's job, the controller itself has no notion of "reached".
const WAYPOINT_TOLERANCE_M: f64 = 0.05;

/// Gain used for the caller-side heading-relative steering
const HEADING_K: f64 = 2.0;

/// Maximum number of control cycles before giving up
const MAX_CYCLES: usize = 20_000;

// ---------------------------------------------------------------------------
// MAIN
// ---------------------------------------------------------------------------

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger_init(LevelFilter::Info, None)?;

    // Load the controller parameters and build the controller
    let params: Params = params::load(Path::new("params/pursuit_ctrl.toml"))?;
    let mut ctrl = PurePursuitCtrl::from_params(&params);

    // A square path, 2 m on a side
    ctrl.set_path(vec![
        Pose2::new(2.0, 0.0, 0.0),
        Pose2::new(2.0, 2.0, 0.0),
        Pose2::new(0.0, 2.0, 0.0),
        Pose2::new(0.0, 0.0, 0.0)
    ]);

    let mut pose = Pose2::new(0.0, 0.0, 0.0);
    let mut wp_index = 0;

    info!("Following {} waypoints from {:?}", ctrl.path().len(), pose);

    for cycle in 0..MAX_CYCLES {
        let target = ctrl.path()[wp_index];

        // Caller-side waypoint advancement
        if pose.distance_to(&target) < WAYPOINT_TOLERANCE_M {
            info!(
                "Waypoint {} reached at cycle {} (pose: ({:.3}, {:.3}))",
                wp_index, cycle, pose.x(), pose.y()
            );

            wp_index += 1;
            if wp_index >= ctrl.path().len() {
                info!("Path complete");
                return Ok(());
            }

            continue;
        }

        let cmd = ctrl.step(wp_index, &pose, DT_S)?;

        // The linear controller drives the distance error to zero, so for a
        // positive distance error its output is negative. Negate it to get a
        // forward speed.
        let speed_ms = (-cmd.linear).max(0.0);

        // The angular command tracks the absolute bearing from the target
        // towards us, which is only useful once combined with our own
        // heading. Do that preprocessing here: steer the heading towards the
        // direction of travel.
        let travel_dir_rad = pose.bearing_to(&target);
        let turn_rads = HEADING_K * get_ang_dist_2pi(pose.heading_rad, travel_dir_rad);

        // Crude plant integration: an omnidirectional vehicle moving towards
        // the target while turning to face it
        pose.position_m[0] += speed_ms * travel_dir_rad.cos() * DT_S;
        pose.position_m[1] += speed_ms * travel_dir_rad.sin() * DT_S;
        pose.heading_rad += turn_rads * DT_S;
    }

    warn!(
        "Gave up after {} cycles, waypoint {} not reached (pose: ({:.3}, {:.3}))",
        MAX_CYCLES, wp_index, pose.x(), pose.y()
    );

    Ok(())
}
