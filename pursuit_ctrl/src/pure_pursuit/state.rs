//! Pure pursuit controller state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Serialize;
use thiserror::Error;

// Internal
use crate::fb_ctrl::{FbCtrlError, FeedbackController};
use crate::pid::Pid;
use util::Pose2;

use super::Params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The command produced by one pure pursuit step.
///
/// This is a dedicated command type rather than a pose: the two fields are
/// controller outputs, not coordinates. The units depend entirely on the
/// gains the controllers were configured with.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct PursuitCmd {
    /// The linear demand, output of the distance error controller
    pub linear: f64,

    /// The angular demand, output of the bearing error controller
    pub angular: f64
}

/// A pure pursuit controller.
///
/// Owns an ordered list of target poses and a pair of feedback controllers
/// which are stepped against the distance and bearing errors to the waypoint
/// selected by the caller. The two controller instances are exclusively owned
/// by this controller, their histories are never shared.
#[derive(Debug, Clone)]
pub struct PurePursuitCtrl<F: FeedbackController> {
    /// The list of target poses. Index-addressed by the caller, there is no
    /// internal cursor.
    path: Vec<Pose2>,

    /// Controller driving the distance error to zero
    linear_ctrl: F,

    /// Controller driving the bearing error to zero
    angular_ctrl: F,

    /// Last computed command
    output: PursuitCmd
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur during pure pursuit control.
#[derive(Debug, Error)]
pub enum PursuitCtrlError {
    /// The waypoint index passed to `step` is not inside the path.
    #[error("Waypoint index {index} is out of range, the path has {len} waypoint(s)")]
    IndexOutOfRange {
        index: usize,
        len: usize
    },

    /// One of the feedback controllers rejected the step.
    #[error("Feedback controller error: {0}")]
    Controller(#[from] FbCtrlError)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<F: FeedbackController> PurePursuitCtrl<F> {
    /// Create a new controller with an empty path.
    pub fn new(linear_ctrl: F, angular_ctrl: F) -> Self {
        Self {
            path: Vec::new(),
            linear_ctrl,
            angular_ctrl,
            output: PursuitCmd::default()
        }
    }

    /// Replace the path wholesale.
    pub fn set_path(&mut self, path: Vec<Pose2>) {
        self.path = path;
    }

    /// Append a list of poses to the path, preserving their order.
    ///
    /// No deduplication and no geometric feasibility checks are performed.
    pub fn append_poses(&mut self, poses: Vec<Pose2>) {
        self.path.extend(poses);
    }

    /// Append a single pose to the path.
    pub fn push_pose(&mut self, pose: Pose2) {
        self.path.push(pose);
    }

    /// Get the current path.
    pub fn path(&self) -> &[Pose2] {
        &self.path
    }

    /// Install a new pair of feedback controllers, overwriting the previous
    /// ones.
    ///
    /// Whatever history the given instances carry is kept, no implicit reset
    /// is performed.
    pub fn set_controllers(&mut self, linear_ctrl: F, angular_ctrl: F) {
        self.linear_ctrl = linear_ctrl;
        self.angular_ctrl = angular_ctrl;
    }

    /// Perform one pure pursuit step against the waypoint at `index`.
    ///
    /// The distance from the target pose to `current_pose` is fed into the
    /// linear controller, and the bearing from the target pose towards
    /// `current_pose` is fed into the angular controller, both with a target
    /// of zero.
    ///
    /// Note that the bearing error is an absolute bearing in the world frame,
    /// the current pose's heading is not subtracted. Callers wanting a
    /// heading-relative steering error must combine the bearing with the
    /// vehicle heading themselves, for example with
    /// `util::maths::get_ang_dist_2pi`.
    ///
    /// # Errors
    ///
    /// - [`PursuitCtrlError::IndexOutOfRange`] if `index` is not inside the
    ///   path.
    /// - [`PursuitCtrlError::Controller`] if the timestep is zero or
    ///   negative.
    ///
    /// A failed step leaves both controller histories unchanged.
    pub fn step(
        &mut self,
        index: usize,
        current_pose: &Pose2,
        dt_s: f64
    ) -> Result<PursuitCmd, PursuitCtrlError> {

        // Resolve the target waypoint
        let target = match self.path.get(index) {
            Some(p) => *p,
            None => return Err(PursuitCtrlError::IndexOutOfRange {
                index,
                len: self.path.len()
            })
        };

        // Reject bad timesteps up front so that neither controller's history
        // is mutated by a failing step
        if dt_s <= 0f64 {
            return Err(FbCtrlError::InvalidTimestep(dt_s).into());
        }

        // Errors versus the target waypoint
        let dist_err_m = target.distance_to(current_pose);
        let bearing_err_rad = target.bearing_to(current_pose);

        // Drive both errors to zero
        let linear = self.linear_ctrl.step(0f64, dist_err_m, dt_s)?;
        let angular = self.angular_ctrl.step(0f64, bearing_err_rad, dt_s)?;

        debug!(
            "Pursuit step: waypoint {}, dist_err = {:.3} m, bearing_err = {:.3} rad, \
            cmd = ({:.3}, {:.3})",
            index, dist_err_m, bearing_err_rad, linear, angular
        );

        self.output = PursuitCmd { linear, angular };

        Ok(self.output)
    }

    /// Get the last computed command without recomputation.
    ///
    /// Before any step has been made this is the default (zero) command.
    pub fn output(&self) -> PursuitCmd {
        self.output
    }
}

impl PurePursuitCtrl<Pid> {
    /// Build a controller pair from the given parameters, with an empty path.
    pub fn from_params(params: &Params) -> Self {
        Self::new(Pid::new(params.linear), Pid::new(params.angular))
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::pid::{Gain, PidMode, PidParams};

    fn pure_p_ctrl(k_p: f64) -> PurePursuitCtrl<Pid> {
        PurePursuitCtrl::new(
            Pid::with_gain(k_p, 0f64, 0f64),
            Pid::with_gain(k_p, 0f64, 0f64)
        )
    }

    #[test]
    fn test_distance_and_bearing_feed() {
        let mut ctrl = pure_p_ctrl(1f64);
        ctrl.set_path(vec![Pose2::new(0f64, 0f64, 0f64)]);

        let cmd = ctrl.step(0, &Pose2::new(3f64, 4f64, 0f64), 0.1f64).unwrap();

        // Distance error is 5.0 and bearing error is atan2(4, 3), both fed
        // in with a target of zero, so a pure P controller with unit gain
        // outputs the negated errors
        assert!((cmd.linear - (0f64 - 5f64)).abs() < 1e-12);
        assert!((cmd.angular - (0f64 - 4f64.atan2(3f64))).abs() < 1e-12);
        assert_eq!(ctrl.output(), cmd);
    }

    #[test]
    fn test_path_building() {
        let mut ctrl = pure_p_ctrl(1f64);

        ctrl.set_path(vec![Pose2::new(0f64, 0f64, 0f64)]);
        ctrl.push_pose(Pose2::new(1f64, 0f64, 0f64));
        ctrl.append_poses(vec![
            Pose2::new(2f64, 0f64, 0f64),
            Pose2::new(3f64, 0f64, 0f64)
        ]);

        assert_eq!(ctrl.path().len(), 4);
        assert_eq!(ctrl.path()[2], Pose2::new(2f64, 0f64, 0f64));

        // set_path is a wholesale replacement
        ctrl.set_path(vec![Pose2::new(9f64, 9f64, 0f64)]);
        assert_eq!(ctrl.path().len(), 1);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut ctrl = pure_p_ctrl(2f64);
        ctrl.set_path(vec![Pose2::new(1f64, 1f64, 0f64)]);

        let mut reference = ctrl.clone();
        let current = Pose2::new(0f64, 0f64, 0f64);

        assert!(matches!(
            ctrl.step(1, &current, 0.1f64),
            Err(PursuitCtrlError::IndexOutOfRange { index: 1, len: 1 })
        ));

        // The failed step must leave both controller histories unchanged: a
        // subsequent valid step matches a controller which never saw it
        assert_eq!(
            ctrl.step(0, &current, 0.1f64).unwrap(),
            reference.step(0, &current, 0.1f64).unwrap()
        );
    }

    #[test]
    fn test_invalid_timestep() {
        let mut ctrl = pure_p_ctrl(2f64);
        ctrl.set_path(vec![Pose2::new(1f64, 1f64, 0f64)]);

        let mut reference = ctrl.clone();
        let current = Pose2::new(0f64, 0f64, 0f64);

        assert!(matches!(
            ctrl.step(0, &current, 0f64),
            Err(PursuitCtrlError::Controller(FbCtrlError::InvalidTimestep(_)))
        ));

        assert_eq!(
            ctrl.step(0, &current, 0.1f64).unwrap(),
            reference.step(0, &current, 0.1f64).unwrap()
        );
    }

    #[test]
    fn test_end_to_end() {
        // Both controllers pure P with Kp = 2, two waypoint path, target the
        // second waypoint
        let mut ctrl = pure_p_ctrl(2f64);
        ctrl.set_path(vec![
            Pose2::new(0f64, 0f64, 0f64),
            Pose2::new(2f64, 3f64, 0f64)
        ]);

        let current = Pose2::new(0.5f64, 0.5f64, 0.785f64);
        let cmd = ctrl.step(1, &current, 0.01f64).unwrap();

        let target = Pose2::new(2f64, 3f64, 0f64);
        let dist_err_m = target.distance_to(&current);
        let bearing_err_rad = (0.5f64 - 3f64).atan2(0.5f64 - 2f64);

        assert!((dist_err_m - 8.5f64.sqrt()).abs() < 1e-12);
        assert!((cmd.linear - 2f64 * (0f64 - dist_err_m)).abs() < 1e-12);
        assert!((cmd.angular - 2f64 * (0f64 - bearing_err_rad)).abs() < 1e-12);
    }

    #[test]
    fn test_set_controllers_keeps_history() {
        let mut ctrl = pure_p_ctrl(1f64);
        ctrl.set_path(vec![Pose2::new(0f64, 0f64, 0f64)]);

        // Pre-step a pair of I controllers outside the pursuit controller
        let mut linear = Pid::with_gain(0f64, 1f64, 0f64);
        let mut angular = Pid::with_gain(0f64, 1f64, 0f64);
        linear.step(0f64, 1f64, 0.1f64).unwrap();
        angular.step(0f64, 1f64, 0.1f64).unwrap();

        // Installing them must keep the integral they accumulated
        let integral_before = linear.output();
        ctrl.set_controllers(linear, angular);

        let cmd = ctrl.step(0, &Pose2::new(0f64, 0f64, 0f64), 0.1f64).unwrap();

        // Zero error step, so the output is purely the carried-over integral
        // plus the new trapezoid half-step
        assert!((cmd.linear - (integral_before + (-1f64) * 0.05f64)).abs() < 1e-12);
    }

    #[test]
    fn test_from_params() {
        let params = Params {
            linear: PidParams {
                mode: PidMode::Positional,
                gain: Gain::new(2f64, 0f64, 0f64),
                saturation: None
            },
            angular: PidParams {
                mode: PidMode::Positional,
                gain: Gain::new(1f64, 0f64, 0f64),
                saturation: None
            }
        };

        let mut ctrl = PurePursuitCtrl::from_params(&params);
        ctrl.set_path(vec![Pose2::new(0f64, 0f64, 0f64)]);

        let cmd = ctrl.step(0, &Pose2::new(3f64, 4f64, 0f64), 0.1f64).unwrap();
        assert!((cmd.linear - (-10f64)).abs() < 1e-12);
        assert!((cmd.angular - (0f64 - 4f64.atan2(3f64))).abs() < 1e-12);
    }

    #[test]
    fn test_params_from_toml() {
        let toml_str = r#"
            [linear]
            mode = "Positional"
            saturation = { min = -0.5, max = 0.5 }

            [linear.gain]
            k_p = 2.0
            k_i = 0.0
            k_d = 0.0

            [angular]
            mode = "DerivativeFirst"

            [angular.gain]
            k_p = 1.0
            k_i = 0.1
            k_d = 0.05
        "#;

        let params: Params = toml::from_str(toml_str).unwrap();

        assert_eq!(params.linear.mode, PidMode::Positional);
        assert_eq!(params.angular.mode, PidMode::DerivativeFirst);
        assert!((params.angular.gain.k_d - 0.05f64).abs() < 1e-12);

        // Saturation must apply: Kp = 2 on a distance error of 5 would give
        // -10 unclamped
        let mut ctrl = PurePursuitCtrl::from_params(&params);
        ctrl.set_path(vec![Pose2::new(0f64, 0f64, 0f64)]);

        let cmd = ctrl.step(0, &Pose2::new(3f64, 4f64, 0f64), 0.1f64).unwrap();
        assert_eq!(cmd.linear, -0.5f64);
    }
}
