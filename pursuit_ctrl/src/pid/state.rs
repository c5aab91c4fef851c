//! PID controller state and step algorithm

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use crate::fb_ctrl::{FbCtrlError, FeedbackController};
use util::maths::clamp;

use super::params::{Gain, PidMode, PidParams, Saturation};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A discrete multi-mode PID controller.
///
/// The controller owns its full history (error history, previous process
/// value, previous target, integral accumulator and last output), so
/// independently stepped controllers never interfere with each other. All
/// history is zero at construction, meaning a fresh controller may be stepped
/// immediately without calling [`Pid::reset`] first.
#[derive(Debug, Clone, Serialize)]
pub struct Pid {
    /// Controller parameters (mode, gains, saturation)
    params: PidParams,

    /// Error history. Index 0 is the current error, 1 the previous, 2 the one
    /// before that.
    error_hist: [f64; 3],

    /// Previous process value
    prev_process_val: f64,

    /// Previous target
    prev_target: f64,

    /// The integral accumulation
    integral: f64,

    /// Last computed control output
    output: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pid {
    /// Create a new controller from the given parameters.
    pub fn new(params: PidParams) -> Self {
        Self {
            params,
            error_hist: [0f64; 3],
            prev_process_val: 0f64,
            prev_target: 0f64,
            integral: 0f64,
            output: 0f64
        }
    }

    /// Create a new controller with the given gains.
    ///
    /// The mode defaults to [`PidMode::Positional`] and the output is
    /// unclamped.
    pub fn with_gain(k_p: f64, k_i: f64, k_d: f64) -> Self {
        Self::new(PidParams {
            gain: Gain::new(k_p, k_i, k_d),
            ..Default::default()
        })
    }

    /// Get the controller parameters.
    pub fn params(&self) -> &PidParams {
        &self.params
    }

    /// Replace the controller parameters wholesale.
    ///
    /// This is a pure setter, no recomputation occurs and the controller
    /// history is untouched.
    pub fn set_params(&mut self, params: PidParams) {
        self.params = params;
    }

    /// Set the controller gains.
    pub fn set_gain(&mut self, gain: Gain) {
        self.params.gain = gain;
    }

    /// Set the control law used by the controller.
    ///
    /// Switching mode does not reset the controller history, the new law
    /// simply applies from the next step onwards.
    pub fn set_mode(&mut self, mode: PidMode) {
        self.params.mode = mode;
    }

    /// Set the saturation limits applied to the output.
    pub fn set_saturation(&mut self, min: f64, max: f64) {
        self.params.saturation = Some(Saturation { min, max });
    }

    /// Set symmetric saturation limits of `[-max_abs, max_abs]`.
    pub fn set_saturation_abs(&mut self, max_abs: f64) {
        self.set_saturation(-max_abs, max_abs);
    }

    /// Remove the saturation limits, leaving the output unclamped.
    pub fn clear_saturation(&mut self) {
        self.params.saturation = None;
    }

    /// Zero all controller history.
    ///
    /// This clears the error history, previous process value, previous
    /// target, integral accumulator and last output. It is the only way to
    /// clear integral windup. Parameters are untouched.
    pub fn reset(&mut self) {
        self.error_hist = [0f64; 3];
        self.prev_process_val = 0f64;
        self.prev_target = 0f64;
        self.integral = 0f64;
        self.output = 0f64;
    }

    /// Perform one control step, driving `process_val` towards `target`.
    ///
    /// The step:
    /// 1. Computes the current error `target - process_val`.
    /// 2. Accumulates the integral trapezoidally. This happens once per step
    ///    regardless of mode, all four modes share the accumulator.
    /// 3. Computes the output of the active control law (exactly one law is
    ///    evaluated per step).
    /// 4. Shifts the history along ready for the next step.
    /// 5. Clamps the output to the saturation limits, if configured.
    ///
    /// # Errors
    ///
    /// A zero or negative `dt_s` makes the derivative (and the velocity-form
    /// integral) undefined, so such steps fail with
    /// [`FbCtrlError::InvalidTimestep`]. The check happens before any state
    /// is mutated, a failed step leaves the controller history unchanged.
    pub fn step(
        &mut self,
        target: f64,
        process_val: f64,
        dt_s: f64
    ) -> Result<f64, FbCtrlError> {

        if dt_s <= 0f64 {
            return Err(FbCtrlError::InvalidTimestep(dt_s));
        }

        // Latest error
        self.error_hist[0] = target - process_val;

        // Trapezoidal integral accumulation, shared by all modes
        self.integral += (self.error_hist[0] + self.error_hist[1]) * (dt_s / 2f64);

        // Evaluate the active control law. Exactly one law is computed per
        // step.
        let raw_output = match self.params.mode {
            PidMode::Positional => self.law_positional(dt_s),
            PidMode::Velocity => self.law_velocity(dt_s),
            PidMode::DerivativeFirst => self.law_deriv_first(process_val, dt_s),
            PidMode::ProportionalDerivativeFirst =>
                self.law_prop_deriv_first(process_val, dt_s)
        };

        trace!(
            "PID step: target = {} (prev {}), process_val = {}, error = {}, raw output = {}",
            target, self.prev_target, process_val, self.error_hist[0], raw_output
        );

        // Shift the history along for the next step
        self.error_hist[2] = self.error_hist[1];
        self.error_hist[1] = self.error_hist[0];
        self.prev_target = target;
        self.prev_process_val = process_val;

        // Saturate the output if limits are configured
        self.output = match self.params.saturation {
            Some(ref sat) => clamp(&raw_output, &sat.min, &sat.max),
            None => raw_output
        };

        Ok(self.output)
    }

    /// Get the last computed control output without recomputation.
    pub fn output(&self) -> f64 {
        self.output
    }
}

impl Pid {
    /// Standard positional law: all terms computed on the error.
    fn law_positional(&self, dt_s: f64) -> f64 {
        let gain = &self.params.gain;

        let p = gain.k_p * self.error_hist[0];
        let i = gain.k_i * self.integral;
        let d = gain.k_d * (self.error_hist[0] - self.error_hist[1]) / dt_s;

        p + i + d
    }

    /// Incremental (velocity) law: the delta is added on top of the previous
    /// process value.
    fn law_velocity(&self, dt_s: f64) -> f64 {
        let gain = &self.params.gain;

        let p = gain.k_p * (self.error_hist[0] - self.error_hist[1]);
        let i = gain.k_i * self.error_hist[0] * dt_s;
        let d = gain.k_d
            * (self.error_hist[0] - 2f64 * self.error_hist[1] + self.error_hist[2])
            / dt_s;

        self.prev_process_val + p + i + d
    }

    /// Derivative-first law: derivative on the process value, avoiding
    /// derivative kick on target changes.
    fn law_deriv_first(&self, process_val: f64, dt_s: f64) -> f64 {
        let gain = &self.params.gain;

        let p = gain.k_p * self.error_hist[0];
        let i = gain.k_i * self.integral;
        let d = -gain.k_d * (process_val - self.prev_process_val) / dt_s;

        p + i + d
    }

    /// Proportional-and-derivative-first law: proportional and derivative
    /// both on the process value, integral on the error.
    fn law_prop_deriv_first(&self, process_val: f64, dt_s: f64) -> f64 {
        let gain = &self.params.gain;

        let p = -gain.k_p * process_val;
        let i = gain.k_i * self.integral;
        let d = -gain.k_d * (process_val - self.prev_process_val) / dt_s;

        p + i + d
    }
}

impl Default for Pid {
    fn default() -> Self {
        Self::new(PidParams::default())
    }
}

impl FeedbackController for Pid {
    fn reset(&mut self) {
        Pid::reset(self);
    }

    fn step(
        &mut self,
        target: f64,
        process_val: f64,
        dt_s: f64
    ) -> Result<f64, FbCtrlError> {
        Pid::step(self, target, process_val, dt_s)
    }

    fn output(&self) -> f64 {
        Pid::output(self)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
