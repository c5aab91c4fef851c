//! # Pursuit control library
//!
//! This library provides the feedback control building blocks used to drive a
//! vehicle along a list of target poses:
//!
//! - [`pid`] - a single-input/single-output discrete PID controller with four
//!   selectable control laws.
//! - [`pure_pursuit`] - a path following controller which runs a pair of
//!   feedback controllers (linear and angular) against an ordered list of
//!   target poses.
//! - [`fb_ctrl`] - the [`fb_ctrl::FeedbackController`] trait which lets the
//!   pure pursuit controller accept any feedback controller, not just PID.
//!
//! The library performs no I/O and owns no timing: the caller decides when a
//! control step happens and supplies the elapsed time for each step.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod fb_ctrl;
pub mod pid;
pub mod pure_pursuit;

// ---------------------------------------------------------------------------
// REEXPORTS
// ---------------------------------------------------------------------------

pub use fb_ctrl::{FbCtrlError, FeedbackController};
pub use pid::Pid;
pub use pure_pursuit::{PurePursuitCtrl, PursuitCmd};
