//! # Pure pursuit control module
//!
//! Pure pursuit is responsible for steering a vehicle towards a sequence of
//! target poses. It does this using a pair of feedback controllers: a linear
//! controller driving the euclidean distance to the target pose to zero, and
//! an angular controller driving the bearing from the target towards the
//! vehicle to zero.
//!
//! The module deliberately has no notion of a waypoint being "reached" and no
//! internal cursor: the caller selects which waypoint is current by passing
//! its index to each [`state::PurePursuitCtrl::step`] call. This keeps
//! waypoint advancement policy (lookahead, tolerance, skipping) entirely in
//! the embedding application.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod params;
pub mod state;

// ---------------------------------------------------------------------------
// REEXPORTS
// ---------------------------------------------------------------------------

pub use params::Params;
pub use state::{PurePursuitCtrl, PursuitCmd, PursuitCtrlError};
