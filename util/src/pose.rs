//! # 2D pose
//!
//! This module provides the 2D pose type used throughout the control stack. A
//! pose is a position in the plane plus a heading angle, and can represent
//! either where something is or where it should be.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// Internal
use crate::maths::clamp;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A 2D pose: position in the plane plus a heading.
///
/// The heading is the angle to the positive X axis, following the right hand
/// rule about Z+ (up), in radians.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pose2 {
    /// The position in meters
    pub position_m: Vector2<f64>,

    /// The heading in radians
    pub heading_rad: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose2 {
    /// Create a new pose from its components.
    pub fn new(x_m: f64, y_m: f64, heading_rad: f64) -> Self {
        Self {
            position_m: Vector2::new(x_m, y_m),
            heading_rad
        }
    }

    /// Create a new pose from a position vector and a heading.
    pub fn from_position(position_m: Vector2<f64>, heading_rad: f64) -> Self {
        Self {
            position_m,
            heading_rad
        }
    }

    /// The X component of the position in meters.
    pub fn x(&self) -> f64 {
        self.position_m[0]
    }

    /// The Y component of the position in meters.
    pub fn y(&self) -> f64 {
        self.position_m[1]
    }

    /// The length of the position vector in meters.
    pub fn magnitude(&self) -> f64 {
        self.position_m.norm()
    }

    /// The squared length of the position vector.
    pub fn sqr_magnitude(&self) -> f64 {
        self.position_m.norm_squared()
    }

    /// The dot product of the position components of two poses.
    pub fn dot(&self, other: &Pose2) -> f64 {
        self.position_m.dot(&other.position_m)
    }

    /// Get the euclidean distance between two poses in meters.
    ///
    /// Headings play no part in the distance, only positions.
    pub fn distance_to(&self, other: &Pose2) -> f64 {
        (other.position_m - self.position_m).norm()
    }

    /// Get the bearing from this pose towards another pose.
    ///
    /// The bearing is the angle of the vector `self -> other` to the positive
    /// X axis, in the range (-pi, pi]. Note that this is an absolute bearing,
    /// the headings of the poses are not taken into account.
    pub fn bearing_to(&self, other: &Pose2) -> f64 {
        (other.position_m[1] - self.position_m[1])
            .atan2(other.position_m[0] - self.position_m[0])
    }

    /// Linearly interpolate between two poses.
    ///
    /// `t` is clamped into [0, 1], so that `t = 0` gives `self` and `t = 1`
    /// gives `other`. The heading is interpolated linearly, no angular
    /// wrapping is performed.
    pub fn lerp(&self, other: &Pose2, t: f64) -> Pose2 {
        let t = clamp(&t, &0f64, &1f64);

        Pose2 {
            position_m: self.position_m + (other.position_m - self.position_m) * t,
            heading_rad: self.heading_rad + (other.heading_rad - self.heading_rad) * t
        }
    }
}

// ---------------------------------------------------------------------------
// OPERATORS
// ---------------------------------------------------------------------------

impl std::ops::Add for Pose2 {
    type Output = Pose2;

    fn add(self, rhs: Pose2) -> Pose2 {
        Pose2 {
            position_m: self.position_m + rhs.position_m,
            heading_rad: self.heading_rad + rhs.heading_rad
        }
    }
}

impl std::ops::Sub for Pose2 {
    type Output = Pose2;

    fn sub(self, rhs: Pose2) -> Pose2 {
        Pose2 {
            position_m: self.position_m - rhs.position_m,
            heading_rad: self.heading_rad - rhs.heading_rad
        }
    }
}

impl std::ops::Neg for Pose2 {
    type Output = Pose2;

    fn neg(self) -> Pose2 {
        Pose2 {
            position_m: -self.position_m,
            heading_rad: -self.heading_rad
        }
    }
}

impl std::ops::Mul<f64> for Pose2 {
    type Output = Pose2;

    fn mul(self, rhs: f64) -> Pose2 {
        Pose2 {
            position_m: self.position_m * rhs,
            heading_rad: self.heading_rad * rhs
        }
    }
}

impl std::ops::Div<f64> for Pose2 {
    type Output = Pose2;

    fn div(self, rhs: f64) -> Pose2 {
        Pose2 {
            position_m: self.position_m / rhs,
            heading_rad: self.heading_rad / rhs
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_distance() {
        let a = Pose2::new(0f64, 0f64, 0f64);
        let b = Pose2::new(3f64, 4f64, 1f64);

        assert!((a.distance_to(&b) - 5f64).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5f64).abs() < 1e-12);
        assert_eq!(a.distance_to(&a), 0f64);
    }

    #[test]
    fn test_bearing() {
        let origin = Pose2::new(0f64, 0f64, 0f64);

        // Bearing ignores headings, so give the origin a silly one
        let skewed = Pose2::new(0f64, 0f64, 2.7f64);

        assert!((origin.bearing_to(&Pose2::new(1f64, 0f64, 0f64))).abs() < 1e-12);
        assert!(
            (origin.bearing_to(&Pose2::new(0f64, 1f64, 0f64)) - PI / 2f64).abs() < 1e-12
        );
        assert!(
            (skewed.bearing_to(&Pose2::new(-1f64, 0f64, 0f64)) - PI).abs() < 1e-12
        );
        assert!(
            (origin.bearing_to(&Pose2::new(3f64, 4f64, 0f64)) - 4f64.atan2(3f64)).abs()
                < 1e-12
        );
    }

    #[test]
    fn test_lerp() {
        let a = Pose2::new(0f64, 0f64, 0f64);
        let b = Pose2::new(2f64, 4f64, 1f64);

        assert_eq!(a.lerp(&b, 0.5f64), Pose2::new(1f64, 2f64, 0.5f64));

        // t is clamped into [0, 1]
        assert_eq!(a.lerp(&b, -1f64), a);
        assert_eq!(a.lerp(&b, 2f64), b);
    }

    #[test]
    fn test_operators() {
        let a = Pose2::new(1f64, 2f64, 0.5f64);
        let b = Pose2::new(3f64, -1f64, 0.25f64);

        assert_eq!(a + b, Pose2::new(4f64, 1f64, 0.75f64));
        assert_eq!(a - b, Pose2::new(-2f64, 3f64, 0.25f64));
        assert_eq!(-a, Pose2::new(-1f64, -2f64, -0.5f64));
        assert_eq!(a * 2f64, Pose2::new(2f64, 4f64, 1f64));
        assert_eq!(a / 2f64, Pose2::new(0.5f64, 1f64, 0.25f64));
    }
}
