//! # Localisation module
//!
//! This module defines the pose of the vehicle as supplied by the
//! localisation system at the start of each perception cycle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position and heading in the local frame) of the vehicle.
///
/// The planner never modifies the pose it is given.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Pose {
    /// The position in the local frame
    pub position_m: Vector2<f64>,

    /// The heading (angle to the positive X axis) in radians. The heading is not required to be
    /// wrapped into any particular range.
    pub heading_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    pub fn new(x_m: f64, y_m: f64, heading_rad: f64) -> Self {
        Self {
            position_m: Vector2::new(x_m, y_m),
            heading_rad,
        }
    }

    /// Unit vector pointing along the heading of the vehicle.
    pub fn forward(&self) -> Vector2<f64> {
        Vector2::new(self.heading_rad.cos(), self.heading_rad.sin())
    }

    /// Signed distance of the given point ahead of the vehicle, i.e. the projection of the
    /// vehicle-to-point vector onto the heading.
    pub fn forward_dist_m(&self, point_m: &Vector2<f64>) -> f64 {
        let delta = point_m - self.position_m;
        delta.x * self.heading_rad.cos() + delta.y * self.heading_rad.sin()
    }

    /// Euclidean distance from the vehicle to the given point.
    pub fn dist_m(&self, point_m: &Vector2<f64>) -> f64 {
        (point_m - self.position_m).norm()
    }
}
