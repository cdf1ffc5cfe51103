//! Parameters for the local path planner

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// Parameters for the [`PathPlanner`](super::PathPlanner).
///
/// Any field missing from a parameter file takes its default value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerParams {
    /// The separation between points within the output path.
    pub step_m: f64,

    /// Number of points in the output path.
    pub num_points: usize,

    /// Cones closer than this to the vehicle are discarded as noise.
    pub min_cone_dist_m: f64,

    /// Cones whose forward distance is at or below `-behind_tolerance_m` are discarded as being
    /// behind the vehicle.
    pub behind_tolerance_m: f64,

    /// Lateral offset from a boundary to the centreline, used when only one side is visible.
    pub half_lane_m: f64,

    /// Distance to project forward from a waypoint when building the next one.
    pub forward_step_m: f64,

    /// Points closer than this are considered coincident.
    pub point_eps_m: f64,

    /// Direction deltas and covariance terms smaller than this are considered degenerate.
    pub angle_eps: f64,

    /// Minimum length of the across-track vector between the nearest cone pair before the vehicle
    /// heading is used as the forward direction instead.
    pub min_across_len_m: f64,

    /// Weight given to the cone-pair midpoint when blending the second waypoint with only one
    /// side having a second cone.
    pub blend_pair_weight: f64,

    /// Weight given to the forward projection of the first waypoint in the same blend.
    pub blend_forward_weight: f64,
}

// -----------------------------------------------------------------------------------------------
// ENUMS
// -----------------------------------------------------------------------------------------------

/// A parameter set which the planner cannot run with.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParamsError {
    #[error("Path step must be finite and positive, found {0}")]
    InvalidStep(f64),

    #[error("Parameter `{0}` must be finite and non-negative, found {1}")]
    NegativeOrNonFinite(&'static str, f64),

    #[error("Epsilon `{0}` ({1}) must be smaller than the path step ({2})")]
    EpsNotBelowStep(&'static str, f64, f64),
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl Default for PlannerParams {
    fn default() -> Self {
        Self {
            step_m: 0.4,
            num_points: 25,
            min_cone_dist_m: 0.5,
            behind_tolerance_m: 0.5,
            half_lane_m: 2.5,
            forward_step_m: 2.5,
            point_eps_m: 1e-6,
            angle_eps: 1e-6,
            min_across_len_m: 0.1,
            blend_pair_weight: 0.7,
            blend_forward_weight: 0.3,
        }
    }
}

impl PlannerParams {
    /// Check that the parameters describe a usable planner.
    ///
    /// The step must be finite and positive, every other distance, epsilon and weight finite and
    /// non-negative, and the point epsilon smaller than the step so consecutive samples stay
    /// distinct.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.step_m.is_finite() || self.step_m <= 0.0 {
            return Err(ParamsError::InvalidStep(self.step_m));
        }

        let non_negative = [
            ("min_cone_dist_m", self.min_cone_dist_m),
            ("behind_tolerance_m", self.behind_tolerance_m),
            ("half_lane_m", self.half_lane_m),
            ("forward_step_m", self.forward_step_m),
            ("point_eps_m", self.point_eps_m),
            ("angle_eps", self.angle_eps),
            ("min_across_len_m", self.min_across_len_m),
            ("blend_pair_weight", self.blend_pair_weight),
            ("blend_forward_weight", self.blend_forward_weight),
        ];

        for (name, value) in non_negative.iter() {
            if !value.is_finite() || *value < 0.0 {
                return Err(ParamsError::NegativeOrNonFinite(*name, *value));
            }
        }

        if self.point_eps_m >= self.step_m {
            return Err(ParamsError::EpsNotBelowStep(
                "point_eps_m",
                self.point_eps_m,
                self.step_m,
            ));
        }

        Ok(())
    }
}
