//! # Navigation
//!
//! This module provides local path planning between the track boundaries.
//!
//! Each perception cycle the [`PathPlanner`] is given the detected cones and the current pose,
//! and produces a short, evenly spaced path along the estimated centre of the track:
//!
//! 1. [`cone_filter`] - discards cones behind or too close to the vehicle and sorts the rest.
//! 2. [`waypoints`] - synthesises a few sparse waypoints along the track centre, using the
//!    boundary directions estimated by [`boundary`].
//! 3. [`Path::densify`](crate::path::Path::densify) - samples the waypoints into the output
//!    path.
//!
//! If no cones are usable the vehicle is sent straight ahead.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod boundary;
pub mod cone_filter;
mod params;
pub mod path_planner;
pub mod waypoints;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use params::{ParamsError, PlannerParams};
pub use path_planner::{PathPlanner, PlanReport};
pub use waypoints::{SynthCase, Waypoints};
