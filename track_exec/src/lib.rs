//! # Track planning library.
//!
//! This library provides local path planning for a vehicle driving between two lines of cones,
//! along with a set of test scenarios to exercise it.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Cones - track boundary markers and their classification into left and right
pub mod cones;

/// Localisation module - the pose of the vehicle
pub mod loc;

/// Navigation module - plans the local path between the track boundaries
pub mod nav;

/// Defines the path type
pub mod path;

/// Named test scenarios
pub mod scenarios;
