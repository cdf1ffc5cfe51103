//! # Path
//!
//! This module defines the path produced by the planner, along with the operations which build a
//! dense, regularly spaced path from a sparse set of waypoints.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A path defining the desired trajectory of the vehicle.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Path {
    pub points_m: Vec<Vector2<f64>>,
}

/// A segment between two path points
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PathSegment {
    /// The target of the segment
    pub target_m: Vector2<f64>,

    /// The start point of the segment
    pub start_m: Vector2<f64>,

    /// The length of the segment
    pub length_m: f64,

    /// The heading (angle to the +ve x axis) of the segment
    pub heading_rad: f64,

    /// Unit vector pointing in the direction of the segment
    pub direction: Vector2<f64>,
}

/// Settings used when densifying waypoints into a path.
#[derive(Debug, Copy, Clone)]
pub struct Densify {
    /// Separation between consecutive samples
    pub step_m: f64,

    /// Number of points the path should contain
    pub num_points: usize,

    /// Points closer together than this are treated as coincident
    pub point_eps_m: f64,

    /// Heading used to extend the path if its final segment is degenerate
    pub fallback_heading_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Path {
    /// Create a new empty path
    pub fn new_empty() -> Self {
        Path {
            points_m: Vec::new(),
        }
    }

    /// A straight path directly ahead of the vehicle.
    ///
    /// The path contains exactly `num_points` points, the first of which is one step ahead of the
    /// vehicle rather than at the vehicle's own position.
    pub fn straight(pose: &Pose, step_m: f64, num_points: usize) -> Self {
        let (sin, cos) = pose.heading_rad.sin_cos();

        Self {
            points_m: (1..=num_points)
                .map(|i| {
                    let dist_m = step_m * i as f64;
                    Vector2::new(
                        pose.position_m.x + cos * dist_m,
                        pose.position_m.y + sin * dist_m,
                    )
                })
                .collect(),
        }
    }

    /// Build a path by sampling along the polyline through the given waypoints.
    ///
    /// Each non-degenerate segment is split into `max(2, floor(len/step) + 1)` evenly spaced
    /// samples including both of its ends. Samples coinciding with the previous point are
    /// skipped, so joins between segments appear once. Sampling stops as soon as the target
    /// number of points is reached; if the waypoints run out first the path is extended straight
    /// on from its final segment.
    ///
    /// Fewer than two waypoints produce an empty path.
    pub fn densify(waypoints_m: &[Vector2<f64>], settings: &Densify) -> Self {
        if waypoints_m.len() < 2 {
            return Self::new_empty();
        }

        let mut points_m: Vec<Vector2<f64>> = Vec::with_capacity(settings.num_points);

        for pair in waypoints_m.windows(2) {
            let (start_m, end_m) = (pair[0], pair[1]);
            let delta = end_m - start_m;

            let seg_length_m = delta.norm();
            if seg_length_m < settings.point_eps_m {
                continue;
            }

            let num_samples = sample_count(seg_length_m, settings.step_m);

            for j in 0..num_samples {
                let t = j as f64 / (num_samples - 1) as f64;
                let point = start_m + delta * t;

                let distinct = match points_m.last() {
                    Some(last) => (point - last).norm() > settings.point_eps_m,
                    None => true,
                };

                if distinct {
                    points_m.push(point);

                    if points_m.len() >= settings.num_points {
                        points_m.truncate(settings.num_points);
                        return Self { points_m };
                    }
                }
            }
        }

        let mut path = Self { points_m };

        if path.points_m.len() >= 2 {
            path = path.extended(
                settings.step_m,
                settings.num_points,
                settings.point_eps_m,
                settings.fallback_heading_rad,
            );
        }

        path.points_m.truncate(settings.num_points);
        path
    }

    /// Extend the path in a straight line until it contains `num_points` points.
    ///
    /// The extension continues along the heading of the final segment, or along
    /// `fallback_heading_rad` if the final segment is shorter than `eps_m`. Paths with fewer
    /// than two points are returned unchanged.
    pub fn extended(
        mut self,
        step_m: f64,
        num_points: usize,
        eps_m: f64,
        fallback_heading_rad: f64,
    ) -> Self {
        let heading_rad = match self.get_segment_to_target(self.points_m.len().saturating_sub(1)) {
            Some(seg) if seg.length_m >= eps_m => seg.heading_rad,
            Some(_) => fallback_heading_rad,
            None => return self,
        };

        let step = Vector2::new(heading_rad.cos() * step_m, heading_rad.sin() * step_m);

        while self.points_m.len() < num_points {
            let last = self.points_m[self.points_m.len() - 1];
            self.points_m.push(last + step);
        }

        self
    }

    /// Returns the path segment connecting the target point and the previous
    /// point.
    ///
    /// If no segment exists (the target is the first point in the sequence or
    /// is beyond the end of the sequence) then `None` will be returned
    pub fn get_segment_to_target(&self, target_index: usize) -> Option<PathSegment> {
        if target_index == 0 || target_index >= self.points_m.len() {
            return None;
        }

        let target_m = self.points_m[target_index];
        let start_m = self.points_m[target_index - 1];

        let delta = target_m - start_m;
        let length_m = delta.norm();

        Some(PathSegment {
            target_m,
            start_m,
            length_m,
            heading_rad: delta.y.atan2(delta.x),
            direction: delta / length_m,
        })
    }

    /// Return the length of the path in meters.
    ///
    /// If the path is empty (not enough points) then `None` is returned.
    pub fn get_length(&self) -> Option<f64> {
        if self.points_m.len() < 2 {
            return None;
        }

        // Length is defined as the sum of the length of all path segments
        Some(
            (1..self.points_m.len())
                .filter_map(|i| self.get_segment_to_target(i))
                .map(|seg| seg.length_m)
                .sum(),
        )
    }

    /// Get the number of points in the path
    pub fn get_num_points(&self) -> usize {
        self.points_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points_m.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Number of evenly spaced samples, ends included, for a segment of the given length.
///
/// At least two samples are always taken. A ratio too large to represent saturates rather than
/// overflowing, and a non-finite one falls back to the two end points.
fn sample_count(seg_length_m: f64, step_m: f64) -> usize {
    let ratio = seg_length_m / step_m;

    if !ratio.is_finite() {
        return 2;
    }

    (ratio as usize).saturating_add(1).max(2)
}
