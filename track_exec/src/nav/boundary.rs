//! Estimates the local direction of a track boundary from the cones along it.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::Vector2;
use util::maths::ang_diff;

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Direction of the boundary running from `from_m` to `to_m`.
///
/// If the two points coincide (both deltas within `eps`) the direction is undefined and
/// `fallback_heading_rad` is returned instead.
pub fn two_point_angle(
    from_m: &Vector2<f64>,
    to_m: &Vector2<f64>,
    fallback_heading_rad: f64,
    eps: f64,
) -> f64 {
    let delta = to_m - from_m;

    if delta.x.abs() < eps && delta.y.abs() < eps {
        return fallback_heading_rad;
    }

    delta.y.atan2(delta.x)
}

/// Direction of the boundary through the given points, found by a total least squares line fit.
///
/// The fitted line is the principal axis of the points' covariance. Of the two directions along
/// that axis, the one closest to the direction from the first point to the last is returned.
///
/// `fallback_heading_rad` is returned when there are fewer than two points, or when the spread of
/// the points is isotropic so no axis is defined. It is also used to orient the axis if the first
/// and last points coincide.
pub fn fit_boundary_angle(points_m: &[Vector2<f64>], fallback_heading_rad: f64, eps: f64) -> f64 {
    if points_m.len() < 2 {
        return fallback_heading_rad;
    }

    let n = points_m.len() as f64;
    let mean = points_m.iter().sum::<Vector2<f64>>() / n;

    let (mut cov_xx, mut cov_yy, mut cov_xy) = (0.0, 0.0, 0.0);
    for p in points_m {
        let d = p - mean;
        cov_xx += d.x * d.x;
        cov_yy += d.y * d.y;
        cov_xy += d.x * d.y;
    }
    cov_xx /= n;
    cov_yy /= n;
    cov_xy /= n;

    if cov_xy.abs() < eps && (cov_xx - cov_yy).abs() < eps {
        return fallback_heading_rad;
    }

    let axis_rad = 0.5 * (2.0 * cov_xy).atan2(cov_xx - cov_yy);

    // Orient the axis along the direction of travel through the points
    let span = points_m[points_m.len() - 1] - points_m[0];
    let forward_rad = if span.norm() < eps {
        fallback_heading_rad
    } else {
        span.y.atan2(span.x)
    };

    if ang_diff(axis_rad, forward_rad).abs() > FRAC_PI_2 {
        axis_rad + PI
    } else {
        axis_rad
    }
}
