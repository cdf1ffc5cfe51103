//! # Waypoint synthesis
//!
//! Produces a short list of target waypoints along the track centre from the filtered cones of
//! each side. The construction depends on which sides are visible and how many cones each side
//! has, see [`SynthCase`].

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::f64::consts::FRAC_PI_2;

use log::trace;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::{
    cones::{Cone, ConeSide},
    loc::Pose,
};

use super::{
    boundary::{fit_boundary_angle, two_point_angle},
    PlannerParams,
};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The construction used to synthesise the waypoints.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthCase {
    /// Both sides have at least two cones, giving the midpoints of the two nearest pairs.
    TwoPairs,

    /// Both sides visible, only the left has a second cone.
    LeftSecondBlend,

    /// Both sides visible, only the right has a second cone.
    RightSecondBlend,

    /// Both sides have exactly one cone, the pair midpoint is projected along the heading.
    SinglePair,

    /// One side only, with at least three cones, offset from a line fit of the first three.
    SideFit(ConeSide),

    /// One side only with two cones, offset from their midpoint.
    SidePair(ConeSide),

    /// One side only with a single cone, offset from it along the vehicle heading.
    SideSingle(ConeSide),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The result of waypoint synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoints {
    pub case: SynthCase,
    pub points_m: Vec<Vector2<f64>>,
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Synthesise waypoints from the filtered, nearest-first cones of each side.
///
/// Returns `None` if neither side has any cones.
pub fn synthesise(
    left: &[Cone],
    right: &[Cone],
    pose: &Pose,
    params: &PlannerParams,
) -> Option<Waypoints> {
    let waypoints = match (left, right) {
        ([], []) => return None,
        ([l0, ..], [r0, ..]) => both_sides(l0, left.get(1), r0, right.get(1), pose, params),
        (cones, []) => one_side(ConeSide::Left, cones, pose, params)?,
        ([], cones) => one_side(ConeSide::Right, cones, pose, params)?,
    };

    trace!(
        "Synthesised {} waypoints using {:?}",
        waypoints.points_m.len(),
        waypoints.case
    );

    Some(waypoints)
}

/// Both sides are visible.
///
/// The first waypoint is always the midpoint of the nearest pair. The second depends on which
/// sides have a second cone.
fn both_sides(
    l0: &Cone,
    l1: Option<&Cone>,
    r0: &Cone,
    r1: Option<&Cone>,
    pose: &Pose,
    params: &PlannerParams,
) -> Waypoints {
    let w1 = midpoint(l0, r0);

    let (case, w2) = match (l1, r1) {
        (Some(l1), Some(r1)) => (SynthCase::TwoPairs, midpoint(l1, r1)),
        (Some(l1), None) => (
            SynthCase::LeftSecondBlend,
            blend_second(w1, midpoint(l1, r0), l0, r0, pose, params),
        ),
        (None, Some(r1)) => (
            SynthCase::RightSecondBlend,
            blend_second(w1, midpoint(l0, r1), l0, r0, pose, params),
        ),
        (None, None) => (
            SynthCase::SinglePair,
            w1 + pose.forward() * params.forward_step_m,
        ),
    };

    Waypoints {
        case,
        points_m: vec![w1, w2],
    }
}

/// Blend a cone-pair midpoint with a forward projection of the first waypoint.
///
/// The forward direction is perpendicular to the vector from the nearest right cone to the
/// nearest left cone, whichever side provided the extra cone.
fn blend_second(
    w1: Vector2<f64>,
    pair_mid: Vector2<f64>,
    l0: &Cone,
    r0: &Cone,
    pose: &Pose,
    params: &PlannerParams,
) -> Vector2<f64> {
    let across = l0.position_m - r0.position_m;
    let perp = Vector2::new(across.y, -across.x);
    let perp_len = perp.norm();

    let forward = if perp_len > params.min_across_len_m {
        perp / perp_len
    } else {
        pose.forward()
    };

    let projected = w1 + forward * params.forward_step_m;

    pair_mid * params.blend_pair_weight + projected * params.blend_forward_weight
}

/// Only one side is visible, dispatch on the number of cones it has.
fn one_side(
    side: ConeSide,
    cones: &[Cone],
    pose: &Pose,
    params: &PlannerParams,
) -> Option<Waypoints> {
    match cones {
        [] => None,
        [c0] => Some(side_single(side, c0, pose, params)),
        [c0, c1] => Some(side_pair(side, c0, c1, pose, params)),
        [c0, c1, c2, ..] => Some(side_fit(side, [c0, c1, c2], pose, params)),
    }
}

/// One side only with three or more cones.
///
/// Each of the first three cones is projected onto the fitted boundary line through the first
/// cone, and the projection offset towards the centre of the track.
fn side_fit(side: ConeSide, cones: [&Cone; 3], pose: &Pose, params: &PlannerParams) -> Waypoints {
    let points: Vec<Vector2<f64>> = cones.iter().map(|c| c.position_m).collect();
    let boundary_rad = fit_boundary_angle(&points, pose.heading_rad, params.angle_eps);

    let along = unit(boundary_rad);
    let offset = lateral_offset(side, boundary_rad, params);
    let origin = points[0];

    Waypoints {
        case: SynthCase::SideFit(side),
        points_m: points
            .iter()
            .map(|p| origin + along * (p - origin).dot(&along) + offset)
            .collect(),
    }
}

/// One side only with exactly two cones.
fn side_pair(
    side: ConeSide,
    c0: &Cone,
    c1: &Cone,
    pose: &Pose,
    params: &PlannerParams,
) -> Waypoints {
    let boundary_rad = two_point_angle(
        &c0.position_m,
        &c1.position_m,
        pose.heading_rad,
        params.angle_eps,
    );

    let w1 = midpoint(c0, c1) + lateral_offset(side, boundary_rad, params);
    let w2 = w1 + unit(boundary_rad) * params.forward_step_m;

    Waypoints {
        case: SynthCase::SidePair(side),
        points_m: vec![w1, w2],
    }
}

/// One side only with a single cone. The boundary is assumed parallel to the vehicle heading.
fn side_single(side: ConeSide, c0: &Cone, pose: &Pose, params: &PlannerParams) -> Waypoints {
    let w1 = c0.position_m + lateral_offset(side, pose.heading_rad, params);
    let w2 = w1 + pose.forward() * params.forward_step_m;

    Waypoints {
        case: SynthCase::SideSingle(side),
        points_m: vec![w1, w2],
    }
}

fn midpoint(a: &Cone, b: &Cone) -> Vector2<f64> {
    (a.position_m + b.position_m) / 2.0
}

fn unit(angle_rad: f64) -> Vector2<f64> {
    Vector2::new(angle_rad.cos(), angle_rad.sin())
}

/// Offset of half a lane from a boundary of the given side towards the centre of the track.
fn lateral_offset(side: ConeSide, boundary_rad: f64, params: &PlannerParams) -> Vector2<f64> {
    unit(boundary_rad + side.lateral_sign() * FRAC_PI_2) * params.half_lane_m
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    use super::*;

    fn synth(left: &[Cone], right: &[Cone], pose: &Pose) -> Waypoints {
        synthesise(left, right, pose, &PlannerParams::default()).unwrap()
    }

    #[test]
    fn test_no_cones() {
        assert!(synthesise(&[], &[], &Pose::default(), &PlannerParams::default()).is_none());
    }

    #[test]
    fn test_two_pairs() {
        let pose = Pose::new(0.0, 0.0, 0.8);
        let wps = synth(
            &[Cone::left(1.0, 3.0), Cone::left(3.0, 3.0)],
            &[Cone::right(1.0, 1.0), Cone::right(3.0, 1.0)],
            &pose,
        );

        assert_eq!(wps.case, SynthCase::TwoPairs);
        assert_eq!(wps.points_m, vec![Vector2::new(1.0, 2.0), Vector2::new(3.0, 2.0)]);
    }

    #[test]
    fn test_single_pair() {
        let pose = Pose::new(0.0, 0.0, 0.4);
        let wps = synth(&[Cone::left(1.0, 3.0)], &[Cone::right(1.0, 1.0)], &pose);

        assert_eq!(wps.case, SynthCase::SinglePair);
        assert_abs_diff_eq!(wps.points_m[0], Vector2::new(1.0, 2.0), epsilon = 1e-12);
        assert_abs_diff_eq!(
            wps.points_m[1],
            Vector2::new(1.0 + 2.5 * 0.4f64.cos(), 2.0 + 2.5 * 0.4f64.sin()),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_left_second_blend() {
        let pose = Pose::new(0.0, 0.0, 1.4);
        let wps = synth(
            &[Cone::left(2.0, 3.0), Cone::left(4.0, 3.0)],
            &[Cone::right(2.0, 2.0)],
            &pose,
        );

        // Across vector (0, 1) gives forward (1, 0)
        let w1 = Vector2::new(2.0, 2.5);
        let option_pair = Vector2::new(3.0, 2.5);
        let option_fwd = w1 + Vector2::new(2.5, 0.0);

        assert_eq!(wps.case, SynthCase::LeftSecondBlend);
        assert_abs_diff_eq!(wps.points_m[0], w1, epsilon = 1e-12);
        assert_abs_diff_eq!(
            wps.points_m[1],
            option_pair * 0.7 + option_fwd * 0.3,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_right_second_blend_uses_same_perpendicular() {
        let pose = Pose::new(0.0, 0.0, 2.0);
        let wps = synth(
            &[Cone::left(4.0, 4.0)],
            &[Cone::right(3.0, 2.0), Cone::right(4.0, 2.0)],
            &pose,
        );

        // Across vector left[0] - right[0] = (1, 2), perpendicular (2, -1)
        let w1 = Vector2::new(3.5, 3.0);
        let forward = Vector2::new(2.0, -1.0) / 5f64.sqrt();
        let option_pair = Vector2::new(4.0, 3.0);
        let option_fwd = w1 + forward * 2.5;

        assert_eq!(wps.case, SynthCase::RightSecondBlend);
        assert_abs_diff_eq!(
            wps.points_m[1],
            option_pair * 0.7 + option_fwd * 0.3,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_blend_weights_exact() {
        let pose = Pose::new(0.0, 0.0, 0.8);
        let wps = synth(
            &[Cone::left(1.0, 3.0), Cone::left(4.0, 5.0)],
            &[Cone::right(1.0, 2.0)],
            &pose,
        );

        // Across vector (0, 1) gives forward (1, 0), blended with literal weights
        let w1 = Vector2::new(1.0, 2.5);
        let option_pair = Vector2::new(2.5, 3.5);
        let option_fwd = w1 + Vector2::new(2.5, 0.0);

        assert_eq!(
            wps.points_m[1],
            Vector2::new(
                0.7 * option_pair.x + 0.3 * option_fwd.x,
                0.7 * option_pair.y + 0.3 * option_fwd.y
            )
        );
    }

    #[test]
    fn test_blend_short_across_uses_heading() {
        let pose = Pose::new(0.0, 0.0, 0.5);
        let wps = synth(
            &[Cone::left(2.0, 2.0), Cone::left(4.0, 2.0)],
            &[Cone::right(2.05, 2.0)],
            &pose,
        );

        let w1 = Vector2::new(2.025, 2.0);
        let option_pair = Vector2::new(3.025, 2.0);
        let option_fwd = w1 + pose.forward() * 2.5;

        assert_abs_diff_eq!(
            wps.points_m[1],
            option_pair * 0.7 + option_fwd * 0.3,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_left_single() {
        let pose = Pose::new(0.0, 0.0, 0.2);
        let wps = synth(&[Cone::left(3.0, 3.0)], &[], &pose);

        let w1 = Vector2::new(
            3.0 + 2.5 * (0.2 - PI / 2.0).cos(),
            3.0 + 2.5 * (0.2 - PI / 2.0).sin(),
        );
        let w2 = w1 + Vector2::new(2.5 * 0.2f64.cos(), 2.5 * 0.2f64.sin());

        assert_eq!(wps.case, SynthCase::SideSingle(ConeSide::Left));
        assert_abs_diff_eq!(wps.points_m[0], w1, epsilon = 1e-12);
        assert_abs_diff_eq!(wps.points_m[1], w2, epsilon = 1e-12);

        // Numerically, W1 is approximately (3.4967, 0.5500)
        assert_abs_diff_eq!(wps.points_m[0], Vector2::new(3.496673, 0.549834), epsilon = 1e-5);
        assert_abs_diff_eq!(wps.points_m[1], Vector2::new(5.946840, 1.046507), epsilon = 1e-5);
    }

    #[test]
    fn test_right_single_offsets_left_of_cone() {
        let pose = Pose::new(0.0, 0.0, 0.0);
        let wps = synth(&[], &[Cone::right(4.0, -1.0)], &pose);

        assert_eq!(wps.case, SynthCase::SideSingle(ConeSide::Right));
        assert_abs_diff_eq!(wps.points_m[0], Vector2::new(4.0, 1.5), epsilon = 1e-12);
        assert_abs_diff_eq!(wps.points_m[1], Vector2::new(6.5, 1.5), epsilon = 1e-12);
    }

    #[test]
    fn test_side_pair() {
        let pose = Pose::new(0.0, 0.0, 1.8);
        let wps = synth(&[Cone::left(3.0, 3.0), Cone::left(5.0, 3.0)], &[], &pose);

        // Boundary runs along +x, so the centre is 2.5 m towards -y
        assert_eq!(wps.case, SynthCase::SidePair(ConeSide::Left));
        assert_abs_diff_eq!(wps.points_m[0], Vector2::new(4.0, 0.5), epsilon = 1e-12);
        assert_abs_diff_eq!(wps.points_m[1], Vector2::new(6.5, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_side_pair_coincident_uses_heading() {
        let pose = Pose::new(0.0, 0.0, PI / 2.0);
        let wps = synth(&[], &[Cone::right(2.0, 2.0), Cone::right(2.0, 2.0)], &pose);

        // Boundary along the heading (+y), centre towards -x
        assert_abs_diff_eq!(wps.points_m[0], Vector2::new(-0.5, 2.0), epsilon = 1e-12);
        assert_abs_diff_eq!(wps.points_m[1], Vector2::new(-0.5, 4.5), epsilon = 1e-12);
    }

    #[test]
    fn test_side_fit() {
        let pose = Pose::new(0.0, 0.0, 0.3);
        let wps = synth(
            &[],
            &[
                Cone::right(2.0, 1.0),
                Cone::right(3.5, 1.0),
                Cone::right(5.0, 1.0),
                Cone::right(7.0, 1.0),
            ],
            &pose,
        );

        assert_eq!(wps.case, SynthCase::SideFit(ConeSide::Right));
        assert_eq!(wps.points_m.len(), 3);
        assert_abs_diff_eq!(wps.points_m[0], Vector2::new(2.0, 3.5), epsilon = 1e-9);
        assert_abs_diff_eq!(wps.points_m[1], Vector2::new(3.5, 3.5), epsilon = 1e-9);
        assert_abs_diff_eq!(wps.points_m[2], Vector2::new(5.0, 3.5), epsilon = 1e-9);
    }

    #[test]
    fn test_side_fit_projects_onto_line() {
        let pose = Pose::new(0.0, 0.0, 0.0);
        let wps = synth(
            &[Cone::left(0.0, 3.0), Cone::left(2.0, 3.4), Cone::left(4.0, 3.0)],
            &[],
            &pose,
        );

        // Fitted boundary is along +x, so all waypoints share the first cone's offset y
        for w in wps.points_m.iter() {
            assert_abs_diff_eq!(w.y, 0.5, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(wps.points_m[1].x, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wps.points_m[2].x, 4.0, epsilon = 1e-9);
    }
}
