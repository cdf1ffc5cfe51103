//! Plans a local path between the track boundaries from a single snapshot of cones.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, trace};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::{
    cones::{Cone, ConeSide},
    loc::Pose,
    path::{Densify, Path},
};

use super::{
    cone_filter::filter_and_sort, waypoints::synthesise, ParamsError, PlannerParams, SynthCase,
};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// Stateless local path planner.
///
/// The planner holds only its parameters, so a single instance can be shared between threads
/// and each call to [`PathPlanner::plan`] is independent of any other.
#[derive(Debug, Clone, Default)]
pub struct PathPlanner {
    params: PlannerParams,
}

/// Intermediate results of a planning cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    /// Number of left cones remaining after filtering
    pub num_left: usize,

    /// Number of right cones remaining after filtering
    pub num_right: usize,

    /// The waypoint synthesis case, or `None` if no waypoints were synthesised
    pub case: Option<SynthCase>,

    /// The waypoints the path was built from, starting with the vehicle position. Empty if the
    /// straight-ahead fallback was used.
    pub waypoints_m: Vec<Vector2<f64>>,

    /// True if the straight-ahead fallback path was used
    pub fallback: bool,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl PathPlanner {
    /// Create a new planner, checking the parameters are usable.
    pub fn new(params: PlannerParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &PlannerParams {
        &self.params
    }

    /// Plan a path from the given cones and vehicle pose.
    pub fn plan(&self, cones: &[Cone], pose: &Pose) -> Path {
        self.plan_with_report(cones, pose).0
    }

    /// Plan a path from the given cones and vehicle pose, also reporting the intermediate results.
    ///
    /// When built from waypoints the path starts at the vehicle's own position. When no cones are
    /// usable the straight-ahead path is returned, which starts one step ahead of the vehicle.
    pub fn plan_with_report(&self, cones: &[Cone], pose: &Pose) -> (Path, PlanReport) {
        let left = filter_and_sort(cones, ConeSide::Left, pose, &self.params);
        let right = filter_and_sort(cones, ConeSide::Right, pose, &self.params);

        trace!(
            "{} of {} cones usable ({} left, {} right)",
            left.len() + right.len(),
            cones.len(),
            left.len(),
            right.len()
        );

        let mut report = PlanReport {
            num_left: left.len(),
            num_right: right.len(),
            case: None,
            waypoints_m: Vec::new(),
            fallback: false,
        };

        let waypoints = match synthesise(&left, &right, pose, &self.params) {
            Some(w) if !w.points_m.is_empty() => w,
            _ => {
                debug!("No usable cones, planning straight ahead");
                report.fallback = true;
                return (self.straight(pose), report);
            }
        };

        // Start the path at the vehicle
        let mut waypoints_m = Vec::with_capacity(waypoints.points_m.len() + 1);
        waypoints_m.push(pose.position_m);
        waypoints_m.extend(waypoints.points_m);

        let path = Path::densify(
            &waypoints_m,
            &Densify {
                step_m: self.params.step_m,
                num_points: self.params.num_points,
                point_eps_m: self.params.point_eps_m,
                fallback_heading_rad: pose.heading_rad,
            },
        );

        report.case = Some(waypoints.case);
        report.waypoints_m = waypoints_m;

        (path, report)
    }

    fn straight(&self, pose: &Pose) -> Path {
        Path::straight(pose, self.params.step_m, self.params.num_points)
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_no_cones_goes_straight() {
        let planner = PathPlanner::default();
        let pose = Pose::new(1.0, 2.0, 0.3);

        let (path, report) = planner.plan_with_report(&[], &pose);

        assert!(report.fallback);
        assert!(report.case.is_none());
        assert_eq!(path.get_num_points(), 25);
        for (i, p) in path.points_m.iter().enumerate() {
            let d = 0.4 * (i + 1) as f64;
            assert_abs_diff_eq!(
                *p,
                Vector2::new(1.0 + d * 0.3f64.cos(), 2.0 + d * 0.3f64.sin()),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_only_unusable_cones_goes_straight() {
        let planner = PathPlanner::default();
        let pose = Pose::new(0.0, 0.0, 0.0);
        let cones = [Cone::left(0.1, 0.1), Cone::right(-4.0, 0.0)];

        assert_eq!(planner.plan(&cones, &pose), planner.plan(&[], &pose));
    }

    #[test]
    fn test_path_starts_at_vehicle() {
        let planner = PathPlanner::default();
        let pose = Pose::new(0.0, 0.0, 0.8);
        let cones = [
            Cone::left(1.0, 3.0),
            Cone::left(3.0, 3.0),
            Cone::right(1.0, 1.0),
            Cone::right(3.0, 1.0),
        ];

        let (path, report) = planner.plan_with_report(&cones, &pose);

        assert!(!report.fallback);
        assert_eq!(report.case, Some(SynthCase::TwoPairs));
        assert_eq!(
            report.waypoints_m,
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 2.0),
                Vector2::new(3.0, 2.0)
            ]
        );
        assert_eq!(path.get_num_points(), 25);
        assert_eq!(path.points_m[0], pose.position_m);
    }

    #[test]
    fn test_custom_params() {
        let planner = PathPlanner::new(PlannerParams {
            step_m: 0.2,
            num_points: 10,
            ..Default::default()
        })
        .unwrap();
        let pose = Pose::new(0.0, 0.0, 0.0);

        let path = planner.plan(&[Cone::left(3.0, 3.0)], &pose);
        assert_eq!(path.get_num_points(), 10);

        let straight = planner.plan(&[], &pose);
        assert_abs_diff_eq!(straight.points_m[9], Vector2::new(2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_step_rejected() {
        let params: PlannerParams = util::params::parse("step_m = 0.0").unwrap();

        assert_eq!(
            PathPlanner::new(params).unwrap_err(),
            ParamsError::InvalidStep(0.0)
        );
    }
}
