//! Selects the cones relevant to the local plan.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use ordered_float::OrderedFloat;

use crate::{
    cones::{Cone, ConeSide},
    loc::Pose,
};

use super::PlannerParams;

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Returns the cones of the given side which are ahead of the vehicle, nearest first.
///
/// Cones within `min_cone_dist_m` of the vehicle are discarded as noise, as are cones whose
/// forward distance is at or below `-behind_tolerance_m`. Cones slightly behind the vehicle
/// are therefore kept.
pub fn filter_and_sort(
    cones: &[Cone],
    side: ConeSide,
    pose: &Pose,
    params: &PlannerParams,
) -> Vec<Cone> {
    let mut forward: Vec<Cone> = cones
        .iter()
        .filter(|c| c.side == side)
        .filter(|c| pose.dist_m(&c.position_m) >= params.min_cone_dist_m)
        .filter(|c| pose.forward_dist_m(&c.position_m) > -params.behind_tolerance_m)
        .copied()
        .collect();

    // Stable sort, so equidistant cones keep their input order
    forward.sort_by_key(|c| OrderedFloat(pose.dist_m(&c.position_m)));

    forward
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_filter_and_sort() {
        let pose = Pose::new(0.0, 0.0, 0.0);
        let cones = [
            Cone::left(5.0, 1.0),
            Cone::left(0.3, 0.0),
            Cone::left(-3.0, 1.0),
            Cone::left(-0.4, 2.0),
            Cone::right(1.0, -1.0),
            Cone::left(2.0, 1.0),
        ];

        let left = filter_and_sort(&cones, ConeSide::Left, &pose, &PlannerParams::default());

        // Too close and far behind are dropped, slightly behind is kept
        assert_eq!(
            left,
            vec![Cone::left(-0.4, 2.0), Cone::left(2.0, 1.0), Cone::left(5.0, 1.0)]
        );

        let right = filter_and_sort(&cones, ConeSide::Right, &pose, &PlannerParams::default());
        assert_eq!(right, vec![Cone::right(1.0, -1.0)]);
    }

    #[test]
    fn test_behind_boundary() {
        // Exactly at the tolerance is behind
        let pose = Pose::new(0.0, 0.0, 0.0);
        let cones = [Cone::right(-0.5, 3.0)];

        assert!(filter_and_sort(&cones, ConeSide::Right, &pose, &PlannerParams::default()).is_empty());
    }

    #[test]
    fn test_heading_respected() {
        let pose = Pose::new(1.0, 1.0, std::f64::consts::PI);
        let cones = [Cone::left(4.0, 1.0), Cone::left(-2.0, 1.0)];

        let left = filter_and_sort(&cones, ConeSide::Left, &pose, &PlannerParams::default());
        assert_eq!(left, vec![Cone::left(-2.0, 1.0)]);
    }
}
