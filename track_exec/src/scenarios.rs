//! # Scenarios
//!
//! A fixed set of named cone layouts and vehicle poses used to exercise the planner during
//! development and testing. Scenarios are identified by number, `"1"` to `"31"`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;

use crate::{
    cones::{classify_cones, Cone, RawCone, BLUE_TAG, YELLOW_TAG},
    loc::Pose,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A planning input: the detected cones and the pose of the vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub name: &'static str,
    pub cones: Vec<Cone>,
    pub pose: Pose,
}

/// Static definition of a scenario. All scenarios start at the origin.
struct ScenarioDef {
    name: &'static str,
    cones: &'static [RawCone],
    heading_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScenarioError {
    #[error("Unknown scenario '{name}'. Valid options: {valid}")]
    UnknownScenario { name: String, valid: String },
}

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const SCENARIOS: &[ScenarioDef] = &[
    ScenarioDef {
        name: "1",
        cones: &[],
        heading_rad: 0.0,
    },
    ScenarioDef {
        name: "2",
        cones: &[
            RawCone::new(1.0, 3.0, BLUE_TAG),
            RawCone::new(1.0, 1.0, YELLOW_TAG),
        ],
        heading_rad: 0.4,
    },
    ScenarioDef {
        name: "3",
        cones: &[
            RawCone::new(1.0, 3.0, BLUE_TAG),
            RawCone::new(3.0, 3.0, BLUE_TAG),
            RawCone::new(1.0, 1.0, YELLOW_TAG),
            RawCone::new(3.0, 1.0, YELLOW_TAG),
        ],
        heading_rad: 0.8,
    },
    ScenarioDef {
        name: "4",
        cones: &[
            RawCone::new(4.0, 2.0, YELLOW_TAG),
        ],
        heading_rad: 1.2,
    },
    ScenarioDef {
        name: "5",
        cones: &[
            RawCone::new(4.0, 2.0, YELLOW_TAG),
            RawCone::new(3.0, 2.0, YELLOW_TAG),
        ],
        heading_rad: 1.6,
    },
    ScenarioDef {
        name: "6",
        cones: &[
            RawCone::new(4.0, 4.0, BLUE_TAG),
            RawCone::new(4.0, 2.0, YELLOW_TAG),
            RawCone::new(3.0, 2.0, YELLOW_TAG),
        ],
        heading_rad: 2.0,
    },
    ScenarioDef {
        name: "7",
        cones: &[
            RawCone::new(2.0, 3.0, BLUE_TAG),
            RawCone::new(4.0, 3.0, BLUE_TAG),
            RawCone::new(2.0, 2.0, YELLOW_TAG),
        ],
        heading_rad: 1.4,
    },
    ScenarioDef {
        name: "8",
        cones: &[
            RawCone::new(3.0, 3.0, BLUE_TAG),
            RawCone::new(5.0, 3.0, BLUE_TAG),
        ],
        heading_rad: 1.8,
    },
    ScenarioDef {
        name: "9",
        cones: &[
            RawCone::new(3.0, 3.0, BLUE_TAG),
        ],
        heading_rad: 0.2,
    },
    ScenarioDef {
        name: "10",
        cones: &[
            RawCone::new(5.0, 3.0, BLUE_TAG),
            RawCone::new(5.0, 2.0, YELLOW_TAG),
        ],
        heading_rad: 0.6,
    },
    ScenarioDef {
        name: "11",
        cones: &[
            RawCone::new(1.0, 3.0, BLUE_TAG),
            RawCone::new(4.0, 5.0, BLUE_TAG),
            RawCone::new(1.0, 2.0, YELLOW_TAG),
            RawCone::new(4.0, 2.0, YELLOW_TAG),
        ],
        heading_rad: 1.0,
    },
    ScenarioDef {
        name: "12",
        cones: &[
            RawCone::new(5.0, 2.0, YELLOW_TAG),
        ],
        heading_rad: 1.4,
    },
    ScenarioDef {
        name: "13",
        cones: &[
            RawCone::new(5.0, 3.0, YELLOW_TAG),
            RawCone::new(5.0, 1.0, YELLOW_TAG),
        ],
        heading_rad: 0.1,
    },
    ScenarioDef {
        name: "14",
        cones: &[
            RawCone::new(3.0, 5.0, BLUE_TAG),
            RawCone::new(3.0, 2.0, YELLOW_TAG),
            RawCone::new(5.0, 2.0, YELLOW_TAG),
        ],
        heading_rad: 5.2,
    },
    ScenarioDef {
        name: "15",
        cones: &[
            RawCone::new(2.0, 5.0, BLUE_TAG),
            RawCone::new(3.0, 4.0, BLUE_TAG),
            RawCone::new(3.0, 2.0, YELLOW_TAG),
        ],
        heading_rad: 1.6,
    },
    ScenarioDef {
        name: "16",
        cones: &[
            RawCone::new(0.0, 3.0, BLUE_TAG),
            RawCone::new(2.0, 5.0, BLUE_TAG),
        ],
        heading_rad: 0.2,
    },
    ScenarioDef {
        name: "17",
        cones: &[
            RawCone::new(3.0, 5.0, BLUE_TAG),
        ],
        heading_rad: 0.6,
    },
    ScenarioDef {
        name: "18",
        cones: &[
            RawCone::new(2.0, 4.0, BLUE_TAG),
            RawCone::new(4.0, 3.0, YELLOW_TAG),
        ],
        heading_rad: 1.0,
    },
    ScenarioDef {
        name: "19",
        cones: &[
            RawCone::new(2.0, 3.0, BLUE_TAG),
            RawCone::new(5.0, 3.0, BLUE_TAG),
            RawCone::new(2.0, 0.0, YELLOW_TAG),
            RawCone::new(5.0, 2.0, YELLOW_TAG),
        ],
        heading_rad: 1.4,
    },
    ScenarioDef {
        name: "20",
        cones: &[
            RawCone::new(0.0, 2.0, YELLOW_TAG),
        ],
        heading_rad: 1.8,
    },
    ScenarioDef {
        name: "21",
        cones: &[
            RawCone::new(2.0, 3.0, BLUE_TAG),
            RawCone::new(3.0, 3.0, BLUE_TAG),
            RawCone::new(4.0, 3.0, BLUE_TAG),
        ],
        heading_rad: 1.4,
    },
    ScenarioDef {
        name: "22",
        cones: &[
            RawCone::new(2.0, 1.0, YELLOW_TAG),
            RawCone::new(3.5, 1.0, YELLOW_TAG),
            RawCone::new(5.0, 1.0, YELLOW_TAG),
        ],
        heading_rad: 0.3,
    },
    ScenarioDef {
        name: "23",
        cones: &[
            RawCone::new(2.0, 3.0, BLUE_TAG),
            RawCone::new(3.5, 3.5, BLUE_TAG),
            RawCone::new(5.0, 4.0, BLUE_TAG),
        ],
        heading_rad: 0.5,
    },
    ScenarioDef {
        name: "24",
        cones: &[
            RawCone::new(2.0, 1.5, YELLOW_TAG),
            RawCone::new(3.5, 1.0, YELLOW_TAG),
            RawCone::new(5.0, 1.5, YELLOW_TAG),
        ],
        heading_rad: 0.2,
    },
    ScenarioDef {
        name: "25",
        cones: &[
            RawCone::new(2.0, 4.0, BLUE_TAG),
            RawCone::new(3.0, 4.5, BLUE_TAG),
            RawCone::new(4.0, 5.0, BLUE_TAG),
            RawCone::new(2.0, 2.0, YELLOW_TAG),
        ],
        heading_rad: 0.8,
    },
    ScenarioDef {
        name: "26",
        cones: &[
            RawCone::new(2.0, 3.5, BLUE_TAG),
            RawCone::new(4.0, 4.0, BLUE_TAG),
            RawCone::new(2.0, 1.5, YELLOW_TAG),
            RawCone::new(3.5, 1.0, YELLOW_TAG),
            RawCone::new(5.0, 1.5, YELLOW_TAG),
        ],
        heading_rad: 0.4,
    },
    ScenarioDef {
        name: "27",
        cones: &[
            RawCone::new(1.5, 3.0, BLUE_TAG),
            RawCone::new(2.5, 4.0, BLUE_TAG),
            RawCone::new(4.0, 4.5, BLUE_TAG),
        ],
        heading_rad: 1.0,
    },
    ScenarioDef {
        name: "28",
        cones: &[
            RawCone::new(3.0, 2.0, YELLOW_TAG),
            RawCone::new(4.0, 1.5, YELLOW_TAG),
            RawCone::new(5.5, 2.5, YELLOW_TAG),
        ],
        heading_rad: 0.3,
    },
    ScenarioDef {
        name: "29",
        cones: &[
            RawCone::new(1.5, 4.0, BLUE_TAG),
            RawCone::new(3.0, 4.5, BLUE_TAG),
            RawCone::new(4.5, 5.0, BLUE_TAG),
            RawCone::new(1.5, 1.5, YELLOW_TAG),
            RawCone::new(3.0, 1.0, YELLOW_TAG),
            RawCone::new(4.5, 1.5, YELLOW_TAG),
        ],
        heading_rad: 0.5,
    },
    ScenarioDef {
        name: "30",
        cones: &[
            RawCone::new(2.0, 2.5, BLUE_TAG),
            RawCone::new(3.0, 3.5, BLUE_TAG),
            RawCone::new(5.0, 4.0, BLUE_TAG),
        ],
        heading_rad: 0.7,
    },
    ScenarioDef {
        name: "31",
        cones: &[
            RawCone::new(2.0, 1.0, YELLOW_TAG),
            RawCone::new(4.0, 0.5, YELLOW_TAG),
            RawCone::new(6.0, 1.0, YELLOW_TAG),
        ],
        heading_rad: 0.1,
    },
];

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Get the identifiers of all scenarios, in numerical order.
pub fn scenario_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = SCENARIOS.iter().map(|s| s.name).collect();
    names.sort_by_key(|n| n.parse::<u32>().unwrap_or(u32::MAX));
    names
}

/// Build the scenario with the given identifier.
pub fn make_scenario(name: &str) -> Result<Scenario, ScenarioError> {
    let def = SCENARIOS
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| ScenarioError::UnknownScenario {
            name: name.to_string(),
            valid: scenario_names().join(", "),
        })?;

    Ok(Scenario {
        name: def.name,
        cones: classify_cones(def.cones),
        pose: Pose::new(0.0, 0.0, def.heading_rad),
    })
}

/// Build every scenario, in numerical order.
pub fn all_scenarios() -> Vec<Scenario> {
    scenario_names()
        .into_iter()
        .filter_map(|n| make_scenario(n).ok())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cones::ConeSide;

    #[test]
    fn test_names() {
        let names = scenario_names();

        assert_eq!(names.len(), 31);
        assert_eq!(names[0], "1");
        assert_eq!(names[9], "10");
        assert_eq!(names[30], "31");
    }

    #[test]
    fn test_make_scenario() {
        let s = make_scenario("9").unwrap();

        assert_eq!(s.cones, vec![Cone::left(3.0, 3.0)]);
        assert_eq!(s.pose, Pose::new(0.0, 0.0, 0.2));

        let s = make_scenario("22").unwrap();
        assert_eq!(s.cones.len(), 3);
        assert!(s.cones.iter().all(|c| c.side == ConeSide::Right));
    }

    #[test]
    fn test_unknown_scenario() {
        let err = make_scenario("32").unwrap_err();
        let msg = err.to_string();

        assert!(msg.starts_with("Unknown scenario '32'. Valid options: 1, 2, 3,"));
        assert!(msg.ends_with("30, 31"));
    }

    #[test]
    fn test_all_scenarios() {
        assert_eq!(all_scenarios().len(), 31);
    }
}
