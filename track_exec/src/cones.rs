//! # Cones
//!
//! Track boundary markers as detected by perception. Each cone has a position and belongs to
//! either the left or the right boundary of the track.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::warn;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Colour tag used by perception for blue (left boundary) cones.
pub const BLUE_TAG: i32 = 1;

/// Colour tag used by perception for yellow (right boundary) cones.
pub const YELLOW_TAG: i32 = 0;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The boundary of the track a cone belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConeSide {
    Left,
    Right,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConeError {
    #[error("Unknown cone side tag {0}, expected {} (left) or {} (right)", BLUE_TAG, YELLOW_TAG)]
    UnknownSideTag(i32),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A classified cone.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    pub position_m: Vector2<f64>,
    pub side: ConeSide,
}

/// A cone as reported by perception, with the side encoded as a colour tag.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCone {
    pub x_m: f64,
    pub y_m: f64,
    pub tag: i32,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ConeSide {
    /// Convert a perception colour tag into a side.
    pub fn from_tag(tag: i32) -> Result<Self, ConeError> {
        match tag {
            BLUE_TAG => Ok(ConeSide::Left),
            YELLOW_TAG => Ok(ConeSide::Right),
            t => Err(ConeError::UnknownSideTag(t)),
        }
    }

    /// Sign of the lateral offset from a boundary of this side towards the centre of the track,
    /// measured as a rotation from the boundary direction.
    ///
    /// The track centre lies clockwise (-pi/2) of the left boundary and anticlockwise (+pi/2) of
    /// the right one.
    pub fn lateral_sign(&self) -> f64 {
        match self {
            ConeSide::Left => -1.0,
            ConeSide::Right => 1.0,
        }
    }
}

impl Cone {
    pub fn new(x_m: f64, y_m: f64, side: ConeSide) -> Self {
        Self {
            position_m: Vector2::new(x_m, y_m),
            side,
        }
    }

    pub fn left(x_m: f64, y_m: f64) -> Self {
        Self::new(x_m, y_m, ConeSide::Left)
    }

    pub fn right(x_m: f64, y_m: f64) -> Self {
        Self::new(x_m, y_m, ConeSide::Right)
    }
}

impl RawCone {
    pub const fn new(x_m: f64, y_m: f64, tag: i32) -> Self {
        Self { x_m, y_m, tag }
    }

    /// Classify this cone by its colour tag.
    pub fn classify(&self) -> Result<Cone, ConeError> {
        Ok(Cone::new(self.x_m, self.y_m, ConeSide::from_tag(self.tag)?))
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Classify a set of raw cones, dropping any with an unrecognised colour tag.
///
/// Dropped cones take no further part in planning. A warning is logged for each one.
pub fn classify_cones(raw_cones: &[RawCone]) -> Vec<Cone> {
    raw_cones
        .iter()
        .filter_map(|raw| match raw.classify() {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("Dropping cone at ({}, {}): {}", raw.x_m, raw.y_m, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(ConeSide::from_tag(1), Ok(ConeSide::Left));
        assert_eq!(ConeSide::from_tag(0), Ok(ConeSide::Right));
        assert_eq!(ConeSide::from_tag(2), Err(ConeError::UnknownSideTag(2)));
        assert_eq!(ConeSide::from_tag(-1), Err(ConeError::UnknownSideTag(-1)));
    }

    #[test]
    fn test_classify_drops_unknown() {
        let raw = [
            RawCone::new(1.0, 3.0, BLUE_TAG),
            RawCone::new(2.0, 2.0, 7),
            RawCone::new(1.0, 1.0, YELLOW_TAG),
        ];

        let cones = classify_cones(&raw);

        assert_eq!(cones, vec![Cone::left(1.0, 3.0), Cone::right(1.0, 1.0)]);
    }

    #[test]
    fn test_error_message() {
        let msg = ConeError::UnknownSideTag(5).to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains("left"));
    }
}
