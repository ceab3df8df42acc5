use nalgebra::Vector3;
use std::fmt;

use crate::constants::Kilometer;

/// Heliocentric ecliptic Cartesian state.
///
/// Units
/// -----
/// * `position`: km.
/// * `velocity`: km/s. Always present but carried as zero: the engine does
///   not derive velocities from the elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl CartesianState {
    /// State at `position` with a zero velocity.
    pub fn from_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            velocity: Vector3::zeros(),
        }
    }

    pub fn x(&self) -> Kilometer {
        self.position.x
    }

    pub fn y(&self) -> Kilometer {
        self.position.y
    }

    pub fn z(&self) -> Kilometer {
        self.position.z
    }

    /// Heliocentric distance `‖r‖` (km).
    pub fn distance_from_origin(&self) -> Kilometer {
        self.position.norm()
    }

    /// Euclidean distance to another position (km).
    pub fn distance_to(&self, other: &Vector3<f64>) -> Kilometer {
        (self.position - other).norm()
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.position.x, self.position.y, self.position.z]
    }
}

impl fmt::Display for CartesianState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "r = ({:.3}, {:.3}, {:.3}) km  |r| = {:.3} km",
            self.position.x,
            self.position.y,
            self.position.z,
            self.distance_from_origin()
        )
    }
}

#[cfg(test)]
mod cartesian_state_test {
    use super::*;

    #[test]
    fn test_from_position() {
        let s = CartesianState::from_position(Vector3::new(3.0, 4.0, 12.0));
        assert_eq!(s.velocity, Vector3::zeros());
        assert_eq!(s.distance_from_origin(), 13.0);
        assert_eq!(s.to_array(), [3.0, 4.0, 12.0]);
        assert_eq!((s.x(), s.y(), s.z()), (3.0, 4.0, 12.0));
    }

    #[test]
    fn test_distance_to() {
        let s = CartesianState::from_position(Vector3::new(1.0, 1.0, 0.0));
        assert_eq!(s.distance_to(&Vector3::new(4.0, 5.0, 0.0)), 5.0);
    }
}
