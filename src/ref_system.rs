//! # Orbital plane → heliocentric ecliptic frame
//!
//! The perifocal position `(r·cos ν, r·sin ν, 0)` is brought into the
//! heliocentric ecliptic frame by three elementary rotations:
//!
//! 1. by the argument of perihelion `ω` about the z-axis (in-plane),
//! 2. by the inclination `i` about the x-axis (tilt out of the ecliptic),
//! 3. by the longitude of the ascending node `Ω` about the z-axis.
//!
//! ```text
//! r_ecl = Rz(Ω) · Rx(i) · Rz(ω) · r_orb
//! ```
use nalgebra::{Rotation3, Vector3};

use crate::constants::Radian;

/// Coordinate axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Elementary counter-clockwise rotation of `alpha` radians about `axis`.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle (radians).
/// * `axis`: rotation axis.
///
/// Return
/// ------
/// * the rotation, such that `rotmt(α, Z) * x̂ = (cos α, sin α, 0)`.
pub fn rotmt(alpha: Radian, axis: Axis) -> Rotation3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha)
}

/// Composite rotation from the orbital plane to the heliocentric ecliptic frame.
///
/// Arguments
/// ---------
/// * `periapsis_argument`: `ω` (radians).
/// * `inclination`: `i` (radians).
/// * `ascending_node_longitude`: `Ω` (radians).
///
/// Return
/// ------
/// * `Rz(Ω) · Rx(i) · Rz(ω)`
pub fn orbital_plane_to_ecliptic(
    periapsis_argument: Radian,
    inclination: Radian,
    ascending_node_longitude: Radian,
) -> Rotation3<f64> {
    rotmt(ascending_node_longitude, Axis::Z)
        * rotmt(inclination, Axis::X)
        * rotmt(periapsis_argument, Axis::Z)
}

/// Rotate an orbital-plane position into the heliocentric ecliptic frame.
///
/// See [`orbital_plane_to_ecliptic`] for the rotation sequence.
pub fn perifocal_to_ecliptic(
    position: &Vector3<f64>,
    periapsis_argument: Radian,
    inclination: Radian,
    ascending_node_longitude: Radian,
) -> Vector3<f64> {
    orbital_plane_to_ecliptic(periapsis_argument, inclination, ascending_node_longitude) * position
}
