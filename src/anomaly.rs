use crate::constants::Radian;

/// Convert an eccentric anomaly into a true anomaly.
///
/// Uses the half-angle substitution
/// `β = e / (1 + √(1 − e²))`, `ν = E + 2·atan2(β·sin E, 1 − β·cos E)`,
/// which stays well conditioned for every `e ∈ [0, 1)` and keeps `ν` on the
/// same revolution as `E`.
///
/// Arguments
/// ---------
/// * `eccentric_anomaly`: `E` (radians).
/// * `eccentricity`: `e` in `[0, 1)`.
///
/// Return
/// ------
/// * the true anomaly `ν` (radians).
pub fn eccentric_to_true(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let beta = eccentricity / (1.0 + (1.0 - eccentricity * eccentricity).sqrt());
    eccentric_anomaly
        + 2.0
            * (beta * eccentric_anomaly.sin()).atan2(1.0 - beta * eccentric_anomaly.cos())
}

/// Heliocentric distance on the conic at true anomaly `ν`.
///
/// `r = a·(1 − e²) / (1 + e·cos ν)`, in the unit of `semi_major_axis`.
pub fn radius_at(semi_major_axis: f64, eccentricity: f64, true_anomaly: Radian) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.cos())
}

/// Perihelion distance `a·(1 − e)`.
#[inline]
pub fn perihelion_distance(semi_major_axis: f64, eccentricity: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity)
}

/// Aphelion distance `a·(1 + e)`.
#[inline]
pub fn aphelion_distance(semi_major_axis: f64, eccentricity: f64) -> f64 {
    semi_major_axis * (1.0 + eccentricity)
}

#[cfg(test)]
mod anomaly_test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    const ECCENTRICITIES: [f64; 6] = [0.0, 0.0167, 0.1911, 0.5, 0.9, 0.999];

    #[test]
    fn test_perihelion_maps_to_zero() {
        for e in ECCENTRICITIES {
            assert_eq!(eccentric_to_true(0.0, e), 0.0);
        }
    }

    #[test]
    fn test_aphelion_maps_to_pi() {
        for e in ECCENTRICITIES {
            assert_abs_diff_eq!(eccentric_to_true(PI, e), PI, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_circular_orbit_identity() {
        for &ea in &[0.1, 1.0, 2.5, 4.0, 6.0] {
            assert_eq!(eccentric_to_true(ea, 0.0), ea);
        }
    }

    #[test]
    fn test_against_tangent_formula() {
        // tan(ν/2) = √((1+e)/(1−e))·tan(E/2)
        let e: f64 = 0.3;
        let ea: f64 = 1.2;
        let expected = 2.0 * (((1.0 + e) / (1.0 - e)).sqrt() * (ea / 2.0).tan()).atan();
        assert_relative_eq!(eccentric_to_true(ea, e), expected, epsilon = 1e-13);
    }

    #[test]
    fn test_true_anomaly_stays_on_revolution() {
        // past E = π the atan2 form keeps ν continuous instead of wrapping
        let nu = eccentric_to_true(4.0, 0.4);
        assert!(nu > PI && nu < 2.0 * PI);
    }

    #[test]
    fn test_radius_extremes() {
        for &a in &[0.5, 0.9224, 1.0, 2.511, 30.0] {
            for e in ECCENTRICITIES {
                assert_relative_eq!(radius_at(a, e, 0.0), a * (1.0 - e), max_relative = 1e-12);
                assert_relative_eq!(radius_at(a, e, PI), a * (1.0 + e), max_relative = 1e-12);
                assert_relative_eq!(
                    radius_at(a, e, 0.0),
                    perihelion_distance(a, e),
                    max_relative = 1e-12
                );
                assert_relative_eq!(
                    radius_at(a, e, PI),
                    aphelion_distance(a, e),
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_radius_semi_latus_rectum() {
        // at ν = π/2, r = p = a(1 − e²)
        assert_relative_eq!(
            radius_at(2.0, 0.5, PI / 2.0),
            2.0 * (1.0 - 0.25),
            max_relative = 1e-12
        );
    }
}
