#![allow(dead_code)]

use approx::assert_relative_eq;
use hifitime::Epoch;
use nalgebra::Vector3;
use neo_orbit::{
    anomaly::{aphelion_distance, perihelion_distance},
    constants::AU,
    OrbitalElements,
};
use rand::{rngs::StdRng, Rng};

pub fn epoch_2024() -> Epoch {
    Epoch::from_gregorian_utc_at_midnight(2024, 1, 1)
}

/// Perihelion and aphelion distances in km.
pub fn apsides_km(el: &OrbitalElements) -> (f64, f64) {
    let (a, e) = (el.semi_major_axis(), el.eccentricity());
    (perihelion_distance(a, e) * AU, aphelion_distance(a, e) * AU)
}

pub fn assert_within_apsides(el: &OrbitalElements, position: &Vector3<f64>) {
    let (q, big_q) = apsides_km(el);
    let r = position.norm();
    assert!(
        r >= q * (1.0 - 1e-12) && r <= big_q * (1.0 + 1e-12),
        "|r| = {r} km outside [{q}, {big_q}] for {el}"
    );
}

pub fn assert_vec_close(actual: &Vector3<f64>, expected: &Vector3<f64>, max_relative: f64) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_relative_eq!(a, e, max_relative = max_relative, epsilon = 1e-6);
    }
}

/// Random bound orbit: a ∈ [0.5, 4) AU, e ∈ [0, 0.95), angles anywhere.
pub fn random_elements(rng: &mut StdRng) -> OrbitalElements {
    OrbitalElements::new(
        rng.random_range(0.5..4.0),
        rng.random_range(0.0..0.95),
        rng.random_range(0.0..180.0),
        rng.random_range(0.0..360.0),
        rng.random_range(0.0..360.0),
        rng.random_range(0.0..360.0),
        epoch_2024(),
    )
    .unwrap()
}
