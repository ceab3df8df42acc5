//! # Kepler equation solver
//!
//! Solves the elliptic Kepler equation `M = E − e·sin E` for the eccentric
//! anomaly `E` with a bounded Newton–Raphson iteration.
//!
//! The solver never fails: when the iteration budget runs out, or when the
//! derivative `1 − e·cos E` vanishes, it returns its last estimate together
//! with `converged = false` in the [`KeplerSolution`]. Callers that need a
//! guarantee use [`KeplerSolution::into_result`].
use std::f64::consts::PI;

use crate::{
    constants::{Radian, DPI, HIGH_ECC_THRESHOLD, KEPLER_EPS, KEPLER_MAX_ITER},
    neo_errors::NeoError,
};

/// Smallest admissible value of `|1 − e·cos E|` before the Newton step is abandoned.
const MIN_DERIVATIVE: f64 = 1e-15;

/// Principal value of an angle in radians, in `[0, 2π)`.
pub fn principal_angle(a: f64) -> f64 {
    let r = a.rem_euclid(DPI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if r >= DPI {
        0.0
    } else {
        r
    }
}

/// Outcome of a Kepler equation solve.
///
/// Fields
/// ------
/// * `eccentric_anomaly`: best estimate of `E` (radians).
/// * `mean_anomaly`: the mean anomaly `M` the equation was solved for (radians).
/// * `eccentricity`: the eccentricity used.
/// * `iterations`: number of Newton steps performed.
/// * `converged`: `true` if `|ΔE|` dropped below the tolerance.
/// * `residual`: `|E − e·sin E − M|` at the returned estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    pub eccentric_anomaly: Radian,
    pub mean_anomaly: Radian,
    pub eccentricity: f64,
    pub iterations: usize,
    pub converged: bool,
    pub residual: f64,
}

impl KeplerSolution {
    /// Turn a non-converged solution into [`NeoError::KeplerNotConverged`].
    pub fn into_result(self) -> Result<Radian, NeoError> {
        if self.converged {
            Ok(self.eccentric_anomaly)
        } else {
            Err(NeoError::KeplerNotConverged {
                mean_anomaly: self.mean_anomaly,
                eccentricity: self.eccentricity,
                iterations: self.iterations,
                residual: self.residual,
            })
        }
    }
}

/// Residual of the Kepler equation `E − e·sin E − M`.
#[inline]
pub fn kepler_residual(eccentric_anomaly: f64, eccentricity: f64, mean_anomaly: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly
}

/// Solve `M = E − e·sin E` with the default tolerance and iteration cap.
///
/// See [`solve_kepler_with`].
pub fn solve_kepler(mean_anomaly: Radian, eccentricity: f64) -> KeplerSolution {
    solve_kepler_with(mean_anomaly, eccentricity, KEPLER_EPS, KEPLER_MAX_ITER)
}

/// Solve the elliptic Kepler equation by Newton–Raphson.
///
/// Iterates `E ← E − (E − e·sin E − M) / (1 − e·cos E)` starting from
/// `E₀ = M` for `e < 0.8` and `E₀ = π` otherwise. Stops as soon as
/// `|ΔE| < tolerance`.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly `M` (radians).
/// * `eccentricity`: eccentricity `e`, expected in `[0, 1)`.
/// * `tolerance`: absolute tolerance on the Newton update.
/// * `max_iterations`: iteration cap.
///
/// Return
/// ------
/// * A [`KeplerSolution`]. If the cap is reached, or if `1 − e·cos E` is too
///   close to zero to divide by, the last estimate is returned with
///   `converged = false`.
pub fn solve_kepler_with(
    mean_anomaly: Radian,
    eccentricity: f64,
    tolerance: f64,
    max_iterations: usize,
) -> KeplerSolution {
    let mut ecc_anom = if eccentricity < HIGH_ECC_THRESHOLD {
        mean_anomaly
    } else {
        PI
    };

    let mut converged = false;
    let mut iterations = 0;

    while iterations < max_iterations {
        let f = kepler_residual(ecc_anom, eccentricity, mean_anomaly);
        let f_prime = 1.0 - eccentricity * ecc_anom.cos();

        if f_prime.abs() < MIN_DERIVATIVE || !f_prime.is_finite() {
            break;
        }

        let delta = f / f_prime;
        ecc_anom -= delta;
        iterations += 1;

        if delta.abs() < tolerance {
            converged = true;
            break;
        }
    }

    KeplerSolution {
        eccentric_anomaly: ecc_anom,
        mean_anomaly,
        eccentricity,
        iterations,
        converged,
        residual: kepler_residual(ecc_anom, eccentricity, mean_anomaly).abs(),
    }
}
