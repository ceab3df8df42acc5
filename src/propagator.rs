//! # Two-body propagation of Keplerian elements
//!
//! Turns an [`OrbitalElements`] set into a heliocentric ecliptic position at
//! an arbitrary epoch:
//!
//! ```text
//! a [AU] ──► a [km]
//! M₀, Δt ──► M = (M₀ + n·Δt) mod 2π        (mean_motion, propagate_mean_anomaly)
//! M, e   ──► E                             (kepler::solve_kepler_with)
//! E, e   ──► ν, r                          (anomaly::eccentric_to_true, radius_at)
//! ν, r   ──► (r·cos ν, r·sin ν, 0)          orbital plane
//!        ──► Rz(Ω)·Rx(i)·Rz(ω)·r_orb        (ref_system::orbital_plane_to_ecliptic)
//! ```
//!
//! The mean motion follows Kepler's third law in heliocentric units
//! (`P [yr] = a[AU]^1.5`, one year = 365.25 days). No perturbation of any
//! kind is modelled.
//!
//! Every propagation returns a [`Propagation`]: the state plus the
//! [`KeplerSolution`] it was built from, so callers can tell a converged
//! position from a best-effort one. [`Propagator`] adds configurable solver
//! settings and an opt-in strict mode that turns non-convergence into an
//! error.
use hifitime::Epoch;
use log::warn;
use nalgebra::{Rotation3, Vector3};

use crate::{
    anomaly::{eccentric_to_true, radius_at},
    constants::{AstronomicalUnit, Days, Degree, Kilometer, Radian, AU, DAYS_PER_YEAR, DEGRAD, DPI},
    kepler::{principal_angle, solve_kepler_with, KeplerSolution},
    neo_errors::NeoError,
    orbit_type::{CartesianState, OrbitalElements},
    params::PropagationParams,
    ref_system::orbital_plane_to_ecliptic,
    time::days_between,
};

/// Orbital period from Kepler's third law, in days.
pub fn orbital_period_days(semi_major_axis: AstronomicalUnit) -> Days {
    semi_major_axis.powi(3).sqrt() * DAYS_PER_YEAR
}

/// Mean motion `n = 2π / P` in radians per day.
///
/// Arguments
/// ---------
/// * `semi_major_axis`: `a` in AU.
pub fn mean_motion(semi_major_axis: AstronomicalUnit) -> f64 {
    DPI / orbital_period_days(semi_major_axis)
}

/// Mean anomaly at `target`, in radians, wrapped to `[0, 2π)`.
///
/// `M = (M₀ + n·Δt) mod 2π` with `Δt` the signed number of days from the
/// elements' epoch to `target`. Targets before the epoch are allowed.
pub fn propagate_mean_anomaly(elements: &OrbitalElements, target: Epoch) -> Radian {
    let dt = days_between(elements.epoch(), target);
    let (_, _, _, m0) = elements.angles_rad();
    principal_angle(m0 + mean_motion(elements.semi_major_axis()) * dt)
}

/// Same as [`propagate_mean_anomaly`], expressed in degrees in `[0, 360)`.
pub fn propagate_mean_anomaly_deg(elements: &OrbitalElements, target: Epoch) -> Degree {
    propagate_mean_anomaly(elements, target) * DEGRAD
}

/// Result of a single propagation.
///
/// Fields
/// ------
/// * `time`: epoch of the state.
/// * `state`: heliocentric ecliptic state (km).
/// * `kepler`: the Kepler solve behind the state; `kepler.converged` is the
///   validity indicator of `state`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Propagation {
    pub time: Epoch,
    pub state: CartesianState,
    pub kepler: KeplerSolution,
}

impl Propagation {
    pub fn converged(&self) -> bool {
        self.kepler.converged
    }

    pub fn position(&self) -> &Vector3<f64> {
        &self.state.position
    }
}

/// Everything about an element set that does not depend on the target time.
///
/// Built once per element set so that time loops only pay for the Kepler
/// solve and a matrix-vector product.
#[derive(Debug, Clone)]
pub(crate) struct OrbitGeometry {
    epoch: Epoch,
    semi_major_axis_km: Kilometer,
    eccentricity: f64,
    mean_anomaly_epoch: Radian,
    mean_motion: f64,
    rotation: Rotation3<f64>,
}

impl OrbitGeometry {
    pub(crate) fn new(elements: &OrbitalElements) -> Self {
        let (incl, node, peri, m0) = elements.angles_rad();
        Self {
            epoch: elements.epoch(),
            semi_major_axis_km: elements.semi_major_axis() * AU,
            eccentricity: elements.eccentricity(),
            mean_anomaly_epoch: m0,
            mean_motion: mean_motion(elements.semi_major_axis()),
            rotation: orbital_plane_to_ecliptic(peri, incl, node),
        }
    }

    pub(crate) fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub(crate) fn propagate(&self, target: Epoch, params: &PropagationParams) -> Propagation {
        let dt = days_between(self.epoch, target);
        let mean_anomaly = principal_angle(self.mean_anomaly_epoch + self.mean_motion * dt);

        let kepler = solve_kepler_with(
            mean_anomaly,
            self.eccentricity,
            params.kepler_eps,
            params.kepler_max_iter,
        );

        let true_anomaly = eccentric_to_true(kepler.eccentric_anomaly, self.eccentricity);
        let r = radius_at(self.semi_major_axis_km, self.eccentricity, true_anomaly);

        let orbital_plane = Vector3::new(r * true_anomaly.cos(), r * true_anomaly.sin(), 0.0);

        Propagation {
            time: target,
            state: CartesianState::from_position(self.rotation * orbital_plane),
            kepler,
        }
    }
}

/// Position of the object at `target`, with the default solver settings.
///
/// Never fails: a Kepler solve that does not converge still produces a
/// state, flagged through [`Propagation::converged`].
///
/// Arguments
/// ---------
/// * `elements`: validated orbital elements.
/// * `target`: epoch of the requested state.
///
/// Return
/// ------
/// * the [`Propagation`] at `target`, position in km, heliocentric ecliptic frame.
pub fn to_cartesian(elements: &OrbitalElements, target: Epoch) -> Propagation {
    Propagator::default().propagate_flagged(&OrbitGeometry::new(elements), target)
}

/// Position of the object at its own reference epoch.
pub fn to_cartesian_at_epoch(elements: &OrbitalElements) -> Propagation {
    to_cartesian(elements, elements.epoch())
}

/// Configurable propagation entry point.
///
/// Holds a [`PropagationParams`]; in strict mode a non-converged Kepler solve
/// is reported as [`NeoError::KeplerNotConverged`] instead of a flagged state.
#[derive(Debug, Clone, Default)]
pub struct Propagator {
    params: PropagationParams,
}

impl Propagator {
    pub fn new(params: PropagationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PropagationParams {
        &self.params
    }

    /// Propagate `elements` to `target`.
    ///
    /// Return
    /// ------
    /// * `Ok(Propagation)`; non-converged solves are logged and flagged.
    /// * `Err(NeoError::KeplerNotConverged)` if the solve did not converge and
    ///   `strict_convergence` is set.
    pub fn to_cartesian(
        &self,
        elements: &OrbitalElements,
        target: Epoch,
    ) -> Result<Propagation, NeoError> {
        self.propagate_geometry(&OrbitGeometry::new(elements), target)
    }

    /// Cartesian state of `elements` at `target`.
    pub fn state_at(
        &self,
        elements: &OrbitalElements,
        target: Epoch,
    ) -> Result<CartesianState, NeoError> {
        Ok(self.to_cartesian(elements, target)?.state)
    }

    pub(crate) fn propagate_geometry(
        &self,
        geometry: &OrbitGeometry,
        target: Epoch,
    ) -> Result<Propagation, NeoError> {
        let propagation = self.propagate_flagged(geometry, target);
        if !propagation.converged() && self.params.strict_convergence {
            propagation.kepler.into_result()?;
        }
        Ok(propagation)
    }

    /// Lenient propagation: a non-converged solve is logged and flagged, never an error.
    pub(crate) fn propagate_flagged(&self, geometry: &OrbitGeometry, target: Epoch) -> Propagation {
        let propagation = geometry.propagate(target, &self.params);
        if !propagation.converged() {
            let k = &propagation.kepler;
            warn!(
                "Kepler solve did not converge at {target}: M = {} rad, e = {}, \
                 {} iterations, residual = {:e}",
                k.mean_anomaly,
                k.eccentricity,
                k.iterations,
                k.residual
            );
        }
        propagation
    }
}
