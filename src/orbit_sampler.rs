//! # Orbit path sampling
//!
//! Produces `N` positions evenly spaced **in time** over one orbital period,
//! for path visualization. Sample `k` is the propagated position at
//! `epoch + (k / N)·P`, with `P` the Kepler period of the orbit.
//!
//! When the path is centred on Earth, the simplified 1-AU Earth of
//! [`earth_model`](crate::earth_model) is subtracted from every sample. By
//! default Earth's phase is tied to the **sample index** (`θ = (k / N)·2π`),
//! not to the calendar date of the sample, so the relative path is only
//! qualitative; [`EarthPhase::CalendarDate`] switches to date-based phasing.
//!
//! Sampling is a pure function of its inputs: every sample depends only on
//! its own time offset, which is why [`par_sample_path`] returns exactly the
//! same points as [`sample_path_with`].
use std::io::Write;

use hifitime::Epoch;
use nalgebra::Vector3;
use serde::Serialize;

use crate::{
    cancel::{is_cancelled, CancellationToken},
    constants::Kilometer,
    earth_model::{
        earth_phase_for_sample, earth_position_at_angle, earth_position_on_date, EarthPhase,
    },
    neo_errors::NeoError,
    orbit_type::OrbitalElements,
    propagator::{orbital_period_days, OrbitGeometry, Propagation, Propagator},
    time::days,
};

/// Positions of one sampled orbital period.
///
/// Fields
/// ------
/// * `points`: positions in km, heliocentric ecliptic or Earth-relative.
/// * `converged`: `false` if the Kepler solve of any sample did not converge;
///   the affected points are best-effort estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledPath {
    pub points: Vec<Vector3<f64>>,
    pub converged: bool,
}

impl SampledPath {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(Vector3<f64>, bool)> for SampledPath {
    fn from_iter<I: IntoIterator<Item = (Vector3<f64>, bool)>>(iter: I) -> Self {
        let mut path = SampledPath {
            points: Vec::new(),
            converged: true,
        };
        for (point, converged) in iter {
            path.points.push(point);
            path.converged &= converged;
        }
        path
    }
}

/// Time-independent inputs shared by every sample of one path.
struct PathPlan {
    geometry: OrbitGeometry,
    period_days: f64,
    num_points: usize,
    center_on_earth: bool,
    earth_phase: EarthPhase,
}

impl PathPlan {
    fn new(
        elements: &OrbitalElements,
        num_points: usize,
        center_on_earth: bool,
        earth_phase: EarthPhase,
    ) -> Self {
        Self {
            geometry: OrbitGeometry::new(elements),
            period_days: orbital_period_days(elements.semi_major_axis()),
            num_points,
            center_on_earth,
            earth_phase,
        }
    }

    fn sample_time(&self, k: usize) -> Epoch {
        let fraction = k as f64 / self.num_points as f64;
        self.geometry.epoch() + days(fraction * self.period_days)
    }

    fn relative_to_earth(&self, k: usize, propagation: &Propagation) -> (Vector3<f64>, bool) {
        let position = *propagation.position();
        let converged = propagation.converged();
        if !self.center_on_earth {
            return (position, converged);
        }
        let earth = match self.earth_phase {
            EarthPhase::SampleIndex => {
                earth_position_at_angle(earth_phase_for_sample(k, self.num_points))
            }
            EarthPhase::CalendarDate => earth_position_on_date(propagation.time),
        };
        (position - earth, converged)
    }

    fn sample(&self, k: usize, propagator: &Propagator) -> (Vector3<f64>, bool) {
        let propagation = propagator.propagate_flagged(&self.geometry, self.sample_time(k));
        self.relative_to_earth(k, &propagation)
    }

    fn checked_sample(
        &self,
        k: usize,
        propagator: &Propagator,
        cancel: Option<&CancellationToken>,
    ) -> Result<(Vector3<f64>, bool), NeoError> {
        if is_cancelled(cancel) {
            log::warn!("orbit sampling cancelled at sample {k}/{}", self.num_points);
            return Err(NeoError::Cancelled { completed: k });
        }
        let propagation = propagator.propagate_geometry(&self.geometry, self.sample_time(k))?;
        Ok(self.relative_to_earth(k, &propagation))
    }
}

/// Sample one orbital period with the default settings.
///
/// Arguments
/// ---------
/// * `elements`: orbital elements.
/// * `num_points`: number of samples; `0` gives an empty path.
/// * `center_on_earth`: subtract the simplified Earth (phased by sample index).
///
/// Return
/// ------
/// * `num_points` positions in km, heliocentric ecliptic (or Earth-relative),
///   with [`SampledPath::converged`] cleared if any Kepler solve failed.
pub fn sample_path(
    elements: &OrbitalElements,
    num_points: usize,
    center_on_earth: bool,
) -> SampledPath {
    let propagator = Propagator::default();
    let plan = PathPlan::new(
        elements,
        num_points,
        center_on_earth,
        propagator.params().earth_phase,
    );
    (0..num_points).map(|k| plan.sample(k, &propagator)).collect()
}

/// Sample one orbital period with explicit settings and optional cancellation.
///
/// The Earth phasing policy and solver settings come from
/// `propagator.params()`. The token is checked before every sample.
///
/// Errors
/// ------
/// * [`NeoError::Cancelled`] if `cancel` is triggered; `completed` is the
///   number of samples produced before.
/// * [`NeoError::KeplerNotConverged`] in strict mode.
pub fn sample_path_with(
    elements: &OrbitalElements,
    num_points: usize,
    center_on_earth: bool,
    propagator: &Propagator,
    cancel: Option<&CancellationToken>,
) -> Result<SampledPath, NeoError> {
    let plan = PathPlan::new(
        elements,
        num_points,
        center_on_earth,
        propagator.params().earth_phase,
    );
    (0..num_points)
        .map(|k| plan.checked_sample(k, propagator, cancel))
        .collect()
}

/// Parallel counterpart of [`sample_path_with`], over the global `rayon` pool.
///
/// Produces the same points in the same order. On cancellation, `completed`
/// is the index of the sample that observed the token.
#[cfg(feature = "parallel")]
pub fn par_sample_path(
    elements: &OrbitalElements,
    num_points: usize,
    center_on_earth: bool,
    propagator: &Propagator,
    cancel: Option<&CancellationToken>,
) -> Result<SampledPath, NeoError> {
    use rayon::prelude::*;

    let plan = PathPlan::new(
        elements,
        num_points,
        center_on_earth,
        propagator.params().earth_phase,
    );
    let samples = (0..num_points)
        .into_par_iter()
        .map(|k| plan.checked_sample(k, propagator, cancel))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(samples.into_iter().collect())
}

#[derive(Debug, Serialize)]
struct PathRow {
    index: usize,
    x_km: Kilometer,
    y_km: Kilometer,
    z_km: Kilometer,
}

/// Write a sampled path as CSV (`index,x_km,y_km,z_km`) for plotting tools.
pub fn write_path_csv<W: Write>(points: &[Vector3<f64>], writer: W) -> Result<(), NeoError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (index, p) in points.iter().enumerate() {
        wtr.serialize(PathRow {
            index,
            x_km: p.x,
            y_km: p.y,
            z_km: p.z,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod orbit_sampler_test {
    use super::*;
    use crate::{
        constants::{AU, MAX_SEMI_MAJOR_AXIS},
        orbit_type::keplerian_element::test_keplerian_element::{apophis, epoch_2024},
        params::PropagationParams,
        propagator::to_cartesian,
    };
    use approx::assert_relative_eq;

    #[test]
    fn test_point_count_and_apsides() {
        let el = apophis();
        let q = el.semi_major_axis() * (1.0 - el.eccentricity()) * AU;
        let big_q = el.semi_major_axis() * (1.0 + el.eccentricity()) * AU;

        for n in [1, 2, 17, 100] {
            let path = sample_path(&el, n, false);
            assert_eq!(path.len(), n);
            assert!(path.converged);
            for p in &path.points {
                let r = p.norm();
                assert!(r >= q * (1.0 - 1e-12) && r <= big_q * (1.0 + 1e-12), "r = {r}");
            }
        }
    }

    #[test]
    fn test_empty_path() {
        let path = sample_path(&apophis(), 0, true);
        assert!(path.is_empty());
        assert!(path.converged);
    }

    #[test]
    fn test_first_sample_is_epoch_position() {
        let el = apophis();
        let path = sample_path(&el, 10, false);
        assert_eq!(path.points[0], to_cartesian(&el, el.epoch()).state.position);
    }

    #[test]
    fn test_restartable() {
        let el = apophis();
        assert_eq!(sample_path(&el, 50, true), sample_path(&el, 50, true));
    }

    #[test]
    fn test_earth_centred_uses_sample_index() {
        // Earth-like circular orbit in phase with the index-driven Earth:
        // the relative path collapses onto the origin.
        let earth_like = OrbitalElements::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, epoch_2024()).unwrap();
        for p in sample_path(&earth_like, 36, true).points {
            assert!(p.norm() < 1e-3 * AU, "|p| = {}", p.norm());
        }
    }

    #[test]
    fn test_calendar_phase_differs_from_index_phase() {
        let el = apophis();
        let by_index = sample_path(&el, 8, true);
        let propagator = Propagator::new(
            PropagationParams::builder()
                .earth_phase(EarthPhase::CalendarDate)
                .build()
                .unwrap(),
        );
        let by_date = sample_path_with(&el, 8, true, &propagator, None).unwrap();
        assert_eq!(by_index.len(), by_date.len());
        // epoch is 1 January: both policies put Earth at θ = 0 for the first sample
        assert_relative_eq!(by_index.points[0], by_date.points[0], epsilon = 1e-6);
        assert!((by_index.points[3] - by_date.points[3]).norm() > 1.0);
    }

    #[test]
    fn test_with_default_matches_plain() {
        let el = apophis();
        let with = sample_path_with(&el, 25, true, &Propagator::default(), None).unwrap();
        assert_eq!(with, sample_path(&el, 25, true));
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let err = sample_path_with(&apophis(), 10, false, &Propagator::default(), Some(&token))
            .unwrap_err();
        assert_eq!(err, NeoError::Cancelled { completed: 0 });
    }

    #[test]
    fn test_non_convergence_is_flagged() {
        let e = 1.0 - f64::EPSILON / 2.0;
        let near_parabolic =
            OrbitalElements::new(1.0, e, 0.0, 0.0, 0.0, 0.0, epoch_2024()).unwrap();
        let path = sample_path(&near_parabolic, 4, false);
        assert_eq!(path.len(), 4);
        assert!(!path.converged);

        let lenient = sample_path_with(&near_parabolic, 4, false, &Propagator::default(), None)
            .unwrap();
        assert_eq!(lenient.len(), 4);
        assert!(!lenient.converged);

        let strict = Propagator::new(
            PropagationParams::builder()
                .strict_convergence(true)
                .build()
                .unwrap(),
        );
        assert!(matches!(
            sample_path_with(&near_parabolic, 4, false, &strict, None),
            Err(NeoError::KeplerNotConverged { .. })
        ));
    }

    #[test]
    fn test_widest_orbit_keeps_distinct_samples() {
        let el = OrbitalElements::new(MAX_SEMI_MAJOR_AXIS, 0.5, 0.0, 0.0, 0.0, 0.0, epoch_2024())
            .unwrap();
        let path = sample_path(&el, 4, false);
        assert!(path.converged);
        for (i, p) in path.points.iter().enumerate() {
            assert!(p.norm().is_finite());
            for q in &path.points[i + 1..] {
                assert!((p - q).norm() > 1.0, "{p:?} and {q:?} coincide");
            }
        }
    }

    #[test]
    fn test_path_flag_is_conjunction() {
        let origin = Vector3::zeros();
        let path: SampledPath = [(origin, true), (origin, false), (origin, true)]
            .into_iter()
            .collect();
        assert_eq!(path.len(), 3);
        assert!(!path.converged);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let el = apophis();
        let propagator = Propagator::default();
        let seq = sample_path_with(&el, 257, true, &propagator, None).unwrap();
        let par = par_sample_path(&el, 257, true, &propagator, None).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_write_path_csv() {
        let points = vec![Vector3::new(1.0, 2.0, 3.0), Vector3::new(-4.5, 0.0, 6.25)];
        let mut buffer = Vec::new();
        write_path_csv(&points, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "index,x_km,y_km,z_km\n0,1.0,2.0,3.0\n1,-4.5,0.0,6.25\n");
    }
}
