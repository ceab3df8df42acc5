//! # Closest approach to Earth
//!
//! Day-resolution scan of the distance between an object and the simplified
//! 1-AU Earth of [`earth_model`](crate::earth_model).
//!
//! For every whole day `d ∈ [0, days_ahead)` after the elements' epoch:
//!
//! 1. propagate the object to `epoch + d` days,
//! 2. place Earth from the calendar date of that instant,
//! 3. take the Euclidean distance.
//!
//! The smallest distance is kept; on ties the earliest day wins. The whole
//! window is always scanned and no sub-day refinement is done, so the result
//! is only as fine as one day of relative motion.
use std::fmt;

use hifitime::Epoch;
use log::debug;

use crate::{
    cancel::{is_cancelled, CancellationToken},
    constants::{Kilometer, AU},
    earth_model::earth_position_on_date,
    neo_errors::NeoError,
    orbit_type::OrbitalElements,
    propagator::{OrbitGeometry, Propagator},
    time::days,
};

/// Outcome of a closest-approach scan.
///
/// Fields
/// ------
/// * `time`: instant of the minimum (`epoch + day` days).
/// * `day`: whole days after the elements' epoch.
/// * `distance_km`: object–Earth distance at `time`.
/// * `converged`: `false` if any Kepler solve of the window did not converge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseApproach {
    pub time: Epoch,
    pub day: u32,
    pub distance_km: Kilometer,
    pub converged: bool,
}

impl CloseApproach {
    pub fn distance_au(&self) -> f64 {
        self.distance_km / AU
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "closest approach on {} (day {}): {:.1} km ({:.6} AU)",
            self.time,
            self.day,
            self.distance_km,
            self.distance_au()
        )?;
        if !self.converged {
            write!(f, " [not converged]")?;
        }
        Ok(())
    }
}

/// Distance sample of one day of the window.
#[derive(Debug, Clone, Copy)]
struct DaySample {
    day: u32,
    time: Epoch,
    distance_km: Kilometer,
    converged: bool,
}

fn sample_day(
    geometry: &OrbitGeometry,
    day: u32,
    propagator: &Propagator,
    cancel: Option<&CancellationToken>,
) -> Result<DaySample, NeoError> {
    if is_cancelled(cancel) {
        log::warn!("closest-approach scan cancelled at day {day}");
        return Err(NeoError::Cancelled {
            completed: day as usize,
        });
    }
    let time = geometry.epoch() + days(day as f64);
    let propagation = propagator.propagate_geometry(geometry, time)?;
    let distance_km = propagation
        .state
        .distance_to(&earth_position_on_date(time));

    Ok(DaySample {
        day,
        time,
        distance_km,
        converged: propagation.converged(),
    })
}

/// Running minimum over day samples fed in increasing day order.
///
/// Only a strictly smaller distance replaces the current best, so the
/// earliest day wins ties.
#[derive(Debug, Clone, Copy)]
struct MinimumScan {
    best: Option<CloseApproach>,
    converged: bool,
}

impl MinimumScan {
    fn new() -> Self {
        Self {
            best: None,
            converged: true,
        }
    }

    fn push(mut self, s: DaySample) -> Self {
        self.converged &= s.converged;
        if self.best.map_or(true, |b| s.distance_km < b.distance_km) {
            self.best = Some(CloseApproach {
                time: s.time,
                day: s.day,
                distance_km: s.distance_km,
                converged: true,
            });
        }
        self
    }

    fn finish(self) -> Result<CloseApproach, NeoError> {
        let converged = self.converged;
        self.best
            .map(|b| CloseApproach { converged, ..b })
            .ok_or(NeoError::EmptySearchWindow)
    }
}

/// Fold day samples, in increasing day order, into the first minimum.
fn first_minimum<I>(samples: I) -> Result<CloseApproach, NeoError>
where
    I: IntoIterator<Item = DaySample>,
{
    samples
        .into_iter()
        .fold(MinimumScan::new(), MinimumScan::push)
        .finish()
}

fn log_start(elements: &OrbitalElements, days_ahead: u32) {
    debug!(
        "closest-approach scan of {} over {days_ahead} days from {}",
        elements.designation(),
        elements.epoch()
    );
}

/// Closest approach to Earth within `days_ahead` days, default settings.
///
/// Arguments
/// ---------
/// * `elements`: orbital elements of the object.
/// * `days_ahead`: scan length in whole days, starting at the elements' epoch.
///
/// Return
/// ------
/// * the [`CloseApproach`] of minimal distance, or
///   [`NeoError::EmptySearchWindow`] if `days_ahead == 0`.
///
/// See also
/// --------
/// * [`closest_approach_with`] for solver settings and cancellation.
pub fn closest_approach(
    elements: &OrbitalElements,
    days_ahead: u32,
) -> Result<CloseApproach, NeoError> {
    closest_approach_with(elements, days_ahead, &Propagator::default(), None)
}

/// Closest approach with explicit solver settings and optional cancellation.
///
/// The token is checked once per day; on cancellation the scan stops with
/// [`NeoError::Cancelled`] whose `completed` is the number of days scanned.
/// In strict mode the first non-converged day aborts the scan.
pub fn closest_approach_with(
    elements: &OrbitalElements,
    days_ahead: u32,
    propagator: &Propagator,
    cancel: Option<&CancellationToken>,
) -> Result<CloseApproach, NeoError> {
    if days_ahead == 0 {
        return Err(NeoError::EmptySearchWindow);
    }
    log_start(elements, days_ahead);

    let geometry = OrbitGeometry::new(elements);
    (0..days_ahead)
        .try_fold(MinimumScan::new(), |scan, day| {
            Ok::<_, NeoError>(scan.push(sample_day(&geometry, day, propagator, cancel)?))
        })?
        .finish()
}

/// Parallel counterpart of [`closest_approach_with`].
///
/// Days are evaluated on the global `rayon` pool, then reduced in day order,
/// so the result is identical to the sequential scan. Unlike the sequential
/// scan, the day samples of the whole window are held in memory before the
/// reduction.
#[cfg(feature = "parallel")]
pub fn par_closest_approach(
    elements: &OrbitalElements,
    days_ahead: u32,
    propagator: &Propagator,
    cancel: Option<&CancellationToken>,
) -> Result<CloseApproach, NeoError> {
    use rayon::prelude::*;

    if days_ahead == 0 {
        return Err(NeoError::EmptySearchWindow);
    }
    log_start(elements, days_ahead);

    let geometry = OrbitGeometry::new(elements);
    let samples = (0..days_ahead)
        .into_par_iter()
        .map(|day| sample_day(&geometry, day, propagator, cancel))
        .collect::<Result<Vec<_>, _>>()?;

    first_minimum(samples)
}
