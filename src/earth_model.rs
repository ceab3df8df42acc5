//! # Simplified Earth
//!
//! The reference body of the close-approach search is a **circular, coplanar
//! Earth orbit of radius 1 AU**: no eccentricity, no inclination, no
//! ephemeris. Two ways of phasing it exist:
//!
//! - by calendar date: `θ = (day_of_year / 365.25)·2π`, with `day_of_year`
//!   counted in whole days from 1 January of the date's year;
//! - by sample index, for orbit paths: `θ = (k / N)·2π`.
use hifitime::Epoch;
use nalgebra::Vector3;

use crate::{
    constants::{Radian, AU, DAYS_PER_YEAR, DPI, EARTH_ORBIT_RADIUS},
    time::day_of_year,
};

/// How the simplified Earth is phased when centring a sampled path on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EarthPhase {
    /// Sample `k` of `N` places Earth at `(k / N)·2π`, independent of the
    /// sample's date.
    #[default]
    SampleIndex,
    /// Earth is placed from the calendar date of each sample
    /// (see [`earth_phase_for_date`]).
    CalendarDate,
}

/// Heliocentric Earth position (km) at phase angle `theta` on the circular 1-AU orbit.
pub fn earth_position_at_angle(theta: Radian) -> Vector3<f64> {
    let radius = EARTH_ORBIT_RADIUS * AU;
    Vector3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
}

/// Phase angle of the simplified Earth on a calendar date.
pub fn earth_phase_for_date(epoch: Epoch) -> Radian {
    day_of_year(epoch) as f64 / DAYS_PER_YEAR * DPI
}

/// Heliocentric Earth position (km) on a calendar date.
pub fn earth_position_on_date(epoch: Epoch) -> Vector3<f64> {
    earth_position_at_angle(earth_phase_for_date(epoch))
}

/// Phase angle of sample `index` out of `count` evenly spaced samples.
pub fn earth_phase_for_sample(index: usize, count: usize) -> Radian {
    index as f64 / count as f64 * DPI
}
