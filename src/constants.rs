//! # Constants and type definitions for neo-orbit
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **type
//! aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Astronomical constants (AU, year length)
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Unit-carrying type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian year, used by the Kepler third law period
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Mean Earth–Moon distances in one Astronomical Unit
pub const LUNAR_DISTANCES_PER_AU: f64 = 389.17;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees
pub const DEGRAD: f64 = 180.0 / std::f64::consts::PI;

/// Default absolute tolerance on the eccentric anomaly update
pub const KEPLER_EPS: f64 = 1e-10;

/// Default iteration cap for the Kepler solver
pub const KEPLER_MAX_ITER: usize = 100;

/// Eccentricity above which the Kepler solver starts from E₀ = π
pub const HIGH_ECC_THRESHOLD: f64 = 0.8;

/// Semi-major axis of the simplified Earth orbit, in AU
pub const EARTH_ORBIT_RADIUS: f64 = 1.0;

/// Smallest accepted semi-major axis, in AU (about 150 km)
pub const MIN_SEMI_MAJOR_AXIS: f64 = 1e-6;

/// Largest accepted semi-major axis, in AU: a period of one million years,
/// well inside the range of `hifitime::Duration`
pub const MAX_SEMI_MAJOR_AXIS: f64 = 1e4;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Time span in days
pub type Days = f64;
