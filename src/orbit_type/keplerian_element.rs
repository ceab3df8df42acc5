//! # Keplerian orbital elements
//!
//! This module defines [`OrbitalElements`], the **classical orbital element
//! set** consumed by the propagation engine, together with the descriptive
//! metadata attached to an asteroid record.
//!
//! ## What are Keplerian elements?
//!
//! 1. **a** – Semi-major axis (AU)
//! 2. **e** – Eccentricity (unitless, `0 ≤ e < 1`)
//! 3. **i** – Inclination (degrees)
//! 4. **Ω** – Longitude of ascending node (degrees)
//! 5. **ω** – Argument of perihelion (degrees)
//! 6. **M** – Mean anomaly at epoch (degrees)
//!
//! Together with the reference epoch, these parameters fully describe an
//! orbit under the two-body approximation.
//!
//! ## Validation
//!
//! Elements are checked once, at construction ([`OrbitalElements::new`]):
//! `a` must be finite and within `[1e-6, 1e4]` AU (so that the Kepler period
//! fits a `hifitime::Duration`), `e` finite and in `[0, 1)`, and every angle
//! finite. Parabolic and hyperbolic orbits are rejected. Once
//! built, an element set is never mutated: the `with_*` methods return a new
//! value with the metadata attached.
//!
//! ## Example
//!
//! ```rust
//! use hifitime::Epoch;
//! use neo_orbit::orbit_type::keplerian_element::OrbitalElements;
//!
//! let apophis = OrbitalElements::new(
//!     0.9224,
//!     0.1911,
//!     3.331,
//!     204.446,
//!     126.393,
//!     180.0,
//!     Epoch::from_gregorian_utc_at_midnight(2024, 1, 1),
//! )
//! .unwrap()
//! .with_name("99942 Apophis")
//! .with_potentially_hazardous(true);
//!
//! assert_eq!(apophis.name(), Some("99942 Apophis"));
//! ```
use hifitime::Epoch;
use std::fmt;

use crate::{
    constants::{
        AstronomicalUnit, Degree, Radian, MAX_SEMI_MAJOR_AXIS, MIN_SEMI_MAJOR_AXIS, RADEG,
    },
    neo_errors::NeoError,
};

/// Keplerian orbital elements of an asteroid (osculating, two-body).
///
/// Units
/// -----
/// * `semi_major_axis`: Astronomical Units (AU).
/// * `eccentricity`: unitless.
/// * `inclination`: degrees.
/// * `ascending_node_longitude`: degrees (Ω).
/// * `periapsis_argument`: degrees (ω).
/// * `mean_anomaly`: degrees (M), at `epoch`.
/// * `epoch`: absolute time at which the elements are exact.
///
/// Metadata (name, reference id, diameter, absolute magnitude, hazard flag)
/// never enters the propagation math.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalElements {
    semi_major_axis: AstronomicalUnit,
    eccentricity: f64,
    inclination: Degree,
    ascending_node_longitude: Degree,
    periapsis_argument: Degree,
    mean_anomaly: Degree,
    epoch: Epoch,

    name: Option<String>,
    neo_reference_id: Option<String>,
    diameter_m: Option<f64>,
    absolute_magnitude: Option<f64>,
    is_potentially_hazardous: bool,
}

impl OrbitalElements {
    /// Build a validated element set.
    ///
    /// Arguments
    /// ---------
    /// * `semi_major_axis` – `a` (AU), finite and in `[1e-6, 1e4]`.
    /// * `eccentricity` – `e`, finite and in `[0, 1)`.
    /// * `inclination` – `i` (degrees).
    /// * `ascending_node_longitude` – `Ω` (degrees).
    /// * `periapsis_argument` – `ω` (degrees).
    /// * `mean_anomaly` – `M` at epoch (degrees).
    /// * `epoch` – reference epoch.
    ///
    /// Return
    /// ------
    /// * the element set, or [`NeoError::InvalidOrbit`] naming the first offending parameter.
    pub fn new(
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        inclination: Degree,
        ascending_node_longitude: Degree,
        periapsis_argument: Degree,
        mean_anomaly: Degree,
        epoch: Epoch,
    ) -> Result<Self, NeoError> {
        if !semi_major_axis.is_finite() || semi_major_axis <= 0.0 {
            return Err(NeoError::InvalidOrbit {
                parameter: "semi_major_axis",
                value: semi_major_axis,
                reason: "must be finite and strictly positive",
            });
        }

        if !(MIN_SEMI_MAJOR_AXIS..=MAX_SEMI_MAJOR_AXIS).contains(&semi_major_axis) {
            return Err(NeoError::InvalidOrbit {
                parameter: "semi_major_axis",
                value: semi_major_axis,
                reason: "outside [1e-6, 1e4] AU, the orbital period would not be representable",
            });
        }

        if !eccentricity.is_finite() || !(0.0..1.0).contains(&eccentricity) {
            return Err(NeoError::InvalidOrbit {
                parameter: "eccentricity",
                value: eccentricity,
                reason: "only elliptical orbits (0 <= e < 1) are supported",
            });
        }

        for (parameter, value) in [
            ("inclination", inclination),
            ("ascending_node_longitude", ascending_node_longitude),
            ("periapsis_argument", periapsis_argument),
            ("mean_anomaly", mean_anomaly),
        ] {
            if !value.is_finite() {
                return Err(NeoError::InvalidOrbit {
                    parameter,
                    value,
                    reason: "angle must be finite",
                });
            }
        }

        Ok(Self {
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude,
            periapsis_argument,
            mean_anomaly,
            epoch,
            name: None,
            neo_reference_id: None,
            diameter_m: None,
            absolute_magnitude: None,
            is_potentially_hazardous: false,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_reference_id(mut self, id: impl Into<String>) -> Self {
        self.neo_reference_id = Some(id.into());
        self
    }

    pub fn with_diameter_m(mut self, diameter_m: f64) -> Self {
        self.diameter_m = Some(diameter_m);
        self
    }

    pub fn with_absolute_magnitude(mut self, h: f64) -> Self {
        self.absolute_magnitude = Some(h);
        self
    }

    pub fn with_potentially_hazardous(mut self, hazardous: bool) -> Self {
        self.is_potentially_hazardous = hazardous;
        self
    }

    /// Semi-major axis `a` (AU).
    pub fn semi_major_axis(&self) -> AstronomicalUnit {
        self.semi_major_axis
    }

    /// Eccentricity `e`.
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Inclination `i` (degrees).
    pub fn inclination(&self) -> Degree {
        self.inclination
    }

    /// Longitude of the ascending node `Ω` (degrees).
    pub fn ascending_node_longitude(&self) -> Degree {
        self.ascending_node_longitude
    }

    /// Argument of perihelion `ω` (degrees).
    pub fn periapsis_argument(&self) -> Degree {
        self.periapsis_argument
    }

    /// Mean anomaly at epoch `M` (degrees).
    pub fn mean_anomaly(&self) -> Degree {
        self.mean_anomaly
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn neo_reference_id(&self) -> Option<&str> {
        self.neo_reference_id.as_deref()
    }

    pub fn diameter_m(&self) -> Option<f64> {
        self.diameter_m
    }

    pub fn absolute_magnitude(&self) -> Option<f64> {
        self.absolute_magnitude
    }

    pub fn is_potentially_hazardous(&self) -> bool {
        self.is_potentially_hazardous
    }

    /// Angular elements `(i, Ω, ω, M)` converted to radians.
    pub fn angles_rad(&self) -> (Radian, Radian, Radian, Radian) {
        (
            self.inclination * RADEG,
            self.ascending_node_longitude * RADEG,
            self.periapsis_argument * RADEG,
            self.mean_anomaly * RADEG,
        )
    }

    /// Name if known, otherwise the reference id, otherwise `"unnamed"`.
    pub fn designation(&self) -> &str {
        self.name
            .as_deref()
            .or(self.neo_reference_id.as_deref())
            .unwrap_or("unnamed")
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Orbital Elements of {} @ epoch {}",
            self.designation(),
            self.epoch
        )?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)        = {:.6} AU",
            self.semi_major_axis
        )?;
        writeln!(f, "  e   (eccentricity)           = {:.6}", self.eccentricity)?;
        writeln!(f, "  i   (inclination)            = {:.6}°", self.inclination)?;
        writeln!(
            f,
            "  Ω   (longitude of node)      = {:.6}°",
            self.ascending_node_longitude
        )?;
        writeln!(
            f,
            "  ω   (argument of perihelion) = {:.6}°",
            self.periapsis_argument
        )?;
        write!(f, "  M   (mean anomaly)           = {:.6}°", self.mean_anomaly)?;
        if let Some(d) = self.diameter_m {
            write!(f, "\n  diameter                     = {d:.1} m")?;
        }
        if self.is_potentially_hazardous {
            write!(f, "\n  potentially hazardous")?;
        }
        Ok(())
    }
}
