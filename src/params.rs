//! # Propagation parameters
//!
//! This module defines [`PropagationParams`] and its builder, which tune the
//! numerical behaviour of the engine:
//!
//! - the Kepler solver tolerance and iteration cap,
//! - whether a non-converged Kepler solve is an error or a flagged best-effort value,
//! - how the simplified Earth is phased when centring a sampled path on it.
//!
//! ## Example
//!
//! ```rust
//! use neo_orbit::earth_model::EarthPhase;
//! use neo_orbit::params::PropagationParams;
//!
//! let params = PropagationParams::builder()
//!     .kepler_eps(1e-12)
//!     .kepler_max_iter(50)
//!     .strict_convergence(true)
//!     .earth_phase(EarthPhase::CalendarDate)
//!     .build()
//!     .unwrap();
//!
//! assert!(params.strict_convergence);
//! ```
use std::cmp::Ordering::Greater;

use crate::{
    constants::{KEPLER_EPS, KEPLER_MAX_ITER},
    earth_model::EarthPhase,
    neo_errors::NeoError,
};

/// Configuration of the propagation engine.
///
/// Fields
/// -----------------
/// * `kepler_eps` – absolute tolerance on the Newton update of the eccentric anomaly.
/// * `kepler_max_iter` – iteration cap of the Kepler solver.
/// * `strict_convergence` – if `true`, a Kepler solve that does not converge
///   makes the propagation fail with
///   [`NeoError::KeplerNotConverged`]; if `false` the best estimate is
///   returned and flagged.
/// * `earth_phase` – Earth phasing policy used by
///   [`sample_path_with`](crate::orbit_sampler::sample_path_with) when the path is
///   centred on Earth.
///
/// Defaults
/// -----------------
/// * `kepler_eps`: 1e-10
/// * `kepler_max_iter`: 100
/// * `strict_convergence`: false
/// * `earth_phase`: [`EarthPhase::SampleIndex`]
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationParams {
    pub kepler_eps: f64,
    pub kepler_max_iter: usize,
    pub strict_convergence: bool,
    pub earth_phase: EarthPhase,
}

impl PropagationParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`PropagationParamsBuilder`] initialised with the defaults.
    pub fn builder() -> PropagationParamsBuilder {
        PropagationParamsBuilder::new()
    }
}

impl Default for PropagationParams {
    fn default() -> Self {
        PropagationParams {
            kepler_eps: KEPLER_EPS,
            kepler_max_iter: KEPLER_MAX_ITER,
            strict_convergence: false,
            earth_phase: EarthPhase::SampleIndex,
        }
    }
}

/// Builder for [`PropagationParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct PropagationParamsBuilder {
    params: PropagationParams,
}

impl PropagationParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: PropagationParams::default(),
        }
    }

    pub fn kepler_eps(mut self, v: f64) -> Self {
        self.params.kepler_eps = v;
        self
    }
    pub fn kepler_max_iter(mut self, v: usize) -> Self {
        self.params.kepler_max_iter = v;
        self
    }
    pub fn strict_convergence(mut self, v: bool) -> Self {
        self.params.strict_convergence = v;
        self
    }
    pub fn earth_phase(mut self, v: EarthPhase) -> Self {
        self.params.earth_phase = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `kepler_eps > 0.0` and finite.
    /// * `kepler_max_iter ≥ 1`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(PropagationParams)` if all values are valid.
    /// * `Err(NeoError::InvalidParams)` naming the first violated rule.
    pub fn build(self) -> Result<PropagationParams, NeoError> {
        let p = &self.params;

        if !Self::gt0(p.kepler_eps) || !p.kepler_eps.is_finite() {
            return Err(NeoError::InvalidParams(format!(
                "kepler_eps must be finite and > 0 (got {})",
                p.kepler_eps
            )));
        }
        if p.kepler_max_iter < 1 {
            return Err(NeoError::InvalidParams(
                "kepler_max_iter must be >= 1".into(),
            ));
        }

        Ok(self.params)
    }
}
