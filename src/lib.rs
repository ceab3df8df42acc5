//! # neo-orbit
//!
//! Two-body orbital mechanics for near-Earth objects: Keplerian elements are
//! propagated to heliocentric ecliptic positions, sampled over one orbital
//! period, and scanned day by day for their closest approach to a simplified
//! circular 1-AU Earth.
//!
//! ```rust
//! use neo_orbit::{catalog, close_approach::closest_approach};
//!
//! let apophis = catalog::get("99942 Apophis").unwrap();
//! let ca = closest_approach(apophis, 365).unwrap();
//! assert!(ca.day < 365);
//! ```
//!
//! ## Cargo features
//!
//! * `parallel` (default): `rayon` variants of the sampling and search loops.
//! * `sbdb-download`: asynchronous NASA JPL SBDB client over `reqwest`, driven
//!   by the caller's async runtime (e.g. `tokio`).
pub mod anomaly;
pub mod cancel;
pub mod catalog;
pub mod close_approach;
pub mod constants;
pub mod earth_model;
pub mod kepler;
pub mod neo_errors;
pub mod orbit_sampler;
pub mod orbit_type;
pub mod params;
pub mod propagator;
pub mod ref_system;
pub mod sbdb;
pub mod time;

pub use cancel::CancellationToken;
pub use close_approach::{closest_approach, CloseApproach};
pub use neo_errors::NeoError;
pub use orbit_sampler::{sample_path, SampledPath};
pub use orbit_type::{CartesianState, OrbitalElements};
pub use params::PropagationParams;
pub use propagator::{to_cartesian, Propagation, Propagator};
