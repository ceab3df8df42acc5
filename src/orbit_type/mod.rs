//! # Orbit representations
//!
//! - [`keplerian_element`](crate::orbit_type::keplerian_element): validated Keplerian elements
//!   `(a, e, i, Ω, ω, M)` plus asteroid metadata, the input of every propagation.
//! - [`cartesian_state`](crate::orbit_type::cartesian_state): heliocentric ecliptic position
//!   (and placeholder velocity), the output of every propagation.
//!
//! Both are plain immutable values: propagation never mutates its input and
//! always returns a fresh state.

/// Classical Keplerian elements and asteroid metadata.
pub mod keplerian_element;

/// Heliocentric ecliptic Cartesian state.
pub mod cartesian_state;

pub use cartesian_state::CartesianState;
pub use keplerian_element::OrbitalElements;
