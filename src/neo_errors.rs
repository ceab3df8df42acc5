use thiserror::Error;

use crate::constants::Radian;

#[derive(Error, Debug)]
pub enum NeoError {
    #[error("Invalid orbit parameter {parameter} = {value}: {reason}")]
    InvalidOrbit {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error(
        "Kepler equation did not converge (M = {mean_anomaly} rad, e = {eccentricity}) \
         after {iterations} iterations, residual = {residual:e}"
    )]
    KeplerNotConverged {
        mean_anomaly: Radian,
        eccentricity: f64,
        iterations: usize,
        residual: f64,
    },

    #[error("Close approach search window is empty (days_ahead = 0)")]
    EmptySearchWindow,

    #[error("Computation cancelled after {completed} iterations")]
    Cancelled { completed: usize },

    #[error("Invalid propagation parameters: {0}")]
    InvalidParams(String),

    #[error("Invalid epoch: {0}")]
    InvalidEpoch(String),

    #[error("Unable to parse SBDB response: {0}")]
    SbdbParse(String),

    #[error("Object not found in SBDB: {0}")]
    SbdbNotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "sbdb-download")]
    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

impl From<serde_json::Error> for NeoError {
    fn from(err: serde_json::Error) -> Self {
        NeoError::SbdbParse(err.to_string())
    }
}

impl PartialEq for NeoError {
    fn eq(&self, other: &Self) -> bool {
        use NeoError::*;
        match (self, other) {
            (
                InvalidOrbit {
                    parameter: p1,
                    value: v1,
                    reason: r1,
                },
                InvalidOrbit {
                    parameter: p2,
                    value: v2,
                    reason: r2,
                },
            ) => p1 == p2 && r1 == r2 && (v1 == v2 || (v1.is_nan() && v2.is_nan())),
            (
                KeplerNotConverged {
                    mean_anomaly: m1,
                    eccentricity: e1,
                    iterations: i1,
                    ..
                },
                KeplerNotConverged {
                    mean_anomaly: m2,
                    eccentricity: e2,
                    iterations: i2,
                    ..
                },
            ) => m1 == m2 && e1 == e2 && i1 == i2,
            (Cancelled { completed: a }, Cancelled { completed: b }) => a == b,
            (InvalidParams(a), InvalidParams(b)) => a == b,
            (InvalidEpoch(a), InvalidEpoch(b)) => a == b,
            (SbdbParse(a), SbdbParse(b)) => a == b,
            (SbdbNotFound(a), SbdbNotFound(b)) => a == b,

            // foreign errors are not comparable: same variant is enough
            (Csv(_), Csv(_)) => true,
            (IoError(_), IoError(_)) => true,
            #[cfg(feature = "sbdb-download")]
            (ReqwestError(_), ReqwestError(_)) => true,

            (EmptySearchWindow, EmptySearchWindow) => true,

            _ => false,
        }
    }
}
