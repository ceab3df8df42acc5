//! # NASA JPL Small-Body Database records
//!
//! Reads orbital elements from the JSON payload of the
//! [SBDB API](https://ssd-api.jpl.nasa.gov/doc/sbdb.html):
//!
//! ```text
//! {
//!   "object":   { "fullname": "99942 Apophis (2004 MN4)", "des": "99942",
//!                 "spkid": "2099942", "pha": true },
//!   "orbit":    { "epoch": "2460600.5",
//!                 "elements": [ { "name": "a", "value": "0.9224" }, ... ] },
//!   "phys_par": [ { "name": "diameter", "value": "0.34" },
//!                 { "name": "H", "value": "19.09" } ]
//! }
//! ```
//!
//! Element values arrive as strings; the orbit epoch is a Julian date in TDB.
//! The diameter is converted from km to metres.
//!
//! Queried with `ca-data=true`, the payload also lists the object's recorded
//! planetary encounters, read by [`parse_close_approaches`]:
//!
//! ```text
//! "ca_data": [ { "cd": "2029-Apr-13 21:46", "jd": "2462240.407", "body": "Earth",
//!                "dist": "0.000254", "dist_min": "0.000254", "v_rel": "7.42" }, ... ]
//! ```
//!
//! With the `sbdb-download` feature, [`SbdbClient`] fetches records over HTTP
//! and [`get_orbital_elements`] resolves a designation through the
//! [`catalog`](crate::catalog) first and the API second.
use hifitime::Epoch;
use serde::Deserialize;

use crate::{
    constants::{AstronomicalUnit, Kilometer, AU, LUNAR_DISTANCES_PER_AU},
    neo_errors::NeoError,
    orbit_type::OrbitalElements,
};

/// SBDB endpoint.
pub const SBDB_URL: &str = "https://ssd-api.jpl.nasa.gov/sbdb.api";

/// SBDB sends most numbers as strings, a few as JSON numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SbdbNumber {
    Number(f64),
    Text(String),
}

impl SbdbNumber {
    fn as_f64(&self) -> Option<f64> {
        match self {
            SbdbNumber::Number(v) => Some(*v),
            SbdbNumber::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SbdbResponse {
    object: Option<SbdbObject>,
    orbit: Option<SbdbOrbit>,
    #[serde(default)]
    phys_par: Vec<SbdbField>,
    #[serde(default)]
    ca_data: Vec<SbdbCloseApproach>,
    message: Option<String>,
    code: Option<SbdbNumber>,
}

impl SbdbResponse {
    /// The API's error answer (`message` and/or `code`), if any.
    fn api_error(&self) -> Option<NeoError> {
        match (&self.message, &self.code) {
            (Some(message), _) => Some(NeoError::SbdbNotFound(message.clone())),
            (None, Some(code)) => {
                let code = code.as_f64().map_or("?".to_string(), |c| c.to_string());
                Some(NeoError::SbdbNotFound(format!("SBDB error code {code}")))
            }
            (None, None) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SbdbObject {
    fullname: Option<String>,
    des: Option<String>,
    spkid: Option<String>,
    pha: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct SbdbOrbit {
    epoch: Option<SbdbNumber>,
    #[serde(default)]
    elements: Vec<SbdbField>,
}

#[derive(Debug, Deserialize)]
struct SbdbField {
    name: String,
    value: Option<SbdbNumber>,
}

#[derive(Debug, Deserialize)]
struct SbdbCloseApproach {
    cd: Option<String>,
    jd: Option<SbdbNumber>,
    body: Option<String>,
    dist: Option<SbdbNumber>,
    dist_min: Option<SbdbNumber>,
    v_rel: Option<SbdbNumber>,
}

impl SbdbCloseApproach {
    fn into_record(self) -> Result<CloseApproachRecord, NeoError> {
        let number = |n: &Option<SbdbNumber>| n.as_ref().and_then(SbdbNumber::as_f64);
        let distance_au = number(&self.dist).ok_or_else(|| {
            NeoError::SbdbParse(format!(
                "close approach {} without 'dist'",
                self.cd.as_deref().unwrap_or("?")
            ))
        })?;
        Ok(CloseApproachRecord {
            time: number(&self.jd).map(Epoch::from_jde_tdb),
            distance_au,
            distance_min_au: number(&self.dist_min),
            velocity_kms: number(&self.v_rel),
            body: self.body.unwrap_or_else(|| "Earth".to_string()),
            date: self.cd.unwrap_or_default(),
        })
    }
}

/// One planetary encounter listed by SBDB.
///
/// Fields
/// ------
/// * `date`: calendar date as sent by SBDB (TDB, e.g. `"2029-Apr-13 21:46"`).
/// * `time`: the same instant, when SBDB also sent its Julian date.
/// * `distance_au`: nominal encounter distance.
/// * `distance_min_au`: 3-sigma minimum distance, when known.
/// * `velocity_kms`: relative velocity at encounter, when known.
/// * `body`: encountered body, `"Earth"` if unspecified.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproachRecord {
    pub date: String,
    pub time: Option<Epoch>,
    pub distance_au: AstronomicalUnit,
    pub distance_min_au: Option<AstronomicalUnit>,
    pub velocity_kms: Option<f64>,
    pub body: String,
}

impl CloseApproachRecord {
    pub fn distance_km(&self) -> Kilometer {
        self.distance_au * AU
    }

    /// Nominal distance in mean lunar distances.
    pub fn distance_lunar(&self) -> f64 {
        self.distance_au * LUNAR_DISTANCES_PER_AU
    }
}

fn field_value(fields: &[SbdbField], name: &str) -> Option<f64> {
    fields
        .iter()
        .find(|f| f.name == name)
        .and_then(|f| f.value.as_ref())
        .and_then(SbdbNumber::as_f64)
}

fn required(fields: &[SbdbField], name: &str) -> Result<f64, NeoError> {
    field_value(fields, name)
        .ok_or_else(|| NeoError::SbdbParse(format!("missing orbital element '{name}'")))
}

/// Build [`OrbitalElements`] from an SBDB API JSON payload.
///
/// Arguments
/// ---------
/// * `body`: raw response body.
///
/// Return
/// ------
/// * the validated elements, with name, SPK-ID, hazard flag, diameter and
///   absolute magnitude attached when present.
///
/// Errors
/// ------
/// * [`NeoError::SbdbNotFound`] when the API answered with an error
///   `message` / `code` instead of a record (unknown or ambiguous designation).
/// * [`NeoError::SbdbParse`] for malformed JSON or a missing element
///   (`a`, `e`, `i`, `om`, `w`, `ma`) or epoch.
/// * [`NeoError::InvalidOrbit`] when the record does not describe a bound orbit.
pub fn parse_sbdb_response(body: &str) -> Result<OrbitalElements, NeoError> {
    let mut response: SbdbResponse = serde_json::from_str(body)?;

    let Some(orbit) = response.orbit.take() else {
        return Err(response
            .api_error()
            .unwrap_or_else(|| NeoError::SbdbParse("no 'orbit' section".into())));
    };

    let epoch_jd = orbit
        .epoch
        .as_ref()
        .and_then(SbdbNumber::as_f64)
        .ok_or_else(|| NeoError::SbdbParse("missing orbit epoch".into()))?;

    let fields = &orbit.elements;
    let mut elements = OrbitalElements::new(
        required(fields, "a")?,
        required(fields, "e")?,
        required(fields, "i")?,
        required(fields, "om")?,
        required(fields, "w")?,
        required(fields, "ma")?,
        Epoch::from_jde_tdb(epoch_jd),
    )?;

    if let Some(object) = response.object {
        if let Some(name) = object.fullname.or(object.des) {
            elements = elements.with_name(name.trim());
        }
        if let Some(spkid) = object.spkid {
            elements = elements.with_reference_id(spkid);
        }
        elements = elements.with_potentially_hazardous(object.pha.unwrap_or(false));
    }
    if let Some(diameter_km) = field_value(&response.phys_par, "diameter") {
        elements = elements.with_diameter_m(diameter_km * 1000.0);
    }
    if let Some(h) = field_value(&response.phys_par, "H") {
        elements = elements.with_absolute_magnitude(h);
    }

    Ok(elements)
}

/// Close approaches listed in an SBDB API JSON payload queried with `ca-data=true`.
///
/// A record without a `ca_data` section has no recorded approach and gives
/// an empty list.
///
/// Errors
/// ------
/// * [`NeoError::SbdbNotFound`] when the API answered with an error instead of a record.
/// * [`NeoError::SbdbParse`] for malformed JSON or an approach without a distance.
pub fn parse_close_approaches(body: &str) -> Result<Vec<CloseApproachRecord>, NeoError> {
    let response: SbdbResponse = serde_json::from_str(body)?;
    if response.object.is_none() && response.orbit.is_none() {
        if let Some(err) = response.api_error() {
            return Err(err);
        }
    }
    response
        .ca_data
        .into_iter()
        .map(SbdbCloseApproach::into_record)
        .collect()
}

#[cfg(feature = "sbdb-download")]
pub use client::{get_orbital_elements, SbdbClient, DEFAULT_CA_DATE_MAX};

#[cfg(feature = "sbdb-download")]
mod client {
    use std::time::Duration;

    use log::trace;
    use reqwest::Client;

    use super::{parse_close_approaches, parse_sbdb_response, CloseApproachRecord, SBDB_URL};
    use crate::{catalog, neo_errors::NeoError, orbit_type::OrbitalElements, time::parse_epoch};

    /// Upper bound of the close-approach window when only a start date is given.
    pub const DEFAULT_CA_DATE_MAX: &str = "2100-12-31";

    /// `ca-time` query value for a `[date_min, date_max]` window of `YYYY-MM-DD` dates.
    fn ca_time_window(
        date_min: Option<&str>,
        date_max: Option<&str>,
    ) -> Result<Option<String>, NeoError> {
        let Some(date_min) = date_min else {
            return Ok(None);
        };
        let date_max = date_max.unwrap_or(DEFAULT_CA_DATE_MAX);
        parse_epoch(date_min)?;
        parse_epoch(date_max)?;
        Ok(Some(format!("{date_min}/{date_max}")))
    }

    /// Asynchronous SBDB client with a 30 s request timeout.
    #[derive(Debug, Clone)]
    pub struct SbdbClient {
        http_client: Client,
        base_url: String,
    }

    impl SbdbClient {
        pub fn new() -> Result<Self, NeoError> {
            let http_client = Client::builder().timeout(Duration::from_secs(30)).build()?;
            Ok(Self {
                http_client,
                base_url: SBDB_URL.to_string(),
            })
        }

        /// Point the client at another endpoint (mirror, local test server).
        pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
            self.base_url = base_url.into();
            self
        }

        async fn request(&self, query: &[(&str, String)]) -> Result<String, NeoError> {
            trace!("SBDB request {query:?} at {}", self.base_url);
            let body = self
                .http_client
                .get(&self.base_url)
                .query(query)
                .send()
                .await?
                .text()
                .await?;
            trace!("SBDB answered {} bytes", body.len());
            Ok(body)
        }

        /// Fetch and parse the record of `designation`.
        pub async fn fetch(&self, designation: &str) -> Result<OrbitalElements, NeoError> {
            let body = self
                .request(&[
                    ("sstr", designation.to_string()),
                    ("phys-par", "true".to_string()),
                ])
                .await?;
            parse_sbdb_response(&body)
        }

        /// Fetch the recorded close approaches of `designation`.
        ///
        /// Arguments
        /// ---------
        /// * `designation`: object to query.
        /// * `date_min`: optional window start (`YYYY-MM-DD`); without it SBDB
        ///   applies its own default window.
        /// * `date_max`: window end, [`DEFAULT_CA_DATE_MAX`] when omitted.
        ///
        /// Errors
        /// ------
        /// * [`NeoError::InvalidEpoch`] if a window date cannot be read, before
        ///   any request is sent.
        pub async fn fetch_close_approaches(
            &self,
            designation: &str,
            date_min: Option<&str>,
            date_max: Option<&str>,
        ) -> Result<Vec<CloseApproachRecord>, NeoError> {
            let mut query = vec![
                ("sstr", designation.to_string()),
                ("ca-data", "true".to_string()),
            ];
            if let Some(window) = ca_time_window(date_min, date_max)? {
                query.push(("ca-time", window));
            }
            let body = self.request(&query).await?;
            parse_close_approaches(&body)
        }
    }

    /// Elements of `designation`: the fallback catalog first, then SBDB.
    pub async fn get_orbital_elements(
        client: &SbdbClient,
        designation: &str,
    ) -> Result<OrbitalElements, NeoError> {
        if let Some(elements) = catalog::get(designation) {
            trace!("'{designation}' resolved from the local catalog");
            return Ok(elements.clone());
        }
        client.fetch(designation).await
    }

    #[cfg(test)]
    mod sbdb_client_test {
        use super::*;

        #[tokio::test]
        async fn test_catalog_first() {
            // unroutable endpoint: a catalog hit must not touch the network
            let client = SbdbClient::new()
                .unwrap()
                .with_base_url("http://127.0.0.1:9/sbdb.api");
            let el = get_orbital_elements(&client, "(101955) Bennu").await.unwrap();
            assert_eq!(el.name(), Some("101955 Bennu"));
        }

        #[test]
        fn test_ca_time_window() {
            assert_eq!(ca_time_window(None, Some("2030-01-01")), Ok(None));
            assert_eq!(
                ca_time_window(Some("2029-01-01"), None),
                Ok(Some("2029-01-01/2100-12-31".to_string()))
            );
            assert_eq!(
                ca_time_window(Some("2029-01-01"), Some("2030-06-30")),
                Ok(Some("2029-01-01/2030-06-30".to_string()))
            );
            assert!(matches!(
                ca_time_window(Some("April 2029"), None),
                Err(NeoError::InvalidEpoch(_))
            ));
        }

        #[tokio::test]
        async fn test_bad_window_fails_before_request() {
            let client = SbdbClient::new()
                .unwrap()
                .with_base_url("http://127.0.0.1:9/sbdb.api");
            let err = client
                .fetch_close_approaches("99942", Some("someday"), None)
                .await
                .unwrap_err();
            assert!(matches!(err, NeoError::InvalidEpoch(_)));
        }

        #[tokio::test]
        async fn test_unreachable_endpoint() {
            let client = SbdbClient::new()
                .unwrap()
                .with_base_url("http://127.0.0.1:9/sbdb.api");
            let err = get_orbital_elements(&client, "2024 YR4").await.unwrap_err();
            assert!(matches!(err, NeoError::ReqwestError(_)));
        }
    }
}
