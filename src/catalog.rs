//! # Fallback catalog of well-known asteroids
//!
//! A small, immutable set of orbital elements for objects that are often
//! requested, usable without any network access. All entries share the
//! reference epoch 2024-01-01 00:00 UTC.
//!
//! | Designation      | a [AU] | e      | i [°]  | Ω [°]   | ω [°]   | M [°] | PHA |
//! |------------------|--------|--------|--------|---------|---------|-------|-----|
//! | 99942 Apophis    | 0.9224 | 0.1911 | 3.331  | 204.446 | 126.393 | 180.0 | yes |
//! | 101955 Bennu     | 1.126  | 0.2037 | 6.035  | 2.060   | 66.223  | 101.7 | yes |
//! | 433 Eros         | 1.458  | 0.2229 | 10.829 | 304.3   | 178.9   | 320.0 | no  |
//! | 1862 Apollo      | 1.471  | 0.560  | 6.35   | 35.7    | 285.9   | 45.0  | yes |
//! | 4179 Toutatis    | 2.511  | 0.629  | 0.447  | 128.2   | 274.8   | 190.0 | yes |
//!
//! Lookups are case-insensitive and tolerant to extra whitespace. Each object
//! answers to its full designation (`"99942 Apophis"`), the parenthesised
//! form (`"(99942) Apophis"`), its number (`"99942"`) and its name (`"apophis"`).
use std::{collections::HashMap, sync::LazyLock};

use hifitime::Epoch;
use itertools::Itertools;
use regex::Regex;

use crate::orbit_type::OrbitalElements;

struct CatalogEntry {
    number: &'static str,
    name: &'static str,
    spkid: &'static str,
    elements: [f64; 6],
    diameter_m: f64,
    hazardous: bool,
}

static ENTRIES: [CatalogEntry; 5] = [
    CatalogEntry {
        number: "99942",
        name: "Apophis",
        spkid: "2099942",
        elements: [0.9224, 0.1911, 3.331, 204.446, 126.393, 180.0],
        diameter_m: 370.0,
        hazardous: true,
    },
    CatalogEntry {
        number: "101955",
        name: "Bennu",
        spkid: "2101955",
        elements: [1.126, 0.2037, 6.035, 2.060, 66.223, 101.7],
        diameter_m: 492.0,
        hazardous: true,
    },
    CatalogEntry {
        number: "433",
        name: "Eros",
        spkid: "2000433",
        elements: [1.458, 0.2229, 10.829, 304.3, 178.9, 320.0],
        diameter_m: 16_840.0,
        hazardous: false,
    },
    CatalogEntry {
        number: "1862",
        name: "Apollo",
        spkid: "2001862",
        elements: [1.471, 0.560, 6.35, 35.7, 285.9, 45.0],
        diameter_m: 1_500.0,
        hazardous: true,
    },
    CatalogEntry {
        number: "4179",
        name: "Toutatis",
        spkid: "2004179",
        elements: [2.511, 0.629, 0.447, 128.2, 274.8, 190.0],
        diameter_m: 2_450.0,
        hazardous: true,
    },
];

impl CatalogEntry {
    fn designation(&self) -> String {
        format!("{} {}", self.number, self.name)
    }

    fn to_elements(&self, epoch: Epoch) -> Option<OrbitalElements> {
        let [a, e, i, node, peri, m] = self.elements;
        let elements = match OrbitalElements::new(a, e, i, node, peri, m, epoch) {
            Ok(el) => el,
            Err(err) => {
                log::warn!("catalog entry {} rejected: {err}", self.designation());
                return None;
            }
        };
        Some(
            elements
                .with_name(self.designation())
                .with_reference_id(self.spkid)
                .with_diameter_m(self.diameter_m)
                .with_potentially_hazardous(self.hazardous),
        )
    }
}

/// `"(99942) Apophis"`, `"99942 Apophis"`, `"99942"` or `"Apophis"`, already normalised.
/// Parentheses around the number must come as a pair.
static DESIGNATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?:\((\d+)\)|(\d+))(?: (.+))?$|^(.+)$").ok());

/// Canonical key (`"99942 apophis"`) → elements.
static CATALOG: LazyLock<HashMap<String, OrbitalElements>> = LazyLock::new(|| {
    let epoch = Epoch::from_gregorian_utc_at_midnight(2024, 1, 1);
    ENTRIES
        .iter()
        .filter_map(|entry| {
            let elements = entry.to_elements(epoch)?;
            Some((entry.designation().to_lowercase(), elements))
        })
        .collect()
});

/// Every accepted alias (number, name, canonical key) → canonical key.
static ALIASES: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    ENTRIES
        .iter()
        .flat_map(|entry| {
            let key = entry.designation().to_lowercase();
            [
                (entry.number.to_string(), key.clone()),
                (entry.name.to_lowercase(), key.clone()),
                (key.clone(), key),
            ]
        })
        .collect()
});

/// Trim, collapse inner whitespace runs to one space, lower-case.
fn normalize(designation: &str) -> String {
    designation.split_whitespace().join(" ").to_lowercase()
}

/// Map a user-supplied designation to its canonical catalog key.
fn canonical_key(designation: &str) -> Option<&'static str> {
    let normalized = normalize(designation);
    let captures = DESIGNATION.as_ref()?.captures(&normalized)?;

    let number = captures.get(1).or_else(|| captures.get(2));
    let alias = match (number, captures.get(3), captures.get(4)) {
        (Some(number), Some(name), _) => format!("{} {}", number.as_str(), name.as_str()),
        (Some(number), None, _) => number.as_str().to_string(),
        (None, _, Some(name)) => name.as_str().to_string(),
        (None, _, None) => return None,
    };

    ALIASES.get(&alias).map(String::as_str)
}

/// Orbital elements of a catalogued object.
///
/// Arguments
/// ---------
/// * `designation`: any accepted alias, case and whitespace insensitive.
///
/// Return
/// ------
/// * the elements, or `None` if the object is not in the catalog.
pub fn get(designation: &str) -> Option<&'static OrbitalElements> {
    canonical_key(designation).and_then(|key| CATALOG.get(key))
}

/// `true` if [`get`] would find `designation`.
pub fn contains(designation: &str) -> bool {
    get(designation).is_some()
}

/// Canonical (lower-case) keys of the catalog, sorted.
pub fn designations() -> Vec<&'static str> {
    CATALOG.keys().map(String::as_str).sorted().collect()
}
