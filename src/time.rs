use hifitime::{Duration, Epoch, Unit};
use std::str::FromStr;

use crate::{
    constants::{Days, SECONDS_PER_DAY},
    neo_errors::NeoError,
};

/// Parse a date string into an [`Epoch`].
///
/// Accepts everything [`Epoch::from_str`] understands, e.g. `2024-01-01T00:00:00`,
/// `2024-01-01T00:00:00 UTC` or `2024-01-01`.
///
/// Argument
/// --------
/// * `date`: the date string
///
/// Return
/// ------
/// * the parsed epoch, or [`NeoError::InvalidEpoch`] if the string cannot be read
pub fn parse_epoch(date: &str) -> Result<Epoch, NeoError> {
    let trimmed = date.trim();
    // hifitime wants a time part, plain calendar dates are read at midnight UTC
    let candidate = if trimmed.len() == 10 && !trimmed.contains('T') {
        format!("{trimmed}T00:00:00")
    } else {
        trimmed.to_string()
    };
    Epoch::from_str(&candidate).map_err(|e| NeoError::InvalidEpoch(format!("{date}: {e}")))
}

/// Signed elapsed time from `from` to `to`, in days.
pub fn days_between(from: Epoch, to: Epoch) -> Days {
    (to - from).to_seconds() / SECONDS_PER_DAY
}

/// Duration of `days` days, fractional values allowed.
pub fn days(days: Days) -> Duration {
    Unit::Day * days
}

/// Number of whole days elapsed since 1 January 00:00 UTC of the epoch's calendar year.
///
/// 1 January maps to 0, 31 December to 364 (or 365 on leap years).
/// Any time of day within a date maps to the same value.
pub fn day_of_year(epoch: Epoch) -> u32 {
    let (year, _, _, _, _, _, _) = epoch.to_gregorian_utc();
    let start_of_year = Epoch::from_gregorian_utc_at_midnight(year, 1, 1);
    days_between(start_of_year, epoch).floor().max(0.0) as u32
}
