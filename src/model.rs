//! Core data types: stations, trips, and the time-of-day filter.

use anyhow::{Result, bail};
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Minutes in a day; valid reference minutes are `0..=1439`.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Half-width of the time window around a reference minute.
pub const WINDOW_MINUTES: u16 = 60;

/// A fixed bike-share dock location.
///
/// The `arrivals`/`departures`/`total_traffic` counters are derived values,
/// never present in the source dataset; they are populated by
/// [`compute_traffic`](crate::traffic::compute_traffic) and reset on every
/// recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Short station code, unique across the dataset (e.g. "A32000").
    pub short_name: String,
    #[serde(default)]
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub capacity: Option<u32>,

    #[serde(default, skip_deserializing)]
    pub arrivals: u32,
    #[serde(default, skip_deserializing)]
    pub departures: u32,
    #[serde(default, skip_deserializing)]
    pub total_traffic: u32,
}

/// One rental event from the trip log. Read-only input to aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub start_station_id: String,
    pub end_station_id: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub started_at: NaiveDateTime,
    #[serde(deserialize_with = "de_timestamp")]
    pub ended_at: NaiveDateTime,
}

/// Restricts which trips contribute to traffic counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    /// All trips pass through.
    All,
    /// Only trips starting or ending within [`WINDOW_MINUTES`] of this
    /// minute-of-day.
    Around(u16),
}

impl TimeFilter {
    /// Builds a filter around `minute`, rejecting values outside `0..=1439`.
    ///
    /// # Errors
    ///
    /// Returns an error if `minute` is not a valid minute-of-day.
    pub fn around(minute: u16) -> Result<Self> {
        if minute >= MINUTES_PER_DAY {
            bail!(
                "reference minute {} out of range (expected 0..={})",
                minute,
                MINUTES_PER_DAY - 1
            );
        }
        Ok(TimeFilter::Around(minute))
    }
}

/// Minute-of-day of a timestamp, in `0..=1439`.
pub fn minute_of_day(ts: NaiveDateTime) -> u16 {
    (ts.hour() * 60 + ts.minute()) as u16
}

/// Accepts `YYYY-MM-DD HH:MM:SS` with optional fractional seconds, the format
/// the trip log uses.
fn de_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f").map_err(serde::de::Error::custom)
}
