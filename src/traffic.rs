//! Traffic aggregation: per-station arrival/departure counts over a trip log.

use std::collections::HashMap;

use crate::model::{Station, TimeFilter, Trip, WINDOW_MINUTES, minute_of_day};

/// Populates the derived traffic counters on every station from the trip log.
///
/// Each trip counts as one departure at its start station and one arrival at
/// its end station. Stations with no matching trips get zero counts. Trips
/// referencing a station id absent from `stations` contribute nothing for
/// that id.
///
/// Counters are recomputed from scratch on every call, so calling this again
/// with the same inputs yields the same output.
pub fn compute_traffic(mut stations: Vec<Station>, trips: &[Trip]) -> Vec<Station> {
    let mut departures: HashMap<&str, u32> = HashMap::new();
    let mut arrivals: HashMap<&str, u32> = HashMap::new();

    for trip in trips {
        *departures.entry(trip.start_station_id.as_str()).or_default() += 1;
        *arrivals.entry(trip.end_station_id.as_str()).or_default() += 1;
    }

    for station in &mut stations {
        let id = station.short_name.as_str();
        station.arrivals = arrivals.get(id).copied().unwrap_or(0);
        station.departures = departures.get(id).copied().unwrap_or(0);
        station.total_traffic = station.arrivals + station.departures;
    }

    stations
}

/// Keeps the trips near the filter's reference minute, preserving input order.
///
/// A trip qualifies if either its start or its end minute-of-day lies within
/// 60 minutes of the reference. The difference is plain linear distance on
/// the 0..=1439 scale; there is no wraparound across midnight, matching the
/// behavior of the upstream visualization.
pub fn filter_trips(trips: &[Trip], filter: TimeFilter) -> Vec<Trip> {
    match filter {
        TimeFilter::All => trips.to_vec(),
        TimeFilter::Around(minute) => trips
            .iter()
            .filter(|trip| {
                near(minute_of_day(trip.started_at), minute)
                    || near(minute_of_day(trip.ended_at), minute)
            })
            .cloned()
            .collect(),
    }
}

fn near(trip_minute: u16, reference: u16) -> bool {
    trip_minute.abs_diff(reference) <= WINDOW_MINUTES
}
