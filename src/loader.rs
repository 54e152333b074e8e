//! Dataset ingestion: the station list (JSON) and the trip log (CSV).
//!
//! Both datasets can come from a local path or an HTTP(S) URL. Malformed
//! rows are skipped with a warning rather than failing the whole load.

use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::fetch::{BasicClient, fetch_bytes};
use crate::model::{Station, Trip};

/// Envelope of the station dataset: `{"data": {"stations": [...]}}`.
#[derive(Deserialize)]
struct StationDocument {
    data: StationList,
}

#[derive(Deserialize)]
struct StationList {
    stations: Vec<Station>,
}

/// Reads dataset bytes from a local file path or fetches them over HTTP.
#[tracing::instrument(fields(source = %source))]
pub async fn load_bytes(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, source).await?
    } else {
        std::fs::read(source)?
    };
    debug!(bytes = bytes.len(), "Dataset bytes loaded");
    Ok(bytes)
}

/// Parses the station JSON document.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid station document.
pub fn parse_stations(bytes: &[u8]) -> Result<Vec<Station>> {
    let document: StationDocument = serde_json::from_slice(bytes)?;
    Ok(document.data.stations)
}

/// Parses the trip log CSV, skipping rows that fail to deserialize.
pub fn parse_trips(bytes: &[u8]) -> Result<Vec<Trip>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut trips = Vec::new();
    let mut skipped = 0usize;

    for row in reader.deserialize::<Trip>() {
        match row {
            Ok(trip) => trips.push(trip),
            Err(e) => {
                skipped += 1;
                warn!(error = %e, "Skipping malformed trip row");
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, kept = trips.len(), "Trip log had malformed rows");
    }

    Ok(trips)
}

/// Loads and parses the station dataset from a path or URL.
pub async fn load_stations(source: &str) -> Result<Vec<Station>> {
    let bytes = load_bytes(source).await?;
    let stations = parse_stations(&bytes)?;
    info!(count = stations.len(), "Stations loaded");
    Ok(stations)
}

/// Loads and parses the trip log from a path or URL.
pub async fn load_trips(source: &str) -> Result<Vec<Trip>> {
    let bytes = load_bytes(source).await?;
    let trips = parse_trips(&bytes)?;
    info!(count = trips.len(), "Trips loaded");
    Ok(trips)
}
