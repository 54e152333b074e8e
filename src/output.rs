//! Output formatting and persistence for station traffic.
//!
//! Supports the tooltip-style summary label, JSON serialization, and CSV
//! append for downstream consumers.

use anyhow::Result;
use tracing::{debug, info};

use crate::model::Station;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One-line traffic summary for a station, e.g.
/// `"12 trips (7 departures, 5 arrivals)"`.
pub fn traffic_label(station: &Station) -> String {
    format!(
        "{} trips ({} departures, {} arrivals)",
        station.total_traffic, station.departures, station.arrivals
    )
}

/// Logs the station list as pretty-printed JSON.
pub fn print_json(stations: &[Station]) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(stations)?);
    Ok(())
}

/// Appends one [`Station`] row (with its derived counters) to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, station: &Station) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(station)?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_station() -> Station {
        Station {
            short_name: "A32000".to_string(),
            name: "Central Square".to_string(),
            lon: -71.103,
            lat: 42.365,
            capacity: Some(19),
            arrivals: 5,
            departures: 7,
            total_traffic: 12,
        }
    }

    #[test]
    fn test_traffic_label() {
        assert_eq!(
            traffic_label(&sample_station()),
            "12 trips (7 departures, 5 arrivals)"
        );
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&[sample_station()]).unwrap();
    }

    #[test]
    fn test_append_record_creates_file() {
        let path = temp_path("bluebikes_traffic_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        append_record(&path, &sample_station()).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("A32000"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let path = temp_path("bluebikes_traffic_test_header.csv");
        let _ = fs::remove_file(&path);

        append_record(&path, &sample_station()).unwrap();
        append_record(&path, &sample_station()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content
            .lines()
            .filter(|l| l.contains("short_name"))
            .count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_record_two_rows() {
        let path = temp_path("bluebikes_traffic_test_rows.csv");
        let _ = fs::remove_file(&path);

        append_record(&path, &sample_station()).unwrap();
        append_record(&path, &sample_station()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // 1 header + 2 data rows
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }
}
