//! Square-root scale for sizing station markers by trip volume.

use crate::model::Station;

/// Maximum marker radius in pixels.
const MAX_RADIUS: f64 = 25.0;

/// Maps `total_traffic` in `[0, max]` onto a radius in `[0.0, 25.0]` using a
/// square-root scale, so marker area stays proportional to traffic.
#[derive(Debug, Clone, Copy)]
pub struct RadiusScale {
    domain_max: f64,
}

impl RadiusScale {
    /// Builds a scale whose domain spans the busiest station in `stations`.
    pub fn from_stations(stations: &[Station]) -> Self {
        let domain_max = stations
            .iter()
            .map(|s| s.total_traffic)
            .max()
            .unwrap_or(0);
        Self {
            domain_max: f64::from(domain_max),
        }
    }

    /// Radius for a traffic count. An empty or all-zero domain maps
    /// everything to 0.0.
    pub fn radius(&self, total_traffic: u32) -> f64 {
        if self.domain_max == 0.0 {
            return 0.0;
        }
        MAX_RADIUS * (f64::from(total_traffic) / self.domain_max).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station_with_traffic(total: u32) -> Station {
        Station {
            short_name: "S".to_string(),
            name: String::new(),
            lon: 0.0,
            lat: 0.0,
            capacity: None,
            arrivals: 0,
            departures: 0,
            total_traffic: total,
        }
    }

    #[test]
    fn test_empty_domain_maps_to_zero() {
        let scale = RadiusScale::from_stations(&[]);
        assert_eq!(scale.radius(0), 0.0);
        assert_eq!(scale.radius(100), 0.0);
    }

    #[test]
    fn test_max_traffic_maps_to_max_radius() {
        let stations = vec![station_with_traffic(400), station_with_traffic(100)];
        let scale = RadiusScale::from_stations(&stations);

        assert_eq!(scale.radius(400), 25.0);
    }

    #[test]
    fn test_sqrt_shape() {
        let stations = vec![station_with_traffic(400)];
        let scale = RadiusScale::from_stations(&stations);

        // A quarter of the max traffic gets half the max radius.
        assert_eq!(scale.radius(100), 12.5);
        assert_eq!(scale.radius(0), 0.0);
    }

    #[test]
    fn test_monotonic() {
        let stations = vec![station_with_traffic(500)];
        let scale = RadiusScale::from_stations(&stations);

        assert!(scale.radius(10) < scale.radius(20));
        assert!(scale.radius(20) < scale.radius(500));
    }
}
