//! Monitoring station context.

use serde::{Deserialize, Serialize};

use crate::core_types::Coordinate;

/// Smallest traffic-exposure multiplier a station can carry.
pub const MIN_TRAFFIC_FACTOR: f64 = 0.4;
/// Largest traffic-exposure multiplier a station can carry.
pub const MAX_TRAFFIC_FACTOR: f64 = 1.2;

/// The fixed metadata of one monitoring station.
///
/// `traffic_factor` expresses how exposed the site is to road traffic
/// relative to a city-average site: 0.4 for a background location up to
/// 1.2 for a kerbside one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationContext {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub traffic_factor: f64,
}

impl StationContext {
    /// Build a station record, clamping the traffic factor onto its scale.
    /// A non-finite factor falls to 1.0 (city average).
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coordinate: Coordinate,
        traffic_factor: f64,
    ) -> Self {
        let traffic_factor = if traffic_factor.is_finite() {
            traffic_factor.clamp(MIN_TRAFFIC_FACTOR, MAX_TRAFFIC_FACTOR)
        } else {
            1.0
        };
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
            traffic_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test traffic factor clamping.
    #[test]
    fn traffic_factor_clamping() {
        let c = Coordinate::new(28.6469, 77.3164);
        assert_eq!(StationContext::new("235", "Anand Vihar", c, 2.0).traffic_factor, 1.2);
        assert_eq!(StationContext::new("235", "Anand Vihar", c, 0.1).traffic_factor, 0.4);
        assert_eq!(StationContext::new("235", "Anand Vihar", c, 0.9).traffic_factor, 0.9);
        assert_eq!(
            StationContext::new("235", "Anand Vihar", c, f64::NAN).traffic_factor,
            1.0
        );
    }
}
