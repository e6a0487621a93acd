//! Satellite fire detections and the indexed snapshot the engine queries.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core_types::{Coordinate, GeoGrid};
use crate::geo;

/// Detector confidence class attached to a satellite hotspot.
///
/// VIIRS active-fire products report confidence categorically rather than
/// as a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireConfidence {
    Low,
    Nominal,
    High,
}

/// One satellite-detected fire hotspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireDetection {
    pub coordinate: Coordinate,
    /// Fire radiative power, MW.
    pub frp_mw: f64,
    /// Scan time, station-local civil time.
    pub timestamp: NaiveDateTime,
    pub confidence: FireConfidence,
}

/// An immutable snapshot of fire detections, pre-filtered by the caller to
/// the relevant lookback window, with a lat/lon grid for radius queries.
///
/// The engine never mutates a snapshot; one set can back any number of
/// concurrent evaluations.
#[derive(Debug)]
pub struct FireSet {
    fires: Vec<FireDetection>,
    grid: GeoGrid,
}

/// Grid cell edge for fire indexing, degrees (~28 km at these latitudes).
const FIRE_CELL_DEG: f64 = 0.25;

impl FireSet {
    /// Build a snapshot and its spatial index.
    #[must_use]
    pub fn new(fires: Vec<FireDetection>) -> Self {
        let mut grid = GeoGrid::new(FIRE_CELL_DEG);
        for (id, fire) in fires.iter().enumerate() {
            grid.insert(id as u32, &fire.coordinate);
        }
        Self { fires, grid }
    }

    /// Number of detections in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fires.len()
    }

    /// Whether the snapshot holds no detections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fires.is_empty()
    }

    /// All detections, in caller-supplied order.
    #[must_use]
    pub fn detections(&self) -> &[FireDetection] {
        &self.fires
    }

    /// Detections within `radius_km` of `center`, verified by haversine
    /// distance after the grid pre-filter. Order follows the snapshot.
    #[must_use]
    pub fn within_km(&self, center: &Coordinate, radius_km: f64) -> Vec<&FireDetection> {
        let mut ids = self.grid.query_radius_km(center, radius_km);
        ids.sort_unstable();
        ids.into_iter()
            .map(|id| &self.fires[id as usize])
            .filter(|fire| geo::distance_km(center, &fire.coordinate) <= radius_km)
            .collect()
    }
}
