//! Industrial emitters and the indexed reference snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core_types::{Coordinate, GeoGrid};
use crate::geo;

/// Facility class from the emitter inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmitterCategory {
    Power,
    HeavyIndustry,
    LightIndustry,
    WasteProcessing,
    Other,
}

impl EmitterCategory {
    /// Human-readable form for reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Power => "Power Plant",
            Self::HeavyIndustry => "Heavy Industry",
            Self::LightIndustry => "Light Industry",
            Self::WasteProcessing => "Waste Processing",
            Self::Other => "Industrial",
        }
    }
}

impl fmt::Display for EmitterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One facility from the static emitter inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustrialEmitter {
    pub name: String,
    pub coordinate: Coordinate,
    /// Relative emission strength on the inventory's 3-100 scale.
    pub emission_weight: f64,
    pub category: EmitterCategory,
}

/// Smallest emission weight the inventory assigns.
pub const MIN_EMISSION_WEIGHT: f64 = 3.0;
/// Largest emission weight the inventory assigns.
pub const MAX_EMISSION_WEIGHT: f64 = 100.0;

impl IndustrialEmitter {
    /// Build a facility record, clamping the emission weight onto the
    /// inventory scale. A non-finite weight falls to the scale minimum.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        coordinate: Coordinate,
        emission_weight: f64,
        category: EmitterCategory,
    ) -> Self {
        let emission_weight = if emission_weight.is_finite() {
            emission_weight.clamp(MIN_EMISSION_WEIGHT, MAX_EMISSION_WEIGHT)
        } else {
            MIN_EMISSION_WEIGHT
        };
        Self {
            name: name.into(),
            coordinate,
            emission_weight,
            category,
        }
    }
}

/// An immutable snapshot of the emitter inventory with a lat/lon grid
/// for radius queries. Shared read-only across evaluations.
#[derive(Debug)]
pub struct EmitterSet {
    emitters: Vec<IndustrialEmitter>,
    grid: GeoGrid,
}

/// Grid cell edge for emitter indexing, degrees. Finer than the fire grid
/// because emitter queries use 30-50 km radii.
const EMITTER_CELL_DEG: f64 = 0.1;

impl EmitterSet {
    /// Build a snapshot and its spatial index.
    #[must_use]
    pub fn new(emitters: Vec<IndustrialEmitter>) -> Self {
        let mut grid = GeoGrid::new(EMITTER_CELL_DEG);
        for (id, emitter) in emitters.iter().enumerate() {
            grid.insert(id as u32, &emitter.coordinate);
        }
        Self { emitters, grid }
    }

    /// Number of facilities in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    /// Whether the snapshot holds no facilities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    /// All facilities, in inventory order.
    #[must_use]
    pub fn facilities(&self) -> &[IndustrialEmitter] {
        &self.emitters
    }

    /// Facilities within `radius_km` of `center`, verified by haversine
    /// distance after the grid pre-filter. Order follows the inventory.
    #[must_use]
    pub fn within_km(&self, center: &Coordinate, radius_km: f64) -> Vec<&IndustrialEmitter> {
        let mut ids = self.grid.query_radius_km(center, radius_km);
        ids.sort_unstable();
        ids.into_iter()
            .map(|id| &self.emitters[id as usize])
            .filter(|emitter| geo::distance_km(center, &emitter.coordinate) <= radius_km)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test emission weight clamping onto the inventory scale.
    #[test]
    fn weight_clamping() {
        let station = Coordinate::new(28.6469, 77.3164);
        let low = IndustrialEmitter::new("A", station, 1.0, EmitterCategory::Other);
        assert_eq!(low.emission_weight, 3.0);

        let high = IndustrialEmitter::new("B", station, 400.0, EmitterCategory::Power);
        assert_eq!(high.emission_weight, 100.0);

        let bad = IndustrialEmitter::new("C", station, f64::NAN, EmitterCategory::Other);
        assert_eq!(bad.emission_weight, 3.0);
    }

    /// Test the snapshot preserves inventory order and categories render
    /// with their report names.
    #[test]
    fn facilities_and_category_names() {
        let set = EmitterSet::new(vec![
            IndustrialEmitter::new(
                "Badarpur Thermal Station",
                Coordinate::new(28.5021, 77.3035),
                70.0,
                EmitterCategory::Power,
            ),
            IndustrialEmitter::new(
                "Okhla Phase II",
                Coordinate::new(28.5310, 77.2680),
                45.0,
                EmitterCategory::WasteProcessing,
            ),
        ]);

        let names: Vec<&str> = set.facilities().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Badarpur Thermal Station", "Okhla Phase II"]);
        assert_eq!(set.facilities()[0].category.to_string(), "Power Plant");
        assert_eq!(EmitterCategory::Other.as_str(), "Industrial");
    }

    /// Test the radius query against a small inventory.
    #[test]
    fn within_km_filters_by_distance() {
        let station = Coordinate::new(28.6469, 77.3164);
        let set = EmitterSet::new(vec![
            IndustrialEmitter::new(
                "Close Works",
                Coordinate::new(28.70, 77.25),
                60.0,
                EmitterCategory::HeavyIndustry,
            ),
            IndustrialEmitter::new(
                "Distant Plant",
                Coordinate::new(29.60, 77.32),
                90.0,
                EmitterCategory::Power,
            ),
        ]);

        let near = set.within_km(&station, 30.0);
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].name, "Close Works");
    }
}
