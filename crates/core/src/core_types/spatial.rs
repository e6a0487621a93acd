//! Lat/lon cell index for radius queries over reference sets.

use rustc_hash::FxHashMap;

use crate::core_types::Coordinate;
use crate::geo;

/// Hash-grid spatial index over geographic points.
///
/// Cells are keyed by the floored (lat, lon) pair in units of `cell_deg`.
/// A radius query returns a superset of the true neighbours (everything in
/// the covering cell block); callers re-filter with the haversine
/// distance, so the grid is a performance structure only and can never
/// change results.
#[derive(Debug)]
pub struct GeoGrid {
    cells: FxHashMap<(i32, i32), Vec<u32>>,
    cell_deg: f64,
}

impl GeoGrid {
    /// Create an empty grid with the given cell edge in degrees.
    #[must_use]
    pub fn new(cell_deg: f64) -> Self {
        Self {
            cells: FxHashMap::default(),
            cell_deg,
        }
    }

    fn cell_of(&self, coordinate: &Coordinate) -> (i32, i32) {
        (
            (coordinate.lat_deg / self.cell_deg).floor() as i32,
            (coordinate.lon_deg / self.cell_deg).floor() as i32,
        )
    }

    /// Insert an id at a coordinate.
    pub fn insert(&mut self, id: u32, coordinate: &Coordinate) {
        let key = self.cell_of(coordinate);
        self.cells.entry(key).or_default().push(id);
    }

    /// Ids in every cell touching the radius around `center`.
    ///
    /// Superset semantics: the block of cells covering the radius is
    /// returned whole, including points just outside the circle.
    #[must_use]
    pub fn query_radius_km(&self, center: &Coordinate, radius_km: f64) -> Vec<u32> {
        let deg_per_km_lat = 1.0 / geo::KM_PER_DEG_LAT;
        // Longitude degrees shrink with latitude; the cosine floor keeps
        // the block finite near the poles.
        let lat_cos = center.lat_deg.to_radians().cos().max(0.1);

        let lat_cells = (radius_km * deg_per_km_lat / self.cell_deg).ceil() as i32;
        let lon_cells = (radius_km * deg_per_km_lat / lat_cos / self.cell_deg).ceil() as i32;

        let (center_lat, center_lon) = self.cell_of(center);

        let mut results = Vec::new();
        for dlat in -lat_cells..=lat_cells {
            for dlon in -lon_cells..=lon_cells {
                if let Some(ids) = self.cells.get(&(center_lat + dlat, center_lon + dlon)) {
                    results.extend_from_slice(ids);
                }
            }
        }
        results
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that a radius query returns a superset of the true neighbours.
    #[test]
    fn query_returns_superset() {
        let mut grid = GeoGrid::new(0.25);
        let center = Coordinate::new(28.65, 77.32);

        grid.insert(1, &Coordinate::new(28.66, 77.30)); // ~2 km away
        grid.insert(2, &Coordinate::new(29.10, 77.32)); // ~50 km away
        grid.insert(3, &Coordinate::new(31.00, 74.00)); // ~420 km away

        let near = grid.query_radius_km(&center, 10.0);
        assert!(near.contains(&1), "close point must be in the covering block");
        assert!(!near.contains(&3), "far point must not appear for a small radius");

        let wide = grid.query_radius_km(&center, 500.0);
        assert!(wide.contains(&1) && wide.contains(&2) && wide.contains(&3));
    }

    /// Test that co-located points share a cell.
    #[test]
    fn colocated_points_share_cell() {
        let mut grid = GeoGrid::new(0.25);
        grid.insert(7, &Coordinate::new(30.2458, 75.8421));
        grid.insert(8, &Coordinate::new(30.2460, 75.8420));
        assert_eq!(grid.cell_count(), 1);
    }
}
