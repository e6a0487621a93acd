//! Great-circle geometry for source-receptor reasoning.
//!
//! Implements the haversine distance, initial bearing, and wrap-safe
//! angular separation used by the transport-sensitive scorers and the
//! outfall forecaster.
//!
//! # Scientific Background
//!
//! Source attribution needs only first-order geodesy: distances of tens to
//! hundreds of kilometres and bearings accurate to about a degree. The
//! spherical-Earth haversine formulation is accurate to roughly 0.5% at
//! these scales, well below the uncertainty of any scoring threshold built
//! on top of it.
//!
//! # References
//!
//! - Sinnott, R.W. (1984). "Virtues of the Haversine." Sky and Telescope,
//!   68(2), 159.

use crate::core_types::Coordinate;

/// Mean Earth radius (km), spherical approximation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEG_LAT: f64 = 111.0;

/// Great-circle distance between two points in kilometres.
///
/// Symmetric and never negative; zero only when the points coincide
/// (up to floating-point precision near the antipode).
#[must_use]
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.lat_deg.to_radians();
    let phi2 = b.lat_deg.to_radians();
    let dphi = (b.lat_deg - a.lat_deg).to_radians();
    let dlambda = (b.lon_deg - a.lon_deg).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial bearing from `a` to `b` in degrees, 0 = north, clockwise,
/// result in [0, 360).
///
/// Returns 0.0 when the points coincide (the bearing is undefined there
/// and north is the fixed convention).
#[must_use]
pub fn initial_bearing_deg(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.lat_deg.to_radians();
    let phi2 = b.lat_deg.to_radians();
    let dlambda = (b.lon_deg - a.lon_deg).to_radians();

    let x = dlambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();

    x.atan2(y).to_degrees().rem_euclid(360.0)
}

/// Smallest absolute separation between two bearings, wrap-safe,
/// result in [0, 180].
#[must_use]
pub fn angular_diff_deg(a_deg: f64, b_deg: f64) -> f64 {
    let diff = (a_deg - b_deg).abs().rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Whether a source bearing sits inside the upwind cone of a wind.
///
/// `wind_from_deg` is the meteorological "from" direction; passing a "to"
/// bearing inverts the test. Scorers that also need the separation value
/// compose [`angular_diff_deg`] directly instead.
#[must_use]
pub fn is_upwind(source_bearing_deg: f64, wind_from_deg: f64, tolerance_deg: f64) -> bool {
    angular_diff_deg(source_bearing_deg, wind_from_deg) <= tolerance_deg
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn anand_vihar() -> Coordinate {
        Coordinate::new(28.6469, 77.3164)
    }

    fn sangrur() -> Coordinate {
        Coordinate::new(30.2331, 75.8406)
    }

    /// Test the Delhi-to-Punjab reference pair used throughout the stubble
    /// transport logic.
    #[test]
    fn delhi_to_punjab_distance_and_bearing() {
        let d = distance_km(&anand_vihar(), &sangrur());
        assert_relative_eq!(d, 227.0, epsilon = 0.5);

        let b = initial_bearing_deg(&anand_vihar(), &sangrur());
        assert_relative_eq!(b, 321.3, epsilon = 0.5);
    }

    /// Test distance symmetry and identity.
    #[test]
    fn distance_symmetry_and_identity() {
        let a = anand_vihar();
        let b = sangrur();
        assert_relative_eq!(distance_km(&a, &b), distance_km(&b, &a), epsilon = 1e-9);
        assert_relative_eq!(distance_km(&a, &a), 0.0, epsilon = 1e-9);
    }

    /// Test cardinal bearings on the equator.
    #[test]
    fn cardinal_bearings() {
        let origin = Coordinate::new(0.0, 0.0);
        let east = Coordinate::new(0.0, 1.0);
        let north = Coordinate::new(1.0, 0.0);

        assert_relative_eq!(initial_bearing_deg(&origin, &east), 90.0, epsilon = 1e-6);
        assert_relative_eq!(initial_bearing_deg(&origin, &north), 0.0, epsilon = 1e-6);
        assert_relative_eq!(initial_bearing_deg(&origin, &origin), 0.0, epsilon = 1e-9);
    }

    /// Test wraparound handling in angular separation.
    #[test]
    fn angular_diff_wraps() {
        assert_relative_eq!(angular_diff_deg(350.0, 10.0), 20.0, epsilon = 1e-9);
        assert_relative_eq!(angular_diff_deg(10.0, 350.0), 20.0, epsilon = 1e-9);
        assert_relative_eq!(angular_diff_deg(0.0, 180.0), 180.0, epsilon = 1e-9);
        assert_relative_eq!(angular_diff_deg(90.0, 90.0), 0.0, epsilon = 1e-9);
    }

    /// Test the separation always lands in [0, 180] for a sweep of pairs.
    #[test]
    fn angular_diff_range() {
        for a in 0..36 {
            for b in 0..36 {
                let diff = angular_diff_deg(f64::from(a) * 10.0, f64::from(b) * 10.0);
                assert!(
                    (0.0..=180.0).contains(&diff),
                    "separation {diff} out of range for ({a}, {b})"
                );
            }
        }
    }

    /// Test the Punjab reference geometry sits inside the transport cone
    /// of a northwesterly wind.
    #[test]
    fn punjab_inside_northwesterly_cone() {
        let bearing = initial_bearing_deg(&anand_vihar(), &sangrur());
        assert!(
            is_upwind(bearing, 290.0, 45.0),
            "Punjab should be upwind of a 290-degree wind"
        );
        assert!(
            !is_upwind(bearing, 90.0, 45.0),
            "an easterly wind puts Punjab downwind"
        );
    }

    /// Test the cone test wraps across north.
    #[test]
    fn upwind_wraps_across_north() {
        assert!(is_upwind(355.0, 10.0, 30.0));
        assert!(is_upwind(10.0, 355.0, 30.0));
        assert!(!is_upwind(180.0, 355.0, 30.0));
    }
}
