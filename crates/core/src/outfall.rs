//! Downwind outfall forecaster.
//!
//! Advects the station's pollution load along the 10 m wind in hourly
//! steps and decays its intensity with travel distance. The decay length
//! stretches under strong winds (faster dilution of travel time, not
//! less mixing) and shrinks under a deep boundary layer, so a shallow
//! stable layer carries pollution further at strength.
//!
//! This is a centreline forecast: each step is where the load is headed
//! and how much of it survives, not a full plume cross-section.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::core_types::Coordinate;
use crate::geo;

/// Horizontal displacement vector, km east and km north.
pub type Vec2 = Vector2<f64>;

/// Dilution length scaling per m/s of wind.
const DECAY_WIND_SCALE: f64 = 3.0;
/// Winds below this still advect at this floor for the decay term.
const MIN_EFFECTIVE_WIND_MS: f64 = 1.0;
/// Boundary-layer height that maps to a neutral stability of 1.0, m.
const STABILITY_BLH_SCALE_M: f64 = 800.0;
/// Stability clamp range; shallower layers decay slower, deeper faster.
const STABILITY_FLOOR: f64 = 0.4;
const STABILITY_CEILING: f64 = 2.0;
/// Stability applied when the boundary-layer height is unreported.
const STABILITY_DEFAULT: f64 = 0.6;

/// m/s to km/h.
const MS_TO_KMH: f64 = 3.6;

/// One hourly step of the downwind forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutfallPoint {
    /// Hours after the observation, starting at 1.
    pub hour: u32,
    /// Forecast centreline position.
    pub coordinate: Coordinate,
    /// Along-wind distance from the station, km.
    pub distance_km: f64,
    /// Fraction of the station's load surviving at this distance, (0, 1].
    pub intensity_factor: f64,
    /// Station PM2.5 scaled by the intensity factor, when observed.
    pub predicted_pm25: Option<f64>,
}

/// Unit vector pointing where a wind *from* `wind_from_deg` blows *to*,
/// in km-east/km-north components.
#[must_use]
pub fn downwind_unit(wind_from_deg: f64) -> Vec2 {
    let toward_deg = (wind_from_deg + 180.0).rem_euclid(360.0);
    let theta = toward_deg.to_radians();
    // Compass angles measure from north, so east is the sine component.
    Vec2::new(theta.sin(), theta.cos())
}

/// Fraction of the source load surviving `distance_km` of travel.
#[must_use]
pub fn decay_factor(distance_km: f64, wind_speed_ms: f64, blh_m: Option<f64>) -> f64 {
    let stability = blh_m.map_or(STABILITY_DEFAULT, |blh| {
        (blh / STABILITY_BLH_SCALE_M).clamp(STABILITY_FLOOR, STABILITY_CEILING)
    });
    let wind = wind_speed_ms.max(MIN_EFFECTIVE_WIND_MS);
    (-distance_km * stability / (DECAY_WIND_SCALE * wind)).exp()
}

/// Forecast the hourly downwind sequence from a source position.
///
/// Returns one point per hour out to `horizon_h`. The sequence is empty
/// when the wind is unresolved (missing direction, or missing or zero
/// speed): a forecast from an unknown wind would be fabrication.
#[must_use]
pub fn simulate(
    source: &Coordinate,
    wind_dir_from_deg: Option<f64>,
    wind_speed_ms: Option<f64>,
    blh_m: Option<f64>,
    pm25: Option<f64>,
    horizon_h: u32,
) -> Vec<OutfallPoint> {
    let (Some(direction), Some(speed)) = (wind_dir_from_deg, wind_speed_ms) else {
        return Vec::new();
    };
    if speed <= 0.0 {
        return Vec::new();
    }

    let unit = downwind_unit(direction);
    let km_per_hour = speed * MS_TO_KMH;
    // Longitude degrees shrink with latitude; the station's cosine is a
    // good constant over a few hundred km.
    let lat_cos = source.lat_deg.to_radians().cos().max(0.1);

    (1..=horizon_h)
        .map(|hour| {
            let distance_km = km_per_hour * f64::from(hour);
            let displacement: Vec2 = unit * distance_km;
            let coordinate = Coordinate::new(
                source.lat_deg + displacement.y / geo::KM_PER_DEG_LAT,
                source.lon_deg + displacement.x / (geo::KM_PER_DEG_LAT * lat_cos),
            );
            let intensity_factor = decay_factor(distance_km, speed, blh_m);
            OutfallPoint {
                hour,
                coordinate,
                distance_km,
                intensity_factor,
                predicted_pm25: pm25.map(|v| v * intensity_factor),
            }
        })
        .collect()
}
