//! Stubble-burning scorer.
//!
//! Crop-residue fires in the northwestern stubble belt load the airshed
//! only when three conditions line up: the burning season, a wind with a
//! northwesterly component, and a boundary layer shallow enough to keep
//! the transported smoke concentrated. The scorer gates on the first two
//! and then accumulates a per-fire transport term over the supplied
//! detection set.
//!
//! # Scientific Background
//!
//! Each detection contributes the product of four bounded factors:
//! bearing alignment with the wind, hyperbolic distance decay over a
//! ~100 km scale, a ventilation factor that vanishes once the boundary
//! layer reaches 1000 m, and fire radiative power saturating at 50 MW.
//! The factor sum, not the final score, carries the severity signal, so
//! qualitative levels band on the sum.
//!
//! # References
//!
//! - Jethva, H. et al. (2019). "Connecting crop productivity, residue
//!   fires, and air quality over northern India." Scientific Reports, 9,
//!   16594.

use crate::core_types::{Coordinate, FireSet, SourceLevel};
use crate::geo;
use crate::scoring::{retain_top_evidence, Evidence, SourceScore};

/// Months in which residue burning occurs (October through January).
pub const SEASON_MONTHS: [u32; 4] = [10, 11, 12, 1];
/// Lower edge of the wind sector pointing at the stubble belt, degrees.
pub const SECTOR_MIN_DEG: f64 = 250.0;
/// Upper edge of the wind sector pointing at the stubble belt, degrees.
pub const SECTOR_MAX_DEG: f64 = 340.0;
/// Fires beyond this range cannot reach the station within a day.
pub const MAX_TRANSPORT_KM: f64 = 400.0;
/// Widest bearing-to-wind separation that still transports smoke.
pub const MAX_BEARING_OFF_DEG: f64 = 60.0;

/// Distance decay scale, km.
const DECAY_SCALE_KM: f64 = 100.0;
/// Boundary-layer height at which ventilation cancels transport, m.
const VENTILATION_CEILING_M: f64 = 1000.0;
/// Fire radiative power at which the intensity factor saturates, MW.
const FRP_SATURATION_MW: f64 = 50.0;
/// Per-fire contributions at or below this are noise and dropped.
const MIN_KEPT_CONTRIBUTION: f64 = 2.0;

const OFF_SEASON_SCORE: f64 = 5.0;
const WRONG_SECTOR_SCORE: f64 = 10.0;
const BASE_SCORE: f64 = 15.0;
const MAX_SCORE: f64 = 85.0;
/// Transport-sum cut for a High label.
const HIGH_SUM: f64 = 150.0;
/// Transport-sum cut for a Medium label.
const MEDIUM_SUM: f64 = 50.0;

/// Administrative regions of the stubble belt, used to label fire
/// evidence. Each detection is assigned to the nearest entry.
const SOURCE_REGIONS: &[(&str, Coordinate)] = &[
    ("Amritsar", Coordinate::new(31.6340, 74.8723)),
    ("Ferozepur", Coordinate::new(30.9331, 74.6225)),
    ("Ludhiana", Coordinate::new(30.9010, 75.8573)),
    ("Moga", Coordinate::new(30.8165, 75.1717)),
    ("Barnala", Coordinate::new(30.3819, 75.5468)),
    ("Patiala", Coordinate::new(30.3398, 76.3869)),
    ("Sangrur", Coordinate::new(30.2458, 75.8421)),
    ("Bathinda", Coordinate::new(30.2110, 74.9455)),
    ("Kaithal", Coordinate::new(29.8015, 76.3996)),
    ("Karnal", Coordinate::new(29.6857, 76.9905)),
    ("Sirsa", Coordinate::new(29.5349, 75.0280)),
    ("Fatehabad", Coordinate::new(29.5152, 75.4556)),
    ("Hisar", Coordinate::new(29.1492, 75.7217)),
];

/// Name of the stubble-belt region nearest to a coordinate.
#[must_use]
pub fn nearest_region(coordinate: &Coordinate) -> &'static str {
    let mut best = SOURCE_REGIONS[0].0;
    let mut best_km = f64::INFINITY;
    for (name, center) in SOURCE_REGIONS {
        let km = geo::distance_km(coordinate, center);
        if km < best_km {
            best_km = km;
            best = name;
        }
    }
    best
}

/// Evaluate the stubble-burning contribution for one station-hour.
///
/// `month` is the station-local calendar month (1-12); `fires` must
/// already be filtered to the caller's lookback window.
#[must_use]
pub fn evaluate(
    station: &Coordinate,
    wind_dir_10m_deg: Option<f64>,
    blh_m: Option<f64>,
    month: u32,
    fires: &FireSet,
) -> SourceScore {
    // Season gate
    if !SEASON_MONTHS.contains(&month) {
        return SourceScore::plain(
            OFF_SEASON_SCORE,
            SourceLevel::None,
            "Outside the stubble-burning season",
        );
    }

    // Sector gate
    let Some(wind_deg) = wind_dir_10m_deg else {
        return SourceScore::plain(
            WRONG_SECTOR_SCORE,
            SourceLevel::Low,
            "Wind direction unavailable; transport from the stubble belt cannot be established",
        );
    };
    if !(SECTOR_MIN_DEG..=SECTOR_MAX_DEG).contains(&wind_deg) {
        return SourceScore::plain(
            WRONG_SECTOR_SCORE,
            SourceLevel::Low,
            format!("Wind from {wind_deg:.0}°, not from the stubble belt sector"),
        );
    }

    // Ventilation factor: vanishes at a 1000 m boundary layer, and an
    // unknown boundary layer claims no trapping boost at all.
    let blh_factor = blh_m.map_or(0.0, |blh| (1.0 - blh / VENTILATION_CEILING_M).max(0.0));

    let mut transport_sum = 0.0;
    let mut kept = 0usize;
    let mut evidence = Vec::new();

    for fire in fires.within_km(station, MAX_TRANSPORT_KM) {
        let distance_km = geo::distance_km(station, &fire.coordinate);
        let bearing = geo::initial_bearing_deg(station, &fire.coordinate);
        let off_wind = geo::angular_diff_deg(bearing, wind_deg);
        if off_wind > MAX_BEARING_OFF_DEG {
            continue;
        }

        let alignment = 1.0 - off_wind / MAX_BEARING_OFF_DEG;
        let distance_decay = 1.0 / (1.0 + distance_km / DECAY_SCALE_KM);
        let frp_factor = (fire.frp_mw / FRP_SATURATION_MW).clamp(0.0, 1.0);

        let contribution = alignment * distance_decay * blh_factor * frp_factor * 100.0;
        if contribution <= MIN_KEPT_CONTRIBUTION {
            continue;
        }

        transport_sum += contribution;
        kept += 1;
        evidence.push(Evidence::Fire {
            region: nearest_region(&fire.coordinate).to_owned(),
            distance_km,
            contribution,
        });
    }

    retain_top_evidence(&mut evidence);

    let raw = (BASE_SCORE + transport_sum / 3.0).min(MAX_SCORE);
    let level = SourceLevel::band(transport_sum, HIGH_SUM, MEDIUM_SUM);
    let explanation = if kept == 0 {
        "In season with favourable wind, but no fires contributing at this station".to_owned()
    } else {
        format!(
            "{kept} fires aligned with the {wind_deg:.0}° wind, transport sum {transport_sum:.0}"
        )
    };

    SourceScore {
        raw,
        level,
        explanation,
        evidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{FireConfidence, FireDetection};
    use chrono::NaiveDate;

    fn station() -> Coordinate {
        Coordinate::new(28.6469, 77.3164)
    }

    fn detection(lat: f64, lon: f64, frp: f64) -> FireDetection {
        FireDetection {
            coordinate: Coordinate::new(lat, lon),
            frp_mw: frp,
            timestamp: NaiveDate::from_ymd_opt(2023, 11, 8)
                .unwrap()
                .and_hms_opt(13, 30, 0)
                .unwrap(),
            confidence: FireConfidence::Nominal,
        }
    }

    /// A dense burning episode across the belt, upwind of Delhi.
    fn belt_fires() -> FireSet {
        let mut fires = Vec::new();
        for i in 0..4 {
            let jitter = f64::from(i) * 0.02;
            fires.push(detection(29.1492 + jitter, 75.7217 + jitter, 60.0)); // Hisar
        }
        for i in 0..3 {
            let jitter = f64::from(i) * 0.02;
            fires.push(detection(29.5152 + jitter, 75.4556 - jitter, 75.0)); // Fatehabad
        }
        for i in 0..3 {
            let jitter = f64::from(i) * 0.02;
            fires.push(detection(30.2110 - jitter, 74.9455 + jitter, 120.0)); // Bathinda
        }
        fires.push(detection(30.2458, 75.8421, 300.0)); // Sangrur
        FireSet::new(fires)
    }

    /// Test the season gate returns exactly 5 regardless of fires or wind.
    #[test]
    fn off_season_is_flat_five() {
        let score = evaluate(&station(), Some(287.0), Some(340.0), 6, &belt_fires());
        assert_eq!(score.raw, 5.0);
        assert_eq!(score.level, SourceLevel::None);
        assert!(score.evidence.is_empty());
    }

    /// Test the sector gate returns exactly 10 for an easterly wind.
    #[test]
    fn wrong_sector_is_flat_ten() {
        let score = evaluate(&station(), Some(90.0), Some(340.0), 11, &belt_fires());
        assert_eq!(score.raw, 10.0);
        assert_eq!(score.level, SourceLevel::Low);
        assert!(score.evidence.is_empty());
    }

    /// Test missing wind direction also fails the sector gate.
    #[test]
    fn missing_wind_fails_sector_gate() {
        let score = evaluate(&station(), None, Some(340.0), 11, &belt_fires());
        assert_eq!(score.raw, 10.0);
        assert_eq!(score.level, SourceLevel::Low);
    }

    /// Test a dense upwind episode under a shallow boundary layer rates
    /// High and stays inside the score cap.
    #[test]
    fn dense_episode_rates_high() {
        let score = evaluate(&station(), Some(287.0), Some(340.0), 11, &belt_fires());
        assert_eq!(score.level, SourceLevel::High, "explanation: {}", score.explanation);
        assert!(score.raw > BASE_SCORE && score.raw <= MAX_SCORE);
        assert!(score.evidence.len() <= 5);
        assert!(
            score
                .evidence
                .windows(2)
                .all(|w| w[0].contribution() >= w[1].contribution()),
            "evidence must be sorted by descending contribution"
        );
        let Evidence::Fire { region, .. } = &score.evidence[0] else {
            panic!("stubble evidence must be fires");
        };
        assert_eq!(region, "Hisar", "strongest transport comes from the nearest cluster");
    }

    /// Test a missing boundary layer cancels every transport term.
    #[test]
    fn missing_blh_cancels_transport() {
        let score = evaluate(&station(), Some(287.0), None, 11, &belt_fires());
        assert_eq!(score.raw, BASE_SCORE);
        assert_eq!(score.level, SourceLevel::Low);
        assert!(score.evidence.is_empty());
    }

    /// Test fire power saturates at 50 MW.
    #[test]
    fn frp_saturates() {
        let a = evaluate(
            &station(),
            Some(287.0),
            Some(340.0),
            11,
            &FireSet::new(vec![detection(29.1492, 75.7217, 60.0)]),
        );
        let b = evaluate(
            &station(),
            Some(287.0),
            Some(340.0),
            11,
            &FireSet::new(vec![detection(29.1492, 75.7217, 900.0)]),
        );
        assert_eq!(a.raw, b.raw, "both detections sit past the 50 MW saturation");
    }

    /// Test detections beyond 400 km are out of transport range.
    #[test]
    fn beyond_range_does_not_contribute() {
        let amritsar_far = FireSet::new(vec![detection(31.6340, 74.8723, 300.0)]); // ~407 km
        let score = evaluate(&station(), Some(310.0), Some(340.0), 11, &amritsar_far);
        assert_eq!(score.raw, BASE_SCORE);
        assert!(score.evidence.is_empty());
    }

    /// Test region labeling picks the nearest belt district.
    #[test]
    fn region_assignment() {
        assert_eq!(nearest_region(&Coordinate::new(30.25, 75.85)), "Sangrur");
        assert_eq!(nearest_region(&Coordinate::new(29.15, 75.73)), "Hisar");
        assert_eq!(nearest_region(&Coordinate::new(31.60, 74.90)), "Amritsar");
    }
}
