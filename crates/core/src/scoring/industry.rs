//! Industry scorer.
//!
//! Blends a chemical tracer with plume geometry: SO2 is the near-unique
//! industrial marker (road traffic emits almost none), and the upwind
//! facility inventory says whether a plume path to the station exists at
//! all. With both signals available the tracer dominates; when SO2 is not
//! measured the blend falls back to equal weighting and says so.

use crate::core_types::{Coordinate, EmitterSet, SourceLevel};
use crate::geo;
use crate::scoring::{retain_top_evidence, Evidence, SourceScore};

/// Facilities further than this play no part in the proximity term.
pub const PROXIMITY_RADIUS_KM: f64 = 30.0;
/// Upwind cone half-width for the facility alignment term.
pub const UPWIND_TOLERANCE_DEG: f64 = 60.0;
/// Inventory weight below which a facility is ignored.
pub const MIN_SIGNIFICANT_WEIGHT: f64 = 20.0;

/// Distance decay scale for facility plumes, km.
const DECAY_SCALE_KM: f64 = 10.0;
/// Ceiling of the summed proximity term.
const PROXIMITY_CAP: f64 = 50.0;

/// SO2 tracer band. An absent reading takes a neutral 20.
#[must_use]
pub fn so2_score(so2: Option<f64>) -> f64 {
    match so2 {
        None => 20.0,
        Some(v) if v > 40.0 => 80.0,
        Some(v) if v > 25.0 => 50.0,
        Some(v) if v > 15.0 => 25.0,
        Some(_) => 10.0,
    }
}

/// Evaluate the industry contribution for one station-hour.
#[must_use]
pub fn evaluate(
    station: &Coordinate,
    wind_dir_10m_deg: Option<f64>,
    so2: Option<f64>,
    emitters: &EmitterSet,
) -> SourceScore {
    let tracer = so2_score(so2);

    let mut proximity = 0.0;
    let mut evidence = Vec::new();

    // The proximity term needs a wind to define "upwind"; without one no
    // facility can be placed on a plume path.
    if let Some(wind_deg) = wind_dir_10m_deg {
        for emitter in emitters.within_km(station, PROXIMITY_RADIUS_KM) {
            if emitter.emission_weight < MIN_SIGNIFICANT_WEIGHT {
                continue;
            }
            let distance_km = geo::distance_km(station, &emitter.coordinate);
            let bearing = geo::initial_bearing_deg(station, &emitter.coordinate);
            let off_wind = geo::angular_diff_deg(bearing, wind_deg);
            if off_wind > UPWIND_TOLERANCE_DEG {
                continue;
            }

            let alignment = 1.0 - off_wind / UPWIND_TOLERANCE_DEG;
            let distance_decay = 1.0 / (1.0 + distance_km / DECAY_SCALE_KM);
            let emission = emitter.emission_weight / 100.0;

            let contribution = alignment * distance_decay * emission * 100.0;
            proximity += contribution;
            evidence.push(Evidence::Facility {
                name: emitter.name.clone(),
                distance_km,
                contribution,
            });
        }
    }
    proximity = proximity.min(PROXIMITY_CAP);
    retain_top_evidence(&mut evidence);

    let upwind_count = evidence.len();
    let (raw, explanation) = match so2 {
        None => (
            0.5 * tracer + 0.5 * proximity,
            format!("SO2 unavailable (equal weighting with facility proximity); {upwind_count} upwind facilities"),
        ),
        Some(so2_value) => (
            0.7 * tracer + 0.3 * proximity,
            format!("SO2 {so2_value:.0} µg/m³; {upwind_count} upwind facilities within {PROXIMITY_RADIUS_KM:.0} km"),
        ),
    };

    SourceScore {
        raw,
        level: SourceLevel::band_standard(raw),
        explanation,
        evidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{EmitterCategory, IndustrialEmitter};
    use approx::assert_relative_eq;

    fn station() -> Coordinate {
        Coordinate::new(28.6469, 77.3164)
    }

    /// A few facilities around the station: two plausible upwind plumes
    /// to a westerly wind, one downwind, one below the weight cut.
    fn inventory() -> EmitterSet {
        EmitterSet::new(vec![
            IndustrialEmitter::new(
                "Sahibabad Industrial Area",
                Coordinate::new(28.69, 77.20),
                85.0,
                EmitterCategory::HeavyIndustry,
            ),
            IndustrialEmitter::new(
                "Patparganj Works",
                Coordinate::new(28.63, 77.10),
                60.0,
                EmitterCategory::LightIndustry,
            ),
            IndustrialEmitter::new(
                "Eastern Depot",
                Coordinate::new(28.60, 77.55),
                70.0,
                EmitterCategory::Power,
            ),
            IndustrialEmitter::new(
                "Small Unit",
                Coordinate::new(28.66, 77.25),
                10.0,
                EmitterCategory::Other,
            ),
        ])
    }

    /// Test the SO2 band edges.
    #[test]
    fn so2_band_edges() {
        assert_eq!(so2_score(None), 20.0);
        assert_eq!(so2_score(Some(41.0)), 80.0);
        assert_eq!(so2_score(Some(40.0)), 50.0);
        assert_eq!(so2_score(Some(26.0)), 50.0);
        assert_eq!(so2_score(Some(25.0)), 25.0);
        assert_eq!(so2_score(Some(16.0)), 25.0);
        assert_eq!(so2_score(Some(15.0)), 10.0);
    }

    /// Test the missing-SO2 fallback reweights and says so.
    #[test]
    fn missing_so2_reweights_and_explains() {
        let score = evaluate(&station(), Some(287.0), None, &inventory());
        assert!(
            score.explanation.contains("SO2 unavailable"),
            "explanation must flag the tracer gap: {}",
            score.explanation
        );
        // 0.5 x 20 plus half the proximity term
        assert!(score.raw >= 10.0);
    }

    /// Test tracer-dominant weighting when SO2 is present.
    #[test]
    fn tracer_dominates_when_present() {
        let with_so2 = evaluate(&station(), Some(287.0), Some(45.0), &inventory());
        let base = evaluate(&station(), Some(287.0), Some(45.0), &EmitterSet::new(Vec::new()));
        assert_relative_eq!(base.raw, 0.7 * 80.0, epsilon = 1e-9);
        assert!(with_so2.raw > base.raw, "upwind facilities must add to the tracer term");
    }

    /// Test downwind and below-weight facilities contribute nothing.
    #[test]
    fn gates_filter_facilities() {
        let score = evaluate(&station(), Some(287.0), Some(45.0), &inventory());
        for entry in &score.evidence {
            let Evidence::Facility { name, .. } = entry else {
                panic!("industry evidence must be facilities");
            };
            assert_ne!(name, "Eastern Depot", "downwind facility must be filtered");
            assert_ne!(name, "Small Unit", "sub-threshold facility must be filtered");
        }
        assert_eq!(score.evidence.len(), 2);
    }

    /// Test a missing wind drops the proximity term entirely.
    #[test]
    fn missing_wind_drops_proximity() {
        let score = evaluate(&station(), None, Some(45.0), &inventory());
        assert_relative_eq!(score.raw, 0.7 * 80.0, epsilon = 1e-9);
        assert!(score.evidence.is_empty());
    }

    /// Test the proximity sum cannot exceed its cap.
    #[test]
    fn proximity_cap_holds() {
        // A ring of heavy facilities right on top of the station.
        let dense = EmitterSet::new(
            (0..12)
                .map(|i| {
                    IndustrialEmitter::new(
                        format!("Plant {i}"),
                        Coordinate::new(28.6469 + 0.01, 77.3164 - 0.02 - f64::from(i) * 0.001),
                        100.0,
                        EmitterCategory::HeavyIndustry,
                    )
                })
                .collect(),
        );
        let score = evaluate(&station(), Some(287.0), None, &dense);
        // Equal weighting of a 20 tracer with the capped proximity term.
        assert_relative_eq!(score.raw, 0.5 * 20.0 + 0.5 * PROXIMITY_CAP, epsilon = 1e-9);
    }
}
