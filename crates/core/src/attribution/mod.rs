//! Attribution strategies and the evaluation engine.
//!
//! A strategy turns one station-hour of inputs into a complete percentage
//! split across its source set. The engine wraps a strategy with the
//! shared plumbing every caller needs: input sanitization, the fire and
//! industry rankings, the meteorology digest, confidence grading, and
//! parallel evaluation over many station-hours.

pub mod baselines;
pub mod modulation;
pub mod normalize;
pub mod result;
pub mod weighted;

pub use modulation::{ModulatedSource, PriorModulationStrategy};
pub use normalize::normalize;
pub use result::{
    AttributionResult, Confidence, FireRegionSummary, MeteorologySummary, NearbyIndustry,
    SourceContribution,
};
pub use weighted::WeightedScoreStrategy;

use chrono::NaiveDateTime;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

use crate::core_types::{Coordinate, EmitterSet, FireSet, Meteorology, Reading, StationContext};
use crate::geo;
use crate::outfall::{self, OutfallPoint};
use crate::scoring::stubble;

/// Default downwind forecast horizon, hours.
pub const DEFAULT_OUTFALL_HORIZON_H: u32 = 3;
/// Valid outfall horizon range, hours.
pub const MIN_OUTFALL_HORIZON_H: u32 = 1;
pub const MAX_OUTFALL_HORIZON_H: u32 = 24;

/// Entries kept in each of the fire and industry rankings.
const TOP_RANKED: usize = 5;
/// Fires further off the wind than this are not ranked.
const FIRE_RANK_CONE_DEG: f64 = 90.0;
/// Distance decay scale for ranking fires, km.
const FIRE_RANK_DECAY_SCALE_KM: f64 = 100.0;
/// Facilities beyond this range are not ranked.
const INDUSTRY_RANK_RADIUS_KM: f64 = 50.0;
/// Distance decay scale for ranking facilities, km.
const INDUSTRY_RANK_DECAY_SCALE_KM: f64 = 10.0;
/// Upwind preference: a tight cone doubles a facility's rank score, a
/// wide cone adds half.
const INDUSTRY_UPWIND_TIGHT_DEG: f64 = 45.0;
const INDUSTRY_UPWIND_TIGHT_FACTOR: f64 = 2.0;
const INDUSTRY_UPWIND_WIDE_DEG: f64 = 90.0;
const INDUSTRY_UPWIND_WIDE_FACTOR: f64 = 1.5;

/// Caller-side configuration mistakes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttributionError {
    #[error("outfall horizon must be between 1 and 24 hours, got {hours}")]
    InvalidHorizon { hours: u32 },
    #[error("unknown attribution strategy `{name}`")]
    UnknownStrategy { name: String },
}

/// Which attribution strategy the engine runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Study priors rescaled by tracer anomalies. The default.
    #[default]
    PriorModulation,
    /// Five independent physics scorers, normalized.
    WeightedScore,
}

impl FromStr for StrategyKind {
    type Err = AttributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prior_modulation" | "modulation" => Ok(Self::PriorModulation),
            "weighted_scores" | "weighted" => Ok(Self::WeightedScore),
            other => Err(AttributionError::UnknownStrategy {
                name: other.to_owned(),
            }),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub strategy: StrategyKind,
    /// Downwind forecast horizon in hourly steps.
    pub outfall_horizon_h: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            outfall_horizon_h: DEFAULT_OUTFALL_HORIZON_H,
        }
    }
}

impl EngineConfig {
    /// Check the configuration before an engine is built around it.
    ///
    /// # Errors
    ///
    /// Returns [`AttributionError::InvalidHorizon`] when the outfall
    /// horizon lies outside 1-24 hours.
    pub fn validate(&self) -> Result<(), AttributionError> {
        if !(MIN_OUTFALL_HORIZON_H..=MAX_OUTFALL_HORIZON_H).contains(&self.outfall_horizon_h) {
            return Err(AttributionError::InvalidHorizon {
                hours: self.outfall_horizon_h,
            });
        }
        Ok(())
    }
}

/// One station-hour of resolved inputs.
///
/// Readings and meteorology are passed by value (they are small and
/// `Copy`); the fire and emitter sets are shared across many
/// station-hours and passed by reference.
#[derive(Clone, Copy)]
pub struct AttributionInput<'a> {
    pub station: &'a StationContext,
    /// Station-local civil time of the observation hour.
    pub timestamp: NaiveDateTime,
    pub reading: Reading,
    pub meteorology: Meteorology,
    pub fires: &'a FireSet,
    pub emitters: &'a EmitterSet,
}

/// An attribution strategy: one station-hour in, a complete percentage
/// split out.
///
/// Implementations must be pure so batch evaluation can run them in
/// parallel and results stay reproducible.
pub trait AttributionStrategy: Send + Sync {
    /// Stable strategy name, reported as the result's `method`.
    fn name(&self) -> &'static str;

    /// Keys of the sources this strategy resolves, in reporting order.
    fn source_keys(&self) -> &'static [&'static str];

    /// Evaluate one station-hour. The returned contributions follow
    /// `source_keys` order and their percentages sum to 100.
    fn evaluate(&self, input: &AttributionInput<'_>) -> Vec<SourceContribution>;
}

/// Build the strategy implementation for a kind.
#[must_use]
pub fn create_strategy(kind: StrategyKind) -> Box<dyn AttributionStrategy> {
    match kind {
        StrategyKind::PriorModulation => Box::new(PriorModulationStrategy),
        StrategyKind::WeightedScore => Box::new(WeightedScoreStrategy),
    }
}

/// The evaluation engine: a strategy plus the shared result plumbing.
pub struct AttributionEngine {
    strategy: Box<dyn AttributionStrategy>,
    config: EngineConfig,
}

impl AttributionEngine {
    /// Build an engine for a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AttributionError::InvalidHorizon`] when the configured
    /// outfall horizon lies outside 1-24 hours.
    pub fn new(config: EngineConfig) -> Result<Self, AttributionError> {
        config.validate()?;
        let strategy = create_strategy(config.strategy);
        info!(
            strategy = strategy.name(),
            horizon_h = config.outfall_horizon_h,
            "attribution engine ready"
        );
        Ok(Self { strategy, config })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Attribute one station-hour.
    ///
    /// Inputs are sanitized on entry, so callers may pass raw feed values
    /// (NaN, negative concentrations, out-of-range directions) and get
    /// the documented missing-data behavior instead of poisoned output.
    #[must_use]
    pub fn attribute(&self, input: &AttributionInput<'_>) -> AttributionResult {
        let input = AttributionInput {
            station: input.station,
            timestamp: input.timestamp,
            reading: input.reading.sanitized(),
            meteorology: input.meteorology.sanitized(),
            fires: input.fires,
            emitters: input.emitters,
        };

        debug!(
            station = %input.station.id,
            timestamp = %input.timestamp,
            fires = input.fires.len(),
            emitters = input.emitters.len(),
            strategy = self.strategy.name(),
            "attributing station-hour"
        );

        let contributions = self.strategy.evaluate(&input);
        let confidence = Confidence::from_inputs(&input.reading, &input.meteorology);
        let summary = result::summary_line(&contributions);

        AttributionResult {
            station_id: input.station.id.clone(),
            station_name: input.station.name.clone(),
            timestamp: input.timestamp,
            pm25: input.reading.pm25,
            method: self.strategy.name().to_owned(),
            confidence,
            summary,
            top_fire_locations: rank_fire_regions(
                &input.station.coordinate,
                input.meteorology.wind_dir_10m_deg,
                input.fires,
            ),
            top_industries: rank_industries(
                &input.station.coordinate,
                input.meteorology.wind_dir_10m_deg,
                input.emitters,
            ),
            meteorology: MeteorologySummary::from(&input.meteorology),
            contributions,
        }
    }

    /// Attribute many station-hours in parallel. Result order matches
    /// input order.
    #[must_use]
    pub fn attribute_batch(&self, inputs: &[AttributionInput<'_>]) -> Vec<AttributionResult> {
        inputs.par_iter().map(|input| self.attribute(input)).collect()
    }

    /// Forecast the downwind outfall for one station-hour at the
    /// configured horizon.
    #[must_use]
    pub fn forecast_outfall(&self, input: &AttributionInput<'_>) -> Vec<OutfallPoint> {
        let meteorology = input.meteorology.sanitized();
        let reading = input.reading.sanitized();
        outfall::simulate(
            &input.station.coordinate,
            meteorology.wind_dir_10m_deg,
            meteorology.wind_speed_10m_ms,
            meteorology.blh_m,
            reading.pm25,
            self.config.outfall_horizon_h,
        )
    }
}

/// Rank fires into their belt districts by upwind transport weight.
///
/// Runs over the full detection set (not a scorer's evidence) so both
/// strategies report the same ranking. With an unknown wind the ranking
/// degrades to pure distance decay.
fn rank_fire_regions(
    station: &Coordinate,
    wind_dir_deg: Option<f64>,
    fires: &FireSet,
) -> Vec<FireRegionSummary> {
    struct RegionAcc {
        fires: usize,
        distance_sum_km: f64,
        weight: f64,
    }

    let mut regions: FxHashMap<&'static str, RegionAcc> = FxHashMap::default();
    for fire in fires.within_km(station, stubble::MAX_TRANSPORT_KM) {
        let distance_km = geo::distance_km(station, &fire.coordinate);
        let alignment = match wind_dir_deg {
            Some(wind) => {
                let bearing = geo::initial_bearing_deg(station, &fire.coordinate);
                let off_wind = geo::angular_diff_deg(bearing, wind);
                if off_wind > FIRE_RANK_CONE_DEG {
                    continue;
                }
                1.0 - off_wind / FIRE_RANK_CONE_DEG
            }
            None => 1.0,
        };

        let acc = regions
            .entry(stubble::nearest_region(&fire.coordinate))
            .or_insert(RegionAcc {
                fires: 0,
                distance_sum_km: 0.0,
                weight: 0.0,
            });
        acc.fires += 1;
        acc.distance_sum_km += distance_km;
        acc.weight += alignment / (1.0 + distance_km / FIRE_RANK_DECAY_SCALE_KM);
    }

    let mut ranked: Vec<(&'static str, RegionAcc)> = regions.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.weight
            .partial_cmp(&a.1.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    ranked.truncate(TOP_RANKED);

    ranked
        .into_iter()
        .map(|(region, acc)| FireRegionSummary {
            region: region.to_owned(),
            fires: acc.fires,
            distance_km: acc.distance_sum_km / acc.fires as f64,
        })
        .collect()
}

/// Rank nearby facilities by emission weight, proximity, and upwind
/// placement.
fn rank_industries(
    station: &Coordinate,
    wind_dir_deg: Option<f64>,
    emitters: &EmitterSet,
) -> Vec<NearbyIndustry> {
    let mut ranked: Vec<(f64, f64, &str)> = emitters
        .within_km(station, INDUSTRY_RANK_RADIUS_KM)
        .into_iter()
        .map(|emitter| {
            let distance_km = geo::distance_km(station, &emitter.coordinate);
            let proximity = 1.0 / (1.0 + distance_km / INDUSTRY_RANK_DECAY_SCALE_KM);
            let wind_factor = wind_dir_deg.map_or(1.0, |wind| {
                let bearing = geo::initial_bearing_deg(station, &emitter.coordinate);
                let off_wind = geo::angular_diff_deg(bearing, wind);
                if off_wind < INDUSTRY_UPWIND_TIGHT_DEG {
                    INDUSTRY_UPWIND_TIGHT_FACTOR
                } else if off_wind < INDUSTRY_UPWIND_WIDE_DEG {
                    INDUSTRY_UPWIND_WIDE_FACTOR
                } else {
                    1.0
                }
            });
            (
                emitter.emission_weight * proximity * wind_factor,
                distance_km,
                emitter.name.as_str(),
            )
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.2.cmp(b.2))
    });
    ranked.truncate(TOP_RANKED);

    ranked
        .into_iter()
        .map(|(_, distance_km, name)| NearbyIndustry {
            name: name.to_owned(),
            distance_km,
        })
        .collect()
}
