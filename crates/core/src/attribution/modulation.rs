//! Prior-modulation attribution strategy.
//!
//! Starts from the study priors in [`super::baselines`] and rescales each
//! one by a modulation factor measuring how far the hour's tracers sit
//! from their seasonal baselines. A factor of 1.0 reproduces the study
//! split; the factors are clamped so a single extreme tracer hour cannot
//! claim the whole airshed.
//!
//! Unlike the weighted-score strategy this one resolves six sources;
//! secondary aerosols and local combustion have no physics scorer of
//! their own and only exist here, anchored to their priors.

use super::baselines::{
    self, CO_AMBIENT_MG_M3, FIRES_SEASON_DAILY_AVG, PM_RATIO_AVG, SO2_AVG,
};
use super::normalize::normalize;
use super::result::SourceContribution;
use super::{AttributionInput, AttributionStrategy};
use crate::core_types::{Reading, SourceLevel};
use crate::scoring::stubble;

use chrono::{Datelike, Timelike};

/// Clamp range shared by the traffic, industry, and dust factors.
const TRACER_MOD_MIN: f64 = 0.3;
const TRACER_MOD_MAX: f64 = 3.0;
/// Fire counts can genuinely dwarf the seasonal mean, so the stubble
/// factor gets more headroom than the tracer factors.
const STUBBLE_MOD_MAX: f64 = 5.0;
/// Marginal wind sector (200-250 and 340-360) carries a partial factor.
const MARGINAL_SECTOR_MIN_DEG: f64 = 200.0;
const MARGINAL_WIND_FACTOR: f64 = 0.5;
/// Late-season (Dec-Jan) burning runs at half the peak-season rate.
const LATE_SEASON_FACTOR: f64 = 0.5;
/// Secondary formation tracks inverse mixing height inside this range.
const SECONDARY_MOD_MIN: f64 = 0.5;
const SECONDARY_MOD_MAX: f64 = 2.0;
/// Mixing heights below this are treated as this floor to keep the
/// inverse baseline ratio finite and credible.
const SECONDARY_MIN_BLH_M: f64 = 150.0;
/// Effective dust ratio floor; coarser mixes than this read as storms.
const DUST_RATIO_FLOOR: f64 = 0.2;
const DUST_WIND_THRESHOLD_MS: f64 = 5.0;
const DUST_WIND_GAIN_PER_MS: f64 = 0.1;
/// Local-combustion factor range; fireworks episodes share the cap.
const LOCAL_MOD_MIN: f64 = 0.3;
const LOCAL_MOD_MAX: f64 = 10.0;
/// Fireworks signature thresholds.
const FIREWORKS_PM25_THRESHOLD: f64 = 500.0;
const FIREWORKS_RATIO_THRESHOLD: f64 = 0.75;
const FIREWORKS_CO_THRESHOLD: f64 = 2.0;
const FIREWORKS_CALM_WIND_MS: f64 = 3.0;
/// Evening-cooking and night uplifts on the local-combustion factor.
const COOKING_FACTOR: f64 = 1.3;
const NIGHT_FACTOR: f64 = 1.1;
const WINTER_FACTOR: f64 = 1.2;
const CO_FACTOR_MAX: f64 = 2.0;

/// Percentage cuts for the qualitative level of a modulated share.
const HIGH_SHARE_PCT: f64 = 25.0;
const MEDIUM_SHARE_PCT: f64 = 15.0;

/// The closed set of sources the prior-modulation strategy attributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModulatedSource {
    Traffic,
    StubbleBurning,
    SecondaryAerosols,
    Industry,
    Dust,
    LocalCombustion,
}

impl ModulatedSource {
    /// Every source in reporting order.
    pub const ALL: [Self; 6] = [
        Self::Traffic,
        Self::StubbleBurning,
        Self::SecondaryAerosols,
        Self::Industry,
        Self::Dust,
        Self::LocalCombustion,
    ];

    /// Stable machine key, used as the contribution name in results.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Traffic => "traffic",
            Self::StubbleBurning => "stubble_burning",
            Self::SecondaryAerosols => "secondary_aerosols",
            Self::Industry => "industry",
            Self::Dust => "dust",
            Self::LocalCombustion => "local_combustion",
        }
    }

    /// Study prior for this source, as a fraction.
    #[must_use]
    pub fn prior(self) -> f64 {
        match self {
            Self::Traffic => baselines::PRIOR_TRAFFIC,
            Self::StubbleBurning => baselines::PRIOR_STUBBLE,
            Self::SecondaryAerosols => baselines::PRIOR_SECONDARY,
            Self::Industry => baselines::PRIOR_INDUSTRY,
            Self::Dust => baselines::PRIOR_DUST,
            Self::LocalCombustion => baselines::PRIOR_LOCAL_COMBUSTION,
        }
    }
}

/// Study priors rescaled by tracer anomalies. The production default.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorModulationStrategy;

impl AttributionStrategy for PriorModulationStrategy {
    fn name(&self) -> &'static str {
        "prior_modulation"
    }

    fn source_keys(&self) -> &'static [&'static str] {
        &[
            "traffic",
            "stubble_burning",
            "secondary_aerosols",
            "industry",
            "dust",
            "local_combustion",
        ]
    }

    fn evaluate(&self, input: &AttributionInput<'_>) -> Vec<SourceContribution> {
        let hour = input.timestamp.hour();
        let month = input.timestamp.month();
        let met = &input.meteorology;
        let reading = &input.reading;

        let evaluations: Vec<(ModulatedSource, f64, String)> = ModulatedSource::ALL
            .iter()
            .map(|&source| {
                let (factor, explanation) = match source {
                    ModulatedSource::Traffic => traffic_modulation(reading.no2, hour),
                    ModulatedSource::StubbleBurning => {
                        stubble_modulation(input.fires.len(), met.wind_dir_10m_deg, month)
                    }
                    ModulatedSource::SecondaryAerosols => {
                        secondary_modulation(met.blh_m, month)
                    }
                    ModulatedSource::Industry => industry_modulation(reading.so2),
                    ModulatedSource::Dust => dust_modulation(reading, met.wind_speed_10m_ms),
                    ModulatedSource::LocalCombustion => {
                        local_combustion_modulation(reading, met.wind_speed_10m_ms, hour, month)
                    }
                };
                (source, factor, explanation)
            })
            .collect();

        let weighted: Vec<f64> = evaluations
            .iter()
            .map(|(source, factor, _)| source.prior() * factor)
            .collect();
        let shares = normalize(&weighted);

        evaluations
            .into_iter()
            .zip(shares)
            .map(|((source, factor, explanation), percentage)| SourceContribution {
                source: source.key().to_owned(),
                percentage,
                level: level_for_share(percentage),
                explanation,
                evidence: Vec::new(),
                modulation_factor: Some(factor),
                prior_pct: Some(source.prior() * 100.0),
            })
            .collect()
    }
}

/// Level of a modulated share. Modulated shares have no physics score to
/// band on, so severity follows the share itself.
fn level_for_share(percentage: f64) -> SourceLevel {
    if percentage > HIGH_SHARE_PCT {
        SourceLevel::High
    } else if percentage > MEDIUM_SHARE_PCT {
        SourceLevel::Medium
    } else {
        SourceLevel::Low
    }
}

/// NO2 against its diurnal baseline.
fn traffic_modulation(no2: Option<f64>, hour: u32) -> (f64, String) {
    let Some(no2) = no2 else {
        return (1.0, "NO2 unavailable, neutral traffic factor".to_owned());
    };
    let (baseline, period) = baselines::no2_baseline(hour);
    let factor = (no2 / baseline).clamp(TRACER_MOD_MIN, TRACER_MOD_MAX);
    (
        factor,
        format!("NO2 {no2:.0} µg/m³ against the {period} baseline {baseline:.0}"),
    )
}

/// Fire count against the seasonal mean, gated by season and wind sector.
fn stubble_modulation(fire_count: usize, wind_dir_deg: Option<f64>, month: u32) -> (f64, String) {
    let (season_factor, season_desc) = match month {
        10 | 11 => (1.0, "peak season"),
        12 | 1 => (LATE_SEASON_FACTOR, "late season"),
        _ => return (0.0, "Outside the stubble-burning season".to_owned()),
    };

    if fire_count == 0 {
        return (0.0, "No fire detections in the lookback window".to_owned());
    }

    let (wind_factor, wind_desc) = match wind_dir_deg {
        None => (MARGINAL_WIND_FACTOR, "wind direction unknown".to_owned()),
        Some(dir) if (stubble::SECTOR_MIN_DEG..=stubble::SECTOR_MAX_DEG).contains(&dir) => {
            (1.0, format!("wind {dir:.0}° from the burning belt"))
        }
        Some(dir) if dir >= MARGINAL_SECTOR_MIN_DEG => {
            (MARGINAL_WIND_FACTOR, format!("wind {dir:.0}° at the sector margin"))
        }
        Some(dir) => {
            return (
                0.0,
                format!("Wind from {dir:.0}°, not from the burning regions"),
            );
        }
    };

    let factor = (fire_count as f64 / FIRES_SEASON_DAILY_AVG * season_factor * wind_factor)
        .clamp(0.0, STUBBLE_MOD_MAX);
    (
        factor,
        format!("{fire_count} detections ({season_desc}), {wind_desc}"),
    )
}

/// Inverse mixing height against the seasonal baseline.
fn secondary_modulation(blh_m: Option<f64>, month: u32) -> (f64, String) {
    let Some(blh) = blh_m else {
        return (
            1.0,
            "Mixing height unavailable, neutral secondary factor".to_owned(),
        );
    };
    let baseline = baselines::blh_baseline_m(month);
    let factor =
        (baseline / blh.max(SECONDARY_MIN_BLH_M)).clamp(SECONDARY_MOD_MIN, SECONDARY_MOD_MAX);
    (
        factor,
        format!("Mixing height {blh:.0} m against the seasonal {baseline:.0} m"),
    )
}

/// SO2 against its flat annual average.
fn industry_modulation(so2: Option<f64>) -> (f64, String) {
    let Some(so2) = so2 else {
        return (1.0, "SO2 unavailable, neutral industry factor".to_owned());
    };
    let factor = (so2 / SO2_AVG).clamp(TRACER_MOD_MIN, TRACER_MOD_MAX);
    (
        factor,
        format!("SO2 {so2:.0} µg/m³ against the {SO2_AVG:.0} µg/m³ average"),
    )
}

/// Inverse fine fraction, boosted by resuspension winds.
fn dust_modulation(reading: &Reading, wind_speed_ms: Option<f64>) -> (f64, String) {
    let Some(ratio) = reading.pm_ratio() else {
        return (
            1.0,
            "PM2.5/PM10 ratio unavailable, neutral dust factor".to_owned(),
        );
    };

    let boost = wind_speed_ms
        .filter(|&ws| ws > DUST_WIND_THRESHOLD_MS)
        .map_or(1.0, |ws| {
            1.0 + (ws - DUST_WIND_THRESHOLD_MS) * DUST_WIND_GAIN_PER_MS
        });
    let factor =
        (PM_RATIO_AVG / ratio.max(DUST_RATIO_FLOOR) * boost).clamp(TRACER_MOD_MIN, TRACER_MOD_MAX);

    let explanation = if boost > 1.0 {
        format!("Coarse mix at ratio {ratio:.2} with resuspension winds")
    } else {
        format!("PM2.5/PM10 ratio {ratio:.2} against the {PM_RATIO_AVG} long-run mean")
    };
    (factor, explanation)
}

/// Seasonal PM load with cooking-hour, winter, and CO uplifts, plus the
/// fireworks override.
fn local_combustion_modulation(
    reading: &Reading,
    wind_speed_ms: Option<f64>,
    hour: u32,
    month: u32,
) -> (f64, String) {
    let (pm25_baseline, pm10_baseline, season) = baselines::seasonal_pm_baselines(month);

    // Fireworks leave a signature no other source does: extreme fine
    // particulate in a fine-dominated mix, combustion CO, stagnant air.
    // Inferred from the pollution itself, never from the calendar.
    let fine_dominated = reading
        .pm_ratio()
        .is_some_and(|r| r > FIREWORKS_RATIO_THRESHOLD);
    let combustion_co = reading
        .co_mg_m3
        .is_some_and(|co| co > FIREWORKS_CO_THRESHOLD);
    let calm = wind_speed_ms.is_none_or(|ws| ws < FIREWORKS_CALM_WIND_MS);
    let fireworks_pm25 = match (reading.pm25, fine_dominated && combustion_co && calm) {
        (Some(pm25), true) if pm25 > FIREWORKS_PM25_THRESHOLD => Some(pm25),
        _ => None,
    };
    if let Some(pm25) = fireworks_pm25 {
        let factor = (pm25 / pm25_baseline).min(LOCAL_MOD_MAX);
        return (
            factor,
            format!(
                "Fireworks signature: PM2.5 {pm25:.0} µg/m³ over the {season} baseline {pm25_baseline:.0} µg/m³"
            ),
        );
    }

    let pm25_index = reading.pm25.map(|v| v / pm25_baseline);
    let pm10_index = reading.pm10.map(|v| v / pm10_baseline);
    let load = match (pm25_index, pm10_index) {
        (Some(a), Some(b)) => f64::midpoint(a, b),
        (Some(v), None) | (None, Some(v)) => v,
        (None, None) => 1.0,
    };

    let time_factor = match hour {
        6..=8 | 19..=22 => COOKING_FACTOR,
        0..=5 => NIGHT_FACTOR,
        _ => 1.0,
    };
    let winter_factor = if matches!(month, 11 | 12 | 1 | 2) {
        WINTER_FACTOR
    } else {
        1.0
    };
    let co_factor = reading
        .co_mg_m3
        .map_or(1.0, |co| (co / CO_AMBIENT_MG_M3).min(CO_FACTOR_MAX));

    let factor = (load * time_factor * winter_factor * co_factor).clamp(LOCAL_MOD_MIN, LOCAL_MOD_MAX);
    (
        factor,
        format!("PM at {load:.2}x the {season} baseline, combustion factor {co_factor:.2}"),
    )
}
