//! Literature baselines and priors for the prior-modulation strategy.
//!
//! # Scientific Background
//!
//! The prior-modulation strategy starts from source-apportionment studies
//! of the Delhi NCR airshed and rescales each study prior by how far the
//! current hour's tracers sit from their seasonal baselines. The priors
//! and baselines here are long-run averages, so an hour that looks exactly
//! average reproduces the study split.
//!
//! # References
//!
//! - ARAI & TERI (2018). "Source Apportionment of PM2.5 & PM10 of Delhi
//!   NCR for Identification of Major Sources." Winter PM2.5 apportionment,
//!   Chapter 7.
//! - Sharma & Dikshit (2016). "Comprehensive Study on Air Pollution and
//!   Green House Gases (GHGs) in Delhi." IIT Kanpur, seasonal pollutant
//!   profiles.
//! - IMD/ERA5 reanalysis climatology for boundary-layer height over the
//!   Indo-Gangetic plain.

/// Study prior for road traffic (share of PM2.5).
pub const PRIOR_TRAFFIC: f64 = 0.22;
/// Study prior for crop-residue burning during the event season.
pub const PRIOR_STUBBLE: f64 = 0.22;
/// Study prior for secondary inorganic/organic aerosol formation.
pub const PRIOR_SECONDARY: f64 = 0.26;
/// Study prior for industrial point sources.
pub const PRIOR_INDUSTRY: f64 = 0.12;
/// Study prior for resuspended and construction dust.
pub const PRIOR_DUST: f64 = 0.15;
/// Study prior for local combustion (waste, biomass, cooking fires).
pub const PRIOR_LOCAL_COMBUSTION: f64 = 0.04;

/// Winter (Nov-Feb) mean boundary-layer height in metres.
pub const BLH_WINTER_AVG_M: f64 = 381.0;
/// Summer (Mar-May) mean boundary-layer height in metres.
pub const BLH_SUMMER_AVG_M: f64 = 1106.0;
/// Monsoon and transition mean boundary-layer height in metres.
pub const BLH_MONSOON_AVG_M: f64 = 669.0;

/// Mean daily VIIRS fire detections over Punjab/Haryana in peak season.
pub const FIRES_SEASON_DAILY_AVG: f64 = 193.0;

/// All-hours mean NO2 in µg/m³.
pub const NO2_OVERALL_AVG: f64 = 71.0;
/// Rush-hour (7-10, 17-20) mean NO2 in µg/m³.
pub const NO2_RUSH_AVG: f64 = 100.0;
/// Night (0-5) mean NO2 in µg/m³.
pub const NO2_NIGHT_AVG: f64 = 40.0;

/// Annual mean SO2 in µg/m³. Delhi SO2 is low and steady, which makes
/// excursions above this a usable industrial tracer.
pub const SO2_AVG: f64 = 15.0;

/// Seasonal mean PM2.5 in µg/m³ (winter, summer, monsoon, post-monsoon).
pub const PM25_WINTER_AVG: f64 = 228.0;
pub const PM25_SUMMER_AVG: f64 = 80.0;
pub const PM25_MONSOON_AVG: f64 = 49.0;
pub const PM25_POST_MONSOON_AVG: f64 = 139.0;

/// Seasonal mean PM10 in µg/m³ (winter, summer, monsoon, post-monsoon).
pub const PM10_WINTER_AVG: f64 = 365.0;
pub const PM10_SUMMER_AVG: f64 = 128.0;
pub const PM10_MONSOON_AVG: f64 = 78.0;
pub const PM10_POST_MONSOON_AVG: f64 = 222.0;

/// Long-run mean PM2.5/PM10 ratio. Lower ratios mean a coarser, dustier
/// aerosol mix.
pub const PM_RATIO_AVG: f64 = 0.625;

/// Ambient CO away from fresh combustion, in mg/m³.
pub const CO_AMBIENT_MG_M3: f64 = 1.5;

/// Seasonal boundary-layer baseline for a calendar month.
#[must_use]
pub fn blh_baseline_m(month: u32) -> f64 {
    match month {
        11 | 12 | 1 | 2 => BLH_WINTER_AVG_M,
        3..=5 => BLH_SUMMER_AVG_M,
        _ => BLH_MONSOON_AVG_M,
    }
}

/// Seasonal PM baselines for a calendar month.
///
/// # Returns
///
/// `(pm25_avg, pm10_avg, season_name)` where the season name is suitable
/// for explanation strings.
#[must_use]
pub fn seasonal_pm_baselines(month: u32) -> (f64, f64, &'static str) {
    match month {
        11 | 12 | 1 | 2 => (PM25_WINTER_AVG, PM10_WINTER_AVG, "winter"),
        3..=5 => (PM25_SUMMER_AVG, PM10_SUMMER_AVG, "summer"),
        10 => (PM25_POST_MONSOON_AVG, PM10_POST_MONSOON_AVG, "post-monsoon"),
        _ => (PM25_MONSOON_AVG, PM10_MONSOON_AVG, "monsoon"),
    }
}

/// Diurnal NO2 baseline for an hour of day.
///
/// The rush window here is the tracer's own (ends at 20); it is narrower
/// than the congestion window the weighted traffic scorer uses.
#[must_use]
pub fn no2_baseline(hour: u32) -> (f64, &'static str) {
    match hour {
        7..=10 | 17..=20 => (NO2_RUSH_AVG, "rush-hour"),
        0..=5 => (NO2_NIGHT_AVG, "night"),
        _ => (NO2_OVERALL_AVG, "daytime"),
    }
}
