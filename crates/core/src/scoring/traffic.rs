//! Traffic scorer.
//!
//! Traffic load follows the clock far more than it follows meteorology,
//! so the score is a product of calendar factors (rush hours, weekday vs
//! weekend) with an NO2 band as the chemical tracer and the station's
//! kerbside-exposure multiplier.

use crate::core_types::SourceLevel;
use crate::scoring::SourceScore;

/// Floor of the clamped score.
const MIN_SCORE: f64 = 5.0;
/// Ceiling of the clamped score.
const MAX_SCORE: f64 = 90.0;

/// Emission activity factor for the hour of day.
///
/// Morning and evening rush windows carry full weight, the small hours
/// carry a fifth of it, everything else half.
#[must_use]
pub fn time_factor(hour: u32) -> f64 {
    match hour {
        7..=10 | 17..=21 => 1.0,
        0..=5 => 0.2,
        _ => 0.5,
    }
}

/// NO2 tracer band. An absent reading takes the neutral middle value.
#[must_use]
pub fn no2_factor(no2: Option<f64>) -> f64 {
    match no2 {
        None => 0.5,
        Some(v) if v > 80.0 => 1.0,
        Some(v) if v > 50.0 => 0.7,
        Some(v) if v > 30.0 => 0.4,
        Some(_) => 0.2,
    }
}

/// Evaluate the traffic contribution for one station-hour.
///
/// `traffic_factor` is the station's kerbside-exposure multiplier,
/// already clamped to 0.4-1.2 by [`crate::core_types::StationContext`].
#[must_use]
pub fn evaluate(hour: u32, is_weekend: bool, no2: Option<f64>, traffic_factor: f64) -> SourceScore {
    let time = time_factor(hour);
    let day = if is_weekend { 0.6 } else { 1.0 };
    let tracer = no2_factor(no2);

    let raw = (time * day * tracer * traffic_factor * 100.0).clamp(MIN_SCORE, MAX_SCORE);

    let window = match hour {
        7..=10 | 17..=21 => "rush hours",
        0..=5 => "overnight",
        _ => "off-peak",
    };
    let day_desc = if is_weekend { "weekend" } else { "weekday" };
    let tracer_desc = no2.map_or_else(
        || "NO2 unavailable".to_owned(),
        |v| format!("NO2 {v:.0} µg/m³"),
    );

    SourceScore::plain(
        raw,
        SourceLevel::band_standard(raw),
        format!("{window} on a {day_desc}, {tracer_desc}"),
    )
}
