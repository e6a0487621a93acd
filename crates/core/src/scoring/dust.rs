//! Dust scorer.
//!
//! Resuspended and construction dust is coarse, so a low PM2.5/PM10 ratio
//! is its fingerprint: the more of the particulate mass that is coarse,
//! the more dust-like the hour. Strong surface wind adds a resuspension
//! boost on top of the ratio band.

use crate::core_types::{Reading, SourceLevel};
use crate::scoring::SourceScore;

/// Score reported when the ratio cannot be formed or is inconsistent.
const UNKNOWN_SCORE: f64 = 15.0;
/// Wind speed above which resuspension amplifies the score, m/s.
const RESUSPENSION_WIND_MS: f64 = 5.0;
/// Amplification applied above the resuspension wind.
const RESUSPENSION_BOOST: f64 = 1.3;
/// Ceiling after amplification.
const MAX_SCORE: f64 = 90.0;

/// Ratio band: coarser mixes score higher.
#[must_use]
pub fn ratio_score(ratio: f64) -> f64 {
    if ratio < 0.3 {
        70.0
    } else if ratio < 0.4 {
        50.0
    } else if ratio < 0.5 {
        30.0
    } else if ratio < 0.6 {
        20.0
    } else {
        10.0
    }
}

/// Evaluate the dust contribution for one station-hour.
#[must_use]
pub fn evaluate(reading: &Reading, wind_speed_10m_ms: Option<f64>) -> SourceScore {
    let Some(ratio) = reading.pm_ratio() else {
        return SourceScore::plain(
            UNKNOWN_SCORE,
            SourceLevel::Unknown,
            "PM2.5/PM10 ratio unavailable",
        );
    };
    if ratio > 1.0 {
        return SourceScore::plain(
            UNKNOWN_SCORE,
            SourceLevel::Unknown,
            format!("PM2.5/PM10 ratio {ratio:.2} exceeds 1, sensor inconsistency"),
        );
    }

    let mut raw = ratio_score(ratio);
    let mut boost_note = "";
    if wind_speed_10m_ms.is_some_and(|ws| ws > RESUSPENSION_WIND_MS) {
        raw = (raw * RESUSPENSION_BOOST).min(MAX_SCORE);
        boost_note = ", strong wind resuspension";
    }

    SourceScore::plain(
        raw,
        SourceLevel::band_standard(raw),
        format!("PM2.5/PM10 ratio {ratio:.2}{boost_note}"),
    )
}
