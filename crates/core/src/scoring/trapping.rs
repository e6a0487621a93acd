//! Meteorological trapping scorer.
//!
//! Not an emission source: this scorer rates how strongly the boundary
//! layer concentrates whatever is already being emitted. A shallow layer
//! under a winter inversion multiplies every other source's impact, which
//! is why it competes for attribution share alongside the true sources.
//!
//! # Scientific Background
//!
//! Boundary-layer height is the single best proxy for the vertical volume
//! available for dilution. Sub-200 m layers over an urban airshed are
//! severe inversion conditions; above roughly 1000 m, ventilation is good
//! enough that trapping stops being a story at all.

use crate::core_types::SourceLevel;
use crate::scoring::SourceScore;

/// Score reported when the boundary-layer height is unavailable.
const UNKNOWN_SCORE: f64 = 30.0;
/// Reported heights below this are instrument noise and clamp up.
const MIN_PLAUSIBLE_BLH_M: f64 = 50.0;

/// Evaluate the trapping contribution for one station-hour.
#[must_use]
pub fn evaluate(blh_m: Option<f64>) -> SourceScore {
    let Some(reported) = blh_m else {
        return SourceScore::plain(
            UNKNOWN_SCORE,
            SourceLevel::Unknown,
            "Boundary-layer height unavailable",
        );
    };

    let blh = reported.max(MIN_PLAUSIBLE_BLH_M);
    let (raw, level, regime) = if blh < 200.0 {
        (90.0, SourceLevel::Severe, "severe inversion")
    } else if blh < 400.0 {
        (65.0, SourceLevel::High, "strong trapping")
    } else if blh < 700.0 {
        (40.0, SourceLevel::Medium, "moderate mixing")
    } else if blh < 1000.0 {
        (20.0, SourceLevel::Low, "fair ventilation")
    } else {
        (10.0, SourceLevel::None, "good ventilation")
    };

    SourceScore::plain(raw, level, format!("Mixing height {blh:.0} m, {regime}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test every band of the height mapping.
    #[test]
    fn height_bands() {
        let cases = [
            (150.0, 90.0, SourceLevel::Severe),
            (340.0, 65.0, SourceLevel::High),
            (500.0, 40.0, SourceLevel::Medium),
            (850.0, 20.0, SourceLevel::Low),
            (1500.0, 10.0, SourceLevel::None),
        ];
        for (blh, expected_raw, expected_level) in cases {
            let score = evaluate(Some(blh));
            assert_eq!(score.raw, expected_raw, "score for {blh} m");
            assert_eq!(score.level, expected_level, "level for {blh} m");
        }
    }

    /// Test band edges fall into the deeper band.
    #[test]
    fn band_edges() {
        assert_eq!(evaluate(Some(199.9)).raw, 90.0);
        assert_eq!(evaluate(Some(200.0)).raw, 65.0);
        assert_eq!(evaluate(Some(400.0)).raw, 40.0);
        assert_eq!(evaluate(Some(700.0)).raw, 20.0);
        assert_eq!(evaluate(Some(1000.0)).raw, 10.0);
    }

    /// Test implausibly low reports clamp into the severe band instead of
    /// escaping it.
    #[test]
    fn sub_plausible_heights_clamp() {
        let score = evaluate(Some(5.0));
        assert_eq!(score.raw, 90.0);
        assert_eq!(score.level, SourceLevel::Severe);
        assert!(score.explanation.contains("50 m"), "clamped height must be reported");
    }

    /// Test the missing-input fallback.
    #[test]
    fn missing_height_is_unknown() {
        let score = evaluate(None);
        assert_eq!(score.raw, UNKNOWN_SCORE);
        assert_eq!(score.level, SourceLevel::Unknown);
    }
}
