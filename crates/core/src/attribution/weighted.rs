//! Weighted-score attribution strategy.

use super::normalize::normalize;
use super::result::SourceContribution;
use super::{AttributionInput, AttributionStrategy};
use crate::scoring::{self, ScoredSource, SourceScore};

use chrono::{Datelike, Timelike, Weekday};

/// Five independent physics scorers, normalized into shares.
///
/// Each score stays interpretable on its own clamp range; the shares only
/// establish relative magnitude. Qualitative levels come from the scorers
/// themselves, so a share diluted by one dominant co-source keeps its own
/// severity label.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedScoreStrategy;

impl WeightedScoreStrategy {
    fn score(source: ScoredSource, input: &AttributionInput<'_>) -> SourceScore {
        let met = &input.meteorology;
        match source {
            ScoredSource::StubbleBurning => scoring::stubble::evaluate(
                &input.station.coordinate,
                met.wind_dir_10m_deg,
                met.blh_m,
                input.timestamp.month(),
                input.fires,
            ),
            ScoredSource::Traffic => scoring::traffic::evaluate(
                input.timestamp.hour(),
                matches!(input.timestamp.weekday(), Weekday::Sat | Weekday::Sun),
                input.reading.no2,
                input.station.traffic_factor,
            ),
            ScoredSource::Industry => scoring::industry::evaluate(
                &input.station.coordinate,
                met.wind_dir_10m_deg,
                input.reading.so2,
                input.emitters,
            ),
            ScoredSource::Dust => {
                scoring::dust::evaluate(&input.reading, met.wind_speed_10m_ms)
            }
            ScoredSource::Trapping => scoring::trapping::evaluate(met.blh_m),
        }
    }
}

impl AttributionStrategy for WeightedScoreStrategy {
    fn name(&self) -> &'static str {
        "weighted_scores"
    }

    fn source_keys(&self) -> &'static [&'static str] {
        &["stubble_burning", "traffic", "industry", "dust", "trapping"]
    }

    fn evaluate(&self, input: &AttributionInput<'_>) -> Vec<SourceContribution> {
        let scores: Vec<(ScoredSource, SourceScore)> = ScoredSource::ALL
            .iter()
            .map(|&source| (source, Self::score(source, input)))
            .collect();

        let raw: Vec<f64> = scores.iter().map(|(_, score)| score.raw).collect();
        let shares = normalize(&raw);

        scores
            .into_iter()
            .zip(shares)
            .map(|((source, score), percentage)| SourceContribution {
                source: source.key().to_owned(),
                percentage,
                level: score.level,
                explanation: score.explanation,
                evidence: score.evidence,
                modulation_factor: None,
                prior_pct: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{
        Coordinate, EmitterSet, FireSet, Meteorology, Reading, SourceLevel, StationContext,
    };
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    /// Test the strategy reports all five sources in order, summing to
    /// 100, with levels carried over from the scorers.
    #[test]
    fn five_sources_in_order() {
        let station =
            StationContext::new("ST01", "Anand Vihar", Coordinate::new(28.6469, 77.3164), 1.0);
        let fires = FireSet::new(Vec::new());
        let emitters = EmitterSet::new(Vec::new());
        let input = AttributionInput {
            station: &station,
            // A monsoon Saturday night: stubble off-season, weekend traffic.
            timestamp: NaiveDate::from_ymd_opt(2023, 7, 15)
                .unwrap()
                .and_hms_opt(3, 0, 0)
                .unwrap(),
            reading: Reading::new(Some(60.0), Some(240.0), None, None, None),
            meteorology: Meteorology::new(None, Some(6.0), None, None, None),
            fires: &fires,
            emitters: &emitters,
        };

        let strategy = WeightedScoreStrategy;
        let contributions = strategy.evaluate(&input);

        let keys: Vec<&str> = contributions.iter().map(|c| c.source.as_str()).collect();
        assert_eq!(keys, strategy.source_keys());

        let total: f64 = contributions.iter().map(|c| c.percentage).sum();
        assert_relative_eq!(total, 100.0, epsilon = 0.01);

        // Scorer levels survive normalization.
        assert_eq!(contributions[0].level, SourceLevel::None, "off-season stubble");
        assert_eq!(contributions[4].level, SourceLevel::Unknown, "missing mixing height");
        assert!(contributions.iter().all(|c| c.percentage > 0.0));
        assert!(contributions
            .iter()
            .all(|c| c.modulation_factor.is_none() && c.prior_pct.is_none()));
    }
}
