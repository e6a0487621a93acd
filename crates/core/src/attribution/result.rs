//! Assembled attribution output.
//!
//! Everything a caller needs to render one station-hour: the percentage
//! split with per-source explanations, the supporting fire and industry
//! rankings, a meteorology digest, and a confidence grade derived from
//! input completeness.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core_types::{Meteorology, Reading, SourceLevel};
use crate::scoring::Evidence;

/// How trustworthy one result is, graded from input completeness alone.
///
/// `High` needs PM2.5, NO2, SO2 and complete meteorology (10 m wind
/// direction and speed plus boundary-layer height). `Medium` tolerates
/// one missing tracer out of NO2/SO2. Anything less is `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Grade the hour's inputs. PM10 and CO refine individual scorers but
    /// do not gate confidence.
    #[must_use]
    pub fn from_inputs(reading: &Reading, meteorology: &Meteorology) -> Self {
        let met_ok = meteorology.is_complete();
        let tracers = usize::from(reading.no2.is_some()) + usize::from(reading.so2.is_some());

        if reading.pm25.is_some() && met_ok && tracers == 2 {
            Self::High
        } else if reading.pm25.is_some() && met_ok && tracers >= 1 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source's share of the attributed PM2.5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceContribution {
    /// Stable snake_case key, e.g. `"stubble_burning"`.
    pub source: String,
    /// Share of the total, 0-100. Shares across one result sum to 100.
    pub percentage: f64,
    pub level: SourceLevel,
    pub explanation: String,
    /// Supporting fires/facilities, when the strategy surfaces any.
    pub evidence: Vec<Evidence>,
    /// Raw modulation factor, present for the prior-modulation strategy.
    pub modulation_factor: Option<f64>,
    /// Study prior in percent, present for the prior-modulation strategy.
    pub prior_pct: Option<f64>,
}

/// Fires aggregated by their nearest known burning district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireRegionSummary {
    pub region: String,
    pub fires: usize,
    /// Mean distance of the region's fires from the station in km.
    pub distance_km: f64,
}

/// A ranked nearby facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyIndustry {
    pub name: String,
    pub distance_km: f64,
}

/// The meteorology the result was computed under, post-sanitization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteorologySummary {
    pub wind_dir_10m_deg: Option<f64>,
    pub wind_speed_10m_ms: Option<f64>,
    pub blh_m: Option<f64>,
    /// Qualitative ventilation note derived from the mixing height.
    pub mixing_note: String,
}

impl From<&Meteorology> for MeteorologySummary {
    fn from(met: &Meteorology) -> Self {
        Self {
            wind_dir_10m_deg: met.wind_dir_10m_deg,
            wind_speed_10m_ms: met.wind_speed_10m_ms,
            blh_m: met.blh_m,
            mixing_note: mixing_note(met.blh_m).to_owned(),
        }
    }
}

/// Ventilation wording for a mixing height.
#[must_use]
pub fn mixing_note(blh_m: Option<f64>) -> &'static str {
    match blh_m {
        None => "Mixing height unknown",
        Some(blh) if blh < 300.0 => "Low mixing, pollutants trapped near the surface",
        Some(blh) if blh < 700.0 => "Moderate mixing",
        Some(_) => "Good mixing",
    }
}

/// Complete attribution for one station-hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionResult {
    pub station_id: String,
    pub station_name: String,
    pub timestamp: NaiveDateTime,
    /// The PM2.5 the split applies to, when observed.
    pub pm25: Option<f64>,
    /// Name of the strategy that produced the split.
    pub method: String,
    pub confidence: Confidence,
    /// One-line digest of the two largest contributors.
    pub summary: String,
    pub contributions: Vec<SourceContribution>,
    pub top_fire_locations: Vec<FireRegionSummary>,
    pub top_industries: Vec<NearbyIndustry>,
    pub meteorology: MeteorologySummary,
}

/// Digest the two largest contributors into one line, e.g.
/// `"Primary sources: Stubble Burning (34%), Secondary Aerosols (30%)"`.
#[must_use]
pub fn summary_line(contributions: &[SourceContribution]) -> String {
    let mut ranked: Vec<&SourceContribution> = contributions.iter().collect();
    ranked.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let top: Vec<String> = ranked
        .iter()
        .take(2)
        .map(|c| format!("{} ({:.0}%)", title_case_key(&c.source), c.percentage))
        .collect();

    if top.is_empty() {
        return "No sources resolved".to_owned();
    }
    format!("Primary sources: {}", top.join(", "))
}

/// `"stubble_burning"` to `"Stubble Burning"`.
fn title_case_key(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut out = String::with_capacity(word.len());
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
            out
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contribution(source: &str, percentage: f64) -> SourceContribution {
        SourceContribution {
            source: source.to_owned(),
            percentage,
            level: SourceLevel::Low,
            explanation: String::new(),
            evidence: Vec::new(),
            modulation_factor: None,
            prior_pct: None,
        }
    }

    /// Test the confidence grading matrix.
    #[test]
    fn confidence_grades() {
        let full_met = Meteorology::new(Some(290.0), Some(3.0), None, None, Some(500.0));
        let no_blh = Meteorology::new(Some(290.0), Some(3.0), None, None, None);

        let full = Reading::new(Some(100.0), Some(150.0), Some(60.0), Some(12.0), Some(1.0));
        assert_eq!(Confidence::from_inputs(&full, &full_met), Confidence::High);

        let no_so2 = Reading::new(Some(100.0), None, Some(60.0), None, None);
        assert_eq!(Confidence::from_inputs(&no_so2, &full_met), Confidence::Medium);

        let no_no2 = Reading::new(Some(100.0), None, None, Some(12.0), None);
        assert_eq!(Confidence::from_inputs(&no_no2, &full_met), Confidence::Medium);

        let tracers_gone = Reading::new(Some(100.0), Some(150.0), None, None, Some(1.0));
        assert_eq!(
            Confidence::from_inputs(&tracers_gone, &full_met),
            Confidence::Low
        );

        assert_eq!(
            Confidence::from_inputs(&full, &no_blh),
            Confidence::Low,
            "incomplete meteorology caps confidence regardless of tracers"
        );

        let no_pm25 = Reading::new(None, Some(150.0), Some(60.0), Some(12.0), None);
        assert_eq!(Confidence::from_inputs(&no_pm25, &full_met), Confidence::Low);
    }

    /// Test the mixing-note bands.
    #[test]
    fn mixing_notes() {
        assert_eq!(mixing_note(None), "Mixing height unknown");
        assert_eq!(
            mixing_note(Some(299.0)),
            "Low mixing, pollutants trapped near the surface"
        );
        assert_eq!(mixing_note(Some(300.0)), "Moderate mixing");
        assert_eq!(mixing_note(Some(699.0)), "Moderate mixing");
        assert_eq!(mixing_note(Some(700.0)), "Good mixing");
    }

    /// Test the two-source digest line and its title-casing.
    #[test]
    fn summary_digest() {
        let contributions = vec![
            contribution("traffic", 10.6),
            contribution("stubble_burning", 34.3),
            contribution("secondary_aerosols", 29.8),
            contribution("dust", 7.8),
        ];
        assert_eq!(
            summary_line(&contributions),
            "Primary sources: Stubble Burning (34%), Secondary Aerosols (30%)"
        );

        assert_eq!(
            summary_line(&[contribution("dust", 100.0)]),
            "Primary sources: Dust (100%)"
        );
        assert_eq!(summary_line(&[]), "No sources resolved");
    }
}
