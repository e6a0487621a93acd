//! Per-source scorers for the weighted-score attribution strategy.
//!
//! Each scorer maps one candidate source's physical drivers to a bounded
//! raw score, a qualitative level, a one-line explanation, and up to five
//! evidence entries. Scorers are pure: same inputs, same output, no state.
//!
//! The raw scores are heterogeneous by design (each lives in its own
//! documented clamp range); comparability across sources is established
//! afterwards by the normalizer, never inside a scorer.

pub mod dust;
pub mod industry;
pub mod stubble;
pub mod traffic;
pub mod trapping;

use serde::{Deserialize, Serialize};

use crate::core_types::SourceLevel;

/// The closed set of sources the weighted-score strategy attributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoredSource {
    StubbleBurning,
    Traffic,
    Industry,
    Dust,
    Trapping,
}

impl ScoredSource {
    /// Every source in reporting order.
    pub const ALL: [Self; 5] = [
        Self::StubbleBurning,
        Self::Traffic,
        Self::Industry,
        Self::Dust,
        Self::Trapping,
    ];

    /// Stable machine key, used as the contribution name in results.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::StubbleBurning => "stubble_burning",
            Self::Traffic => "traffic",
            Self::Industry => "industry",
            Self::Dust => "dust",
            Self::Trapping => "trapping",
        }
    }

}

/// One supporting item retained alongside a score for explainability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Evidence {
    /// A contributing fire detection, labeled with its source region.
    Fire {
        region: String,
        distance_km: f64,
        contribution: f64,
    },
    /// A contributing industrial facility.
    Facility {
        name: String,
        distance_km: f64,
        contribution: f64,
    },
}

impl Evidence {
    /// The contribution value the evidence list is ordered by.
    #[must_use]
    pub fn contribution(&self) -> f64 {
        match self {
            Self::Fire { contribution, .. } | Self::Facility { contribution, .. } => *contribution,
        }
    }
}

/// Longest evidence list any scorer reports.
pub const MAX_EVIDENCE: usize = 5;

/// One source's raw evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceScore {
    /// Raw score in the scorer's documented clamp range.
    pub raw: f64,
    /// Qualitative label, assigned by the scorer and never re-derived.
    pub level: SourceLevel,
    /// One-line account of what drove the score.
    pub explanation: String,
    /// Top contributing fires or facilities, descending, at most five.
    pub evidence: Vec<Evidence>,
}

impl SourceScore {
    /// A score with no evidence.
    #[must_use]
    pub fn plain(raw: f64, level: SourceLevel, explanation: impl Into<String>) -> Self {
        Self {
            raw,
            level,
            explanation: explanation.into(),
            evidence: Vec::new(),
        }
    }
}

/// Sort evidence by descending contribution and keep the top entries.
///
/// Ties keep insertion order, so evaluation stays deterministic for
/// identical inputs.
pub(crate) fn retain_top_evidence(evidence: &mut Vec<Evidence>) {
    evidence.sort_by(|a, b| {
        b.contribution()
            .partial_cmp(&a.contribution())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    evidence.truncate(MAX_EVIDENCE);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test evidence ordering and truncation.
    #[test]
    fn evidence_top_five() {
        let mut evidence: Vec<Evidence> = (0..8)
            .map(|i| Evidence::Fire {
                region: format!("R{i}"),
                distance_km: 100.0,
                contribution: f64::from(i),
            })
            .collect();

        retain_top_evidence(&mut evidence);

        assert_eq!(evidence.len(), MAX_EVIDENCE);
        assert_eq!(evidence[0].contribution(), 7.0);
        assert!(
            evidence.windows(2).all(|w| w[0].contribution() >= w[1].contribution()),
            "evidence must be sorted by descending contribution"
        );
    }
}
