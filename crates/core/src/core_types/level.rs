//! Qualitative severity labels attached to source contributions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative label reported alongside a numeric score or percentage.
///
/// `Unknown` marks evaluations where the discriminating input was absent
/// (for example a missing PM10 reading in the dust ratio), as opposed to
/// `None` which is an affirmative "no signal".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceLevel {
    /// No meaningful contribution under current conditions.
    None,
    Low,
    Medium,
    High,
    /// Reserved for the strongest trapping conditions.
    Severe,
    /// The discriminating input was unavailable.
    Unknown,
}

impl SourceLevel {
    /// High cut shared by every score-banded source.
    pub const STANDARD_HIGH: f64 = 60.0;
    /// Medium cut shared by every score-banded source.
    pub const STANDARD_MEDIUM: f64 = 30.0;

    /// Band a raw score against an explicit threshold pair.
    ///
    /// Kept as the single banding primitive so per-source thresholds
    /// cannot drift apart.
    #[must_use]
    pub fn band(score: f64, high_at: f64, medium_at: f64) -> Self {
        if score >= high_at {
            Self::High
        } else if score >= medium_at {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Band a raw score with the standard 60/30 cuts.
    #[must_use]
    pub fn band_standard(score: f64) -> Self {
        Self::band(score, Self::STANDARD_HIGH, Self::STANDARD_MEDIUM)
    }

    /// Stable display name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Severe => "Severe",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test the standard banding cuts at and around the thresholds.
    #[test]
    fn standard_bands() {
        assert_eq!(SourceLevel::band_standard(75.0), SourceLevel::High);
        assert_eq!(SourceLevel::band_standard(60.0), SourceLevel::High);
        assert_eq!(SourceLevel::band_standard(59.9), SourceLevel::Medium);
        assert_eq!(SourceLevel::band_standard(30.0), SourceLevel::Medium);
        assert_eq!(SourceLevel::band_standard(29.9), SourceLevel::Low);
        assert_eq!(SourceLevel::band_standard(0.0), SourceLevel::Low);
    }

    /// Test explicit threshold pairs override the standard cuts.
    #[test]
    fn explicit_bands() {
        assert_eq!(SourceLevel::band(160.0, 150.0, 50.0), SourceLevel::High);
        assert_eq!(SourceLevel::band(60.0, 150.0, 50.0), SourceLevel::Medium);
        assert_eq!(SourceLevel::band(10.0, 150.0, 50.0), SourceLevel::Low);
    }
}
