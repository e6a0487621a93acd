//! Pollutant and meteorology snapshots with input sanitation.
//!
//! Monitoring networks deliver gappy, occasionally out-of-domain data:
//! negative concentrations from instrument baselines, wind directions
//! above 360 from vane unwrapping, NaN from parse failures. The scoring
//! pipeline never rejects an hour for these; the constructors here map
//! every out-of-domain value to "absent" or reduce it into domain, so
//! downstream code only ever sees clean optionals.

use serde::{Deserialize, Serialize};

/// One hour's pollutant concentrations at a station.
///
/// Concentrations are in µg/m³ except carbon monoxide, which monitoring
/// networks report in mg/m³. Absent fields mean the instrument did not
/// report for that hour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
    pub co_mg_m3: Option<f64>,
}

impl Reading {
    /// Build a reading, mapping NaN and negative concentrations to absent.
    #[must_use]
    pub fn new(
        pm25: Option<f64>,
        pm10: Option<f64>,
        no2: Option<f64>,
        so2: Option<f64>,
        co_mg_m3: Option<f64>,
    ) -> Self {
        Self {
            pm25: sanitize_concentration(pm25),
            pm10: sanitize_concentration(pm10),
            no2: sanitize_concentration(no2),
            so2: sanitize_concentration(so2),
            co_mg_m3: sanitize_concentration(co_mg_m3),
        }
    }

    /// Re-apply sanitation to a hand-built or deserialized value.
    ///
    /// The attribution engine calls this once at entry so it holds the
    /// no-out-of-domain-input guarantee regardless of how the struct was
    /// produced.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self::new(self.pm25, self.pm10, self.no2, self.so2, self.co_mg_m3)
    }

    /// PM2.5/PM10 ratio, when both are present and PM10 is positive.
    ///
    /// The single place the ratio is derived; the dust scorer and the
    /// dust and local-combustion modulations all read it from here.
    #[must_use]
    pub fn pm_ratio(&self) -> Option<f64> {
        match (self.pm25, self.pm10) {
            (Some(pm25), Some(pm10)) if pm10 > 0.0 => Some(pm25 / pm10),
            _ => None,
        }
    }
}

/// One hour's meteorology at or near a station.
///
/// Wind is carried at two heights because the source profiles disagree on
/// which level best represents transport; the engine reads the 10 m
/// fields and keeps the 180 m fields available to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Meteorology {
    /// 10 m wind direction, meteorological "from" convention, degrees.
    pub wind_dir_10m_deg: Option<f64>,
    /// 10 m wind speed, m/s.
    pub wind_speed_10m_ms: Option<f64>,
    /// 180 m wind direction, degrees.
    pub wind_dir_180m_deg: Option<f64>,
    /// 180 m wind speed, m/s.
    pub wind_speed_180m_ms: Option<f64>,
    /// Boundary-layer height, metres.
    pub blh_m: Option<f64>,
}

impl Meteorology {
    /// Build a meteorology record, reducing directions into [0, 360) and
    /// mapping NaN, negative speeds, and non-positive mixing heights to
    /// absent.
    #[must_use]
    pub fn new(
        wind_dir_10m_deg: Option<f64>,
        wind_speed_10m_ms: Option<f64>,
        wind_dir_180m_deg: Option<f64>,
        wind_speed_180m_ms: Option<f64>,
        blh_m: Option<f64>,
    ) -> Self {
        Self {
            wind_dir_10m_deg: sanitize_direction(wind_dir_10m_deg),
            wind_speed_10m_ms: sanitize_speed(wind_speed_10m_ms),
            wind_dir_180m_deg: sanitize_direction(wind_dir_180m_deg),
            wind_speed_180m_ms: sanitize_speed(wind_speed_180m_ms),
            blh_m: sanitize_blh(blh_m),
        }
    }

    /// Re-apply sanitation to a hand-built or deserialized value.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self::new(
            self.wind_dir_10m_deg,
            self.wind_speed_10m_ms,
            self.wind_dir_180m_deg,
            self.wind_speed_180m_ms,
            self.blh_m,
        )
    }

    /// Whether the transport-relevant fields (10 m direction and speed,
    /// boundary-layer height) are all present. Drives the confidence tag.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.wind_dir_10m_deg.is_some() && self.wind_speed_10m_ms.is_some() && self.blh_m.is_some()
    }
}

fn sanitize_concentration(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

fn sanitize_direction(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite()).map(|d| d.rem_euclid(360.0))
}

fn sanitize_speed(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

fn sanitize_blh(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Test that out-of-domain concentrations become absent.
    #[test]
    fn concentration_sanitation() {
        let r = Reading::new(Some(-4.0), Some(f64::NAN), Some(92.0), None, Some(0.0));
        assert_eq!(r.pm25, None, "negative concentration must become absent");
        assert_eq!(r.pm10, None, "NaN concentration must become absent");
        assert_eq!(r.no2, Some(92.0));
        assert_eq!(r.co_mg_m3, Some(0.0), "zero is a legitimate reading");
    }

    /// Test the PM ratio guards.
    #[test]
    fn pm_ratio_guards() {
        let ok = Reading::new(Some(90.0), Some(300.0), None, None, None);
        assert_relative_eq!(ok.pm_ratio().unwrap(), 0.3, epsilon = 1e-12);

        let zero_pm10 = Reading::new(Some(90.0), Some(0.0), None, None, None);
        assert_eq!(zero_pm10.pm_ratio(), None);

        let missing = Reading::new(Some(90.0), None, None, None, None);
        assert_eq!(missing.pm_ratio(), None);
    }

    /// Test wind direction reduction and speed/BLH sanitation.
    #[test]
    fn meteorology_sanitation() {
        let m = Meteorology::new(Some(450.0), Some(-1.0), Some(-90.0), None, Some(0.0));
        assert_relative_eq!(m.wind_dir_10m_deg.unwrap(), 90.0, epsilon = 1e-12);
        assert_eq!(m.wind_speed_10m_ms, None, "negative speed must become absent");
        assert_relative_eq!(m.wind_dir_180m_deg.unwrap(), 270.0, epsilon = 1e-12);
        assert_eq!(m.blh_m, None, "zero mixing height must become absent");
        assert!(!m.is_complete());

        let complete = Meteorology::new(Some(287.0), Some(2.3), None, None, Some(340.0));
        assert!(complete.is_complete());
    }
}
