//! Score-to-percentage normalization.

/// Convert raw scores into percentages summing to 100.
///
/// The raw inputs are heterogeneous (each scorer has its own clamp
/// range); only their relative magnitudes carry meaning. An all-zero
/// input takes equal shares so the engine still reports a complete
/// distribution, and qualitative levels are always carried over from the
/// scorers by the caller, never re-derived from these percentages.
#[must_use]
pub fn normalize(raw_scores: &[f64]) -> Vec<f64> {
    if raw_scores.is_empty() {
        return Vec::new();
    }

    let total: f64 = raw_scores.iter().sum();
    if total == 0.0 {
        let share = 100.0 / raw_scores.len() as f64;
        return vec![share; raw_scores.len()];
    }

    raw_scores.iter().map(|s| s / total * 100.0).collect()
}
