//! Batch-level rescaling of aggregate scores for cross-candidate ranking

/// Linearly rescale a batch of raw aggregate scores onto 0–100, preserving
/// length and order. An all-equal batch maps to 50.0 everywhere: there is no
/// discriminating information, and the midpoint avoids dividing by zero.
///
/// Applied across all resumes matched against a single job, never across jobs.
pub fn normalize_scores(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }

    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![50.0; scores.len()];
    }

    scores
        .iter()
        .map(|s| (s - min) / (max - min) * 100.0)
        .collect()
}
