//! Natural-language rationale for a match score

use crate::config::TierThresholds;
use crate::matching::similarity::{Field, SectionScores};

/// Explanation shown when no section produced a non-zero score.
pub const NO_MATCH_EXPLANATION: &str = "Совпадений не обнаружено. Проверьте формат документов.";

pub struct ExplanationGenerator {
    tiers: TierThresholds,
}

impl ExplanationGenerator {
    pub fn new(tiers: TierThresholds) -> Self {
        Self { tiers }
    }

    /// Build a short rationale: the qualitative tier of the aggregate, the
    /// strongest section, and (when more than one section matched) the weakest.
    ///
    /// Ties are broken deterministically by canonical field order.
    pub fn explain(&self, scores: &SectionScores, total: f64) -> String {
        let non_zero: Vec<(Field, f64)> = scores.iter().filter(|(_, s)| *s > 0.0).collect();
        if non_zero.is_empty() {
            return NO_MATCH_EXPLANATION.to_string();
        }

        let mut parts = vec![format!("{} совпадение ({}%).", self.tier_word(total), total)];

        let mut best = non_zero[0];
        for &(field, score) in &non_zero[1..] {
            if score > best.1 {
                best = (field, score);
            }
        }
        parts.push(format!(
            "Сильнее всего: «{}» ({}%).",
            best.0.label(),
            best.1
        ));

        if non_zero.len() > 1 {
            let mut worst = non_zero[0];
            for &(field, score) in &non_zero[1..] {
                if score < worst.1 {
                    worst = (field, score);
                }
            }
            parts.push(format!(
                "Слабее всего: «{}» ({}%).",
                worst.0.label(),
                worst.1
            ));
        }

        parts.join(" ")
    }

    fn tier_word(&self, total: f64) -> &'static str {
        if total >= self.tiers.excellent {
            "Отличное"
        } else if total >= self.tiers.good {
            "Хорошее"
        } else if total >= self.tiers.average {
            "Среднее"
        } else {
            "Низкое"
        }
    }
}
