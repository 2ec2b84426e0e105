//! Readiness scoring: seven 1-10 ratings into one 0-100 percentage.

use crate::errors::AppError;
use crate::models::{Metric, MetricSet};

/// Fixed scoring weights. Sleep and energy carry the most predictive weight
/// for training risk; nutrition and hydration the least. The table is a
/// contract: dashboards compare scores across athletes and dates assuming a
/// stable formula, so the weights are not tunable per deployment.
pub const METRIC_WEIGHTS: [(Metric, f64); 7] = [
    (Metric::SleepQuality, 0.22),
    (Metric::EnergyFatigue, 0.20),
    (Metric::MuscleSoreness, 0.15),
    (Metric::MoodStress, 0.15),
    (Metric::Motivation, 0.10),
    (Metric::NutritionQuality, 0.10),
    (Metric::Hydration, 0.08),
];

/// Compute the readiness score for a set of metrics.
///
/// Each rating is normalized to 0-1 via `(v - 1) / 9`, the weighted sum is
/// scaled to 0-100 and rounded half away from zero (`f64::round`; on this
/// non-negative domain that is round-half-up). All 1s yield exactly 0, all
/// 10s exactly 100.
///
/// Callers validate ratings before submitting; the range is still re-checked
/// here so an out-of-range value fails loudly instead of silently skewing
/// the score.
pub fn readiness_score(metrics: &MetricSet) -> Result<u8, AppError> {
    let mut weighted = 0.0;
    for (metric, weight) in METRIC_WEIGHTS {
        let value = metrics.get(metric);
        if !(1..=10).contains(&value) {
            return Err(AppError::InvalidMetricRange {
                metric: metric.key(),
                value,
            });
        }
        weighted += weight * f64::from(value - 1) / 9.0;
    }
    Ok((weighted * 100.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(value: u8) -> MetricSet {
        MetricSet {
            sleep_quality: value,
            energy_fatigue: value,
            muscle_soreness: value,
            mood_stress: value,
            motivation: value,
            nutrition_quality: value,
            hydration: value,
        }
    }

    #[test]
    fn weights_sum_to_one() {
        let sum: f64 = METRIC_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9, "weight sum drifted: {}", sum);
    }

    #[test]
    fn all_ones_scores_zero() {
        assert_eq!(readiness_score(&uniform(1)).unwrap(), 0);
    }

    #[test]
    fn all_tens_scores_hundred() {
        assert_eq!(readiness_score(&uniform(10)).unwrap(), 100);
    }

    #[test]
    fn score_is_deterministic() {
        let metrics = MetricSet {
            sleep_quality: 7,
            energy_fatigue: 4,
            muscle_soreness: 9,
            mood_stress: 2,
            motivation: 6,
            nutrition_quality: 8,
            hydration: 3,
        };
        assert_eq!(
            readiness_score(&metrics).unwrap(),
            readiness_score(&metrics).unwrap()
        );
    }

    #[test]
    fn pinned_mixed_scenario() {
        // (0.22*7 + 0.20*5 + 0.15*4 + 0.15*6 + 0.10*8 + 0.10*5 + 0.08*6) / 9
        // = 5.82 / 9 = 0.64666..., scaled to 64.666... and rounded up.
        let metrics = MetricSet {
            sleep_quality: 8,
            energy_fatigue: 6,
            muscle_soreness: 5,
            mood_stress: 7,
            motivation: 9,
            nutrition_quality: 6,
            hydration: 7,
        };
        assert_eq!(readiness_score(&metrics).unwrap(), 65);
    }

    #[test]
    fn raising_any_metric_never_lowers_the_score() {
        let base = MetricSet {
            sleep_quality: 5,
            energy_fatigue: 3,
            muscle_soreness: 8,
            mood_stress: 6,
            motivation: 2,
            nutrition_quality: 9,
            hydration: 4,
        };
        let base_score = readiness_score(&base).unwrap();
        for metric in Metric::ALL {
            let mut raised = base;
            raised.set(metric, base.get(metric) + 1);
            assert!(
                readiness_score(&raised).unwrap() >= base_score,
                "raising {} lowered the score",
                metric.key()
            );
        }
    }

    #[test]
    fn out_of_range_metric_fails_loudly() {
        let mut metrics = uniform(5);
        metrics.hydration = 11;
        let err = readiness_score(&metrics).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidMetricRange {
                metric: "hydration",
                value: 11
            }
        ));

        metrics.hydration = 0;
        assert!(readiness_score(&metrics).is_err());
    }
}
