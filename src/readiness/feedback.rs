//! Rule-based recovery insights derived from a day's metrics.

use crate::models::{Metric, MetricSet};

/// Coarse banding of a single 1-10 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Moderate,
    Low,
}

pub fn classify(value: u8) -> Level {
    if value >= 8 {
        Level::High
    } else if value >= 5 {
        Level::Moderate
    } else {
        Level::Low
    }
}

/// The lowest-scoring metric, ties broken by weight order.
pub fn primary_limiter(metrics: &MetricSet) -> (Metric, u8) {
    let mut limiter = (Metric::SleepQuality, metrics.sleep_quality);
    for (metric, value) in metrics.entries() {
        if value < limiter.1 {
            limiter = (metric, value);
        }
    }
    limiter
}

/// A rest day is suggested when soreness is severe and energy is low.
pub fn rest_recommended(metrics: &MetricSet) -> bool {
    metrics.muscle_soreness <= 3 && metrics.energy_fatigue <= 4
}

/// Actionable feedback for the athlete, picked from an ordered rule table:
/// broad multi-metric patterns first, then pairings with the limiting
/// metric, then single-weakness messages, then a readiness-score fallback.
pub fn personalized_feedback(metrics: &MetricSet, readiness_score: u8) -> &'static str {
    use Metric::*;

    let low: Vec<Metric> = Metric::ALL
        .into_iter()
        .filter(|m| classify(metrics.get(*m)) == Level::Low)
        .collect();
    let is_low = |m: Metric| low.contains(&m);
    let (limiter, _) = primary_limiter(metrics);

    if low.len() >= 4 {
        return "Your system needs recovery. Focus on rest, hydration, and nutrition today.";
    }
    if low.len() >= 3 {
        return "Multiple areas need attention. Prioritise recovery and lighter training today.";
    }

    match limiter {
        MuscleSoreness if is_low(SleepQuality) => {
            return "Muscle fatigue may be linked to poor sleep. Prioritise rest and stretching.";
        }
        EnergyFatigue if is_low(SleepQuality) => {
            return "Low energy likely from poor sleep. Focus on sleep hygiene and recovery.";
        }
        SleepQuality if is_low(MoodStress) => {
            return "Poor sleep affecting mood. Create a calming bedtime routine.";
        }
        MuscleSoreness if is_low(Hydration) => {
            return "Soreness may be tied to dehydration. Drink more water and move lightly today.";
        }
        EnergyFatigue if is_low(Hydration) => {
            return "Dehydration affecting energy. Increase fluid intake throughout the day.";
        }
        Hydration if is_low(NutritionQuality) => {
            return "Poor hydration and nutrition. Focus on balanced meals and regular water intake.";
        }
        MuscleSoreness if is_low(NutritionQuality) => {
            return "Soreness likely due to poor fuelling. Eat balanced meals and prioritise recovery.";
        }
        EnergyFatigue if is_low(NutritionQuality) => {
            return "Low energy from poor nutrition. Eat regular, balanced meals today.";
        }
        Motivation if is_low(NutritionQuality) => {
            return "Low motivation may be linked to poor nutrition. Fuel your body properly.";
        }
        Motivation if is_low(MuscleSoreness) => {
            return "Reduced motivation may come from soreness. Take a low-impact day.";
        }
        MoodStress if is_low(SleepQuality) => {
            return "Poor mood linked to sleep issues. Prioritise rest and stress management.";
        }
        Motivation if is_low(MoodStress) => {
            return "Low motivation and mood. Consider light activity or mental recovery time.";
        }
        EnergyFatigue
            if !is_low(SleepQuality)
                && metrics.sleep_quality >= 8
                && metrics.energy_fatigue < 8 =>
        {
            return "You slept well but energy is low. Try light activity or extra recovery time.";
        }
        _ => {}
    }

    if low.len() == 1 {
        match limiter {
            MuscleSoreness => {
                return "Muscle soreness is your main concern today. Focus on gentle movement and recovery work.";
            }
            SleepQuality => {
                return "Poor sleep is affecting your readiness. Prioritise sleep hygiene and recovery today.";
            }
            EnergyFatigue => {
                return "Low energy levels detected. Consider lighter training or additional recovery time.";
            }
            Hydration => {
                return "Hydration needs attention. Increase fluid intake throughout the day.";
            }
            NutritionQuality => {
                return "Nutrition quality is low. Focus on balanced meals and proper fuelling.";
            }
            MoodStress => {
                return "Mood and stress levels are elevated. Consider stress management and mental recovery.";
            }
            Motivation => {
                return "Motivation is low today. Consider lighter activities or mental recovery time.";
            }
        }
    }

    if readiness_score >= 80 {
        "You're fully recovered and ready to perform."
    } else if readiness_score >= 60 {
        "Train smart today and monitor recovery."
    } else if readiness_score >= 40 {
        "Body needs lighter load or active recovery."
    } else {
        "Full rest recommended."
    }
}
