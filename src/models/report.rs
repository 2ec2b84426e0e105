//! Readiness report model: the daily subjective report submitted by an athlete.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The seven wellness metrics, in scoring-weight order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    SleepQuality,
    EnergyFatigue,
    MuscleSoreness,
    MoodStress,
    Motivation,
    NutritionQuality,
    Hydration,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::SleepQuality,
        Metric::EnergyFatigue,
        Metric::MuscleSoreness,
        Metric::MoodStress,
        Metric::Motivation,
        Metric::NutritionQuality,
        Metric::Hydration,
    ];

    /// Snake-case key used in storage and error payloads.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::SleepQuality => "sleep_quality",
            Metric::EnergyFatigue => "energy_fatigue",
            Metric::MuscleSoreness => "muscle_soreness",
            Metric::MoodStress => "mood_stress",
            Metric::Motivation => "motivation",
            Metric::NutritionQuality => "nutrition_quality",
            Metric::Hydration => "hydration",
        }
    }

    /// Short display label for dashboard chips.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::SleepQuality => "Sleep",
            Metric::EnergyFatigue => "Energy",
            Metric::MuscleSoreness => "Soreness",
            Metric::MoodStress => "Mood",
            Metric::Motivation => "Motivation",
            Metric::NutritionQuality => "Nutrition",
            Metric::Hydration => "Hydration",
        }
    }
}

/// The seven subjective ratings, each on a 1-10 scale where higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSet {
    pub sleep_quality: u8,
    pub energy_fatigue: u8,
    pub muscle_soreness: u8,
    pub mood_stress: u8,
    pub motivation: u8,
    pub nutrition_quality: u8,
    pub hydration: u8,
}

impl MetricSet {
    pub fn get(&self, metric: Metric) -> u8 {
        match metric {
            Metric::SleepQuality => self.sleep_quality,
            Metric::EnergyFatigue => self.energy_fatigue,
            Metric::MuscleSoreness => self.muscle_soreness,
            Metric::MoodStress => self.mood_stress,
            Metric::Motivation => self.motivation,
            Metric::NutritionQuality => self.nutrition_quality,
            Metric::Hydration => self.hydration,
        }
    }

    pub fn set(&mut self, metric: Metric, value: u8) {
        match metric {
            Metric::SleepQuality => self.sleep_quality = value,
            Metric::EnergyFatigue => self.energy_fatigue = value,
            Metric::MuscleSoreness => self.muscle_soreness = value,
            Metric::MoodStress => self.mood_stress = value,
            Metric::Motivation => self.motivation = value,
            Metric::NutritionQuality => self.nutrition_quality = value,
            Metric::Hydration => self.hydration = value,
        }
    }

    /// Iterate metrics with their values, in weight order.
    pub fn entries(&self) -> [(Metric, u8); 7] {
        Metric::ALL.map(|m| (m, self.get(m)))
    }
}

/// A submitted daily report. One per athlete per calendar day.
///
/// `readiness_score` is derived from the metrics at write time and is never
/// accepted from a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    pub id: String,
    pub athlete_id: String,
    pub report_date: NaiveDate,
    #[serde(flatten)]
    pub metrics: MetricSet,
    pub readiness_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_at: String,
}

/// Request body for submitting a daily report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub athlete_id: String,
    /// Defaults to the server's current UTC date when absent.
    #[serde(default)]
    pub report_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub metrics: MetricSet,
    #[serde(default)]
    pub comments: Option<String>,
}

/// Request body for correcting a report's metrics. The score is recomputed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    #[serde(default)]
    pub sleep_quality: Option<u8>,
    #[serde(default)]
    pub energy_fatigue: Option<u8>,
    #[serde(default)]
    pub muscle_soreness: Option<u8>,
    #[serde(default)]
    pub mood_stress: Option<u8>,
    #[serde(default)]
    pub motivation: Option<u8>,
    #[serde(default)]
    pub nutrition_quality: Option<u8>,
    #[serde(default)]
    pub hydration: Option<u8>,
    #[serde(default)]
    pub comments: Option<String>,
}

impl UpdateReportRequest {
    /// Apply the provided fields on top of an existing metric set.
    pub fn merged_metrics(&self, existing: &MetricSet) -> MetricSet {
        let updates = [
            (Metric::SleepQuality, self.sleep_quality),
            (Metric::EnergyFatigue, self.energy_fatigue),
            (Metric::MuscleSoreness, self.muscle_soreness),
            (Metric::MoodStress, self.mood_stress),
            (Metric::Motivation, self.motivation),
            (Metric::NutritionQuality, self.nutrition_quality),
            (Metric::Hydration, self.hydration),
        ];
        let mut merged = *existing;
        for (metric, value) in updates {
            if let Some(value) = value {
                merged.set(metric, value);
            }
        }
        merged
    }
}
