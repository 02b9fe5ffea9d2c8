use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub earned: bool,
  #[serde(default)]
  pub earned_date: Option<NaiveDate>,
  #[serde(default)]
  pub category: String,
}

/// Personal record as stored by the training log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
  pub exercise: String,
  pub value: f64,
  pub unit: String,
  pub date: NaiveDate,
}

/// Running summary carried forward between sessions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStats {
  pub total_workouts: u32,
  /// Kilometers
  pub total_distance: f64,
  /// Minutes
  pub total_duration: u32,
  pub current_streak: u32,
  pub longest_streak: u32,
  pub points: u32,
  pub badges: Vec<Badge>,
  pub personal_records: Vec<PersonalRecord>,
}

impl UserStats {
  pub fn earned_badges(&self) -> usize {
    self.badges.iter().filter(|b| b.earned).count()
  }
}
