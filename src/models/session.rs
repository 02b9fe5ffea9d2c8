use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Activity kinds known to the training log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
  Run,
  Cycle,
  Interval,
  Swim,
  Strength,
  Mobility,
  Recovery,
}

impl ActivityKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ActivityKind::Run => "run",
      ActivityKind::Cycle => "cycle",
      ActivityKind::Interval => "interval",
      ActivityKind::Swim => "swim",
      ActivityKind::Strength => "strength",
      ActivityKind::Mobility => "mobility",
      ActivityKind::Recovery => "recovery",
    }
  }

  /// Training focus shown in the plan breakdown
  pub fn focus(&self) -> &'static str {
    match self {
      ActivityKind::Run => "Endurance (run)",
      ActivityKind::Cycle => "Endurance (bike)",
      ActivityKind::Interval => "Intervals",
      ActivityKind::Swim => "Swim endurance",
      ActivityKind::Strength => "Strength",
      ActivityKind::Mobility => "Mobility",
      ActivityKind::Recovery => "Recovery",
    }
  }
}

impl std::fmt::Display for ActivityKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for ActivityKind {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "run" | "running" | "endurance-run" => Ok(Self::Run),
      "cycle" | "cycling" | "ride" | "endurance-cycle" => Ok(Self::Cycle),
      "interval" | "intervals" | "endurance-interval" => Ok(Self::Interval),
      "swim" | "swimming" => Ok(Self::Swim),
      "strength" => Ok(Self::Strength),
      "mobility" | "flexibility" | "yoga" => Ok(Self::Mobility),
      "recovery" | "rest" => Ok(Self::Recovery),
      other => Err(other.to_string()),
    }
  }
}

/// Optional refinement of an activity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubKind {
  Easy,
  Tempo,
  Long,
  Interval,
  Running,
  Cycling,
  Yoga,
  Stretching,
  Upper,
  Lower,
  FullBody,
  Core,
}

impl SubKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      SubKind::Easy => "easy",
      SubKind::Tempo => "tempo",
      SubKind::Long => "long",
      SubKind::Interval => "interval",
      SubKind::Running => "running",
      SubKind::Cycling => "cycling",
      SubKind::Yoga => "yoga",
      SubKind::Stretching => "stretching",
      SubKind::Upper => "upper",
      SubKind::Lower => "lower",
      SubKind::FullBody => "full_body",
      SubKind::Core => "core",
    }
  }

  /// Whether this sub-kind may refine the given kind
  pub fn is_valid_for(&self, kind: ActivityKind) -> bool {
    use SubKind::*;
    match kind {
      ActivityKind::Run => matches!(self, Easy | Tempo | Long | Interval),
      ActivityKind::Cycle => matches!(self, Easy | Long | Interval),
      ActivityKind::Interval => matches!(self, Running | Cycling),
      ActivityKind::Swim => matches!(self, Easy | Long | Interval),
      ActivityKind::Strength => matches!(self, Upper | Lower | FullBody | Core),
      ActivityKind::Mobility => matches!(self, Yoga | Stretching),
      ActivityKind::Recovery => matches!(self, Easy | Yoga | Stretching),
    }
  }
}

impl std::str::FromStr for SubKind {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().replace('-', "_").as_str() {
      "easy" => Ok(Self::Easy),
      "tempo" => Ok(Self::Tempo),
      "long" => Ok(Self::Long),
      "interval" | "intervals" => Ok(Self::Interval),
      "running" | "run" => Ok(Self::Running),
      "cycling" | "bike" | "ride" => Ok(Self::Cycling),
      "yoga" => Ok(Self::Yoga),
      "stretching" => Ok(Self::Stretching),
      "upper" => Ok(Self::Upper),
      "lower" => Ok(Self::Lower),
      "full_body" | "fullbody" => Ok(Self::FullBody),
      "core" => Ok(Self::Core),
      other => Err(other.to_string()),
    }
  }
}

/// Endurance sport a session is counted under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
  Running,
  Cycling,
  Swimming,
}

/// A single planned or logged training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
  pub id: String,
  pub kind: ActivityKind,
  pub sub_kind: Option<SubKind>,
  pub title: String,
  pub description: String,
  /// Minutes
  pub duration: u32,
  /// Kilometers
  pub distance: Option<f64>,
  pub calories: Option<u32>,
  pub completed: bool,
  pub date: DateTime<Utc>,
  /// Plan week, 1..=8
  pub week: u8,
  /// Plan day, 1..=7 (Monday = 1)
  pub day: u8,
  /// Ad-hoc workout logged outside the template
  pub additional: bool,
  pub exclude_from_stats: bool,
}

impl TrainingSession {
  /// Resolve the endurance sport, if any. Interval sessions follow their sub-kind.
  pub fn sport(&self) -> Option<Sport> {
    match self.kind {
      ActivityKind::Run => Some(Sport::Running),
      ActivityKind::Cycle => Some(Sport::Cycling),
      ActivityKind::Swim => Some(Sport::Swimming),
      ActivityKind::Interval => match self.sub_kind {
        Some(SubKind::Cycling) => Some(Sport::Cycling),
        _ => Some(Sport::Running),
      },
      _ => None,
    }
  }

  pub fn is_interval(&self) -> bool {
    self.kind == ActivityKind::Interval || self.sub_kind == Some(SubKind::Interval)
  }

  /// Counted in the main report (completed and not excluded)
  pub fn is_active(&self) -> bool {
    self.completed && !self.exclude_from_stats
  }

  pub fn is_planned(&self) -> bool {
    !self.additional
  }

  pub fn distance_km(&self) -> f64 {
    self.distance.unwrap_or(0.0)
  }

  pub fn calendar_date(&self) -> NaiveDate {
    self.date.date_naive()
  }
}
