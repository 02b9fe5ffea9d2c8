//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - A pinned "now" and plan calendar
//! - Mock data factories
//! - Helper assertions

use crate::analysis::ReportOptions;
use crate::models::{ActivityKind, Badge, PersonalRecord, SubKind, TrainingSession, UserStats};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Thursday 2025-03-13 12:00 UTC (ISO weekday 4)
pub fn fixed_now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 3, 13, 12, 0, 0).unwrap()
}

/// Monday of plan week 1
pub fn plan_start() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 3, 10, 7, 0, 0).unwrap()
}

/// Calendar slot for a plan week/day, at 07:00 UTC
pub fn plan_date(week: u8, day: u8) -> DateTime<Utc> {
  plan_start() + Duration::days((week as i64 - 1) * 7 + (day as i64 - 1))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn report_options() -> ReportOptions {
  ReportOptions {
    now: fixed_now(),
    current_week: 1,
  }
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// A completed, planned 45 minute session placed on its plan slot
pub fn mock_session(kind: ActivityKind, week: u8, day: u8) -> TrainingSession {
  TrainingSession {
    id: format!("{}-w{}d{}", kind.as_str(), week, day),
    kind,
    sub_kind: None,
    title: format!("{} session", kind.focus()),
    description: String::new(),
    duration: 45,
    distance: None,
    calories: None,
    completed: true,
    date: plan_date(week, day),
    week,
    day,
    additional: false,
    exclude_from_stats: false,
  }
}

pub fn mock_run(distance_km: f64, duration_min: u32, week: u8, day: u8) -> TrainingSession {
  TrainingSession {
    distance: Some(distance_km),
    duration: duration_min,
    title: format!("{}km run", distance_km),
    ..mock_session(ActivityKind::Run, week, day)
  }
}

pub fn mock_ride(distance_km: f64, duration_min: u32, week: u8, day: u8) -> TrainingSession {
  TrainingSession {
    distance: Some(distance_km),
    duration: duration_min,
    title: format!("{}km ride", distance_km),
    ..mock_session(ActivityKind::Cycle, week, day)
  }
}

pub fn mock_swim(distance_km: f64, duration_min: u32, week: u8, day: u8) -> TrainingSession {
  TrainingSession {
    distance: Some(distance_km),
    duration: duration_min,
    title: format!("{}km swim", distance_km),
    ..mock_session(ActivityKind::Swim, week, day)
  }
}

pub fn mock_interval(sub_kind: SubKind, week: u8, day: u8) -> TrainingSession {
  TrainingSession {
    sub_kind: Some(sub_kind),
    duration: 40,
    ..mock_session(ActivityKind::Interval, week, day)
  }
}

/// A completed ad-hoc workout outside the template
pub fn mock_extra(kind: ActivityKind, week: u8, day: u8) -> TrainingSession {
  TrainingSession {
    id: format!("extra-{}-w{}d{}", kind.as_str(), week, day),
    additional: true,
    ..mock_session(kind, week, day)
  }
}

pub fn mock_user_stats() -> UserStats {
  UserStats {
    total_workouts: 12,
    total_distance: 84.5,
    total_duration: 640,
    current_streak: 3,
    longest_streak: 9,
    points: 1250,
    badges: vec![
      Badge {
        id: "first-run".to_string(),
        name: "First Run".to_string(),
        earned: true,
        earned_date: Some(date(2025, 2, 1)),
        category: "milestone".to_string(),
      },
      Badge {
        id: "marathon".to_string(),
        name: "Marathon".to_string(),
        earned: false,
        earned_date: None,
        category: "distance".to_string(),
      },
    ],
    personal_records: vec![PersonalRecord {
      exercise: "Bench press".to_string(),
      value: 80.0,
      unit: "kg".to_string(),
      date: date(2025, 2, 20),
    }],
  }
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Datelike;

  #[test]
  fn test_plan_calendar_lines_up_with_now() {
    assert_eq!(fixed_now().weekday().number_from_monday(), 4);
    assert_eq!(plan_date(1, 1).weekday().number_from_monday(), 1);
    assert_eq!(plan_date(2, 3).date_naive(), date(2025, 3, 19));
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let run = mock_run(10.0, 50, 1, 1);
    assert_eq!(run.kind, ActivityKind::Run);
    assert_eq!(run.distance, Some(10.0));
    assert!(run.is_active());
    assert!(run.is_planned());

    let extra = mock_extra(ActivityKind::Strength, 1, 2);
    assert!(extra.additional);

    let stats = mock_user_stats();
    assert_eq!(stats.earned_badges(), 1);
  }
}
