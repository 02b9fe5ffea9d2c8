//! Ingestion boundary for session records
//!
//! The training log stores sessions as loosely-typed JSON (free-text
//! activity types, numbers that may be missing or negative). Records are
//! validated here once, so the rest of the crate only sees `TrainingSession`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::IngestError;
use crate::models::{ActivityKind, SubKind, TrainingSession};

/// Longest accepted session: one day
const MAX_DURATION_MIN: i64 = 24 * 60;
const MAX_CALORIES: i64 = 20_000;

/// ---------------------------------------------------------------------------
/// Raw Records
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
  Text(String),
  Number(i64),
}

impl std::fmt::Display for RawId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RawId::Text(s) => f.write_str(s),
      RawId::Number(n) => write!(f, "{}", n),
    }
  }
}

/// Session as exported by the web app. Numeric fields stay loosely typed
/// so one malformed value rejects its own record rather than the batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSession {
  pub id: RawId,
  #[serde(rename = "type")]
  pub activity_type: String,
  #[serde(default)]
  pub sub_type: Option<String>,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub duration: Option<Value>,
  #[serde(default)]
  pub distance: Option<Value>,
  #[serde(default)]
  pub calories: Option<Value>,
  #[serde(default)]
  pub completed: bool,
  pub date: String,
  #[serde(default)]
  pub week: Option<Value>,
  #[serde(default)]
  pub day: Option<Value>,
  #[serde(default, alias = "additional")]
  pub is_additional: bool,
  #[serde(default)]
  pub exclude_from_stats: bool,
}

/// Result of ingesting a batch: accepted sessions plus the rejects
#[derive(Debug, Default)]
pub struct IngestOutcome {
  pub sessions: Vec<TrainingSession>,
  pub rejected: Vec<IngestError>,
}

/// ---------------------------------------------------------------------------
/// Validation
/// ---------------------------------------------------------------------------

impl TryFrom<RawSession> for TrainingSession {
  type Error = IngestError;

  fn try_from(raw: RawSession) -> Result<Self, Self::Error> {
    let id = raw.id.to_string();

    let kind: ActivityKind = raw
      .activity_type
      .parse()
      .map_err(|value| IngestError::UnknownKind { id: id.clone(), value })?;

    let sub_kind = match raw.sub_type.as_deref().map(str::trim) {
      None | Some("") => None,
      Some(s) => {
        let sub: SubKind = s
          .parse()
          .map_err(|value| IngestError::UnknownSubKind { id: id.clone(), value })?;
        if !sub.is_valid_for(kind) {
          return Err(IngestError::InvalidPair {
            id,
            kind: kind.to_string(),
            sub_kind: sub.as_str().to_string(),
          });
        }
        Some(sub)
      }
    };

    let week = check_range(&id, "week", whole(&id, "week", raw.week.as_ref())?, 1, 8)? as u8;
    let day = check_range(&id, "day", whole(&id, "day", raw.day.as_ref())?, 1, 7)? as u8;

    let duration = match number(&id, "duration", raw.duration.as_ref())? {
      Some(d) => check_range(&id, "duration", non_negative(&id, "duration", d)?, 0, MAX_DURATION_MIN)? as u32,
      None => 0,
    };

    let distance = match number(&id, "distance", raw.distance.as_ref())? {
      Some(d) if d < 0.0 => return Err(IngestError::Negative { id, field: "distance" }),
      other => other,
    };

    let calories = match number(&id, "calories", raw.calories.as_ref())? {
      Some(c) => Some(check_range(&id, "calories", non_negative(&id, "calories", c)?, 0, MAX_CALORIES)? as u32),
      None => None,
    };

    let date = parse_date(&raw.date).ok_or_else(|| IngestError::InvalidDate {
      id: id.clone(),
      value: raw.date.clone(),
    })?;

    Ok(TrainingSession {
      id,
      kind,
      sub_kind,
      title: raw.title,
      description: raw.description,
      duration,
      distance,
      calories,
      completed: raw.completed,
      date,
      week,
      day,
      additional: raw.is_additional,
      exclude_from_stats: raw.exclude_from_stats,
    })
  }
}

/// Validate a batch, skipping bad records. Accepted sessions come back in
/// chronological order (stable for equal timestamps), and that order is the
/// "input order" plan adherence sees for upcoming sessions and for ties
/// between deviations of the same impact.
pub fn ingest_sessions(raw: Vec<RawSession>) -> IngestOutcome {
  let mut outcome = IngestOutcome::default();

  for record in raw {
    match TrainingSession::try_from(record) {
      Ok(session) => outcome.sessions.push(session),
      Err(e) => {
        warn!("Skipping session record: {}", e);
        outcome.rejected.push(e);
      }
    }
  }

  outcome.sessions.sort_by_key(|s| s.date);
  outcome
}

/// Parse a JSON array of raw session records
pub fn parse_sessions(json: &str) -> Result<IngestOutcome, serde_json::Error> {
  let raw: Vec<RawSession> = serde_json::from_str(json)?;
  Ok(ingest_sessions(raw))
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or a bare date
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
  let value = value.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
    return Some(dt.with_timezone(&Utc));
  }
  if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
    return Some(naive.and_utc());
  }
  NaiveDate::parse_from_str(value, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
}

/// Absent or `null` is `None`; anything but a finite number is rejected
fn number(id: &str, field: &'static str, value: Option<&Value>) -> Result<Option<f64>, IngestError> {
  match value {
    None | Some(Value::Null) => Ok(None),
    Some(v) => v
      .as_f64()
      .filter(|n| n.is_finite())
      .map(Some)
      .ok_or_else(|| IngestError::InvalidNumber {
        id: id.to_string(),
        field,
        value: v.to_string(),
      }),
  }
}

/// Plan coordinates must be present and integral
fn whole(id: &str, field: &'static str, value: Option<&Value>) -> Result<i64, IngestError> {
  let n = number(id, field, value)?.ok_or_else(|| IngestError::Missing {
    id: id.to_string(),
    field,
  })?;
  if n.fract() != 0.0 {
    return Err(IngestError::InvalidNumber {
      id: id.to_string(),
      field,
      value: n.to_string(),
    });
  }
  Ok(n as i64)
}

/// Rounds to the nearest whole unit (minutes, kcal)
fn non_negative(id: &str, field: &'static str, n: f64) -> Result<i64, IngestError> {
  if n < 0.0 {
    return Err(IngestError::Negative {
      id: id.to_string(),
      field,
    });
  }
  Ok(n.round() as i64)
}

fn check_range(id: &str, field: &'static str, value: i64, min: i64, max: i64) -> Result<i64, IngestError> {
  if (min..=max).contains(&value) {
    Ok(value)
  } else {
    Err(IngestError::OutOfRange {
      id: id.to_string(),
      field,
      value,
      min,
      max,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Datelike, Timelike};
  use serde_json::json;

  const SAMPLE: &str = r#"[
    {
      "id": 2,
      "type": "endurance-interval",
      "subType": "cycling",
      "title": "Bike intervals",
      "duration": 40,
      "distance": 18.5,
      "completed": true,
      "date": "2025-03-12T18:30:00Z",
      "week": 1,
      "day": 3
    },
    {
      "id": "w1d1",
      "type": "run",
      "title": "Easy run",
      "description": "conversational pace",
      "duration": 50,
      "distance": 10,
      "calories": 620,
      "completed": true,
      "date": "2025-03-10",
      "week": 1,
      "day": 1,
      "isAdditional": false,
      "excludeFromStats": false
    }
  ]"#;

  fn raw(activity_type: &str, sub_type: Option<&str>) -> RawSession {
    RawSession {
      id: RawId::Text("s1".to_string()),
      activity_type: activity_type.to_string(),
      sub_type: sub_type.map(str::to_string),
      title: "Session".to_string(),
      description: String::new(),
      duration: Some(json!(30)),
      distance: None,
      calories: None,
      completed: true,
      date: "2025-03-10T07:00:00Z".to_string(),
      week: Some(json!(1)),
      day: Some(json!(1)),
      is_additional: false,
      exclude_from_stats: false,
    }
  }

  #[test]
  fn test_parse_sample_sorts_chronologically() {
    let outcome = parse_sessions(SAMPLE).expect("valid json");

    assert!(outcome.rejected.is_empty());
    assert_eq!(outcome.sessions.len(), 2);

    let run = &outcome.sessions[0];
    assert_eq!(run.id, "w1d1");
    assert_eq!(run.kind, ActivityKind::Run);
    assert_eq!(run.distance, Some(10.0));
    assert_eq!(run.calories, Some(620));
    assert_eq!(run.date.day(), 10);
    assert_eq!(run.date.hour(), 0);

    let intervals = &outcome.sessions[1];
    assert_eq!(intervals.id, "2");
    assert_eq!(intervals.kind, ActivityKind::Interval);
    assert_eq!(intervals.sub_kind, Some(SubKind::Cycling));
    assert_eq!(intervals.date.hour(), 18);
  }

  #[test]
  fn test_unknown_kind_rejected() {
    let err = TrainingSession::try_from(raw("zumba", None)).unwrap_err();
    assert_eq!(
      err,
      IngestError::UnknownKind {
        id: "s1".to_string(),
        value: "zumba".to_string()
      }
    );
  }

  #[test]
  fn test_sub_kind_must_fit_kind() {
    let err = TrainingSession::try_from(raw("strength", Some("cycling"))).unwrap_err();
    assert!(matches!(err, IngestError::InvalidPair { .. }));

    let err = TrainingSession::try_from(raw("run", Some("pilates"))).unwrap_err();
    assert!(matches!(err, IngestError::UnknownSubKind { .. }));

    let ok = TrainingSession::try_from(raw("mobility", Some("yoga"))).unwrap();
    assert_eq!(ok.sub_kind, Some(SubKind::Yoga));

    let blank = TrainingSession::try_from(raw("run", Some("  "))).unwrap();
    assert_eq!(blank.sub_kind, None);
  }

  #[test]
  fn test_range_and_sign_checks() {
    let mut bad_week = raw("run", None);
    bad_week.week = Some(json!(9));
    assert!(matches!(
      TrainingSession::try_from(bad_week),
      Err(IngestError::OutOfRange { field: "week", .. })
    ));

    let mut bad_day = raw("run", None);
    bad_day.day = Some(json!(0));
    assert!(matches!(
      TrainingSession::try_from(bad_day),
      Err(IngestError::OutOfRange { field: "day", .. })
    ));

    let mut negative = raw("run", None);
    negative.distance = Some(json!(-1.0));
    assert!(matches!(
      TrainingSession::try_from(negative),
      Err(IngestError::Negative { field: "distance", .. })
    ));
  }

  #[test]
  fn test_missing_optional_numbers_are_absent() {
    let mut record = raw("swim", None);
    record.duration = None;

    let session = TrainingSession::try_from(record).unwrap();
    assert_eq!(session.duration, 0);
    assert_eq!(session.distance, None);
    assert_eq!(session.calories, None);
  }

  #[test]
  fn test_bad_records_are_skipped_not_fatal() {
    let mut bad_date = raw("run", None);
    bad_date.date = "yesterday".to_string();

    let outcome = ingest_sessions(vec![raw("run", None), bad_date, raw("cycle", None)]);

    assert_eq!(outcome.sessions.len(), 2);
    assert_eq!(outcome.rejected.len(), 1);
    assert!(matches!(outcome.rejected[0], IngestError::InvalidDate { .. }));
  }

  #[test]
  fn test_fractional_numbers_reject_only_their_record() {
    let json = r#"[
      {"id": 1, "type": "run", "duration": 30, "date": "2025-03-10", "week": 1, "day": 1},
      {"id": 2, "type": "run", "duration": 42.5, "calories": 310.4, "date": "2025-03-11", "week": 1, "day": 2},
      {"id": 3, "type": "run", "duration": 30, "date": "2025-03-12", "week": 1.5, "day": 3},
      {"id": 4, "type": "run", "duration": "long", "date": "2025-03-13", "week": 1, "day": 4}
    ]"#;

    let outcome = parse_sessions(json).expect("batch parses");

    assert_eq!(outcome.sessions.len(), 2);
    // fractional minutes and kcal round to the nearest whole unit
    assert_eq!(outcome.sessions[1].duration, 43);
    assert_eq!(outcome.sessions[1].calories, Some(310));

    assert_eq!(outcome.rejected.len(), 2);
    assert!(matches!(outcome.rejected[0], IngestError::InvalidNumber { field: "week", .. }));
    assert!(matches!(outcome.rejected[1], IngestError::InvalidNumber { field: "duration", .. }));
  }

  #[test]
  fn test_oversized_duration_and_calories_rejected() {
    let mut long = raw("run", None);
    long.duration = Some(json!(3_000_000_000u64));
    assert!(matches!(
      TrainingSession::try_from(long),
      Err(IngestError::OutOfRange { field: "duration", max: MAX_DURATION_MIN, .. })
    ));

    let mut hungry = raw("run", None);
    hungry.calories = Some(json!(1e12));
    assert!(matches!(
      TrainingSession::try_from(hungry),
      Err(IngestError::OutOfRange { field: "calories", .. })
    ));

    let mut full_day = raw("run", None);
    full_day.duration = Some(json!(MAX_DURATION_MIN));
    assert_eq!(TrainingSession::try_from(full_day).unwrap().duration, 1440);
  }

  #[test]
  fn test_missing_plan_slot_rejected() {
    let mut record = raw("run", None);
    record.day = None;
    assert!(matches!(
      TrainingSession::try_from(record),
      Err(IngestError::Missing { field: "day", .. })
    ));
  }
}
