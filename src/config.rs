use chrono::{DateTime, Utc};
use std::env;
use std::path::PathBuf;

use crate::error::ReportError;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const SESSIONS_PATH_VAR: &str = "TRAINER_SESSIONS_PATH";
const STATS_PATH_VAR: &str = "TRAINER_STATS_PATH";
const EXPORT_DIR_VAR: &str = "TRAINER_EXPORT_DIR";
const REPORT_NOW_VAR: &str = "TRAINER_REPORT_NOW";
const CURRENT_WEEK_VAR: &str = "TRAINER_CURRENT_WEEK";

const DEFAULT_EXPORT_DIR: &str = "exports";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
  pub sessions_path: PathBuf,
  /// Default stats are used when unset
  pub stats_path: Option<PathBuf>,
  pub export_dir: PathBuf,
  /// Pins "now" for reproducible reports; wall clock otherwise
  pub now: Option<DateTime<Utc>>,
  pub current_week: u8,
}

impl ReportConfig {
  /// Read configuration from the environment (call `dotenvy::dotenv()` first
  /// to pick up a `.env` file)
  pub fn from_env() -> Result<Self, ReportError> {
    let sessions_path = env::var(SESSIONS_PATH_VAR)
      .map_err(|_| ReportError::MissingConfig(SESSIONS_PATH_VAR.into()))?;

    let now = match non_empty(REPORT_NOW_VAR) {
      Some(value) => Some(
        DateTime::parse_from_rfc3339(&value)
          .map(|dt| dt.with_timezone(&Utc))
          .map_err(|e| ReportError::InvalidConfig(format!("{}: {}", REPORT_NOW_VAR, e)))?,
      ),
      None => None,
    };

    let current_week = match non_empty(CURRENT_WEEK_VAR) {
      Some(value) => value
        .parse::<u8>()
        .ok()
        .filter(|w| (1..=8).contains(w))
        .ok_or_else(|| {
          ReportError::InvalidConfig(format!("{} must be 1-8, got '{}'", CURRENT_WEEK_VAR, value))
        })?,
      None => 1,
    };

    Ok(Self {
      sessions_path: PathBuf::from(sessions_path),
      stats_path: non_empty(STATS_PATH_VAR).map(PathBuf::from),
      export_dir: PathBuf::from(non_empty(EXPORT_DIR_VAR).unwrap_or_else(|| DEFAULT_EXPORT_DIR.into())),
      now,
      current_week,
    })
  }
}

fn non_empty(var: &str) -> Option<String> {
  env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use serial_test::serial;

  const ALL_VARS: [&str; 5] = [
    SESSIONS_PATH_VAR,
    STATS_PATH_VAR,
    EXPORT_DIR_VAR,
    REPORT_NOW_VAR,
    CURRENT_WEEK_VAR,
  ];

  fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let kvs: Vec<(&str, Option<&str>)> = ALL_VARS
      .iter()
      .map(|k| (*k, vars.iter().find(|(name, _)| name == k).map(|(_, v)| *v)))
      .collect();
    temp_env::with_vars(kvs, f);
  }

  #[test]
  #[serial]
  fn test_defaults() {
    with_env(&[(SESSIONS_PATH_VAR, "data/sessions.json")], || {
      let config = ReportConfig::from_env().unwrap();
      assert_eq!(config.sessions_path, PathBuf::from("data/sessions.json"));
      assert_eq!(config.stats_path, None);
      assert_eq!(config.export_dir, PathBuf::from("exports"));
      assert_eq!(config.now, None);
      assert_eq!(config.current_week, 1);
    });
  }

  #[test]
  #[serial]
  fn test_missing_sessions_path() {
    with_env(&[], || {
      let err = ReportConfig::from_env().unwrap_err();
      assert!(matches!(err, ReportError::MissingConfig(ref v) if v == SESSIONS_PATH_VAR));
    });
  }

  #[test]
  #[serial]
  fn test_all_values() {
    with_env(
      &[
        (SESSIONS_PATH_VAR, "s.json"),
        (STATS_PATH_VAR, "stats.json"),
        (EXPORT_DIR_VAR, "/tmp/out"),
        (REPORT_NOW_VAR, "2025-03-13T12:00:00+01:00"),
        (CURRENT_WEEK_VAR, "3"),
      ],
      || {
        let config = ReportConfig::from_env().unwrap();
        assert_eq!(config.stats_path, Some(PathBuf::from("stats.json")));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.now, Some(Utc.with_ymd_and_hms(2025, 3, 13, 11, 0, 0).unwrap()));
        assert_eq!(config.current_week, 3);
      },
    );
  }

  #[test]
  #[serial]
  fn test_invalid_values() {
    with_env(&[(SESSIONS_PATH_VAR, "s.json"), (CURRENT_WEEK_VAR, "9")], || {
      assert!(matches!(ReportConfig::from_env(), Err(ReportError::InvalidConfig(_))));
    });

    with_env(&[(SESSIONS_PATH_VAR, "s.json"), (REPORT_NOW_VAR, "tomorrow")], || {
      assert!(matches!(ReportConfig::from_env(), Err(ReportError::InvalidConfig(_))));
    });
  }
}
