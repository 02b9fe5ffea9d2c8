//! Deterministic aggregation layer for training sessions
//!
//! This module turns the raw session log into a `PerformanceMetrics`
//! snapshot. Everything here is pure: the caller injects "now" through
//! `ReportOptions`, and the same inputs always produce the same report.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ActivityKind, Sport, TrainingSession, UserStats};
use crate::plan::PlanAdherence;

/// ---------------------------------------------------------------------------
/// Report Options
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
  /// Reference time for recency and overdue checks
  pub now: DateTime<Utc>,
  /// Plan week the athlete is currently in (1..=8)
  pub current_week: u8,
}

impl ReportOptions {
  pub fn at(now: DateTime<Utc>) -> Self {
    Self { now, current_week: 1 }
  }
}

/// ---------------------------------------------------------------------------
/// Classifications
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
  Improving,
  #[default]
  Stable,
  Declining,
}

impl Trend {
  pub fn as_str(&self) -> &'static str {
    match self {
      Trend::Improving => "improving",
      Trend::Stable => "stable",
      Trend::Declining => "declining",
    }
  }
}

/// Trend variant used for strength volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTrend {
  Increasing,
  #[default]
  Stable,
  Decreasing,
}

impl VolumeTrend {
  pub fn as_str(&self) -> &'static str {
    match self {
      VolumeTrend::Increasing => "increasing",
      VolumeTrend::Stable => "stable",
      VolumeTrend::Decreasing => "decreasing",
    }
  }
}

impl From<Trend> for VolumeTrend {
  fn from(trend: Trend) -> Self {
    match trend {
      Trend::Improving => VolumeTrend::Increasing,
      Trend::Stable => VolumeTrend::Stable,
      Trend::Declining => VolumeTrend::Decreasing,
    }
  }
}

/// Ordinal intensity estimate for a single session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
  Low,
  Moderate,
  High,
  VeryHigh,
}

impl Intensity {
  pub fn of(session: &TrainingSession) -> Self {
    match session.kind {
      ActivityKind::Mobility | ActivityKind::Recovery => Intensity::Low,
      _ if session.is_interval() => Intensity::VeryHigh,
      _ => match session.duration {
        d if d < 30 => Intensity::Moderate,
        d if d < 60 => Intensity::High,
        _ => Intensity::VeryHigh,
      },
    }
  }

  pub fn score(&self) -> f64 {
    match self {
      Intensity::Low => 1.0,
      Intensity::Moderate => 2.0,
      Intensity::High => 3.0,
      Intensity::VeryHigh => 4.0,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
  Morning,
  Afternoon,
  Evening,
  Night,
}

impl TimeOfDay {
  pub fn from_hour(hour: u32) -> Self {
    match hour {
      5..=11 => TimeOfDay::Morning,
      12..=16 => TimeOfDay::Afternoon,
      17..=21 => TimeOfDay::Evening,
      _ => TimeOfDay::Night,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      TimeOfDay::Morning => "morning",
      TimeOfDay::Afternoon => "afternoon",
      TimeOfDay::Evening => "evening",
      TimeOfDay::Night => "night",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryStatus {
  Adequate,
  Low,
  #[default]
  Missing,
}

impl RecoveryStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      RecoveryStatus::Adequate => "adequate",
      RecoveryStatus::Low => "low",
      RecoveryStatus::Missing => "missing",
    }
  }
}

pub const WEEKDAY_NAMES: [&str; 7] = [
  "Monday",
  "Tuesday",
  "Wednesday",
  "Thursday",
  "Friday",
  "Saturday",
  "Sunday",
];

/// Relative change that separates a real trend from noise
const TREND_THRESHOLD: f64 = 0.10;
const TREND_WINDOW: usize = 3;
/// Share of recovery/mobility work considered sufficient
const ADEQUATE_RECOVERY_PCT: f64 = 15.0;
const RECENCY_DAYS: i64 = 7;

/// (label, sport, target km, tolerance km)
pub const PERSONAL_BEST_TARGETS: [(&str, Sport, f64, f64); 4] = [
  ("5km Lauf", Sport::Running, 5.0, 0.2),
  ("10km Lauf", Sport::Running, 10.0, 0.5),
  ("20km Radfahren", Sport::Cycling, 20.0, 2.0),
  ("1km Schwimmen", Sport::Swimming, 1.0, 0.1),
];

/// ---------------------------------------------------------------------------
/// Report Sections
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverallMetrics {
  pub total_sessions: u32,
  pub total_distance: f64,
  pub total_duration: u32,
  pub total_calories: u32,
  pub average_duration: f64,
  pub current_streak: u32,
  pub longest_streak: u32,
  pub points: u32,
  pub badges_earned: u32,
  pub stored_records: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SportMetrics {
  pub sessions: u32,
  pub total_distance: f64,
  pub total_duration: u32,
  /// `m:ss` per km (running) or per 100 m (swimming)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub average_pace: Option<String>,
  /// km/h (cycling)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub average_speed: Option<f64>,
  pub best_distance: f64,
  /// Fastest session at or beyond the representative distance, minutes
  #[serde(skip_serializing_if = "Option::is_none")]
  pub best_time: Option<u32>,
  pub trend: Trend,
  pub weekly_average: f64,
  pub total_calories: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrengthMetrics {
  pub sessions: u32,
  pub total_duration: u32,
  pub average_duration: f64,
  pub volume_trend: VolumeTrend,
  pub weekly_average: f64,
  pub total_calories: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WellnessReport {
  pub mobility_sessions: u32,
  pub mobility_minutes: u32,
  pub recovery_sessions: u32,
  pub recovery_minutes: u32,
  /// Days without any session inside the observed span
  pub rest_days: u32,
  pub recovery_ratio_pct: f64,
  pub status: RecoveryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTrend {
  pub week: u8,
  pub sessions: u32,
  pub total_duration: u32,
  pub total_distance: f64,
  pub intensity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
  /// `YYYY-MM`
  pub month: String,
  pub sessions: u32,
  pub total_duration: u32,
  pub total_distance: f64,
  pub intensity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalBest {
  pub exercise: String,
  pub sport: Sport,
  pub distance: f64,
  /// Minutes
  pub time: u32,
  pub pace: String,
  pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiWorkoutStats {
  pub multi_workout_days: u32,
  pub active_days: u32,
  pub average_sessions_per_day: f64,
  pub max_sessions_per_day: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntensityDistribution {
  pub low_pct: f64,
  pub moderate_pct: f64,
  pub high_pct: f64,
  pub very_high_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingPatterns {
  pub morning: u32,
  pub afternoon: u32,
  pub evening: u32,
  pub night: u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub preferred_time: Option<TimeOfDay>,
  /// Sessions per ISO weekday, Monday first
  pub weekday_sessions: [u32; 7],
  #[serde(skip_serializing_if = "Option::is_none")]
  pub most_active_day: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataQuality {
  pub completeness_pct: f64,
  pub consistency_pct: f64,
  pub recent: bool,
  pub date_span_days: i64,
}

/// The complete performance snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
  pub generated_at: DateTime<Utc>,
  pub overall: OverallMetrics,
  pub running: SportMetrics,
  pub cycling: SportMetrics,
  pub swimming: SportMetrics,
  pub strength: StrengthMetrics,
  pub wellness: WellnessReport,
  pub weekly_trends: Vec<WeeklyTrend>,
  pub monthly_trends: Vec<MonthlyTrend>,
  pub personal_bests: Vec<PersonalBest>,
  pub multi_workout: MultiWorkoutStats,
  pub intensity_distribution: IntensityDistribution,
  pub patterns: TrainingPatterns,
  pub plan_adherence: PlanAdherence,
  pub data_quality: DataQuality,
}

/// ---------------------------------------------------------------------------
/// Entry Point
/// ---------------------------------------------------------------------------

/// Build the full report. Never fails; degenerate input yields zeroed sections.
pub fn generate_report(
  sessions: &[TrainingSession],
  stats: &UserStats,
  options: &ReportOptions,
) -> PerformanceMetrics {
  let active: Vec<&TrainingSession> = sessions.iter().filter(|s| s.is_active()).collect();
  let active_weeks = active.iter().map(|s| s.week).collect::<BTreeSet<_>>().len();

  debug!(
    total = sessions.len(),
    active = active.len(),
    active_weeks,
    "generating performance report"
  );

  PerformanceMetrics {
    generated_at: options.now,
    overall: OverallMetrics::compute(&active, stats),
    running: SportMetrics::compute(Sport::Running, &active, active_weeks),
    cycling: SportMetrics::compute(Sport::Cycling, &active, active_weeks),
    swimming: SportMetrics::compute(Sport::Swimming, &active, active_weeks),
    strength: StrengthMetrics::compute(&active, active_weeks),
    wellness: WellnessReport::compute(&active),
    weekly_trends: weekly_trends(&active),
    monthly_trends: monthly_trends(&active),
    personal_bests: personal_bests(&active),
    multi_workout: MultiWorkoutStats::compute(&active),
    intensity_distribution: IntensityDistribution::compute(&active),
    patterns: TrainingPatterns::compute(&active),
    plan_adherence: PlanAdherence::compute(sessions, options),
    data_quality: DataQuality::compute(&active, options.now),
  }
}

/// ---------------------------------------------------------------------------
/// Section Computations
/// ---------------------------------------------------------------------------

impl OverallMetrics {
  pub fn compute(active: &[&TrainingSession], stats: &UserStats) -> Self {
    let total_sessions = active.len() as u32;
    let total_duration = total(active.iter().map(|s| s.duration));

    Self {
      total_sessions,
      total_distance: active.iter().map(|s| s.distance_km()).sum(),
      total_duration,
      total_calories: total(active.iter().filter_map(|s| s.calories)),
      average_duration: ratio(total_duration as f64, total_sessions as f64),
      current_streak: stats.current_streak,
      longest_streak: stats.longest_streak,
      points: stats.points,
      badges_earned: stats.earned_badges() as u32,
      stored_records: stats.personal_records.len() as u32,
    }
  }
}

impl SportMetrics {
  pub fn compute(sport: Sport, active: &[&TrainingSession], active_weeks: usize) -> Self {
    let partition: Vec<&TrainingSession> = active
      .iter()
      .copied()
      .filter(|s| s.sport() == Some(sport))
      .collect();

    if partition.is_empty() {
      return Self::default();
    }

    let total_distance: f64 = partition.iter().map(|s| s.distance_km()).sum();
    let total_duration = total(partition.iter().map(|s| s.duration));

    let (average_pace, average_speed) = if total_distance > 0.0 {
      let minutes = total_duration as f64;
      match sport {
        Sport::Running => (Some(format_pace(minutes / total_distance)), None),
        Sport::Swimming => (Some(format_pace(minutes / (total_distance * 10.0))), None),
        Sport::Cycling => (None, Some(speed_kmh(total_distance, total_duration))),
      }
    } else {
      (None, None)
    };

    let threshold = best_time_threshold_km(sport);
    let best_time = partition
      .iter()
      .filter(|s| s.distance_km() >= threshold)
      .map(|s| s.duration)
      .min();

    let distances: Vec<f64> = partition.iter().map(|s| s.distance_km()).collect();

    Self {
      sessions: partition.len() as u32,
      total_distance,
      total_duration,
      average_pace,
      average_speed,
      best_distance: distances.iter().copied().fold(0.0, f64::max),
      best_time,
      trend: classify_trend(&distances),
      weekly_average: ratio(partition.len() as f64, active_weeks as f64),
      total_calories: total(partition.iter().filter_map(|s| s.calories)),
    }
  }
}

impl StrengthMetrics {
  pub fn compute(active: &[&TrainingSession], active_weeks: usize) -> Self {
    let partition: Vec<&TrainingSession> = active
      .iter()
      .copied()
      .filter(|s| s.kind == ActivityKind::Strength)
      .collect();

    if partition.is_empty() {
      return Self::default();
    }

    let durations: Vec<f64> = partition.iter().map(|s| s.duration as f64).collect();
    let total_duration = total(partition.iter().map(|s| s.duration));

    Self {
      sessions: partition.len() as u32,
      total_duration,
      average_duration: ratio(total_duration as f64, partition.len() as f64),
      volume_trend: classify_trend(&durations).into(),
      weekly_average: ratio(partition.len() as f64, active_weeks as f64),
      total_calories: total(partition.iter().filter_map(|s| s.calories)),
    }
  }
}

impl WellnessReport {
  pub fn compute(active: &[&TrainingSession]) -> Self {
    if active.is_empty() {
      return Self::default();
    }

    let mut report = Self::default();
    for s in active {
      match s.kind {
        ActivityKind::Mobility => {
          report.mobility_sessions += 1;
          report.mobility_minutes = report.mobility_minutes.saturating_add(s.duration);
        }
        ActivityKind::Recovery => {
          report.recovery_sessions += 1;
          report.recovery_minutes = report.recovery_minutes.saturating_add(s.duration);
        }
        _ => {}
      }
    }

    let active_days = active.iter().map(|s| s.calendar_date()).collect::<BTreeSet<_>>().len() as i64;
    let span_days = date_span_days(active) + 1;
    report.rest_days = (span_days - active_days).max(0) as u32;

    let recovery_count = (report.mobility_sessions + report.recovery_sessions) as f64;
    report.recovery_ratio_pct = clamp_pct(ratio(recovery_count, active.len() as f64) * 100.0);
    report.status = if report.recovery_ratio_pct >= ADEQUATE_RECOVERY_PCT {
      RecoveryStatus::Adequate
    } else if report.recovery_ratio_pct > 0.0 {
      RecoveryStatus::Low
    } else {
      RecoveryStatus::Missing
    };

    report
  }
}

impl MultiWorkoutStats {
  pub fn compute(active: &[&TrainingSession]) -> Self {
    let mut per_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for s in active {
      *per_day.entry(s.calendar_date()).or_insert(0) += 1;
    }

    let active_days = per_day.len() as u32;

    Self {
      multi_workout_days: per_day.values().filter(|&&n| n > 1).count() as u32,
      active_days,
      average_sessions_per_day: ratio(active.len() as f64, active_days as f64),
      max_sessions_per_day: per_day.values().copied().max().unwrap_or(0),
    }
  }
}

impl IntensityDistribution {
  pub fn compute(active: &[&TrainingSession]) -> Self {
    let count = active.len() as f64;
    let share = |level: Intensity| {
      let n = active.iter().filter(|s| Intensity::of(s) == level).count() as f64;
      clamp_pct(ratio(n, count) * 100.0)
    };

    Self {
      low_pct: share(Intensity::Low),
      moderate_pct: share(Intensity::Moderate),
      high_pct: share(Intensity::High),
      very_high_pct: share(Intensity::VeryHigh),
    }
  }
}

impl TrainingPatterns {
  pub fn compute(active: &[&TrainingSession]) -> Self {
    let mut patterns = Self::default();

    for s in active {
      match TimeOfDay::from_hour(s.date.hour()) {
        TimeOfDay::Morning => patterns.morning += 1,
        TimeOfDay::Afternoon => patterns.afternoon += 1,
        TimeOfDay::Evening => patterns.evening += 1,
        TimeOfDay::Night => patterns.night += 1,
      }
      let idx = s.date.weekday().num_days_from_monday() as usize;
      patterns.weekday_sessions[idx] += 1;
    }

    let buckets = [
      (TimeOfDay::Morning, patterns.morning),
      (TimeOfDay::Afternoon, patterns.afternoon),
      (TimeOfDay::Evening, patterns.evening),
      (TimeOfDay::Night, patterns.night),
    ];
    patterns.preferred_time = first_max(buckets.iter().map(|(t, n)| (*t, *n)));
    patterns.most_active_day = first_max(
      WEEKDAY_NAMES
        .iter()
        .zip(patterns.weekday_sessions.iter())
        .map(|(name, n)| (name.to_string(), *n)),
    );

    patterns
  }
}

impl DataQuality {
  pub fn compute(active: &[&TrainingSession], now: DateTime<Utc>) -> Self {
    if active.is_empty() {
      return Self::default();
    }

    let n = active.len() as f64;
    let complete = active.iter().filter(|s| s.duration > 0).count() as f64;
    let span = date_span_days(active);
    let expected = (span as f64 / 2.0).max(1.0);

    let recent = active
      .iter()
      .map(|s| s.calendar_date())
      .max()
      .is_some_and(|newest| (now.date_naive() - newest).num_days() <= RECENCY_DAYS);

    Self {
      completeness_pct: clamp_pct(complete / n * 100.0),
      consistency_pct: clamp_pct(n / expected * 100.0),
      recent,
      date_span_days: span,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Trend Series
/// ---------------------------------------------------------------------------

#[derive(Default)]
struct Bucket {
  sessions: u32,
  duration: u32,
  distance: f64,
  intensity_sum: f64,
}

impl Bucket {
  fn add(&mut self, s: &TrainingSession) {
    self.sessions += 1;
    self.duration = self.duration.saturating_add(s.duration);
    self.distance += s.distance_km();
    self.intensity_sum += Intensity::of(s).score();
  }

  fn intensity_score(&self) -> f64 {
    ratio(self.intensity_sum, self.sessions as f64)
  }
}

pub fn weekly_trends(active: &[&TrainingSession]) -> Vec<WeeklyTrend> {
  let mut groups: BTreeMap<u8, Bucket> = BTreeMap::new();
  for s in active {
    groups.entry(s.week).or_default().add(s);
  }

  groups
    .into_iter()
    .map(|(week, b)| WeeklyTrend {
      week,
      sessions: b.sessions,
      total_duration: b.duration,
      total_distance: b.distance,
      intensity_score: b.intensity_score(),
    })
    .collect()
}

pub fn monthly_trends(active: &[&TrainingSession]) -> Vec<MonthlyTrend> {
  let mut groups: BTreeMap<(i32, u32), Bucket> = BTreeMap::new();
  for s in active {
    let date = s.calendar_date();
    groups.entry((date.year(), date.month())).or_default().add(s);
  }

  groups
    .into_iter()
    .map(|((year, month), b)| MonthlyTrend {
      month: format!("{:04}-{:02}", year, month),
      sessions: b.sessions,
      total_duration: b.duration,
      total_distance: b.distance,
      intensity_score: b.intensity_score(),
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Personal Bests
/// ---------------------------------------------------------------------------

/// Fastest session per canonical distance band, recomputed from the log
pub fn personal_bests(active: &[&TrainingSession]) -> Vec<PersonalBest> {
  PERSONAL_BEST_TARGETS
    .iter()
    .filter_map(|&(label, sport, target, tolerance)| {
      let best = active
        .iter()
        .copied()
        .filter(|s| s.sport() == Some(sport) && !s.is_interval() && s.duration > 0)
        .filter(|s| s.distance.is_some_and(|d| (d - target).abs() <= tolerance))
        .fold(None::<&TrainingSession>, |best, s| match best {
          Some(b) if b.duration <= s.duration => Some(b),
          _ => Some(s),
        })?;

      let distance = best.distance_km();
      Some(PersonalBest {
        exercise: label.to_string(),
        sport,
        distance,
        time: best.duration,
        pace: describe_pace(sport, distance, best.duration),
        date: best.calendar_date(),
      })
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Helpers
/// ---------------------------------------------------------------------------

/// Compare the mean of the last three values with the three before them
pub fn classify_trend(values: &[f64]) -> Trend {
  if values.len() < TREND_WINDOW + 1 {
    return Trend::Stable;
  }

  let split = values.len() - TREND_WINDOW;
  let recent = mean(&values[split..]);
  let previous = mean(&values[split.saturating_sub(TREND_WINDOW)..split]);

  if previous <= 0.0 {
    return Trend::Stable;
  }

  let change = (recent - previous) / previous;
  if change > TREND_THRESHOLD {
    Trend::Improving
  } else if change < -TREND_THRESHOLD {
    Trend::Declining
  } else {
    Trend::Stable
  }
}

/// Minutes per unit as `m:ss`
pub fn format_pace(minutes_per_unit: f64) -> String {
  let secs = if minutes_per_unit.is_finite() && minutes_per_unit > 0.0 {
    (minutes_per_unit * 60.0).round() as u64
  } else {
    0
  };
  format!("{}:{:02}", secs / 60, secs % 60)
}

fn describe_pace(sport: Sport, distance_km: f64, minutes: u32) -> String {
  match sport {
    Sport::Running => format!("{} /km", format_pace(ratio(minutes as f64, distance_km))),
    Sport::Swimming => format!("{} /100m", format_pace(ratio(minutes as f64, distance_km * 10.0))),
    Sport::Cycling => format!("{:.1} km/h", speed_kmh(distance_km, minutes)),
  }
}

fn speed_kmh(distance_km: f64, minutes: u32) -> f64 {
  ratio(distance_km, minutes as f64 / 60.0)
}

fn best_time_threshold_km(sport: Sport) -> f64 {
  match sport {
    Sport::Running => 5.0,
    Sport::Cycling => 20.0,
    Sport::Swimming => 1.0,
  }
}

fn date_span_days(active: &[&TrainingSession]) -> i64 {
  let dates = active.iter().map(|s| s.calendar_date());
  match (dates.clone().min(), dates.max()) {
    (Some(oldest), Some(newest)) => (newest - oldest).num_days(),
    _ => 0,
  }
}

/// Sum of minutes or calories; saturates instead of wrapping
pub(crate) fn total(values: impl IntoIterator<Item = u32>) -> u32 {
  values.into_iter().fold(0, u32::saturating_add)
}

fn first_max<T>(items: impl Iterator<Item = (T, u32)>) -> Option<T> {
  let mut best: Option<(T, u32)> = None;
  for (item, n) in items {
    if n > 0 && best.as_ref().map_or(true, |(_, top)| n > *top) {
      best = Some((item, n));
    }
  }
  best.map(|(item, _)| item)
}

fn mean(values: &[f64]) -> f64 {
  ratio(values.iter().sum(), values.len() as f64)
}

/// Division that yields 0 instead of NaN/inf
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
  if denominator > 0.0 {
    numerator / denominator
  } else {
    0.0
  }
}

pub(crate) fn clamp_pct(value: f64) -> f64 {
  if value.is_finite() {
    value.clamp(0.0, 100.0)
  } else {
    0.0
  }
}
