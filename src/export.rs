//! Export renderings of a computed report
//!
//! Two formats leave the crate: a human-readable text report with a fixed
//! section order, and JSON that parses back into an identical
//! `PerformanceMetrics`.

use crate::analysis::{PerformanceMetrics, SportMetrics, WEEKDAY_NAMES};
use crate::error::ReportError;

/// Section headings, in output order
pub const TEXT_SECTIONS: [&str; 11] = [
  "BASICS",
  "SPORTS",
  "STRENGTH",
  "WELLNESS",
  "MULTI-WORKOUT DAYS",
  "PERSONAL BESTS",
  "TRAINING HABITS",
  "WEEKLY TRENDS",
  "8-WEEK PLAN",
  "DEVIATIONS",
  "DATA QUALITY",
];

/// ---------------------------------------------------------------------------
/// JSON
/// ---------------------------------------------------------------------------

pub fn render_json(metrics: &PerformanceMetrics) -> Result<String, ReportError> {
  Ok(serde_json::to_string_pretty(metrics)?)
}

pub fn parse_json(json: &str) -> Result<PerformanceMetrics, ReportError> {
  Ok(serde_json::from_str(json)?)
}

/// ---------------------------------------------------------------------------
/// Text
/// ---------------------------------------------------------------------------

pub fn render_text(m: &PerformanceMetrics) -> String {
  let mut out = vec![
    "TRAINING PERFORMANCE REPORT".to_string(),
    format!("Generated: {}", m.generated_at.format("%Y-%m-%d %H:%M UTC")),
  ];

  for (idx, title) in TEXT_SECTIONS.iter().enumerate() {
    out.push(String::new());
    out.push(format!("== {} ==", title));
    let body = match idx {
      0 => basics(m),
      1 => sports(m),
      2 => strength(m),
      3 => wellness(m),
      4 => multi_workout(m),
      5 => personal_bests(m),
      6 => habits(m),
      7 => weekly_trends(m),
      8 => plan(m),
      9 => deviations(m),
      _ => data_quality(m),
    };
    out.extend(body);
  }

  out.join("\n") + "\n"
}

fn basics(m: &PerformanceMetrics) -> Vec<String> {
  let o = &m.overall;
  vec![
    format!("Sessions: {}", o.total_sessions),
    format!("Distance: {:.1} km", o.total_distance),
    format!("Duration: {} ({} min)", hours_minutes(o.total_duration), o.total_duration),
    format!("Average duration: {:.0} min", o.average_duration),
    format!("Calories: {} kcal", o.total_calories),
    format!("Streak: {} days (longest {})", o.current_streak, o.longest_streak),
    format!("Points: {}", o.points),
    format!("Badges earned: {}", o.badges_earned),
    format!("Stored records: {}", o.stored_records),
  ]
}

fn sports(m: &PerformanceMetrics) -> Vec<String> {
  vec![
    sport_line("Running", &m.running, "min/km"),
    sport_line("Cycling", &m.cycling, ""),
    sport_line("Swimming", &m.swimming, "min/100m"),
  ]
}

fn sport_line(name: &str, s: &SportMetrics, pace_unit: &str) -> String {
  if s.sessions == 0 {
    return format!("{}: no sessions", name);
  }

  let mut parts = vec![
    format!("{} sessions", s.sessions),
    format!("{:.1} km", s.total_distance),
    format!("{} min", s.total_duration),
  ];
  if let Some(pace) = &s.average_pace {
    parts.push(format!("pace {} {}", pace, pace_unit));
  }
  if let Some(speed) = s.average_speed {
    parts.push(format!("speed {:.1} km/h", speed));
  }
  parts.push(format!("longest {:.1} km", s.best_distance));
  if let Some(best) = s.best_time {
    parts.push(format!("best time {} min", best));
  }
  parts.push(format!("trend {}", s.trend.as_str()));
  parts.push(format!("{:.1}/week", s.weekly_average));
  parts.push(format!("{} kcal", s.total_calories));

  format!("{}: {}", name, parts.join(", "))
}

fn strength(m: &PerformanceMetrics) -> Vec<String> {
  let s = &m.strength;
  if s.sessions == 0 {
    return vec!["No strength sessions".to_string()];
  }
  vec![
    format!("Sessions: {} ({:.1}/week)", s.sessions, s.weekly_average),
    format!("Duration: {} min (avg {:.0} min)", s.total_duration, s.average_duration),
    format!("Volume trend: {}", s.volume_trend.as_str()),
    format!("Calories: {} kcal", s.total_calories),
  ]
}

fn wellness(m: &PerformanceMetrics) -> Vec<String> {
  let w = &m.wellness;
  vec![
    format!("Mobility: {} sessions, {} min", w.mobility_sessions, w.mobility_minutes),
    format!("Recovery: {} sessions, {} min", w.recovery_sessions, w.recovery_minutes),
    format!("Rest days: {}", w.rest_days),
    format!("Recovery share: {:.0}% ({})", w.recovery_ratio_pct, w.status.as_str()),
  ]
}

fn multi_workout(m: &PerformanceMetrics) -> Vec<String> {
  let mw = &m.multi_workout;
  let i = &m.intensity_distribution;
  vec![
    format!("Multi-workout days: {}", mw.multi_workout_days),
    format!("Active days: {}", mw.active_days),
    format!("Sessions per active day: {:.2}", mw.average_sessions_per_day),
    format!("Most sessions in one day: {}", mw.max_sessions_per_day),
    format!(
      "Intensity: low {:.0}%, moderate {:.0}%, high {:.0}%, very high {:.0}%",
      i.low_pct, i.moderate_pct, i.high_pct, i.very_high_pct
    ),
  ]
}

fn personal_bests(m: &PerformanceMetrics) -> Vec<String> {
  if m.personal_bests.is_empty() {
    return vec!["None yet".to_string()];
  }
  m.personal_bests
    .iter()
    .map(|pb| {
      format!(
        "{}: {} min ({:.2} km, {}) on {}",
        pb.exercise, pb.time, pb.distance, pb.pace, pb.date
      )
    })
    .collect()
}

fn habits(m: &PerformanceMetrics) -> Vec<String> {
  let p = &m.patterns;
  let weekdays: Vec<String> = WEEKDAY_NAMES
    .iter()
    .zip(p.weekday_sessions.iter())
    .map(|(name, n)| format!("{} {}", &name[..3], n))
    .collect();

  vec![
    format!(
      "Morning {}, afternoon {}, evening {}, night {}",
      p.morning, p.afternoon, p.evening, p.night
    ),
    format!(
      "Preferred time: {}",
      p.preferred_time.map_or("n/a", |t| t.as_str())
    ),
    format!("Weekdays: {}", weekdays.join(", ")),
    format!("Most active day: {}", p.most_active_day.as_deref().unwrap_or("n/a")),
  ]
}

fn weekly_trends(m: &PerformanceMetrics) -> Vec<String> {
  if m.weekly_trends.is_empty() {
    return vec!["No completed weeks".to_string()];
  }
  m.weekly_trends
    .iter()
    .map(|w| {
      format!(
        "Week {}: {} sessions, {} min, {:.1} km, intensity {:.1}",
        w.week, w.sessions, w.total_duration, w.total_distance, w.intensity_score
      )
    })
    .collect()
}

fn plan(m: &PerformanceMetrics) -> Vec<String> {
  let p = &m.plan_adherence;
  let mut lines = vec![format!(
    "Adherence: {:.0}% ({}/{} planned sessions), current week {}",
    p.adherence_pct, p.completed_planned, p.total_planned, p.current_week
  )];

  for week in &p.weeks {
    lines.push(format!(
      "Week {}: {}/{} completed, {} min, {:.1} km",
      week.week, week.completed_sessions, week.planned_sessions, week.total_duration, week.total_distance
    ));
    for s in &week.sessions {
      let distance = s.distance.map(|d| format!(", {:.1} km", d)).unwrap_or_default();
      lines.push(format!(
        "  [{}] Day {} - {} ({}, {} min{}){}",
        if s.completed { "x" } else { " " },
        s.day,
        s.title,
        s.focus,
        s.duration,
        distance,
        if s.additional { " +extra" } else { "" }
      ));
    }
  }

  if !p.upcoming.is_empty() {
    lines.push("Upcoming:".to_string());
    for u in &p.upcoming {
      lines.push(format!("  Week {} day {} - {} ({} min)", u.week, u.day, u.title, u.duration));
    }
  }

  lines
}

fn deviations(m: &PerformanceMetrics) -> Vec<String> {
  let devs = &m.plan_adherence.deviations;
  if devs.is_empty() {
    return vec!["None".to_string()];
  }
  devs
    .iter()
    .map(|d| format!("[{}] {}: {} - {}", d.impact.as_str(), d.kind.as_str(), d.title, d.description))
    .collect()
}

fn data_quality(m: &PerformanceMetrics) -> Vec<String> {
  let q = &m.data_quality;
  vec![
    format!("Completeness: {:.0}%", q.completeness_pct),
    format!("Consistency: {:.0}%", q.consistency_pct),
    format!("Recent data: {}", if q.recent { "yes" } else { "no" }),
    format!("Date span: {} days", q.date_span_days),
  ]
}

fn hours_minutes(minutes: u32) -> String {
  format!("{}:{:02} h", minutes / 60, minutes % 60)
}
