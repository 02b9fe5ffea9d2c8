//! 8-week plan adherence
//!
//! Measures how closely the logged sessions follow the training template:
//! - adherence percentage over planned (non-additional) sessions
//! - per-week structure with totals
//! - deviations (missed planned sessions, completed extras)
//! - the next incomplete planned sessions
//!
//! Unlike the rest of the report this works on the full session list,
//! since incomplete sessions are exactly what it is looking for.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{clamp_pct, ratio, total, ReportOptions};
use crate::models::{ActivityKind, TrainingSession};

pub const PLAN_WEEKS: u8 = 8;
const MAX_DEVIATIONS: usize = 10;
const MAX_UPCOMING: usize = 10;

// ---------------------------------------------------------------------------
/// Deviation classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationKind {
    /// Planned session that is overdue and still incomplete
    Missed,
    /// Completed workout that was not part of the template
    Extra,
}

impl DeviationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missed => "missed",
            Self::Extra => "extra",
        }
    }
}

/// Ordered most significant first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

// ---------------------------------------------------------------------------
/// Report structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    #[serde(rename = "type")]
    pub kind: DeviationKind,
    pub session_id: String,
    pub week: u8,
    pub day: u8,
    pub title: String,
    pub activity: ActivityKind,
    pub impact: Impact,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSession {
    pub id: String,
    pub day: u8,
    pub title: String,
    pub activity: ActivityKind,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub completed: bool,
    pub additional: bool,
    pub focus: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWeek {
    pub week: u8,
    pub sessions: Vec<PlanSession>,
    pub planned_sessions: u32,
    pub completed_sessions: u32,
    pub total_duration: u32,
    pub total_distance: f64,
    pub completion_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingSession {
    pub id: String,
    pub week: u8,
    pub day: u8,
    pub title: String,
    pub activity: ActivityKind,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanAdherence {
    pub total_planned: u32,
    pub completed_planned: u32,
    pub adherence_pct: f64,
    pub current_week: u8,
    pub weeks: Vec<PlanWeek>,
    pub deviations: Vec<Deviation>,
    pub upcoming: Vec<UpcomingSession>,
}

impl PlanAdherence {
    pub fn compute(sessions: &[TrainingSession], options: &ReportOptions) -> Self {
        let planned: Vec<&TrainingSession> = sessions.iter().filter(|s| s.is_planned()).collect();
        let total_planned = planned.len() as u32;
        let completed_planned = planned.iter().filter(|s| s.completed).count() as u32;

        let weeks = (1..=PLAN_WEEKS).map(|w| build_week(sessions, w)).collect();
        let deviations = detect_deviations(sessions, options);

        let upcoming: Vec<UpcomingSession> = planned
            .iter()
            .filter(|s| !s.completed)
            .take(MAX_UPCOMING)
            .map(|s| UpcomingSession {
                id: s.id.clone(),
                week: s.week,
                day: s.day,
                title: s.title.clone(),
                activity: s.kind,
                duration: s.duration,
                distance: s.distance,
                date: s.calendar_date(),
            })
            .collect();

        debug!(
            total_planned,
            completed_planned,
            deviations = deviations.len(),
            "computed plan adherence"
        );

        Self {
            total_planned,
            completed_planned,
            adherence_pct: clamp_pct(
                ratio(completed_planned as f64, total_planned as f64) * 100.0,
            ),
            current_week: options.current_week,
            weeks,
            deviations,
            upcoming,
        }
    }
}

fn build_week(sessions: &[TrainingSession], week: u8) -> PlanWeek {
    let mut in_week: Vec<&TrainingSession> = sessions.iter().filter(|s| s.week == week).collect();
    in_week.sort_by_key(|s| s.day);

    let planned_sessions = in_week.iter().filter(|s| s.is_planned()).count() as u32;
    let completed_sessions = in_week
        .iter()
        .filter(|s| s.is_planned() && s.completed)
        .count() as u32;

    PlanWeek {
        week,
        sessions: in_week
            .iter()
            .map(|s| PlanSession {
                id: s.id.clone(),
                day: s.day,
                title: s.title.clone(),
                activity: s.kind,
                duration: s.duration,
                distance: s.distance,
                completed: s.completed,
                additional: s.additional,
                focus: s.kind.focus().to_string(),
            })
            .collect(),
        planned_sessions,
        completed_sessions,
        total_duration: total(in_week.iter().map(|s| s.duration)),
        total_distance: in_week.iter().map(|s| s.distance_km()).sum(),
        completion_pct: clamp_pct(
            ratio(completed_sessions as f64, planned_sessions as f64) * 100.0,
        ),
    }
}

/// A planned session counts as overdue only inside plan week 1, on a day
/// strictly before today's ISO weekday. Later weeks are never overdue.
fn is_overdue(session: &TrainingSession, today_iso: u32) -> bool {
    session.week == 1 && (session.day as u32) < today_iso
}

fn detect_deviations(sessions: &[TrainingSession], options: &ReportOptions) -> Vec<Deviation> {
    let today_iso = options.now.weekday().number_from_monday();

    let mut deviations: Vec<Deviation> = sessions
        .iter()
        .filter_map(|s| {
            if s.is_planned() && !s.completed && is_overdue(s, today_iso) {
                let impact = if s.kind == ActivityKind::Strength {
                    Impact::High
                } else {
                    Impact::Medium
                };
                Some(deviation(s, DeviationKind::Missed, impact))
            } else if s.additional && s.completed && s.week <= options.current_week {
                Some(deviation(s, DeviationKind::Extra, Impact::Low))
            } else {
                None
            }
        })
        .collect();

    // stable: keeps input order within an impact level
    deviations.sort_by_key(|d| d.impact);
    deviations.truncate(MAX_DEVIATIONS);
    deviations
}

fn deviation(s: &TrainingSession, kind: DeviationKind, impact: Impact) -> Deviation {
    let description = match kind {
        DeviationKind::Missed => format!(
            "Planned {} session not completed (week {}, day {})",
            s.kind, s.week, s.day
        ),
        DeviationKind::Extra => format!(
            "Additional {} workout logged (week {}, day {})",
            s.kind, s.week, s.day
        ),
    };

    Deviation {
        kind,
        session_id: s.id.clone(),
        week: s.week,
        day: s.day,
        title: s.title.clone(),
        activity: s.kind,
        impact,
        description,
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
