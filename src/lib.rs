pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod plan;

#[cfg(test)]
mod test_utils;

pub use analysis::{generate_report, PerformanceMetrics, ReportOptions};
pub use config::ReportConfig;
pub use error::{IngestError, ReportError, ReportResult};
pub use models::{TrainingSession, UserStats};

use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

pub const TEXT_EXPORT_FILE: &str = "performance-report.txt";
pub const JSON_EXPORT_FILE: &str = "performance-report.json";

/// Paths of the files written by one report run
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPaths {
  pub text: PathBuf,
  pub json: PathBuf,
}

pub fn run() -> ReportResult<ExportPaths> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  logging::init_logging();

  let config = ReportConfig::from_env()?;
  write_exports(&config)
}

/// Load inputs named by `config`, build the report and write both exports.
/// An empty sessions array yields an empty report; a file in which every
/// record is rejected is an error.
pub fn write_exports(config: &ReportConfig) -> ReportResult<ExportPaths> {
  let raw = fs::read_to_string(&config.sessions_path)?;
  let outcome = ingest::parse_sessions(&raw)?;
  info!(
    accepted = outcome.sessions.len(),
    rejected = outcome.rejected.len(),
    "Loaded sessions from {}",
    config.sessions_path.display()
  );
  if outcome.sessions.is_empty() {
    if let Some(first) = outcome.rejected.first() {
      return Err(first.clone().into());
    }
  }

  let stats = match &config.stats_path {
    Some(path) => {
      let stats: UserStats = serde_json::from_str(&fs::read_to_string(path)?)?;
      info!("Loaded user stats from {}", path.display());
      stats
    }
    None => UserStats::default(),
  };

  let options = ReportOptions {
    now: config.now.unwrap_or_else(Utc::now),
    current_week: config.current_week,
  };
  let report = generate_report(&outcome.sessions, &stats, &options);
  debug!(
    sessions = report.overall.total_sessions,
    adherence = report.plan_adherence.adherence_pct,
    personal_bests = report.personal_bests.len(),
    "Report generated"
  );

  fs::create_dir_all(&config.export_dir)?;
  let paths = ExportPaths {
    text: config.export_dir.join(TEXT_EXPORT_FILE),
    json: config.export_dir.join(JSON_EXPORT_FILE),
  };
  fs::write(&paths.text, export::render_text(&report))?;
  fs::write(&paths.json, export::render_json(&report)?)?;
  info!("Wrote {} and {}", paths.text.display(), paths.json.display());

  Ok(paths)
}
