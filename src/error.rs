use thiserror::Error;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

/// Why a raw session record was rejected at ingestion
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
  #[error("Session {id}: unknown activity type '{value}'")]
  UnknownKind { id: String, value: String },

  #[error("Session {id}: unknown sub-type '{value}'")]
  UnknownSubKind { id: String, value: String },

  #[error("Session {id}: sub-type '{sub_kind}' does not apply to '{kind}'")]
  InvalidPair {
    id: String,
    kind: String,
    sub_kind: String,
  },

  #[error("Session {id}: {field} {value} out of range {min}..={max}")]
  OutOfRange {
    id: String,
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
  },

  #[error("Session {id}: invalid date '{value}'")]
  InvalidDate { id: String, value: String },

  #[error("Session {id}: {field} is not a valid number: {value}")]
  InvalidNumber {
    id: String,
    field: &'static str,
    value: String,
  },

  #[error("Session {id}: missing {field}")]
  Missing { id: String, field: &'static str },

  #[error("Session {id}: {field} must not be negative")]
  Negative { id: String, field: &'static str },
}

#[derive(Error, Debug)]
pub enum ReportError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  /// Every record in a non-empty sessions file was rejected
  #[error("No usable sessions (first rejection: {0})")]
  Ingest(#[from] IngestError),
}

pub type ReportResult<T> = Result<T, ReportError>;
