use chrono::{DateTime, Utc};

/// A line exactly as it was read from the connection, without the trailing CR LF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
  pub line: String,
  pub received_at: DateTime<Utc>,
}

impl RawLine {
  /// Timestamps the line with the current time.
  pub fn new(line: String) -> Self {
    Self {
      line,
      received_at: Utc::now(),
    }
  }

  pub fn with_timestamp(line: impl Into<String>, received_at: DateTime<Utc>) -> Self {
    Self {
      line: line.into(),
      received_at,
    }
  }
}
