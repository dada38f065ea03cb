use std::str::FromStr;

#[derive(
  Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LoggingConfigLevel {
  #[default]
  Error,
  Warn,
  Info,
  Debug,
  Trace,
}

impl From<LoggingConfigLevel> for tracing::Level {
  fn from(log_level: LoggingConfigLevel) -> Self {
    match log_level {
      LoggingConfigLevel::Error => tracing::Level::ERROR,
      LoggingConfigLevel::Warn => tracing::Level::WARN,
      LoggingConfigLevel::Info => tracing::Level::INFO,
      LoggingConfigLevel::Debug => tracing::Level::DEBUG,
      LoggingConfigLevel::Trace => tracing::Level::TRACE,
    }
  }
}

impl AsRef<str> for LoggingConfigLevel {
  fn as_ref(&self) -> &str {
    match self {
      LoggingConfigLevel::Error => "error",
      LoggingConfigLevel::Warn => "warn",
      LoggingConfigLevel::Info => "info",
      LoggingConfigLevel::Debug => "debug",
      LoggingConfigLevel::Trace => "trace",
    }
  }
}

/// Used by the `EnvFilter` directive strings, so it has to be the lowercase form.
impl std::fmt::Display for LoggingConfigLevel {
  fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(formatter, "{}", self.as_ref())
  }
}

impl FromStr for LoggingConfigLevel {
  type Err = Box<dyn std::error::Error>;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value.to_lowercase().trim() {
      "error" => Ok(Self::Error),
      "warn" | "warning" => Ok(Self::Warn),
      "info" => Ok(Self::Info),
      "debug" => Ok(Self::Debug),
      "trace" => Ok(Self::Trace),
      _ => Err(format!("Unknown log level: {:?}", value).into()),
    }
  }
}
