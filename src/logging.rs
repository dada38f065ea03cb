use app_config::{log_level_wrapper::LoggingConfigLevel, AppConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SEA_ORM_LOG_LEVEL: LoggingConfigLevel = LoggingConfigLevel::Warn;

pub fn setup_logging_config(
  config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  let Some(log_level) = config.log_level() else {
    println!("Logging is disabled.");

    return Ok(());
  };

  let env_filter = EnvFilter::new(filter_directives(log_level));

  let subscriber_builder = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_ansi(false);

  if let Some(logging_dir) = config.logging_dir() {
    println!("Logging to file");

    let filename_prefix = PathBuf::from(config.logging_filename_prefix());
    let logging_file = config.logging_file_roll_appender().clone();

    subscriber_builder
      .with_writer(logging_file.to_file_appender(logging_dir, &filename_prefix)?)
      .try_init()?;
  } else {
    println!("Logging to stdout.");

    subscriber_builder.try_init()?;
  }

  Ok(())
}

fn filter_directives(log_level: LoggingConfigLevel) -> String {
  format!(
    "{},sea_orm={seaorm_level},sea_orm_migration={seaorm_level},sqlx={seaorm_level}",
    log_level,
    seaorm_level = SEA_ORM_LOG_LEVEL
  )
}
