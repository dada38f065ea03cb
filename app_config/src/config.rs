use crate::channel_settings::ChannelSettings;
use crate::connection_credentials::ConnectionCredentials;
use crate::log_level_wrapper::*;
use crate::rolling_appender_rotation::*;
use crate::secret_string::Secret;
use anyhow::anyhow;
use schematic::{Config, ConfigLoader};
use std::collections::HashMap;
use std::path::PathBuf;

const CONFIG_PATH_ENV_VAR: &str = "CONFIG_PATH";
const DEFAULT_CONFIG_FILEPATH: &str = "./config/config.yml";

#[derive(Debug, Config, serde::Serialize, serde::Deserialize)]
#[config(rename_all = "snake_case")]
pub struct AppConfig {
  log_level: Option<LoggingConfigLevel>,
  logging_dir: Option<PathBuf>,
  #[setting(default = "")]
  logging_filename_prefix: String,
  #[setting(default = "daily")]
  logging_roll_appender: RollingAppenderRotation,

  #[setting(default = "irc.chat.twitch.tv")]
  twitch_host: String,
  #[setting(default = 6667)]
  twitch_port: u16,
  #[setting(env = "TWITCH_NICKNAME")]
  twitch_nickname: String,
  #[setting(env = "TWITCH_ACCESS_TOKEN")]
  access_token: Secret,
  display_name: Option<String>,

  /// Channel name to the options for that channel.
  channels: HashMap<String, ChannelSettings>,

  /// Any raw line containing this is dropped before parsing.
  #[setting(default = "_bot")]
  bot_marker: String,
  #[setting(default = 3)]
  queue_capacity_per_channel: usize,
  #[setting(default = false)]
  store_raw_lines: bool,

  #[setting(default = "root", env = "DATABASE_USERNAME")]
  database_username: String,
  #[setting(default = "password", env = "DATABASE_PASSWORD")]
  database_password: Secret,
  #[setting(default = "localhost:3306")]
  database_host_address: String,
  #[setting(default = "Channels")]
  database: String,
}

impl AppConfig {
  /// Loads the config from the path in `CONFIG_PATH`, or `./config/config.yml`.
  ///
  /// Environment variables override values from the file.
  pub fn load() -> anyhow::Result<Self> {
    let mut loader = ConfigLoader::<AppConfig>::new();
    loader.file_optional(get_config_path())?;

    Self::from_loader(loader)
  }

  pub(crate) fn from_loader(loader: ConfigLoader<AppConfig>) -> anyhow::Result<Self> {
    let config = loader.load()?.config;
    config.validate_settings()?;

    Ok(config)
  }

  fn validate_settings(&self) -> anyhow::Result<()> {
    if self.twitch_nickname.trim().is_empty() {
      return Err(anyhow!(
        "No Twitch nickname was configured. Set `twitch_nickname` or TWITCH_NICKNAME."
      ));
    }

    if self.access_token.is_empty() {
      return Err(anyhow!(
        "No access token was configured. Set `access_token` or TWITCH_ACCESS_TOKEN."
      ));
    }

    if self.channels.is_empty() {
      return Err(anyhow!("At least one channel must be configured."));
    }

    if let Some(channel_name) = self
      .channels
      .keys()
      .find(|channel_name| channel_name.trim_start_matches('#').trim().is_empty())
    {
      return Err(anyhow!("Invalid channel name: {:?}", channel_name));
    }

    if self.queue_capacity_per_channel == 0 {
      return Err(anyhow!("`queue_capacity_per_channel` must be at least 1."));
    }

    if let RollingAppenderRotation::Unknown(value) = &self.logging_roll_appender {
      return Err(anyhow!(
        "Unknown rolling file appender configuration: {:?}",
        value
      ));
    }

    Ok(())
  }

  pub fn log_level(&self) -> Option<LoggingConfigLevel> {
    self.log_level
  }

  pub fn logging_dir(&self) -> Option<&PathBuf> {
    self.logging_dir.as_ref()
  }

  pub fn logging_filename_prefix(&self) -> &str {
    &self.logging_filename_prefix
  }

  pub fn logging_file_roll_appender(&self) -> &RollingAppenderRotation {
    &self.logging_roll_appender
  }

  pub fn connection_credentials(&self) -> ConnectionCredentials {
    ConnectionCredentials {
      host: self.twitch_host.clone(),
      port: self.twitch_port,
      username: self.twitch_nickname.clone(),
      access_token: self.access_token.clone(),
    }
  }

  pub fn twitch_nickname(&self) -> &str {
    &self.twitch_nickname
  }

  /// Falls back to the nickname when no display name is set.
  pub fn display_name(&self) -> &str {
    self
      .display_name
      .as_deref()
      .unwrap_or(&self.twitch_nickname)
  }

  pub fn channels(&self) -> &HashMap<String, ChannelSettings> {
    &self.channels
  }

  pub fn bot_marker(&self) -> &str {
    &self.bot_marker
  }

  /// Total capacity of the raw line queue. Scales with the amount of joined channels.
  pub fn queue_capacity(&self) -> usize {
    self.queue_capacity_per_channel * self.channels.len().max(1)
  }

  pub fn store_raw_lines(&self) -> bool {
    self.store_raw_lines
  }

  pub fn database_username(&self) -> &str {
    &self.database_username
  }

  pub fn database_password(&self) -> &Secret {
    &self.database_password
  }

  pub fn database_address(&self) -> &str {
    &self.database_host_address
  }

  pub fn database(&self) -> &str {
    &self.database
  }

  /// A config with one channel per entry of `channels`, for use in tests.
  #[cfg(any(test, feature = "__test_hook"))]
  pub fn test_config<S: AsRef<str>>(channels: &[(S, ChannelSettings)]) -> Self {
    Self {
      log_level: None,
      logging_dir: None,
      logging_filename_prefix: String::new(),
      logging_roll_appender: RollingAppenderRotation::Never,
      twitch_host: "127.0.0.1".into(),
      twitch_port: 6667,
      twitch_nickname: "ingest_test".into(),
      access_token: Secret::from("oauth:test"),
      display_name: None,
      channels: channels
        .iter()
        .map(|(name, settings)| (name.as_ref().to_string(), settings.clone()))
        .collect(),
      bot_marker: "_bot".into(),
      queue_capacity_per_channel: 3,
      store_raw_lines: false,
      database_username: "root".into(),
      database_password: Secret::from("password"),
      database_host_address: "localhost:3306".into(),
      database: "Channels".into(),
    }
  }
}

fn get_config_path() -> PathBuf {
  let Ok(config_path) = std::env::var(CONFIG_PATH_ENV_VAR) else {
    return PathBuf::from(DEFAULT_CONFIG_FILEPATH);
  };

  PathBuf::from(config_path)
}
