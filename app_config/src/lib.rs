pub mod channel_settings;
pub mod clap;
pub mod config;
pub mod connection_credentials;
pub mod log_level_wrapper;
pub mod rolling_appender_rotation;
pub mod secret_string;

pub use crate::channel_settings::ChannelSettings;
pub use crate::clap::CLAP_ARGS;
pub use crate::config::AppConfig;
pub use crate::connection_credentials::ConnectionCredentials;
