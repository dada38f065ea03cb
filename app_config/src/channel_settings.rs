/// Per-channel options from the `channels` map of the config file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
  /// When false, chat messages containing a link are not stored for this channel.
  pub store_urls: bool,
}

impl Default for ChannelSettings {
  fn default() -> Self {
    Self { store_urls: true }
  }
}
