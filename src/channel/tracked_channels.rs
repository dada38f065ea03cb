use app_config::ChannelSettings;
use std::collections::HashMap;

/// The channels from the config, keyed by lowercase name without the leading `#`.
#[derive(Debug, Clone, Default)]
pub struct TrackedChannels {
  channels: HashMap<String, ChannelSettings>,
}

impl TrackedChannels {
  pub fn new(channels: &HashMap<String, ChannelSettings>) -> Self {
    let channels = channels
      .iter()
      .map(|(channel_name, settings)| (normalize_channel_name(channel_name), settings.clone()))
      .collect();

    Self { channels }
  }

  pub fn get_channel(&self, channel_name: &str) -> Option<&ChannelSettings> {
    self.channels.get(&normalize_channel_name(channel_name))
  }

  /// Names to join, sorted so the JOIN order is stable.
  pub fn channel_names(&self) -> Vec<String> {
    let mut channel_names: Vec<String> = self.channels.keys().cloned().collect();
    channel_names.sort_unstable();

    channel_names
  }

  pub fn len(&self) -> usize {
    self.channels.len()
  }

  pub fn is_empty(&self) -> bool {
    self.channels.is_empty()
  }
}

fn normalize_channel_name(channel_name: &str) -> String {
  channel_name.trim().trim_start_matches('#').to_lowercase()
}
