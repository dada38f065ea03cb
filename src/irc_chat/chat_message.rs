use chrono::{DateTime, Utc};
use entities::chat_message;
use sea_orm::ActiveValue::{NotSet, Set};

/// Any body containing this is flagged as having a link.
pub const LINK_MARKER: &str = "http";

/// A chat message extracted from a PRIVMSG line.
///
/// `author`, `channel_name` and `body` are either all filled in or all empty.
/// Empty ones come from lines that weren't chat deliveries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
  /// When the line was read from the connection.
  pub received_at: DateTime<Utc>,
  pub author: String,
  pub channel_name: String,
  pub body: String,
  pub has_link: bool,
  pub raw_line: Option<String>,
}

impl ChatMessage {
  pub fn new(
    received_at: DateTime<Utc>,
    author: impl Into<String>,
    channel_name: impl Into<String>,
    body: impl Into<String>,
  ) -> Self {
    let body = body.into();

    Self {
      received_at,
      author: author.into(),
      channel_name: channel_name.into(),
      has_link: body_has_link(&body),
      body,
      raw_line: None,
    }
  }

  /// A message with no chat contents, for lines that couldn't be parsed.
  pub fn empty(received_at: DateTime<Utc>) -> Self {
    Self {
      received_at,
      author: String::new(),
      channel_name: String::new(),
      body: String::new(),
      has_link: false,
      raw_line: None,
    }
  }

  pub fn is_chat_delivery(&self) -> bool {
    !self.author.is_empty() && !self.channel_name.is_empty()
  }

  /// Rebuilds a PRIVMSG line in the form Twitch delivers them.
  pub fn to_delivery_line(&self) -> String {
    format!(
      ":{author}!{author}@{author}.tmi.twitch.tv PRIVMSG #{} :{}",
      self.channel_name,
      self.body,
      author = self.author
    )
  }

  pub fn to_active_model(&self) -> chat_message::ActiveModel {
    chat_message::ActiveModel {
      id: NotSet,
      received_at: Set(self.received_at),
      author: Set(self.author.clone()),
      channel_name: Set(self.channel_name.clone()),
      body: Set(self.body.clone()),
      has_link: Set(self.has_link),
      raw_line: Set(self.raw_line.clone()),
    }
  }
}

pub fn body_has_link(body: &str) -> bool {
  body.contains(LINK_MARKER)
}
