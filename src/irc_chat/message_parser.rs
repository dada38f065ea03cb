use crate::irc_chat::chat_message::ChatMessage;
use crate::irc_chat::raw_line::RawLine;

pub const CHAT_DELIVERY_COMMAND: &str = "PRIVMSG";

/// Separates the sender prefix from the channel name.
const CHANNEL_MARKER: &str = " PRIVMSG #";
/// Separates the channel name from the message body.
const BODY_DELIMITER: &str = " :";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageParseError {
  #[error("Expected ` PRIVMSG #` before the channel name.")]
  MissingChannelMarker,

  #[error("Expected the sender prefix to start with `:`.")]
  MissingPrefixMarker,

  #[error("The sender prefix didn't contain a name.")]
  MissingAuthor,

  #[error("Expected ` :` between the channel name and the message body.")]
  MissingBodyDelimiter,

  #[error("The channel name was empty.")]
  MissingChannelName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnparsedReason {
  /// The line isn't a PRIVMSG. Server notices, membership and numeric replies end up here.
  NotChatDelivery,
  /// The line is a PRIVMSG but is missing a delimiter.
  Malformed(MessageParseError),
}

/// The result of parsing one raw line.
///
/// Unparsed lines still carry a message, with empty chat fields and the receipt time set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
  ChatDelivery(ChatMessage),
  Unparsed {
    message: ChatMessage,
    reason: UnparsedReason,
  },
}

impl ParsedLine {
  pub fn message(&self) -> &ChatMessage {
    match self {
      Self::ChatDelivery(message) => message,
      Self::Unparsed { message, .. } => message,
    }
  }
}

/// Extracts the author, channel and body from a PRIVMSG line.
///
/// Splitting only uses the literal delimiters, the body is kept exactly as received.
/// Never fails: anything that can't be parsed is returned as [`ParsedLine::Unparsed`].
pub fn parse_line(raw_line: &RawLine) -> ParsedLine {
  let line = raw_line.line.as_str();

  if !line.contains(CHAT_DELIVERY_COMMAND) {
    return ParsedLine::Unparsed {
      message: ChatMessage::empty(raw_line.received_at),
      reason: UnparsedReason::NotChatDelivery,
    };
  }

  match split_chat_delivery(line) {
    Ok((author, channel_name, body)) => ParsedLine::ChatDelivery(ChatMessage::new(
      raw_line.received_at,
      author,
      channel_name,
      body,
    )),
    Err(error) => ParsedLine::Unparsed {
      message: ChatMessage::empty(raw_line.received_at),
      reason: UnparsedReason::Malformed(error),
    },
  }
}

/// Returns `(author, channel_name, body)`.
fn split_chat_delivery(line: &str) -> Result<(&str, &str, &str), MessageParseError> {
  let (prefix, target_and_body) = line
    .split_once(CHANNEL_MARKER)
    .ok_or(MessageParseError::MissingChannelMarker)?;
  let author = parse_author(prefix)?;
  let (channel_name, body) = target_and_body
    .split_once(BODY_DELIMITER)
    .ok_or(MessageParseError::MissingBodyDelimiter)?;

  if channel_name.is_empty() {
    return Err(MessageParseError::MissingChannelName);
  }

  Ok((author, channel_name, body))
}

/// The author is the nickname in `:nick!user@host`.
fn parse_author(prefix: &str) -> Result<&str, MessageParseError> {
  // Tagged lines look like `@key=value;key=value :nick!user@host`.
  let prefix = match prefix.strip_prefix('@') {
    Some(tagged_prefix) => tagged_prefix
      .split_once(' ')
      .map(|(_tags, prefix)| prefix)
      .unwrap_or_default(),
    None => prefix,
  };
  let prefix = prefix
    .strip_prefix(':')
    .ok_or(MessageParseError::MissingPrefixMarker)?;
  let author_end = prefix
    .find(|character: char| character == '!' || character == '@')
    .unwrap_or(prefix.len());
  let author = &prefix[..author_end];

  if author.is_empty() {
    return Err(MessageParseError::MissingAuthor);
  }

  Ok(author)
}
