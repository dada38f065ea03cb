use crate::channel::TrackedChannels;
use crate::errors::{AppError, StoreError};
use crate::irc_chat::message_parser::{parse_line, ParsedLine, UnparsedReason};
use crate::irc_chat::RawLine;
use crate::message_store::MessageStore;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

/// What happened to a single raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
  Stored,
  /// The line contained the bot marker and was never parsed.
  ExcludedBot,
  /// The line wasn't a chat delivery, or was a malformed one.
  Unparsed,
  /// The message had a link and its channel doesn't keep them.
  LinkNotRetained,
}

/// Drains the raw line queue, storing every chat message in arrival order.
pub struct MessageConsumer<S> {
  message_store: S,
  tracked_channels: TrackedChannels,
  bot_marker: String,
  store_raw_lines: bool,
}

impl<S: MessageStore> MessageConsumer<S> {
  pub fn new(
    message_store: S,
    tracked_channels: TrackedChannels,
    bot_marker: impl Into<String>,
    store_raw_lines: bool,
  ) -> Self {
    Self {
      message_store,
      tracked_channels,
      bot_marker: bot_marker.into(),
      store_raw_lines,
    }
  }

  /// Runs until the queue is closed, or until the store fails permanently.
  ///
  /// Transient store failures are logged and that message is dropped. Nothing is retried.
  pub async fn run(&self, raw_line_queue: mpsc::Receiver<RawLine>) -> Result<(), AppError> {
    let mut raw_lines = ReceiverStream::new(raw_line_queue);

    while let Some(raw_line) = raw_lines.next().await {
      match self.process_line(raw_line).await {
        Ok(outcome) => tracing::trace!("Line outcome: {:?}", outcome),
        Err(error) if error.is_transient() => {
          tracing::error!("Dropped a chat message. Reason: {}", error);
        }
        Err(error) => return Err(error.into()),
      }
    }

    tracing::info!("The raw line queue was closed.");

    Ok(())
  }

  pub async fn process_line(&self, raw_line: RawLine) -> Result<LineOutcome, StoreError> {
    if !self.bot_marker.is_empty() && raw_line.line.contains(&self.bot_marker) {
      return Ok(LineOutcome::ExcludedBot);
    }

    let mut message = match parse_line(&raw_line) {
      ParsedLine::ChatDelivery(message) => message,
      ParsedLine::Unparsed {
        reason: UnparsedReason::NotChatDelivery,
        ..
      } => {
        tracing::debug!("Not a chat message: {:?}", raw_line.line);

        return Ok(LineOutcome::Unparsed);
      }
      ParsedLine::Unparsed {
        reason: UnparsedReason::Malformed(error),
        ..
      } => {
        tracing::warn!(
          "Failed to parse a chat message. Reason: {}. Line: {:?}",
          error,
          raw_line.line
        );

        return Ok(LineOutcome::Unparsed);
      }
    };

    let store_urls = match self.tracked_channels.get_channel(&message.channel_name) {
      Some(channel_settings) => channel_settings.store_urls,
      None => {
        tracing::debug!(
          "Got a message from an untracked channel: {:?}",
          message.channel_name
        );

        true
      }
    };

    if message.has_link && !store_urls {
      return Ok(LineOutcome::LinkNotRetained);
    }

    if self.store_raw_lines {
      message.raw_line = Some(raw_line.line);
    }

    self.message_store.store(&message).await?;

    Ok(LineOutcome::Stored)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::errors::StoreErrorKind;
  use crate::testing_helper_methods::{timestamp_from_string, RecordingMessageStore};
  use app_config::ChannelSettings;
  use sea_orm::DbErr;
  use std::collections::HashMap;

  fn consumer(store_raw_lines: bool) -> (MessageConsumer<RecordingMessageStore>, RecordingMessageStore) {
    let channels = HashMap::from([
      ("test".to_string(), ChannelSettings::default()),
      ("nolinks".to_string(), ChannelSettings { store_urls: false }),
    ]);
    let message_store = RecordingMessageStore::default();
    let consumer = MessageConsumer::new(
      message_store.clone(),
      TrackedChannels::new(&channels),
      "_bot",
      store_raw_lines,
    );

    (consumer, message_store)
  }

  fn raw(line: &str) -> RawLine {
    RawLine::with_timestamp(line, timestamp_from_string("1740956922774"))
  }

  #[tokio::test]
  async fn bot_lines_never_reach_the_store() {
    let (consumer, message_store) = consumer(false);

    for line in [
      ":nightbot_bot!nightbot_bot@nightbot_bot.tmi.twitch.tv PRIVMSG #test :Follow the channel!",
      ":stream_bot!stream_bot@stream_bot.tmi.twitch.tv PRIVMSG #test :hi",
      ":viewer!viewer@viewer.tmi.twitch.tv PRIVMSG #test :who made this_bot?",
    ] {
      let outcome = consumer.process_line(raw(line)).await.unwrap();

      assert_eq!(outcome, LineOutcome::ExcludedBot, "line: {line:?}");
    }

    assert!(message_store.stored_messages().is_empty());
  }

  #[tokio::test]
  async fn bot_marker_must_appear_exactly() {
    let (consumer, message_store) = consumer(false);

    for line in [
      ":moobot!moobot@moobot.tmi.twitch.tv PRIVMSG #test :Follow the channel!",
      ":streambot!streambot@streambot.tmi.twitch.tv PRIVMSG #test :_Bot here",
    ] {
      let outcome = consumer.process_line(raw(line)).await.unwrap();

      assert_eq!(outcome, LineOutcome::Stored, "line: {line:?}");
    }

    let authors: Vec<String> = message_store
      .stored_messages()
      .into_iter()
      .map(|message| message.author)
      .collect();

    assert_eq!(authors, vec!["moobot", "streambot"]);
  }

  #[tokio::test]
  async fn non_chat_lines_are_not_stored() {
    let (consumer, message_store) = consumer(false);

    let welcome = consumer
      .process_line(raw(":tmi.twitch.tv 001 ingest :Welcome, GLHF!"))
      .await
      .unwrap();
    let malformed = consumer
      .process_line(raw(":a!a@a.tmi.twitch.tv PRIVMSG #test"))
      .await
      .unwrap();

    assert_eq!(welcome, LineOutcome::Unparsed);
    assert_eq!(malformed, LineOutcome::Unparsed);
    assert!(message_store.stored_messages().is_empty());
  }

  #[tokio::test]
  async fn links_are_dropped_for_channels_that_do_not_keep_them() {
    let (consumer, message_store) = consumer(false);

    let linked = consumer
      .process_line(raw(":a!a@a.tmi.twitch.tv PRIVMSG #nolinks :http://spam.example"))
      .await
      .unwrap();
    let plain = consumer
      .process_line(raw(":a!a@a.tmi.twitch.tv PRIVMSG #nolinks :just text"))
      .await
      .unwrap();
    let kept = consumer
      .process_line(raw(":a!a@a.tmi.twitch.tv PRIVMSG #test :http://clip.example"))
      .await
      .unwrap();

    assert_eq!(linked, LineOutcome::LinkNotRetained);
    assert_eq!(plain, LineOutcome::Stored);
    assert_eq!(kept, LineOutcome::Stored);

    let bodies: Vec<String> = message_store
      .stored_messages()
      .into_iter()
      .map(|message| message.body)
      .collect();

    assert_eq!(bodies, vec!["just text", "http://clip.example"]);
  }

  #[tokio::test]
  async fn raw_lines_are_kept_only_when_configured() {
    let line = ":a!a@a.tmi.twitch.tv PRIVMSG #test :hello";

    let (without_raw, without_raw_store) = consumer(false);
    let (with_raw, with_raw_store) = consumer(true);

    without_raw.process_line(raw(line)).await.unwrap();
    with_raw.process_line(raw(line)).await.unwrap();

    assert_eq!(without_raw_store.stored_messages()[0].raw_line, None);
    assert_eq!(
      with_raw_store.stored_messages()[0].raw_line.as_deref(),
      Some(line)
    );
  }

  #[tokio::test]
  async fn messages_are_stored_in_queue_order() {
    let (consumer, message_store) = consumer(false);
    let (sender, receiver) = mpsc::channel(3);

    let producer = tokio::spawn(async move {
      for index in 0..20 {
        let line = format!(":user{index}!u@u.tmi.twitch.tv PRIVMSG #test :message {index}");

        sender.send(raw(&line)).await.unwrap();
      }
    });

    consumer.run(receiver).await.unwrap();
    producer.await.unwrap();

    let authors: Vec<String> = message_store
      .stored_messages()
      .into_iter()
      .map(|message| message.author)
      .collect();
    let expected_authors: Vec<String> = (0..20).map(|index| format!("user{index}")).collect();

    assert_eq!(authors, expected_authors);
  }

  #[tokio::test]
  async fn transient_store_failures_skip_the_message() {
    let (consumer, message_store) = consumer(false);
    let (sender, receiver) = mpsc::channel(3);

    message_store.fail_next_with(StoreError::transient(DbErr::Custom("timed out".into())));

    sender
      .send(raw(":a!a@a.tmi.twitch.tv PRIVMSG #test :lost"))
      .await
      .unwrap();
    sender
      .send(raw(":a!a@a.tmi.twitch.tv PRIVMSG #test :kept"))
      .await
      .unwrap();
    drop(sender);

    consumer.run(receiver).await.unwrap();

    let stored_messages = message_store.stored_messages();

    assert_eq!(stored_messages.len(), 1);
    assert_eq!(stored_messages[0].body, "kept");
  }

  #[tokio::test]
  async fn permanent_store_failure_stops_the_consumer() {
    let (consumer, message_store) = consumer(false);
    let (sender, receiver) = mpsc::channel(3);

    message_store.fail_next_with(StoreError::permanent(DbErr::Custom("no such table".into())));

    sender
      .send(raw(":a!a@a.tmi.twitch.tv PRIVMSG #test :first"))
      .await
      .unwrap();
    sender
      .send(raw(":a!a@a.tmi.twitch.tv PRIVMSG #test :second"))
      .await
      .unwrap();

    let error = consumer.run(receiver).await.unwrap_err();

    assert!(matches!(
      error,
      AppError::MessageStoreError(ref store_error) if store_error.kind() == StoreErrorKind::Permanent
    ));
    assert!(message_store.stored_messages().is_empty());
  }
}
