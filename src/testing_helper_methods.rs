use crate::errors::StoreError;
use crate::irc_chat::ChatMessage;
use crate::message_store::MessageStore;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub fn timestamp_from_string(value: &str) -> DateTime<Utc> {
  let timestamp = value.trim().parse::<i64>().unwrap();

  chrono::Utc.timestamp_millis_opt(timestamp).unwrap()
}

/// Keeps every stored message in memory.
///
/// Failures queued with [`fail_next_with`](Self::fail_next_with) are returned
/// by the next calls to `store` instead of storing.
#[derive(Debug, Clone, Default)]
pub struct RecordingMessageStore {
  stored_messages: Arc<Mutex<Vec<ChatMessage>>>,
  queued_failures: Arc<Mutex<VecDeque<StoreError>>>,
}

impl RecordingMessageStore {
  pub fn stored_messages(&self) -> Vec<ChatMessage> {
    self.stored_messages.lock().unwrap().clone()
  }

  pub fn fail_next_with(&self, error: StoreError) {
    self.queued_failures.lock().unwrap().push_back(error);
  }
}

impl MessageStore for RecordingMessageStore {
  async fn store(&self, message: &ChatMessage) -> Result<(), StoreError> {
    if let Some(error) = self.queued_failures.lock().unwrap().pop_front() {
      return Err(error);
    }

    self.stored_messages.lock().unwrap().push(message.clone());

    Ok(())
  }
}
