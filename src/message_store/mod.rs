use crate::errors::StoreError;
use crate::irc_chat::ChatMessage;

pub mod database_store;

pub use database_store::DatabaseMessageStore;

/// Where parsed chat messages are persisted.
pub trait MessageStore {
  async fn store(&self, message: &ChatMessage) -> Result<(), StoreError>;
}
