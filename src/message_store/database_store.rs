use super::MessageStore;
use crate::errors::StoreError;
use crate::irc_chat::ChatMessage;
use entities::chat_message;
use sea_orm::*;

/// Inserts every message as a row of the `chat_message` table.
#[derive(Debug)]
pub struct DatabaseMessageStore {
  database_connection: DatabaseConnection,
}

impl DatabaseMessageStore {
  pub fn new(database_connection: DatabaseConnection) -> Self {
    Self {
      database_connection,
    }
  }
}

impl MessageStore for DatabaseMessageStore {
  async fn store(&self, message: &ChatMessage) -> Result<(), StoreError> {
    chat_message::Entity::insert(message.to_active_model())
      .exec(&self.database_connection)
      .await?;

    Ok(())
  }
}
