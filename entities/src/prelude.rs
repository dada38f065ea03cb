pub use super::chat_message::Entity as ChatMessage;
