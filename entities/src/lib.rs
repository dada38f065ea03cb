//! `SeaORM` Entity definitions.

pub mod prelude;

pub mod chat_message;
