#![allow(async_fn_in_trait)]

pub mod channel;
pub mod errors;
pub mod irc_chat;
pub mod logging;
pub mod message_store;
pub mod processes;
pub mod profiling;
#[cfg(test)]
pub mod testing_helper_methods;
