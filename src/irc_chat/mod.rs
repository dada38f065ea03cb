pub mod channel_joiner;
pub mod chat_message;
pub mod command_writer;
pub mod connection;
pub mod keepalive;
pub mod line_reader;
pub mod message_parser;
pub mod outgoing_command;
pub mod raw_line;

pub use channel_joiner::ChannelJoiner;
pub use chat_message::ChatMessage;
pub use command_writer::CommandWriter;
pub use line_reader::LineReader;
pub use message_parser::{parse_line, ParsedLine, UnparsedReason};
pub use raw_line::RawLine;
