use crate::errors::AppError;
use crate::irc_chat::command_writer::CommandWriter;
use crate::irc_chat::outgoing_command::OutgoingCommand;
use tokio::io::AsyncWrite;

const PING_COMMAND: &str = "PING";

/// Returns the token to echo back if `line` is a liveness check from the server.
///
/// `PING` with nothing after it has an empty token.
pub fn ping_token(line: &str) -> Option<&str> {
  let arguments = line.strip_prefix(PING_COMMAND)?;

  if arguments.is_empty() {
    return Some("");
  }

  arguments.strip_prefix(' ').map(str::trim)
}

pub async fn answer_ping<W>(command_writer: &CommandWriter<W>, token: &str) -> Result<(), AppError>
where
  W: AsyncWrite + Unpin + Send,
{
  tracing::debug!("Answering PING with token {:?}.", token);

  command_writer
    .send(&OutgoingCommand::Pong { token })
    .await
    .map_err(AppError::ConnectionWriteFailed)
}
