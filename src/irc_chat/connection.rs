use crate::errors::AppError;
use crate::irc_chat::command_writer::CommandWriter;
use crate::irc_chat::line_reader::LineReader;
use crate::irc_chat::outgoing_command::OutgoingCommand;
use app_config::ConnectionCredentials;
use tokio::io::{AsyncWrite, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

pub type TwitchLineReader = LineReader<BufReader<OwnedReadHalf>>;
pub type TwitchCommandWriter = CommandWriter<OwnedWriteHalf>;

/// Opens the chat connection and authenticates with the given credentials.
///
/// There is no retry. A failure here is a startup failure.
pub async fn connect(
  credentials: &ConnectionCredentials,
) -> Result<(TwitchLineReader, TwitchCommandWriter), AppError> {
  let address = credentials.address();

  tracing::info!("Connecting to {}.", address);

  let stream = TcpStream::connect(&address)
    .await
    .map_err(|source| AppError::FailedToConnect {
      address: address.clone(),
      source,
    })?;
  let (read_half, write_half) = stream.into_split();
  let command_writer = CommandWriter::new(write_half);

  authenticate(&command_writer, credentials).await?;

  tracing::info!("Connected to {} as {}.", address, credentials.username);

  Ok((LineReader::new(BufReader::new(read_half)), command_writer))
}

/// Sends USER, PASS and NICK, in that order.
pub async fn authenticate<W>(
  command_writer: &CommandWriter<W>,
  credentials: &ConnectionCredentials,
) -> Result<(), AppError>
where
  W: AsyncWrite + Unpin + Send,
{
  let username = credentials.username.as_str();
  let handshake = [
    OutgoingCommand::User { username },
    OutgoingCommand::Pass {
      access_token: &credentials.access_token,
    },
    OutgoingCommand::Nick { username },
  ];

  for command in &handshake {
    command_writer
      .send(command)
      .await
      .map_err(AppError::HandshakeFailed)?;
  }

  Ok(())
}
