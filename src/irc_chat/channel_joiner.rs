use crate::errors::AppError;
use crate::irc_chat::command_writer::CommandWriter;
use crate::irc_chat::keepalive;
use crate::irc_chat::line_reader::LineReader;
use crate::irc_chat::outgoing_command::OutgoingCommand;
use crate::irc_chat::raw_line::RawLine;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::mpsc;

/// Joins every tracked channel on the single chat connection and is the only
/// reader of that connection.
///
/// Lines for all channels arrive interleaved on the same stream, each naming
/// its channel in-band, so one reader feeds the queue for all of them.
pub struct ChannelJoiner<R, W> {
  line_reader: LineReader<R>,
  command_writer: CommandWriter<W>,
  channels: Vec<String>,
}

impl<R, W> ChannelJoiner<R, W>
where
  R: AsyncBufRead + Unpin + Send,
  W: AsyncWrite + Unpin + Send,
{
  pub fn new(
    line_reader: LineReader<R>,
    command_writer: CommandWriter<W>,
    channels: Vec<String>,
  ) -> Self {
    Self {
      line_reader,
      command_writer,
      channels,
    }
  }

  /// Joins the channels, then forwards every line that isn't a PING into the queue.
  ///
  /// PINGs are answered before the next line is read. Sending blocks while the
  /// queue is full, which also delays those answers.
  ///
  /// Only returns when the connection or the queue fails. End of stream is an error,
  /// nothing reconnects.
  pub async fn run(mut self, raw_line_queue: mpsc::Sender<RawLine>) -> Result<(), AppError> {
    join_channels(&self.command_writer, &self.channels).await?;

    loop {
      let line = match self.line_reader.next_line().await {
        Ok(Some(line)) => line,
        Ok(None) => return Err(AppError::ConnectionClosed),
        Err(error) => return Err(AppError::ConnectionReadFailed(error)),
      };

      if let Some(token) = keepalive::ping_token(&line) {
        keepalive::answer_ping(&self.command_writer, token).await?;

        continue;
      }

      tracing::trace!("Received line: {:?}", line);

      if raw_line_queue.send(RawLine::new(line)).await.is_err() {
        return Err(AppError::QueueClosed);
      }
    }
  }
}

/// Takes the writer alone so the future of `run` doesn't require `R: Sync`.
async fn join_channels<W>(
  command_writer: &CommandWriter<W>,
  channels: &[String],
) -> Result<(), AppError>
where
  W: AsyncWrite + Unpin + Send,
{
  for channel in channels {
    tracing::info!("Joining #{}.", channel);

    command_writer
      .send(&OutgoingCommand::Join { channel })
      .await
      .map_err(AppError::ConnectionWriteFailed)?;
  }

  Ok(())
}
