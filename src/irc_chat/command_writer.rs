use crate::irc_chat::outgoing_command::OutgoingCommand;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// The write half of the chat connection.
///
/// Clones share the same writer. Each command is written and flushed while
/// holding the lock so commands never interleave on the wire.
#[derive(Debug)]
pub struct CommandWriter<W> {
  writer: Arc<Mutex<W>>,
}

impl<W> Clone for CommandWriter<W> {
  fn clone(&self) -> Self {
    Self {
      writer: Arc::clone(&self.writer),
    }
  }
}

impl<W> CommandWriter<W>
where
  W: AsyncWrite + Unpin + Send,
{
  pub fn new(writer: W) -> Self {
    Self {
      writer: Arc::new(Mutex::new(writer)),
    }
  }

  pub async fn send(&self, command: &OutgoingCommand<'_>) -> std::io::Result<()> {
    let wire_line = command.to_wire_line();
    let mut writer = self.writer.lock().await;

    writer.write_all(wire_line.as_bytes()).await?;
    writer.flush().await?;

    tracing::debug!("Sent `{}`", command);

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tokio::io::AsyncReadExt;

  #[tokio::test]
  async fn concurrent_commands_are_not_interleaved() {
    let (client, mut server) = tokio::io::duplex(64 * 1024);
    let command_writer = CommandWriter::new(client);
    let channels: Vec<String> = (0..50).map(|index| format!("channel{index}")).collect();

    let handles: Vec<_> = channels
      .iter()
      .cloned()
      .map(|channel| {
        let command_writer = command_writer.clone();

        tokio::spawn(async move {
          command_writer
            .send(&OutgoingCommand::Join { channel: &channel })
            .await
        })
      })
      .collect();

    for handle in handles {
      handle.await.unwrap().unwrap();
    }

    drop(command_writer);

    let mut written = String::new();
    server.read_to_string(&mut written).await.unwrap();

    let mut written_lines: Vec<&str> = written.split_terminator("\r\n").collect();
    written_lines.sort_unstable();

    let mut expected_lines: Vec<String> = channels
      .iter()
      .map(|channel| format!("JOIN #{channel}"))
      .collect();
    expected_lines.sort_unstable();

    assert_eq!(written_lines, expected_lines);
  }
}
