use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// IRCv3 allows 8191 bytes of tags in front of the 512 byte message.
pub const MAX_LINE_LENGTH: usize = 8191 + 512;
const INITIAL_BUFFER_CAPACITY: usize = 512;

/// Reads CR LF (or bare LF) terminated lines from the read half of the connection.
///
/// Lines are read as bytes and converted lossily, so invalid UTF-8 in a
/// message doesn't stop the reader. Lines longer than [`MAX_LINE_LENGTH`]
/// are discarded.
#[derive(Debug)]
pub struct LineReader<R> {
  reader: R,
  buffer: Vec<u8>,
}

impl<R> LineReader<R>
where
  R: AsyncBufRead + Unpin,
{
  pub fn new(reader: R) -> Self {
    Self {
      reader,
      buffer: Vec::with_capacity(INITIAL_BUFFER_CAPACITY),
    }
  }

  /// Returns the next line without its terminator.
  ///
  /// `None` means the server closed the connection.
  pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
    loop {
      if self.read_capped().await? == 0 {
        return Ok(None);
      }

      if self.buffer.ends_with(b"\n") || self.buffer.len() < MAX_LINE_LENGTH {
        break;
      }

      tracing::warn!(
        "Discarding a line longer than {} bytes. Starts with: {:?}",
        MAX_LINE_LENGTH,
        String::from_utf8_lossy(&self.buffer[..64])
      );

      self.discard_rest_of_line().await?;
      self.buffer.shrink_to(INITIAL_BUFFER_CAPACITY);
    }

    while let Some(b'\n' | b'\r') = self.buffer.last() {
      self.buffer.pop();
    }

    Ok(Some(String::from_utf8_lossy(&self.buffer).into_owned()))
  }

  /// Reads up to the next newline, or [`MAX_LINE_LENGTH`] bytes, into a cleared buffer.
  async fn read_capped(&mut self) -> std::io::Result<usize> {
    self.buffer.clear();

    (&mut self.reader)
      .take(MAX_LINE_LENGTH as u64)
      .read_until(b'\n', &mut self.buffer)
      .await
  }

  async fn discard_rest_of_line(&mut self) -> std::io::Result<()> {
    loop {
      if self.read_capped().await? == 0 || self.buffer.ends_with(b"\n") {
        return Ok(());
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn strips_terminators_and_reports_end_of_stream() {
    let input: &[u8] = b"PING :tmi.twitch.tv\r\n:a!a@a.tmi.twitch.tv PRIVMSG #c :hi\nlast";
    let mut line_reader = LineReader::new(input);

    assert_eq!(
      line_reader.next_line().await.unwrap().as_deref(),
      Some("PING :tmi.twitch.tv")
    );
    assert_eq!(
      line_reader.next_line().await.unwrap().as_deref(),
      Some(":a!a@a.tmi.twitch.tv PRIVMSG #c :hi")
    );
    assert_eq!(line_reader.next_line().await.unwrap().as_deref(), Some("last"));
    assert_eq!(line_reader.next_line().await.unwrap(), None);
  }

  #[tokio::test]
  async fn invalid_utf8_is_replaced_instead_of_failing() {
    let input: &[u8] = b":a!a@a.tmi.twitch.tv PRIVMSG #c :caf\xff\r\n";
    let mut line_reader = LineReader::new(input);

    let line = line_reader.next_line().await.unwrap().unwrap();

    assert_eq!(line, ":a!a@a.tmi.twitch.tv PRIVMSG #c :caf\u{FFFD}");
  }

  #[tokio::test]
  async fn oversized_lines_are_discarded() {
    let mut input = vec![b'a'; MAX_LINE_LENGTH * 2 + 10];
    input.extend_from_slice(b"\r\n:a!a@a.tmi.twitch.tv PRIVMSG #c :hi\r\n");
    let mut line_reader = LineReader::new(input.as_slice());

    assert_eq!(
      line_reader.next_line().await.unwrap().as_deref(),
      Some(":a!a@a.tmi.twitch.tv PRIVMSG #c :hi")
    );
    assert_eq!(line_reader.next_line().await.unwrap(), None);
    assert!(line_reader.buffer.capacity() < MAX_LINE_LENGTH);
  }

  #[tokio::test]
  async fn oversized_line_without_terminator_ends_the_stream() {
    let input = vec![b'a'; MAX_LINE_LENGTH + 1];
    let mut line_reader = LineReader::new(input.as_slice());

    assert_eq!(line_reader.next_line().await.unwrap(), None);
  }

  #[tokio::test]
  async fn line_just_under_the_limit_is_kept() {
    let mut input = vec![b'a'; MAX_LINE_LENGTH - 2];
    input.extend_from_slice(b"\r\n");
    let mut line_reader = LineReader::new(input.as_slice());

    let line = line_reader.next_line().await.unwrap().unwrap();

    assert_eq!(line.len(), MAX_LINE_LENGTH - 2);
  }
}
