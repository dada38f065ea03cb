use app_config::secret_string::Secret;

/// Commands this client writes to the chat server.
#[derive(Debug, Clone, Copy)]
pub enum OutgoingCommand<'a> {
  User { username: &'a str },
  Pass { access_token: &'a Secret },
  Nick { username: &'a str },
  /// `channel` is the bare channel name, without the leading `#`.
  Join { channel: &'a str },
  Pong { token: &'a str },
}

impl OutgoingCommand<'_> {
  /// The CR LF terminated line sent over the connection.
  pub fn to_wire_line(&self) -> String {
    match self {
      Self::User { username } => format!("USER {username} 8 * :{username}\r\n"),
      Self::Pass { access_token } => format!("PASS {}\r\n", access_token.expose()),
      Self::Nick { username } => format!("NICK {username}\r\n"),
      Self::Join { channel } => format!("JOIN #{channel}\r\n"),
      Self::Pong { token } if token.is_empty() => "PONG\r\n".to_string(),
      Self::Pong { token } => format!("PONG {token}\r\n"),
    }
  }
}

/// Log friendly form. The access token is never written.
impl std::fmt::Display for OutgoingCommand<'_> {
  fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Pass { .. } => write!(formatter, "PASS ***"),
      command => write!(formatter, "{}", command.to_wire_line().trim_end()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn handshake_commands_match_the_wire_format() {
    let access_token = Secret::from("oauth:abc123");

    assert_eq!(
      OutgoingCommand::User { username: "ingest" }.to_wire_line(),
      "USER ingest 8 * :ingest\r\n"
    );
    assert_eq!(
      OutgoingCommand::Pass {
        access_token: &access_token
      }
      .to_wire_line(),
      "PASS oauth:abc123\r\n"
    );
    assert_eq!(
      OutgoingCommand::Nick { username: "ingest" }.to_wire_line(),
      "NICK ingest\r\n"
    );
    assert_eq!(
      OutgoingCommand::Join { channel: "gnumme" }.to_wire_line(),
      "JOIN #gnumme\r\n"
    );
  }

  #[test]
  fn pong_without_a_token_is_bare() {
    assert_eq!(OutgoingCommand::Pong { token: "" }.to_wire_line(), "PONG\r\n");
    assert_eq!(
      OutgoingCommand::Pong {
        token: ":tmi.twitch.tv"
      }
      .to_wire_line(),
      "PONG :tmi.twitch.tv\r\n"
    );
  }

  #[test]
  fn displayed_pass_hides_the_token() {
    let access_token = Secret::from("oauth:abc123");
    let command = OutgoingCommand::Pass {
      access_token: &access_token,
    };

    assert_eq!(command.to_string(), "PASS ***");
  }
}
