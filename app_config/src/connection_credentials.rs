use crate::secret_string::Secret;

/// Everything needed to open and authenticate the chat connection.
#[derive(Debug, Clone)]
pub struct ConnectionCredentials {
  pub host: String,
  pub port: u16,
  pub username: String,
  pub access_token: Secret,
}

impl ConnectionCredentials {
  pub fn address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}
