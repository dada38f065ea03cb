use secrecy::{ExposeSecret, SecretBox, SecretString};
use std::str::FromStr;

/// Wrapper around [`SecretString`](secrecy::SecretString) implementing the traits
/// [`schematic::Config`](schematic::Config) needs for a setting.
///
/// Serializing never writes the real value.
#[derive(Debug, Clone)]
pub struct Secret(SecretString);

impl Secret {
  pub fn new(value: String) -> Self {
    Self(SecretBox::new(value.into_boxed_str()))
  }

  pub fn read_value(&self) -> &SecretString {
    &self.0
  }

  pub fn read_secret_string(secret: &SecretString) -> &str {
    secret.expose_secret()
  }

  pub fn expose(&self) -> &str {
    self.0.expose_secret()
  }

  pub fn is_empty(&self) -> bool {
    self.expose().trim().is_empty()
  }
}

impl serde::Serialize for Secret {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    "Secret: \" ... \"".serialize(serializer)
  }
}

impl<'de> serde::Deserialize<'de> for Secret {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    String::deserialize(deserializer).map(Secret::new)
  }
}

/// Secrets are never compared by value.
impl PartialEq for Secret {
  fn eq(&self, _: &Self) -> bool {
    false
  }
}

impl Default for Secret {
  fn default() -> Self {
    Self::new(String::default())
  }
}

impl<S> From<S> for Secret
where
  S: AsRef<str>,
{
  fn from(token_value: S) -> Self {
    Self::new(token_value.as_ref().to_string())
  }
}

impl FromStr for Secret {
  type Err = Box<dyn std::error::Error>;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::from(s))
  }
}
