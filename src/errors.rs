mod sea_orm_db_error_extensions;
mod store_error;

pub use sea_orm_db_error_extensions::*;
pub use store_error::*;

/// Config, logging, database or connection setup failed.
pub const STARTUP_FAILURE_EXIT_CODE: i32 = 1;
/// The chat connection failed after it was established.
pub const CONNECTION_FAILURE_EXIT_CODE: i32 = 2;
/// The message store rejected a write in a way that won't recover.
pub const STORE_FAILURE_EXIT_CODE: i32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("Failed to connect to the database. Reason: `{:?}`", .0)]
  DatabaseConnectionFailed(anyhow::Error),

  #[error("Failed to connect to {}. Reason: `{}`", address, source)]
  FailedToConnect {
    address: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to send the authentication commands. Reason: `{}`", .0)]
  HandshakeFailed(std::io::Error),

  #[error("Failed to read from the chat connection. Reason: `{}`", .0)]
  ConnectionReadFailed(std::io::Error),

  #[error("Failed to write to the chat connection. Reason: `{}`", .0)]
  ConnectionWriteFailed(std::io::Error),

  #[error("The chat server closed the connection.")]
  ConnectionClosed,

  #[error("The raw line queue was closed while the connection was still being read.")]
  QueueClosed,

  #[error("{}", .0)]
  MessageStoreError(#[from] StoreError),

  #[error("The channel reader task stopped unexpectedly: `{}`", .0)]
  ReaderTaskFailed(#[from] tokio::task::JoinError),

  #[error("Failed to listen for the shutdown signal. Reason: `{}`", .0)]
  SignalListenerFailed(std::io::Error),

  #[error("Failed to profile the program. Reason: `{}`", .0)]
  ProfilerError(#[from] pprof::Error),

  #[error("Failed to write a profile to {:?}. Reason: `{}`", path, source)]
  FailedToWriteProfile {
    path: std::path::PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl AppError {
  /// The status the process exits with when this error stops it.
  pub fn exit_code(&self) -> i32 {
    match self {
      Self::ConnectionReadFailed(_)
      | Self::ConnectionWriteFailed(_)
      | Self::ConnectionClosed
      | Self::QueueClosed
      | Self::ReaderTaskFailed(_) => CONNECTION_FAILURE_EXIT_CODE,
      Self::MessageStoreError(_) => STORE_FAILURE_EXIT_CODE,
      _ => STARTUP_FAILURE_EXIT_CODE,
    }
  }
}
