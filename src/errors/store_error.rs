use super::DbErrExtension;
use sea_orm::DbErr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
  /// The message was lost, but later writes may succeed.
  Transient,
  /// Writes will keep failing. The process should stop.
  Permanent,
}

#[derive(Debug, thiserror::Error)]
#[error("{kind:?} failure when storing a chat message: {source}")]
pub struct StoreError {
  kind: StoreErrorKind,
  #[source]
  source: DbErr,
}

impl StoreError {
  pub fn transient(source: DbErr) -> Self {
    Self {
      kind: StoreErrorKind::Transient,
      source,
    }
  }

  pub fn permanent(source: DbErr) -> Self {
    Self {
      kind: StoreErrorKind::Permanent,
      source,
    }
  }

  pub fn kind(&self) -> StoreErrorKind {
    self.kind
  }

  pub fn is_transient(&self) -> bool {
    self.kind == StoreErrorKind::Transient
  }
}

impl From<DbErr> for StoreError {
  fn from(source: DbErr) -> Self {
    if source.is_transient() {
      Self::transient(source)
    } else {
      Self::permanent(source)
    }
  }
}
