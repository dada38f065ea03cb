use sea_orm::{sqlx, DbErr, RuntimeErr};

/// MySQL codes for deadlocks and lock wait timeouts. Retrying the statement later can succeed.
const TRANSIENT_MYSQL_ERROR_CODES: [&str; 2] = ["1213", "1205"];

pub trait DbErrExtension {
  /// True when the failure comes from the connection to the database rather
  /// than from the statement itself.
  fn is_transient(&self) -> bool;
}

impl DbErrExtension for DbErr {
  fn is_transient(&self) -> bool {
    match self {
      DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
      DbErr::Exec(RuntimeErr::SqlxError(sqlx_err))
      | DbErr::Query(RuntimeErr::SqlxError(sqlx_err)) => match sqlx_err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db_err) => db_err
          .code()
          .is_some_and(|code| TRANSIENT_MYSQL_ERROR_CODES.contains(&&*code)),
        _ => false,
      },
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn connection_errors_are_transient() {
    let error = DbErr::Conn(RuntimeErr::Internal("connection reset".into()));

    assert!(error.is_transient());
  }

  #[test]
  fn statement_errors_are_permanent() {
    assert!(!DbErr::Custom("unknown column `body`".into()).is_transient());
    assert!(!DbErr::Exec(RuntimeErr::Internal("syntax".into())).is_transient());
  }
}
