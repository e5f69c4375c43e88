//! Error type for `competency-store-sqlite`.

use competency_core::person::PersonId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] competency_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  /// An edit or delete referenced a person row that no longer exists, e.g.
  /// because a concurrent request deleted it after it was read.
  #[error("person {0} vanished before commit")]
  PersonVanished(PersonId),

  /// An association referenced a staged skill that is not in the change set.
  #[error("unknown staged skill #{0}")]
  UnknownStagedSkill(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
