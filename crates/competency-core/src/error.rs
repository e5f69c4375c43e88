//! Error types for `competency-core`.

use thiserror::Error;

use crate::person::PersonId;

/// How an [`Error`] is surfaced to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Malformed input or a broken business rule. The message is safe to
  /// return to the client.
  Validation,
  /// The referenced person does not exist.
  NotFound,
  /// Anything else. The message must not leave the process.
  Unclassified,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("Person with id {0} not found.")]
  PersonNotFound(PersonId),

  #[error("Person can't have duplicate skills: {}", .0.join(", "))]
  DuplicateSkills(Vec<String>),

  #[error("Skill level range must be between 1 and 10, got {0}")]
  LevelOutOfRange(i64),

  #[error("{0} must not be empty")]
  MissingField(&'static str),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error as an unclassified failure.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::PersonNotFound(_) => ErrorKind::NotFound,
      Self::DuplicateSkills(_)
      | Self::LevelOutOfRange(_)
      | Self::MissingField(_) => ErrorKind::Validation,
      Self::Store(_) => ErrorKind::Unclassified,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
