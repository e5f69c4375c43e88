//! The `CompetencyStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `competency-store-sqlite`). The service layer depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  changes::{ChangeSet, Committed},
  person::{Person, PersonId, Skill},
};

/// Abstraction over a competency store backend.
///
/// Reads return plain owned data with every association resolved. Writes are
/// staged on a [`ChangeSet`] and applied by [`save_changes`], which commits
/// the whole set as one atomic unit.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
///
/// [`save_changes`]: CompetencyStore::save_changes
pub trait CompetencyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every person with skill associations and skill names resolved.
  fn get_all_persons_with_skills(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// A single person with its associations. Returns `None` if not found.
  fn get_person_with_skills(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// All stored skills whose name is in `names`. Unknown names are simply
  /// absent from the result.
  fn get_skills_by_names<'a>(
    &'a self,
    names: &'a [String],
  ) -> impl Future<Output = Result<Vec<Skill>, Self::Error>> + Send + 'a;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Apply every staged operation in `changes` atomically and return the
  /// identities assigned to new rows.
  ///
  /// Any failure, including a uniqueness violation on a skill name inserted
  /// concurrently by another caller, rolls back the whole set.
  fn save_changes(
    &self,
    changes: ChangeSet,
  ) -> impl Future<Output = Result<Committed, Self::Error>> + Send + '_;
}
