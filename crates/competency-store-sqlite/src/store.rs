//! [`SqliteStore`]: the SQLite implementation of [`CompetencyStore`].

use std::path::Path;

use competency_core::{
  changes::{ChangeSet, Committed, SkillAssignment, SkillRef},
  person::{Person, PersonId, Skill},
  store::CompetencyStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Error, Result,
  encode::{RawAssociation, RawPerson, assemble},
  schema::SCHEMA,
};

/// Names bound per `IN (...)` lookup. SQLite rejects statements with more
/// than 32766 parameters, so larger batches are split.
const MAX_NAMES_PER_QUERY: usize = 1000;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A competency store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Total number of skill rows, including ones no person references.
  pub async fn count_skills(&self) -> Result<usize> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM skills", [], |r| r.get(0))?)
      })
      .await?;
    Ok(count as usize)
  }

  /// Total number of person/skill association rows.
  pub async fn count_associations(&self) -> Result<usize> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM person_skills", [], |r| {
          r.get(0)
        })?)
      })
      .await?;
    Ok(count as usize)
  }
}

// ─── Commit ──────────────────────────────────────────────────────────────────

/// Apply a change set inside an open transaction. The caller commits on
/// success; dropping the transaction on error rolls everything back.
///
/// Order: new skills first so that staged references resolve, then
/// deletions, edits and finally new persons.
fn apply(tx: &rusqlite::Transaction<'_>, changes: &ChangeSet) -> Result<Committed> {
  let mut committed = Committed::default();

  for name in changes.new_skills() {
    tx.execute("INSERT INTO skills (name) VALUES (?1)", rusqlite::params![name])?;
    committed.skill_ids.push(tx.last_insert_rowid());
  }

  for &person_id in changes.deletions() {
    let deleted = tx.execute(
      "DELETE FROM persons WHERE id = ?1",
      rusqlite::params![person_id],
    )?;
    if deleted == 0 {
      return Err(Error::PersonVanished(person_id));
    }
  }

  for edit in changes.edits() {
    let updated = tx.execute(
      "UPDATE persons SET name = ?2, display_name = ?3 WHERE id = ?1",
      rusqlite::params![edit.person_id, edit.name, edit.display_name],
    )?;
    if updated == 0 {
      return Err(Error::PersonVanished(edit.person_id));
    }

    for skill_id in &edit.removed {
      tx.execute(
        "DELETE FROM person_skills WHERE person_id = ?1 AND skill_id = ?2",
        rusqlite::params![edit.person_id, skill_id],
      )?;
    }

    for (skill_id, level) in &edit.relevelled {
      tx.execute(
        "UPDATE person_skills SET level = ?3 WHERE person_id = ?1 AND skill_id = ?2",
        rusqlite::params![edit.person_id, skill_id, i64::from(*level)],
      )?;
    }

    insert_assignments(tx, &committed, edit.person_id, &edit.added)?;
  }

  for person in changes.new_persons() {
    tx.execute(
      "INSERT INTO persons (name, display_name) VALUES (?1, ?2)",
      rusqlite::params![person.name, person.display_name],
    )?;
    let person_id = tx.last_insert_rowid();
    committed.person_ids.push(person_id);

    insert_assignments(tx, &committed, person_id, &person.skills)?;
  }

  Ok(committed)
}

fn insert_assignments(
  tx:          &rusqlite::Transaction<'_>,
  committed:   &Committed,
  person_id:   PersonId,
  assignments: &[SkillAssignment],
) -> Result<()> {
  let mut stmt = tx.prepare_cached(
    "INSERT INTO person_skills (person_id, skill_id, level) VALUES (?1, ?2, ?3)",
  )?;
  for assignment in assignments {
    let skill_id = match assignment.skill {
      SkillRef::Stored(id) => id,
      SkillRef::Staged(staged) => committed
        .skill_id(assignment.skill)
        .ok_or(Error::UnknownStagedSkill(staged.index()))?,
    };
    stmt.execute(rusqlite::params![
      person_id,
      skill_id,
      i64::from(assignment.level)
    ])?;
  }
  Ok(())
}

// ─── CompetencyStore impl ────────────────────────────────────────────────────

impl CompetencyStore for SqliteStore {
  type Error = Error;

  async fn get_all_persons_with_skills(&self) -> Result<Vec<Person>> {
    let (persons, associations) = self
      .conn
      .call(|conn| {
        let persons = conn
          .prepare("SELECT id, name, display_name FROM persons ORDER BY id")?
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let associations = conn
          .prepare(
            "SELECT ps.person_id, s.id, s.name, ps.level
             FROM person_skills ps
             JOIN skills s ON s.id = ps.skill_id
             ORDER BY ps.person_id, s.name",
          )?
          .query_map([], RawAssociation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((persons, associations))
      })
      .await?;

    assemble(persons, associations)
  }

  async fn get_person_with_skills(&self, id: PersonId) -> Result<Option<Person>> {
    let found = self
      .conn
      .call(move |conn| {
        let Some(person) = conn
          .query_row(
            "SELECT id, name, display_name FROM persons WHERE id = ?1",
            rusqlite::params![id],
            RawPerson::from_row,
          )
          .optional()?
        else {
          return Ok(None);
        };

        let associations = conn
          .prepare(
            "SELECT ps.person_id, s.id, s.name, ps.level
             FROM person_skills ps
             JOIN skills s ON s.id = ps.skill_id
             WHERE ps.person_id = ?1
             ORDER BY s.name",
          )?
          .query_map(rusqlite::params![id], RawAssociation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((person, associations)))
      })
      .await?;

    match found {
      Some((person, associations)) => {
        Ok(assemble(vec![person], associations)?.pop())
      }
      None => Ok(None),
    }
  }

  async fn get_skills_by_names(&self, names: &[String]) -> Result<Vec<Skill>> {
    if names.is_empty() {
      return Ok(Vec::new());
    }

    let names = names.to_vec();
    let skills = self
      .conn
      .call(move |conn| {
        let mut skills = Vec::new();
        for chunk in names.chunks(MAX_NAMES_PER_QUERY) {
          let placeholders = (1..=chunk.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
          let sql =
            format!("SELECT id, name FROM skills WHERE name IN ({placeholders})");

          let mut stmt = conn.prepare_cached(&sql)?;
          let rows = stmt.query_map(rusqlite::params_from_iter(chunk), |row| {
            Ok(Skill { skill_id: row.get(0)?, name: row.get(1)? })
          })?;
          for row in rows {
            skills.push(row?);
          }
        }
        Ok(skills)
      })
      .await?;

    Ok(skills)
  }

  async fn save_changes(&self, changes: ChangeSet) -> Result<Committed> {
    if changes.is_empty() {
      return Ok(Committed::default());
    }

    let committed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let outcome = apply(&tx, &changes);
        if outcome.is_ok() {
          tx.commit()?;
        }
        Ok(outcome)
      })
      .await??;

    tracing::debug!(
      new_skills = committed.skill_ids.len(),
      new_persons = committed.person_ids.len(),
      "committed change set"
    );
    Ok(committed)
  }
}
