//! [`PersonService`]: create/read/update/delete for persons on top of any
//! [`CompetencyStore`].
//!
//! Every mutating operation stages its work on one [`ChangeSet`] and commits
//! it with a single `save_changes` call, so a request is applied completely
//! or not at all.

use std::{
  collections::{HashMap, HashSet},
  sync::Arc,
};

use competency_core::{
  Error, Result,
  changes::{ChangeSet, NewPerson, PersonEdit, SkillAssignment, SkillRef},
  person::{PersonId, PersonInput, PersonView, SkillEntry},
  store::CompetencyStore,
};

use crate::reconcile::diff_skills;

pub struct PersonService<S> {
  store: Arc<S>,
}

impl<S> PersonService<S>
where
  S: CompetencyStore,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  #[cfg(test)]
  pub(crate) fn store(&self) -> &S { &self.store }

  pub async fn list_persons(&self) -> Result<Vec<PersonView>> {
    let persons = self
      .store
      .get_all_persons_with_skills()
      .await
      .map_err(Error::store)?;
    Ok(persons.into_iter().map(PersonView::from).collect())
  }

  pub async fn get_person(&self, id: PersonId) -> Result<PersonView> {
    let person = self
      .store
      .get_person_with_skills(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::PersonNotFound(id))?;
    Ok(PersonView::from(person))
  }

  /// Create a person and return its new identity.
  pub async fn create_person(&self, input: PersonInput) -> Result<PersonId> {
    validate_skill_names(&input.skills)?;

    let mut resolved = self.resolve_existing(&input.skills).await?;
    let mut changes = ChangeSet::new();
    let skills = ensure_skills_exist(&input.skills, &mut changes, &mut resolved);

    let staged = changes.add_person(NewPerson {
      name: input.name,
      display_name: input.display_name,
      skills,
    });

    let committed = self
      .store
      .save_changes(changes)
      .await
      .map_err(Error::store)?;

    let person_id = committed.person_id(staged).ok_or_else(|| {
      Error::store(std::io::Error::other("commit returned no person id"))
    })?;
    tracing::info!(person_id, "created person");
    Ok(person_id)
  }

  /// Replace a person's names and reconcile its skill set against `input`.
  pub async fn update_person(&self, id: PersonId, input: PersonInput) -> Result<()> {
    let person = self
      .store
      .get_person_with_skills(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::PersonNotFound(id))?;

    validate_skill_names(&input.skills)?;

    let diff = diff_skills(&person.skills, &input.skills);

    let mut resolved = self.resolve_existing(diff.added.iter().copied()).await?;
    let mut changes = ChangeSet::new();
    let added = ensure_skills_exist(diff.added.iter().copied(), &mut changes, &mut resolved);

    tracing::debug!(
      person_id = id,
      removed = diff.removed.len(),
      relevelled = diff.relevelled.len(),
      added = added.len(),
      "reconciled skills"
    );

    changes.edit_person(PersonEdit {
      person_id: id,
      name: input.name,
      display_name: input.display_name,
      removed: diff.removed,
      relevelled: diff.relevelled,
      added,
    });

    self
      .store
      .save_changes(changes)
      .await
      .map_err(Error::store)?;
    tracing::info!(person_id = id, "updated person");
    Ok(())
  }

  pub async fn delete_person(&self, id: PersonId) -> Result<()> {
    // Associations cascade, so the skill set itself is not needed here.
    self
      .store
      .get_person_with_skills(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::PersonNotFound(id))?;

    let mut changes = ChangeSet::new();
    changes.delete_person(id);
    self
      .store
      .save_changes(changes)
      .await
      .map_err(Error::store)?;
    tracing::info!(person_id = id, "deleted person");
    Ok(())
  }

  /// Look up every requested name in one query, keyed by exact name.
  async fn resolve_existing<'e>(
    &self,
    requested: impl IntoIterator<Item = &'e SkillEntry>,
  ) -> Result<HashMap<String, SkillRef>> {
    let names: Vec<String> = requested.into_iter().map(|s| s.name.clone()).collect();
    if names.is_empty() {
      return Ok(HashMap::new());
    }

    let skills = self
      .store
      .get_skills_by_names(&names)
      .await
      .map_err(Error::store)?;
    Ok(
      skills
        .into_iter()
        .map(|skill| (skill.name, SkillRef::Stored(skill.skill_id)))
        .collect(),
    )
  }
}

/// Fail if any skill name occurs more than once in `skills`.
///
/// The error names every duplicate, in order of first appearance.
pub fn validate_skill_names(skills: &[SkillEntry]) -> Result<()> {
  let mut counts: HashMap<&str, usize> = HashMap::with_capacity(skills.len());
  for skill in skills {
    *counts.entry(skill.name.as_str()).or_default() += 1;
  }

  let mut reported = HashSet::new();
  let duplicates: Vec<String> = skills
    .iter()
    .map(|skill| skill.name.as_str())
    .filter(|name| counts[name] > 1 && reported.insert(*name))
    .map(str::to_owned)
    .collect();

  if duplicates.is_empty() {
    Ok(())
  } else {
    Err(Error::DuplicateSkills(duplicates))
  }
}

/// Resolve each requested skill against `resolved`, staging a new skill on
/// `changes` for every name not seen yet, and return one assignment per
/// entry.
///
/// Newly staged skills are inserted into `resolved`, so a name repeated
/// later in the same call reuses the staged row instead of staging another.
pub fn ensure_skills_exist<'e>(
  requested: impl IntoIterator<Item = &'e SkillEntry>,
  changes: &mut ChangeSet,
  resolved: &mut HashMap<String, SkillRef>,
) -> Vec<SkillAssignment> {
  requested
    .into_iter()
    .map(|entry| {
      let skill = *resolved
        .entry(entry.name.clone())
        .or_insert_with(|| changes.add_skill(entry.name.clone()));
      SkillAssignment { skill, level: entry.level }
    })
    .collect()
}
