//! [`ChangeSet`], the unit of work handed to
//! [`CompetencyStore::save_changes`](crate::store::CompetencyStore::save_changes).
//!
//! Operations are only recorded here. Nothing touches the store until the
//! whole set is committed, and a store applies it atomically or not at all.
//! Rows staged in the same set get their identities at commit time, so staged
//! associations refer to staged skills through [`SkillRef::Staged`].

use crate::{
  SkillLevel,
  person::{PersonId, SkillId},
};

// ─── Handles ─────────────────────────────────────────────────────────────────

/// Index of a skill staged with [`ChangeSet::add_skill`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagedSkill(usize);

impl StagedSkill {
  pub fn index(self) -> usize { self.0 }
}

/// Index of a person staged with [`ChangeSet::add_person`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StagedPerson(usize);

impl StagedPerson {
  pub fn index(self) -> usize { self.0 }
}

/// A skill that is either already stored or staged in the same change set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillRef {
  Stored(SkillId),
  Staged(StagedSkill),
}

// ─── Staged operations ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillAssignment {
  pub skill: SkillRef,
  pub level: SkillLevel,
}

/// A person to insert, together with its skill associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
  pub name:         String,
  pub display_name: String,
  pub skills:       Vec<SkillAssignment>,
}

/// An in-place update of an existing person.
///
/// Associations not mentioned in any of the three lists are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonEdit {
  pub person_id:    PersonId,
  pub name:         String,
  pub display_name: String,
  /// Associations to delete.
  pub removed:      Vec<SkillId>,
  /// Associations that stay but change level.
  pub relevelled:   Vec<(SkillId, SkillLevel)>,
  /// Associations to insert.
  pub added:        Vec<SkillAssignment>,
}

// ─── Change set ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
  new_skills:  Vec<String>,
  new_persons: Vec<NewPerson>,
  edits:       Vec<PersonEdit>,
  deletions:   Vec<PersonId>,
}

impl ChangeSet {
  pub fn new() -> Self { Self::default() }

  /// Stage a new skill. The returned handle can be used in assignments
  /// staged on this same set.
  pub fn add_skill(&mut self, name: impl Into<String>) -> SkillRef {
    self.new_skills.push(name.into());
    SkillRef::Staged(StagedSkill(self.new_skills.len() - 1))
  }

  pub fn add_person(&mut self, person: NewPerson) -> StagedPerson {
    self.new_persons.push(person);
    StagedPerson(self.new_persons.len() - 1)
  }

  pub fn edit_person(&mut self, edit: PersonEdit) { self.edits.push(edit); }

  /// Stage removal of a person. Its associations go with it; the skills they
  /// pointed at stay.
  pub fn delete_person(&mut self, person_id: PersonId) {
    self.deletions.push(person_id);
  }

  pub fn new_skills(&self) -> &[String] { &self.new_skills }

  pub fn new_persons(&self) -> &[NewPerson] { &self.new_persons }

  pub fn edits(&self) -> &[PersonEdit] { &self.edits }

  pub fn deletions(&self) -> &[PersonId] { &self.deletions }

  pub fn is_empty(&self) -> bool {
    self.new_skills.is_empty()
      && self.new_persons.is_empty()
      && self.edits.is_empty()
      && self.deletions.is_empty()
  }
}

// ─── Commit result ───────────────────────────────────────────────────────────

/// Identities assigned by a successful commit, in staging order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Committed {
  pub skill_ids:  Vec<SkillId>,
  pub person_ids: Vec<PersonId>,
}

impl Committed {
  pub fn person_id(&self, staged: StagedPerson) -> Option<PersonId> {
    self.person_ids.get(staged.0).copied()
  }

  /// Resolve a skill reference to its stored identity.
  pub fn skill_id(&self, skill: SkillRef) -> Option<SkillId> {
    match skill {
      SkillRef::Stored(id) => Some(id),
      SkillRef::Staged(staged) => self.skill_ids.get(staged.0).copied(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn staged_handles_index_in_order() {
    let mut changes = ChangeSet::new();
    assert!(changes.is_empty());

    let a = changes.add_skill("A");
    let b = changes.add_skill("B");
    assert_eq!(a, SkillRef::Staged(StagedSkill(0)));
    assert_eq!(b, SkillRef::Staged(StagedSkill(1)));
    assert_eq!(changes.new_skills(), ["A", "B"]);

    let p = changes.add_person(NewPerson {
      name:         "ada".into(),
      display_name: "Ada".into(),
      skills:       vec![SkillAssignment { skill: b, level: SkillLevel::MAX }],
    });
    assert_eq!(p.index(), 0);
    assert!(!changes.is_empty());
  }

  #[test]
  fn committed_resolves_references() {
    let committed = Committed {
      skill_ids:  vec![11, 12],
      person_ids: vec![3],
    };
    assert_eq!(committed.person_id(StagedPerson(0)), Some(3));
    assert_eq!(committed.person_id(StagedPerson(1)), None);
    assert_eq!(committed.skill_id(SkillRef::Stored(99)), Some(99));
    assert_eq!(committed.skill_id(SkillRef::Staged(StagedSkill(1))), Some(12));
  }
}
