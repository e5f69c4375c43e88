//! Persons, skills and the association between them.
//!
//! Everything here is plain owned data. A [`Person`] read from the store
//! carries its skill associations with skill names already resolved.

use serde::{Deserialize, Serialize};

use crate::{Error, SkillLevel};

pub type PersonId = i64;
pub type SkillId = i64;

// ─── Stored entities ─────────────────────────────────────────────────────────

/// A named competency, shared by every person that references it.
///
/// Names are unique across the store and compared exactly ("Rust" and
/// "rust" are different skills).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
  pub skill_id: SkillId,
  pub name:     String,
}

/// One person's proficiency in one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSkill {
  pub skill: Skill,
  pub level: SkillLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub person_id:    PersonId,
  pub name:         String,
  pub display_name: String,
  pub skills:       Vec<PersonSkill>,
}

// ─── Request / response shapes ───────────────────────────────────────────────

/// A skill name paired with a level, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillEntry {
  pub name:  String,
  pub level: SkillLevel,
}

/// The desired state of a person, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
  pub name:         String,
  pub display_name: String,
  pub skills:       Vec<SkillEntry>,
}

impl PersonInput {
  /// Reject blank names. Skill-level bounds are already guaranteed by
  /// [`SkillLevel`].
  pub fn validate(&self) -> Result<(), Error> {
    if self.name.trim().is_empty() {
      return Err(Error::MissingField("name"));
    }
    if self.display_name.trim().is_empty() {
      return Err(Error::MissingField("displayName"));
    }
    if self.skills.iter().any(|s| s.name.trim().is_empty()) {
      return Err(Error::MissingField("skills.name"));
    }
    Ok(())
  }
}

/// The read model returned by list and get.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonView {
  pub id:           PersonId,
  pub name:         String,
  pub display_name: String,
  pub skills:       Vec<SkillEntry>,
}

impl From<Person> for PersonView {
  fn from(p: Person) -> Self {
    PersonView {
      id:           p.person_id,
      name:         p.name,
      display_name: p.display_name,
      skills:       p
        .skills
        .into_iter()
        .map(|ps| SkillEntry { name: ps.skill.name, level: ps.level })
        .collect(),
    }
  }
}
