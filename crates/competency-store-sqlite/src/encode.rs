//! Row types read directly from SQLite and their conversion into domain
//! values.
//!
//! Levels are stored as plain integers and re-validated on the way out, so a
//! row that somehow escaped the `CHECK` constraint surfaces as an error
//! instead of an invalid [`SkillLevel`].

use std::collections::HashMap;

use competency_core::{
  SkillLevel,
  person::{Person, PersonId, PersonSkill, Skill, SkillId},
};

use crate::Result;

/// Raw columns from a `persons` row.
pub struct RawPerson {
  pub id:           PersonId,
  pub name:         String,
  pub display_name: String,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawPerson {
      id:           row.get(0)?,
      name:         row.get(1)?,
      display_name: row.get(2)?,
    })
  }
}

/// Raw columns from `person_skills` joined with `skills`.
pub struct RawAssociation {
  pub person_id:  PersonId,
  pub skill_id:   SkillId,
  pub skill_name: String,
  pub level:      i64,
}

impl RawAssociation {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawAssociation {
      person_id:  row.get(0)?,
      skill_id:   row.get(1)?,
      skill_name: row.get(2)?,
      level:      row.get(3)?,
    })
  }

  fn into_person_skill(self) -> Result<PersonSkill> {
    Ok(PersonSkill {
      skill: Skill { skill_id: self.skill_id, name: self.skill_name },
      level: SkillLevel::try_from(self.level)?,
    })
  }
}

/// Attach every association to its person, keeping the order of `persons`.
pub fn assemble(
  persons: Vec<RawPerson>,
  associations: Vec<RawAssociation>,
) -> Result<Vec<Person>> {
  let mut by_person: HashMap<PersonId, Vec<PersonSkill>> = HashMap::new();
  for assoc in associations {
    let person_id = assoc.person_id;
    by_person
      .entry(person_id)
      .or_default()
      .push(assoc.into_person_skill()?);
  }

  Ok(
    persons
      .into_iter()
      .map(|raw| Person {
        skills:       by_person.remove(&raw.id).unwrap_or_default(),
        person_id:    raw.id,
        name:         raw.name,
        display_name: raw.display_name,
      })
      .collect(),
  )
}
