//! Integration tests for `SqliteStore` against an in-memory database.

use competency_core::{
  SkillLevel,
  changes::{ChangeSet, NewPerson, PersonEdit, SkillAssignment, SkillRef},
  person::PersonId,
  store::CompetencyStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn level(n: i64) -> SkillLevel { SkillLevel::new(n).unwrap() }

fn assign(skill: SkillRef, n: i64) -> SkillAssignment {
  SkillAssignment { skill, level: level(n) }
}

/// Stage and commit one person whose skills are all new.
async fn seed(s: &SqliteStore, name: &str, skills: &[(&str, i64)]) -> PersonId {
  let mut changes = ChangeSet::new();
  let assignments = skills
    .iter()
    .map(|(skill, n)| assign(changes.add_skill(*skill), *n))
    .collect();
  let staged = changes.add_person(NewPerson {
    name:         name.into(),
    display_name: name.to_uppercase(),
    skills:       assignments,
  });
  let committed = s.save_changes(changes).await.unwrap();
  committed.person_id(staged).unwrap()
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_lists_nothing() {
  let s = store().await;
  assert!(s.get_all_persons_with_skills().await.unwrap().is_empty());
  assert_eq!(s.count_skills().await.unwrap(), 0);
}

#[tokio::test]
async fn get_person_missing_returns_none() {
  let s = store().await;
  seed(&s, "ada", &[("Rust", 3)]).await;
  assert!(s.get_person_with_skills(9_999).await.unwrap().is_none());
}

#[tokio::test]
async fn add_person_with_new_skills_and_get() {
  let s = store().await;
  let id = seed(&s, "ada", &[("B", 10), ("A", 1)]).await;
  assert!(id > 0);

  let person = s.get_person_with_skills(id).await.unwrap().unwrap();
  assert_eq!(person.person_id, id);
  assert_eq!(person.name, "ada");
  assert_eq!(person.display_name, "ADA");

  // Associations come back ordered by skill name.
  let skills: Vec<_> = person
    .skills
    .iter()
    .map(|ps| (ps.skill.name.as_str(), ps.level.get()))
    .collect();
  assert_eq!(skills, [("A", 1), ("B", 10)]);
}

#[tokio::test]
async fn list_resolves_every_person() {
  let s = store().await;
  let ada = seed(&s, "ada", &[("Rust", 3)]).await;
  let bob = seed(&s, "bob", &[]).await;

  let all = s.get_all_persons_with_skills().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].person_id, ada);
  assert_eq!(all[0].skills.len(), 1);
  assert_eq!(all[1].person_id, bob);
  assert!(all[1].skills.is_empty());
}

#[tokio::test]
async fn skills_by_names_ignores_unknown() {
  let s = store().await;
  seed(&s, "ada", &[("Rust", 3), ("Go", 2)]).await;

  let names = vec!["Rust".to_string(), "Haskell".to_string()];
  let found = s.get_skills_by_names(&names).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].name, "Rust");

  assert!(s.get_skills_by_names(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn skill_lookup_is_case_sensitive() {
  let s = store().await;
  seed(&s, "ada", &[("Rust", 3)]).await;

  let found = s.get_skills_by_names(&["rust".to_string()]).await.unwrap();
  assert!(found.is_empty());
}

#[tokio::test]
async fn skill_lookup_beyond_sqlite_parameter_limit() {
  let s = store().await;
  seed(&s, "ada", &[("skill-7", 1), ("skill-39999", 2)]).await;

  let names: Vec<String> = (0..40_000).map(|i| format!("skill-{i}")).collect();
  let mut found: Vec<_> = s
    .get_skills_by_names(&names)
    .await
    .unwrap()
    .into_iter()
    .map(|skill| skill.name)
    .collect();
  found.sort();
  assert_eq!(found, ["skill-39999", "skill-7"]);
}

// ─── Writes ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn staged_skill_shared_by_two_persons_in_one_commit() {
  let s = store().await;

  let mut changes = ChangeSet::new();
  let rust = changes.add_skill("Rust");
  let a = changes.add_person(NewPerson {
    name:         "ada".into(),
    display_name: "Ada".into(),
    skills:       vec![assign(rust, 5)],
  });
  let b = changes.add_person(NewPerson {
    name:         "bob".into(),
    display_name: "Bob".into(),
    skills:       vec![assign(rust, 7)],
  });

  let committed = s.save_changes(changes).await.unwrap();
  assert_eq!(committed.skill_ids.len(), 1);
  assert_ne!(committed.person_id(a), committed.person_id(b));
  assert_eq!(s.count_skills().await.unwrap(), 1);
  assert_eq!(s.count_associations().await.unwrap(), 2);
}

#[tokio::test]
async fn duplicate_skill_name_rolls_back_whole_set() {
  let s = store().await;
  seed(&s, "ada", &[("Rust", 3)]).await;

  // Simulates losing a race: "Rust" was inserted after our lookup.
  let mut changes = ChangeSet::new();
  let go = changes.add_skill("Go");
  let rust = changes.add_skill("Rust");
  changes.add_person(NewPerson {
    name:         "bob".into(),
    display_name: "Bob".into(),
    skills:       vec![assign(go, 1), assign(rust, 2)],
  });

  let err = s.save_changes(changes).await.unwrap_err();
  assert!(matches!(err, crate::Error::Sqlite(_)), "{err:?}");

  assert_eq!(s.get_all_persons_with_skills().await.unwrap().len(), 1);
  assert_eq!(s.count_skills().await.unwrap(), 1);
}

#[tokio::test]
async fn edit_removes_relevels_and_adds() {
  let s = store().await;
  let id = seed(&s, "ada", &[("A", 1), ("B", 5)]).await;
  let person = s.get_person_with_skills(id).await.unwrap().unwrap();
  let skill_id = |name: &str| {
    person
      .skills
      .iter()
      .find(|ps| ps.skill.name == name)
      .unwrap()
      .skill
      .skill_id
  };

  let mut changes = ChangeSet::new();
  let c = changes.add_skill("C");
  changes.edit_person(PersonEdit {
    person_id:    id,
    name:         "ada2".into(),
    display_name: "Ada Two".into(),
    removed:      vec![skill_id("A")],
    relevelled:   vec![(skill_id("B"), level(10))],
    added:        vec![assign(c, 1)],
  });
  s.save_changes(changes).await.unwrap();

  let person = s.get_person_with_skills(id).await.unwrap().unwrap();
  assert_eq!(person.name, "ada2");
  assert_eq!(person.display_name, "Ada Two");
  let skills: Vec<_> = person
    .skills
    .iter()
    .map(|ps| (ps.skill.name.as_str(), ps.level.get()))
    .collect();
  assert_eq!(skills, [("B", 10), ("C", 1)]);

  // "A" is orphaned but still stored.
  assert_eq!(s.count_skills().await.unwrap(), 3);
}

#[tokio::test]
async fn delete_cascades_associations_and_keeps_skills() {
  let s = store().await;
  let ada = seed(&s, "ada", &[("Rust", 3), ("Go", 4)]).await;

  let mut changes = ChangeSet::new();
  changes.delete_person(ada);
  s.save_changes(changes).await.unwrap();

  assert!(s.get_person_with_skills(ada).await.unwrap().is_none());
  assert_eq!(s.count_associations().await.unwrap(), 0);
  assert_eq!(s.count_skills().await.unwrap(), 2);
}

#[tokio::test]
async fn delete_of_vanished_person_errors() {
  let s = store().await;

  let mut changes = ChangeSet::new();
  changes.delete_person(42);
  let err = s.save_changes(changes).await.unwrap_err();
  assert!(matches!(err, crate::Error::PersonVanished(42)));
}

#[tokio::test]
async fn edit_of_vanished_person_rolls_back_new_skills() {
  let s = store().await;

  let mut changes = ChangeSet::new();
  let c = changes.add_skill("C");
  changes.edit_person(PersonEdit {
    person_id:    42,
    name:         "x".into(),
    display_name: "X".into(),
    removed:      vec![],
    relevelled:   vec![],
    added:        vec![assign(c, 1)],
  });
  let err = s.save_changes(changes).await.unwrap_err();
  assert!(matches!(err, crate::Error::PersonVanished(42)));
  assert_eq!(s.count_skills().await.unwrap(), 0);
}

#[tokio::test]
async fn empty_change_set_is_a_noop() {
  let s = store().await;
  let committed = s.save_changes(ChangeSet::new()).await.unwrap();
  assert!(committed.person_ids.is_empty());
  assert!(committed.skill_ids.is_empty());
}

#[tokio::test]
async fn identities_are_not_reused_after_delete() {
  let s = store().await;
  let first = seed(&s, "ada", &[]).await;

  let mut changes = ChangeSet::new();
  changes.delete_person(first);
  s.save_changes(changes).await.unwrap();

  let second = seed(&s, "bob", &[]).await;
  assert!(second > first);
}
