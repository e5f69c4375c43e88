//! Skill-set reconciliation for updates.
//!
//! Computes which associations to remove, which to keep with a new level and
//! which to add, using plain set operations over skill names. Associations
//! whose level is unchanged produce no operation at all.

use std::collections::{HashMap, HashSet};

use competency_core::{
  SkillLevel,
  person::{PersonSkill, SkillEntry, SkillId},
};

/// The operations that turn a person's current skill set into the
/// requested one.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SkillDiff<'a> {
  /// `current − requested`, by skill id (sorted).
  pub removed:    Vec<SkillId>,
  /// `current ∩ requested` where the level differs (sorted by skill id).
  pub relevelled: Vec<(SkillId, SkillLevel)>,
  /// `requested − current`, in request order.
  pub added:      Vec<&'a SkillEntry>,
}

#[cfg(test)]
impl SkillDiff<'_> {
  fn is_empty(&self) -> bool {
    self.removed.is_empty() && self.relevelled.is_empty() && self.added.is_empty()
  }
}

/// Diff `current` against `requested`. Names are matched exactly.
///
/// `requested` is expected to be free of duplicate names; the service checks
/// that before calling.
pub fn diff_skills<'a>(
  current: &[PersonSkill],
  requested: &'a [SkillEntry],
) -> SkillDiff<'a> {
  let current_by_name: HashMap<&str, &PersonSkill> = current
    .iter()
    .map(|ps| (ps.skill.name.as_str(), ps))
    .collect();
  let requested_by_name: HashMap<&str, &SkillEntry> =
    requested.iter().map(|s| (s.name.as_str(), s)).collect();

  let current_names: HashSet<&str> = current_by_name.keys().copied().collect();
  let requested_names: HashSet<&str> =
    requested_by_name.keys().copied().collect();

  let mut removed: Vec<SkillId> = current_names
    .difference(&requested_names)
    .map(|name| current_by_name[name].skill.skill_id)
    .collect();
  removed.sort_unstable();

  let mut relevelled: Vec<(SkillId, SkillLevel)> = current_names
    .intersection(&requested_names)
    .filter_map(|name| {
      let held = current_by_name[name];
      let wanted = requested_by_name[name].level;
      (held.level != wanted).then_some((held.skill.skill_id, wanted))
    })
    .collect();
  relevelled.sort_unstable();

  let added = requested
    .iter()
    .filter(|s| !current_names.contains(s.name.as_str()))
    .collect();

  SkillDiff { removed, relevelled, added }
}
