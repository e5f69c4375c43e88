//! Skill proficiency level, bounded to `1..=10`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A validated proficiency level.
///
/// Deserialisation goes through [`TryFrom<i64>`], so a JSON body carrying an
/// out-of-range level is rejected before it reaches the service.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct SkillLevel(u8);

impl SkillLevel {
  pub const MIN: Self = Self(1);
  pub const MAX: Self = Self(10);

  pub fn new(level: i64) -> Result<Self, Error> { Self::try_from(level) }

  pub fn get(self) -> u8 { self.0 }
}

impl TryFrom<i64> for SkillLevel {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self, Self::Error> {
    if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
      Ok(Self(value as u8))
    } else {
      Err(Error::LevelOutOfRange(value))
    }
  }
}

impl From<SkillLevel> for u8 {
  fn from(level: SkillLevel) -> Self { level.0 }
}

impl From<SkillLevel> for i64 {
  fn from(level: SkillLevel) -> Self { i64::from(level.0) }
}

impl fmt::Display for SkillLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
