//! SQL schema for the competency SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision; future migrations will be gated on that number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS persons (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    display_name  TEXT NOT NULL
);

-- Skills are shared between persons and never deleted by the service.
CREATE TABLE IF NOT EXISTS skills (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL UNIQUE     -- exact, case-sensitive match
);

CREATE TABLE IF NOT EXISTS person_skills (
    person_id  INTEGER NOT NULL REFERENCES persons(id) ON DELETE CASCADE,
    skill_id   INTEGER NOT NULL REFERENCES skills(id),
    level      INTEGER NOT NULL CHECK (level BETWEEN 1 AND 10),
    PRIMARY KEY (person_id, skill_id)
);

CREATE INDEX IF NOT EXISTS person_skills_skill_idx ON person_skills(skill_id);

PRAGMA user_version = 1;
";
