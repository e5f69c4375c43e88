//! Core types and trait definitions for the staff competency store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod changes;
pub mod error;
pub mod level;
pub mod person;
pub mod store;

pub use error::{Error, ErrorKind, Result};
pub use level::SkillLevel;
