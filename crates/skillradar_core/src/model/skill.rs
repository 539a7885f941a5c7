//! Skill domain model.
//!
//! # Responsibility
//! - Define the named competency tracked across snapshots.
//!
//! # Invariants
//! - `id` is immutable once assigned.
//! - `name` is non-empty after trimming.

use serde::{Deserialize, Serialize};

/// Stable skill identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type SkillId = u64;

/// Named trackable competency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    /// Display name shown on the chart axis.
    pub name: String,
}

impl Skill {
    pub fn new(id: SkillId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Trims user-entered names; returns `None` when nothing remains.
pub(crate) fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
