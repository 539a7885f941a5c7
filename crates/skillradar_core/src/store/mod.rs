//! In-memory collections for skills and snapshots.
//!
//! # Responsibility
//! - Own skill identity, name and display order (`SkillRegistry`).
//! - Own snapshot identity, name, date, visibility and selection
//!   (`SnapshotStore`).
//!
//! # Invariants
//! - Id counters only increase between wholesale replacements.
//! - `u64::MAX` is never allocated; a counter that reaches it is exhausted.
//! - Cross-collection repair is not done here; see `crate::reconcile`.

use crate::model::score::ScoreError;
use crate::model::skill::SkillId;
use crate::model::snapshot::SnapshotId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod skill_registry;
pub mod snapshot_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Validation rejections from registry/store mutations.
///
/// Every variant means the mutation was refused and no state changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Skill name is blank after trim.
    BlankSkillName,
    /// A skill with the same trimmed name already exists.
    DuplicateSkillName(String),
    /// Snapshot name is blank after trim.
    BlankSnapshotName,
    /// Snapshot creation needs at least one registered skill.
    NoSkills,
    /// First snapshot was requested with an empty skill list.
    EmptySkillList,
    /// First snapshot was requested while snapshots already exist.
    StoreNotEmpty,
    /// Supplied skill list repeats one id.
    DuplicateSkillId(SkillId),
    SkillNotFound(SkillId),
    SnapshotNotFound(SnapshotId),
    /// The id counter has no values left.
    IdsExhausted,
    Score(ScoreError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankSkillName => write!(f, "skill name must not be blank"),
            Self::DuplicateSkillName(name) => write!(f, "skill already exists: `{name}`"),
            Self::BlankSnapshotName => write!(f, "snapshot name must not be blank"),
            Self::NoSkills => write!(f, "add at least one skill before creating a snapshot"),
            Self::EmptySkillList => write!(f, "first snapshot needs at least one skill"),
            Self::StoreNotEmpty => {
                write!(f, "first snapshot can only be created while no snapshots exist")
            }
            Self::DuplicateSkillId(id) => write!(f, "skill id is repeated: {id}"),
            Self::SkillNotFound(id) => write!(f, "skill not found: {id}"),
            Self::SnapshotNotFound(id) => write!(f, "snapshot not found: {id}"),
            Self::IdsExhausted => write!(f, "no ids left to allocate"),
            Self::Score(err) => write!(f, "{err}"),
        }
    }
}

impl StoreError {
    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankSkillName => "blank_skill_name",
            Self::DuplicateSkillName(_) => "duplicate_skill_name",
            Self::BlankSnapshotName => "blank_snapshot_name",
            Self::NoSkills => "no_skills",
            Self::EmptySkillList => "empty_skill_list",
            Self::StoreNotEmpty => "store_not_empty",
            Self::DuplicateSkillId(_) => "duplicate_skill_id",
            Self::SkillNotFound(_) => "skill_not_found",
            Self::SnapshotNotFound(_) => "snapshot_not_found",
            Self::IdsExhausted => "ids_exhausted",
            Self::Score(_) => "score_out_of_range",
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Score(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ScoreError> for StoreError {
    fn from(value: ScoreError) -> Self {
        Self::Score(value)
    }
}

/// Next id after the largest one in `ids`, or 1 for an empty collection.
///
/// Saturates at `u64::MAX`, which `allocate_id` treats as exhausted.
pub(crate) fn next_id_after(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max.saturating_add(1))
}

/// Takes the current counter value and advances it.
pub(crate) fn allocate_id(next_id: &mut u64) -> StoreResult<u64> {
    let id = *next_id;
    if id == u64::MAX {
        return Err(StoreError::IdsExhausted);
    }
    *next_id = id + 1;
    Ok(id)
}
