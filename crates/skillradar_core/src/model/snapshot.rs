//! Snapshot domain model.
//!
//! # Responsibility
//! - Define the dated, named record of per-skill scores.
//!
//! # Invariants
//! - `id` is immutable once assigned and independent of skill ids.
//! - `date` is set at creation and never edited afterwards.
//! - `scores` keys reference skills in the registry (no orphans by construction).

use crate::model::score::Score;
use crate::model::skill::SkillId;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Stable snapshot identifier.
pub type SnapshotId = u64;

/// Sparse mapping from skill id to score.
pub type ScoreMap = HashMap<SkillId, Score>;

/// Point-in-time record of proficiency scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub id: SnapshotId,
    pub name: String,
    /// Creation day.
    pub date: NaiveDate,
    pub scores: ScoreMap,
}

impl Snapshot {
    pub fn new(id: SnapshotId, name: impl Into<String>, date: NaiveDate, scores: ScoreMap) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            scores,
        }
    }

    /// Returns the stored score for `skill_id`, if any.
    pub fn score(&self, skill_id: SkillId) -> Option<Score> {
        self.scores.get(&skill_id).copied()
    }

    /// Score lookup with the "missing means 0" fallback used by projections.
    pub fn score_or_min(&self, skill_id: SkillId) -> Score {
        self.score(skill_id).unwrap_or(Score::MIN)
    }
}
