//! First-run workflow draft.
//!
//! # Responsibility
//! - Collect the initial skill list and starting scores before anything is
//!   committed to the tracker.
//!
//! # Invariants
//! - Draft skill names are trimmed and unique; blank or repeated names are
//!   ignored.
//! - Every draft skill has exactly one draft score (default 2).

use crate::clock::Clock;
use crate::model::score::Score;
use crate::model::skill::{normalize_name, Skill, SkillId};
use crate::model::snapshot::{ScoreMap, SnapshotId};
use crate::service::tracker_service::TrackerService;
use crate::store::{StoreError, StoreResult};

/// Quick-add skill names offered during first run.
pub const SKILL_SUGGESTIONS: &[&str] = &[
    "Go Fundamentals",
    "Concurrency",
    "Testing",
    "PostgreSQL",
    "REST API",
    "Docker/DevOps",
    "Profiling/pprof",
    "Algorithms",
];

const DEFAULT_FIRST_SNAPSHOT_NAME: &str = "Week 1";

/// In-progress first-run state.
#[derive(Debug, Clone)]
pub struct FirstRunDraft {
    snapshot_name: String,
    skills: Vec<Skill>,
    scores: ScoreMap,
    next_id: SkillId,
}

impl Default for FirstRunDraft {
    fn default() -> Self {
        Self {
            snapshot_name: DEFAULT_FIRST_SNAPSHOT_NAME.to_string(),
            skills: Vec::new(),
            scores: ScoreMap::new(),
            next_id: 1,
        }
    }
}

impl FirstRunDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot_name(&self) -> &str {
        &self.snapshot_name
    }

    pub fn set_snapshot_name(&mut self, name: impl Into<String>) {
        self.snapshot_name = name.into();
    }

    /// Adds a draft skill scored 2. Blank or repeated names are ignored.
    pub fn add_skill(&mut self, name: &str) -> Option<SkillId> {
        let name = normalize_name(name)?;
        if self.skills.iter().any(|skill| skill.name == name) {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.skills.push(Skill::new(id, name));
        self.scores.insert(id, Score::DEFAULT);
        Some(id)
    }

    pub fn remove_skill(&mut self, id: SkillId) -> bool {
        let before = self.skills.len();
        self.skills.retain(|skill| skill.id != id);
        self.scores.remove(&id);
        self.skills.len() != before
    }

    pub fn set_score(&mut self, id: SkillId, value: i64) -> StoreResult<()> {
        let score = Score::new(value)?;
        if !self.skills.iter().any(|skill| skill.id == id) {
            return Err(StoreError::SkillNotFound(id));
        }
        self.scores.insert(id, score);
        Ok(())
    }

    pub fn score(&self, id: SkillId) -> Score {
        self.scores.get(&id).copied().unwrap_or_default()
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Suggested names not yet in the draft, in suggestion order.
    pub fn suggestions(&self) -> Vec<&'static str> {
        SKILL_SUGGESTIONS
            .iter()
            .copied()
            .filter(|name| !self.skills.iter().any(|skill| skill.name == *name))
            .collect()
    }

    pub fn can_complete(&self) -> bool {
        normalize_name(&self.snapshot_name).is_some() && !self.skills.is_empty()
    }

    /// Hands the draft to `TrackerService::create_first_snapshot`.
    pub fn commit<C: Clock>(self, tracker: &mut TrackerService<C>) -> StoreResult<SnapshotId> {
        tracker.create_first_snapshot(&self.snapshot_name, self.skills, &self.scores)
    }
}
