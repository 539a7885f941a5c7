//! Wire format of exported tracker documents.
//!
//! ```json
//! {
//!   "skills":    [ { "id": 1, "name": "Testing" } ],
//!   "snapshots": [ { "id": 1, "name": "Week 1", "date": "2026-03-02",
//!                    "scores": { "1": 3 } } ]
//! }
//! ```
//!
//! # Invariants
//! - `skills` order is display order; `snapshots` order is creation order.
//! - Score keys are skill ids written as strings, in ascending numeric order.
//! - Score values are raw integers so imports can observe out-of-range data.

use crate::model::skill::{Skill, SkillId};
use crate::model::snapshot::{Snapshot, SnapshotId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whole exported model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerDocument {
    pub skills: Vec<Skill>,
    pub snapshots: Vec<SnapshotRecord>,
}

/// Serialized snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub id: SnapshotId,
    pub name: String,
    /// `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub scores: BTreeMap<SkillId, i64>,
}

impl From<&Snapshot> for SnapshotRecord {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name.clone(),
            date: snapshot.date,
            scores: snapshot
                .scores
                .iter()
                .map(|(skill_id, score)| (*skill_id, i64::from(score.value())))
                .collect(),
        }
    }
}

impl TrackerDocument {
    /// Captures skills (display order) and snapshots (creation order).
    pub fn from_model(skills: &[Skill], snapshots: &[Snapshot]) -> Self {
        Self {
            skills: skills.to_vec(),
            snapshots: snapshots.iter().map(SnapshotRecord::from).collect(),
        }
    }
}
