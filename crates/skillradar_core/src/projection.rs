//! Chart projection over skills and snapshots.
//!
//! # Responsibility
//! - Derive one row per skill with one point per snapshot.
//! - Flatten rows into the keyed objects radar chart widgets consume.
//!
//! # Invariants
//! - Rows follow skill display order; points follow snapshot creation order.
//! - Every snapshot contributes a point regardless of visibility, so toggling
//!   visibility never changes the row shape.
//! - Missing scores project as 0; orphaned keys are never read.
//! - Output is recomputed on every call.

use crate::model::skill::{Skill, SkillId};
use crate::model::snapshot::{Snapshot, SnapshotId};
use serde::Serialize;
use serde_json::{Map, Value};

/// One snapshot's value on one skill axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectionPoint {
    pub snapshot_id: SnapshotId,
    pub score: u8,
}

/// One chart axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionRow {
    pub skill_id: SkillId,
    /// Axis label (skill display name).
    pub subject: String,
    pub points: Vec<ProjectionPoint>,
}

impl ProjectionRow {
    pub fn score_for(&self, snapshot_id: SnapshotId) -> Option<u8> {
        self.points
            .iter()
            .find(|point| point.snapshot_id == snapshot_id)
            .map(|point| point.score)
    }
}

/// Projects skills x snapshots into chart rows.
pub fn project(skills: &[Skill], snapshots: &[Snapshot]) -> Vec<ProjectionRow> {
    skills
        .iter()
        .map(|skill| ProjectionRow {
            skill_id: skill.id,
            subject: skill.name.clone(),
            points: snapshots
                .iter()
                .map(|snapshot| ProjectionPoint {
                    snapshot_id: snapshot.id,
                    score: snapshot.score_or_min(skill.id).value(),
                })
                .collect(),
        })
        .collect()
}

/// Series key used for one snapshot in flattened chart rows.
pub fn series_key(snapshot_id: SnapshotId) -> String {
    format!("snap_{snapshot_id}")
}

/// Flattens rows into `{ "subject": .., "snap_<id>": .. }` objects.
pub fn chart_rows(rows: &[ProjectionRow]) -> Vec<Value> {
    rows.iter()
        .map(|row| {
            let mut object = Map::new();
            object.insert("subject".to_string(), Value::from(row.subject.as_str()));
            for point in &row.points {
                object.insert(series_key(point.snapshot_id), Value::from(point.score));
            }
            Value::Object(object)
        })
        .collect()
}
