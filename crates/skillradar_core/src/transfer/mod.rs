//! Export/import of the whole tracker model as JSON.
//!
//! # Responsibility
//! - Encode the model into the portable document format.
//! - Decode and validate documents before any state is replaced.
//! - Read/write documents from/to files.
//!
//! # Invariants
//! - Decoding is all-or-nothing: a rejected document yields no model parts.
//! - Structural problems are rejected under every `ImportPolicy`.
//! - Decoded snapshots never hold out-of-range scores or orphaned keys.
//! - Decoded ids are below `u64::MAX`, which the allocators never hand out.

use crate::config::ImportPolicy;
use crate::model::score::Score;
use crate::model::skill::{Skill, SkillId};
use crate::model::snapshot::{ScoreMap, Snapshot, SnapshotId};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod document;

pub use document::{SnapshotRecord, TrackerDocument};

pub type TransferResult<T> = Result<T, TransferError>;

/// Import/export failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Document shape does not match the expected format.
    Malformed(String),
    /// Strict policy: score outside `[0, 5]`.
    ScoreOutOfRange {
        snapshot_id: SnapshotId,
        skill_id: SkillId,
        value: i64,
    },
    /// Strict policy: score key for a skill not in the document.
    OrphanScore {
        snapshot_id: SnapshotId,
        skill_id: SkillId,
    },
    Io { path: PathBuf, message: String },
    Encode(String),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(
                f,
                "invalid skill radar document: {message} (expected {{ skills, snapshots }})"
            ),
            Self::ScoreOutOfRange {
                snapshot_id,
                skill_id,
                value,
            } => write!(
                f,
                "snapshot {snapshot_id} has score {value} for skill {skill_id}; expected 0..=5"
            ),
            Self::OrphanScore {
                snapshot_id,
                skill_id,
            } => write!(f, "snapshot {snapshot_id} scores unknown skill {skill_id}"),
            Self::Io { path, message } => {
                write!(f, "cannot access `{}`: {message}", path.display())
            }
            Self::Encode(message) => write!(f, "failed to encode document: {message}"),
        }
    }
}

impl Error for TransferError {}

impl TransferError {
    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "import_malformed",
            Self::ScoreOutOfRange { .. } => "import_score_out_of_range",
            Self::OrphanScore { .. } => "import_orphan_score",
            Self::Io { .. } => "transfer_io_failed",
            Self::Encode(_) => "export_encode_failed",
        }
    }
}

/// Counts of what an import loaded and repaired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub skills: usize,
    pub snapshots: usize,
    /// Scores pinned into `[0, 5]` under `ImportPolicy::Repair`.
    pub clamped_scores: usize,
    /// Orphaned keys dropped under `ImportPolicy::Repair`.
    pub dropped_orphans: usize,
}

impl ImportReport {
    /// True when nothing had to be repaired.
    pub fn is_clean(&self) -> bool {
        self.clamped_scores == 0 && self.dropped_orphans == 0
    }
}

/// Validated model parts ready to replace current state.
#[derive(Debug, Clone)]
pub struct DecodedModel {
    pub skills: Vec<Skill>,
    pub snapshots: Vec<Snapshot>,
    pub report: ImportReport,
}

/// Serializes a document as two-space indented JSON.
pub fn encode_document(document: &TrackerDocument) -> TransferResult<String> {
    serde_json::to_string_pretty(document).map_err(|err| TransferError::Encode(err.to_string()))
}

/// Parses JSON text into a document, checking top-level structure first.
pub fn decode_document(input: &str) -> TransferResult<TrackerDocument> {
    let value: Value = serde_json::from_str(input)
        .map_err(|err| TransferError::Malformed(format!("not valid JSON: {err}")))?;
    let Some(root) = value.as_object() else {
        return Err(TransferError::Malformed(
            "top-level value must be an object".to_string(),
        ));
    };
    for field in ["skills", "snapshots"] {
        match root.get(field) {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(TransferError::Malformed(format!(
                    "`{field}` must be an array"
                )))
            }
            None => return Err(TransferError::Malformed(format!("missing `{field}`"))),
        }
    }

    serde_json::from_value(value).map_err(|err| TransferError::Malformed(err.to_string()))
}

/// Validates a document and converts it into model parts.
///
/// # Errors
/// - `Malformed` for blank names, repeated ids or the reserved id `u64::MAX`
///   in either collection.
/// - `ScoreOutOfRange` / `OrphanScore` under `ImportPolicy::Strict`.
pub fn validate_document(
    document: TrackerDocument,
    policy: ImportPolicy,
) -> TransferResult<DecodedModel> {
    let mut skill_ids = HashSet::with_capacity(document.skills.len());
    let mut skills = Vec::with_capacity(document.skills.len());
    for skill in document.skills {
        check_id("skill", skill.id)?;
        if !skill_ids.insert(skill.id) {
            return Err(TransferError::Malformed(format!(
                "skill id {} appears more than once",
                skill.id
            )));
        }
        let name = skill.name.trim();
        if name.is_empty() {
            return Err(TransferError::Malformed(format!(
                "skill {} has a blank name",
                skill.id
            )));
        }
        skills.push(Skill::new(skill.id, name));
    }

    let mut report = ImportReport {
        skills: skills.len(),
        snapshots: document.snapshots.len(),
        ..ImportReport::default()
    };
    let mut snapshot_ids = HashSet::with_capacity(document.snapshots.len());
    let mut snapshots = Vec::with_capacity(document.snapshots.len());
    for record in document.snapshots {
        check_id("snapshot", record.id)?;
        if !snapshot_ids.insert(record.id) {
            return Err(TransferError::Malformed(format!(
                "snapshot id {} appears more than once",
                record.id
            )));
        }
        let name = record.name.trim();
        if name.is_empty() {
            return Err(TransferError::Malformed(format!(
                "snapshot {} has a blank name",
                record.id
            )));
        }

        let mut scores = ScoreMap::with_capacity(record.scores.len());
        for (skill_id, raw) in record.scores {
            if !skill_ids.contains(&skill_id) {
                match policy {
                    ImportPolicy::Repair => {
                        report.dropped_orphans += 1;
                        continue;
                    }
                    ImportPolicy::Strict => {
                        return Err(TransferError::OrphanScore {
                            snapshot_id: record.id,
                            skill_id,
                        })
                    }
                }
            }
            let score = match (Score::new(raw), policy) {
                (Ok(score), _) => score,
                (Err(_), ImportPolicy::Repair) => {
                    report.clamped_scores += 1;
                    Score::clamped(raw)
                }
                (Err(_), ImportPolicy::Strict) => {
                    return Err(TransferError::ScoreOutOfRange {
                        snapshot_id: record.id,
                        skill_id,
                        value: raw,
                    })
                }
            };
            scores.insert(skill_id, score);
        }
        snapshots.push(Snapshot::new(record.id, name, record.date, scores));
    }

    Ok(DecodedModel {
        skills,
        snapshots,
        report,
    })
}

fn check_id(kind: &str, id: u64) -> TransferResult<()> {
    if id == u64::MAX {
        return Err(TransferError::Malformed(format!("{kind} id {id} is reserved")));
    }
    Ok(())
}

/// Reads a document file into a string.
pub fn read_document_file(path: &Path) -> TransferResult<String> {
    std::fs::read_to_string(path).map_err(|err| TransferError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Writes encoded JSON to `path`, replacing existing content.
pub fn write_document_file(path: &Path, contents: &str) -> TransferResult<()> {
    std::fs::write(path, contents).map_err(|err| TransferError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_document, validate_document, TransferError};
    use crate::config::ImportPolicy;

    #[test]
    fn decode_reports_top_level_shape_problems() {
        let err = decode_document("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("must be an object"));

        let err = decode_document(r#"{ "skills": [] }"#).unwrap_err();
        assert_eq!(err, TransferError::Malformed("missing `snapshots`".to_string()));

        let err = decode_document(r#"{ "skills": {}, "snapshots": [] }"#).unwrap_err();
        assert!(err.to_string().contains("`skills` must be an array"));

        let err = decode_document("{ not json").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn decode_rejects_mistyped_nested_fields() {
        let cases = [
            r#"{ "skills": [ { "id": 1 } ], "snapshots": [] }"#,
            r#"{ "skills": [ { "id": "1", "name": "A" } ], "snapshots": [] }"#,
            r#"{ "skills": [], "snapshots": [ { "id": 1, "name": "S", "date": "03/02/2026", "scores": {} } ] }"#,
            r#"{ "skills": [], "snapshots": [ { "id": 1, "name": "S", "date": "2026-03-02", "scores": { "x": 1 } } ] }"#,
            r#"{ "skills": [], "snapshots": [ { "id": 1, "name": "S", "date": "2026-03-02", "scores": { "1": 2.5 } } ] }"#,
            r#"{ "skills": [], "snapshots": [ { "id": 1, "name": "S", "date": "2026-03-02" } ] }"#,
        ];
        for case in cases {
            let err = decode_document(case).unwrap_err();
            assert!(
                matches!(err, TransferError::Malformed(_)),
                "case should be malformed: {case}"
            );
        }
    }

    #[test]
    fn validate_rejects_duplicate_ids_and_blank_names() {
        let doc = decode_document(
            r#"{ "skills": [ { "id": 1, "name": "A" }, { "id": 1, "name": "B" } ], "snapshots": [] }"#,
        )
        .unwrap();
        let err = validate_document(doc, ImportPolicy::Repair).unwrap_err();
        assert!(err.to_string().contains("appears more than once"));

        let doc = decode_document(
            r#"{ "skills": [], "snapshots": [ { "id": 4, "name": "  ", "date": "2026-03-02", "scores": {} } ] }"#,
        )
        .unwrap();
        let err = validate_document(doc, ImportPolicy::Repair).unwrap_err();
        assert!(err.to_string().contains("blank name"));
    }

    #[test]
    fn repair_clamps_and_drops_while_strict_rejects() {
        let input = r#"{
            "skills": [ { "id": 1, "name": "A" } ],
            "snapshots": [ { "id": 1, "name": "S", "date": "2026-03-02",
                             "scores": { "1": 9, "2": 3 } } ]
        }"#;

        let repaired = validate_document(decode_document(input).unwrap(), ImportPolicy::Repair)
            .unwrap();
        assert_eq!(repaired.report.clamped_scores, 1);
        assert_eq!(repaired.report.dropped_orphans, 1);
        assert!(!repaired.report.is_clean());
        assert_eq!(repaired.snapshots[0].score(1).map(|s| s.value()), Some(5));
        assert!(repaired.snapshots[0].score(2).is_none());

        let err = validate_document(decode_document(input).unwrap(), ImportPolicy::Strict)
            .unwrap_err();
        assert!(matches!(
            err,
            TransferError::ScoreOutOfRange { .. } | TransferError::OrphanScore { .. }
        ));
    }
}
