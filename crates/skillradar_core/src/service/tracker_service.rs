//! Tracker use-case service.
//!
//! # Responsibility
//! - Own the skill registry and snapshot store for one session.
//! - Apply cascade rules in the same call as the mutation that needs them.
//! - Expose import/export and projection to presentation layers.
//!
//! # Invariants
//! - Every mutation either completes fully or leaves state untouched.
//! - No snapshot score map holds a key for a skill outside the registry.
//! - Adding a skill backfills `Score::DEFAULT` into every snapshot.

use crate::clock::{Clock, SystemClock};
use crate::config::CoreConfig;
use crate::model::score::Score;
use crate::model::skill::{normalize_name, Skill, SkillId};
use crate::model::snapshot::{ScoreMap, Snapshot, SnapshotId};
use crate::projection::{chart_rows, project, ProjectionRow};
use crate::reconcile::{backfill_skill, purge_skill, seed_scores};
use crate::store::skill_registry::SkillRegistry;
use crate::store::snapshot_store::SnapshotStore;
use crate::store::{StoreError, StoreResult};
use crate::transfer::{
    decode_document, encode_document, read_document_file, validate_document,
    write_document_file, ImportReport, TrackerDocument, TransferResult,
};
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Snapshot list entry with overlay/selection flags resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotView {
    pub id: SnapshotId,
    pub name: String,
    pub date: NaiveDate,
    pub visible: bool,
    pub selected: bool,
}

/// Session context holding all tracker state.
pub struct TrackerService<C: Clock = SystemClock> {
    registry: SkillRegistry,
    store: SnapshotStore,
    config: CoreConfig,
    clock: C,
    unsaved_changes: bool,
}

impl TrackerService<SystemClock> {
    /// Creates an empty tracker dated by the local calendar.
    pub fn new(config: CoreConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TrackerService<C> {
    pub fn with_clock(config: CoreConfig, clock: C) -> Self {
        Self {
            registry: SkillRegistry::new(),
            store: SnapshotStore::new(),
            config,
            clock,
            unsaved_changes: false,
        }
    }

    /// Appends a skill and backfills it into every snapshot.
    pub fn add_skill(&mut self, name: &str) -> StoreResult<SkillId> {
        let id = self.registry.add(name).inspect_err(|err| {
            warn!(
                "event=skill_add module=tracker status=rejected error_code={}",
                err.code()
            );
        })?;
        let backfilled = backfill_skill(self.store.snapshots_mut(), id);
        self.unsaved_changes = true;
        info!("event=skill_add module=tracker status=ok skill_id={id} backfilled={backfilled}");
        Ok(id)
    }

    /// Renames a skill. Blank names and unknown ids are no-ops.
    pub fn rename_skill(&mut self, id: SkillId, name: &str) -> bool {
        let changed = self.registry.rename(id, name);
        self.note_change("skill_rename", changed);
        changed
    }

    /// Swaps the skill at `position` with its neighbour at `position + delta`.
    pub fn move_skill(&mut self, position: usize, delta: isize) -> bool {
        let changed = self.registry.move_skill(position, delta);
        self.note_change("skill_move", changed);
        changed
    }

    /// Removes a skill and purges its scores from every snapshot.
    pub fn remove_skill(&mut self, id: SkillId) -> bool {
        if self.registry.remove(id).is_none() {
            debug!("event=skill_remove module=tracker status=noop skill_id={id}");
            return false;
        }
        let purged = purge_skill(self.store.snapshots_mut(), id);
        self.unsaved_changes = true;
        info!("event=skill_remove module=tracker status=ok skill_id={id} purged={purged}");
        true
    }

    /// Installs the initial skill set together with the first snapshot.
    ///
    /// Skills without a score in `scores` get `Score::DEFAULT`; scores for
    /// ids outside `skills` are dropped. The skill id counter keeps any ids
    /// the registry already handed out.
    ///
    /// # Errors
    /// - `StoreNotEmpty` when snapshots already exist.
    /// - `BlankSnapshotName`, `EmptySkillList`.
    /// - `BlankSkillName` / `DuplicateSkillId` for an inconsistent skill list.
    pub fn create_first_snapshot(
        &mut self,
        name: &str,
        skills: Vec<Skill>,
        scores: &ScoreMap,
    ) -> StoreResult<SnapshotId> {
        let result = self.try_create_first_snapshot(name, skills, scores);
        match &result {
            Ok(id) => info!(
                "event=snapshot_create module=tracker status=ok flow=first_run snapshot_id={id} skills={}",
                self.registry.len()
            ),
            Err(err) => warn!(
                "event=snapshot_create module=tracker status=rejected flow=first_run error_code={}",
                err.code()
            ),
        }
        result
    }

    fn try_create_first_snapshot(
        &mut self,
        name: &str,
        skills: Vec<Skill>,
        scores: &ScoreMap,
    ) -> StoreResult<SnapshotId> {
        if !self.store.is_empty() {
            return Err(StoreError::StoreNotEmpty);
        }
        if normalize_name(name).is_none() {
            return Err(StoreError::BlankSnapshotName);
        }
        if skills.is_empty() {
            return Err(StoreError::EmptySkillList);
        }

        let mut seen = HashSet::with_capacity(skills.len());
        let mut normalized = Vec::with_capacity(skills.len());
        for skill in skills {
            if !seen.insert(skill.id) {
                return Err(StoreError::DuplicateSkillId(skill.id));
            }
            let skill_name = normalize_name(&skill.name).ok_or(StoreError::BlankSkillName)?;
            normalized.push(Skill::new(skill.id, skill_name));
        }

        let seeded = seed_scores(normalized.iter().map(|skill| skill.id), scores);
        let id = self.store.push(name, self.clock.today(), seeded)?;
        self.registry.install(normalized);
        self.unsaved_changes = true;
        Ok(id)
    }

    /// Appends a snapshot seeded from `seed`, defaulting missing skills to 2.
    ///
    /// # Errors
    /// - `NoSkills` when the registry is empty.
    /// - `BlankSnapshotName`.
    pub fn create_snapshot(&mut self, name: &str, seed: &ScoreMap) -> StoreResult<SnapshotId> {
        let result = if self.registry.is_empty() {
            Err(StoreError::NoSkills)
        } else {
            let scores = seed_scores(self.registry.ids(), seed);
            self.store.push(name, self.clock.today(), scores)
        };
        match &result {
            Ok(id) => {
                self.unsaved_changes = true;
                info!(
                    "event=snapshot_create module=tracker status=ok flow=incremental snapshot_id={id}"
                );
            }
            Err(err) => warn!(
                "event=snapshot_create module=tracker status=rejected flow=incremental error_code={}",
                err.code()
            ),
        }
        result
    }

    /// Appends a snapshot seeded from the most recent one.
    pub fn create_snapshot_from_latest(&mut self, name: &str) -> StoreResult<SnapshotId> {
        let seed = self.latest_scores().cloned().unwrap_or_default();
        self.create_snapshot(name, &seed)
    }

    /// Score map of the most recently created snapshot.
    pub fn latest_scores(&self) -> Option<&ScoreMap> {
        self.store.latest().map(|snapshot| &snapshot.scores)
    }

    /// Renames a snapshot. Blank names and unknown ids are no-ops.
    pub fn rename_snapshot(&mut self, id: SnapshotId, name: &str) -> bool {
        let changed = self.store.rename(id, name);
        self.note_change("snapshot_rename", changed);
        changed
    }

    /// Removes a snapshot; selection falls back to the first remaining one.
    pub fn remove_snapshot(&mut self, id: SnapshotId) -> bool {
        let changed = self.store.remove(id).is_some();
        self.note_change("snapshot_remove", changed);
        changed
    }

    /// Stores one score after range and reference checks.
    ///
    /// # Errors
    /// - `Score(OutOfRange)` for values outside `[0, 5]`; nothing is clamped.
    /// - `SkillNotFound` / `SnapshotNotFound` for unknown ids.
    pub fn set_score(
        &mut self,
        snapshot_id: SnapshotId,
        skill_id: SkillId,
        value: i64,
    ) -> StoreResult<()> {
        let result = Score::new(value)
            .map_err(StoreError::from)
            .and_then(|score| {
                if !self.registry.contains(skill_id) {
                    return Err(StoreError::SkillNotFound(skill_id));
                }
                self.store.set_score(snapshot_id, skill_id, score)
            });
        match &result {
            Ok(()) => {
                self.unsaved_changes = true;
                debug!(
                    "event=score_set module=tracker status=ok snapshot_id={snapshot_id} skill_id={skill_id}"
                );
            }
            Err(err) => warn!(
                "event=score_set module=tracker status=rejected snapshot_id={snapshot_id} skill_id={skill_id} error_code={}",
                err.code()
            ),
        }
        result
    }

    /// Flips chart overlay membership. Unknown ids are no-ops.
    pub fn toggle_visibility(&mut self, id: SnapshotId) -> bool {
        self.store.toggle_visibility(id)
    }

    /// Selects one snapshot for detail editing.
    pub fn select(&mut self, id: SnapshotId) -> StoreResult<()> {
        self.store.select(id)
    }

    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    /// Skills in display order.
    pub fn skills(&self) -> &[Skill] {
        self.registry.skills()
    }

    /// Snapshots in creation order.
    pub fn snapshots(&self) -> &[Snapshot] {
        self.store.snapshots()
    }

    pub fn snapshot(&self, id: SnapshotId) -> Option<&Snapshot> {
        self.store.get(id)
    }

    pub fn selected_snapshot(&self) -> Option<&Snapshot> {
        self.store.selected().and_then(|id| self.store.get(id))
    }

    pub fn snapshot_views(&self) -> Vec<SnapshotView> {
        let selected = self.store.selected();
        self.store
            .snapshots()
            .iter()
            .map(|snapshot| SnapshotView {
                id: snapshot.id,
                name: snapshot.name.clone(),
                date: snapshot.date,
                visible: self.store.is_visible(snapshot.id),
                selected: selected == Some(snapshot.id),
            })
            .collect()
    }

    pub fn registry(&self) -> &SkillRegistry {
        &self.registry
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// True when data changed since the last export or import.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    /// Chart rows, recomputed on every call.
    pub fn project(&self) -> Vec<ProjectionRow> {
        project(self.registry.skills(), self.store.snapshots())
    }

    /// Chart rows flattened into `snap_<id>` keyed objects.
    pub fn chart_rows(&self) -> Vec<Value> {
        chart_rows(&self.project())
    }

    /// Captures the current model as a document.
    pub fn export_document(&self) -> TrackerDocument {
        TrackerDocument::from_model(self.registry.skills(), self.store.snapshots())
    }

    /// Encodes the model as pretty JSON and clears the unsaved flag.
    pub fn export_json(&mut self) -> TransferResult<String> {
        let encoded = encode_document(&self.export_document())?;
        self.unsaved_changes = false;
        info!(
            "event=export module=tracker status=ok skills={} snapshots={} bytes={}",
            self.registry.len(),
            self.store.len(),
            encoded.len()
        );
        Ok(encoded)
    }

    pub fn export_file(&mut self, path: &Path) -> TransferResult<()> {
        let encoded = encode_document(&self.export_document())?;
        write_document_file(path, &encoded)?;
        self.unsaved_changes = false;
        info!(
            "event=export module=tracker status=ok target=file skills={} snapshots={}",
            self.registry.len(),
            self.store.len()
        );
        Ok(())
    }

    /// Replaces all state with a decoded document.
    ///
    /// On any error current state is left untouched.
    pub fn import_json(&mut self, input: &str) -> TransferResult<ImportReport> {
        let decoded = decode_document(input)
            .and_then(|document| validate_document(document, self.config.import_policy))
            .inspect_err(|err| {
                warn!(
                    "event=import module=tracker status=rejected error_code={}",
                    err.code()
                );
            })?;

        let report = decoded.report;
        if !report.is_clean() {
            warn!(
                "event=import_repair module=tracker status=ok clamped_scores={} dropped_orphans={}",
                report.clamped_scores, report.dropped_orphans
            );
        }
        self.registry.replace_all(decoded.skills);
        self.store.replace_all(decoded.snapshots);
        self.unsaved_changes = false;
        info!(
            "event=import module=tracker status=ok skills={} snapshots={}",
            report.skills, report.snapshots
        );
        Ok(report)
    }

    pub fn import_file(&mut self, path: &Path) -> TransferResult<ImportReport> {
        let contents = read_document_file(path)?;
        self.import_json(&contents)
    }

    fn note_change(&mut self, event: &str, changed: bool) {
        if changed {
            self.unsaved_changes = true;
            info!("event={event} module=tracker status=ok");
        } else {
            debug!("event={event} module=tracker status=noop");
        }
    }
}
