//! Snapshot store with visibility and selection state.
//!
//! # Responsibility
//! - Allocate snapshot ids and keep snapshots in creation order.
//! - Track which snapshots are overlaid on the chart and which one is
//!   selected for detail editing.
//!
//! # Invariants
//! - `visible` is a subset of current snapshot ids.
//! - `selected`, when set, references a current snapshot.
//! - Removing the selected snapshot selects the first remaining one, or none.

use crate::model::score::Score;
use crate::model::skill::{normalize_name, SkillId};
use crate::model::snapshot::{ScoreMap, Snapshot, SnapshotId};
use crate::store::{allocate_id, next_id_after, StoreError, StoreResult};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Snapshots in creation order plus overlay/selection state.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    snapshots: Vec<Snapshot>,
    next_id: SnapshotId,
    visible: BTreeSet<SnapshotId>,
    selected: Option<SnapshotId>,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self {
            snapshots: Vec::new(),
            next_id: 1,
            visible: BTreeSet::new(),
            selected: None,
        }
    }
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot, makes it visible and selects it.
    ///
    /// `scores` must already be reconciled against the registry.
    ///
    /// # Errors
    /// - `BlankSnapshotName` when `name` trims to empty.
    /// - `IdsExhausted` when the allocator has no ids left.
    pub fn push(
        &mut self,
        name: &str,
        date: NaiveDate,
        scores: ScoreMap,
    ) -> StoreResult<SnapshotId> {
        let name = normalize_name(name).ok_or(StoreError::BlankSnapshotName)?;
        let id = allocate_id(&mut self.next_id)?;
        self.snapshots.push(Snapshot::new(id, name, date, scores));
        self.visible.insert(id);
        self.selected = Some(id);
        Ok(id)
    }

    /// Renames in place. Returns `false` for blank names or unknown ids.
    pub fn rename(&mut self, id: SnapshotId, name: &str) -> bool {
        let Some(name) = normalize_name(name) else {
            return false;
        };
        match self.get_mut(id) {
            Some(snapshot) => {
                snapshot.name = name;
                true
            }
            None => false,
        }
    }

    /// Removes a snapshot and repairs visibility/selection.
    ///
    /// Returns `None` for unknown ids.
    pub fn remove(&mut self, id: SnapshotId) -> Option<Snapshot> {
        let index = self.snapshots.iter().position(|s| s.id == id)?;
        let removed = self.snapshots.remove(index);
        self.visible.remove(&id);
        if self.selected == Some(id) {
            self.selected = self.snapshots.first().map(|s| s.id);
        }
        Some(removed)
    }

    /// Stores one validated score.
    ///
    /// Skill existence is checked by the caller, which owns the registry.
    pub fn set_score(
        &mut self,
        id: SnapshotId,
        skill_id: SkillId,
        score: Score,
    ) -> StoreResult<()> {
        let snapshot = self.get_mut(id).ok_or(StoreError::SnapshotNotFound(id))?;
        snapshot.scores.insert(skill_id, score);
        Ok(())
    }

    /// Flips chart overlay membership. Returns `false` for unknown ids.
    pub fn toggle_visibility(&mut self, id: SnapshotId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        if !self.visible.remove(&id) {
            self.visible.insert(id);
        }
        true
    }

    /// Selects one snapshot for detail editing.
    pub fn select(&mut self, id: SnapshotId) -> StoreResult<()> {
        if self.get(id).is_none() {
            return Err(StoreError::SnapshotNotFound(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Replaces contents wholesale.
    ///
    /// Resets the allocator to `max + 1`, shows every snapshot and selects
    /// the first one. Callers validate id uniqueness beforehand.
    pub fn replace_all(&mut self, snapshots: Vec<Snapshot>) {
        self.next_id = next_id_after(snapshots.iter().map(|s| s.id));
        self.visible = snapshots.iter().map(|s| s.id).collect();
        self.selected = snapshots.first().map(|s| s.id);
        self.snapshots = snapshots;
    }

    pub fn get(&self, id: SnapshotId) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: SnapshotId) -> Option<&mut Snapshot> {
        self.snapshots.iter_mut().find(|s| s.id == id)
    }

    /// Snapshots in creation order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub(crate) fn snapshots_mut(&mut self) -> &mut [Snapshot] {
        &mut self.snapshots
    }

    /// Most recently created snapshot.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn is_visible(&self, id: SnapshotId) -> bool {
        self.visible.contains(&id)
    }

    pub fn visible_ids(&self) -> impl Iterator<Item = SnapshotId> + '_ {
        self.visible.iter().copied()
    }

    pub fn selected(&self) -> Option<SnapshotId> {
        self.selected
    }

    pub fn next_id(&self) -> SnapshotId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::SnapshotStore;
    use crate::model::score::Score;
    use crate::model::snapshot::{ScoreMap, Snapshot};
    use crate::store::StoreError;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn store_with(names: &[&str]) -> SnapshotStore {
        let mut store = SnapshotStore::new();
        for name in names {
            store.push(name, day(), ScoreMap::new()).unwrap();
        }
        store
    }

    #[test]
    fn push_marks_visible_and_selected() {
        let mut store = SnapshotStore::new();
        assert_eq!(
            store.push(" ", day(), ScoreMap::new()),
            Err(StoreError::BlankSnapshotName)
        );
        assert!(store.is_empty());

        let id = store.push(" Week 1 ", day(), ScoreMap::new()).unwrap();
        assert_eq!(id, 1);
        assert_eq!(store.get(id).unwrap().name, "Week 1");
        assert!(store.is_visible(id));
        assert_eq!(store.selected(), Some(id));
    }

    #[test]
    fn remove_selected_falls_back_to_first_remaining() {
        let mut store = store_with(&["S1", "S2", "S3"]);
        store.select(2).unwrap();

        store.remove(2).unwrap();
        assert_eq!(store.selected(), Some(1));
        assert!(!store.is_visible(2));

        store.remove(1).unwrap();
        assert_eq!(store.selected(), Some(3));
        store.remove(3).unwrap();
        assert_eq!(store.selected(), None);
        assert_eq!(store.visible_ids().count(), 0);
    }

    #[test]
    fn remove_unselected_keeps_selection() {
        let mut store = store_with(&["S1", "S2"]);
        assert_eq!(store.selected(), Some(2));
        store.remove(1).unwrap();
        assert_eq!(store.selected(), Some(2));
        assert!(store.remove(1).is_none());
    }

    #[test]
    fn toggle_visibility_ignores_unknown_ids() {
        let mut store = store_with(&["S1"]);
        assert!(store.toggle_visibility(1));
        assert!(!store.is_visible(1));
        assert!(store.toggle_visibility(1));
        assert!(store.is_visible(1));
        assert!(!store.toggle_visibility(42));
        assert!(!store.is_visible(42));
    }

    #[test]
    fn select_rejects_unknown_ids() {
        let mut store = store_with(&["S1", "S2"]);
        assert_eq!(store.select(9), Err(StoreError::SnapshotNotFound(9)));
        assert_eq!(store.selected(), Some(2));
        store.clear_selection();
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn set_score_requires_existing_snapshot() {
        let mut store = store_with(&["S1"]);
        store.set_score(1, 4, Score::MAX).unwrap();
        assert_eq!(store.get(1).unwrap().score(4), Some(Score::MAX));
        assert_eq!(
            store.set_score(2, 4, Score::MIN),
            Err(StoreError::SnapshotNotFound(2))
        );
    }

    #[test]
    fn ids_keep_increasing_after_removal() {
        let mut store = store_with(&["S1", "S2"]);
        store.remove(2).unwrap();
        let id = store.push("S3", day(), ScoreMap::new()).unwrap();
        assert_eq!(id, 3);
    }

    #[test]
    fn push_reports_exhausted_allocator() {
        let mut store = SnapshotStore::new();
        store.replace_all(vec![Snapshot::new(u64::MAX - 1, "S1", day(), ScoreMap::new())]);
        assert_eq!(
            store.push("S2", day(), ScoreMap::new()),
            Err(StoreError::IdsExhausted)
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.selected(), Some(u64::MAX - 1));
    }
}
