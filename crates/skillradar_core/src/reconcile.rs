//! Cascade rules between the skill registry and snapshot score maps.
//!
//! # Responsibility
//! - Backfill new skills into existing snapshots.
//! - Purge removed skills from every snapshot.
//! - Build complete score maps for newly created snapshots.
//!
//! # Invariants
//! - Functions are pure over their arguments; callers apply them as part of
//!   the same mutation that changed the registry or store.
//! - A backfill never overwrites an existing entry.

use crate::model::score::Score;
use crate::model::skill::SkillId;
use crate::model::snapshot::{ScoreMap, Snapshot};

/// Inserts `Score::DEFAULT` for `skill_id` wherever it is absent.
///
/// Returns the number of snapshots that received an entry.
pub fn backfill_skill(snapshots: &mut [Snapshot], skill_id: SkillId) -> usize {
    let mut inserted = 0;
    for snapshot in snapshots.iter_mut() {
        if !snapshot.scores.contains_key(&skill_id) {
            snapshot.scores.insert(skill_id, Score::DEFAULT);
            inserted += 1;
        }
    }
    inserted
}

/// Deletes the `skill_id` key from every snapshot.
///
/// Returns the number of snapshots that held an entry.
pub fn purge_skill(snapshots: &mut [Snapshot], skill_id: SkillId) -> usize {
    let mut purged = 0;
    for snapshot in snapshots.iter_mut() {
        if snapshot.scores.remove(&skill_id).is_some() {
            purged += 1;
        }
    }
    purged
}

/// Builds a score map with exactly one entry per skill in `skill_ids`.
///
/// Values come from `seed` when present, otherwise `Score::DEFAULT`. Seed
/// entries for other skills are not copied.
pub fn seed_scores(skill_ids: impl IntoIterator<Item = SkillId>, seed: &ScoreMap) -> ScoreMap {
    skill_ids
        .into_iter()
        .map(|id| (id, seed.get(&id).copied().unwrap_or(Score::DEFAULT)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{backfill_skill, purge_skill, seed_scores};
    use crate::model::score::Score;
    use crate::model::snapshot::{ScoreMap, Snapshot};
    use chrono::NaiveDate;

    fn snapshot(id: u64, scores: &[(u64, i64)]) -> Snapshot {
        let scores = scores
            .iter()
            .map(|(skill, value)| (*skill, Score::new(*value).unwrap()))
            .collect();
        Snapshot::new(
            id,
            format!("S{id}"),
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            scores,
        )
    }

    #[test]
    fn backfill_only_fills_missing_entries() {
        let mut snapshots = vec![snapshot(1, &[(1, 4)]), snapshot(2, &[(1, 1), (2, 5)])];
        let inserted = backfill_skill(&mut snapshots, 2);
        assert_eq!(inserted, 1);
        assert_eq!(snapshots[0].score(2), Some(Score::DEFAULT));
        assert_eq!(snapshots[1].score(2), Some(Score::MAX));
    }

    #[test]
    fn purge_removes_key_everywhere() {
        let mut snapshots = vec![snapshot(1, &[(1, 4), (2, 3)]), snapshot(2, &[(2, 0)])];
        assert_eq!(purge_skill(&mut snapshots, 2), 2);
        assert!(snapshots.iter().all(|s| s.score(2).is_none()));
        assert_eq!(snapshots[0].score(1).map(Score::value), Some(4));
    }

    #[test]
    fn seed_defaults_missing_and_skips_unknown() {
        let mut seed = ScoreMap::new();
        seed.insert(1, Score::new(3).unwrap());
        seed.insert(9, Score::new(5).unwrap());

        let scores = seed_scores([1, 2], &seed);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[&1].value(), 3);
        assert_eq!(scores[&2], Score::DEFAULT);
    }
}
