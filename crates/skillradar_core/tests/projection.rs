use chrono::NaiveDate;
use skillradar_core::{
    project, CoreConfig, FixedClock, Score, ScoreMap, Skill, Snapshot, TrackerService,
};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

#[test]
fn rows_follow_display_order_with_one_point_per_snapshot() {
    let mut tracker = TrackerService::with_clock(CoreConfig::default(), FixedClock(day()));
    let mut seed = ScoreMap::new();
    seed.insert(1, Score::new(4).unwrap());
    tracker
        .create_first_snapshot("S1", vec![Skill::new(1, "A"), Skill::new(2, "B")], &seed)
        .unwrap();
    tracker.create_snapshot_from_latest("S2").unwrap();
    tracker.move_skill(1, -1);

    let rows = tracker.project();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].subject, "B");
    assert_eq!(rows[1].subject, "A");
    assert_eq!(rows[1].points.len(), 2);
    assert_eq!(rows[1].score_for(1), Some(4));
    assert_eq!(rows[0].score_for(2), Some(2));
}

#[test]
fn hidden_snapshots_keep_the_row_shape() {
    let mut tracker = TrackerService::with_clock(CoreConfig::default(), FixedClock(day()));
    tracker
        .create_first_snapshot("S1", vec![Skill::new(1, "A")], &ScoreMap::new())
        .unwrap();
    tracker.create_snapshot_from_latest("S2").unwrap();

    let before = tracker.project();
    tracker.toggle_visibility(1);
    assert_eq!(tracker.project(), before);
    assert_eq!(tracker.chart_rows()[0]["snap_1"], 2);
}

#[test]
fn missing_scores_fall_back_to_zero_and_orphans_are_ignored() {
    let skills = vec![Skill::new(1, "A"), Skill::new(2, "B")];
    let mut scores = ScoreMap::new();
    scores.insert(1, Score::new(5).unwrap());
    scores.insert(77, Score::new(3).unwrap());
    let snapshots = vec![Snapshot::new(1, "S1", day(), scores)];

    let rows = project(&skills, &snapshots);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].score_for(1), Some(5));
    assert_eq!(rows[1].score_for(1), Some(0));
    assert!(rows.iter().all(|row| row.skill_id != 77));
}

#[test]
fn projection_without_snapshots_has_empty_points() {
    let rows = project(&[Skill::new(1, "A")], &[]);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].points.is_empty());
}
