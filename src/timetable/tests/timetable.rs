use crate::day::DayOfWeek::{Friday, Monday, Tuesday};
use crate::error::{PeriodError, TimetableError};
use crate::timetable::tests::utils::{id, period, t};
use crate::timetable::timetable::{ConflictPolicy, Timetable};
use std::fs;

fn sample() -> Timetable {
    Timetable::new(
        id("7B"),
        vec![
            period("P3", Tuesday, "09:00", "10:00", "T1", "R1"),
            period("P2", Monday, "10:00", "11:00", "T2", "R2"),
            period("P1", Monday, "09:00", "10:00", "T1", "R1"),
        ],
    )
}

fn ids(timetable: &Timetable) -> Vec<&str> {
    timetable.periods().iter().map(|p| p.id.as_ref()).collect()
}

#[test]
fn test_periods_are_kept_in_weekly_order() {
    let mut timetable = sample();
    assert_eq!(ids(&timetable), vec!["P1", "P2", "P3"]);

    timetable
        .add(period("P4", Monday, "08:00", "09:00", "T3", "R3"), ConflictPolicy::Reject)
        .unwrap();
    assert_eq!(ids(&timetable), vec!["P4", "P1", "P2", "P3"]);
    assert_eq!(timetable.get("P2").map(|p| p.start_time), Some(t("10:00")));
    assert_eq!(timetable.periods_on(Monday).count(), 3);
    assert_eq!(timetable.periods_on(Friday).count(), 0);
}

#[test]
fn test_add_clear_period() {
    let mut timetable = sample();
    let report = timetable
        .add(period("P4", Monday, "11:00", "12:00", "T1", "R1"), ConflictPolicy::Reject)
        .unwrap();

    assert!(report.is_clear());
    assert_eq!(timetable.len(), 4);
}

#[test]
fn test_reject_policy_leaves_timetable_unchanged() {
    let mut timetable = sample();
    let result = timetable.add(
        period("P4", Monday, "09:30", "10:30", "T1", "R9"),
        ConflictPolicy::Reject,
    );

    match result {
        Err(TimetableError::Conflict { id: conflict_id, report }) => {
            assert_eq!(conflict_id, id("P4"));
            assert_eq!(report.time, vec![id("P1"), id("P2")]);
            assert_eq!(report.teacher, vec![id("P1")]);
            assert!(report.room.is_empty());
        }
        other => panic!("expected conflict, got {:?}", other.map(|r| r.to_string())),
    }
    assert_eq!(timetable.len(), 3);
    assert!(timetable.get("P4").is_none());
}

#[test]
fn test_warn_policy_stores_and_reports() {
    let mut timetable = sample();
    let report = timetable
        .add(period("P4", Monday, "09:30", "10:30", "T9", "R1"), ConflictPolicy::Warn)
        .unwrap();

    assert_eq!(report.room, vec![id("P1")]);
    assert_eq!(timetable.len(), 4);
    assert_eq!(timetable.audit().len(), 3);
}

#[test]
fn test_add_rejects_duplicates_and_invalid_periods() {
    let mut timetable = sample();

    assert!(matches!(
        timetable.add(period("P1", Friday, "09:00", "10:00", "T1", "R1"), ConflictPolicy::Warn),
        Err(TimetableError::DuplicatePeriod(_))
    ));
    assert!(matches!(
        timetable.add(period("P4", Friday, "10:00", "09:00", "T1", "R1"), ConflictPolicy::Warn),
        Err(TimetableError::Invalid(PeriodError::InvalidTimeRange { .. }))
    ));
    assert!(matches!(
        timetable.add(period("P4", Friday, "09:00", "10:00", "", "R1"), ConflictPolicy::Warn),
        Err(TimetableError::Invalid(PeriodError::MissingField("teacher")))
    ));
    assert_eq!(timetable.len(), 3);
}

#[test]
fn test_update_in_place_does_not_flag_itself() {
    let mut timetable = sample();
    let unchanged = timetable.get("P1").cloned().unwrap();

    let report = timetable.update(unchanged, ConflictPolicy::Reject).unwrap();
    assert!(report.is_clear());

    let moved = timetable
        .get("P1")
        .map(|p| p.moved_to(Friday, t("13:00"), t("14:00")))
        .unwrap();
    timetable.update(moved, ConflictPolicy::Reject).unwrap();
    assert_eq!(ids(&timetable), vec!["P2", "P3", "P1"]);
    assert_eq!(timetable.get("P1").map(|p| p.day), Some(Friday));
}

#[test]
fn test_update_into_conflict_is_rejected() {
    let mut timetable = sample();
    let moved = timetable
        .get("P3")
        .map(|p| p.moved_to(Monday, t("10:30"), t("11:30")))
        .unwrap();

    assert!(matches!(
        timetable.update(moved, ConflictPolicy::Reject),
        Err(TimetableError::Conflict { .. })
    ));
    assert_eq!(timetable.get("P3").map(|p| p.day), Some(Tuesday));
}

#[test]
fn test_update_and_remove_unknown_period() {
    let mut timetable = sample();

    assert!(matches!(
        timetable.update(period("P9", Monday, "13:00", "14:00", "T1", "R1"), ConflictPolicy::Warn),
        Err(TimetableError::UnknownPeriod(_))
    ));
    assert!(matches!(timetable.remove("P9"), Err(TimetableError::UnknownPeriod(_))));

    let removed = timetable.remove("P2").unwrap();
    assert_eq!(removed.id, id("P2"));
    assert_eq!(ids(&timetable), vec!["P1", "P3"]);
    assert!(timetable.get("P2").is_none());
    assert_eq!(timetable.get("P3").map(|p| p.day), Some(Tuesday));
}

#[test]
fn test_teachers_and_rooms_are_distinct_and_sorted() {
    let timetable = sample();
    assert_eq!(timetable.teachers(), vec![id("T1"), id("T2")]);
    assert_eq!(timetable.rooms(), vec![id("R1"), id("R2")]);
}

#[test]
fn test_audit_of_clean_timetable_is_empty() {
    assert!(sample().audit().is_empty());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("7b.json");
    let timetable = sample();

    timetable.save_to_file(&path).unwrap();
    let loaded = Timetable::load_from_file(&path).unwrap();

    assert_eq!(loaded.class_name, id("7B"));
    assert_eq!(loaded.periods(), timetable.periods());
}

#[test]
fn test_load_accepts_backend_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backend.json");
    fs::write(
        &path,
        r#"{
            "className": "8A",
            "periods": [
                {"_id": "p1", "day": "monday", "startTime": "09:00:00", "endTime": "09:45:00",
                 "subject": "HIST", "teacher": "t1", "room": "Lab 2"}
            ]
        }"#,
    )
    .unwrap();

    let loaded = Timetable::load_from_file(&path).unwrap();
    let p = loaded.get("p1").unwrap();
    assert_eq!(p.day, Monday);
    assert_eq!((p.start_time, p.end_time), (t("09:00"), t("09:45")));
    assert_eq!(p.teacher_id, id("t1"));
    assert_eq!(p.subject_id, id("HIST"));
}

#[test]
fn test_load_rejects_bad_files() {
    let dir = tempfile::tempdir().unwrap();

    let weekend = dir.path().join("weekend.json");
    fs::write(
        &weekend,
        r#"{"className": "8A", "periods": [{"id": "p1", "day": "Saturday", "startTime": "09:00",
            "endTime": "10:00", "subjectId": "S", "teacherId": "T", "room": "R"}]}"#,
    )
    .unwrap();
    assert!(matches!(Timetable::load_from_file(&weekend), Err(TimetableError::Json(_))));

    let duplicate = dir.path().join("duplicate.json");
    let entry = r#"{"id": "p1", "day": "Monday", "startTime": "09:00", "endTime": "10:00",
        "subjectId": "S", "teacherId": "T", "room": "R"}"#;
    fs::write(&duplicate, format!(r#"{{"className": "8A", "periods": [{entry}, {entry}]}}"#)).unwrap();
    assert!(matches!(
        Timetable::load_from_file(&duplicate),
        Err(TimetableError::DuplicatePeriod(_))
    ));

    assert!(matches!(
        Timetable::load_from_file(&dir.path().join("missing.json")),
        Err(TimetableError::Io(_))
    ));
}
