//! Integration tests for the engine and snapshot files.

use std::fs;

use studentdb::{Engine, Error, Field, Order, Record, SortKey, StudentId};
use tempfile::tempdir;

fn student(id: u32, name: &str, programme: &str, mark: f32) -> Record {
    Record::new(StudentId::new(id), name, programme, mark).unwrap()
}

fn class() -> Vec<Record> {
    vec![
        student(2502841, "Alicia Tan", "Computer Science", 72.5),
        student(2509174, "Marcus Lim", "Information Security", 64.0),
        student(2505532, "Samantha Ong", "Data Science", 81.0),
        student(2501106, "Daniel Koh", "Computer Science", 49.5),
        student(2507730, "Priya Nair", "Applied AI", 90.0),
    ]
}

fn engine_with_class() -> Engine {
    let mut engine = Engine::new();
    for record in class() {
        engine.insert(record).unwrap();
    }
    engine
}

/// One line missing a field is skipped, the rest load.
#[test]
fn test_open_skips_malformed_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.txt");
    fs::write(
        &path,
        "2502841,Alicia Tan,Computer Science,72.5\n\
         2509174,Marcus Lim,Information Security,64.0\n\
         2505532,Samantha Ong,81.0\n\
         2501106,Daniel Koh,Computer Science,49.5\n\
         2507730,Priya Nair,Applied AI,90.0\n",
    )
    .unwrap();

    let mut engine = Engine::new();
    let report = engine.open(&path).unwrap();

    assert_eq!(report.loaded, 4);
    assert_eq!(report.skipped, vec![3]);
    assert_eq!(engine.len(), 4);
    assert!(engine.query(StudentId::new(2505532)).is_err());
    assert!(engine.query(StudentId::new(2507730)).is_ok());
}

#[test]
fn test_open_skips_duplicates_and_invalid_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.txt");
    fs::write(
        &path,
        "2502841,Alicia Tan,Computer Science,72.5\n\
         \n\
         2502841,Alicia Again,Computer Science,10.0\n\
         2509174,Marcus Lim,Information Security,164.0\n\
         2505532,Sam4ntha,Data Science,81.0\n\
         2507730,Priya Nair,Applied AI,90.0\n",
    )
    .unwrap();

    let mut engine = Engine::new();
    let report = engine.open(&path).unwrap();

    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, vec![3, 4, 5]);
    assert_eq!(engine.query(StudentId::new(2502841)).unwrap().name, "Alicia Tan");
}

/// Sorting by mark ignores ID order.
#[test]
fn test_sort_by_mark_descending() {
    let engine = engine_with_class();

    let marks: Vec<f32> = engine
        .sorted(SortKey::Mark, Order::Descending)
        .iter()
        .map(|r| r.mark)
        .collect();
    assert_eq!(marks, vec![90.0, 81.0, 72.5, 64.0, 49.5]);

    let ids: Vec<StudentId> = engine.records(Order::Ascending).iter().map(|r| r.id).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_save_then_open_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.txt");
    let engine = engine_with_class();

    assert_eq!(engine.save(&path).unwrap(), 5);

    let mut reloaded = Engine::new();
    let report = reloaded.open(&path).unwrap();
    assert_eq!(report.loaded, 5);
    assert!(report.skipped.is_empty());

    let original: Vec<&Record> = engine.records(Order::Ascending);
    let restored: Vec<&Record> = reloaded.records(Order::Ascending);
    assert_eq!(original, restored);
}

#[test]
fn test_saved_file_is_in_id_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("students.txt");
    engine_with_class().save(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let first_fields: Vec<&str> = contents
        .lines()
        .filter_map(|line| line.split(',').next())
        .collect();
    assert_eq!(
        first_fields,
        vec!["2501106", "2502841", "2505532", "2507730", "2509174"]
    );
    assert!(contents.starts_with("2501106,Daniel Koh,Computer Science,49.5\n"));
}

#[test]
fn test_open_replaces_previous_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("one.txt");
    fs::write(&path, "2504417,Nicholas Lee,Applied AI,55\n").unwrap();

    let mut engine = engine_with_class();
    engine.open(&path).unwrap();

    assert_eq!(engine.len(), 1);
    assert_eq!(engine.summary().count, 1);
    assert!(engine.query(StudentId::new(2502841)).is_err());
}

#[test]
fn test_update_then_summary() {
    let mut engine = engine_with_class();
    let id = StudentId::new(2501106);

    engine
        .update_fields(id, &[(Field::Mark, "95"), (Field::Programme, "Data Science")])
        .unwrap();

    let updated = engine.query(id).unwrap();
    assert_eq!(updated.mark, 95.0);
    assert_eq!(updated.programme, "Data Science");

    let summary = engine.summary();
    assert_eq!(summary.count, 5);
    assert_eq!(summary.highest.map(|h| h.id), Some(id));
    assert_eq!(summary.lowest.map(|h| h.id), Some(StudentId::new(2509174)));
}

#[test]
fn test_rejected_calls_change_nothing() {
    let mut engine = engine_with_class();
    let before: Vec<Record> = engine.records(Order::Ascending).into_iter().cloned().collect();

    assert!(matches!(
        engine.insert(student(2505532, "Someone Else", "Law", 10.0)),
        Err(Error::DuplicateKey(_))
    ));
    assert!(matches!(
        engine.update(StudentId::new(2505532), Field::Name, "R2 D2"),
        Err(Error::ValidationFailed { field: Field::Name, .. })
    ));
    assert!(matches!(
        engine.delete(StudentId::new(2500000)),
        Err(Error::NotFound(_))
    ));

    let after: Vec<Record> = engine.records(Order::Ascending).into_iter().cloned().collect();
    assert_eq!(after, before);
    assert_eq!(engine.len(), 5);
}

#[test]
fn test_empty_summary() {
    let summary = Engine::new().summary();
    assert_eq!(summary.count, 0);
    assert!(summary.average.is_none());
    assert!(summary.to_string().contains("Total number of students: 0"));
}
