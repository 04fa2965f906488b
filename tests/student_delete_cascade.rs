use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use campusd::db;
use campusd::domain::error::DomainError;
use campusd::domain::model::AttendanceStatus;
use campusd::domain::students::{self, NewStudent};
use campusd::domain::{attendance, departments, fees, results, subjects};
use chrono::NaiveDate;
use rusqlite::Connection;

fn temp_workspace(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "campusd-{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn register_student(conn: &Connection, name: &str) -> i64 {
    students::create(
        conn,
        NewStudent {
            name: name.to_string(),
            email: format!("{}@campus.edu", name.to_lowercase()),
            department: Some("CS".to_string()),
            ..Default::default()
        },
    )
    .expect("create student")
    .id
}

#[test]
fn deleting_a_student_takes_all_ledger_rows_with_it() {
    let conn = db::open_db(&temp_workspace("cascade-full")).expect("open db");

    let deleted_id = register_student(&conn, "Jon");
    let surviving_id = register_student(&conn, "Sana");
    let subject = subjects::create(&conn, Some("CS"), "Algorithms").expect("subject");

    let monday = NaiveDate::from_ymd_opt(2026, 3, 2).expect("date");
    let tuesday = NaiveDate::from_ymd_opt(2026, 3, 3).expect("date");
    attendance::upsert_batch(
        &conn,
        monday,
        &[
            (deleted_id, AttendanceStatus::Present),
            (surviving_id, AttendanceStatus::Late),
        ],
    )
    .expect("attendance");
    attendance::upsert_batch(&conn, tuesday, &[(deleted_id, AttendanceStatus::Absent)])
        .expect("attendance");
    results::upsert(&conn, deleted_id, subject.id, 68.0).expect("result");
    results::upsert(&conn, surviving_id, subject.id, 91.0).expect("result");
    // First read seeds the tuition fee row that the cascade must also remove.
    fees::list_by_student(&conn, deleted_id).expect("seed fee");

    students::delete(&conn, deleted_id).expect("delete");

    assert!(attendance::list_by_student(&conn, deleted_id)
        .expect("attendance")
        .is_empty());
    assert!(results::list_by_student(&conn, deleted_id)
        .expect("results")
        .is_empty());
    assert!(!fees::list_all(&conn)
        .expect("fees")
        .iter()
        .any(|f| f.student_id == deleted_id));
    let err = students::get_by_id(&conn, deleted_id).unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    // Everything referencing the other student survives.
    assert_eq!(
        attendance::list_by_student(&conn, surviving_id)
            .expect("attendance")
            .len(),
        1
    );
    assert_eq!(
        results::list_by_student(&conn, surviving_id)
            .expect("results")
            .len(),
        1
    );

    // Shared reference rows are untouched by the cascade.
    assert!(departments::find_by_name(&conn, "CS")
        .expect("dept")
        .is_some());
    assert_eq!(subjects::list_all(&conn).expect("subjects").len(), 1);
}

#[test]
fn deleting_a_missing_student_is_not_found() {
    let conn = db::open_db(&temp_workspace("cascade-missing")).expect("open db");

    let err = students::delete(&conn, 7).unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}
