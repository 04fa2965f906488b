use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use campusd::db;
use campusd::domain::attendance;
use campusd::domain::model::AttendanceStatus;
use campusd::domain::students::{self, NewStudent};
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
            ..Default::default()
        },
    )
    .expect("create student")
    .id
}

#[test]
fn resubmitting_a_day_overwrites_instead_of_duplicating() {
    let conn = db::open_db(&temp_workspace("att-resubmit")).expect("open db");
    let student_id = register_student(&conn, "Ivo");
    let day = NaiveDate::from_ymd_opt(2026, 4, 7).expect("date");

    attendance::upsert_batch(&conn, day, &[(student_id, AttendanceStatus::Present)])
        .expect("first submit");
    attendance::upsert_batch(&conn, day, &[(student_id, AttendanceStatus::Absent)])
        .expect("second submit");

    let rows = attendance::list_by_date(&conn, day).expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].student_id, student_id);
    assert_eq!(rows[0].status, AttendanceStatus::Absent);
}

#[test]
fn unknown_students_are_skipped_silently() {
    let conn = db::open_db(&temp_workspace("att-unknown")).expect("open db");
    let student_id = register_student(&conn, "Mai");
    let day = NaiveDate::from_ymd_opt(2026, 4, 8).expect("date");

    let written = attendance::upsert_batch(
        &conn,
        day,
        &[
            (student_id, AttendanceStatus::Late),
            (9999, AttendanceStatus::Present),
        ],
    )
    .expect("submit");

    assert_eq!(written, 1);
    let rows = attendance::list_by_date(&conn, day).expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].student_id, student_id);
}

#[test]
fn repeated_entries_in_one_batch_collapse_to_the_last_status() {
    let conn = db::open_db(&temp_workspace("att-repeat")).expect("open db");
    let student_id = register_student(&conn, "Kofi");
    let day = NaiveDate::from_ymd_opt(2026, 4, 9).expect("date");

    attendance::upsert_batch(
        &conn,
        day,
        &[
            (student_id, AttendanceStatus::Present),
            (student_id, AttendanceStatus::Late),
        ],
    )
    .expect("submit");

    let rows = attendance::list_by_date(&conn, day).expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, AttendanceStatus::Late);
}

#[test]
fn per_student_history_spans_dates_in_order() {
    let conn = db::open_db(&temp_workspace("att-history")).expect("open db");
    let student_id = register_student(&conn, "Rosa");
    let other_id = register_student(&conn, "Teo");

    let monday = NaiveDate::from_ymd_opt(2026, 4, 6).expect("date");
    let tuesday = NaiveDate::from_ymd_opt(2026, 4, 7).expect("date");
    attendance::upsert_batch(
        &conn,
        tuesday,
        &[
            (student_id, AttendanceStatus::Absent),
            (other_id, AttendanceStatus::Present),
        ],
    )
    .expect("submit");
    attendance::upsert_batch(&conn, monday, &[(student_id, AttendanceStatus::Present)])
        .expect("submit");

    let history = attendance::list_by_student(&conn, student_id).expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].date, monday);
    assert_eq!(history[0].status, AttendanceStatus::Present);
    assert_eq!(history[1].date, tuesday);
    assert_eq!(history[1].status, AttendanceStatus::Absent);
}

#[test]
fn listing_an_empty_day_returns_nothing() {
    let conn = db::open_db(&temp_workspace("att-empty")).expect("open db");
    register_student(&conn, "Zia");

    let day = NaiveDate::from_ymd_opt(2026, 4, 10).expect("date");
    assert!(attendance::list_by_date(&conn, day).expect("list").is_empty());
}
