use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use campusd::db;
use campusd::domain::error::DomainError;
use campusd::domain::fees::{self, DEFAULT_TUITION_AMOUNT, DEFAULT_TUITION_DESCRIPTION};
use campusd::domain::model::FeeStatus;
use campusd::domain::students::{self, NewStudent};
use chrono::{Duration, Local};
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
fn first_read_seeds_one_pending_tuition_fee() {
    let conn = db::open_db(&temp_workspace("fee-seed")).expect("open db");
    let ava_id = register_student(&conn, "Ava");

    let before = Local::now().date_naive();
    let fees = fees::list_by_student(&conn, ava_id).expect("first read");
    let after = Local::now().date_naive();

    assert_eq!(fees.len(), 1);
    let fee = &fees[0];
    assert_eq!(fee.student_id, ava_id);
    assert_eq!(fee.amount, DEFAULT_TUITION_AMOUNT);
    assert_eq!(fee.description, DEFAULT_TUITION_DESCRIPTION);
    assert_eq!(fee.status, FeeStatus::Pending);
    assert!(fee.payment_date.is_none());
    assert!(fee.transaction_ref.is_none());
    let due = fee.due_date.expect("due date");
    assert!(due >= before + Duration::days(30) && due <= after + Duration::days(30));

    // A second read finds the seeded row and must not add another.
    let again = fees::list_by_student(&conn, ava_id).expect("second read");
    assert_eq!(again.len(), 1);
    assert_eq!(again[0].id, fee.id);
}

#[test]
fn reading_fees_for_a_missing_student_is_not_found() {
    let conn = db::open_db(&temp_workspace("fee-missing-student")).expect("open db");

    let err = fees::list_by_student(&conn, 12).unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
    assert!(fees::list_all(&conn).expect("list").is_empty());
}

#[test]
fn paying_settles_once_and_only_once() {
    let conn = db::open_db(&temp_workspace("fee-pay")).expect("open db");
    let student_id = register_student(&conn, "Dana");
    let fee_id = fees::list_by_student(&conn, student_id).expect("seed")[0].id;

    let paid = fees::pay(&conn, fee_id).expect("pay");
    assert_eq!(paid.status, FeeStatus::Paid);
    assert!(paid.payment_date.is_some());
    let reference = paid.transaction_ref.expect("transaction ref");
    assert!(reference.starts_with("TXN-"));
    assert_eq!(reference.len(), 12);

    let err = fees::pay(&conn, fee_id).unwrap_err();
    assert!(matches!(err, DomainError::AlreadyPaid { fee_id: id } if id == fee_id));

    // The stored row still carries the first settlement.
    let rows = fees::list_by_student(&conn, student_id).expect("read");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, FeeStatus::Paid);
    assert_eq!(rows[0].transaction_ref.as_deref(), Some(reference.as_str()));
}

#[test]
fn paying_a_missing_fee_is_not_found() {
    let conn = db::open_db(&temp_workspace("fee-pay-missing")).expect("open db");

    let err = fees::pay(&conn, 99).unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[test]
fn list_all_spans_students() {
    let conn = db::open_db(&temp_workspace("fee-list-all")).expect("open db");
    let first = register_student(&conn, "Elif");
    let second = register_student(&conn, "Hugo");

    fees::list_by_student(&conn, first).expect("seed first");
    fees::list_by_student(&conn, second).expect("seed second");

    let all = fees::list_all(&conn).expect("list all");
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|f| f.student_id == first));
    assert!(all.iter().any(|f| f.student_id == second));
}
