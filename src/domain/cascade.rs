//! Dependent-row cleanup for Student and Subject deletes. Stateless: both
//! functions run on the caller's open transaction, so the cascade and the
//! root delete commit or roll back as one unit.

use log::info;
use rusqlite::Connection;

use crate::domain::error::DomainResult;

pub fn on_student_deleted(conn: &Connection, student_id: i64) -> DomainResult<()> {
    let results = conn.execute("DELETE FROM results WHERE student_id = ?", [student_id])?;
    let attendance = conn.execute("DELETE FROM attendance WHERE student_id = ?", [student_id])?;
    let fees = conn.execute("DELETE FROM fees WHERE student_id = ?", [student_id])?;
    info!(
        "cascade for student {}: {} results, {} attendance, {} fees",
        student_id, results, attendance, fees
    );
    Ok(())
}

pub fn on_subject_deleted(conn: &Connection, subject_id: i64) -> DomainResult<()> {
    let results = conn.execute("DELETE FROM results WHERE subject_id = ?", [subject_id])?;
    info!("cascade for subject {}: {} results", subject_id, results);
    Ok(())
}
