use std::collections::HashMap;

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::domain::error::DomainResult;
use crate::domain::model::{AttendanceRecord, AttendanceStatus};

const SELECT_ATTENDANCE: &str = "SELECT a.id, a.student_id, s.name, a.date, a.status
     FROM attendance a
     JOIN students s ON s.id = a.student_id";

fn row_to_record(r: &Row) -> rusqlite::Result<AttendanceRecord> {
    let status: String = r.get(4)?;
    Ok(AttendanceRecord {
        id: r.get(0)?,
        student_id: r.get(1)?,
        student_name: r.get(2)?,
        date: r.get(3)?,
        // Stored statuses come from `AttendanceStatus::as_str`; anything else
        // means the row was written outside this crate.
        status: AttendanceStatus::parse(&status).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                format!("unknown attendance status {status}").into(),
            )
        })?,
    })
}

pub fn list_by_date(conn: &Connection, date: NaiveDate) -> DomainResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_ATTENDANCE} WHERE a.date = ? ORDER BY a.student_id"
    ))?;
    let rows = stmt
        .query_map([date], row_to_record)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn list_by_student(conn: &Connection, student_id: i64) -> DomainResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_ATTENDANCE} WHERE a.student_id = ? ORDER BY a.date"
    ))?;
    let rows = stmt
        .query_map([student_id], row_to_record)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Records one day of attendance as a single atomic batch.
///
/// Existing rows for the day are loaded and indexed by student id first;
/// each incoming entry then either overwrites that row's status in place or
/// inserts a fresh row. Entries for unknown student ids are skipped rather
/// than failing the batch. The `UNIQUE(student_id, date)` constraint is the
/// backstop that keeps the day at one row per student even under races.
///
/// Returns the number of rows written.
pub fn upsert_batch(
    conn: &Connection,
    date: NaiveDate,
    entries: &[(i64, AttendanceStatus)],
) -> DomainResult<usize> {
    let tx = conn.unchecked_transaction()?;

    let mut existing: HashMap<i64, i64> = HashMap::new();
    {
        let mut stmt = tx.prepare("SELECT student_id, id FROM attendance WHERE date = ?")?;
        let rows = stmt
            .query_map([date], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, i64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        existing.extend(rows);
    }

    let mut written = 0usize;
    for &(student_id, status) in entries {
        match existing.get(&student_id) {
            Some(&row_id) => {
                tx.execute(
                    "UPDATE attendance SET status = ? WHERE id = ?",
                    (status.as_str(), row_id),
                )?;
            }
            None => {
                let known: Option<i64> = tx
                    .query_row("SELECT id FROM students WHERE id = ?", [student_id], |r| {
                        r.get(0)
                    })
                    .optional()?;
                if known.is_none() {
                    continue;
                }
                tx.execute(
                    "INSERT INTO attendance(student_id, date, status)
                     VALUES(?, ?, ?)
                     ON CONFLICT(student_id, date) DO UPDATE SET
                       status = excluded.status",
                    (student_id, date, status.as_str()),
                )?;
                existing.insert(student_id, tx.last_insert_rowid());
            }
        }
        written += 1;
    }

    tx.commit()?;
    Ok(written)
}
