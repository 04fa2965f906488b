use rusqlite::{Connection, OptionalExtension, Row};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::ResultRecord;

const SELECT_RESULT: &str = "SELECT r.id, r.student_id, st.name, r.subject_id, su.name, r.marks
     FROM results r
     JOIN students st ON st.id = r.student_id
     JOIN subjects su ON su.id = r.subject_id";

fn row_to_record(r: &Row) -> rusqlite::Result<ResultRecord> {
    Ok(ResultRecord {
        id: r.get(0)?,
        student_id: r.get(1)?,
        student_name: r.get(2)?,
        subject_id: r.get(3)?,
        subject_name: r.get(4)?,
        marks: r.get(5)?,
    })
}

pub fn list_by_student(conn: &Connection, student_id: i64) -> DomainResult<Vec<ResultRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_RESULT} WHERE r.student_id = ? ORDER BY su.name"
    ))?;
    let rows = stmt
        .query_map([student_id], row_to_record)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Department results join through the subject's non-owning department
/// reference: every mark in any subject belonging to the named department.
pub fn list_by_department(conn: &Connection, department: &str) -> DomainResult<Vec<ResultRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_RESULT}
         JOIN departments d ON d.id = su.department_id
         WHERE d.name = ?
         ORDER BY st.id, su.name"
    ))?;
    let rows = stmt
        .query_map([department], row_to_record)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// One mark per (student, subject): an existing row is overwritten in place,
/// otherwise a new one is inserted. Both references must resolve.
pub fn upsert(
    conn: &Connection,
    student_id: i64,
    subject_id: i64,
    marks: f64,
) -> DomainResult<ResultRecord> {
    if !(0.0..=100.0).contains(&marks) {
        return Err(DomainError::validation(format!(
            "marks must be between 0 and 100, got {marks}"
        )));
    }

    let tx = conn.unchecked_transaction()?;

    let student: Option<i64> = tx
        .query_row("SELECT id FROM students WHERE id = ?", [student_id], |r| {
            r.get(0)
        })
        .optional()?;
    if student.is_none() {
        return Err(DomainError::invalid_reference(format!(
            "student {student_id} does not exist"
        )));
    }
    let subject: Option<i64> = tx
        .query_row("SELECT id FROM subjects WHERE id = ?", [subject_id], |r| {
            r.get(0)
        })
        .optional()?;
    if subject.is_none() {
        return Err(DomainError::invalid_reference(format!(
            "subject {subject_id} does not exist"
        )));
    }

    let existing: Option<i64> = tx
        .query_row(
            "SELECT id FROM results WHERE student_id = ? AND subject_id = ?",
            (student_id, subject_id),
            |r| r.get(0),
        )
        .optional()?;
    let row_id = match existing {
        Some(row_id) => {
            tx.execute("UPDATE results SET marks = ? WHERE id = ?", (marks, row_id))?;
            row_id
        }
        None => {
            tx.execute(
                "INSERT INTO results(student_id, subject_id, marks)
                 VALUES(?, ?, ?)
                 ON CONFLICT(student_id, subject_id) DO UPDATE SET
                   marks = excluded.marks",
                (student_id, subject_id, marks),
            )?;
            tx.last_insert_rowid()
        }
    };

    let record = tx.query_row(&format!("{SELECT_RESULT} WHERE r.id = ?"), [row_id], row_to_record)?;
    tx.commit()?;
    Ok(record)
}
