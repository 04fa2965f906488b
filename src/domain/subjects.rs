use log::info;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::domain::cascade;
use crate::domain::departments;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::Subject;

const SELECT_SUBJECT: &str = "SELECT s.id, s.name, s.department_id, d.name
     FROM subjects s
     LEFT JOIN departments d ON d.id = s.department_id";

fn row_to_subject(r: &Row) -> rusqlite::Result<Subject> {
    Ok(Subject {
        id: r.get(0)?,
        name: r.get(1)?,
        department_id: r.get(2)?,
        department: r.get(3)?,
    })
}

pub fn list_all(conn: &Connection) -> DomainResult<Vec<Subject>> {
    let mut stmt = conn.prepare(&format!("{SELECT_SUBJECT} ORDER BY s.name"))?;
    let rows = stmt
        .query_map([], row_to_subject)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn list_by_department(conn: &Connection, department: &str) -> DomainResult<Vec<Subject>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_SUBJECT} WHERE d.name = ? ORDER BY s.name"
    ))?;
    let rows = stmt
        .query_map([department], row_to_subject)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get_by_id(conn: &Connection, subject_id: i64) -> DomainResult<Subject> {
    conn.query_row(
        &format!("{SELECT_SUBJECT} WHERE s.id = ?"),
        [subject_id],
        row_to_subject,
    )
    .optional()?
    .ok_or(DomainError::not_found("subject", subject_id))
}

pub fn create(
    conn: &Connection,
    department: Option<&str>,
    name: &str,
) -> DomainResult<Subject> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("subject name must not be blank"));
    }
    let dept = departments::resolve_optional(conn, department)?;
    let dept_id = dept.as_ref().map(|d| d.id);

    // NULL department ids are distinct to the unique index, so the
    // department-less case needs its own duplicate probe.
    let existing: Option<i64> = match dept_id {
        Some(id) => conn
            .query_row(
                "SELECT id FROM subjects WHERE department_id = ? AND name = ?",
                (id, name),
                |r| r.get(0),
            )
            .optional()?,
        None => conn
            .query_row(
                "SELECT id FROM subjects WHERE department_id IS NULL AND name = ?",
                [name],
                |r| r.get(0),
            )
            .optional()?,
    };
    let duplicate_message = format!("subject {name} already exists in this department");
    if existing.is_some() {
        return Err(DomainError::duplicate(duplicate_message));
    }

    conn.execute(
        "INSERT INTO subjects(name, department_id) VALUES(?, ?)",
        (name, dept_id),
    )
    .map_err(|e| DomainError::map_unique_violation(e, &duplicate_message))?;

    get_by_id(conn, conn.last_insert_rowid())
}

pub fn delete(conn: &Connection, subject_id: i64) -> DomainResult<()> {
    let tx = conn.unchecked_transaction()?;
    let exists: Option<i64> = tx
        .query_row("SELECT id FROM subjects WHERE id = ?", [subject_id], |r| {
            r.get(0)
        })
        .optional()?;
    if exists.is_none() {
        return Err(DomainError::not_found("subject", subject_id));
    }
    cascade::on_subject_deleted(&tx, subject_id)?;
    tx.execute("DELETE FROM subjects WHERE id = ?", [subject_id])?;
    tx.commit()?;
    info!("subject {} deleted", subject_id);
    Ok(())
}
