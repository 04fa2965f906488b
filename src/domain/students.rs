use log::info;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::domain::cascade;
use crate::domain::departments;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{non_blank, Student};

/// Deterministic credential assigned when a caller registers a student
/// without one. Hashing is applied by the authentication collaborator,
/// not here.
pub const DEFAULT_PASSWORD: &str = "password";

const SELECT_STUDENT: &str = "SELECT s.id, s.name, s.email, s.password, s.gpa, s.department_id, d.name
     FROM students s
     LEFT JOIN departments d ON d.id = s.department_id";

fn row_to_student(r: &Row) -> rusqlite::Result<Student> {
    Ok(Student {
        id: r.get(0)?,
        name: r.get(1)?,
        email: r.get(2)?,
        password: r.get(3)?,
        gpa: r.get(4)?,
        department_id: r.get(5)?,
        department: r.get(6)?,
    })
}

#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub gpa: Option<f64>,
    pub department: Option<String>,
}

/// Per-field patch: a field is only written when supplied and non-blank,
/// everything else keeps its stored value.
#[derive(Debug, Clone, Default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub gpa: Option<f64>,
    pub department: Option<String>,
}

pub fn create(conn: &Connection, new: NewStudent) -> DomainResult<Student> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("student name must not be blank"));
    }
    let email = new.email.trim();
    if email.is_empty() {
        return Err(DomainError::validation("student email must not be blank"));
    }
    let dept = departments::resolve_optional(conn, new.department.as_deref())?;
    let password = non_blank(new.password).unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

    conn.execute(
        "INSERT INTO students(name, email, password, gpa, department_id)
         VALUES(?, ?, ?, ?, ?)",
        (name, email, &password, new.gpa, dept.map(|d| d.id)),
    )?;
    let student = get_by_id(conn, conn.last_insert_rowid())?;
    info!("student {} registered", student.id);
    Ok(student)
}

pub fn list_all(conn: &Connection) -> DomainResult<Vec<Student>> {
    let mut stmt = conn.prepare(&format!("{SELECT_STUDENT} ORDER BY s.id"))?;
    let rows = stmt
        .query_map([], row_to_student)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn list_by_department(conn: &Connection, department: &str) -> DomainResult<Vec<Student>> {
    let mut stmt = conn.prepare(&format!("{SELECT_STUDENT} WHERE d.name = ? ORDER BY s.id"))?;
    let rows = stmt
        .query_map([department], row_to_student)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get_by_id(conn: &Connection, student_id: i64) -> DomainResult<Student> {
    conn.query_row(
        &format!("{SELECT_STUDENT} WHERE s.id = ?"),
        [student_id],
        row_to_student,
    )
    .optional()?
    .ok_or(DomainError::not_found("student", student_id))
}

pub fn update(conn: &Connection, student_id: i64, patch: StudentPatch) -> DomainResult<Student> {
    let existing = get_by_id(conn, student_id)?;

    let name = non_blank(patch.name).unwrap_or(existing.name);
    let email = non_blank(patch.email).unwrap_or(existing.email);
    let password = non_blank(patch.password).unwrap_or(existing.password);
    let gpa = patch.gpa.or(existing.gpa);
    let department_id = match non_blank(patch.department) {
        Some(dept_name) => Some(departments::get_or_create(conn, &dept_name)?.id),
        None => existing.department_id,
    };

    conn.execute(
        "UPDATE students SET name = ?, email = ?, password = ?, gpa = ?, department_id = ?
         WHERE id = ?",
        (&name, &email, &password, gpa, department_id, student_id),
    )?;
    get_by_id(conn, student_id)
}

pub fn update_gpa(conn: &Connection, student_id: i64, gpa: Option<f64>) -> DomainResult<Student> {
    let changed = conn.execute(
        "UPDATE students SET gpa = ? WHERE id = ?",
        (gpa, student_id),
    )?;
    if changed == 0 {
        return Err(DomainError::not_found("student", student_id));
    }
    get_by_id(conn, student_id)
}

/// Cascade plus root removal as one transaction: either the student and all
/// dependent ledger rows disappear together, or none do.
pub fn delete(conn: &Connection, student_id: i64) -> DomainResult<()> {
    let tx = conn.unchecked_transaction()?;
    let exists: Option<i64> = tx
        .query_row("SELECT id FROM students WHERE id = ?", [student_id], |r| {
            r.get(0)
        })
        .optional()?;
    if exists.is_none() {
        return Err(DomainError::not_found("student", student_id));
    }
    cascade::on_student_deleted(&tx, student_id)?;
    tx.execute("DELETE FROM students WHERE id = ?", [student_id])?;
    tx.commit()?;
    info!("student {} deleted", student_id);
    Ok(())
}
