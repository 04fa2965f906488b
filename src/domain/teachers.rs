use log::info;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::domain::departments;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{non_blank, Teacher};
use crate::domain::students::DEFAULT_PASSWORD;

const SELECT_TEACHER: &str =
    "SELECT t.id, t.name, t.email, t.password, t.designation, t.department_id, d.name
     FROM teachers t
     LEFT JOIN departments d ON d.id = t.department_id";

fn row_to_teacher(r: &Row) -> rusqlite::Result<Teacher> {
    Ok(Teacher {
        id: r.get(0)?,
        name: r.get(1)?,
        email: r.get(2)?,
        password: r.get(3)?,
        designation: r.get(4)?,
        department_id: r.get(5)?,
        department: r.get(6)?,
    })
}

#[derive(Debug, Clone, Default)]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TeacherPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
}

pub fn create(conn: &Connection, new: NewTeacher) -> DomainResult<Teacher> {
    let name = new.name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("teacher name must not be blank"));
    }
    let email = new.email.trim();
    if email.is_empty() {
        return Err(DomainError::validation("teacher email must not be blank"));
    }
    let dept = departments::resolve_optional(conn, new.department.as_deref())?;
    let password = non_blank(new.password).unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

    conn.execute(
        "INSERT INTO teachers(name, email, password, designation, department_id)
         VALUES(?, ?, ?, ?, ?)",
        (
            name,
            email,
            &password,
            non_blank(new.designation),
            dept.map(|d| d.id),
        ),
    )?;
    let teacher = get_by_id(conn, conn.last_insert_rowid())?;
    info!("teacher {} registered", teacher.id);
    Ok(teacher)
}

pub fn list_all(conn: &Connection) -> DomainResult<Vec<Teacher>> {
    let mut stmt = conn.prepare(&format!("{SELECT_TEACHER} ORDER BY t.id"))?;
    let rows = stmt
        .query_map([], row_to_teacher)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get_by_id(conn: &Connection, teacher_id: i64) -> DomainResult<Teacher> {
    conn.query_row(
        &format!("{SELECT_TEACHER} WHERE t.id = ?"),
        [teacher_id],
        row_to_teacher,
    )
    .optional()?
    .ok_or(DomainError::not_found("teacher", teacher_id))
}

pub fn update(conn: &Connection, teacher_id: i64, patch: TeacherPatch) -> DomainResult<Teacher> {
    let existing = get_by_id(conn, teacher_id)?;

    let name = non_blank(patch.name).unwrap_or(existing.name);
    let email = non_blank(patch.email).unwrap_or(existing.email);
    let password = non_blank(patch.password).unwrap_or(existing.password);
    let designation = non_blank(patch.designation).or(existing.designation);
    let department_id = match non_blank(patch.department) {
        Some(dept_name) => Some(departments::get_or_create(conn, &dept_name)?.id),
        None => existing.department_id,
    };

    conn.execute(
        "UPDATE teachers SET name = ?, email = ?, password = ?, designation = ?, department_id = ?
         WHERE id = ?",
        (&name, &email, &password, designation, department_id, teacher_id),
    )?;
    get_by_id(conn, teacher_id)
}

pub fn delete(conn: &Connection, teacher_id: i64) -> DomainResult<()> {
    let changed = conn.execute("DELETE FROM teachers WHERE id = ?", [teacher_id])?;
    if changed == 0 {
        return Err(DomainError::not_found("teacher", teacher_id));
    }
    info!("teacher {} deleted", teacher_id);
    Ok(())
}
