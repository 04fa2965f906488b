use rusqlite::{Connection, OptionalExtension};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::Department;

pub fn list_all(conn: &Connection) -> DomainResult<Vec<Department>> {
    let mut stmt = conn.prepare("SELECT id, name FROM departments ORDER BY name")?;
    let rows = stmt
        .query_map([], |r| {
            Ok(Department {
                id: r.get(0)?,
                name: r.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn find_by_name(conn: &Connection, name: &str) -> DomainResult<Option<Department>> {
    let row = conn
        .query_row("SELECT id, name FROM departments WHERE name = ?", [name], |r| {
            Ok(Department {
                id: r.get(0)?,
                name: r.get(1)?,
            })
        })
        .optional()?;
    Ok(row)
}

/// Find-or-create by name. A racing creator loses to the unique constraint
/// and adopts the winner's row on the re-read.
pub fn get_or_create(conn: &Connection, name: &str) -> DomainResult<Department> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("department name must not be blank"));
    }
    if let Some(dept) = find_by_name(conn, name)? {
        return Ok(dept);
    }
    conn.execute(
        "INSERT INTO departments(name) VALUES(?) ON CONFLICT(name) DO NOTHING",
        [name],
    )?;
    find_by_name(conn, name)?.ok_or(DomainError::Db(rusqlite::Error::QueryReturnedNoRows))
}

/// Resolves an optional department name for registry writes: blank or absent
/// yields no department rather than creating one.
pub(crate) fn resolve_optional(
    conn: &Connection,
    name: Option<&str>,
) -> DomainResult<Option<Department>> {
    match name {
        Some(n) if !n.trim().is_empty() => Ok(Some(get_or_create(conn, n)?)),
        _ => Ok(None),
    }
}
