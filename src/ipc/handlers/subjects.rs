use rusqlite::Connection;
use serde_json::json;

use crate::domain::subjects;
use crate::ipc::error::HandlerErr;
use crate::ipc::handlers::with_db;
use crate::ipc::params;
use crate::ipc::types::{AppState, Request};

fn list(conn: &Connection, _params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let subjects = subjects::list_all(conn)?;
    Ok(json!({ "subjects": subjects }))
}

fn list_by_department(
    conn: &Connection,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let department = params::required_str(params, "department")?;
    let subjects = subjects::list_by_department(conn, &department)?;
    Ok(json!({ "subjects": subjects }))
}

fn create(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let name = params::required_str(params, "name")?;
    let department = params::optional_str(params, "department")?;
    let subject = subjects::create(conn, department.as_deref(), &name)?;
    Ok(json!({ "subject": subject }))
}

fn delete(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let subject_id = params::required_i64(params, "subjectId")?;
    subjects::delete(conn, subject_id)?;
    Ok(json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "subjects.list" => Some(with_db(state, req, list)),
        "subjects.listByDepartment" => Some(with_db(state, req, list_by_department)),
        "subjects.create" => Some(with_db(state, req, create)),
        "subjects.delete" => Some(with_db(state, req, delete)),
        _ => None,
    }
}
