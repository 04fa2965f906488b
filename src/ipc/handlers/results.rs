use rusqlite::Connection;
use serde_json::json;

use crate::domain::results;
use crate::ipc::error::HandlerErr;
use crate::ipc::handlers::with_db;
use crate::ipc::params;
use crate::ipc::types::{AppState, Request};

fn list_by_student(
    conn: &Connection,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = params::required_i64(params, "studentId")?;
    let results = results::list_by_student(conn, student_id)?;
    Ok(json!({ "results": results }))
}

fn list_by_department(
    conn: &Connection,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let department = params::required_str(params, "department")?;
    let results = results::list_by_department(conn, &department)?;
    Ok(json!({ "results": results }))
}

fn save(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = params::required_i64(params, "studentId")?;
    let subject_id = params::required_i64(params, "subjectId")?;
    let marks = params::required_f64(params, "marks")?;
    let record = results::upsert(conn, student_id, subject_id, marks)?;
    Ok(json!({ "result": record }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "results.listByStudent" => Some(with_db(state, req, list_by_student)),
        "results.listByDepartment" => Some(with_db(state, req, list_by_department)),
        "results.save" => Some(with_db(state, req, save)),
        _ => None,
    }
}
