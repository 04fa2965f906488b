use rusqlite::Connection;
use serde_json::json;

use crate::domain::students::{self, NewStudent, StudentPatch};
use crate::ipc::error::HandlerErr;
use crate::ipc::handlers::with_db;
use crate::ipc::params;
use crate::ipc::types::{AppState, Request};

fn create(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let new = NewStudent {
        name: params::required_str(params, "name")?,
        email: params::required_str(params, "email")?,
        password: params::optional_str(params, "password")?,
        gpa: params::optional_f64(params, "gpa")?,
        department: params::optional_str(params, "department")?,
    };
    let student = students::create(conn, new)?;
    Ok(json!({ "student": student }))
}

fn list(conn: &Connection, _params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let students = students::list_all(conn)?;
    Ok(json!({ "students": students }))
}

fn list_by_department(
    conn: &Connection,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let department = params::required_str(params, "department")?;
    let students = students::list_by_department(conn, &department)?;
    Ok(json!({ "students": students }))
}

fn get(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = params::required_i64(params, "studentId")?;
    let student = students::get_by_id(conn, student_id)?;
    Ok(json!({ "student": student }))
}

fn update(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = params::required_i64(params, "studentId")?;
    let patch = StudentPatch {
        name: params::optional_str(params, "name")?,
        email: params::optional_str(params, "email")?,
        password: params::optional_str(params, "password")?,
        gpa: params::optional_f64(params, "gpa")?,
        department: params::optional_str(params, "department")?,
    };
    let student = students::update(conn, student_id, patch)?;
    Ok(json!({ "student": student }))
}

fn update_gpa(
    conn: &Connection,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = params::required_i64(params, "studentId")?;
    let gpa = params::optional_f64(params, "gpa")?;
    let student = students::update_gpa(conn, student_id, gpa)?;
    Ok(json!({ "student": student }))
}

fn delete(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = params::required_i64(params, "studentId")?;
    students::delete(conn, student_id)?;
    Ok(json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.create" => Some(with_db(state, req, create)),
        "students.list" => Some(with_db(state, req, list)),
        "students.listByDepartment" => Some(with_db(state, req, list_by_department)),
        "students.get" => Some(with_db(state, req, get)),
        "students.update" => Some(with_db(state, req, update)),
        "students.updateGpa" => Some(with_db(state, req, update_gpa)),
        "students.delete" => Some(with_db(state, req, delete)),
        _ => None,
    }
}
