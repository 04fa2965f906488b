use rusqlite::Connection;
use serde_json::json;

use crate::domain::teachers::{self, NewTeacher, TeacherPatch};
use crate::ipc::error::HandlerErr;
use crate::ipc::handlers::with_db;
use crate::ipc::params;
use crate::ipc::types::{AppState, Request};

fn create(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let new = NewTeacher {
        name: params::required_str(params, "name")?,
        email: params::required_str(params, "email")?,
        password: params::optional_str(params, "password")?,
        designation: params::optional_str(params, "designation")?,
        department: params::optional_str(params, "department")?,
    };
    let teacher = teachers::create(conn, new)?;
    Ok(json!({ "teacher": teacher }))
}

fn list(conn: &Connection, _params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let teachers = teachers::list_all(conn)?;
    Ok(json!({ "teachers": teachers }))
}

fn get(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let teacher_id = params::required_i64(params, "teacherId")?;
    let teacher = teachers::get_by_id(conn, teacher_id)?;
    Ok(json!({ "teacher": teacher }))
}

fn update(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let teacher_id = params::required_i64(params, "teacherId")?;
    let patch = TeacherPatch {
        name: params::optional_str(params, "name")?,
        email: params::optional_str(params, "email")?,
        password: params::optional_str(params, "password")?,
        designation: params::optional_str(params, "designation")?,
        department: params::optional_str(params, "department")?,
    };
    let teacher = teachers::update(conn, teacher_id, patch)?;
    Ok(json!({ "teacher": teacher }))
}

fn delete(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let teacher_id = params::required_i64(params, "teacherId")?;
    teachers::delete(conn, teacher_id)?;
    Ok(json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "teachers.create" => Some(with_db(state, req, create)),
        "teachers.list" => Some(with_db(state, req, list)),
        "teachers.get" => Some(with_db(state, req, get)),
        "teachers.update" => Some(with_db(state, req, update)),
        "teachers.delete" => Some(with_db(state, req, delete)),
        _ => None,
    }
}
