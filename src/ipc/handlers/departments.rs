use rusqlite::Connection;
use serde_json::json;

use crate::domain::departments;
use crate::ipc::error::HandlerErr;
use crate::ipc::handlers::with_db;
use crate::ipc::types::{AppState, Request};

fn list(conn: &Connection, _params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let departments = departments::list_all(conn)?;
    Ok(json!({ "departments": departments }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "departments.list" => Some(with_db(state, req, list)),
        _ => None,
    }
}
