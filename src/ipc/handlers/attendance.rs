use rusqlite::Connection;
use serde_json::json;

use crate::domain::attendance;
use crate::domain::model::AttendanceStatus;
use crate::ipc::error::HandlerErr;
use crate::ipc::handlers::with_db;
use crate::ipc::params;
use crate::ipc::types::{AppState, Request};

fn list_by_date(
    conn: &Connection,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let date = params::required_date(params, "date")?;
    let records = attendance::list_by_date(conn, date)?;
    Ok(json!({ "attendance": records }))
}

fn list_by_student(
    conn: &Connection,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = params::required_i64(params, "studentId")?;
    let records = attendance::list_by_student(conn, student_id)?;
    Ok(json!({ "attendance": records }))
}

fn save_day(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let date = params::required_date(params, "date")?;
    let Some(entries_json) = params.get("entries").and_then(|v| v.as_object()) else {
        return Err(HandlerErr::bad_params("missing entries"));
    };

    let mut entries: Vec<(i64, AttendanceStatus)> = Vec::with_capacity(entries_json.len());
    for (key, value) in entries_json {
        let student_id: i64 = key
            .parse()
            .map_err(|_| HandlerErr::bad_params(format!("entry key {key} is not a student id")))?;
        let Some(raw_status) = value.as_str() else {
            return Err(HandlerErr::bad_params(format!(
                "entry for student {key} must be a status string"
            )));
        };
        entries.push((student_id, AttendanceStatus::parse(raw_status)?));
    }

    let written = attendance::upsert_batch(conn, date, &entries)?;
    Ok(json!({ "written": written }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.listByDate" => Some(with_db(state, req, list_by_date)),
        "attendance.listByStudent" => Some(with_db(state, req, list_by_student)),
        "attendance.saveDay" => Some(with_db(state, req, save_day)),
        _ => None,
    }
}
