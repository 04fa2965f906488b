use rusqlite::Connection;
use serde_json::json;

use crate::domain::fees;
use crate::ipc::error::HandlerErr;
use crate::ipc::handlers::with_db;
use crate::ipc::params;
use crate::ipc::types::{AppState, Request};

fn list(conn: &Connection, _params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let fees = fees::list_all(conn)?;
    Ok(json!({ "fees": fees }))
}

fn list_by_student(
    conn: &Connection,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = params::required_i64(params, "studentId")?;
    let fees = fees::list_by_student(conn, student_id)?;
    Ok(json!({ "fees": fees }))
}

fn pay(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let fee_id = params::required_i64(params, "feeId")?;
    let fee = fees::pay(conn, fee_id)?;
    Ok(json!({ "fee": fee }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "fees.list" => Some(with_db(state, req, list)),
        "fees.listByStudent" => Some(with_db(state, req, list_by_student)),
        "fees.pay" => Some(with_db(state, req, pay)),
        _ => None,
    }
}
