use rusqlite::Connection;
use serde_json::json;

use crate::domain::model::NoticePriority;
use crate::domain::notices::{self, NewNotice};
use crate::ipc::error::HandlerErr;
use crate::ipc::handlers::with_db;
use crate::ipc::params;
use crate::ipc::types::{AppState, Request};

fn list(conn: &Connection, _params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let notices = notices::list(conn)?;
    Ok(json!({ "notices": notices }))
}

fn create(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let priority = match params::optional_str(params, "priority")? {
        Some(raw) => NoticePriority::parse(&raw)?,
        None => NoticePriority::Normal,
    };
    let new = NewNotice {
        title: params::required_str(params, "title")?,
        content: params::required_str(params, "content")?,
        date: params::optional_date(params, "date")?,
        priority,
    };
    let notice = notices::create(conn, new)?;
    Ok(json!({ "notice": notice }))
}

fn delete(conn: &Connection, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let notice_id = params::required_i64(params, "noticeId")?;
    notices::delete(conn, notice_id)?;
    Ok(json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "notices.list" => Some(with_db(state, req, list)),
        "notices.create" => Some(with_db(state, req, create)),
        "notices.delete" => Some(with_db(state, req, delete)),
        _ => None,
    }
}
