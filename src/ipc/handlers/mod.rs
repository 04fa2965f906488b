pub mod attendance;
pub mod core;
pub mod departments;
pub mod fees;
pub mod notices;
pub mod results;
pub mod students;
pub mod subjects;
pub mod teachers;

use rusqlite::Connection;

use crate::ipc::error::{err, ok, HandlerErr};
use crate::ipc::types::{AppState, Request};

/// Runs a handler against the open workspace database, mapping the
/// no-workspace case and handler errors to protocol responses.
pub(crate) fn with_db(
    state: &AppState,
    req: &Request,
    f: fn(&Connection, &serde_json::Value) -> Result<serde_json::Value, HandlerErr>,
) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match f(conn, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(e) => e.response(&req.id),
    }
}
