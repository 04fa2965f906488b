//! Academic administration records over a per-workspace SQLite database.
//!
//! The `domain` module is the consistency core: departments, subjects,
//! students, teachers and the attendance/result/fee ledgers, with cascade
//! cleanup on student and subject deletes. `ipc` is the thin JSON request
//! surface the sidecar binary wraps around it.

pub mod backup;
pub mod db;
pub mod domain;
pub mod ipc;
