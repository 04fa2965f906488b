use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{Notice, NoticePriority};

const SELECT_NOTICE: &str = "SELECT id, title, content, date, priority FROM notices";

fn row_to_notice(r: &Row) -> rusqlite::Result<Notice> {
    let priority: String = r.get(4)?;
    Ok(Notice {
        id: r.get(0)?,
        title: r.get(1)?,
        content: r.get(2)?,
        date: r.get(3)?,
        priority: NoticePriority::parse(&priority).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                format!("unknown notice priority {priority}").into(),
            )
        })?,
    })
}

#[derive(Debug, Clone)]
pub struct NewNotice {
    pub title: String,
    pub content: String,
    pub date: Option<NaiveDate>,
    pub priority: NoticePriority,
}

/// Most recent first; id breaks ties between same-day notices.
pub fn list(conn: &Connection) -> DomainResult<Vec<Notice>> {
    let mut stmt = conn.prepare(&format!("{SELECT_NOTICE} ORDER BY date DESC, id DESC"))?;
    let rows = stmt
        .query_map([], row_to_notice)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn create(conn: &Connection, new: NewNotice) -> DomainResult<Notice> {
    let title = new.title.trim();
    if title.is_empty() {
        return Err(DomainError::validation("notice title must not be blank"));
    }
    let content = new.content.trim();
    if content.is_empty() {
        return Err(DomainError::validation("notice content must not be blank"));
    }
    let date = new.date.unwrap_or_else(|| Local::now().date_naive());

    conn.execute(
        "INSERT INTO notices(title, content, date, priority) VALUES(?, ?, ?, ?)",
        (title, content, date, new.priority.as_str()),
    )?;
    let notice = conn
        .query_row(
            &format!("{SELECT_NOTICE} WHERE id = ?"),
            [conn.last_insert_rowid()],
            row_to_notice,
        )
        .optional()?
        .ok_or(DomainError::Db(rusqlite::Error::QueryReturnedNoRows))?;
    Ok(notice)
}

pub fn delete(conn: &Connection, notice_id: i64) -> DomainResult<()> {
    let changed = conn.execute("DELETE FROM notices WHERE id = ?", [notice_id])?;
    if changed == 0 {
        return Err(DomainError::not_found("notice", notice_id));
    }
    Ok(())
}
