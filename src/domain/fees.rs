use chrono::{Duration, Local, NaiveDate};
use log::info;
use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{Fee, FeeStatus};

pub const DEFAULT_TUITION_AMOUNT: f64 = 50000.0;
pub const DEFAULT_TUITION_DESCRIPTION: &str = "Semester 1 Tuition Fee";
const DEFAULT_DUE_DAYS: i64 = 30;

const SELECT_FEE: &str = "SELECT f.id, f.student_id, s.name, f.amount, f.description, f.status,
            f.due_date, f.payment_date, f.transaction_ref
     FROM fees f
     JOIN students s ON s.id = f.student_id";

fn row_to_fee(r: &Row) -> rusqlite::Result<Fee> {
    let status: String = r.get(5)?;
    Ok(Fee {
        id: r.get(0)?,
        student_id: r.get(1)?,
        student_name: r.get(2)?,
        amount: r.get(3)?,
        description: r.get(4)?,
        status: FeeStatus::parse(&status).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                rusqlite::types::Type::Text,
                format!("unknown fee status {status}").into(),
            )
        })?,
        due_date: r.get(6)?,
        payment_date: r.get(7)?,
        transaction_ref: r.get(8)?,
    })
}

pub fn list_all(conn: &Connection) -> DomainResult<Vec<Fee>> {
    let mut stmt = conn.prepare(&format!("{SELECT_FEE} ORDER BY f.id"))?;
    let rows = stmt
        .query_map([], row_to_fee)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Fee rows for one student. A student with no rows yet gets one pending
/// tuition fee seeded before the read returns; the seed and the emptiness
/// check share a transaction so two concurrent first reads cannot both seed.
pub fn list_by_student(conn: &Connection, student_id: i64) -> DomainResult<Vec<Fee>> {
    let tx = conn.unchecked_transaction()?;
    let mut rows = fees_for_student(&tx, student_id)?;
    if rows.is_empty() {
        seed_default_fee(&tx, student_id)?;
        rows = fees_for_student(&tx, student_id)?;
    }
    tx.commit()?;
    Ok(rows)
}

fn fees_for_student(conn: &Connection, student_id: i64) -> DomainResult<Vec<Fee>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_FEE} WHERE f.student_id = ? ORDER BY f.id"
    ))?;
    let rows = stmt
        .query_map([student_id], row_to_fee)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// Bootstrap convenience for freshly registered students, not a ledger
// invariant: a student's first fee read materialises one pending tuition
// item due thirty days out.
fn seed_default_fee(conn: &Connection, student_id: i64) -> DomainResult<()> {
    let known: Option<i64> = conn
        .query_row("SELECT id FROM students WHERE id = ?", [student_id], |r| {
            r.get(0)
        })
        .optional()?;
    if known.is_none() {
        return Err(DomainError::not_found("student", student_id));
    }
    let due: NaiveDate = Local::now().date_naive() + Duration::days(DEFAULT_DUE_DAYS);
    conn.execute(
        "INSERT INTO fees(student_id, amount, description, status, due_date)
         VALUES(?, ?, ?, ?, ?)",
        (
            student_id,
            DEFAULT_TUITION_AMOUNT,
            DEFAULT_TUITION_DESCRIPTION,
            FeeStatus::Pending.as_str(),
            due,
        ),
    )?;
    info!("seeded default tuition fee for student {}", student_id);
    Ok(())
}

/// One-way PENDING to PAID transition. Paying an already-paid fee fails;
/// there is no un-pay.
pub fn pay(conn: &Connection, fee_id: i64) -> DomainResult<Fee> {
    let tx = conn.unchecked_transaction()?;

    let status: Option<String> = tx
        .query_row("SELECT status FROM fees WHERE id = ?", [fee_id], |r| {
            r.get(0)
        })
        .optional()?;
    let Some(status) = status else {
        return Err(DomainError::not_found("fee", fee_id));
    };
    if status == FeeStatus::Paid.as_str() {
        return Err(DomainError::AlreadyPaid { fee_id });
    }

    let paid_on = Local::now().date_naive();
    let transaction_ref = new_transaction_ref();
    tx.execute(
        "UPDATE fees SET status = ?, payment_date = ?, transaction_ref = ? WHERE id = ?",
        (FeeStatus::Paid.as_str(), paid_on, &transaction_ref, fee_id),
    )?;
    let fee = tx.query_row(&format!("{SELECT_FEE} WHERE f.id = ?"), [fee_id], row_to_fee)?;
    tx.commit()?;
    info!("fee {} paid, reference {}", fee_id, transaction_ref);
    Ok(fee)
}

// Opaque reference for a settled payment. Uniqueness is a soft expectation
// carried by the generator, not a stored constraint.
fn new_transaction_ref() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("TXN-{}", id[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::new_transaction_ref;

    #[test]
    fn transaction_refs_are_prefixed_and_short() {
        let reference = new_transaction_ref();
        assert!(reference.starts_with("TXN-"));
        assert_eq!(reference.len(), 12);
        assert!(reference[4..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
