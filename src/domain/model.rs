use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: String,
}

/// Subjects hold a non-owning department reference; reads resolve the name
/// for display but only the foreign id is stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub department_id: Option<i64>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Credential value as supplied by the caller; hashing happens upstream.
    #[serde(skip_serializing)]
    pub password: String,
    pub gpa: Option<f64>,
    #[serde(skip_serializing)]
    pub department_id: Option<i64>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub designation: Option<String>,
    #[serde(skip_serializing)]
    pub department_id: Option<i64>,
    pub department: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }

    pub fn parse(value: &str) -> DomainResult<Self> {
        match value {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            other => Err(DomainError::validation(format!(
                "attendance status must be present, absent or late, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub subject_id: i64,
    pub subject_name: String,
    pub marks: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeeStatus {
    Pending,
    Paid,
}

impl FeeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FeeStatus::Pending => "PENDING",
            FeeStatus::Paid => "PAID",
        }
    }

    pub fn parse(value: &str) -> DomainResult<Self> {
        match value {
            "PENDING" => Ok(FeeStatus::Pending),
            "PAID" => Ok(FeeStatus::Paid),
            other => Err(DomainError::validation(format!(
                "fee status must be PENDING or PAID, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub amount: f64,
    pub description: String,
    pub status: FeeStatus,
    pub due_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub transaction_ref: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticePriority {
    High,
    Normal,
    Low,
}

impl NoticePriority {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticePriority::High => "high",
            NoticePriority::Normal => "normal",
            NoticePriority::Low => "low",
        }
    }

    pub fn parse(value: &str) -> DomainResult<Self> {
        match value {
            "high" => Ok(NoticePriority::High),
            "normal" => Ok(NoticePriority::Normal),
            "low" => Ok(NoticePriority::Low),
            other => Err(DomainError::validation(format!(
                "notice priority must be high, normal or low, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub priority: NoticePriority,
}

/// Treats blank and absent the same way for patch-style updates.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
