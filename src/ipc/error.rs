use serde_json::json;

use crate::domain::error::DomainError;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn bad_params(message: impl Into<String>) -> Self {
        HandlerErr {
            code: "bad_params",
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

impl From<DomainError> for HandlerErr {
    fn from(e: DomainError) -> Self {
        let code = match &e {
            DomainError::NotFound { .. } => "not_found",
            DomainError::Duplicate(_) => "duplicate",
            DomainError::InvalidReference(_) => "invalid_reference",
            DomainError::AlreadyPaid { .. } => "already_paid",
            DomainError::Validation(_) => "validation_failed",
            DomainError::Db(_) => "db_query_failed",
        };
        HandlerErr {
            code,
            message: e.to_string(),
            details: None,
        }
    }
}
