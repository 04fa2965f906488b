use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found with id {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    InvalidReference(String),

    #[error("fee {fee_id} is already paid")]
    AlreadyPaid { fee_id: i64 },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Db(#[from] rusqlite::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DomainError::NotFound { entity, id }
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        DomainError::Duplicate(message.into())
    }

    pub fn invalid_reference(message: impl Into<String>) -> Self {
        DomainError::InvalidReference(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    /// Folds a unique-constraint failure on a natural key into `Duplicate`.
    /// Any other storage failure passes through unchanged.
    pub fn map_unique_violation(err: rusqlite::Error, message: &str) -> Self {
        if is_unique_violation(&err) {
            DomainError::Duplicate(message.to_string())
        } else {
            DomainError::Db(err)
        }
    }
}

pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
