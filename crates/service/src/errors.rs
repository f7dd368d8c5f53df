use thiserror::Error;

use models::option::RecordId;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("missing input: {0}")]
    NullInput(String),
    #[error("already deleted: {0}")]
    AlreadyDeleted(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: &RecordId) -> Self { Self::NotFound(format!("{} with id {} not found", entity, id)) }

    /// Bulk lookups report every id that could not be matched.
    pub fn missing(entity: &str, ids: &[RecordId]) -> Self {
        let list = ids.iter().map(RecordId::as_str).collect::<Vec<_>>().join(", ");
        Self::NotFound(format!("{} ids not found: [{}]", entity, list))
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => Self::InvalidInput(msg),
            models::errors::ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}
