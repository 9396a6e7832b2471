use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::mapper::RowError;

/// Classified outcome of a consistency-service call.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("group {0} not found")]
    GroupNotFound(String),
    #[error("decode error: {0}")]
    Decode(String),
    /// Any other backend failure (connectivity, syntax, aborted transaction).
    #[error("database error: {0}")]
    Db(String),
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => Self::Validation(msg),
        }
    }
}

impl ServiceError {
    pub fn not_found(entity: &'static str) -> Self { Self::NotFound(entity) }

    /// Classify a store error. A unique-index violation means another writer
    /// got there between our pre-check and the write.
    pub(crate) fn from_store(entity: &'static str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::AlreadyExists(entity),
            _ => Self::Db(err.to_string()),
        }
    }

    pub(crate) fn from_row(entity: &'static str, err: RowError) -> Self {
        match err {
            RowError::NotFound => Self::NotFound(entity),
            RowError::Decode(msg) => Self::Decode(msg),
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::AlreadyExists(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::GroupNotFound(_) => 1004,
            ServiceError::Decode(_) => 1101,
            ServiceError::Db(_) => 1200,
        }
    }
}
