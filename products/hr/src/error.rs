use sea_orm::DbErr;
use thiserror::Error;

use crate::input::FieldErrors;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    /// A malformed identifier on a path that requires a valid one.
    #[error("Invalid employee ID: {0}")]
    InvalidArgument(String),
    #[error("employee input failed validation")]
    Validation(FieldErrors),
    #[error("Employee not found with ID: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

impl From<FieldErrors> for HrError {
    fn from(value: FieldErrors) -> Self {
        HrError::Validation(value)
    }
}
