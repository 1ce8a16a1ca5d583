//! Goods service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::errors::ValidationError;

#[derive(Debug, Error)]
pub enum GoodsServiceError {
    #[error("goods already exists")]
    AlreadyExists,

    #[error("goods not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for GoodsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = GoodsServiceError::from(Error::RowNotFound);

        assert!(matches!(error, GoodsServiceError::NotFound));
    }

    #[test]
    fn pool_errors_stay_storage_errors() {
        let error = GoodsServiceError::from(Error::PoolTimedOut);

        assert!(matches!(error, GoodsServiceError::Sql(Error::PoolTimedOut)));
    }
}
