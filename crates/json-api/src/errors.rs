//! Errors

use tracing::error;

use umkm_app::domain::{errors::ValidationError, shop::ShopServiceError};

use crate::response::ApiError;

impl From<ShopServiceError> for ApiError {
    fn from(error: ShopServiceError) -> Self {
        match error {
            ShopServiceError::Validation(source) => source.into(),
            ShopServiceError::InvalidReference => {
                Self::bad_request("referenced goods or cart does not exist")
            }
            ShopServiceError::InvalidData => Self::bad_request("invalid data"),
            ShopServiceError::NotFound(resource) => Self::not_found(format!("{resource} not found")),
            ShopServiceError::Consistency(detail) => {
                error!("consistency fault: {detail}");

                Self::conflict(detail)
            }
            ShopServiceError::Storage(source) => {
                error!("storage failure: {source}");

                Self::internal()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::bad_request(error.to_string())
    }
}
