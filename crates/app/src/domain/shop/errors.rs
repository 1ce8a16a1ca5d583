//! Shop service errors.

use thiserror::Error;

use crate::domain::{
    carts::CartsServiceError, errors::ValidationError, goods::GoodsServiceError,
};

#[derive(Debug, Error)]
pub enum ShopServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("{0}")]
    Consistency(String),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<CartsServiceError> for ShopServiceError {
    fn from(error: CartsServiceError) -> Self {
        match error {
            CartsServiceError::NotFound => Self::NotFound("cart"),
            CartsServiceError::InvalidReference => Self::InvalidReference,
            CartsServiceError::AlreadyExists
            | CartsServiceError::MissingRequiredData
            | CartsServiceError::InvalidData => Self::InvalidData,
            CartsServiceError::Validation(error) => Self::Validation(error),
            CartsServiceError::Consistency { .. } => Self::Consistency(error.to_string()),
            CartsServiceError::Sql(_) => Self::Storage(Box::new(error)),
        }
    }
}

impl From<GoodsServiceError> for ShopServiceError {
    fn from(error: GoodsServiceError) -> Self {
        match error {
            GoodsServiceError::NotFound => Self::NotFound("goods"),
            GoodsServiceError::InvalidReference => Self::InvalidReference,
            GoodsServiceError::AlreadyExists
            | GoodsServiceError::MissingRequiredData
            | GoodsServiceError::InvalidData => Self::InvalidData,
            GoodsServiceError::Validation(error) => Self::Validation(error),
            GoodsServiceError::Sql(_) => Self::Storage(Box::new(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::carts::models::CartId;

    use super::*;

    #[test]
    fn missing_cart_names_the_resource() {
        let error = ShopServiceError::from(CartsServiceError::NotFound);

        assert_eq!(error.to_string(), "cart not found");
    }

    #[test]
    fn consistency_fault_keeps_the_cart_detail() {
        let error = ShopServiceError::from(CartsServiceError::Consistency {
            cart: CartId::from_i64(3),
            operation: "payment",
        });

        assert!(
            matches!(&error, ShopServiceError::Consistency(message) if message.contains("cart 3")),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn storage_errors_keep_their_source() {
        let error = ShopServiceError::from(GoodsServiceError::Sql(sqlx::Error::PoolTimedOut));

        assert!(matches!(error, ShopServiceError::Storage(_)));
        assert!(std::error::Error::source(&error).is_some());
    }
}
