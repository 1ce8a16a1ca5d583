//! Domain validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rule violations raised by the in-memory entities before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("user id must be positive")]
    InvalidUser,

    #[error("goods id must be positive")]
    InvalidGoods,

    #[error("goods name must not be empty")]
    EmptyName,

    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),

    #[error("price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("price may have at most two decimal places, got {0}")]
    PriceScale(Decimal),

    #[error("amount exceeds {max}")]
    AmountOutOfRange { max: Decimal },

    #[error("stock of {current} cannot grow by {requested}")]
    StockOutOfRange { current: i64, requested: i64 },

    #[error("page {page} is beyond the last addressable page")]
    PageOutOfRange { page: u32 },

    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("insufficient payment: total is {total}, paid {payment}")]
    InsufficientPayment { total: Decimal, payment: Decimal },

    #[error("unknown sort field \"{0}\"")]
    UnknownSortField(String),

    #[error("unknown sort direction \"{0}\"")]
    UnknownSortDirection(String),

    #[error("unknown stock action \"{0}\"")]
    UnknownStockAction(String),
}
