//! Goods Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::errors::ValidationError, ids::TypedId};

/// Goods Id
pub type GoodsId = TypedId<Goods>;

/// Goods Model
#[derive(Debug, Clone, PartialEq)]
pub struct Goods {
    pub id: GoodsId,
    pub name: String,
    pub stock: i64,
    pub price: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Goods {
    /// Adds `quantity` units to the stock count.
    ///
    /// # Errors
    ///
    /// Rejects non-positive quantities and increases the stock count cannot hold.
    pub fn increase_stock(&mut self, quantity: i64) -> Result<(), ValidationError> {
        if quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity(quantity));
        }

        self.stock =
            self.stock
                .checked_add(quantity)
                .ok_or(ValidationError::StockOutOfRange {
                    current: self.stock,
                    requested: quantity,
                })?;

        Ok(())
    }

    /// Removes `quantity` units from the stock count. The count never drops below zero.
    ///
    /// # Errors
    ///
    /// Rejects non-positive quantities and quantities above the current stock.
    pub fn decrease_stock(&mut self, quantity: i64) -> Result<(), ValidationError> {
        if quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity(quantity));
        }

        if quantity > self.stock {
            return Err(ValidationError::InsufficientStock {
                available: self.stock,
                requested: quantity,
            });
        }

        self.stock -= quantity;

        Ok(())
    }

    /// Applies a stock action.
    ///
    /// # Errors
    ///
    /// See [`Goods::increase_stock`] and [`Goods::decrease_stock`].
    pub fn apply_stock_action(
        &mut self,
        action: StockAction,
        quantity: i64,
    ) -> Result<(), ValidationError> {
        match action {
            StockAction::Increase => self.increase_stock(quantity),
            StockAction::Decrease => self.decrease_stock(quantity),
        }
    }
}

/// New Goods Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoods {
    pub name: String,
    pub stock: i64,
    pub price: Decimal,
}

impl NewGoods {
    /// Validates and normalises the new goods. Negative stock counts are clamped to zero.
    ///
    /// # Errors
    ///
    /// Rejects blank names and non-positive prices.
    pub fn new(
        name: impl Into<String>,
        stock: i64,
        price: Decimal,
    ) -> Result<Self, ValidationError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        if price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice(price));
        }

        Ok(Self {
            name,
            stock: stock.max(0),
            price,
        })
    }
}

/// Stock adjustment direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAction {
    Increase,
    Decrease,
}

impl FromStr for StockAction {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "INCR" => Ok(Self::Increase),
            "DECR" => Ok(Self::Decrease),
            _ => Err(ValidationError::UnknownStockAction(value.to_string())),
        }
    }
}

/// Column the goods listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoodsSortField {
    #[default]
    Id,
    Name,
    Stock,
    Price,
}

impl GoodsSortField {
    pub(crate) const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Stock => "stock",
            Self::Price => "price",
        }
    }
}

impl FromStr for GoodsSortField {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "stock" | "stocks" => Ok(Self::Stock),
            "price" => Ok(Self::Price),
            _ => Err(ValidationError::UnknownSortField(value.to_string())),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub(crate) const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(ValidationError::UnknownSortDirection(value.to_string())),
        }
    }
}

/// One page of the goods listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoodsQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort_by: GoodsSortField,
    pub direction: SortDirection,
}

impl GoodsQuery {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Row offset of the first goods on this page.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PageOutOfRange`] when the offset does not fit the store's
    /// `BIGINT` offset.
    pub fn offset(&self) -> Result<i64, ValidationError> {
        i64::from(self.page.max(1) - 1)
            .checked_mul(i64::from(self.limit()))
            .ok_or(ValidationError::PageOutOfRange { page: self.page })
    }

    /// Maximum number of rows on this page.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.page_size.max(1)
    }
}

impl Default for GoodsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
            sort_by: GoodsSortField::default(),
            direction: SortDirection::default(),
        }
    }
}
