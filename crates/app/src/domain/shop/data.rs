//! Shop request and response data.

use rust_decimal::Decimal;

use crate::domain::{
    carts::models::{CartId, UserId},
    goods::models::{GoodsId, StockAction},
};

/// Add goods to a cart, creating the cart when `cart_id` is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct AddToCart {
    pub cart_id: Option<CartId>,
    pub user_id: UserId,
    pub goods_id: GoodsId,
    pub unit_price: Decimal,
    pub quantity: i64,
}

/// State of a cart after an item was added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartAdded {
    pub cart_id: CartId,
    pub user_id: UserId,
    pub total_quantity: i64,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payment {
    pub cart_id: CartId,
    /// `None` pays exactly the cart total.
    pub payment_amount: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockUpdate {
    pub action: StockAction,
    pub goods_id: GoodsId,
    pub quantity: i64,
}
