//! Get Cart Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use umkm_app::domain::carts::models::{CartId, LineItem, ShoppingCart};

use crate::{
    extensions::*,
    response::{ApiError, SuccessResponse},
    state::State,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub cart_id: i64,
    pub user_id: i64,
    pub total_goods: i64,

    #[salvo(schema(value_type = f64))]
    pub total_amount: Decimal,

    /// Line items in the order they were added
    pub items: Vec<LineItemResponse>,
}

/// Line Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineItemResponse {
    pub goods_id: i64,
    pub total_goods: i64,

    #[salvo(schema(value_type = f64))]
    pub goods_price: Decimal,

    #[salvo(schema(value_type = f64))]
    pub subtotal: Decimal,

    /// Seconds since the Unix epoch
    pub added_at: i64,
}

impl From<&LineItem> for LineItemResponse {
    fn from(item: &LineItem) -> Self {
        Self {
            goods_id: item.goods_id.into_i64(),
            total_goods: item.quantity,
            goods_price: item.unit_price,
            // Carts are only built through checked totals, so this never falls back.
            subtotal: item.subtotal().unwrap_or_default(),
            added_at: item.added_at_epoch_seconds(),
        }
    }
}

impl CartResponse {
    fn from_cart(cart_id: CartId, cart: &ShoppingCart) -> Self {
        Self {
            cart_id: cart_id.into_i64(),
            user_id: cart.user_id().into_i64(),
            total_goods: cart.total_quantity(),
            total_amount: cart.total_amount(),
            items: cart.line_items().iter().map(LineItemResponse::from).collect(),
        }
    }
}

/// Get Cart Handler
///
/// Returns an open cart with its line items. Paid carts are not found.
#[endpoint(tags("carts"), summary = "Get Open Cart")]
pub(crate) async fn handler(
    cart: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<SuccessResponse<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart_id = CartId::from_i64(cart.into_inner());

    let cart = state.app.shop.view_cart(cart_id).await?;

    Ok(SuccessResponse::ok(CartResponse::from_cart(cart_id, &cart)))
}
