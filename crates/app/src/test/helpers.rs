//! Test Helpers

use rust_decimal::Decimal;

use crate::{
    domain::{
        carts::{
            CartsService, CartsServiceError,
            models::{PersistedCartSummary, ShoppingCart, UserId},
        },
        goods::{
            GoodsService, GoodsServiceError,
            models::{Goods, GoodsId, NewGoods},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_goods(
    ctx: &TestContext,
    name: &str,
    stock: i64,
    price: i64,
) -> Result<Goods, GoodsServiceError> {
    ctx.goods
        .create_goods(NewGoods {
            name: name.to_string(),
            stock,
            price: Decimal::from(price),
        })
        .await
}

/// Persists a new single-item cart for `user`.
pub(crate) async fn create_cart(
    ctx: &TestContext,
    user: i64,
    goods: GoodsId,
    quantity: i64,
    price: i64,
) -> Result<PersistedCartSummary, CartsServiceError> {
    let mut cart = ShoppingCart::new(UserId::from_i64(user))?;

    cart.add_line_item(goods, quantity, Decimal::from(price))?;

    ctx.carts.upsert_cart(cart).await
}
