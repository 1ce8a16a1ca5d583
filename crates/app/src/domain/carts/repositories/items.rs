//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    carts::models::{CartId, LineItem, LineItemId},
    goods::models::GoodsId,
};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Line items of a cart in insertion order.
    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Vec<LineItem>, sqlx::Error> {
        query_as::<Postgres, LineItem>(GET_CART_ITEMS_SQL)
            .bind(cart.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        item: &LineItem,
    ) -> Result<LineItem, sqlx::Error> {
        query_as::<Postgres, LineItem>(CREATE_CART_ITEM_SQL)
            .bind(cart.into_i64())
            .bind(item.goods_id.into_i64())
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(SqlxTimestamp::from(item.added_at))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for LineItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: Some(LineItemId::from_i64(row.try_get("id")?)),
            goods_id: GoodsId::from_i64(row.try_get("goods_id")?),
            quantity: row.try_get("quantity")?,
            unit_price: row.try_get::<Decimal, _>("unit_price")?,
            added_at: row.try_get::<SqlxTimestamp, _>("added_at")?.to_jiff(),
        })
    }
}
