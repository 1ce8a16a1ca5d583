//! Goods Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::goods::models::{Goods, GoodsId, GoodsQuery, NewGoods};

const LIST_GOODS_SQL: &str = include_str!("sql/list_goods.sql");
const GET_GOODS_SQL: &str = include_str!("sql/get_goods.sql");
const LOCK_GOODS_SQL: &str = include_str!("sql/lock_goods.sql");
const CREATE_GOODS_SQL: &str = include_str!("sql/create_goods.sql");
const UPDATE_GOODS_STOCK_SQL: &str = include_str!("sql/update_goods_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgGoodsRepository;

impl PgGoodsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_goods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        goods_query: &GoodsQuery,
        offset: i64,
    ) -> Result<Vec<Goods>, sqlx::Error> {
        let sql = list_goods_sql(goods_query);

        query_as::<Postgres, Goods>(&sql)
            .bind(i64::from(goods_query.limit()))
            .bind(offset)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_goods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        goods: GoodsId,
    ) -> Result<Goods, sqlx::Error> {
        query_as::<Postgres, Goods>(GET_GOODS_SQL)
            .bind(goods.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    /// Reads a goods row and holds its row lock until the transaction ends.
    pub(crate) async fn lock_goods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        goods: GoodsId,
    ) -> Result<Goods, sqlx::Error> {
        query_as::<Postgres, Goods>(LOCK_GOODS_SQL)
            .bind(goods.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_goods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        goods: NewGoods,
    ) -> Result<Goods, sqlx::Error> {
        query_as::<Postgres, Goods>(CREATE_GOODS_SQL)
            .bind(goods.name)
            .bind(goods.stock)
            .bind(goods.price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        goods: GoodsId,
        stock: i64,
    ) -> Result<Goods, sqlx::Error> {
        query_as::<Postgres, Goods>(UPDATE_GOODS_STOCK_SQL)
            .bind(goods.into_i64())
            .bind(stock)
            .fetch_one(&mut **tx)
            .await
    }
}

/// Sort column and direction come from closed enums, never from caller text.
fn list_goods_sql(goods_query: &GoodsQuery) -> String {
    let column = goods_query.sort_by.column();
    let direction = goods_query.direction.keyword();

    format!(
        "{} ORDER BY {column} {direction}, id {direction} LIMIT $1 OFFSET $2",
        LIST_GOODS_SQL.trim_end()
    )
}

impl<'r> FromRow<'r, PgRow> for Goods {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: GoodsId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            stock: row.try_get("stock")?,
            price: row.try_get::<Decimal, _>("price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::goods::models::{GoodsSortField, SortDirection};

    use super::*;

    #[test]
    fn list_sql_orders_by_requested_column_with_id_tiebreak() {
        let sql = list_goods_sql(&GoodsQuery {
            page: 2,
            page_size: 5,
            sort_by: GoodsSortField::Price,
            direction: SortDirection::Asc,
        });

        assert!(
            sql.ends_with("ORDER BY price ASC, id ASC LIMIT $1 OFFSET $2"),
            "unexpected sql: {sql}"
        );
    }
}
