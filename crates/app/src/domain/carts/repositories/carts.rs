//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::models::{CartId, PersistedCartSummary, UserId},
    transactions::models::{Transaction as PaidTransaction, TransactionId},
};

const GET_OPEN_CART_SQL: &str = include_str!("../sql/get_open_cart.sql");
const LOCK_OPEN_CART_SQL: &str = include_str!("../sql/lock_open_cart.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const RECOMPUTE_CART_TOTAL_SQL: &str = include_str!("../sql/recompute_cart_total.sql");
const PROMOTE_CART_SQL: &str = include_str!("../sql/promote_cart.sql");
const GET_PAID_TRANSACTION_SQL: &str = include_str!("../sql/get_paid_transaction.sql");
const RESET_CARTS_SQL: &str = include_str!("../sql/reset_carts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_open_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Option<PersistedCartSummary>, sqlx::Error> {
        query_as::<Postgres, PersistedCartSummary>(GET_OPEN_CART_SQL)
            .bind(cart.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Reads an open cart and holds its row lock until the transaction ends.
    pub(crate) async fn lock_open_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<PersistedCartSummary, sqlx::Error> {
        query_as::<Postgres, PersistedCartSummary>(LOCK_OPEN_CART_SQL)
            .bind(cart.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        total_amount: Decimal,
    ) -> Result<PersistedCartSummary, sqlx::Error> {
        query_as::<Postgres, PersistedCartSummary>(CREATE_CART_SQL)
            .bind(user.into_i64())
            .bind(total_amount)
            .fetch_one(&mut **tx)
            .await
    }

    /// Sets the stored total to the sum of the cart's own line items and reports the
    /// quantity summed in the same statement.
    pub(crate) async fn recompute_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<PersistedCartSummary, sqlx::Error> {
        query_as::<Postgres, PersistedCartSummary>(RECOMPUTE_CART_TOTAL_SQL)
            .bind(cart.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn promote_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        payment_amount: Decimal,
        return_amount: Decimal,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(PROMOTE_CART_SQL)
            .bind(cart.into_i64())
            .bind(payment_amount)
            .bind(return_amount)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_paid_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        transaction: TransactionId,
    ) -> Result<Option<PaidTransaction>, sqlx::Error> {
        query_as::<Postgres, PaidTransaction>(GET_PAID_TRANSACTION_SQL)
            .bind(transaction.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Deletes every cart and line item and restarts id sequences at 1.
    pub(crate) async fn reset(&self, tx: &mut Transaction<'_, Postgres>) -> Result<(), sqlx::Error> {
        query(RESET_CARTS_SQL).execute(&mut **tx).await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for PersistedCartSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            cart_id: CartId::from_i64(row.try_get("id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            total_quantity: row.try_get("total_quantity")?,
            total_amount: row.try_get::<Decimal, _>("total_amount")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for PaidTransaction {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: TransactionId::from_i64(row.try_get("id")?),
            total_amount: row.try_get::<Decimal, _>("total_amount")?,
            payment_amount: row.try_get::<Decimal, _>("payment_amount")?,
            return_amount: row.try_get::<Decimal, _>("return_amount")?,
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
