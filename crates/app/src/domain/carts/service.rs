//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartId, PersistedCartSummary, ShoppingCart},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        transactions::models::{Transaction, TransactionId},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn insert_cart(
        &self,
        cart: &ShoppingCart,
    ) -> Result<PersistedCartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .carts_repository
            .create_cart(&mut tx, cart.user_id(), cart.total_amount())
            .await?;

        for item in cart.line_items() {
            self.items_repository
                .create_cart_item(&mut tx, created.cart_id, item)
                .await?;
        }

        let summary = self
            .carts_repository
            .recompute_total(&mut tx, created.cart_id)
            .await?;

        tx.commit().await?;

        debug!(cart = %summary.cart_id, user = %summary.user_id, "cart created");

        Ok(summary)
    }

    async fn append_to_cart(
        &self,
        cart_id: CartId,
        cart: &ShoppingCart,
    ) -> Result<PersistedCartSummary, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        // Serializes concurrent appends so each recompute sees every committed item.
        self.carts_repository
            .lock_open_cart(&mut tx, cart_id)
            .await?;

        for item in cart.pending_line_items() {
            self.items_repository
                .create_cart_item(&mut tx, cart_id, item)
                .await?;
        }

        let summary = self
            .carts_repository
            .recompute_total(&mut tx, cart_id)
            .await?;

        tx.commit().await?;

        debug!(cart = %cart_id, total = %summary.total_amount, "cart updated");

        Ok(summary)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn fetch_open_cart(
        &self,
        cart: CartId,
    ) -> Result<Option<ShoppingCart>, CartsServiceError> {
        let mut tx = self.db.begin_snapshot().await?;

        let Some(summary) = self.carts_repository.get_open_cart(&mut tx, cart).await? else {
            tx.commit().await?;

            return Ok(None);
        };

        let items = self.items_repository.get_cart_items(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(Some(ShoppingCart::restore(
            summary.cart_id,
            summary.user_id,
            items,
        )?))
    }

    async fn upsert_cart(
        &self,
        cart: ShoppingCart,
    ) -> Result<PersistedCartSummary, CartsServiceError> {
        match cart.id() {
            Some(cart_id) => self.append_to_cart(cart_id, &cart).await,
            None => self.insert_cart(&cart).await,
        }
    }

    async fn promote_to_transaction(
        &self,
        cart: CartId,
        payment_amount: Option<Decimal>,
    ) -> Result<Transaction, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let locked = self.carts_repository.lock_open_cart(&mut tx, cart).await?;

        let transaction_id = TransactionId::from_i64(cart.into_i64());

        let mut transaction = Transaction::pending(transaction_id, locked.total_amount);

        transaction.apply_payment(payment_amount.unwrap_or(locked.total_amount))?;

        let rows_affected = self
            .carts_repository
            .promote_cart(
                &mut tx,
                cart,
                transaction.payment_amount,
                transaction.return_amount,
            )
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let paid = self
            .carts_repository
            .get_paid_transaction(&mut tx, transaction_id)
            .await?
            .ok_or(CartsServiceError::Consistency {
                cart,
                operation: "payment",
            })?;

        tx.commit().await?;

        debug!(cart = %cart, total = %paid.total_amount, "cart paid");

        Ok(paid)
    }

    async fn reset(&self) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository.reset(&mut tx).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Loads an open cart with its line items from one snapshot. Paid or unknown carts are `None`.
    async fn fetch_open_cart(&self, cart: CartId)
    -> Result<Option<ShoppingCart>, CartsServiceError>;

    /// Inserts a new cart with all of its items, or appends the pending items of an
    /// existing open cart and recomputes its stored total.
    async fn upsert_cart(
        &self,
        cart: ShoppingCart,
    ) -> Result<PersistedCartSummary, CartsServiceError>;

    /// Marks an open cart as paid. A missing payment amount means exact payment.
    async fn promote_to_transaction(
        &self,
        cart: CartId,
        payment_amount: Option<Decimal>,
    ) -> Result<Transaction, CartsServiceError>;

    /// Removes every cart and line item and restarts cart numbering.
    async fn reset(&self) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use tokio::task::JoinSet;

    use crate::{
        domain::{carts::models::UserId, errors::ValidationError, goods::models::GoodsId},
        test::{TestContext, helpers},
    };

    use super::*;

    async fn seed_goods(ctx: &TestContext, price: i64) -> TestResult<GoodsId> {
        Ok(helpers::create_goods(ctx, &format!("Goods {price}"), 100, price)
            .await?
            .id)
    }

    async fn create_cart(
        ctx: &TestContext,
        goods: GoodsId,
        quantity: i64,
        price: i64,
    ) -> Result<PersistedCartSummary, CartsServiceError> {
        helpers::create_cart(ctx, 100, goods, quantity, price).await
    }

    #[tokio::test]
    async fn first_cart_gets_id_one_and_item_total() -> TestResult {
        let ctx = TestContext::new().await;
        let goods = seed_goods(&ctx, 2000).await?;

        let summary = create_cart(&ctx, goods, 2, 2000).await?;

        assert_eq!(summary.cart_id, CartId::from_i64(1));
        assert_eq!(summary.user_id, UserId::from_i64(100));
        assert_eq!(summary.total_quantity, 2);
        assert_eq!(summary.total_amount, Decimal::from(4000));

        Ok(())
    }

    #[tokio::test]
    async fn appending_to_existing_cart_recomputes_total_from_its_own_items() -> TestResult {
        let ctx = TestContext::new().await;
        let first_goods = seed_goods(&ctx, 2000).await?;
        let second_goods = seed_goods(&ctx, 1500).await?;

        let summary = create_cart(&ctx, first_goods, 2, 2000).await?;

        // An unrelated cart must not leak into the first cart's total.
        create_cart(&ctx, second_goods, 9, 1500).await?;

        let mut cart = ctx
            .carts
            .fetch_open_cart(summary.cart_id)
            .await?
            .ok_or("cart should be open")?;

        cart.add_line_item(second_goods, 4, Decimal::from(1500))?;

        let updated = ctx.carts.upsert_cart(cart).await?;

        assert_eq!(updated.cart_id, summary.cart_id);
        assert_eq!(updated.total_quantity, 6);
        assert_eq!(updated.total_amount, Decimal::from(10_000));

        let reloaded = ctx
            .carts
            .fetch_open_cart(summary.cart_id)
            .await?
            .ok_or("cart should be open")?;

        assert_eq!(reloaded.line_items().len(), 2);
        assert_eq!(reloaded.total_quantity(), 6);
        assert_eq!(reloaded.total_amount(), Decimal::from(10_000));

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_to_one_cart_are_all_counted() -> TestResult {
        const APPENDS: i64 = 8;
        const PRICE: i64 = 1000;

        let ctx = TestContext::new().await;
        let goods = seed_goods(&ctx, PRICE).await?;

        let summary = create_cart(&ctx, goods, 1, PRICE).await?;

        let mut appends = JoinSet::new();

        for quantity in 1..=APPENDS {
            let carts = ctx.carts.clone();
            let cart_id = summary.cart_id;

            appends.spawn(async move {
                let mut cart = carts
                    .fetch_open_cart(cart_id)
                    .await?
                    .ok_or(CartsServiceError::NotFound)?;

                cart.add_line_item(goods, quantity, Decimal::from(PRICE))?;

                carts.upsert_cart(cart).await
            });
        }

        while let Some(joined) = appends.join_next().await {
            let appended = joined??;

            // Quantity and amount come from one locked read, so they always agree.
            assert_eq!(
                appended.total_amount,
                Decimal::from(appended.total_quantity * PRICE),
                "summary mixes two cart states: {appended:?}"
            );
        }

        let reloaded = ctx
            .carts
            .fetch_open_cart(summary.cart_id)
            .await?
            .ok_or("cart should be open")?;

        let expected_quantity = 1 + (1..=APPENDS).sum::<i64>();

        assert_eq!(reloaded.line_items().len(), usize::try_from(APPENDS + 1)?);
        assert_eq!(reloaded.total_quantity(), expected_quantity);
        assert_eq!(
            reloaded.total_amount(),
            Decimal::from(expected_quantity * PRICE)
        );

        let paid = ctx
            .carts
            .promote_to_transaction(summary.cart_id, None)
            .await?;

        assert_eq!(paid.total_amount, reloaded.total_amount());

        Ok(())
    }

    #[tokio::test]
    async fn fetch_unknown_cart_returns_none() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = ctx.carts.fetch_open_cart(CartId::from_i64(999)).await?;

        assert!(cart.is_none(), "expected no cart, got {cart:?}");

        Ok(())
    }

    #[tokio::test]
    async fn line_item_for_unknown_goods_returns_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;

        let mut cart = ShoppingCart::new(UserId::from_i64(100))?;

        cart.add_line_item(GoodsId::from_i64(404), 1, Decimal::from(1000))?;

        let result = ctx.carts.upsert_cart(cart).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn paying_closes_the_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let goods = seed_goods(&ctx, 2000).await?;

        let summary = create_cart(&ctx, goods, 2, 2000).await?;

        let paid = ctx
            .carts
            .promote_to_transaction(summary.cart_id, Some(Decimal::from(5000)))
            .await?;

        assert_eq!(paid.id.into_i64(), summary.cart_id.into_i64());
        assert_eq!(paid.total_amount, Decimal::from(4000));
        assert_eq!(paid.payment_amount, Decimal::from(5000));
        assert_eq!(paid.return_amount, Decimal::from(1000));
        assert!(paid.paid_at.is_some());

        assert!(ctx.carts.fetch_open_cart(summary.cart_id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn paying_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let goods = seed_goods(&ctx, 2000).await?;

        let summary = create_cart(&ctx, goods, 1, 2000).await?;

        ctx.carts
            .promote_to_transaction(summary.cart_id, None)
            .await?;

        let result = ctx
            .carts
            .promote_to_transaction(summary.cart_id, None)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn insufficient_payment_leaves_cart_open() -> TestResult {
        let ctx = TestContext::new().await;
        let goods = seed_goods(&ctx, 2000).await?;

        let summary = create_cart(&ctx, goods, 2, 2000).await?;

        let result = ctx
            .carts
            .promote_to_transaction(summary.cart_id, Some(Decimal::from(100)))
            .await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::Validation(
                    ValidationError::InsufficientPayment { .. }
                ))
            ),
            "expected InsufficientPayment, got {result:?}"
        );
        assert!(ctx.carts.fetch_open_cart(summary.cart_id).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn reset_restarts_cart_numbering() -> TestResult {
        let ctx = TestContext::new().await;
        let goods = seed_goods(&ctx, 2000).await?;

        create_cart(&ctx, goods, 1, 2000).await?;
        create_cart(&ctx, goods, 1, 2000).await?;

        ctx.carts.reset().await?;

        assert!(ctx.carts.fetch_open_cart(CartId::from_i64(1)).await?.is_none());

        let summary = create_cart(&ctx, goods, 1, 2000).await?;

        assert_eq!(summary.cart_id, CartId::from_i64(1));

        Ok(())
    }
}
