//! Shop service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{
    carts::{
        CartsService,
        models::{CartId, ShoppingCart},
    },
    goods::{
        GoodsService,
        models::{Goods, GoodsQuery},
    },
    shop::{
        data::{AddToCart, CartAdded, Payment, StockUpdate},
        errors::ShopServiceError,
        support::SupportService,
    },
    transactions::models::{Transaction, TransactionId},
};

#[derive(Clone)]
pub struct DefaultShopService {
    goods: Arc<dyn GoodsService>,
    carts: Arc<dyn CartsService>,
    support: Arc<dyn SupportService>,
}

impl std::fmt::Debug for DefaultShopService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultShopService").finish_non_exhaustive()
    }
}

impl DefaultShopService {
    #[must_use]
    pub fn new(
        goods: Arc<dyn GoodsService>,
        carts: Arc<dyn CartsService>,
        support: Arc<dyn SupportService>,
    ) -> Self {
        Self {
            goods,
            carts,
            support,
        }
    }

    async fn open_cart(&self, cart: CartId) -> Result<ShoppingCart, ShopServiceError> {
        self.carts
            .fetch_open_cart(cart)
            .await?
            .ok_or(ShopServiceError::NotFound("cart"))
    }
}

#[async_trait]
impl ShopService for DefaultShopService {
    async fn list_goods(&self, query: GoodsQuery) -> Result<Vec<Goods>, ShopServiceError> {
        Ok(self.goods.list_goods(query).await?)
    }

    async fn add_to_cart(&self, request: AddToCart) -> Result<CartAdded, ShopServiceError> {
        let mut cart = match request.cart_id {
            Some(cart_id) => self.open_cart(cart_id).await?,
            None => ShoppingCart::new(request.user_id)?,
        };

        cart.add_line_item(request.goods_id, request.quantity, request.unit_price)?;

        let summary = self.carts.upsert_cart(cart).await?;

        debug!(
            cart = %summary.cart_id,
            goods = %request.goods_id,
            quantity = request.quantity,
            "goods added to cart"
        );

        Ok(CartAdded {
            cart_id: summary.cart_id,
            user_id: summary.user_id,
            total_quantity: summary.total_quantity,
            total_amount: summary.total_amount,
        })
    }

    async fn pay(&self, payment: Payment) -> Result<Transaction, ShopServiceError> {
        let cart = self.open_cart(payment.cart_id).await?;

        let mut transaction = Transaction::pending(
            TransactionId::from_i64(payment.cart_id.into_i64()),
            cart.total_amount(),
        );

        transaction.apply_payment(payment.payment_amount.unwrap_or(cart.total_amount()))?;

        let paid = self
            .carts
            .promote_to_transaction(payment.cart_id, payment.payment_amount)
            .await?;

        info!(transaction = %paid.id, total = %paid.total_amount, "cart paid");

        Ok(paid)
    }

    async fn view_cart(&self, cart: CartId) -> Result<ShoppingCart, ShopServiceError> {
        self.open_cart(cart).await
    }

    async fn update_stock(&self, update: StockUpdate) -> Result<Goods, ShopServiceError> {
        Ok(self
            .goods
            .update_stock(update.goods_id, update.action, update.quantity)
            .await?)
    }

    async fn request_delivery_price(&self, cart: CartId) -> Result<Decimal, ShopServiceError> {
        Ok(self.support.delivery_price(cart).await)
    }

    async fn request_pickup(&self, cart: CartId) -> Result<bool, ShopServiceError> {
        Ok(self.support.request_pickup(cart).await)
    }

    async fn reset(&self) -> Result<(), ShopServiceError> {
        self.carts.reset().await?;

        info!("cart and transaction state cleared");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ShopService: Send + Sync {
    /// One page of the goods catalog.
    async fn list_goods(&self, query: GoodsQuery) -> Result<Vec<Goods>, ShopServiceError>;

    /// Appends goods to an open cart, or to a new cart when no cart id is given.
    async fn add_to_cart(&self, request: AddToCart) -> Result<CartAdded, ShopServiceError>;

    /// Pays for an open cart and turns it into a transaction.
    async fn pay(&self, payment: Payment) -> Result<Transaction, ShopServiceError>;

    /// An open cart with its line items.
    async fn view_cart(&self, cart: CartId) -> Result<ShoppingCart, ShopServiceError>;

    /// Increments or decrements goods stock.
    async fn update_stock(&self, update: StockUpdate) -> Result<Goods, ShopServiceError>;

    async fn request_delivery_price(&self, cart: CartId) -> Result<Decimal, ShopServiceError>;

    async fn request_pickup(&self, cart: CartId) -> Result<bool, ShopServiceError>;

    /// Clears every cart and transaction.
    async fn reset(&self) -> Result<(), ShopServiceError>;
}
