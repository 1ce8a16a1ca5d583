//! Delivery and pickup collaborator.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::carts::models::CartId;

/// Answers delivery-price quotes and pickup requests for a cart.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSupportService;

#[async_trait]
impl SupportService for NoopSupportService {
    async fn delivery_price(&self, cart: CartId) -> Decimal {
        debug!(cart = %cart, "delivery price requested");

        Decimal::ZERO
    }

    async fn request_pickup(&self, cart: CartId) -> bool {
        debug!(cart = %cart, "pickup requested");

        true
    }
}

#[automock]
#[async_trait]
pub trait SupportService: Send + Sync {
    /// Quotes the delivery price for a cart.
    async fn delivery_price(&self, cart: CartId) -> Decimal;

    /// Requests a courier pickup for a cart. `true` when accepted.
    async fn request_pickup(&self, cart: CartId) -> bool;
}
