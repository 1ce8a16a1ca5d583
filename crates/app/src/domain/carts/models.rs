//! Cart Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{errors::ValidationError, goods::models::GoodsId},
    ids::TypedId,
};

/// Cart Id. A cart is an open transaction row, so this is also the transaction id.
pub type CartId = TypedId<ShoppingCart>;

/// Line Item Id
pub type LineItemId = TypedId<LineItem>;

/// Shopper identity. Users are owned by another system; only their id is stored.
#[derive(Debug)]
pub struct User;

/// User Id
pub type UserId = TypedId<User>;

/// Largest amount a `NUMERIC(14, 2)` column holds.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Decimal places the store keeps for prices and totals.
pub const AMOUNT_SCALE: u32 = 2;

/// One goods-and-quantity entry attached to a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Store identity; `None` until the item has been persisted.
    pub id: Option<LineItemId>,
    pub goods_id: GoodsId,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub added_at: Timestamp,
}

impl LineItem {
    /// `quantity × unit_price`, or `None` when it overflows.
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }

    #[must_use]
    pub fn added_at_epoch_seconds(&self) -> i64 {
        self.added_at.as_second()
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Shopping Cart Model
///
/// `total_amount` is derived from the line items and can only change by appending one.
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingCart {
    id: Option<CartId>,
    user_id: UserId,
    total_amount: Decimal,
    line_items: Vec<LineItem>,
}

impl ShoppingCart {
    /// An empty, not yet persisted cart for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUser`] when the user id is unassigned.
    pub fn new(user_id: UserId) -> Result<Self, ValidationError> {
        if !user_id.is_assigned() {
            return Err(ValidationError::InvalidUser);
        }

        Ok(Self {
            id: None,
            user_id,
            total_amount: Decimal::ZERO,
            line_items: Vec::new(),
        })
    }

    /// Rebuilds a persisted cart from its stored line items.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AmountOutOfRange`] when the items do not sum to a storable total.
    pub fn restore(
        id: CartId,
        user_id: UserId,
        line_items: Vec<LineItem>,
    ) -> Result<Self, ValidationError> {
        let total_amount = sum_line_items(&line_items)?;

        Ok(Self {
            id: Some(id),
            user_id,
            total_amount,
            line_items,
        })
    }

    #[must_use]
    pub fn id(&self) -> Option<CartId> {
        self.id.filter(|id| id.is_assigned())
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Line items appended since the cart was loaded from the store.
    pub fn pending_line_items(&self) -> impl Iterator<Item = &LineItem> {
        self.line_items.iter().filter(|item| !item.is_persisted())
    }

    /// Appends a line item stamped with the current time and refreshes the total.
    ///
    /// # Errors
    ///
    /// Rejects unassigned goods, non-positive quantities, non-positive prices, prices
    /// with more than [`AMOUNT_SCALE`] decimal places and totals above [`MAX_AMOUNT`].
    pub fn add_line_item(
        &mut self,
        goods_id: GoodsId,
        quantity: i64,
        unit_price: Decimal,
    ) -> Result<(), ValidationError> {
        if !goods_id.is_assigned() {
            return Err(ValidationError::InvalidGoods);
        }

        if quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity(quantity));
        }

        if unit_price <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice(unit_price));
        }

        if unit_price.normalize().scale() > AMOUNT_SCALE {
            return Err(ValidationError::PriceScale(unit_price));
        }

        let item = LineItem {
            id: None,
            goods_id,
            quantity,
            unit_price,
            added_at: Timestamp::now(),
        };

        let total_amount = item
            .subtotal()
            .and_then(|subtotal| self.total_amount.checked_add(subtotal))
            .filter(|total| *total <= MAX_AMOUNT)
            .ok_or(ValidationError::AmountOutOfRange { max: MAX_AMOUNT })?;

        self.line_items.push(item);
        self.total_amount = total_amount;

        Ok(())
    }

    /// Total number of goods units across all line items.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        // Bounded by MAX_AMOUNT at one cent per unit.
        self.line_items.iter().map(|item| item.quantity).sum()
    }
}

fn sum_line_items(line_items: &[LineItem]) -> Result<Decimal, ValidationError> {
    line_items
        .iter()
        .try_fold(Decimal::ZERO, |total, item| {
            item.subtotal()
                .and_then(|subtotal| total.checked_add(subtotal))
        })
        .filter(|total| *total <= MAX_AMOUNT)
        .ok_or(ValidationError::AmountOutOfRange { max: MAX_AMOUNT })
}

/// What the store reports back after persisting a cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistedCartSummary {
    pub cart_id: CartId,
    pub user_id: UserId,
    pub total_quantity: i64,
    pub total_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goods(id: i64) -> GoodsId {
        GoodsId::from_i64(id)
    }

    fn new_cart() -> ShoppingCart {
        ShoppingCart::new(UserId::from_i64(100)).expect("user 100 is valid")
    }

    #[test]
    fn new_cart_is_empty_and_unpersisted() {
        let cart = new_cart();

        assert_eq!(cart.id(), None);
        assert_eq!(cart.total_amount(), Decimal::ZERO);
        assert_eq!(cart.total_quantity(), 0);
        assert!(cart.line_items().is_empty());
    }

    #[test]
    fn new_cart_requires_a_user() {
        assert_eq!(
            ShoppingCart::new(UserId::from_i64(0)),
            Err(ValidationError::InvalidUser)
        );
    }

    #[test]
    fn total_tracks_every_appended_item() {
        let mut cart = new_cart();

        let items = [
            (1, 2, Decimal::from(2000)),
            (3, 4, Decimal::from(1500)),
            (2, 1, Decimal::new(1250, 2)),
            (3, 7, Decimal::from(1500)),
        ];

        let mut expected = Decimal::ZERO;

        for (goods_id, quantity, price) in items {
            cart.add_line_item(goods(goods_id), quantity, price)
                .expect("item should be valid");

            expected += Decimal::from(quantity) * price;

            assert_eq!(cart.total_amount(), expected);
        }

        assert_eq!(cart.total_quantity(), 14);
        assert_eq!(cart.line_items().len(), 4);
    }

    #[test]
    fn worked_example_totals() {
        let mut cart = new_cart();

        cart.add_line_item(goods(1), 2, Decimal::from(2000))
            .expect("item should be valid");

        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_amount(), Decimal::from(4000));

        cart.add_line_item(goods(3), 4, Decimal::from(1500))
            .expect("item should be valid");

        assert_eq!(cart.total_quantity(), 6);
        assert_eq!(cart.total_amount(), Decimal::from(10_000));
    }

    #[test]
    fn invalid_items_are_rejected_without_changing_the_cart() {
        let mut cart = new_cart();

        assert_eq!(
            cart.add_line_item(goods(1), 0, Decimal::from(10)),
            Err(ValidationError::NonPositiveQuantity(0))
        );
        assert_eq!(
            cart.add_line_item(goods(1), 1, Decimal::from(-10)),
            Err(ValidationError::NonPositivePrice(Decimal::from(-10)))
        );
        assert_eq!(
            cart.add_line_item(goods(0), 1, Decimal::from(10)),
            Err(ValidationError::InvalidGoods)
        );

        assert!(cart.line_items().is_empty());
        assert_eq!(cart.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn amounts_beyond_the_store_range_are_rejected_without_changing_the_cart() {
        let mut cart = new_cart();

        assert_eq!(
            cart.add_line_item(
                goods(1),
                9_000_000_000_000_000_000,
                Decimal::from(10_000_000_000_i64)
            ),
            Err(ValidationError::AmountOutOfRange { max: MAX_AMOUNT })
        );
        assert_eq!(
            cart.add_line_item(goods(1), i64::MAX, Decimal::MAX),
            Err(ValidationError::AmountOutOfRange { max: MAX_AMOUNT })
        );

        assert!(cart.line_items().is_empty());
        assert_eq!(cart.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn total_may_reach_but_not_pass_the_column_limit() {
        let mut cart = new_cart();

        cart.add_line_item(goods(1), 1, MAX_AMOUNT - Decimal::ONE)
            .expect("item should be valid");

        assert_eq!(
            cart.add_line_item(goods(2), 2, Decimal::ONE),
            Err(ValidationError::AmountOutOfRange { max: MAX_AMOUNT })
        );

        cart.add_line_item(goods(2), 1, Decimal::ONE)
            .expect("item should be valid");

        assert_eq!(cart.total_amount(), MAX_AMOUNT);
        assert_eq!(cart.line_items().len(), 2);
    }

    #[test]
    fn max_amount_matches_numeric_14_2() {
        assert_eq!(MAX_AMOUNT.to_string(), "999999999999.99");
    }

    #[test]
    fn prices_with_sub_cent_precision_are_rejected() {
        let mut cart = new_cart();

        assert_eq!(
            cart.add_line_item(goods(1), 3, Decimal::new(125, 3)),
            Err(ValidationError::PriceScale(Decimal::new(125, 3)))
        );
        assert_eq!(
            cart.add_line_item(goods(1), 1, Decimal::new(4, 3)),
            Err(ValidationError::PriceScale(Decimal::new(4, 3)))
        );
        assert!(cart.line_items().is_empty());

        // Trailing zeros are not extra precision.
        cart.add_line_item(goods(1), 3, Decimal::new(12_500, 3))
            .expect("12.500 has two significant decimal places");

        assert_eq!(cart.total_amount(), Decimal::new(3750, 2));
    }

    #[test]
    fn restoring_items_that_overflow_is_rejected() {
        let item = |id| LineItem {
            id: Some(LineItemId::from_i64(id)),
            goods_id: goods(1),
            quantity: 1,
            unit_price: MAX_AMOUNT,
            added_at: Timestamp::UNIX_EPOCH,
        };

        assert_eq!(
            ShoppingCart::restore(
                CartId::from_i64(1),
                UserId::from_i64(100),
                vec![item(1), item(2)]
            ),
            Err(ValidationError::AmountOutOfRange { max: MAX_AMOUNT })
        );
    }

    #[test]
    fn restored_cart_recomputes_total_and_tracks_pending_items() {
        let stored = LineItem {
            id: Some(LineItemId::from_i64(9)),
            goods_id: goods(1),
            quantity: 2,
            unit_price: Decimal::from(2000),
            added_at: Timestamp::UNIX_EPOCH,
        };

        let mut cart =
            ShoppingCart::restore(CartId::from_i64(1), UserId::from_i64(100), vec![stored])
                .expect("stored items are valid");

        assert_eq!(cart.id(), Some(CartId::from_i64(1)));
        assert_eq!(cart.total_amount(), Decimal::from(4000));
        assert_eq!(cart.pending_line_items().count(), 0);

        cart.add_line_item(goods(3), 4, Decimal::from(1500))
            .expect("item should be valid");

        let pending: Vec<&LineItem> = cart.pending_line_items().collect();

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].goods_id, goods(3));
        assert_eq!(cart.total_amount(), Decimal::from(10_000));
    }

    #[test]
    fn line_item_exposes_epoch_seconds() {
        let item = LineItem {
            id: None,
            goods_id: goods(1),
            quantity: 1,
            unit_price: Decimal::ONE,
            added_at: Timestamp::from_second(1_700_000_000).expect("valid timestamp"),
        };

        assert_eq!(item.added_at_epoch_seconds(), 1_700_000_000);
    }
}
