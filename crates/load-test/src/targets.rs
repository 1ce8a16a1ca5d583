//! Request generators

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// Goods ids seeded in the catalog with the price each is sold at.
pub const GOODS_PRICES: [(i64, f64); 7] = [
    (1, 3000.0),
    (2, 1500.0),
    (3, 1500.0),
    (4, 2000.0),
    (5, 1000.0),
    (6, 2500.0),
    (7, 2500.0),
];

/// Largest quantity a generated line item asks for.
pub const MAX_QUANTITY: i64 = 49;

/// Every cart whose id is a multiple of this gets paid right after it is filled.
pub const PAY_EVERY_NTH_CART: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddToCartBody {
    pub user_id: i64,
    pub goods_id: i64,
    pub goods_price: f64,
    pub total_goods: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayBody {
    pub cart_id: i64,
    pub payment_amount: f64,
}

/// `data` of a successful add-to-cart response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartUpdated {
    pub cart_id: i64,
    pub total_amount: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Produces add-to-cart bodies for ever increasing user ids from a seeded generator.
#[derive(Debug)]
pub struct AddToCartTargeter {
    rng: StdRng,
    next_user_id: i64,
}

impl AddToCartTargeter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            next_user_id: 1,
        }
    }

    pub fn next_body(&mut self) -> AddToCartBody {
        let index = self.rng.gen_range(0..GOODS_PRICES.len());

        let (goods_id, goods_price) = GOODS_PRICES.get(index).copied().unwrap_or((1, 3000.0));

        let body = AddToCartBody {
            user_id: self.next_user_id,
            goods_id,
            goods_price,
            total_goods: self.rng.gen_range(1..=MAX_QUANTITY),
        };

        self.next_user_id += 1;

        body
    }
}

/// The pay request that follows a filled cart, if this cart is due for one.
pub fn payment_for(cart: &CartUpdated) -> Option<PayBody> {
    (cart.cart_id % PAY_EVERY_NTH_CART == 0).then(|| PayBody {
        cart_id: cart.cart_id,
        payment_amount: cart.total_amount,
    })
}
