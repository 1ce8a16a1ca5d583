//! Goods Handlers

pub(crate) mod index;
pub(crate) mod stock;

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use umkm_app::domain::goods::models::Goods;

/// Goods Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct GoodsResponse {
    pub id: i64,
    pub name: String,

    /// Units in stock
    pub stocks: i64,

    #[salvo(schema(value_type = f64))]
    pub price: Decimal,
}

impl From<Goods> for GoodsResponse {
    fn from(goods: Goods) -> Self {
        Self {
            id: goods.id.into_i64(),
            name: goods.name,
            stocks: goods.stock,
            price: goods.price,
        }
    }
}
