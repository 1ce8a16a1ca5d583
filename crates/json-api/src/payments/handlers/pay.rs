//! Pay Handler

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use umkm_app::domain::{
    carts::models::CartId,
    shop::data::Payment,
    transactions::models::Transaction,
};

use crate::{
    extensions::*,
    observability::record_payment,
    response::{ApiError, SuccessResponse},
    state::State,
};

/// Pay Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayRequest {
    pub cart_id: i64,

    /// Cash handed over; omit to pay the exact total
    #[salvo(schema(value_type = Option<f64>))]
    pub payment_amount: Option<Decimal>,
}

impl From<PayRequest> for Payment {
    fn from(request: PayRequest) -> Self {
        Payment {
            cart_id: CartId::from_i64(request.cart_id),
            payment_amount: request.payment_amount,
        }
    }
}

/// Transaction Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionResponse {
    pub transaction_id: i64,

    #[salvo(schema(value_type = f64))]
    pub total_amount: Decimal,

    #[salvo(schema(value_type = f64))]
    pub payment_amount: Decimal,

    /// Change returned to the shopper
    #[salvo(schema(value_type = f64))]
    pub return_amount: Decimal,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            transaction_id: transaction.id.into_i64(),
            total_amount: transaction.total_amount,
            payment_amount: transaction.payment_amount,
            return_amount: transaction.return_amount,
        }
    }
}

/// Pay Handler
///
/// Pays for an open cart, turning it into a finished transaction.
#[endpoint(tags("payments"), summary = "Pay For Cart")]
pub(crate) async fn handler(
    json: JsonBody<PayRequest>,
    depot: &mut Depot,
) -> Result<Json<SuccessResponse<TransactionResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let transaction = state.app.shop.pay(json.into_inner().into()).await?;

    record_payment();

    Ok(SuccessResponse::ok(transaction.into()))
}
