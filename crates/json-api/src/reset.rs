//! Reset Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::warn;

use crate::{
    extensions::*,
    response::{ApiError, SuccessResponse},
    state::State,
};

/// Reset Handler
///
/// Drops every cart and transaction. Goods are kept.
#[endpoint(tags("admin"), summary = "Clear Carts And Transactions")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SuccessResponse<String>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    warn!("clearing every cart and transaction");

    state.app.shop.reset().await?;

    Ok(SuccessResponse::ok("cleared".to_string()))
}
