//! Goods Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use umkm_app::domain::goods::models::{GoodsQuery, GoodsSortField, SortDirection};

use crate::{
    extensions::*,
    goods::handlers::GoodsResponse,
    response::{ApiError, SuccessResponse},
    state::State,
};

/// Goods Index Handler
///
/// Returns one page of the goods catalog.
#[endpoint(tags("goods"), summary = "List Goods")]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    total_goods: QueryParam<u32, false>,
    sort: QueryParam<String, false>,
    sort_by: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<SuccessResponse<Vec<GoodsResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = GoodsQuery {
        page: page.into_inner().unwrap_or(1),
        page_size: total_goods
            .into_inner()
            .unwrap_or(state.default_page_size),
        sort_by: sort_by
            .into_inner()
            .map(|field| field.parse::<GoodsSortField>())
            .transpose()?
            .unwrap_or_default(),
        direction: sort
            .into_inner()
            .map(|direction| direction.parse::<SortDirection>())
            .transpose()?
            .unwrap_or_default(),
    };

    let goods = state.app.shop.list_goods(query).await?;

    Ok(SuccessResponse::ok(
        goods.into_iter().map(GoodsResponse::from).collect(),
    ))
}
